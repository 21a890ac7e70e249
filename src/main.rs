use std::process::ExitCode;

use clap::Parser;

use sirem::cli::{self, Cli};
use sirem::error::EXIT_FAILURE;
use sirem::{ui, SiremError};

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::setup_logging(args.verbose);

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            ui::display_error(&format!("{:#}", err));

            let code = err
                .downcast_ref::<SiremError>()
                .map_or(EXIT_FAILURE, SiremError::exit_code);
            ExitCode::from(code)
        }
    }
}
