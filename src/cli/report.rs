use clap::Args;

use super::Context;
use crate::analyzer::ReleaseReconciler;
use crate::config::ReportFormat;
use crate::domain::CandidateOrder;
use crate::git::Git2Repository;
use crate::store::VersionStore;
use crate::{report, status};

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Only report this version
    pub tag: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Regex applied to commit subjects to extract release candidate content
    #[arg(long)]
    pub content_regex: Option<String>,

    /// How release candidate numbers are ordered
    #[arg(long, value_enum)]
    pub candidate_order: Option<CandidateOrder>,
}

impl ReportArgs {
    /// Render the report for the repository in the current directory to stdout
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let config = &ctx.config.report;
        let format = self.format.unwrap_or(config.format);
        let content_regex = self.content_regex.as_deref().unwrap_or(&config.content_regex);
        let order = self.candidate_order.unwrap_or(config.candidate_order);

        let store = VersionStore::load(&ctx.versions_file)?;
        if let Some(tag) = &self.tag {
            store.require(tag)?;
        }

        let reconciler = ReleaseReconciler::new(content_regex, order)?;
        let repo = Git2Repository::open(".")?;
        let statuses = status::aggregate(&store, &repo, &reconciler, self.tag.as_deref())?;
        tracing::debug!(versions = statuses.len(), ?format, "rendering report");

        print!("{}", report::render(&statuses, format)?);
        Ok(())
    }
}
