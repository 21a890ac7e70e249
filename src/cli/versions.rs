use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_date, Context};
use crate::store::VersionStore;
use crate::ui;

#[derive(Debug, Subcommand)]
pub enum VersionsCommand {
    /// Start tracking a new version
    Create {
        /// Tag the version will be released under
        tag: String,

        /// Planned release date (YYYY-MM-DD), stored as the `release` milestone
        #[arg(long, value_parser = parse_date)]
        release_date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Stop tracking a version
    Remove { tag: String },

    /// Add or replace a milestone date
    SetMilestone {
        tag: String,
        milestone: String,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Remove a milestone
    RemoveMilestone { tag: String, milestone: String },

    /// Replace the description of a version
    SetDescription {
        tag: String,
        #[arg(long)]
        description: String,
    },
}

impl VersionsCommand {
    /// Load the store, apply the mutation and save it.
    ///
    /// A failing mutation returns before the save, so the file is untouched.
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let mut store = VersionStore::load(&ctx.versions_file)?;

        let message = match self {
            VersionsCommand::Create {
                tag,
                release_date,
                description,
            } => {
                store.create(&tag, description.as_deref(), release_date)?;
                format!("Created version {}", tag)
            }
            VersionsCommand::Remove { tag } => {
                store.remove(&tag)?;
                format!("Removed version {}", tag)
            }
            VersionsCommand::SetMilestone {
                tag,
                milestone,
                date,
            } => {
                store.set_milestone(&tag, &milestone, date)?;
                format!("Set milestone '{}' of {} to {}", milestone, tag, date)
            }
            VersionsCommand::RemoveMilestone { tag, milestone } => {
                let date = store.remove_milestone(&tag, &milestone)?;
                format!("Removed milestone '{}' ({}) from {}", milestone, date, tag)
            }
            VersionsCommand::SetDescription { tag, description } => {
                store.set_description(&tag, &description)?;
                format!("Updated description of {}", tag)
            }
        };

        store.save()?;
        ui::display_success(&message);
        Ok(())
    }
}
