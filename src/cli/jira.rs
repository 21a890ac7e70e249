use clap::{Args, Subcommand};

use super::Context;
use crate::domain::VersionNameTemplate;
use crate::error::SiremError;
use crate::jira::{IssueTracker, JiraClient};
use crate::store::VersionStore;
use crate::{sync, ui};

/// Jira connection flags; each overrides the matching `[jira]` config key
#[derive(Debug, Args)]
pub struct JiraArgs {
    /// Base URL of the Jira instance
    #[arg(long = "jira-baseurl")]
    pub base_url: Option<String>,

    #[arg(long = "jira-username")]
    pub username: Option<String>,

    #[arg(long = "jira-password", env = "SIREM_JIRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Key of the Jira project versions are mirrored into
    #[arg(long = "jira-project")]
    pub project: Option<String>,

    /// Extra filter for the issues imported as scope
    #[arg(long)]
    pub jql: Option<String>,

    /// Jira version name for a tag, `{version}` is replaced by the tag
    #[arg(long = "jira-version-template")]
    pub version_template: Option<String>,

    #[command(subcommand)]
    pub command: JiraCommand,
}

#[derive(Debug, Subcommand)]
pub enum JiraCommand {
    /// Replace the scope of a version with the issues fixed in its Jira version
    ImportScope { version: String },

    /// Create and update Jira versions to match the versions file
    Sync {
        /// Print the planned changes without executing them
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

/// Jira settings after applying flag overrides to the configuration
#[derive(Debug, Clone, PartialEq)]
struct JiraSettings {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    project: Option<String>,
    jql: String,
    template: VersionNameTemplate,
}

impl JiraSettings {
    fn resolve(args: &JiraArgs, ctx: &Context) -> Self {
        let config = &ctx.config.jira;
        JiraSettings {
            base_url: args.base_url.clone().or_else(|| config.base_url.clone()),
            username: args.username.clone().or_else(|| config.username.clone()),
            password: args.password.clone().or_else(|| config.password.clone()),
            project: args.project.clone().or_else(|| config.project.clone()),
            jql: args.jql.clone().unwrap_or_else(|| config.jql.clone()),
            template: VersionNameTemplate::new(
                args.version_template
                    .as_deref()
                    .unwrap_or(&config.version_template),
            ),
        }
    }

    fn client(&self) -> Result<JiraClient, SiremError> {
        let base_url = required(&self.base_url, "base URL", "--jira-baseurl")?;
        let username = required(&self.username, "username", "--jira-username")?;
        let password = required(&self.password, "password", "--jira-password")?;
        JiraClient::new(base_url, username, password)
    }

    fn project(&self) -> Result<&str, SiremError> {
        required(&self.project, "project", "--jira-project")
    }
}

fn required<'a>(value: &'a Option<String>, what: &str, flag: &str) -> Result<&'a str, SiremError> {
    value.as_deref().ok_or_else(|| {
        SiremError::config(format!(
            "Jira {} is not configured, pass {} or set it in the [jira] section",
            what, flag
        ))
    })
}

impl JiraArgs {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let settings = JiraSettings::resolve(&self, ctx);
        let mut store = VersionStore::load(&ctx.versions_file)?;

        match self.command {
            JiraCommand::ImportScope { version } => {
                store.require(&version)?;
                let client = settings.client()?;
                let today = chrono::Local::now().date_naive();

                let count = sync::import_scope(
                    &client,
                    &mut store,
                    &version,
                    &settings.jql,
                    &settings.template,
                    today,
                )?;
                store.save()?;
                ui::display_success(&format!("Imported {} issue(s) into {}", count, version));
            }
            JiraCommand::Sync { dry_run } => {
                let project = settings.project()?;
                let client = settings.client()?;

                ui::display_status(&format!("Fetching versions of Jira project {}", project));
                let remote = client.project_versions(project)?;
                let actions = sync::plan_sync(store.versions(), &remote, &settings.template);
                ui::display_sync_plan(&actions, dry_run);

                if !dry_run {
                    sync::apply_sync(&client, project, &actions)?;
                    if !actions.is_empty() {
                        ui::display_success("Jira versions updated");
                    }
                }
            }
        }
        Ok(())
    }
}
