use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::CandidateOrder;
use crate::error::{Result, SiremError};

/// Name of the configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".sirem.toml";

/// Represents the complete configuration for sirem.
///
/// Contains the versions file location, Jira connection settings and report defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_versions_file")]
    pub versions_file: PathBuf,

    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

fn default_versions_file() -> PathBuf {
    PathBuf::from("VERSIONS.yaml")
}

fn default_jql() -> String {
    "issuetype != sub-task".to_string()
}

fn default_version_template() -> String {
    "{version}".to_string()
}

fn default_content_regex() -> String {
    "^.*$".to_string()
}

/// Connection and naming settings for the Jira project versions are mirrored into.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub project: Option<String>,

    /// Extra filter and-ed onto the fixVersion clause when importing scope
    #[serde(default = "default_jql")]
    pub jql: String,

    /// Jira version name for a tag; `{version}` is replaced by the tag
    #[serde(default = "default_version_template")]
    pub version_template: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        JiraConfig {
            base_url: None,
            username: None,
            password: None,
            project: None,
            jql: default_jql(),
            version_template: default_version_template(),
        }
    }
}

/// Output format of the `report` command.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Yaml,
    #[default]
    Html,
}

/// Defaults for the `report` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// Applied to every commit subject between candidates to extract their content
    #[serde(default = "default_content_regex")]
    pub content_regex: String,

    #[serde(default)]
    pub candidate_order: CandidateOrder,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            format: ReportFormat::default(),
            content_regex: default_content_regex(),
            candidate_order: CandidateOrder::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            versions_file: default_versions_file(),
            jira: JiraConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.sirem.toml` in current directory
/// 3. `sirem.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        match dirs::config_dir().map(|dir| dir.join("sirem.toml")) {
            Some(user_config) if user_config.exists() => user_config,
            _ => {
                tracing::debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        }
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)?;
    toml::from_str(&config_str)
        .map_err(|e| SiremError::config(format!("{}: {}", path.display(), e)))
}
