//! Rendering of version statuses for the `report` command

pub mod html;

use crate::config::ReportFormat;
use crate::error::Result;
use crate::status::VersionStatus;

/// Render statuses in the requested format
pub fn render(statuses: &[VersionStatus], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Yaml => render_yaml(statuses),
        ReportFormat::Html => Ok(html::render_html(statuses)),
    }
}

/// YAML document listing every status; absent candidate data is omitted
pub fn render_yaml(statuses: &[VersionStatus]) -> Result<String> {
    serde_yaml::to_string(statuses).map_err(|e| std::io::Error::other(e).into())
}
