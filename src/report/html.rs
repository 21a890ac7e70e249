use std::fmt::Write;

use crate::domain::{CandidateStatus, ReleaseCandidate};
use crate::status::VersionStatus;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin:.5em 0 1.5em}\
th,td{border:1px solid #ccc;padding:.3em .6em;text-align:left;vertical-align:top}\
.approved{color:#1a7f37}.rejected{color:#cf222e}.pending{color:#9a6700}\
.released{color:#1a7f37}.unreleased{color:#57606a}";

/// Escape text for use in HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn status_class(status: CandidateStatus) -> &'static str {
    match status {
        CandidateStatus::Pending => "pending",
        CandidateStatus::Approved => "approved",
        CandidateStatus::Rejected => "rejected",
    }
}

/// Self-contained HTML page with one section per version
pub fn render_html(statuses: &[VersionStatus]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Release status</title>\n");
    let _ = writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE);

    for status in statuses {
        render_version(&mut out, status);
    }

    out.push_str("</body>\n</html>\n");
    out
}

// fmt::Write into a String is infallible
fn render_version(out: &mut String, status: &VersionStatus) {
    let (class, label) = if status.released {
        ("released", "released")
    } else {
        ("unreleased", "not released")
    };
    let _ = writeln!(
        out,
        "<section>\n<h2>{} <small class=\"{}\">{}</small></h2>",
        escape(&status.tag),
        class,
        label
    );
    if !status.description.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape(&status.description));
    }

    if !status.milestones.is_empty() {
        out.push_str("<h3>Milestones</h3>\n<table>\n<tr><th>Milestone</th><th>Date</th></tr>\n");
        for (name, date) in &status.milestones {
            let _ = writeln!(out, "<tr><td>{}</td><td>{}</td></tr>", escape(name), date);
        }
        out.push_str("</table>\n");
    }

    if !status.scope.is_empty() {
        out.push_str("<h3>Scope</h3>\n<table>\n<tr><th>Issue</th><th>Summary</th><th>Priority</th></tr>\n");
        for item in &status.scope {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&item.reference),
                escape(&item.summary),
                escape(&item.priority)
            );
        }
        out.push_str("</table>\n");
    }

    if let Some(candidates) = &status.release_candidates {
        out.push_str("<h3>Release candidates</h3>\n<table>\n");
        out.push_str("<tr><th>Tag</th><th>Date</th><th>Status</th><th>Content</th><th>Commits</th></tr>\n");
        for candidate in candidates {
            render_candidate(out, candidate);
        }
        out.push_str("</table>\n");
    }

    out.push_str("</section>\n");
}

fn render_candidate(out: &mut String, candidate: &ReleaseCandidate) {
    let list = |items: Vec<&String>| -> String {
        if items.is_empty() {
            return String::new();
        }
        let mut html = String::from("<ul>");
        for item in items {
            let _ = write!(html, "<li>{}</li>", escape(item));
        }
        html.push_str("</ul>");
        html
    };

    let content = candidate
        .content
        .as_ref()
        .map(|content| list(content.iter().collect()))
        .unwrap_or_default();
    let commits = candidate
        .commits
        .as_ref()
        .map(|commits| list(commits.iter().collect()))
        .unwrap_or_default();

    let _ = writeln!(
        out,
        "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td></tr>",
        escape(&candidate.tag),
        candidate.date,
        status_class(candidate.status),
        candidate.status,
        content,
        commits
    );
}
