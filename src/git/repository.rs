use crate::domain::TagInfo;
use crate::error::{Result, SiremError};
use chrono::{DateTime, FixedOffset, NaiveDate};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)
            .map_err(|e| SiremError::query(format!("Not in a git repository: {}", e)))?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn resolve_oid(&self, reference: &str) -> Result<Oid> {
        let object = self
            .repo
            .revparse_single(reference)
            .map_err(|e| SiremError::query(format!("Cannot resolve '{}': {}", reference, e)))?;

        let commit = object.peel_to_commit().map_err(|e| {
            SiremError::query(format!("'{}' does not point at a commit: {}", reference, e))
        })?;

        Ok(commit.id())
    }

    /// Tagger date for annotated tags, committer date of the target otherwise
    fn tag_date(&self, name: &str) -> Result<NaiveDate> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

        let tagger_time = reference
            .peel_to_tag()
            .ok()
            .and_then(|tag| tag.tagger().map(|signature| signature.when()));

        let time = match tagger_time {
            Some(time) => time,
            None => reference
                .peel_to_commit()
                .map_err(|e| {
                    SiremError::query(format!("Tag '{}' does not point at a commit: {}", name, e))
                })?
                .committer()
                .when(),
        };

        signature_date(time)
            .ok_or_else(|| SiremError::query(format!("Tag '{}' has an invalid date", name)))
    }
}

/// Calendar date of a git timestamp in the signature's own time zone
fn signature_date(time: git2::Time) -> Option<NaiveDate> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    let utc = DateTime::from_timestamp(time.seconds(), 0)?;
    Some(utc.with_timezone(&offset).date_naive())
}

impl super::Repository for Git2Repository {
    fn list_tags(&self, prefix: &str) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;

        let mut matching: Vec<&str> = names
            .iter()
            .flatten()
            .filter(|name| name.starts_with(prefix))
            .collect();
        matching.sort_unstable();

        let mut tags = Vec::with_capacity(matching.len());
        for name in matching {
            tags.push(TagInfo::new(name, self.tag_date(name)?));
        }

        tracing::debug!(prefix, count = tags.len(), "listed tags");
        Ok(tags)
    }

    fn resolve_commit(&self, reference: &str) -> Result<String> {
        Ok(self.resolve_oid(reference)?.to_string())
    }

    fn commits_between(&self, from_ref: &str, to_ref: &str) -> Result<Vec<String>> {
        let from_oid = self.resolve_oid(from_ref)?;
        let to_oid = self.resolve_oid(to_ref)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut subjects = Vec::new();
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;
            subjects.push(commit.summary().unwrap_or_default().to_string());
        }

        Ok(subjects)
    }
}
