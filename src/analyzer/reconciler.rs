use std::collections::BTreeSet;

use regex::Regex;

use crate::domain::{CandidateOrder, CandidatePattern, CandidateStatus, ReleaseCandidate};
use crate::error::Result;
use crate::git::Repository;

/// Release state of one tag as derived from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseStatus {
    /// The release tag itself exists
    pub released: bool,
    /// Candidates in order, `None` when the release has no candidate tags
    pub release_candidates: Option<Vec<ReleaseCandidate>>,
}

/// Derives release candidate status and inter-candidate changes from git tags
pub struct ReleaseReconciler {
    content_regex: Regex,
    order: CandidateOrder,
}

impl ReleaseReconciler {
    /// Create a reconciler extracting content with `content_regex`
    pub fn new(content_regex: &str, order: CandidateOrder) -> Result<Self> {
        Ok(Self::from_regex(Regex::new(content_regex)?, order))
    }

    pub fn from_regex(content_regex: Regex, order: CandidateOrder) -> Self {
        ReleaseReconciler {
            content_regex,
            order,
        }
    }

    /// Reconcile the candidates of `release_tag`
    ///
    /// All candidates but the last are rejected. The last one is approved when
    /// the release tag points at the same commit, rejected when it points
    /// elsewhere, and pending while the release tag does not exist. Every
    /// candidate after the first gets the commits since its predecessor and
    /// the content extracted from them.
    pub fn reconcile<R: Repository + ?Sized>(
        &self,
        repo: &R,
        release_tag: &str,
    ) -> Result<ReleaseStatus> {
        let tags = repo.list_tags(release_tag)?;
        let released = tags.iter().any(|tag| tag.name == release_tag);

        let pattern = CandidatePattern::for_release(release_tag)?;
        let mut candidates: Vec<ReleaseCandidate> = tags
            .into_iter()
            .filter_map(|tag| {
                let number = pattern.candidate_number(&tag.name)?.to_string();
                Some(ReleaseCandidate::new(tag, number))
            })
            .collect();

        if candidates.is_empty() {
            tracing::debug!(release_tag, released, "no release candidates");
            return Ok(ReleaseStatus {
                released,
                release_candidates: None,
            });
        }

        candidates.sort_by(|a, b| {
            self.order
                .compare(&a.release_candidate_number, &b.release_candidate_number)
        });

        let latest_status = if released {
            let latest_tag = &candidates[candidates.len() - 1].tag;
            if repo.resolve_commit(latest_tag)? == repo.resolve_commit(release_tag)? {
                CandidateStatus::Approved
            } else {
                CandidateStatus::Rejected
            }
        } else {
            CandidateStatus::Pending
        };

        for i in 1..candidates.len() {
            let commits = repo.commits_between(&candidates[i - 1].tag, &candidates[i].tag)?;
            let content = self.extract_content(&commits);
            candidates[i].commits = Some(commits);
            candidates[i].content = Some(content);
        }

        if let Some(latest) = candidates.last_mut() {
            latest.status = latest_status;
            tracing::debug!(
                release_tag,
                candidate = %latest.tag,
                status = %latest.status,
                "latest release candidate"
            );
        }

        Ok(ReleaseStatus {
            released,
            release_candidates: Some(candidates),
        })
    }

    /// Apply the content regex globally to each subject and collect every match
    ///
    /// A regex without capture groups contributes whole matches; with groups,
    /// every group that took part in a match contributes its text.
    pub fn extract_content<S: AsRef<str>>(&self, subjects: &[S]) -> BTreeSet<String> {
        let has_groups = self.content_regex.captures_len() > 1;
        let mut content = BTreeSet::new();

        for subject in subjects {
            let subject = subject.as_ref();
            if has_groups {
                for captures in self.content_regex.captures_iter(subject) {
                    content.extend(
                        captures
                            .iter()
                            .skip(1)
                            .flatten()
                            .map(|m| m.as_str().to_string()),
                    );
                }
            } else {
                content.extend(
                    self.content_regex
                        .find_iter(subject)
                        .map(|m| m.as_str().to_string()),
                );
            }
        }

        content
    }
}
