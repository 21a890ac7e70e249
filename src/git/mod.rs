//! Git query abstraction layer
//!
//! This module provides a trait-based abstraction over the three read-only
//! git queries sirem needs, allowing for a real repository implementation and
//! a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! Code that reconciles release candidates depends on the [Repository] trait
//! rather than a concrete implementation.
//!
//! ```rust
//! # use sirem::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> sirem::Result<()> {
//! let tags = repo.list_tags("v1.0.0")?;
//! let subjects = repo.commits_between("v1.0.0-rc.1", "v1.0.0-rc.2")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::TagInfo;
use crate::error::Result;

/// Read-only git queries used by the release candidate reconciliation
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Failures are never retried;
/// callers treat them as fatal for the current command.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation with canned tags and commit ranges
pub trait Repository {
    /// List tags whose name starts with `prefix`
    ///
    /// Each tag carries its tagger date when it is an annotated tag, and the
    /// committer date of the tagged commit otherwise.
    ///
    /// # Arguments
    /// * `prefix` - Literal name prefix (e.g., "v1.0.0" matches "v1.0.0" and "v1.0.0-rc.1")
    ///
    /// # Returns
    /// * `Ok(Vec<TagInfo>)` - Matching tags sorted by name
    /// * `Err` - If the repository cannot be read or a tag does not point at a commit
    ///
    /// # Example
    /// ```rust
    /// # use sirem::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> sirem::Result<()> {
    /// for tag in repo.list_tags("v2.")? {
    ///     println!("{} ({})", tag.name, tag.date);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_tags(&self, prefix: &str) -> Result<Vec<TagInfo>>;

    /// Resolve a ref (tag, branch or revision expression) to its commit id
    ///
    /// Only used to compare two refs for equality, never for display.
    ///
    /// # Returns
    /// * `Ok(String)` - Full hexadecimal commit id
    /// * `Err` - If the ref does not exist or does not lead to a commit
    fn resolve_commit(&self, reference: &str) -> Result<String>;

    /// Subject lines of commits reachable from `to_ref` but not from `from_ref`
    ///
    /// # Arguments
    /// * `from_ref` - Starting point (exclusive - its history is not included)
    /// * `to_ref` - End point (inclusive)
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - One subject line per commit, oldest first
    /// * `Err` - If either ref cannot be resolved
    ///
    /// # Example
    /// ```rust
    /// # use sirem::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> sirem::Result<()> {
    /// let subjects = repo.commits_between("v1.0.0-rc.1", "v1.0.0-rc.2")?;
    /// println!("{} commits since rc.1", subjects.len());
    /// # Ok(())
    /// # }
    /// ```
    fn commits_between(&self, from_ref: &str, to_ref: &str) -> Result<Vec<String>>;
}
