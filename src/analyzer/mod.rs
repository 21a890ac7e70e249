//! Reconciliation of release candidate tags against their release tag

pub mod reconciler;

pub use reconciler::{ReleaseReconciler, ReleaseStatus};
