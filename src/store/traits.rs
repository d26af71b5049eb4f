//! Trait abstraction for the submission store to enable mocking in tests

use crate::state::{NewSubmission, StoredSubmission};
use anyhow::Result;
use async_trait::async_trait;

/// Persistence collaborator for feedback submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert one record into the submissions collection
    async fn insert(&self, record: &NewSubmission) -> Result<StoredSubmission>;

    /// Short description for the status bar
    fn describe(&self) -> String;
}
