//! Persistence collaborators for feedback submissions

mod client;
mod memory;
mod traits;

pub use client::RestStore;
pub use memory::MemoryStore;
pub use traits::SubmissionStore;

#[cfg(test)]
pub use traits::MockSubmissionStore;

use crate::config::FeedbackConfig;
use anyhow::Result;
use std::sync::Arc;

/// Pick the store the configuration asks for: REST when credentials are
/// present, in-process memory otherwise
pub fn from_config(config: &FeedbackConfig) -> Result<Arc<dyn SubmissionStore>> {
    match config.store_credentials() {
        Some((url, key)) => {
            let store = RestStore::new(url, key, config.table(), config.request_timeout())?;
            tracing::info!("Using REST store at {}", store.describe());
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("No store credentials configured, running in offline mode");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
