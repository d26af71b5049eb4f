//! REST client for the hosted database
//!
//! Inserts go through the PostgREST endpoint the hosting provider exposes
//! for each table: `POST {base}/rest/v1/{table}` with the service key in both
//! the `apikey` and bearer headers.
//!
//! A 2xx status means the row is stored. The response body only supplies
//! the row id and timestamp, so a body we cannot read is logged and the
//! insert still counts as successful.

use super::traits::SubmissionStore;
use crate::state::{NewSubmission, StoredSubmission};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Client for the hosted submissions table
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestStore {
    /// Create a new store client
    pub fn new(base_url: &str, api_key: &str, table: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
        })
    }

    /// Full URL of the table endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl SubmissionStore for RestStore {
    async fn insert(&self, record: &NewSubmission) -> Result<StoredSubmission> {
        let response = self
            .client
            .post(self.endpoint())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach store: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Store rejected insert ({}): {}", status, body));
        }

        let row = match response.text().await {
            Ok(body) => inserted_row(&body),
            Err(e) => {
                tracing::warn!("Insert accepted but the response was unreadable: {}", e);
                InsertedRow::default()
            }
        };

        Ok(StoredSubmission {
            id: row.id,
            record: record.clone(),
            created_at: row.created_at,
        })
    }

    fn describe(&self) -> String {
        self.endpoint()
    }
}

/// The parts of the returned row the app shows back to the user
#[derive(Debug, Default, PartialEq, Deserialize)]
struct InsertedRow {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

/// First row of an insert response; anything unexpected yields an empty row
fn inserted_row(body: &str) -> InsertedRow {
    match serde_json::from_str::<Vec<InsertedRow>>(body) {
        Ok(rows) => rows.into_iter().next().unwrap_or_else(|| {
            tracing::warn!("Insert accepted but no row was returned");
            InsertedRow::default()
        }),
        Err(e) => {
            tracing::warn!("Insert accepted but the returned row did not parse: {}", e);
            InsertedRow::default()
        }
    }
}

/// Row ids are integers or uuids depending on how the table was created
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_timestamp))
}

/// RFC 3339, or a `timestamp` column without zone (read as UTC)
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
