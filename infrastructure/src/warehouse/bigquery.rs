//! BigQuery streaming insert sink
//!
//! One `tabledata.insertAll` call per record. BigQuery answers HTTP 200 even
//! when rows are rejected, so `insertErrors` in the body is checked as well.

use crate::auth::AccessTokenSource;
use crate::config::FileWarehouseConfig;
use async_trait::async_trait;
use chrono::SecondsFormat;
use narrative_application::ports::feedback_sink::{FeedbackSink, SinkError};
use narrative_domain::FeedbackRecord;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertAllResponse {
    #[serde(default)]
    insert_errors: Vec<RowErrors>,
}

#[derive(Debug, Deserialize)]
struct RowErrors {
    #[serde(default)]
    errors: Vec<ErrorProto>,
}

#[derive(Debug, Deserialize)]
struct ErrorProto {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    message: String,
}

/// [`FeedbackSink`] appending to `{project}.{dataset}.{table}`
pub struct BigQueryFeedbackSink {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    dataset: String,
    table: String,
    tokens: Arc<AccessTokenSource>,
}

impl BigQueryFeedbackSink {
    pub fn from_config(
        config: &FileWarehouseConfig,
        client: reqwest::Client,
        tokens: Arc<AccessTokenSource>,
    ) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.trim().to_string(),
            dataset: config.dataset.trim().to_string(),
            table: config.table.trim().to_string(),
            tokens,
        }
    }

    pub fn table_id(&self) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset, self.table)
    }

    fn insert_url(&self) -> Result<Url, SinkError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| SinkError::RequestFailed(format!("Invalid endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SinkError::RequestFailed("Endpoint cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([
                "bigquery",
                "v2",
                "projects",
                self.project_id.as_str(),
                "datasets",
                self.dataset.as_str(),
                "tables",
                self.table.as_str(),
                "insertAll",
            ]);
        Ok(url)
    }
}

/// Table row for one record, matching the feedback table schema
fn row(record: &FeedbackRecord) -> Value {
    json!({
        "timestamp": record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        "user_claim": record.user_claim.content(),
        "predicted_category": record.predicted_category.code(),
        "correct_category": record.correct_category.code(),
    })
}

fn insert_body(record: &FeedbackRecord) -> Value {
    json!({ "rows": [{ "json": row(record) }] })
}

/// Collapse `insertErrors` into one message, or `None` when the row was accepted
fn rejection(response: &InsertAllResponse) -> Option<String> {
    let messages: Vec<String> = response
        .insert_errors
        .iter()
        .flat_map(|row| row.errors.iter())
        .map(|e| {
            if e.reason.is_empty() {
                e.message.clone()
            } else {
                format!("{}: {}", e.reason, e.message)
            }
        })
        .collect();

    if response.insert_errors.is_empty() {
        None
    } else if messages.is_empty() {
        Some("row rejected without details".to_string())
    } else {
        Some(messages.join("; "))
    }
}

#[async_trait]
impl FeedbackSink for BigQueryFeedbackSink {
    async fn append(&self, record: &FeedbackRecord) -> Result<(), SinkError> {
        let url = self.insert_url()?;
        debug!(table = %self.table_id(), "Inserting feedback row");

        let request = self
            .tokens
            .authorize(self.client.post(url).json(&insert_body(record)))
            .await
            .map_err(|e| SinkError::ConnectionError(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| SinkError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let parsed: InsertAllResponse = response
            .json()
            .await
            .map_err(|e| SinkError::RequestFailed(format!("Invalid insertAll response: {}", e)))?;

        match rejection(&parsed) {
            Some(reason) => Err(SinkError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

/// Sink used when no warehouse project is configured
pub struct DisabledFeedbackSink;

#[async_trait]
impl FeedbackSink for DisabledFeedbackSink {
    async fn append(&self, _record: &FeedbackRecord) -> Result<(), SinkError> {
        Err(SinkError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sink() -> BigQueryFeedbackSink {
        BigQueryFeedbackSink::from_config(
            &FileWarehouseConfig {
                project_id: "climate-project".to_string(),
                ..Default::default()
            },
            reqwest::Client::new(),
            Arc::new(AccessTokenSource::anonymous()),
        )
    }

    fn record() -> FeedbackRecord {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        FeedbackRecord::new(at, "  Glaciers are growing  ", 1, 2).unwrap()
    }

    #[test]
    fn test_insert_url() {
        assert_eq!(
            sink().insert_url().unwrap().as_str(),
            "https://bigquery.googleapis.com/bigquery/v2/projects/climate-project/\
             datasets/climate_narratives/tables/feedback/insertAll"
        );
        assert_eq!(sink().table_id(), "climate-project.climate_narratives.feedback");
    }

    #[test]
    fn test_insert_body() {
        assert_eq!(
            insert_body(&record()),
            json!({
                "rows": [{
                    "json": {
                        "timestamp": "2025-03-01T12:30:00.000000Z",
                        "user_claim": "Glaciers are growing",
                        "predicted_category": 1,
                        "correct_category": 2
                    }
                }]
            })
        );
    }

    #[test]
    fn test_accepted_response() {
        let response: InsertAllResponse =
            serde_json::from_str(r#"{"kind": "bigquery#tableDataInsertAllResponse"}"#).unwrap();
        assert!(rejection(&response).is_none());
    }

    #[test]
    fn test_rejected_response() {
        let response: InsertAllResponse = serde_json::from_str(
            r#"{
                "insertErrors": [{
                    "index": 0,
                    "errors": [{"reason": "invalid", "location": "user_claim", "message": "no such field"}]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(rejection(&response).unwrap(), "invalid: no such field");
    }

    #[test]
    fn test_rejected_without_details() {
        let response: InsertAllResponse =
            serde_json::from_str(r#"{"insertErrors": [{"index": 0}]}"#).unwrap();
        assert!(rejection(&response).is_some());
    }

    #[tokio::test]
    async fn test_disabled_sink_refuses() {
        let err = DisabledFeedbackSink.append(&record()).await.unwrap_err();
        assert!(matches!(err, SinkError::NotConfigured));
    }
}
