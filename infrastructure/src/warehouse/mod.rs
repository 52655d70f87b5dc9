//! Feedback warehouse adapters
//!
//! - [`BigQueryFeedbackSink`]: streams records into a BigQuery table
//! - [`DisabledFeedbackSink`]: refuses every record when no table is configured

mod bigquery;

pub use bigquery::{BigQueryFeedbackSink, DisabledFeedbackSink};
