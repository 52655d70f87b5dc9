//! Cloud credentials for Storage and BigQuery requests.

mod token;

pub use token::{AccessTokenSource, TokenError, cloud_http_client};
