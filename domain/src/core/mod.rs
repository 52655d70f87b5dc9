//! Core domain concepts shared across all subdomains.
//!
//! - [`claim::Claim`]: a validated, trimmed user claim
//! - [`model::ModelIdentity`]: the base model and adapter answering requests
//! - [`error::DomainError`]: domain-level errors

pub mod claim;
pub mod error;
pub mod model;
