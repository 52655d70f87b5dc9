//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify_claim;
pub mod prepare_adapter;
pub mod submit_feedback;
