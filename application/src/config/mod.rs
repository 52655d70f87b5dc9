//! Application-level configuration.
//!
//! - [`ClassifierParams`]: generation budget for classification requests

pub mod classifier_params;

pub use classifier_params::ClassifierParams;
