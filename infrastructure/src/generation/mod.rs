//! Text generation adapters
//!
//! Provides [`TgiTextGenerator`], a client for text-generation-inference
//! compatible servers that implements the
//! [`TextGenerator`](narrative_application::TextGenerator) port.

mod tgi;

pub use tgi::TgiTextGenerator;
