//! Adapter weight storage
//!
//! Provides [`GcsAdapterStore`], a Cloud Storage JSON API client that
//! implements the [`AdapterStore`](narrative_application::AdapterStore) port.

mod gcs;

pub use gcs::GcsAdapterStore;
