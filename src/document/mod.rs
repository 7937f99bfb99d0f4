//! Document model and output sinks.
//!
//! Sinks consume exported objects in document order and are driven by
//! [`crate::export_selection`].

/// JSON sink.
pub mod json;
/// Output document types.
pub mod model;
/// Generic sink trait, in-memory sink and output file helpers.
pub mod sink;
/// Tagged markup sink.
pub mod xml;
