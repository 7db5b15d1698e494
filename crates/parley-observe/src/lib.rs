//! Observability setup for Parley.

pub mod tracing_setup;
