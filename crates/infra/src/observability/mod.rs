//! Observability infrastructure for structured logging
//!
//! Every crate logs through `tracing`; this module installs the global
//! subscriber once per process. Cache hit rates are reported through
//! `AppCaches::log_stats`, so there is no separate metrics pipeline.

pub mod logging;

pub use logging::{build_filter, init_logging};
