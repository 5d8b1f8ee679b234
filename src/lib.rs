#![deny(missing_docs)]

//! Core library for the Vaartha fake-news analysis service.

/// Request-level analysis pipeline.
pub mod analysis;
/// HTTP routing and REST handlers.
pub mod api;
/// Pretrained text-classifier clients.
pub mod classifier;
/// Environment-driven configuration management.
pub mod config;
/// Fact-check search client and source extraction.
pub mod factcheck;
/// Structured logging and tracing setup.
pub mod logging;
/// Analysis counters.
pub mod metrics;
/// Listener binding and serving.
pub mod server;
