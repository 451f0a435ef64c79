//! System-level modules
//!
//! - Logging initialization (tracing subscriber setup)

pub mod logging;

pub use logging::init_logging;
