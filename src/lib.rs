//! TrustPage - view tracking, rate limiting and quota gating
//!
//! This library provides the tracking core behind TrustPage pages:
//! counting page views with per-visitor rate limiting and dedupe,
//! recording visit analytics, and gating over-quota pages.
//!
//! # Architecture
//! - `client`: browser-side model (fingerprint, session store, visit recorder)
//! - `services`: tracking, quota and billing business logic
//! - `storage`: SeaORM backend and data access
//! - `api`: HTTP services
//! - `config`: configuration management
//! - `system`: logging and platform utilities

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
