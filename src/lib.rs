//! ipinfo - geolocation echo service
//!
//! Resolves a caller's approximate location (IP, city, country, region) from
//! headers injected by an upstream proxy, enriches the raw country / region
//! codes into display names using the country-region-data reference dataset,
//! and returns the result as JSON behind a shared-secret API key.
//!
//! # Architecture
//! - `services`: request resolution and the reference dataset loader
//! - `api`: HTTP handlers, routes and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging
//! - `utils`: Header and client IP helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
