//! HTTP layer: handlers, route builders and middleware

pub mod middleware;
pub mod services;
