pub mod health;
pub mod ipinfo;

pub use health::{AppStartTime, HealthService, health_routes};
pub use ipinfo::{IpInfoHandler, ipinfo_routes};
