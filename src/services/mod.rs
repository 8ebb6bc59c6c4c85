//! Service layer for business logic
//!
//! This module provides the request resolution logic independent of the
//! HTTP layer, so it can be exercised directly in tests.

mod ipinfo;
pub mod region_data;

pub use ipinfo::{IpInfo, IpInfoService, RequestSignals};
pub use region_data::{HttpRegionDataSource, RegionDataLoader, RegionDataSource, RegionDataset};
