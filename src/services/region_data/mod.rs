//! 国家 / 地区参考数据
//!
//! - model: 数据集结构
//! - source: 数据来源（HTTP）
//! - loader: 进程级缓存 + 并发合并
//! - resolve: 代码 → 显示名称

mod loader;
mod model;
mod resolve;
mod source;

pub use loader::RegionDataLoader;
pub use model::{CountryEntry, RegionDataset, RegionEntry};
pub use resolve::{
    ResolvedNames, UNKNOWN, is_unknown_country, normalize_region_code, resolve_names,
};
pub use source::{HttpRegionDataSource, RegionDataSource};
