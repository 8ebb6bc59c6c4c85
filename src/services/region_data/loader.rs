//! 参考数据集加载器
//!
//! 进程级单例缓存，三种状态：
//! - 空：首次调用发起下载
//! - 下载中：并发调用合并到同一次下载（Singleflight），共享成功或失败结果
//! - 已就绪：永久返回缓存，不再访问网络（无 TTL）
//!
//! 下载失败不写缓存，下一次调用会重新发起下载。

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{error, info, trace, warn};

use super::model::RegionDataset;
use super::source::{HttpRegionDataSource, RegionDataSource};
use crate::config::RegionDataConfig;
use crate::errors::{IpInfoError, Result};

/// 缓存中唯一的 key
const DATASET_KEY: () = ();

pub struct RegionDataLoader {
    source: Arc<dyn RegionDataSource>,
    cache: Cache<(), Arc<RegionDataset>>,
}

impl RegionDataLoader {
    pub fn new(source: Arc<dyn RegionDataSource>) -> Self {
        let cache = Cache::builder().name("region_data").build();
        Self { source, cache }
    }

    /// 根据配置创建 HTTP 数据源的加载器
    pub fn from_config(config: &RegionDataConfig) -> Self {
        let source =
            HttpRegionDataSource::new(&config.url, Duration::from_secs(config.timeout_secs));
        Self::new(Arc::new(source))
    }

    /// 获取数据集
    ///
    /// - 缓存命中：直接返回，无 I/O
    /// - 缓存未命中：发起下载；并发调用只会有一次下载，其余等待同一结果
    /// - 下载失败：错误返回给所有等待者，不缓存
    pub async fn get_dataset(&self) -> Result<Arc<RegionDataset>> {
        // try_get_with 自带 singleflight 语义，且 Err 不会写入缓存
        self.cache
            .try_get_with(DATASET_KEY, async {
                trace!(
                    "Region data cache miss, fetching via {} source",
                    self.source.name()
                );
                let dataset = self.source.fetch().await?;
                if dataset.is_empty() {
                    warn!("Region data loaded but contains no countries, names will not resolve");
                } else {
                    info!("Region data loaded: {} countries", dataset.len());
                }
                Ok::<_, IpInfoError>(Arc::new(dataset))
            })
            .await
            .map_err(|e| {
                error!("Region data load failed: {}", e);
                (*e).clone()
            })
    }

    /// 返回已缓存的数据集，不触发下载
    pub async fn cached(&self) -> Option<Arc<RegionDataset>> {
        self.cache.get(&DATASET_KEY).await
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}
