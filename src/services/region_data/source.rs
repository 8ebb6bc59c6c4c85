//! 参考数据集来源
//!
//! 默认实现通过 HTTP 下载 country-region-data 的 JSON 文档。
//! 抽象为 trait 便于测试时替换为内存数据源。

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use ureq::Agent;

use super::model::RegionDataset;
use crate::errors::{IpInfoError, Result};

/// 数据集来源 trait
#[async_trait]
pub trait RegionDataSource: Send + Sync {
    /// 获取完整数据集（每次调用都会真正访问来源，缓存由 loader 负责）
    async fn fetch(&self) -> Result<RegionDataset>;

    /// 获取来源名称（用于日志）
    fn name(&self) -> &'static str;
}

/// HTTP 数据源
pub struct HttpRegionDataSource {
    url: String,
    agent: Agent,
}

impl HttpRegionDataSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        // 非 2xx 状态码自行处理，以便携带状态码返回
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            url: url.to_string(),
            agent,
        }
    }

    /// 同步下载并解析（在 spawn_blocking 中调用）
    fn fetch_sync(agent: &Agent, url: &str) -> Result<RegionDataset> {
        let mut resp = agent.get(url).call()?;

        let status = resp.status();
        if !status.is_success() {
            warn!(
                "Region data request to \"{}\" failed with status {}",
                url,
                status.as_u16()
            );
            return Err(IpInfoError::region_data_fetch(status.as_u16()));
        }

        let body = resp.body_mut().read_to_string()?;
        let dataset = RegionDataset::from_json(&body).inspect_err(|e| {
            warn!("Region data response from \"{}\" parse failed: {}", url, e);
        })?;

        debug!("Region data parsed: {} countries", dataset.len());
        Ok(dataset)
    }
}

#[async_trait]
impl RegionDataSource for HttpRegionDataSource {
    async fn fetch(&self) -> Result<RegionDataset> {
        info!("Fetching region data from {}", self.url);

        let agent = self.agent.clone();
        let url = self.url.clone();

        // ureq 是同步客户端，放到阻塞线程池执行
        tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url))
            .await
            .map_err(|e| {
                IpInfoError::region_data_transport(format!("fetch task failed: {}", e))
            })?
    }

    fn name(&self) -> &'static str {
        "HTTP"
    }
}
