use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::{IpInfoService, RegionDataLoader};

pub struct StartupContext {
    pub loader: Arc<RegionDataLoader>,
    pub ipinfo_service: Arc<IpInfoService>,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub ipinfo_path: String,
    pub health_prefix: String,
}

/// 准备服务器启动的上下文
/// 包括参考数据加载器、解析服务和路由配置
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    if config.api.key.is_empty() {
        warn!(
            "API key is not configured (api.key / API_KEY). \
             Every request will be rejected with 401."
        );
    }

    let loader = Arc::new(RegionDataLoader::from_config(&config.region_data));
    info!(
        "Region data source: {} ({})",
        loader.source_name(),
        config.region_data.url
    );

    // 预热缓存；失败不影响启动，首个请求会再次尝试
    if config.region_data.prefetch {
        match loader.get_dataset().await {
            Ok(dataset) => info!("Region data prefetched: {} countries", dataset.len()),
            Err(e) => warn!(
                "Region data prefetch failed: {}. Names will resolve lazily.",
                e
            ),
        }
    }

    let ipinfo_service = Arc::new(IpInfoService::new(loader.clone(), config.api.key.clone()));

    let route_config = RouteConfig {
        ipinfo_path: config.routes.ipinfo_path.clone(),
        health_prefix: config.routes.health_prefix.clone(),
    };

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        loader,
        ipinfo_service,
        route_config,
    })
}
