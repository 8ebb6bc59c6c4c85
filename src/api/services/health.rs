use std::sync::Arc;
use std::time::Instant;

use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{debug, trace};

use crate::services::RegionDataLoader;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegionDataStatus {
    pub loaded: bool,
    pub countries: Option<usize>,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: u64,
    pub region_data: RegionDataStatus,
    pub response_time_ms: u32,
}

/// Health Service
///
/// 只读取已缓存的数据集，从不触发下载。
/// 数据集未加载不算不健康：名称解析本来就会降级为原始值。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        loader: web::Data<Arc<RegionDataLoader>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let cached = loader.cached().await;
        let region_data = RegionDataStatus {
            loaded: cached.is_some(),
            countries: cached.map(|d| d.len()),
            source: loader.source_name(),
        };

        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

        let health = HealthResponse {
            status: "healthy",
            timestamp: now.to_rfc3339(),
            uptime,
            region_data,
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        debug!(
            "Health check completed in {:?}, region data loaded: {}",
            start_time.elapsed(),
            health.region_data.loaded
        );

        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(health)
    }

    // 简单的就绪检查，只返回 200 状态码
    pub async fn readiness_check() -> impl Responder {
        trace!("Received readiness check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "text/plain"))
            .body("OK")
    }

    // 活跃性检查
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
