use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, trace, warn};

use crate::errors::IpInfoError;
use crate::services::IpInfoService;
use crate::utils::ip::peer_ip;

/// 兼容 serverless 部署时的路径
pub const LEGACY_IPINFO_PATH: &str = "/api/ipinfo";

#[derive(Debug, Deserialize)]
pub struct IpInfoQuery {
    pub key: Option<String>,
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

pub struct IpInfoHandler;

impl IpInfoHandler {
    pub async fn handle(
        req: HttpRequest,
        service: web::Data<Arc<IpInfoService>>,
    ) -> impl Responder {
        // 查询串格式错误时视为未提供 key，统一走 401
        let key = web::Query::<IpInfoQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().key);
        let peer = peer_ip(&req);

        match service.resolve(req.headers(), peer.as_deref(), key.as_deref()).await {
            Ok(info) => {
                trace!("IP info resolved for {}", info.ip);
                HttpResponse::Ok()
                    .insert_header(("Cache-Control", "no-store"))
                    .json(info)
            }
            Err(IpInfoError::Unauthorized(reason)) => {
                warn!("Rejected IP info request: {}", reason);
                Self::unauthorized_response()
            }
            Err(e) => {
                error!("IP info handler unexpected error: {}", e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn unauthorized_response() -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorBody {
            error: "Invalid or missing API key",
        })
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(ErrorBody {
            error: "Internal Server Error",
        })
    }
}

/// IP 信息路由配置
///
/// `path` 为配置的主路径，同时挂载兼容路径 `/api/ipinfo`
pub fn ipinfo_routes(path: &str) -> actix_web::Scope {
    let scope = web::scope("")
        .route(path, web::get().to(IpInfoHandler::handle))
        .route(path, web::head().to(IpInfoHandler::handle));

    if path == LEGACY_IPINFO_PATH {
        return scope;
    }

    scope
        .route(LEGACY_IPINFO_PATH, web::get().to(IpInfoHandler::handle))
        .route(LEGACY_IPINFO_PATH, web::head().to(IpInfoHandler::handle))
}
