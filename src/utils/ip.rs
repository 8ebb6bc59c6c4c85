//! 客户端 IP 提取
//!
//! 信任上游代理：优先使用转发头中的第一个地址（原始客户端），
//! 其次使用连接对端地址，都没有时返回 "Unknown"。

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

use super::headers::{FORWARDED_FOR_HEADERS, first_header};
use crate::services::region_data::UNKNOWN;

/// 从转发头提取原始客户端 IP（逗号分隔列表中的第一个，去除空白）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    first_header(headers, FORWARDED_FOR_HEADERS)
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// 选择客户端 IP：转发头 → 对端地址 → "Unknown"
pub fn pick_remote_ip(headers: &HeaderMap, peer_addr: Option<&str>) -> String {
    extract_forwarded_ip_from_headers(headers)
        .or_else(|| {
            peer_addr
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// 从 HttpRequest 取连接对端 IP（不含端口）
pub fn peer_ip(req: &HttpRequest) -> Option<String> {
    req.peer_addr().map(|addr| addr.ip().to_string())
}
