//! 代理注入的请求头
//!
//! 每个信号对应一组候选请求头，按顺序取第一个存在且非空的值。

use actix_web::http::header::HeaderMap;

/// 转发 IP
pub const FORWARDED_FOR_HEADERS: &[&str] = &["x-forwarded-for", "x-vercel-forwarded-for"];

/// 城市
pub const CITY_HEADERS: &[&str] = &["x-vercel-ip-city", "x-city"];

/// 国家代码
pub const COUNTRY_HEADERS: &[&str] = &["x-vercel-ip-country", "x-country"];

/// 地区代码
pub const REGION_HEADERS: &[&str] = &["x-vercel-ip-country-region", "x-region"];

/// 按候选顺序读取请求头
///
/// 非 UTF-8 或空值视为不存在。
pub fn first_header<'a>(headers: &'a HeaderMap, candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|h| h.to_str().ok())
            .filter(|s| !s.is_empty())
    })
}
