//! IP 信息解析服务
//!
//! 流程：API Key 校验 → 请求头提取 → 参考数据集 → 名称解析
//!
//! 名称解析是尽力而为的：数据集不可用时降级为原始代码，不影响响应。

use std::sync::Arc;

use actix_web::http::header::HeaderMap;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, trace, warn};

use crate::errors::{IpInfoError, Result};
use crate::services::region_data::{
    RegionDataLoader, ResolvedNames, UNKNOWN, is_unknown_country, resolve_names,
};
use crate::utils::headers::{CITY_HEADERS, COUNTRY_HEADERS, REGION_HEADERS, first_header};
use crate::utils::ip::pick_remote_ip;

/// 响应体，所有字段始终有值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInfo {
    pub ip: String,
    pub city: String,
    /// 原始国家代码（大写）
    pub country_code: String,
    pub country_name: String,
    /// 原始地区代码（保留大小写，不做规范化）
    pub region_code: String,
    pub region: String,
}

/// 从请求头提取的原始信号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignals {
    pub ip: String,
    pub city: String,
    pub country_code: String,
    pub region_raw: String,
}

impl RequestSignals {
    pub fn from_headers(headers: &HeaderMap, peer_addr: Option<&str>) -> Self {
        let ip = pick_remote_ip(headers, peer_addr);
        let city = first_header(headers, CITY_HEADERS).unwrap_or(UNKNOWN).to_string();
        let country_code = first_header(headers, COUNTRY_HEADERS)
            .map(str::to_uppercase)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let region_raw = first_header(headers, REGION_HEADERS)
            .unwrap_or(UNKNOWN)
            .to_string();

        Self {
            ip,
            city,
            country_code,
            region_raw,
        }
    }
}

pub struct IpInfoService {
    loader: Arc<RegionDataLoader>,
    api_key: String,
}

impl IpInfoService {
    pub fn new(loader: Arc<RegionDataLoader>, api_key: impl Into<String>) -> Self {
        Self {
            loader,
            api_key: api_key.into(),
        }
    }

    /// 校验查询参数中的 API Key
    ///
    /// 缺失、为空、或与配置不一致均返回 Unauthorized。
    /// 未配置密钥时拒绝所有请求。
    pub fn authorize(&self, key: Option<&str>) -> Result<()> {
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return Err(IpInfoError::unauthorized("missing API key"));
        };

        if self.api_key.is_empty() {
            return Err(IpInfoError::unauthorized("API key is not configured"));
        }

        // 常量时间比较，防止时序攻击
        if bool::from(key.as_bytes().ct_eq(self.api_key.as_bytes())) {
            Ok(())
        } else {
            Err(IpInfoError::unauthorized("invalid API key"))
        }
    }

    /// 解析请求
    ///
    /// 参考数据集下载、传输、解析失败都降级为原始值；
    /// 鉴权失败和其他内部错误返回给调用方。
    pub async fn resolve(
        &self,
        headers: &HeaderMap,
        peer_addr: Option<&str>,
        key: Option<&str>,
    ) -> Result<IpInfo> {
        self.authorize(key)?;

        let signals = RequestSignals::from_headers(headers, peer_addr);
        trace!("Extracted request signals: {:?}", signals);

        let names = match self.enrich(&signals).await {
            Ok(names) => names,
            Err(e) if e.is_region_data_error() => {
                warn!("Region data unavailable, returning raw codes: {}", e);
                ResolvedNames::passthrough(&signals.country_code, &signals.region_raw)
            }
            Err(e) => return Err(e),
        };

        debug!(
            "Resolved {}: country={} ({}), region={} ({})",
            signals.ip, signals.country_code, names.country_name, signals.region_raw, names.region_name
        );

        Ok(IpInfo {
            ip: signals.ip,
            city: signals.city,
            country_code: signals.country_code,
            country_name: names.country_name,
            region_code: signals.region_raw,
            region: names.region_name,
        })
    }

    /// 名称解析，数据集加载失败时返回 Err 由调用方降级
    pub async fn enrich(&self, signals: &RequestSignals) -> Result<ResolvedNames> {
        // 国家未知时不需要数据集
        if is_unknown_country(&signals.country_code) {
            return Ok(ResolvedNames::passthrough(
                &signals.country_code,
                &signals.region_raw,
            ));
        }

        let dataset = self.loader.get_dataset().await?;
        Ok(resolve_names(
            &dataset,
            &signals.country_code,
            &signals.region_raw,
        ))
    }

    pub fn loader(&self) -> &Arc<RegionDataLoader> {
        &self.loader
    }
}
