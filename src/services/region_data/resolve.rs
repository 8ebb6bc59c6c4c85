//! 国家 / 地区名称解析
//!
//! 将原始国家代码（"US"）和地区代码（"US-CA"）映射为显示名称。
//! 无法识别时原样返回，从不报错。

use super::model::{CountryEntry, RegionDataset, eq_ignore_case};

/// 请求头缺失时的占位值
pub const UNKNOWN: &str = "Unknown";

/// 解析结果（显示名称）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    pub country_name: String,
    pub region_name: String,
}

impl ResolvedNames {
    /// 原样透传原始值
    pub fn passthrough(country_code: &str, region_raw: &str) -> Self {
        Self {
            country_name: country_code.to_string(),
            region_name: region_raw.to_string(),
        }
    }
}

/// 国家代码是否为占位值（国家代码已转大写，因此忽略大小写比较）
pub fn is_unknown_country(country_code: &str) -> bool {
    country_code.is_empty() || country_code.eq_ignore_ascii_case(UNKNOWN)
}

/// 规范化地区代码：含连字符时取第一个连字符之后的那一段
///
/// "US-CA" → "CA"，"CA" → "CA"，"A-B-C" → "B"，"US-" → ""
pub fn normalize_region_code(region_raw: &str) -> &str {
    region_raw.split('-').nth(1).unwrap_or(region_raw)
}

/// 解析国家和地区名称
pub fn resolve_names(dataset: &RegionDataset, country_code: &str, region_raw: &str) -> ResolvedNames {
    if is_unknown_country(country_code) {
        return ResolvedNames::passthrough(country_code, region_raw);
    }

    let Some(country) = dataset.find_country(country_code) else {
        return ResolvedNames::passthrough(country_code, region_raw);
    };

    let country_name = if country.country_name.is_empty() {
        country_code.to_string()
    } else {
        country.country_name.clone()
    };

    ResolvedNames {
        country_name,
        region_name: resolve_region_name(country, region_raw),
    }
}

/// 在已匹配的国家中解析地区名称
///
/// 1. 规范化后为空或 "Unknown" → 原始值
/// 2. 代码或名称直接匹配
/// 3. 代码最后一段匹配（"BC" 匹配 "CA-BC"）
/// 4. 都不匹配 → 规范化后的代码
fn resolve_region_name(country: &CountryEntry, region_raw: &str) -> String {
    let code = normalize_region_code(region_raw);
    if code.is_empty() || code == UNKNOWN {
        return region_raw.to_string();
    }

    country
        .find_region(code)
        .or_else(|| country.find_region_by_suffix(code))
        .map(|region| region.name.clone())
        .unwrap_or_else(|| code.to_string())
}
