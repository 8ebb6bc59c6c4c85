//! country-region-data 数据结构
//!
//! 上游文档格式：
//! `[{"countryName": "...", "countryShortCode": "US", "regions": [{"name": "...", "shortCode": "CA"}]}]`

use serde::{Deserialize, Serialize};

/// 比较两个字符串是否相等（忽略大小写，支持非 ASCII 字符）
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_uppercase() == b.to_uppercase()
}

/// 地区条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionEntry {
    /// 地区代码，可能本身带连字符（如 "CA-BC"）
    #[serde(default)]
    pub short_code: String,
    #[serde(default)]
    pub name: String,
}

impl RegionEntry {
    /// 代码最后一段，例如 "CA-BC" → "BC"
    pub fn code_suffix(&self) -> &str {
        self.short_code.rsplit('-').next().unwrap_or(&self.short_code)
    }
}

/// 国家条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    /// ISO 3166-1 alpha-2 国家代码
    #[serde(default)]
    pub country_short_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

impl CountryEntry {
    /// 按代码或名称查找地区（忽略大小写，先匹配者优先）
    pub fn find_region(&self, code: &str) -> Option<&RegionEntry> {
        self.regions
            .iter()
            .find(|r| eq_ignore_case(&r.short_code, code) || eq_ignore_case(&r.name, code))
    }

    /// 按代码最后一段查找地区，处理 "CA-BC" 这类复合代码
    pub fn find_region_by_suffix(&self, code: &str) -> Option<&RegionEntry> {
        self.regions
            .iter()
            .find(|r| eq_ignore_case(r.code_suffix(), code))
    }
}

/// 完整的参考数据集（加载后只读）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionDataset {
    countries: Vec<CountryEntry>,
}

impl RegionDataset {
    pub fn new(countries: Vec<CountryEntry>) -> Self {
        Self { countries }
    }

    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// 按国家代码查找（忽略大小写，先匹配者优先）
    pub fn find_country(&self, code: &str) -> Option<&CountryEntry> {
        self.countries
            .iter()
            .find(|c| eq_ignore_case(&c.country_short_code, code))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
