use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpInfoError {
    Unauthorized(String),
    RegionDataFetch(u16),
    RegionDataTransport(String),
    RegionDataParse(String),
    Config(String),
    Internal(String),
}

impl IpInfoError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpInfoError::Unauthorized(_) => "E001",
            IpInfoError::RegionDataFetch(_) => "E002",
            IpInfoError::RegionDataTransport(_) => "E003",
            IpInfoError::RegionDataParse(_) => "E004",
            IpInfoError::Config(_) => "E005",
            IpInfoError::Internal(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpInfoError::Unauthorized(_) => "Unauthorized",
            IpInfoError::RegionDataFetch(_) => "Region Data Fetch Error",
            IpInfoError::RegionDataTransport(_) => "Region Data Transport Error",
            IpInfoError::RegionDataParse(_) => "Region Data Parse Error",
            IpInfoError::Config(_) => "Configuration Error",
            IpInfoError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            IpInfoError::RegionDataFetch(status) => {
                format!("upstream responded with HTTP status {}", status)
            }
            IpInfoError::Unauthorized(msg)
            | IpInfoError::RegionDataTransport(msg)
            | IpInfoError::RegionDataParse(msg)
            | IpInfoError::Config(msg)
            | IpInfoError::Internal(msg) => msg.clone(),
        }
    }

    /// 是否属于参考数据集加载失败（可降级为原始值输出）
    pub fn is_region_data_error(&self) -> bool {
        matches!(
            self,
            IpInfoError::RegionDataFetch(_)
                | IpInfoError::RegionDataTransport(_)
                | IpInfoError::RegionDataParse(_)
        )
    }

    /// 格式化为彩色输出（用于启动阶段的终端提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于日志）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for IpInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpInfoError {}

// 便捷的构造函数
impl IpInfoError {
    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Unauthorized(msg.into())
    }

    pub fn region_data_fetch(status: u16) -> Self {
        IpInfoError::RegionDataFetch(status)
    }

    pub fn region_data_transport<T: Into<String>>(msg: T) -> Self {
        IpInfoError::RegionDataTransport(msg.into())
    }

    pub fn region_data_parse<T: Into<String>>(msg: T) -> Self {
        IpInfoError::RegionDataParse(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Config(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        IpInfoError::Internal(msg.into())
    }
}

impl From<serde_json::Error> for IpInfoError {
    fn from(err: serde_json::Error) -> Self {
        IpInfoError::RegionDataParse(err.to_string())
    }
}

impl From<ureq::Error> for IpInfoError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => IpInfoError::RegionDataFetch(status),
            other => IpInfoError::RegionDataTransport(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for IpInfoError {
    fn from(err: config::ConfigError) -> Self {
        IpInfoError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpInfoError>;
