use serde::{Deserialize, Serialize};

/// 参考数据集默认地址（country-region-data 固定版本）
pub const DEFAULT_REGION_DATA_URL: &str = "https://unpkg.com/country-region-data@3.1.0/data.json";

/// 环境变量前缀，例如 IPINFO__SERVER__PORT=9999
pub const ENV_PREFIX: &str = "IPINFO";

/// 兼容旧部署的 API Key 环境变量
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - api: 共享密钥
/// - routes: 路由路径
/// - region_data: 参考数据集来源
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub region_data: RegionDataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值
    /// ENV 前缀：IPINFO，分隔符：__
    /// `api.key` 为空时回退读取 `API_KEY`
    pub fn load(path: &str) -> Self {
        let mut config = match Self::try_load(path) {
            Ok(config) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("{}", e.format_colored());
                Self::default()
            }
        };

        if config.api.key.is_empty()
            && let Ok(key) = std::env::var(LEGACY_API_KEY_ENV)
        {
            config.api.key = key;
        }

        config
    }

    fn try_load(path: &str) -> crate::errors::Result<Self> {
        use config::{Config, Environment, File};

        // 不开启 try_parsing：环境变量保持字符串，数值字段在反序列化时再转换，
        // 否则 IPINFO__API__KEY=007 会被解析成整数 7
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// API 鉴权配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// 查询参数 `key` 必须与此值完全一致；为空时所有请求均返回 401
    #[serde(default)]
    pub key: String,
}

/// 路由配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_ipinfo_path")]
    pub ipinfo_path: String,
    #[serde(default = "default_health_prefix")]
    pub health_prefix: String,
}

/// 参考数据集配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionDataConfig {
    #[serde(default = "default_region_data_url")]
    pub url: String,
    /// 单次下载超时（秒）
    #[serde(default = "default_region_data_timeout")]
    pub timeout_secs: u64,
    /// 启动时预热缓存，失败只记录警告
    #[serde(default = "default_prefetch")]
    pub prefetch: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_ipinfo_path() -> String {
    "/".to_string()
}

fn default_health_prefix() -> String {
    "/health".to_string()
}

fn default_region_data_url() -> String {
    DEFAULT_REGION_DATA_URL.to_string()
}

fn default_region_data_timeout() -> u64 {
    10
}

fn default_prefetch() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            ipinfo_path: default_ipinfo_path(),
            health_prefix: default_health_prefix(),
        }
    }
}

impl Default for RegionDataConfig {
    fn default() -> Self {
        Self {
            url: default_region_data_url(),
            timeout_secs: default_region_data_timeout(),
            prefetch: default_prefetch(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
