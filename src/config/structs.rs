use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量、API 前缀
/// - database: 数据库连接与重试配置
/// - logging: 日志配置
/// - analytics: 聚合查询的默认窗口与数量限制
/// - cors: 跨域配置（仪表盘页面与 API 分开部署时使用）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：SD，分隔符：__
    /// 示例：SD__SERVER__PORT=9999
    pub fn load(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 SD，分隔符 __
            .add_source(
                Environment::with_prefix("SD")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(mut config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    if let Some(requested) = config.analytics.cap_window_days() {
                        eprintln!(
                            "[WARN] analytics.max_days = {} is too large, capped to {}",
                            requested,
                            AnalyticsConfig::MAX_WINDOW_DAYS
                        );
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> crate::errors::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| DashboardError::serialization(e.to_string()))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DashboardError::file_operation(format!("{}: {}", parent.display(), e))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| DashboardError::file_operation(format!("{}: {}", path.display(), e)))
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
    /// 所有 JSON 端点挂载的前缀
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// 超过该耗时的请求以 warn 记录
    #[serde(default = "default_slow_request_ms")]
    pub slow_request_ms: u64,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
    /// 启动时建表；库由上游写入方管理时关闭
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 聚合查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// `days` 参数缺省或无法解析时使用的窗口天数
    #[serde(default = "default_days")]
    pub default_days: u32,
    /// /posts/top 默认返回数量
    #[serde(default = "default_top_posts")]
    pub default_top_posts: usize,
    /// /analytics/top-accounts 默认返回数量
    #[serde(default = "default_top_accounts")]
    pub default_top_accounts: usize,
    /// limit 参数上限
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// days 参数上限
    #[serde(default = "default_max_days")]
    pub max_days: u32,
}

impl AnalyticsConfig {
    /// 时间序列按天补 0，窗口天数决定响应大小
    pub const MAX_WINDOW_DAYS: u32 = 36_500;

    /// 把 max_days / default_days 限制在 [`Self::MAX_WINDOW_DAYS`] 内；
    /// 发生截断时返回原来的 max_days
    pub fn cap_window_days(&mut self) -> Option<u32> {
        let requested = self.max_days;
        self.max_days = self.max_days.min(Self::MAX_WINDOW_DAYS);
        self.default_days = self.default_days.min(self.max_days);
        (requested != self.max_days).then_some(requested)
    }
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

// ============================================================
// Default value functions
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

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_slow_request_ms() -> u64 {
    2000
}

fn default_database_url() -> String {
    "surgedash.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_run_migrations() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_days() -> u32 {
    30
}

fn default_top_posts() -> usize {
    20
}

fn default_top_accounts() -> usize {
    10
}

fn default_max_limit() -> usize {
    500
}

fn default_max_days() -> u32 {
    3650
}

fn default_cors_max_age() -> usize {
    3600
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            api_prefix: default_api_prefix(),
            slow_request_ms: default_slow_request_ms(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            run_migrations: default_run_migrations(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_days: default_days(),
            default_top_posts: default_top_posts(),
            default_top_accounts: default_top_accounts(),
            max_limit: default_max_limit(),
            max_days: default_max_days(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}
