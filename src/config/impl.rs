use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::StaticConfig;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 配置来自哪里：`config show` 与启动日志使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: String,
    /// false 表示文件不存在，只用了默认值与环境变量
    pub file_found: bool,
}

struct LoadedConfig {
    config: Arc<StaticConfig>,
    source: ConfigSource,
}

static CONFIG: OnceLock<LoadedConfig> = OnceLock::new();

fn loaded() -> &'static LoadedConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}

/// 全局配置；启动后只读
pub fn get_config() -> Arc<StaticConfig> {
    loaded().config.clone()
}

pub fn config_source() -> ConfigSource {
    loaded().source.clone()
}

/// 从 `config.toml` 初始化
///
/// # Examples
/// ```no_run
/// use surgedash::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    init_config_from(DEFAULT_CONFIG_PATH);
}

/// 从指定路径初始化，只有第一次调用生效
pub fn init_config_from(path: &str) {
    CONFIG.get_or_init(|| LoadedConfig {
        config: Arc::new(StaticConfig::load(path)),
        source: ConfigSource {
            path: path.to_string(),
            file_found: Path::new(path).exists(),
        },
    });
}
