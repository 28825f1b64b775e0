// ==========================================
// Starward UIGF 元数据同步 - 配置层
// ==========================================
// 职责: 转换默认值、输出命名、元数据库默认路径、界面语言
// 存储: 可选 JSON 配置文件 + 环境变量覆写
// ==========================================

pub mod sync_config;

// 重导出核心配置
pub use sync_config::{config_keys, ConfigError, SyncConfig, DEFAULT_STORE_FILE};
