// ==========================================
// Starward UIGF 元数据同步 - 核心库
// ==========================================
// 功能: 维护 item_id → 名称/类型/稀有度 元数据库，
//       并将 Snap Hutao 导出的 UIGF 文件转换为 Starward 可导入格式
// 红线: 已有元数据永不覆盖；转换全有或全无
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 元数据库与方言文档
pub mod domain;

// 导入层 - 外部文件
pub mod importer;

// 数据仓储层 - 文件读写
pub mod repository;

// 引擎层 - 合并/补全/转换
pub mod engine;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 应用层 - 控制台交互
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    HutaoUigf, ItemCategory, MetadataEntry, MetadataStore, PendingEntry, Rarity, StarwardUigf,
};

// 引擎
pub use engine::{
    convert, find_incomplete, resolve, AnswerProvider, DialectConverter, EngineError,
    MergeEngine, MetaSyncPipeline, ReconcileReport, ResolveAction, ResolveSession, SessionState,
};

// 配置
pub use config::SyncConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Starward UIGF 元数据同步";
