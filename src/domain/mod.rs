// ==========================================
// Starward UIGF 元数据同步 - 领域模型层
// ==========================================
// 职责: 定义元数据库、导出方言文档与候选类型
// 红线: 不含文件访问逻辑,不含合并/转换逻辑
// ==========================================

pub mod meta;
pub mod types;
pub mod uigf;

// 重导出核心类型
pub use meta::{has_value, MetadataEntry, MetadataStore, PendingEntry};
pub use types::{ItemCategory, Rarity};
pub use uigf::{
    ExtraFields, HutaoRecord, HutaoUigf, HutaoUserBundle, StarwardRecord, StarwardUigf,
    StarwardUserBundle, UigfDocument, GENSHIN_TITLE,
};
