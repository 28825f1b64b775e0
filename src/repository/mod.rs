// ==========================================
// Starward UIGF 元数据同步 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 元数据库文件读写、Starward 导出文件写出
// 约束: 同步文件 I/O，打开-完整读写-关闭
// ==========================================

pub mod error;
pub mod meta_store_repo;
pub mod uigf_export_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use meta_store_repo::MetaStoreRepository;
pub use uigf_export_repo::UigfExportRepository;
