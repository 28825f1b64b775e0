// ==========================================
// Starward UIGF 元数据同步 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 文件错误 =====
    #[error("文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("文件写入失败 ({path}): {message}")]
    FileWriteError { path: String, message: String },

    // ===== 格式错误 =====
    /// 元数据库文件损坏或结构不符（含上次写入中断留下的残缺文件）
    #[error("元数据库格式错误 ({path}): {message}")]
    FormatError { path: String, message: String },

    #[error("序列化失败: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
