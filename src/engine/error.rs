// ==========================================
// Starward UIGF 元数据同步 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 转换时遇到元数据缺失或分类/稀有度未补全的物品（整体失败，不输出部分结果）
    #[error("无法在元数据数据库中找到 item_id={item_id} 的完整条目，转换失败。请先补全元数据后重试。")]
    UnresolvedMetadata { item_id: String },

    /// 补全会话已结束后仍继续操作
    #[error("无效的状态转换: from={from} action={action}")]
    InvalidStateTransition { from: String, action: String },

    /// 答案来源（控制台/答题表等）失败
    #[error("答案读取失败: {0}")]
    AnswerProvider(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
