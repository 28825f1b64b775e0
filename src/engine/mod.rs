// ==========================================
// Starward UIGF 元数据同步 - 引擎层
// ==========================================
// 职责: 元数据合并、补全会话、方言转换、流程编排
// 红线: 已有字段永不覆盖；转换全有或全无
// ==========================================

pub mod completion;
pub mod converter;
pub mod error;
pub mod merge;
pub mod orchestrator;

// 重导出核心引擎
pub use completion::{
    find_incomplete, resolve, AnswerProvider, ResolutionSummary, ResolveAction, ResolveSession,
    ScriptedAnswers, SessionState, SheetAnswers,
};
pub use converter::{convert, ConversionDefaults, DialectConverter};
pub use error::{EngineError, EngineResult};
pub use merge::{MergeEngine, MergeStats};
pub use orchestrator::{MetaSyncPipeline, ReconcileReport};
