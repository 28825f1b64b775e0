// ==========================================
// Starward UIGF 元数据同步 - 应用层
// ==========================================
// 职责: 控制台交互，连接操作员与补全会话
// ==========================================

pub mod console;

// 重导出
pub use console::ConsoleAnswerProvider;
