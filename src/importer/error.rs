// ==========================================
// Starward UIGF 元数据同步 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 所有错误对当前操作是终止性的，不自动重试
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 格式错误 =====
    /// JSON 语法错误或根结构不符合预期
    #[error("文件格式错误 ({path}): {message}")]
    FormatError { path: String, message: String },

    // ===== 方言校验错误 =====
    /// 方言文档缺少必填字段或必填字段类型错误
    #[error("{dialect} UIGF 验证失败 ({path}): {message}")]
    ValidationError {
        dialect: &'static str,
        path: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // ===== 答题表错误 =====
    #[error("答题表解析失败 (行 {row}): {message}")]
    AnswerSheetError { row: usize, message: String },

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
