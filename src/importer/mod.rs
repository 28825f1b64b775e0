// ==========================================
// Starward UIGF 元数据同步 - 导入层
// ==========================================
// 职责: 读取外部输入（名称映射表、两种方言导出文件、CSV 答题表）
// 支持: JSON, CSV
// ==========================================

// 模块声明
pub mod answer_sheet;
pub mod dialect_reader;
pub mod error;
pub mod file_parser;
pub mod mapping_importer;

// 重导出核心类型
pub use answer_sheet::{AnswerSheet, SheetAnswer};
pub use dialect_reader::DialectReader;
pub use error::{ImportError, ImportResult};
pub use file_parser::JsonFileParser;
pub use mapping_importer::{MappingIds, MappingImporter, NameMapping};
