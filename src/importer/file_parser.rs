// ==========================================
// Starward UIGF 元数据同步 - JSON 文件解析器
// ==========================================
// 职责: 读取 UTF-8 JSON 文件为通用 Value（阶段 0）
// 约束: 文件一次性完整读取；语法错误统一为 FormatError
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub struct JsonFileParser;

impl JsonFileParser {
    /// 读取并解析 JSON 文件
    ///
    /// # 返回
    /// - Ok(Value): 解析结果
    /// - Err(FileNotFound): 文件不存在
    /// - Err(FormatError): 非法 JSON
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Value> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        // 兼容带 BOM 的 UTF-8 文件
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        serde_json::from_str(content).map_err(|e| ImportError::FormatError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 读取 JSON 文件并要求根节点为对象
    pub fn parse_object<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Map<String, Value>> {
        let path = file_path.as_ref();
        match self.parse(path)? {
            Value::Object(map) => Ok(map),
            other => Err(ImportError::FormatError {
                path: path.display().to_string(),
                message: format!("根节点应为对象，实际为 {}", json_type_name(&other)),
            }),
        }
    }
}

/// JSON 值类型的可读名称
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "布尔值",
        Value::Number(_) => "数字",
        Value::String(_) => "字符串",
        Value::Array(_) => "数组",
        Value::Object(_) => "对象",
    }
}
