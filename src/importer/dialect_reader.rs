// ==========================================
// Starward UIGF 元数据同步 - 方言读取器
// ==========================================
// 职责: 读取两种导出方言并校验
// 流程: 解析 JSON → 反序列化（未声明字段进透传字典）→ 必填字段校验
// ==========================================

use crate::domain::uigf::{HutaoUigf, StarwardUigf, UigfDocument};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::JsonFileParser;
use std::path::Path;
use tracing::{info, instrument, warn};

pub struct DialectReader;

impl DialectReader {
    /// 读取 Starward 导出文件
    pub fn read_starward<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<StarwardUigf> {
        self.read_document(file_path.as_ref())
    }

    /// 读取 Snap Hutao 导出文件
    pub fn read_hutao<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<HutaoUigf> {
        self.read_document(file_path.as_ref())
    }

    /// 读取任意方言文档
    ///
    /// # 返回
    /// - Err(FormatError): 非法 JSON
    /// - Err(ValidationError): 缺少必填字段、必填字段类型错误、uid 为空
    #[instrument(skip(self), fields(dialect = T::DIALECT))]
    pub fn read_document<T: UigfDocument>(&self, path: &Path) -> ImportResult<T> {
        let value = JsonFileParser.parse(path)?;

        let document: T = serde_json::from_value(value).map_err(|e| {
            warn!(error = %e, "方言校验失败");
            ImportError::ValidationError {
                dialect: T::DIALECT,
                path: path.display().to_string(),
                message: e.to_string(),
                source: Some(e),
            }
        })?;

        validate_user_ids::<T>(path, &document)?;

        info!(
            users = document.user_ids().len(),
            records = document.record_count(),
            "方言文档读取完成"
        );
        Ok(document)
    }
}

/// 每个用户容器必须带非空 uid
fn validate_user_ids<T: UigfDocument>(path: &Path, document: &T) -> ImportResult<()> {
    for (idx, uid) in document.user_ids().into_iter().enumerate() {
        if uid.trim().is_empty() {
            return Err(ImportError::ValidationError {
                dialect: T::DIALECT,
                path: path.display().to_string(),
                message: format!("hk4e[{}].uid 为空", idx),
                source: None,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_read_starward_valid() {
        let file = write_json(
            r#"{
                "info": {"export_app": "Starward", "version": "v4.0"},
                "hk4e": [{
                    "uid": "100000001",
                    "timezone": 8,
                    "lang": "zh-cn",
                    "list": [
                        {"uigf_gacha_type": "301", "gacha_type": "301", "item_id": "10000002",
                         "name": "神里绫华", "item_type": "角色", "rank_type": "5",
                         "time": "2024-01-01 00:00:00", "id": "1700000000000000001", "pity": 80}
                    ]
                }]
            }"#,
        );

        let doc = DialectReader.read_starward(file.path()).unwrap();

        assert_eq!(doc.hk4e.len(), 1);
        assert_eq!(doc.hk4e[0].timezone, Some(8));
        let record = &doc.hk4e[0].list[0];
        assert_eq!(record.name.as_deref(), Some("神里绫华"));
        assert!(record.unknown_fields.contains_key("pity"));
        assert!(doc.hkrpg.is_none());
    }

    #[test]
    fn test_read_hutao_absent_list_defaults_empty() {
        let file = write_json(r#"{"info": {}, "hk4e": [{"uid": "1"}]}"#);

        let doc = DialectReader.read_hutao(file.path()).unwrap();
        assert!(doc.hk4e[0].list.is_empty());
    }

    #[test]
    fn test_missing_info_is_validation_error() {
        let file = write_json(r#"{"hk4e": []}"#);

        let err = DialectReader.read_hutao(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::ValidationError { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_wrong_field_type_is_validation_error() {
        let file = write_json(r#"{"info": {}, "hk4e": [{"uid": "1", "list": [{"item_id": 10}]}]}"#);

        let result = DialectReader.read_hutao(file.path());
        assert!(matches!(result, Err(ImportError::ValidationError { .. })));
    }

    #[test]
    fn test_empty_uid_is_validation_error() {
        let file = write_json(r#"{"info": {}, "hk4e": [{"uid": "", "list": []}]}"#);

        let result = DialectReader.read_starward(file.path());
        match result {
            Err(ImportError::ValidationError { message, source, .. }) => {
                assert!(message.contains("uid"));
                assert!(source.is_none());
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_format_error() {
        let file = write_json(r#"{"info": "#);

        let result = DialectReader.read_starward(file.path());
        assert!(matches!(result, Err(ImportError::FormatError { .. })));
    }
}
