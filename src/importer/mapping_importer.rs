// ==========================================
// Starward UIGF 元数据同步 - 名称映射导入器
// ==========================================
// 数据源: UIGF 名称字典（如 https://api.uigf.org/dict/genshin/chs.json）
// 格式: { "<名称>": <id> | [<id>, ...] }
// 职责: 构建 id ↔ 名称 双向映射，并生成仅含名称的元数据库
// ==========================================

use crate::domain::meta::{MetadataEntry, MetadataStore};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{json_type_name, JsonFileParser};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// MappingIds - 名称对应的一个或多个 id
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingIds {
    One(String),
    Many(Vec<String>),
}

impl MappingIds {
    pub fn as_slice(&self) -> &[String] {
        match self {
            MappingIds::One(id) => std::slice::from_ref(id),
            MappingIds::Many(ids) => ids,
        }
    }
}

// ==========================================
// NameMapping - 双向映射
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping {
    pub id_to_name: BTreeMap<String, String>,
    pub name_to_ids: BTreeMap<String, MappingIds>,
}

impl NameMapping {
    /// 生成元数据库：每个 id 一条，仅填充 name
    pub fn to_store(&self) -> MetadataStore {
        let mut store = MetadataStore::new();
        for (item_id, name) in &self.id_to_name {
            store.insert_if_absent(MetadataEntry::named(item_id.as_str(), name.as_str()));
        }
        store
    }
}

pub struct MappingImporter;

impl MappingImporter {
    /// 读取名称映射文件
    ///
    /// # 返回
    /// - Ok(NameMapping): 双向映射（同一 id 出现在多个名称下时，文档中靠后的名称生效）
    /// - Err(FormatError): 非法 JSON、根节点不是对象、id 不是字符串/数字
    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_mapping<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<NameMapping> {
        let path = file_path.as_ref();
        let root = JsonFileParser.parse_object(path)?;

        let mut mapping = NameMapping::default();
        for (name, ids) in root {
            let parsed = match ids {
                Value::Array(items) => {
                    let mut list = Vec::with_capacity(items.len());
                    for item in &items {
                        list.push(id_to_string(path, &name, item)?);
                    }
                    MappingIds::Many(list)
                }
                other => MappingIds::One(id_to_string(path, &name, &other)?),
            };

            for item_id in parsed.as_slice() {
                if item_id.is_empty() {
                    warn!(name = %name, "映射表中存在空 id，已跳过");
                    continue;
                }
                if let Some(previous) = mapping.id_to_name.insert(item_id.clone(), name.clone()) {
                    debug!(item_id = %item_id, previous = %previous, current = %name, "id 对应多个名称");
                }
            }
            mapping.name_to_ids.insert(name, parsed);
        }

        info!(
            names = mapping.name_to_ids.len(),
            ids = mapping.id_to_name.len(),
            "名称映射读取完成"
        );
        Ok(mapping)
    }

    /// 读取映射文件并直接生成仅含名称的元数据库
    pub fn build_store<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<MetadataStore> {
        Ok(self.import_mapping(file_path)?.to_store())
    }
}

fn id_to_string(path: &Path, name: &str, value: &Value) -> ImportResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ImportError::FormatError {
            path: path.display().to_string(),
            message: format!(
                "名称 \"{}\" 的 id 应为字符串或数字，实际为 {}",
                name,
                json_type_name(other)
            ),
        }),
    }
}
