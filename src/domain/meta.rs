// ==========================================
// Starward UIGF 元数据同步 - 物品元数据模型
// ==========================================
// 职责: item_id → 物品元数据（名称/分类/稀有度）
// 红线: 软字段一旦非空不再被覆盖（每字段首个非空值生效）
// 落盘: {"by_id": {"<item_id>": {name, item_type, rank_type, item_id}}}
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 判断可选字符串字段是否已有有效值（None 与 "" 均视为缺失）
pub fn has_value(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ==========================================
// MetadataEntry - 单个物品元数据
// ==========================================
// 字段顺序与元数据库文件一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    pub item_type: Option<String>,
    pub rank_type: Option<String>,
    #[serde(default)]
    pub item_id: String,
}

impl MetadataEntry {
    /// 仅含名称的条目（来自名称映射表）
    pub fn named(item_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: None,
            rank_type: None,
            item_id: item_id.into(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn has_item_type(&self) -> bool {
        has_value(&self.item_type)
    }

    pub fn has_rank_type(&self) -> bool {
        has_value(&self.rank_type)
    }

    /// 分类与稀有度均已就绪（转换器的前置条件）
    pub fn is_classified(&self) -> bool {
        self.has_item_type() && self.has_rank_type()
    }

    /// 仅补全当前为空的字段
    ///
    /// # 返回
    /// - 实际写入的字段数（0..=3）
    pub fn fill_missing(
        &mut self,
        name: Option<&str>,
        item_type: Option<&str>,
        rank_type: Option<&str>,
    ) -> usize {
        let mut written = 0;

        if !self.has_name() {
            if let Some(v) = non_empty(name) {
                self.name = v.to_string();
                written += 1;
            }
        }
        if !self.has_item_type() {
            if let Some(v) = non_empty(item_type) {
                self.item_type = Some(v.to_string());
                written += 1;
            }
        }
        if !self.has_rank_type() {
            if let Some(v) = non_empty(rank_type) {
                self.rank_type = Some(v.to_string());
                written += 1;
            }
        }

        written
    }
}

// ==========================================
// MetadataStore - 元数据库
// ==========================================
// 键唯一性由 BTreeMap 保证；只提供"缺失则新增 / 为空则补全"两类写操作
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataStore {
    by_id: BTreeMap<String, MetadataEntry>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_id: &str) -> Option<&MetadataEntry> {
        self.by_id.get(item_id)
    }

    pub(crate) fn get_mut(&mut self, item_id: &str) -> Option<&mut MetadataEntry> {
        self.by_id.get_mut(item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.by_id.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataEntry)> {
        self.by_id.iter()
    }

    /// 新增条目（id 已存在时不做任何改动）
    ///
    /// # 返回
    /// - true: 新增成功
    /// - false: id 已存在
    pub fn insert_if_absent(&mut self, entry: MetadataEntry) -> bool {
        if self.by_id.contains_key(&entry.item_id) {
            return false;
        }
        self.by_id.insert(entry.item_id.clone(), entry);
        true
    }

    /// 以文件中的键装载条目（仓储层恢复用）
    pub(crate) fn restore_entry(&mut self, key: String, entry: MetadataEntry) {
        self.by_id.insert(key, entry);
    }
}

// ==========================================
// PendingEntry - 待补全条目快照
// ==========================================
// item_id 为元数据库中的键；entry 为收集时刻的快照，补全时以库中当前值为准
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    pub item_id: String,
    pub entry: MetadataEntry,
}

impl PendingEntry {
    pub fn name(&self) -> &str {
        &self.entry.name
    }
}
