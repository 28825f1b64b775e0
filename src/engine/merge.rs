// ==========================================
// Starward UIGF 元数据同步 - 元数据合并引擎
// ==========================================
// 规则: 只补空，不覆盖（fill-only）
// - id 不存在: 新增条目
// - id 已存在: 仅写入当前为空的 name/item_type/rank_type
// 分层优先级: 已有元数据库 ← 名称映射 ← 方言记录（先到者优先）
// 性质: 幂等，重复执行结果不变
// ==========================================

use crate::domain::meta::{MetadataEntry, MetadataStore};
use crate::domain::uigf::StarwardRecord;
use tracing::debug;

// ==========================================
// MergeStats - 合并统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,         // 新增条目数
    pub fields_filled: usize, // 已有条目被补全的字段数
}

impl MergeStats {
    pub fn absorb(&mut self, other: MergeStats) {
        self.added += other.added;
        self.fields_filled += other.fields_filled;
    }
}

pub struct MergeEngine;

impl MergeEngine {
    /// 用单条记录新增或补全元数据
    ///
    /// # 规则
    /// - 记录无 item_id（或为空）: 不做任何改动
    /// - id 不存在: 以记录自身的 name/item_type/rank_type 新建（name 可为空）
    /// - id 已存在: 只补空字段
    pub fn add_or_fill_from_record(
        &self,
        store: &mut MetadataStore,
        record: &StarwardRecord,
    ) -> MergeStats {
        let item_id = match record.item_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => return MergeStats::default(),
        };

        match store.get_mut(item_id) {
            Some(entry) => {
                let filled = entry.fill_missing(
                    record.name.as_deref(),
                    record.item_type.as_deref(),
                    record.rank_type.as_deref(),
                );
                if filled > 0 {
                    debug!(item_id = %item_id, filled, "记录补全已有条目");
                }
                MergeStats {
                    added: 0,
                    fields_filled: filled,
                }
            }
            None => {
                store.insert_if_absent(MetadataEntry {
                    name: record.name.clone().unwrap_or_default(),
                    item_type: record.item_type.clone(),
                    rank_type: record.rank_type.clone(),
                    item_id: item_id.to_string(),
                });
                debug!(item_id = %item_id, "记录新增条目");
                MergeStats {
                    added: 1,
                    fields_filled: 0,
                }
            }
        }
    }

    /// 按抽卡顺序用多条记录补全
    pub fn fill_from_records<'a, I>(&self, store: &mut MetadataStore, records: I) -> MergeStats
    where
        I: IntoIterator<Item = &'a StarwardRecord>,
    {
        let mut stats = MergeStats::default();
        for record in records {
            stats.absorb(self.add_or_fill_from_record(store, record));
        }
        stats
    }

    /// 将 source 合并进 target（target 原地修改，source 不变）
    ///
    /// # 规则
    /// - id 不在 target: 原样复制（含 item_id）
    /// - id 已在 target: 逐字段只补空
    pub fn merge_into(&self, target: &mut MetadataStore, source: &MetadataStore) -> MergeStats {
        let mut stats = MergeStats::default();

        for (item_id, incoming) in source.iter() {
            match target.get_mut(item_id) {
                Some(existing) => {
                    stats.fields_filled += existing.fill_missing(
                        Some(incoming.name.as_str()),
                        incoming.item_type.as_deref(),
                        incoming.rank_type.as_deref(),
                    );
                }
                None => {
                    target.restore_entry(item_id.clone(), incoming.clone());
                    stats.added += 1;
                }
            }
        }

        debug!(added = stats.added, filled = stats.fields_filled, "元数据库合并完成");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, item_type: Option<&str>, rank_type: Option<&str>) -> MetadataEntry {
        MetadataEntry {
            name: name.to_string(),
            item_type: item_type.map(str::to_string),
            rank_type: rank_type.map(str::to_string),
            item_id: id.to_string(),
        }
    }

    fn store_of(entries: Vec<MetadataEntry>) -> MetadataStore {
        let mut store = MetadataStore::new();
        for e in entries {
            store.insert_if_absent(e);
        }
        store
    }

    fn record(id: Option<&str>, name: Option<&str>, item_type: Option<&str>, rank: Option<&str>) -> StarwardRecord {
        StarwardRecord {
            item_id: id.map(str::to_string),
            name: name.map(str::to_string),
            item_type: item_type.map(str::to_string),
            rank_type: rank.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_without_item_id_is_noop() {
        let mut store = MetadataStore::new();
        let engine = MergeEngine;

        engine.add_or_fill_from_record(&mut store, &record(None, Some("x"), None, None));
        engine.add_or_fill_from_record(&mut store, &record(Some(""), Some("x"), None, None));

        assert!(store.is_empty());
    }

    #[test]
    fn test_record_creates_entry_with_own_fields() {
        let mut store = MetadataStore::new();

        let stats = MergeEngine.add_or_fill_from_record(
            &mut store,
            &record(Some("15502"), None, Some("武器"), Some("5")),
        );

        assert_eq!(stats.added, 1);
        let e = store.get("15502").unwrap();
        assert_eq!(e.name, "");
        assert_eq!(e.item_type.as_deref(), Some("武器"));
        assert_eq!(e.rank_type.as_deref(), Some("5"));
    }

    #[test]
    fn test_record_fills_only_empty_fields() {
        let mut store = store_of(vec![entry("1", "Sword", None, Some("4"))]);

        let stats = MergeEngine.add_or_fill_from_record(
            &mut store,
            &record(Some("1"), Some("Other"), Some("武器"), Some("5")),
        );

        assert_eq!(stats.fields_filled, 1);
        let e = store.get("1").unwrap();
        assert_eq!(e.name, "Sword");
        assert_eq!(e.item_type.as_deref(), Some("武器"));
        assert_eq!(e.rank_type.as_deref(), Some("4"));
    }

    #[test]
    fn test_merge_into_copies_and_fills() {
        let mut target = store_of(vec![entry("1", "", Some("角色"), None)]);
        let source = store_of(vec![
            entry("1", "Amber", Some("武器"), Some("4")),
            entry("2", "Bow", None, None),
        ]);
        let source_before = source.clone();

        let stats = MergeEngine.merge_into(&mut target, &source);

        assert_eq!(stats, MergeStats { added: 1, fields_filled: 2 });
        assert_eq!(target.get("1").unwrap(), &entry("1", "Amber", Some("角色"), Some("4")));
        assert_eq!(target.get("2").unwrap(), &entry("2", "Bow", None, None));
        assert_eq!(source, source_before);
    }

    #[test]
    fn test_merge_into_is_idempotent() {
        let mut target = store_of(vec![entry("1", "", None, Some("5")), entry("3", "Claymore", None, None)]);
        let source = store_of(vec![
            entry("1", "Aqua", Some("武器"), Some("4")),
            entry("2", "Bow", None, None),
        ]);

        MergeEngine.merge_into(&mut target, &source);
        let once = target.clone();
        let second = MergeEngine.merge_into(&mut target, &source);

        assert_eq!(target, once);
        assert_eq!(second, MergeStats::default());
    }

    #[test]
    fn test_layer_priority_earlier_wins() {
        // 已有库 ← 映射 ← 记录
        let mut base = store_of(vec![entry("10", "旧名", None, None)]);
        let mapping = store_of(vec![entry("10", "映射名", None, None), entry("11", "映射名2", None, None)]);

        MergeEngine.merge_into(&mut base, &mapping);
        MergeEngine.fill_from_records(
            &mut base,
            &[
                record(Some("10"), Some("记录名"), Some("武器"), Some("3")),
                record(Some("11"), Some("记录名2"), Some("角色"), Some("4")),
            ],
        );

        assert_eq!(base.get("10").unwrap(), &entry("10", "旧名", Some("武器"), Some("3")));
        assert_eq!(base.get("11").unwrap(), &entry("11", "映射名2", Some("角色"), Some("4")));
    }
}
