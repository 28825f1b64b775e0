// ==========================================
// Starward UIGF 元数据同步 - 流程编排器
// ==========================================
// 用途: 协调导入层、合并引擎、补全、转换器与仓储层
// 流程一（元数据同步）: 读取已有库 → 名称映射补全 → Starward 记录补全 → 人工补全 → 覆盖保存
// 流程二（方言转换）: 读取库 + Snap Hutao 文件 → 全有或全无转换 → 写出带时间戳的新文件
// 约束: 全部输入读取成功后才写盘；转换失败不创建输出文件
// ==========================================

use crate::config::SyncConfig;
use crate::engine::completion::{
    find_incomplete, resolve, AnswerProvider, ResolutionSummary, SheetAnswers,
};
use crate::engine::converter::DialectConverter;
use crate::engine::error::EngineResult;
use crate::engine::merge::{MergeEngine, MergeStats};
use crate::importer::{AnswerSheet, DialectReader, MappingImporter};
use crate::repository::{MetaStoreRepository, UigfExportRepository};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

// ==========================================
// ReconcileReport - 元数据同步结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub store_existed: bool,
    pub total_entries: usize,
    pub from_mapping: MergeStats,
    pub from_records: MergeStats,
    pub pending_before: usize,
    pub pending_after: usize,
    pub resolution: ResolutionSummary,
}

// ==========================================
// MetaSyncPipeline - 流程编排器
// ==========================================
pub struct MetaSyncPipeline {
    config: SyncConfig,
    merge: MergeEngine,
    converter: DialectConverter,
}

impl Default for MetaSyncPipeline {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

impl MetaSyncPipeline {
    pub fn new(config: SyncConfig) -> Self {
        let converter = DialectConverter::new(config.conversion_defaults());
        Self {
            config,
            merge: MergeEngine,
            converter,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// 元数据同步
    ///
    /// # 参数
    /// - mapping_path: 名称映射文件
    /// - starward_path: Starward 导出文件
    /// - store_path: 元数据库文件（不存在时从空库开始，结束时覆盖写入）
    /// - provider: 人工补全答案来源
    #[instrument(skip_all, fields(store = %store_path.as_ref().display()))]
    pub fn reconcile<P1, P2, P3>(
        &self,
        mapping_path: P1,
        starward_path: P2,
        store_path: P3,
        provider: &mut dyn AnswerProvider,
    ) -> EngineResult<ReconcileReport>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
    {
        let store_path = store_path.as_ref();

        // === 步骤 0: 读取已有元数据库 ===
        let (mut store, store_existed) = MetaStoreRepository.load_or_default(store_path)?;
        if !store_existed {
            warn!(path = %store_path.display(), "元数据库不存在，将新建");
        }
        info!(entries = store.len(), "步骤 0: 已有元数据库");

        // === 步骤 1: 名称映射补全（不覆盖已有值）===
        let mapping_store = MappingImporter.build_store(mapping_path)?;
        let from_mapping = self.merge.merge_into(&mut store, &mapping_store);
        info!(
            added = from_mapping.added,
            filled = from_mapping.fields_filled,
            "步骤 1: 名称映射补全完成"
        );

        // === 步骤 2: Starward 记录补全 ===
        let starward = DialectReader.read_starward(starward_path)?;
        let from_records = self.merge.fill_from_records(&mut store, starward.records());
        info!(
            added = from_records.added,
            filled = from_records.fields_filled,
            "步骤 2: Starward 记录补全完成"
        );

        // === 步骤 3: 人工补全 ===
        let pending = find_incomplete(&store);
        let pending_before = pending.len();
        info!(pending = pending_before, "步骤 3: 待人工补全条目");
        let resolution = resolve(&mut store, pending, provider)?;
        let pending_after = find_incomplete(&store).len();

        // === 步骤 4: 覆盖保存 ===
        MetaStoreRepository.save(&store, store_path)?;
        info!(entries = store.len(), pending_after, "步骤 4: 元数据库已保存");

        Ok(ReconcileReport {
            store_existed,
            total_entries: store.len(),
            from_mapping,
            from_records,
            pending_before,
            pending_after,
            resolution,
        })
    }

    /// Snap Hutao 文件转换为 Starward 文件
    ///
    /// # 返回
    /// - Ok(PathBuf): 新生成的文件路径 out_dir/<前缀><时间戳>.json
    /// - Err(UnresolvedMetadata): 存在未补全物品，不生成文件
    #[instrument(skip_all, fields(hutao = %hutao_path.as_ref().display()))]
    pub fn convert_file<P1, P2, P3, Tz>(
        &self,
        store_path: P1,
        hutao_path: P2,
        out_dir: P3,
        now: &DateTime<Tz>,
    ) -> EngineResult<PathBuf>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let store = MetaStoreRepository.load(store_path)?;
        let hutao = DialectReader.read_hutao(hutao_path)?;

        let output = self.converter.convert(&hutao, &store)?;

        let out_path = out_dir.as_ref().join(self.config.output_file_name(now));
        UigfExportRepository.write_starward(&output, &out_path)?;
        Ok(out_path)
    }

    /// 导出待补全条目为 CSV 答题表
    ///
    /// # 返回
    /// - 导出的条目数
    pub fn export_pending<P1, P2>(&self, store_path: P1, csv_path: P2) -> EngineResult<usize>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
    {
        let store = MetaStoreRepository.load(store_path)?;
        let pending = find_incomplete(&store);
        AnswerSheet.write_sheet(csv_path, &pending)?;
        Ok(pending.len())
    }

    /// 用填写好的 CSV 答题表补全并保存
    pub fn apply_answer_sheet<P1, P2>(
        &self,
        store_path: P1,
        csv_path: P2,
    ) -> EngineResult<ResolutionSummary>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
    {
        let store_path = store_path.as_ref();
        let mut store = MetaStoreRepository.load(store_path)?;
        let answers = AnswerSheet.read_sheet(csv_path)?;

        let pending = find_incomplete(&store);
        let ignored = answers
            .keys()
            .filter(|id| !pending.iter().any(|p| &p.item_id == *id))
            .count();
        if ignored > 0 {
            warn!(ignored, "答题表中部分条目无需补全，已忽略");
        }

        let summary = resolve(&mut store, pending, &mut SheetAnswers::new(answers))?;

        MetaStoreRepository.save(&store, store_path)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ItemCategory, Rarity};
    use crate::engine::completion::{ResolveAction, ScriptedAnswers, SessionState};
    use crate::engine::error::EngineError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reconcile_then_convert() {
        let dir = tempdir().unwrap();
        let mapping = dir.path().join("mapping.json");
        let starward = dir.path().join("starward.json");
        let hutao = dir.path().join("hutao.json");
        let store_path = dir.path().join("meta.json");

        fs::write(&mapping, r#"{"Sword": [1, 2], "Bow": 3}"#).unwrap();
        fs::write(
            &starward,
            r#"{"info": {}, "hk4e": [{"uid": "1", "list": [
                {"item_id": "1", "name": "Sword", "item_type": "武器", "rank_type": "3"}
            ]}]}"#,
        )
        .unwrap();
        fs::write(
            &hutao,
            r#"{"info": {"export_app": "Snap.Hutao"}, "hk4e": [{"uid": "1", "list": [
                {"item_id": "1", "time": "2024-01-01 00:00:00", "gacha_type": "301"},
                {"item_id": "3", "time": "2024-01-01 00:00:01", "gacha_type": "301"}
            ]}]}"#,
        )
        .unwrap();

        let pipeline = MetaSyncPipeline::default();
        let mut answers = ScriptedAnswers::new([
            ResolveAction::Skip, // id 2
            ResolveAction::Submit {
                category: Some(ItemCategory::Weapon),
                rarity: Rarity::new(4),
            }, // id 3
        ]);

        let report = pipeline
            .reconcile(&mapping, &starward, &store_path, &mut answers)
            .unwrap();
        assert!(!report.store_existed);
        assert_eq!(report.total_entries, 3);
        assert_eq!(report.pending_before, 2);
        assert_eq!(report.pending_after, 1);
        assert_eq!(report.resolution.state, SessionState::Done);

        let out_dir = dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        let now = chrono::Local::now();
        let out = pipeline.convert_file(&store_path, &hutao, &out_dir, &now).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_convert_failure_creates_no_file() {
        let dir = tempdir().unwrap();
        let hutao = dir.path().join("hutao.json");
        let store_path = dir.path().join("meta.json");
        fs::write(&store_path, r#"{"by_id": {}}"#).unwrap();
        fs::write(
            &hutao,
            r#"{"info": {}, "hk4e": [{"uid": "1", "list": [{"item_id": "99"}]}]}"#,
        )
        .unwrap();

        let now = chrono::Utc::now();
        let result = MetaSyncPipeline::default().convert_file(&store_path, &hutao, dir.path(), &now);

        assert!(matches!(result, Err(EngineError::UnresolvedMetadata { .. })));
        let produced = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(produced, 2);
    }
}
