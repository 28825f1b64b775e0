// ==========================================
// Starward UIGF 元数据同步 - CSV 答题表
// ==========================================
// 用途: 离线补全。导出待补全条目 → 人工在表格软件中填写 → 读回答案
// 列: item_id,name,item_type,rank_type
// 约束: 空单元格表示暂缓该字段；非法取值报错并指明行号
// ==========================================

use crate::domain::meta::PendingEntry;
use crate::domain::types::{ItemCategory, Rarity};
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{info, instrument};

const HEADERS: [&str; 4] = ["item_id", "name", "item_type", "rank_type"];

/// 答题表中的一行答案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetAnswer {
    pub category: Option<ItemCategory>,
    pub rarity: Option<Rarity>,
}

pub struct AnswerSheet;

impl AnswerSheet {
    /// 导出待补全条目（已有值原样写出，缺失为空）
    #[instrument(skip(self, file_path, pending), fields(rows = pending.len()))]
    pub fn write_sheet<P: AsRef<Path>>(
        &self,
        file_path: P,
        pending: &[PendingEntry],
    ) -> ImportResult<()> {
        let file = File::create(file_path.as_ref())?;
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

        writer.write_record(HEADERS)?;
        for item in pending {
            writer.write_record([
                item.item_id.as_str(),
                item.entry.name.as_str(),
                item.entry.item_type.as_deref().unwrap_or(""),
                item.entry.rank_type.as_deref().unwrap_or(""),
            ])?;
        }
        writer.flush()?;

        info!("答题表导出完成");
        Ok(())
    }

    /// 读回答题表
    ///
    /// # 返回
    /// - Ok(BTreeMap<item_id, SheetAnswer>): 每个 item_id 的答案（重复行以最后一行为准）
    /// - Err(AnswerSheetError): 缺少必需列、单元格取值非法
    #[instrument(skip(self, file_path))]
    pub fn read_sheet<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<BTreeMap<String, SheetAnswer>> {
        let path = file_path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头（去除 BOM 与空白）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let id_col = column("item_id").ok_or_else(|| ImportError::AnswerSheetError {
            row: 1,
            message: "缺少 item_id 列".to_string(),
        })?;
        let type_col = column("item_type");
        let rank_col = column("rank_type");

        let mut answers = BTreeMap::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 表头占第 1 行
            let row = idx + 2;
            let cell = |col: Option<usize>| {
                col.and_then(|c| record.get(c))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            };

            let Some(item_id) = cell(Some(id_col)) else {
                continue;
            };

            let category = match cell(type_col) {
                None => None,
                Some(v) => Some(ItemCategory::parse(v).ok_or_else(|| {
                    ImportError::AnswerSheetError {
                        row,
                        message: format!("item_type 取值非法: {}", v),
                    }
                })?),
            };
            let rarity = match cell(rank_col) {
                None => None,
                Some(v) => Some(Rarity::parse(v).ok_or_else(|| ImportError::AnswerSheetError {
                    row,
                    message: format!("rank_type 应为 1-5，实际为 {}", v),
                })?),
            };

            answers.insert(item_id.to_string(), SheetAnswer { category, rarity });
        }

        info!(answers = answers.len(), "答题表读取完成");
        Ok(answers)
    }
}
