// ==========================================
// Starward UIGF 元数据同步 - 方言转换器
// ==========================================
// 职责: Snap Hutao → Starward
// 规则:
// - 每条记录按 item_id 查元数据库，缺失或分类/稀有度未补全 → 整体失败
// - 标识/时间字段原样复制；name/item_type/rank_type 取自元数据库
// - count/lang 源方言不携带，写入默认值
// - extra 非空才输出；其余未声明字段原样透传
// - info 复制后覆写 export_app 标记来源
// ==========================================

use crate::domain::meta::MetadataStore;
use crate::domain::uigf::{
    HutaoRecord, HutaoUigf, HutaoUserBundle, StarwardRecord, StarwardUigf, StarwardUserBundle,
};
use crate::engine::error::{EngineError, EngineResult};
use serde_json::Value;
use tracing::{error, info};

// ==========================================
// ConversionDefaults - 转换默认值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionDefaults {
    pub lang: String,
    pub count: String,
    pub export_app: String,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            lang: "zh-cn".to_string(),
            count: "1".to_string(),
            export_app: "Converted from Snap Hutao".to_string(),
        }
    }
}

pub struct DialectConverter {
    defaults: ConversionDefaults,
}

impl Default for DialectConverter {
    fn default() -> Self {
        Self::new(ConversionDefaults::default())
    }
}

impl DialectConverter {
    pub fn new(defaults: ConversionDefaults) -> Self {
        Self { defaults }
    }

    /// 转换整个文档（全有或全无）
    ///
    /// # 返回
    /// - Ok(StarwardUigf): 全部记录均已解析
    /// - Err(UnresolvedMetadata): 第一个无法解析的 item_id
    pub fn convert(
        &self,
        document: &HutaoUigf,
        store: &MetadataStore,
    ) -> EngineResult<StarwardUigf> {
        let mut info_block = document.info.clone();
        info_block.insert(
            "export_app".to_string(),
            Value::String(self.defaults.export_app.clone()),
        );

        let hk4e = document
            .hk4e
            .iter()
            .map(|user| self.convert_user(user, store))
            .collect::<EngineResult<Vec<_>>>()?;

        let output = StarwardUigf {
            info: info_block,
            hk4e,
            hkrpg: Some(document.hkrpg.clone().unwrap_or_default()),
            nap: Some(document.nap.clone().unwrap_or_default()),
            other_fields: document.other_fields.clone(),
        };

        info!(
            users = output.hk4e.len(),
            records = output.hk4e.iter().map(|u| u.list.len()).sum::<usize>(),
            "Snap Hutao → Starward 转换完成"
        );
        Ok(output)
    }

    fn convert_user(
        &self,
        user: &HutaoUserBundle,
        store: &MetadataStore,
    ) -> EngineResult<StarwardUserBundle> {
        let list = user
            .list
            .iter()
            .map(|record| self.convert_record(&user.uid, record, store))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(StarwardUserBundle {
            uid: user.uid.clone(),
            timezone: user.timezone,
            lang: Some(self.defaults.lang.clone()),
            list,
            unknown_fields: user.unknown_fields.clone(),
        })
    }

    fn convert_record(
        &self,
        uid: &str,
        record: &HutaoRecord,
        store: &MetadataStore,
    ) -> EngineResult<StarwardRecord> {
        let item_id = record.item_id.as_deref().unwrap_or("");
        let meta = store
            .get(item_id)
            .filter(|_| !item_id.is_empty())
            .filter(|m| m.is_classified())
            .ok_or_else(|| {
                error!(item_id = %item_id, uid = %uid, "元数据缺失，转换中止");
                EngineError::UnresolvedMetadata {
                    item_id: item_id.to_string(),
                }
            })?;

        Ok(StarwardRecord {
            uigf_gacha_type: record.uigf_gacha_type.clone(),
            uid: Some(uid.to_string()),
            id: record.id.clone(),
            gacha_type: record.gacha_type.clone(),
            name: Some(meta.name.clone()),
            item_type: meta.item_type.clone(),
            rank_type: meta.rank_type.clone(),
            time: record.time.clone(),
            item_id: record.item_id.clone(),
            count: Some(self.defaults.count.clone()),
            lang: Some(self.defaults.lang.clone()),
            extra: record.extra.clone(),
            unknown_fields: record.unknown_fields.clone(),
        })
    }
}

/// 使用默认值转换
pub fn convert(document: &HutaoUigf, store: &MetadataStore) -> EngineResult<StarwardUigf> {
    DialectConverter::default().convert(document, store)
}
