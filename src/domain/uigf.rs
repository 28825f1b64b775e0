// ==========================================
// Starward UIGF 元数据同步 - 抽卡记录导出方言模型
// ==========================================
// 职责: 两种导出方言的内存结构
// - Starward（统一方言）: 记录携带 name/item_type/rank_type 等展示字段
// - Snap Hutao: 记录只有 item_id/time/gacha_type 等标识字段
// 约束: 声明字段全部可空；未声明字段进入透传字典，原样回写
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 透传字典（键保持原始顺序）
pub type ExtraFields = Map<String, Value>;

/// 本工具处理的游戏标题键
pub const GENSHIN_TITLE: &str = "hk4e";

// ==========================================
// Starward 方言
// ==========================================

/// Starward 单条抽卡记录（hk4e[].list 的项）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarwardRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uigf_gacha_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gacha_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    // 显式 extra 对象，为空时不输出
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: ExtraFields,

    // 其余未声明字段
    #[serde(flatten)]
    pub unknown_fields: ExtraFields,
}

/// Starward 用户级容器（hk4e 列表项）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarwardUserBundle {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub list: Vec<StarwardRecord>,
    #[serde(flatten)]
    pub unknown_fields: ExtraFields,
}

/// Starward UIGF 顶层文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarwardUigf {
    pub info: ExtraFields,
    #[serde(default)]
    pub hk4e: Vec<StarwardUserBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hkrpg: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap: Option<Vec<Value>>,
    #[serde(flatten)]
    pub other_fields: ExtraFields,
}

impl StarwardUigf {
    /// 按抽卡顺序遍历全部 hk4e 记录
    pub fn records(&self) -> impl Iterator<Item = &StarwardRecord> {
        self.hk4e.iter().flat_map(|user| user.list.iter())
    }
}

// ==========================================
// Snap Hutao 方言
// ==========================================

/// Snap Hutao 单条抽卡记录（字段较少，无展示字段）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HutaoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uigf_gacha_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gacha_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: ExtraFields,
    #[serde(flatten)]
    pub unknown_fields: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HutaoUserBundle {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i64>,
    #[serde(default)]
    pub list: Vec<HutaoRecord>,
    #[serde(flatten)]
    pub unknown_fields: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HutaoUigf {
    pub info: ExtraFields,
    #[serde(default)]
    pub hk4e: Vec<HutaoUserBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hkrpg: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap: Option<Vec<Value>>,
    #[serde(flatten)]
    pub other_fields: ExtraFields,
}

impl HutaoUigf {
    pub fn records(&self) -> impl Iterator<Item = &HutaoRecord> {
        self.hk4e.iter().flat_map(|user| user.list.iter())
    }
}

// ==========================================
// UigfDocument - 方言文档的公共接口
// ==========================================
// 用途: 读取器在反序列化后统一做必填字段校验
pub trait UigfDocument: serde::de::DeserializeOwned {
    /// 方言名称（用于错误信息与日志）
    const DIALECT: &'static str;

    /// 各用户容器的 uid（按出现顺序）
    fn user_ids(&self) -> Vec<&str>;

    /// 记录总数
    fn record_count(&self) -> usize;
}

impl UigfDocument for StarwardUigf {
    const DIALECT: &'static str = "Starward";

    fn user_ids(&self) -> Vec<&str> {
        self.hk4e.iter().map(|u| u.uid.as_str()).collect()
    }

    fn record_count(&self) -> usize {
        self.hk4e.iter().map(|u| u.list.len()).sum()
    }
}

impl UigfDocument for HutaoUigf {
    const DIALECT: &'static str = "Snap Hutao";

    fn user_ids(&self) -> Vec<&str> {
        self.hk4e.iter().map(|u| u.uid.as_str()).collect()
    }

    fn record_count(&self) -> usize {
        self.hk4e.iter().map(|u| u.list.len()).sum()
    }
}
