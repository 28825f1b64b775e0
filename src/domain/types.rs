// ==========================================
// Starward UIGF 元数据同步 - 领域类型定义
// ==========================================
// 职责: 物品分类与稀有度的固定候选集合
// 落盘格式: 字符串（item_type = "武器"/"角色"，rank_type = "1".."5"）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 物品分类 (Item Category)
// ==========================================
// 元数据库中 item_type 是开放字符串；补全时只提供这两个候选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Weapon,    // 武器
    Character, // 角色
}

impl ItemCategory {
    /// 补全向导中的候选顺序
    pub const ALL: [ItemCategory; 2] = [ItemCategory::Weapon, ItemCategory::Character];

    /// 写入 item_type 的标签（与游戏 zh-cn 导出一致）
    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "武器",
            ItemCategory::Character => "角色",
        }
    }

    /// 从标签或英文名解析（英文名不区分大小写）
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        match trimmed {
            "武器" => return Some(ItemCategory::Weapon),
            "角色" => return Some(ItemCategory::Character),
            _ => {}
        }
        match trimmed.to_lowercase().as_str() {
            "weapon" => Some(ItemCategory::Weapon),
            "character" => Some(ItemCategory::Character),
            _ => None,
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 稀有度 (Rarity)
// ==========================================
// 取值范围 1..=5，构造时校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rarity(u8);

impl Rarity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Rarity(value))
        } else {
            None
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// 补全向导中的全部候选（1..5）
    pub fn all() -> impl Iterator<Item = Rarity> {
        (Self::MIN..=Self::MAX).map(Rarity)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
