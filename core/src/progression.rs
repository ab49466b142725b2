//! 基礎攻擊加值 (BAB) 與基礎豁免加值 (BSB) 成長表

use crate::abilities::Ability;
use crate::error::ProgressionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 顯示時列出的等級範圍
const DISPLAY_LEVELS: std::ops::RangeInclusive<u32> = 1..=6;

/// 稀疏的等級查詢表：等級 → 加值
///
/// 表中沒有的等級不補零，查詢時回傳 `ProgressionError::MissingLevel`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    entries: BTreeMap<u32, i32>,
}

impl LevelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, level: u32, bonus: i32) {
        self.entries.insert(level, bonus);
    }

    pub fn get(&self, level: u32) -> Option<i32> {
        self.entries.get(&level).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 以 `/` 串接 1 ~ 6 級的加值，缺少的等級顯示為 `-`
    fn summary(&self) -> String {
        DISPLAY_LEVELS
            .map(|level| match self.get(level) {
                Some(bonus) => bonus.to_string(),
                None => "-".to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl FromIterator<(u32, i32)> for LevelTable {
    fn from_iter<I: IntoIterator<Item = (u32, i32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// 基礎攻擊加值成長
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabProgression {
    pub name: String,
    pub attack_bonus_table: LevelTable,
}

impl BabProgression {
    pub fn attack_bonus_for_level(&self, level: u32) -> Result<i32, ProgressionError> {
        self.attack_bonus_table
            .get(level)
            .ok_or_else(|| ProgressionError::MissingLevel {
                progression: format!("BAB ({})", self.name),
                level,
            })
    }
}

impl fmt::Display for BabProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BAB ({}) ({})", self.name, self.attack_bonus_table.summary())
    }
}

/// 基礎豁免加值成長，標記它影響的屬性
/// （體質 ↔ 強韌、敏捷 ↔ 反射、睿智 ↔ 意志）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BsbProgression {
    pub name: String,
    pub ability: Ability,
    pub save_bonus_table: LevelTable,
}

impl BsbProgression {
    pub fn save_bonus_for_level(&self, level: u32) -> Result<i32, ProgressionError> {
        self.save_bonus_table
            .get(level)
            .ok_or_else(|| ProgressionError::MissingLevel {
                progression: format!("BSB ({})", self.name),
                level,
            })
    }
}

impl fmt::Display for BsbProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BSB ({}) ({})", self.name, self.save_bonus_table.summary())
    }
}
