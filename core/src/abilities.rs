//! 屬性值系統
//!
//! 實作 d20 的六項屬性值(力量、敏捷、體質、智力、睿智、魅力)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

/// 六項屬性值
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Ability {
    /// 力量
    Strength,
    /// 敏捷 - 影響先攻和反射豁免
    Dexterity,
    /// 體質 - 影響強韌豁免
    Constitution,
    /// 智力
    Intelligence,
    /// 睿智 - 影響意志豁免
    Wisdom,
    /// 魅力
    Charisma,
}

/// 計算屬性調整值
///
/// 規則：調整值 = (屬性值 + 加值 - 10) / 2，向負無限大取整
/// 例如 7 → -2，而不是截斷後的 -1
///
/// 以 i64 計算，任何 i32 輸入都有定義；結果超出 i32 時取邊界值
pub fn modifier(value: i32, bonus: i32) -> i32 {
    let modifier = (i64::from(value) + i64::from(bonus) - 10).div_euclid(2);
    i32::try_from(modifier).unwrap_or(if modifier < 0 { i32::MIN } else { i32::MAX })
}

/// 單項屬性值（基礎值 + 臨時加值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    #[serde(default = "default_score_value")]
    pub value: i32,
    #[serde(default)]
    pub bonus: i32,
}

fn default_score_value() -> i32 {
    10
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self {
            value: default_score_value(),
            bonus: 0,
        }
    }
}

impl AbilityScore {
    pub fn new(value: i32, bonus: i32) -> Self {
        Self { value, bonus }
    }

    pub fn modifier(&self) -> i32 {
        modifier(self.value, self.bonus)
    }
}

/// 角色的屬性值，每項屬性至多一筆
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    scores: BTreeMap<Ability, AbilityScore>,
}

impl AbilityScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增屬性值；該屬性已存在時回傳 Err 並保留原值
    pub fn insert(&mut self, ability: Ability, score: AbilityScore) -> Result<(), AbilityScore> {
        if self.scores.contains_key(&ability) {
            return Err(score);
        }
        self.scores.insert(ability, score);
        Ok(())
    }

    pub fn get(&self, ability: Ability) -> Option<&AbilityScore> {
        self.scores.get(&ability)
    }

    /// 取得屬性調整值；沒有該屬性值時為 None（而不是 modifier(0, 0)）
    pub fn modifier(&self, ability: Ability) -> Option<i32> {
        self.get(ability).map(AbilityScore::modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, &AbilityScore)> {
        self.scores.iter().map(|(ability, score)| (*ability, score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// 六項屬性是否齊全
    pub fn is_complete(&self) -> bool {
        self.scores.len() == 6
    }
}
