//! 種族系統

use crate::abilities::Ability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 體型，例如 Small、Medium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub name: String,
    pub size_modifier: i32,
    pub grapple_modifier: i32,
    pub height_or_length: String,
    pub weight: String,
    pub space_ft: f64,
    pub natural_reach_tall_ft: i32,
    pub natural_reach_long_ft: i32,
}

impl Size {
    /// 躲藏調整值與擒抱調整值相反
    pub fn hide_modifier(&self) -> i32 {
        -self.grapple_modifier
    }
}

/// 種族屬性調整，例如 +2 Dexterity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityAdjustment {
    pub ability: Ability,
    pub value: i32,
}

impl fmt::Display for AbilityAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value > 0 {
            write!(f, "+{} {}", self.value, self.ability)
        } else {
            write!(f, "{} {}", self.value, self.ability)
        }
    }
}

/// 種族語言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceLanguage {
    pub language: String,
    /// 是否為自動習得（否則只是可選的額外語言）
    pub is_automatic: bool,
}

/// 種族
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    pub description: Option<String>,
    pub level_adjustment: u32,
    pub size: Size,
    pub languages: Vec<RaceLanguage>,
    pub ability_adjustments: Vec<AbilityAdjustment>,
    pub favored_classes: Vec<String>,
}

impl Race {
    /// 自動習得的語言名稱，保持原本順序
    pub fn automatic_languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .filter(|race_language| race_language.is_automatic)
            .map(|race_language| race_language.language.as_str())
    }

    /// 可選的額外語言
    pub fn bonus_languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .filter(|race_language| !race_language.is_automatic)
            .map(|race_language| race_language.language.as_str())
    }

    pub fn ability_adjustment(&self, ability: Ability) -> i32 {
        self.ability_adjustments
            .iter()
            .filter(|adjustment| adjustment.ability == ability)
            .map(|adjustment| adjustment.value)
            .sum()
    }
}
