//! 法術參考資料
//!
//! 角色表不計算施法；法術只作為資料檔中的參考資料，可依職業查詢法術列表

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

/// 法術等級（0 = 戲法，1-9 = 法術等級）
pub type SpellLevel = u8;

pub const MAX_SPELL_LEVEL: SpellLevel = 9;

/// 法術學派
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
pub enum MagicSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
    Universal,
}

/// 法術成分；資料檔使用縮寫（`V`、`S`、`M`、`F`、`DF`、`XP`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellComponent {
    #[serde(rename = "V")]
    Verbal,
    #[serde(rename = "S")]
    Somatic,
    #[serde(rename = "M")]
    Material,
    #[serde(rename = "F")]
    Focus,
    #[serde(rename = "DF")]
    DivineFocus,
    #[serde(rename = "XP")]
    ExperienceCost,
}

impl SpellComponent {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Verbal => "V",
            Self::Somatic => "S",
            Self::Material => "M",
            Self::Focus => "F",
            Self::DivineFocus => "DF",
            Self::ExperienceCost => "XP",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Verbal => "Verbal",
            Self::Somatic => "Somatic",
            Self::Material => "Material",
            Self::Focus => "Focus",
            Self::DivineFocus => "Divine Focus",
            Self::ExperienceCost => "XP Cost",
        }
    }
}

impl std::fmt::Display for SpellComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.short_name())
    }
}

/// 法術
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub school: MagicSchool,
    pub subschool: Option<String>,
    pub descriptors: Vec<String>,
    pub casting_time: String,
    pub range: String,
    pub target: Option<String>,
    pub effect: Option<String>,
    pub area: Option<String>,
    pub duration: Option<String>,
    pub saving_throw: Option<String>,
    pub spell_resistance: bool,
    pub components: Vec<SpellComponent>,
    /// 職業名稱 → 該職業的法術等級
    pub class_levels: BTreeMap<String, SpellLevel>,
    pub source: Option<String>,
}

impl Spell {
    pub fn level_for_class(&self, class: &str) -> Option<SpellLevel> {
        self.class_levels.get(class).copied()
    }

    /// 成分縮寫，例如 `V, S, M`
    pub fn components_display(&self) -> String {
        self.components
            .iter()
            .map(SpellComponent::short_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 各職業的法術等級，例如 `Cleric 3, Wizard 3`
    pub fn level_summary(&self) -> String {
        self.class_levels
            .iter()
            .map(|(class, level)| format!("{} {}", class, level))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
