//! Loader 相關的資料結構定義
//!
//! 對應 TOML 資料檔的原始紀錄；參考資料之間以名稱互相引用，
//! 由 [`crate::loader`] 檢查並組裝成領域型別

use crate::abilities::Ability;
use crate::character::Appearance;
use crate::equipment::ArmorType;
use crate::race::AbilityAdjustment;
use crate::spells::{MagicSchool, SpellComponent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// 資料檔 (Data File)
// ============================================================================

/// 整份資料檔，每個區段都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFileSchema {
    pub sources: Vec<SourceRecord>,
    pub languages: Vec<LanguageRecord>,
    pub skills: Vec<SkillRecord>,
    pub feats: Vec<FeatRecord>,
    pub sizes: Vec<SizeRecord>,
    pub bab_progressions: Vec<BabProgressionRecord>,
    pub bsb_progressions: Vec<BsbProgressionRecord>,
    pub classes: Vec<ClassRecord>,
    pub races: Vec<RaceRecord>,
    pub items: Vec<ItemRecord>,
    pub armors: Vec<ArmorRecord>,
    pub spells: Vec<SpellRecord>,
    pub characters: Vec<CharacterRecord>,
}

// ============================================================================
// 參考資料 (Reference Data)
// ============================================================================

/// 資料出處（規則書）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub name: String,
    pub link: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub name: String,
    pub alphabet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub ability: Ability,
    #[serde(default)]
    pub trained_only: bool,
    #[serde(default)]
    pub armor_check_penalty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatRecord {
    pub name: String,
    #[serde(default)]
    pub benefit: String,
    pub normal: Option<String>,
    pub special: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRecord {
    pub name: String,
    #[serde(default)]
    pub size_modifier: i32,
    #[serde(default)]
    pub grapple_modifier: i32,
    #[serde(default)]
    pub height_or_length: String,
    #[serde(default)]
    pub weight: String,
    pub space_ft: f64,
    #[serde(default)]
    pub natural_reach_tall_ft: i32,
    #[serde(default)]
    pub natural_reach_long_ft: i32,
}

/// 等級鍵為字串（`"1" = 1`），載入時轉成數字
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabProgressionRecord {
    pub name: String,
    pub attack_bonus_table: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BsbProgressionRecord {
    pub name: String,
    pub ability: Ability,
    pub save_bonus_table: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_max_level")]
    pub max_level: i64,
    pub link: Option<String>,
    #[serde(default)]
    pub skill_points_per_level: i64,
    pub hit_die: String,
    pub bab_progression: String,
    #[serde(default)]
    pub bsb_progressions: Vec<String>,
    #[serde(default)]
    pub class_skills: Vec<String>,
    #[serde(default)]
    pub bonus_languages: Vec<String>,
    pub source: Option<String>,
}

fn default_max_level() -> i64 {
    crate::classes::DEFAULT_MAX_CLASS_LEVEL as i64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceLanguageRecord {
    pub language: String,
    #[serde(default)]
    pub is_automatic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub level_adjustment: i64,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default)]
    pub languages: Vec<RaceLanguageRecord>,
    #[serde(default)]
    pub ability_adjustments: Vec<AbilityAdjustment>,
    #[serde(default)]
    pub favored_classes: Vec<String>,
    pub source: Option<String>,
}

fn default_size() -> String {
    "Medium".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub description: Option<String>,
    pub weight_in_lb: Option<f64>,
    pub price_in_gp: Option<f64>,
}

/// 護甲同時登錄為物品，背包可以直接引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorRecord {
    pub name: String,
    pub description: Option<String>,
    pub weight_in_lb: Option<f64>,
    pub price_in_gp: Option<f64>,
    pub armor_type: Option<ArmorType>,
    pub armor_bonus: Option<i64>,
    pub max_dex_bonus: Option<i64>,
    pub armor_check_penalty: Option<i32>,
    pub spell_failure_chance: Option<i32>,
    #[serde(default)]
    pub is_masterwork: bool,
    #[serde(default)]
    pub enchantment_bonus: i64,
}

/// `levels` 以職業名稱為鍵，例如 `{ Wizard = 3 }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRecord {
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub school: MagicSchool,
    pub subschool: Option<String>,
    #[serde(default)]
    pub descriptors: Vec<String>,
    pub casting_time: String,
    pub range: String,
    pub target: Option<String>,
    pub effect: Option<String>,
    pub area: Option<String>,
    pub duration: Option<String>,
    pub saving_throw: Option<String>,
    #[serde(default)]
    pub spell_resistance: bool,
    #[serde(default)]
    pub components: Vec<SpellComponent>,
    #[serde(default)]
    pub levels: BTreeMap<String, i64>,
    pub source: Option<String>,
}

// ============================================================================
// 角色紀錄 (Character Record)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScoreRecord {
    pub ability: Ability,
    #[serde(default = "default_score_value")]
    pub value: i32,
    #[serde(default)]
    pub bonus: i32,
}

fn default_score_value() -> i32 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevelRecord {
    pub class: String,
    #[serde(default = "default_level")]
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFeatRecord {
    pub feat: String,
    #[serde(default = "default_level")]
    pub level_acquired: i64,
}

fn default_level() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterLanguageRecord {
    pub language: String,
    #[serde(default)]
    pub is_automatic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkillRecord {
    pub skill: String,
    #[serde(default)]
    pub ranks: i32,
    #[serde(default)]
    pub misc_bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemRecord {
    pub item: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub name: String,
    #[serde(default)]
    pub capacity: f64,
    #[serde(default)]
    pub items: Vec<InventoryItemRecord>,
}

/// 儲存的角色紀錄，參考資料以名稱引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    #[serde(default = "default_character_level")]
    pub level: i32,
    #[serde(default)]
    pub experience: i32,
    #[serde(default)]
    pub current_hit_points: i32,
    #[serde(default)]
    pub max_hit_points: i32,
    pub race: String,
    pub alignment: String,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub spell_resistance: i32,
    #[serde(default)]
    pub fortitude_save_bonus: i32,
    #[serde(default)]
    pub reflex_save_bonus: i32,
    #[serde(default)]
    pub will_save_bonus: i32,
    #[serde(default)]
    pub initiative_bonus: i32,
    #[serde(default = "default_speed")]
    pub speed: i32,
    #[serde(default = "default_armor_class")]
    pub armor_class: i32,
    #[serde(default)]
    pub ability_scores: Vec<AbilityScoreRecord>,
    #[serde(default)]
    pub classes: Vec<ClassLevelRecord>,
    #[serde(default)]
    pub feats: Vec<CharacterFeatRecord>,
    #[serde(default)]
    pub languages: Vec<CharacterLanguageRecord>,
    #[serde(default)]
    pub skills: Vec<CharacterSkillRecord>,
    #[serde(default)]
    pub inventories: Vec<InventoryRecord>,
    /// 穿著的護甲名稱
    pub armor: Option<String>,
}

fn default_character_level() -> i32 {
    1
}

fn default_speed() -> i32 {
    30
}

fn default_armor_class() -> i32 {
    10
}
