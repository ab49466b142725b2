//! 角色衍生數值計算
//!
//! 純函數：輸入角色快照，輸出豁免、多重攻擊、先攻、語言等數值。
//! 不做快取，每次讀取都重新計算。

use crate::abilities::{self, Ability};
use crate::character::Character;
use crate::error::{CharacterError, Context, OutputError, Result};
use crate::format::{self, gold_k_notation};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 豁免類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum SaveType {
    /// 強韌
    Fortitude,
    /// 反射
    Reflex,
    /// 意志
    Will,
}

/// 豁免 ↔ 關鍵屬性對照表
pub const SAVE_ABILITIES: [(SaveType, Ability); 3] = [
    (SaveType::Fortitude, Ability::Constitution),
    (SaveType::Reflex, Ability::Dexterity),
    (SaveType::Will, Ability::Wisdom),
];

impl SaveType {
    pub fn ability(self) -> Ability {
        // 表格順序與 enum 宣告順序一致
        SAVE_ABILITIES[self as usize].1
    }

    pub fn for_ability(ability: Ability) -> Option<SaveType> {
        SAVE_ABILITIES
            .iter()
            .find(|(_, key_ability)| *key_ability == ability)
            .map(|(save, _)| *save)
    }
}

// ============================================================================
// 單項計算
// ============================================================================

/// 屬性調整值，見 [`abilities::modifier`]
pub fn modifier(value: i32, bonus: i32) -> i32 {
    abilities::modifier(value, bonus)
}

/// 指定屬性對應的豁免總加值（含固定加值）
///
/// 只接受有對應豁免的屬性（體質、敏捷、睿智）
pub fn save_bonus(character: &Character, ability: Ability) -> Result<i32> {
    let save = SaveType::for_ability(ability).ok_or(CharacterError::NoSaveForAbility { ability })?;
    character.saving_throw(save)
}

pub fn multiattack(total_bab: i32) -> String {
    format::multiattack(total_bab)
}

pub fn known_languages(character: &Character) -> String {
    character.list_of_languages()
}

pub fn initiative(character: &Character) -> Result<i32> {
    character.initiative()
}

// ============================================================================
// 整體計算
// ============================================================================

/// 技能總加值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTotal {
    pub name: String,
    pub ability: Ability,
    pub ranks: i32,
    pub total_bonus: i32,
}

/// 背包統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub name: String,
    pub total_weight: f64,
    pub total_value: f64,
    pub total_value_display: String,
    pub available_capacity: f64,
}

/// 角色的所有衍生數值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub class_levels: u32,
    pub fortitude_save: i32,
    pub reflex_save: i32,
    pub will_save: i32,
    pub multiattack_bab: String,
    pub initiative: i32,
    /// 穿著護甲後的速度
    pub modified_speed: i32,
    pub list_of_languages: String,
    /// 依技能名稱排序
    pub skills: Vec<SkillTotal>,
    /// 依背包名稱排序
    pub inventories: Vec<InventorySummary>,
}

impl DerivedStats {
    pub fn compute(character: &Character) -> Result<Self> {
        let context = || format!("計算角色 {} 的衍生數值", character.name);

        let fortitude_save = character.fortitude_save().context(context())?;
        let reflex_save = character.reflex_save().context(context())?;
        let will_save = character.will_save().context(context())?;
        let multiattack_bab = character.multiattack_bab().context(context())?;
        let initiative = character.initiative().context(context())?;

        let mut skills = character
            .skills
            .iter()
            .map(|character_skill| -> Result<SkillTotal> {
                Ok(SkillTotal {
                    name: character_skill.skill.name.clone(),
                    ability: character_skill.skill.ability,
                    ranks: character_skill.ranks,
                    total_bonus: character_skill.total_bonus(&character.ability_scores)?,
                })
            })
            .collect::<Result<Vec<_>>>()
            .context(context())?;
        skills.sort_by(|a, b| a.name.cmp(&b.name));

        let mut inventories: Vec<InventorySummary> = character
            .inventories
            .iter()
            .map(|inventory| InventorySummary {
                name: inventory.name.clone(),
                total_weight: inventory.total_weight(),
                total_value: inventory.total_value(),
                total_value_display: gold_k_notation(inventory.total_value()),
                available_capacity: inventory.available_capacity(),
            })
            .collect();
        inventories.sort_by(|a, b| a.name.cmp(&b.name));

        let stats = Self {
            class_levels: character.class_levels_total(),
            fortitude_save,
            reflex_save,
            will_save,
            multiattack_bab,
            initiative,
            modified_speed: character.modified_speed(),
            list_of_languages: character.list_of_languages(),
            skills,
            inventories,
        };

        tracing::debug!(character = %character.name, ?stats, "derived stats computed");
        Ok(stats)
    }

    pub fn saving_throw(&self, save: SaveType) -> i32 {
        match save {
            SaveType::Fortitude => self.fortitude_save,
            SaveType::Reflex => self.reflex_save,
            SaveType::Will => self.will_save,
        }
    }
}

// ============================================================================
// 角色表
// ============================================================================

/// 儲存欄位 + 唯讀的計算欄位，供 JSON / 文字報表輸出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSheet<'a> {
    pub name: &'a str,
    pub race: &'a str,
    pub alignment: &'a str,
    pub level: i32,
    pub experience: i32,
    pub current_hit_points: i32,
    pub max_hit_points: i32,
    pub armor_class: i32,
    pub speed: i32,
    pub spell_resistance: i32,
    pub classes: Vec<(&'a str, u32)>,
    pub ability_scores: Vec<AbilityLine>,
    pub feats: Vec<&'a str>,
    #[serde(flatten)]
    pub derived: DerivedStats,
}

/// 屬性值一行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityLine {
    pub ability: Ability,
    pub value: i32,
    pub bonus: i32,
    pub modifier: i32,
}

impl<'a> CharacterSheet<'a> {
    pub fn new(character: &'a Character) -> Result<Self> {
        let derived = DerivedStats::compute(character)?;

        Ok(Self {
            name: &character.name,
            race: &character.race.name,
            alignment: &character.alignment,
            level: character.level,
            experience: character.experience,
            current_hit_points: character.current_hit_points,
            max_hit_points: character.max_hit_points,
            armor_class: character.armor_class,
            speed: character.speed,
            spell_resistance: character.spell_resistance,
            classes: character
                .class_levels
                .iter()
                .map(|class_level| (class_level.class.name.as_str(), class_level.level))
                .collect(),
            ability_scores: character
                .ability_scores
                .iter()
                .map(|(ability, score)| AbilityLine {
                    ability,
                    value: score.value,
                    bonus: score.bonus,
                    modifier: score.modifier(),
                })
                .collect(),
            feats: character.feats.iter().map(|feat| feat.name.as_str()).collect(),
            derived,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            OutputError::SerializeError {
                format: "JSON".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
