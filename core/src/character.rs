//! 角色快照
//!
//! 讀取角色時，儲存的資料和關聯的參考資料一起組成唯讀快照，
//! 所有衍生數值都從快照即時計算，不另外保存

use crate::{
    abilities::{Ability, AbilityScores},
    classes::CharacterClass,
    equipment::{Armor, Inventory},
    error::{CharacterError, Result},
    format::multiattack,
    race::Race,
    skills::CharacterSkill,
    stats::SaveType,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 角色在某職業的等級（兼職時每個職業各一筆）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub class: CharacterClass,
    pub level: u32,
}

/// 角色擁有的專長
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFeat {
    pub name: String,
    pub level_acquired: u32,
}

/// 角色額外學會的語言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterLanguage {
    pub language: String,
    pub is_automatic: bool,
}

/// 外觀描述
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub skin_color: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
}

/// 角色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: i32,
    pub experience: i32,
    pub current_hit_points: i32,
    pub max_hit_points: i32,
    pub alignment: String,
    pub appearance: Appearance,
    pub spell_resistance: i32,
    pub speed: i32,
    pub armor_class: i32,

    /// 固定豁免加值
    pub fortitude_save_bonus: i32,
    pub reflex_save_bonus: i32,
    pub will_save_bonus: i32,
    /// 固定先攻加值
    pub initiative_bonus: i32,

    pub race: Race,
    pub ability_scores: AbilityScores,
    pub class_levels: Vec<ClassLevel>,
    pub feats: Vec<CharacterFeat>,
    /// 額外學會的語言（不含種族自動語言）
    pub languages: Vec<CharacterLanguage>,
    pub skills: Vec<CharacterSkill>,
    pub inventories: Vec<Inventory>,
    /// 穿著的護甲
    pub armor: Option<Armor>,
}

/// 逐項相加，溢位時回傳 `CharacterError::StatOverflow`
pub(crate) fn checked_total(stat: &str, terms: impl IntoIterator<Item = i32>) -> Result<i32> {
    terms
        .into_iter()
        .try_fold(0i32, |total, term| total.checked_add(term))
        .ok_or_else(|| {
            CharacterError::StatOverflow {
                stat: stat.to_string(),
            }
            .into()
        })
}

impl Character {
    /// 所有職業等級的總和
    pub fn class_levels_total(&self) -> u32 {
        self.class_levels.iter().map(|class_level| class_level.level).sum()
    }

    /// 指定屬性的豁免加值（不含固定加值）
    ///
    /// 各職業在該等級的 BSB + 該屬性調整值（角色沒有該屬性值時不計）
    pub fn save_for_ability(&self, ability: Ability) -> Result<i32> {
        let mut terms = Vec::with_capacity(self.class_levels.len() + 1);
        for class_level in &self.class_levels {
            if let Some(progression) = class_level.class.bsb_for(ability) {
                terms.push(progression.save_bonus_for_level(class_level.level)?);
            }
        }
        terms.push(self.ability_scores.modifier(ability).unwrap_or(0));

        checked_total(&format!("{} 豁免", ability), terms)
    }

    pub fn saving_throw(&self, save: SaveType) -> Result<i32> {
        let fixed_bonus = match save {
            SaveType::Fortitude => self.fortitude_save_bonus,
            SaveType::Reflex => self.reflex_save_bonus,
            SaveType::Will => self.will_save_bonus,
        };
        checked_total(
            &format!("{} 豁免", save),
            [self.save_for_ability(save.ability())?, fixed_bonus],
        )
    }

    pub fn fortitude_save(&self) -> Result<i32> {
        self.saving_throw(SaveType::Fortitude)
    }

    pub fn reflex_save(&self) -> Result<i32> {
        self.saving_throw(SaveType::Reflex)
    }

    pub fn will_save(&self) -> Result<i32> {
        self.saving_throw(SaveType::Will)
    }

    /// 各職業在該等級的 BAB 總和
    pub fn total_bab(&self) -> Result<i32> {
        let bonuses = self
            .class_levels
            .iter()
            .map(|class_level| {
                class_level
                    .class
                    .bab_progression
                    .attack_bonus_for_level(class_level.level)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        checked_total("BAB", bonuses)
    }

    /// 多重攻擊加值，例如 `+11/+6/+1`
    pub fn multiattack_bab(&self) -> Result<String> {
        Ok(multiattack(self.total_bab()?))
    }

    /// 先攻 = 固定加值 + 敏捷調整值
    ///
    /// 沒有敏捷屬性值時回傳 `CharacterError::MissingAbilityScore`
    pub fn initiative(&self) -> Result<i32> {
        let dexterity_modifier = self.ability_scores.modifier(Ability::Dexterity).ok_or_else(|| {
            CharacterError::MissingAbilityScore {
                character: self.name.clone(),
                ability: Ability::Dexterity,
            }
        })?;
        checked_total("先攻", [self.initiative_bonus, dexterity_modifier])
    }

    /// 穿著護甲後的速度；沒有穿護甲時為儲存的速度
    pub fn modified_speed(&self) -> i32 {
        self.armor
            .as_ref()
            .map_or(self.speed, |armor| armor.modified_speed(self.speed))
    }

    /// 角色會的語言：先列種族自動語言，再列額外學會的語言
    ///
    /// 不去除重複：同一語言同時出現在兩邊時會列兩次
    pub fn list_of_languages(&self) -> String {
        let all_languages: Vec<&str> = self
            .race
            .automatic_languages()
            .chain(self.languages.iter().map(|learned| learned.language.as_str()))
            .collect();

        let mut seen = HashSet::new();
        for language in &all_languages {
            if !seen.insert(*language) {
                tracing::warn!(
                    character = %self.name,
                    language,
                    "language listed more than once"
                );
            }
        }

        all_languages.join(", ")
    }

    /// 指定技能的總加值；角色沒有投入該技能時為 None
    pub fn skill_total(&self, skill_name: &str) -> Result<Option<i32>> {
        self.skills
            .iter()
            .find(|character_skill| character_skill.skill.name == skill_name)
            .map(|character_skill| character_skill.total_bonus(&self.ability_scores))
            .transpose()
    }

    pub fn has_feat(&self, feat_name: &str) -> bool {
        self.feats.iter().any(|feat| feat.name == feat_name)
    }
}
