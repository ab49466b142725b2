//! 技能系統

use crate::abilities::{Ability, AbilityScores};
use crate::character::checked_total;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// 技能參考資料，例如 Climb、Hide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 關鍵屬性
    pub ability: Ability,
    pub trained_only: bool,
    pub armor_check_penalty: bool,
}

/// 角色投入的技能等級
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkill {
    pub skill: Skill,
    pub ranks: i32,
    pub misc_bonus: i32,
}

impl CharacterSkill {
    /// 技能總加值
    ///
    /// 公式：等級 + 其他加值 + 關鍵屬性調整值（角色沒有該屬性值時不計）
    pub fn total_bonus(&self, ability_scores: &AbilityScores) -> Result<i32> {
        let ability_modifier = ability_scores.modifier(self.skill.ability).unwrap_or(0);
        checked_total(&self.skill.name, [self.ranks, self.misc_bonus, ability_modifier])
    }
}
