//! 職業系統
//!
//! 職業是參考資料，角色操作不會修改它

use crate::abilities::Ability;
use crate::error::LoadError;
use crate::progression::{BabProgression, BsbProgression};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 職業等級上限的預設值
pub const DEFAULT_MAX_CLASS_LEVEL: u32 = 20;

/// 生命骰
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitDie {
    D4,
    D6,
    D8,
    D10,
    D12,
}

impl HitDie {
    pub fn sides(&self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
        }
    }
}

impl FromStr for HitDie {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d4" => Ok(Self::D4),
            "d6" => Ok(Self::D6),
            "d8" => Ok(Self::D8),
            "d10" => Ok(Self::D10),
            "d12" => Ok(Self::D12),
            other => Err(LoadError::ParseError(format!("無效的生命骰: {}", other))),
        }
    }
}

/// 角色職業，例如 Fighter、Wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub name: String,
    pub description: Option<String>,
    pub max_level: u32,
    pub link: Option<String>,
    pub skill_points_per_level: u32,
    pub hit_die: HitDie,
    pub bab_progression: BabProgression,
    pub bsb_progressions: Vec<BsbProgression>,
    pub class_skills: Vec<String>,
    pub bonus_languages: Vec<String>,
}

impl CharacterClass {
    /// 取得影響指定屬性的豁免成長；沒有的職業對該豁免貢獻 0
    pub fn bsb_for(&self, ability: Ability) -> Option<&BsbProgression> {
        self.bsb_progressions
            .iter()
            .find(|progression| progression.ability == ability)
    }

    /// 職業技能可投入的最大等級數
    pub fn max_class_skill_ranks(&self) -> u32 {
        self.max_level + 3
    }

    pub fn is_class_skill(&self, skill_name: &str) -> bool {
        self.class_skills.iter().any(|name| name == skill_name)
    }
}
