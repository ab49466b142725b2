//! d20 角色資料核心函式庫
//!
//! 此函式庫包含：
//! - 參考資料模型（職業、種族、技能、物品、護甲、法術、成長表）
//! - 角色快照與衍生數值計算（豁免、多重攻擊、先攻、語言、技能）
//! - TOML 資料檔載入與角色紀錄組裝

pub mod abilities;
pub mod character;
pub mod classes;
pub mod equipment;
pub mod error;
pub mod format;
pub mod loader;
pub mod loader_schema;
pub mod progression;
pub mod race;
pub mod skills;
pub mod spells;
pub mod stats;
pub mod validators;

// 重新導出常用類型
pub use abilities::{modifier, Ability, AbilityScore, AbilityScores};
pub use character::{Character, CharacterFeat, CharacterLanguage, ClassLevel};
pub use classes::{CharacterClass, HitDie};
pub use equipment::{Armor, ArmorType};
pub use error::{Error, ErrorKind, Result};
pub use format::multiattack;
pub use loader::{load_from_path, load_from_toml, Compendium, DataFile};
pub use progression::{BabProgression, BsbProgression, LevelTable};
pub use race::Race;
pub use spells::{MagicSchool, Spell};
pub use stats::{CharacterSheet, DerivedStats, SaveType};
