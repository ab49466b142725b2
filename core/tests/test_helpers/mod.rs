//! 測試輔助：角色快照 builder
//!
//! 用少量參數組出測試角色，取代手寫完整的 Character 結構

#![allow(dead_code)]

use dnd_core::abilities::{Ability, AbilityScore, AbilityScores};
use dnd_core::character::{Appearance, Character, CharacterLanguage, ClassLevel};
use dnd_core::classes::{CharacterClass, HitDie};
use dnd_core::equipment::{Armor, ArmorType, Inventory, InventoryItem, Item};
use dnd_core::progression::{BabProgression, BsbProgression, LevelTable};
use dnd_core::race::{Race, RaceLanguage, Size};
use dnd_core::skills::{CharacterSkill, Skill};

/// 建立成長表：(等級, 加值)
pub fn level_table(entries: &[(u32, i32)]) -> LevelTable {
    entries.iter().copied().collect()
}

/// 1 ~ 20 級的完整 BAB 表（每級 +1）
pub fn full_bab() -> Vec<(u32, i32)> {
    (1..=20).map(|level| (level, level as i32)).collect()
}

/// 建立職業：BAB 表 + 每個屬性的 BSB 表
pub fn class(name: &str, bab: &[(u32, i32)], bsbs: &[(Ability, &[(u32, i32)])]) -> CharacterClass {
    CharacterClass {
        name: name.to_string(),
        description: None,
        max_level: 20,
        link: None,
        skill_points_per_level: 2,
        hit_die: HitDie::D8,
        bab_progression: BabProgression {
            name: format!("{} BAB", name),
            attack_bonus_table: level_table(bab),
        },
        bsb_progressions: bsbs
            .iter()
            .map(|(ability, table)| BsbProgression {
                name: format!("{} {}", name, ability),
                ability: *ability,
                save_bonus_table: level_table(table),
            })
            .collect(),
        class_skills: vec![],
        bonus_languages: vec![],
    }
}

pub fn medium() -> Size {
    Size {
        name: "Medium".to_string(),
        size_modifier: 0,
        grapple_modifier: 0,
        height_or_length: "4 ft.-8 ft.".to_string(),
        weight: "60 lb.-500 lb.".to_string(),
        space_ft: 5.0,
        natural_reach_tall_ft: 5,
        natural_reach_long_ft: 5,
    }
}

/// 建立種族：(語言, 是否自動習得)
pub fn race(name: &str, languages: &[(&str, bool)]) -> Race {
    Race {
        name: name.to_string(),
        description: None,
        level_adjustment: 0,
        size: medium(),
        languages: languages
            .iter()
            .map(|(language, is_automatic)| RaceLanguage {
                language: language.to_string(),
                is_automatic: *is_automatic,
            })
            .collect(),
        ability_adjustments: vec![],
        favored_classes: vec![],
    }
}

pub fn skill(name: &str, ability: Ability) -> Skill {
    Skill {
        name: name.to_string(),
        ability,
        trained_only: false,
        armor_check_penalty: false,
    }
}

pub struct CharacterBuilder {
    character: Character,
}

impl CharacterBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            character: Character {
                name: name.to_string(),
                level: 1,
                experience: 0,
                current_hit_points: 0,
                max_hit_points: 0,
                alignment: "True Neutral".to_string(),
                appearance: Appearance::default(),
                spell_resistance: 0,
                speed: 30,
                armor_class: 10,
                fortitude_save_bonus: 0,
                reflex_save_bonus: 0,
                will_save_bonus: 0,
                initiative_bonus: 0,
                race: race("Human", &[("Common", true)]),
                ability_scores: AbilityScores::new(),
                class_levels: vec![],
                feats: vec![],
                languages: vec![],
                skills: vec![],
                inventories: vec![],
                armor: None,
            },
        }
    }

    pub fn race(mut self, race: Race) -> Self {
        self.character.race = race;
        self
    }

    pub fn score(mut self, ability: Ability, value: i32, bonus: i32) -> Self {
        self.character
            .ability_scores
            .insert(ability, AbilityScore::new(value, bonus))
            .expect("重複的屬性值");
        self
    }

    /// 六項屬性全部 10
    pub fn average_scores(mut self) -> Self {
        for ability in [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ] {
            self = self.score(ability, 10, 0);
        }
        self
    }

    pub fn class_level(mut self, class: CharacterClass, level: u32) -> Self {
        self.character.class_levels.push(ClassLevel { class, level });
        self
    }

    pub fn learned_language(mut self, language: &str) -> Self {
        self.character.languages.push(CharacterLanguage {
            language: language.to_string(),
            is_automatic: false,
        });
        self
    }

    pub fn save_bonuses(mut self, fortitude: i32, reflex: i32, will: i32) -> Self {
        self.character.fortitude_save_bonus = fortitude;
        self.character.reflex_save_bonus = reflex;
        self.character.will_save_bonus = will;
        self
    }

    pub fn initiative_bonus(mut self, bonus: i32) -> Self {
        self.character.initiative_bonus = bonus;
        self
    }

    pub fn skill(mut self, skill: Skill, ranks: i32, misc_bonus: i32) -> Self {
        self.character.skills.push(CharacterSkill {
            skill,
            ranks,
            misc_bonus,
        });
        self
    }

    /// 背包：(物品名稱, 重量, 價格, 數量)
    pub fn inventory(mut self, name: &str, capacity: f64, items: &[(&str, f64, f64, u32)]) -> Self {
        self.character.inventories.push(Inventory {
            name: name.to_string(),
            capacity,
            items: items
                .iter()
                .map(|(item_name, weight, price, quantity)| InventoryItem {
                    item: Item {
                        weight_in_lb: Some(*weight),
                        price_in_gp: Some(*price),
                        ..Item::new(item_name.to_string())
                    },
                    quantity: *quantity,
                })
                .collect(),
        });
        self
    }

    pub fn speed(mut self, speed: i32) -> Self {
        self.character.speed = speed;
        self
    }

    pub fn armor(mut self, name: &str, armor_type: ArmorType) -> Self {
        self.character.armor = Some(Armor {
            item: Item::new(name.to_string()),
            armor_type: Some(armor_type),
            armor_bonus: None,
            max_dex_bonus: None,
            armor_check_penalty: None,
            spell_failure_chance: None,
            is_masterwork: false,
            enchantment_bonus: 0,
        });
        self
    }

    pub fn build(self) -> Character {
        self.character
    }
}
