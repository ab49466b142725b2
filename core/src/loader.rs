//! 資料載入器
//!
//! 從 TOML 資料檔建立參考資料庫（[`Compendium`]），
//! 並把儲存的角色紀錄組裝成計算用的 [`Character`] 快照

use crate::abilities::{AbilityScore, AbilityScores};
use crate::character::{Character, CharacterFeat, CharacterLanguage, ClassLevel};
use crate::classes::{CharacterClass, HitDie};
use crate::equipment::{Armor, Inventory, InventoryItem, Item};
use crate::error::{CharacterError, Context, Error, LoadError, Result, ValidationError};
use crate::loader_schema::{
    ArmorRecord, CharacterRecord, ClassRecord, DataFileSchema, FeatRecord, LanguageRecord,
    RaceRecord, SourceRecord, SpellRecord,
};
use crate::progression::{BabProgression, BsbProgression, LevelTable};
use crate::race::{Race, RaceLanguage, Size};
use crate::skills::{CharacterSkill, Skill};
use crate::spells::{Spell, SpellLevel, MAX_SPELL_LEVEL};
use crate::validators::{validate_count, validate_in_range, validate_year};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// 種族等級調整上限
const MAX_LEVEL_ADJUSTMENT: i64 = 10;

/// 以名稱索引的參考資料
#[derive(Debug, Clone, Default)]
pub struct Compendium {
    pub sources: BTreeMap<String, SourceRecord>,
    pub languages: BTreeMap<String, LanguageRecord>,
    pub skills: BTreeMap<String, Skill>,
    pub feats: BTreeMap<String, FeatRecord>,
    pub sizes: BTreeMap<String, Size>,
    pub bab_progressions: BTreeMap<String, BabProgression>,
    pub bsb_progressions: BTreeMap<String, BsbProgression>,
    pub classes: BTreeMap<String, CharacterClass>,
    pub races: BTreeMap<String, Race>,
    /// 包含護甲
    pub items: BTreeMap<String, Item>,
    pub armors: BTreeMap<String, Armor>,
    pub spells: BTreeMap<String, Spell>,
}

/// 載入結果：參考資料 + 尚未組裝的角色紀錄
#[derive(Debug, Clone, Default)]
pub struct DataFile {
    pub compendium: Compendium,
    pub characters: Vec<CharacterRecord>,
}

impl DataFile {
    pub fn find_character(&self, name: &str) -> Option<&CharacterRecord> {
        self.characters.iter().find(|record| record.name == name)
    }

    /// 組裝所有角色，遇到第一個錯誤即停止
    pub fn resolve_all(&self) -> Result<Vec<Character>> {
        self.characters
            .iter()
            .map(|record| self.compendium.resolve(record))
            .collect()
    }
}

/// 從檔案載入
pub fn load_from_path(path: &Path) -> Result<DataFile> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_from_toml(&content).context(format!("載入資料檔 {}", path.display()))
}

/// 從 TOML 字串載入
pub fn load_from_toml(content: &str) -> Result<DataFile> {
    let schema: DataFileSchema =
        toml::from_str(content).map_err(|e| LoadError::DeserializeError {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })?;

    let characters = schema.characters.clone();
    let compendium = Compendium::build(schema)?;

    tracing::debug!(
        classes = compendium.classes.len(),
        races = compendium.races.len(),
        characters = characters.len(),
        "data file loaded"
    );

    Ok(DataFile {
        compendium,
        characters,
    })
}

impl Compendium {
    /// 依照相依順序建立：出處、語言、技能、專長、體型 → 成長表 → 職業、種族、物品、護甲 → 法術
    pub fn build(schema: DataFileSchema) -> Result<Self> {
        let mut compendium = Self::default();

        for source in schema.sources {
            if let Some(year) = source.year {
                validate_year(year).map_err(Error::from).context(format!("出處 {}", source.name))?;
            }
            insert_unique(&mut compendium.sources, "出處", source.name.clone(), source)?;
        }

        for language in schema.languages {
            insert_unique(&mut compendium.languages, "語言", language.name.clone(), language)?;
        }

        for record in schema.skills {
            let skill = Skill {
                name: record.name,
                ability: record.ability,
                trained_only: record.trained_only,
                armor_check_penalty: record.armor_check_penalty,
            };
            insert_unique(&mut compendium.skills, "技能", skill.name.clone(), skill)?;
        }

        for feat in schema.feats {
            insert_unique(&mut compendium.feats, "專長", feat.name.clone(), feat)?;
        }

        for record in schema.sizes {
            let size = Size {
                name: record.name,
                size_modifier: record.size_modifier,
                grapple_modifier: record.grapple_modifier,
                height_or_length: record.height_or_length,
                weight: record.weight,
                space_ft: record.space_ft,
                natural_reach_tall_ft: record.natural_reach_tall_ft,
                natural_reach_long_ft: record.natural_reach_long_ft,
            };
            insert_unique(&mut compendium.sizes, "體型", size.name.clone(), size)?;
        }

        for record in schema.bab_progressions {
            let progression = BabProgression {
                attack_bonus_table: parse_level_table(&record.name, &record.attack_bonus_table)?,
                name: record.name,
            };
            insert_unique(
                &mut compendium.bab_progressions,
                "BAB 成長表",
                progression.name.clone(),
                progression,
            )?;
        }

        for record in schema.bsb_progressions {
            let progression = BsbProgression {
                save_bonus_table: parse_level_table(&record.name, &record.save_bonus_table)?,
                ability: record.ability,
                name: record.name,
            };
            insert_unique(
                &mut compendium.bsb_progressions,
                "BSB 成長表",
                progression.name.clone(),
                progression,
            )?;
        }

        for record in schema.classes {
            let name = record.name.clone();
            let class = compendium
                .build_class(record)
                .context(format!("建立職業 {}", name))?;
            insert_unique(&mut compendium.classes, "職業", name, class)?;
        }

        for record in schema.races {
            let name = record.name.clone();
            let race = compendium
                .build_race(record)
                .context(format!("建立種族 {}", name))?;
            insert_unique(&mut compendium.races, "種族", name, race)?;
        }

        for record in schema.items {
            let item = Item {
                name: record.name,
                description: record.description,
                weight_in_lb: record.weight_in_lb,
                price_in_gp: record.price_in_gp,
            };
            insert_unique(&mut compendium.items, "物品", item.name.clone(), item)?;
        }

        for record in schema.armors {
            let name = record.name.clone();
            let armor = build_armor(record).context(format!("建立護甲 {}", name))?;
            insert_unique(&mut compendium.items, "物品", name.clone(), armor.item.clone())?;
            insert_unique(&mut compendium.armors, "護甲", name, armor)?;
        }

        for record in schema.spells {
            let name = record.name.clone();
            let spell = compendium
                .build_spell(record)
                .context(format!("建立法術 {}", name))?;
            insert_unique(&mut compendium.spells, "法術", name, spell)?;
        }

        Ok(compendium)
    }

    /// 指定職業的法術列表，依法術等級、名稱排序
    pub fn spells_for_class(&self, class: &str) -> Vec<(SpellLevel, &Spell)> {
        let mut spells: Vec<(SpellLevel, &Spell)> = self
            .spells
            .values()
            .filter_map(|spell| spell.level_for_class(class).map(|level| (level, spell)))
            .collect();
        spells.sort_by(|(level_a, spell_a), (level_b, spell_b)| {
            level_a.cmp(level_b).then_with(|| spell_a.name.cmp(&spell_b.name))
        });
        spells
    }

    fn build_class(&self, record: ClassRecord) -> Result<CharacterClass> {
        validate_in_range(
            "max_level",
            record.max_level,
            1,
            i64::from(crate::classes::DEFAULT_MAX_CLASS_LEVEL),
        )?;
        let max_level = validate_count("max_level", record.max_level)?;
        let skill_points_per_level =
            validate_count("skill_points_per_level", record.skill_points_per_level)?;
        if let Some(source) = &record.source {
            lookup_reference(&self.sources, "出處", source)?;
        }

        let hit_die: HitDie = record.hit_die.parse()?;
        let bab_progression =
            lookup_reference(&self.bab_progressions, "BAB 成長表", &record.bab_progression)?.clone();
        let bsb_progressions = record
            .bsb_progressions
            .iter()
            .map(|name| lookup_reference(&self.bsb_progressions, "BSB 成長表", name).cloned())
            .collect::<Result<Vec<_>>>()?;
        for skill in &record.class_skills {
            lookup_reference(&self.skills, "技能", skill)?;
        }
        for language in &record.bonus_languages {
            lookup_reference(&self.languages, "語言", language)?;
        }

        Ok(CharacterClass {
            name: record.name,
            description: record.description,
            max_level,
            link: record.link,
            skill_points_per_level,
            hit_die,
            bab_progression,
            bsb_progressions,
            class_skills: record.class_skills,
            bonus_languages: record.bonus_languages,
        })
    }

    fn build_race(&self, record: RaceRecord) -> Result<Race> {
        validate_in_range(
            "level_adjustment",
            record.level_adjustment,
            0,
            MAX_LEVEL_ADJUSTMENT,
        )?;
        let level_adjustment = validate_count("level_adjustment", record.level_adjustment)?;
        if let Some(source) = &record.source {
            lookup_reference(&self.sources, "出處", source)?;
        }

        let size = lookup_reference(&self.sizes, "體型", &record.size)?.clone();
        let languages = record
            .languages
            .into_iter()
            .map(|race_language| -> Result<RaceLanguage> {
                lookup_reference(&self.languages, "語言", &race_language.language)?;
                Ok(RaceLanguage {
                    language: race_language.language,
                    is_automatic: race_language.is_automatic,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        for class in &record.favored_classes {
            lookup_reference(&self.classes, "職業", class)?;
        }

        Ok(Race {
            name: record.name,
            description: record.description,
            level_adjustment,
            size,
            languages,
            ability_adjustments: record.ability_adjustments,
            favored_classes: record.favored_classes,
        })
    }

    fn build_spell(&self, record: SpellRecord) -> Result<Spell> {
        if let Some(source) = &record.source {
            lookup_reference(&self.sources, "出處", source)?;
        }

        let class_levels = record
            .levels
            .into_iter()
            .map(|(class, level)| -> Result<(String, SpellLevel)> {
                lookup_reference(&self.classes, "職業", &class)?;
                let spell_level = SpellLevel::try_from(level)
                    .ok()
                    .filter(|spell_level| *spell_level <= MAX_SPELL_LEVEL)
                    .ok_or_else(|| ValidationError::OutOfRange {
                        field: "spell level".to_string(),
                        value: level,
                        min: 0,
                        max: i64::from(MAX_SPELL_LEVEL),
                    })?;
                Ok((class, spell_level))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Spell {
            name: record.name,
            description: record.description,
            link: record.link,
            school: record.school,
            subschool: record.subschool,
            descriptors: record.descriptors,
            casting_time: record.casting_time,
            range: record.range,
            target: record.target,
            effect: record.effect,
            area: record.area,
            duration: record.duration,
            saving_throw: record.saving_throw,
            spell_resistance: record.spell_resistance,
            components: record.components,
            class_levels,
            source: record.source,
        })
    }

    /// 把角色紀錄組裝成快照
    ///
    /// 引用不存在的參考資料、屬性值重複、職業重複或職業等級超出範圍
    /// 都視為角色資料不一致，回傳錯誤而不是套用預設值
    pub fn resolve(&self, record: &CharacterRecord) -> Result<Character> {
        let context = || format!("組裝角色 {}", record.name);

        let race = lookup(&self.races, "種族", &record.race)
            .context(context())?
            .clone();

        let mut ability_scores = AbilityScores::new();
        for score in &record.ability_scores {
            ability_scores
                .insert(score.ability, AbilityScore::new(score.value, score.bonus))
                .map_err(|_| {
                    Error::from(CharacterError::DuplicateAbilityScore {
                        character: record.name.clone(),
                        ability: score.ability,
                    })
                })
                .context(context())?;
        }
        if !ability_scores.is_complete() {
            tracing::debug!(
                character = %record.name,
                scores = ability_scores.len(),
                "character is missing ability scores"
            );
        }

        let class_levels = self.resolve_class_levels(record).context(context())?;

        let mut feats = record
            .feats
            .iter()
            .map(|character_feat| -> Result<CharacterFeat> {
                lookup(&self.feats, "專長", &character_feat.feat)?;
                let level_acquired =
                    validate_count("level_acquired", character_feat.level_acquired)?;
                Ok(CharacterFeat {
                    name: character_feat.feat.clone(),
                    level_acquired,
                })
            })
            .collect::<Result<Vec<_>>>()
            .context(context())?;
        feats.sort_by_key(|feat| feat.level_acquired);

        let languages = record
            .languages
            .iter()
            .map(|learned| -> Result<CharacterLanguage> {
                lookup(&self.languages, "語言", &learned.language)?;
                Ok(CharacterLanguage {
                    language: learned.language.clone(),
                    is_automatic: learned.is_automatic,
                })
            })
            .collect::<Result<Vec<_>>>()
            .context(context())?;

        let skills = record
            .skills
            .iter()
            .map(|character_skill| -> Result<CharacterSkill> {
                let skill = lookup(&self.skills, "技能", &character_skill.skill)?;
                Ok(CharacterSkill {
                    skill: skill.clone(),
                    ranks: character_skill.ranks,
                    misc_bonus: character_skill.misc_bonus,
                })
            })
            .collect::<Result<Vec<_>>>()
            .context(context())?;

        let inventories = record
            .inventories
            .iter()
            .map(|inventory| -> Result<Inventory> {
                let items = inventory
                    .items
                    .iter()
                    .map(|stack| -> Result<InventoryItem> {
                        let item = lookup(&self.items, "物品", &stack.item)?;
                        let quantity = validate_count("quantity", stack.quantity)?;
                        Ok(InventoryItem {
                            item: item.clone(),
                            quantity,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Inventory {
                    name: inventory.name.clone(),
                    capacity: inventory.capacity,
                    items,
                })
            })
            .collect::<Result<Vec<_>>>()
            .context(context())?;

        let armor = record
            .armor
            .as_deref()
            .map(|name| lookup(&self.armors, "護甲", name).cloned())
            .transpose()
            .context(context())?;

        tracing::debug!(
            character = %record.name,
            classes = class_levels.len(),
            "character snapshot resolved"
        );

        Ok(Character {
            name: record.name.clone(),
            level: record.level,
            experience: record.experience,
            current_hit_points: record.current_hit_points,
            max_hit_points: record.max_hit_points,
            alignment: record.alignment.clone(),
            appearance: record.appearance.clone(),
            spell_resistance: record.spell_resistance,
            speed: record.speed,
            armor_class: record.armor_class,
            fortitude_save_bonus: record.fortitude_save_bonus,
            reflex_save_bonus: record.reflex_save_bonus,
            will_save_bonus: record.will_save_bonus,
            initiative_bonus: record.initiative_bonus,
            race,
            ability_scores,
            class_levels,
            feats,
            languages,
            skills,
            inventories,
            armor,
        })
    }

    fn resolve_class_levels(&self, record: &CharacterRecord) -> Result<Vec<ClassLevel>> {
        let mut seen = HashSet::new();
        let mut class_levels = Vec::with_capacity(record.classes.len());

        for class_level in &record.classes {
            if !seen.insert(class_level.class.as_str()) {
                return Err(CharacterError::DuplicateClass {
                    character: record.name.clone(),
                    class: class_level.class.clone(),
                }
                .into());
            }

            let class = lookup(&self.classes, "職業", &class_level.class)?;
            let level = u32::try_from(class_level.level)
                .ok()
                .filter(|level| (1..=class.max_level).contains(level))
                .ok_or_else(|| CharacterError::InvalidClassLevel {
                    character: record.name.clone(),
                    class: class.name.clone(),
                    level: u32::try_from(class_level.level.max(0)).unwrap_or(u32::MAX),
                    max_level: class.max_level,
                })?;

            class_levels.push(ClassLevel {
                class: class.clone(),
                level,
            });
        }

        Ok(class_levels)
    }
}

fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    kind: &'static str,
    name: String,
    value: T,
) -> Result<()> {
    if map.contains_key(&name) {
        return Err(LoadError::DuplicateName { kind, name }.into());
    }
    map.insert(name, value);
    Ok(())
}

/// 角色紀錄引用參考資料
fn lookup<'a, T>(map: &'a BTreeMap<String, T>, kind: &'static str, name: &str) -> Result<&'a T> {
    map.get(name).ok_or_else(|| {
        CharacterError::UnknownReference {
            kind,
            name: name.to_string(),
        }
        .into()
    })
}

/// 參考資料之間互相引用，找不到是資料檔本身的問題
fn lookup_reference<'a, T>(
    map: &'a BTreeMap<String, T>,
    kind: &'static str,
    name: &str,
) -> Result<&'a T> {
    map.get(name).ok_or_else(|| {
        LoadError::UnknownReference {
            kind,
            name: name.to_string(),
        }
        .into()
    })
}

fn build_armor(record: ArmorRecord) -> Result<Armor> {
    let armor_bonus = record
        .armor_bonus
        .map(|bonus| validate_count("armor_bonus", bonus))
        .transpose()?;
    let max_dex_bonus = record
        .max_dex_bonus
        .map(|bonus| validate_count("max_dex_bonus", bonus))
        .transpose()?;
    let enchantment_bonus = validate_count("enchantment_bonus", record.enchantment_bonus)?;

    Ok(Armor {
        item: Item {
            name: record.name,
            description: record.description,
            weight_in_lb: record.weight_in_lb,
            price_in_gp: record.price_in_gp,
        },
        armor_type: record.armor_type,
        armor_bonus,
        max_dex_bonus,
        armor_check_penalty: record.armor_check_penalty,
        spell_failure_chance: record.spell_failure_chance,
        is_masterwork: record.is_masterwork,
        enchantment_bonus,
    })
}

fn parse_level_table(name: &str, raw: &BTreeMap<String, i32>) -> Result<LevelTable> {
    raw.iter()
        .map(|(key, bonus)| -> Result<(u32, i32)> {
            let level = key.trim().parse::<u32>().map_err(|_| {
                LoadError::ParseError(format!("成長表 {} 的等級鍵無效: {}", name, key))
            })?;
            Ok((level, *bonus))
        })
        .collect()
}
