use dnd_core::error::{CharacterError, ErrorKind, LoadError, ValidationError};
use dnd_core::loader::load_from_toml;
use dnd_core::{ArmorType, DerivedStats, MagicSchool};

const SAMPLE_DATA: &str = include_str!("../../data/compendium.toml");

/// 最小參考資料：一個職業、一個種族
const MINIMAL_REFERENCE: &str = r#"
[[languages]]
name = "Common"

[[languages]]
name = "Elvish"

[[sizes]]
name = "Medium"
space_ft = 5.0

[[bab_progressions]]
name = "Good"
attack_bonus_table = { "1" = 1, "2" = 2 }

[[bsb_progressions]]
name = "Good Fortitude"
ability = "Constitution"
save_bonus_table = { "1" = 2, "2" = 3 }

[[classes]]
name = "Fighter"
hit_die = "d10"
max_level = 2
bab_progression = "Good"
bsb_progressions = ["Good Fortitude"]

[[races]]
name = "Human"
languages = [{ language = "Common", is_automatic = true }]

[[feats]]
name = "Alertness"

[[items]]
name = "Torch"
weight_in_lb = 1.0
"#;

fn with_character(character: &str) -> String {
    format!("{}\n{}", MINIMAL_REFERENCE, character)
}

#[test]
fn test_sample_data_loads() {
    let data = load_from_toml(SAMPLE_DATA).unwrap();

    assert_eq!(data.compendium.classes.len(), 4);
    assert_eq!(data.compendium.races.len(), 4);
    assert_eq!(data.characters.len(), 2);
    assert_eq!(
        data.compendium.bab_progressions["Average"].to_string(),
        "BAB (Average) (0/1/2/3/3/4)"
    );
    assert_eq!(data.compendium.classes["Rogue"].max_class_skill_ranks(), 23);
    assert_eq!(data.compendium.races["Halfling"].size.hide_modifier(), 4);

    let characters = data.resolve_all().unwrap();
    assert_eq!(characters.len(), 2);
}

#[test]
fn test_sample_character_stats() {
    let data = load_from_toml(SAMPLE_DATA).unwrap();

    // 測試資料結構：(角色, 強韌, 反射, 意志, 多重攻擊, 先攻, 語言)
    let test_data = [
        ("Lidda", 6, 8, 1, "+4", 8, "Common, Halfling, Elvish"),
        ("Tordek", 7, 2, 2, "+4", 1, "Common, Dwarvish"),
    ];

    for (name, fortitude, reflex, will, multiattack, initiative, languages) in test_data {
        let record = data.find_character(name).unwrap();
        let character = data.compendium.resolve(record).unwrap();
        let stats = DerivedStats::compute(&character).unwrap();

        assert_eq!(stats.fortitude_save, fortitude, "{} fortitude", name);
        assert_eq!(stats.reflex_save, reflex, "{} reflex", name);
        assert_eq!(stats.will_save, will, "{} will", name);
        assert_eq!(stats.multiattack_bab, multiattack, "{} multiattack", name);
        assert_eq!(stats.initiative, initiative, "{} initiative", name);
        assert_eq!(stats.list_of_languages, languages, "{} languages", name);
    }
}

#[test]
fn test_sample_skills_and_inventory() {
    let data = load_from_toml(SAMPLE_DATA).unwrap();
    let lidda = data
        .compendium
        .resolve(data.find_character("Lidda").unwrap())
        .unwrap();

    assert_eq!(lidda.class_levels_total(), 5);
    assert_eq!(lidda.skill_total("Hide").unwrap(), Some(14));
    assert_eq!(lidda.skill_total("Search").unwrap(), Some(7));
    assert_eq!(lidda.skill_total("Disable Device").unwrap(), Some(9));
    assert_eq!(
        lidda.feats.iter().map(|feat| feat.name.as_str()).collect::<Vec<_>>(),
        vec!["Improved Initiative", "Weapon Finesse"]
    );

    let backpack = &lidda.inventories[0];
    assert_eq!(backpack.total_weight(), 13.0);
    assert!((backpack.total_value() - 12.53).abs() < 1e-9);
    assert_eq!(backpack.available_capacity(), 17.0);
    assert_eq!(lidda.appearance.age, Some(24));
}

#[test]
fn test_resolve_errors() {
    // 測試資料結構：(說明, 角色 TOML, 檢查錯誤種類)
    let test_data: Vec<(&str, &str, fn(&ErrorKind) -> bool)> = vec![
        (
            "未知職業",
            r#"
            [[characters]]
            name = "A"
            race = "Human"
            alignment = "Neutral"
            classes = [{ class = "Bard", level = 1 }]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::UnknownReference { kind: "職業", .. })
                )
            },
        ),
        (
            "未知種族",
            r#"
            [[characters]]
            name = "B"
            race = "Elf"
            alignment = "Neutral"
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::UnknownReference { kind: "種族", .. })
                )
            },
        ),
        (
            "屬性值重複",
            r#"
            [[characters]]
            name = "C"
            race = "Human"
            alignment = "Neutral"
            ability_scores = [
                { ability = "Dexterity", value = 12 },
                { ability = "Dexterity", value = 14 },
            ]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::DuplicateAbilityScore { .. })
                )
            },
        ),
        (
            "職業重複",
            r#"
            [[characters]]
            name = "D"
            race = "Human"
            alignment = "Neutral"
            classes = [{ class = "Fighter", level = 1 }, { class = "Fighter", level = 2 }]
            "#,
            |kind| matches!(kind, ErrorKind::Character(CharacterError::DuplicateClass { .. })),
        ),
        (
            "職業等級超過上限",
            r#"
            [[characters]]
            name = "E"
            race = "Human"
            alignment = "Neutral"
            classes = [{ class = "Fighter", level = 3 }]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::InvalidClassLevel {
                        level: 3,
                        max_level: 2,
                        ..
                    })
                )
            },
        ),
        (
            "職業等級為 0",
            r#"
            [[characters]]
            name = "F"
            race = "Human"
            alignment = "Neutral"
            classes = [{ class = "Fighter", level = 0 }]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::InvalidClassLevel { level: 0, .. })
                )
            },
        ),
        (
            "物品數量超過 u32",
            r#"
            [[characters]]
            name = "H"
            race = "Human"
            alignment = "Neutral"

            [[characters.inventories]]
            name = "Sack"
            items = [{ item = "Torch", quantity = 4294967297 }]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Validation(ValidationError::OutOfRange {
                        value: 4_294_967_297,
                        max: 4_294_967_295,
                        ..
                    })
                )
            },
        ),
        (
            "專長取得等級超過 u32",
            r#"
            [[characters]]
            name = "I"
            race = "Human"
            alignment = "Neutral"
            feats = [{ feat = "Alertness", level_acquired = 4294967296 }]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Validation(ValidationError::OutOfRange { .. })
                )
            },
        ),
        (
            "職業等級超過 u32",
            r#"
            [[characters]]
            name = "J"
            race = "Human"
            alignment = "Neutral"
            classes = [{ class = "Fighter", level = 4294967297 }]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::InvalidClassLevel { max_level: 2, .. })
                )
            },
        ),
        (
            "未知護甲",
            r#"
            [[characters]]
            name = "K"
            race = "Human"
            alignment = "Neutral"
            armor = "Mithral Shirt"
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::UnknownReference { kind: "護甲", .. })
                )
            },
        ),
        (
            "未知語言",
            r#"
            [[characters]]
            name = "G"
            race = "Human"
            alignment = "Neutral"
            languages = [{ language = "Abyssal" }]
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Character(CharacterError::UnknownReference { kind: "語言", .. })
                )
            },
        ),
    ];

    for (description, character, check) in test_data {
        let data = load_from_toml(&with_character(character)).unwrap();
        let err = data.compendium.resolve(&data.characters[0]).unwrap_err();
        assert!(check(err.kind()), "{}: {}", description, err);
        assert!(err.to_string().contains("組裝角色"), "{}", description);
    }
}

#[test]
fn test_resolved_character_without_dexterity_fails_initiative() {
    let data = load_from_toml(&with_character(
        r#"
        [[characters]]
        name = "Statue"
        race = "Human"
        alignment = "Neutral"
        ability_scores = [{ ability = "Strength", value = 18 }]
        classes = [{ class = "Fighter", level = 2 }]
        languages = [{ language = "Elvish" }]
        "#,
    ))
    .unwrap();
    let character = data.compendium.resolve(&data.characters[0]).unwrap();

    assert_eq!(character.fortitude_save().unwrap(), 3);
    assert_eq!(character.multiattack_bab().unwrap(), "+2");
    assert_eq!(character.list_of_languages(), "Common, Elvish");
    assert!(DerivedStats::compute(&character).is_err());
}

#[test]
fn test_reference_data_errors() {
    // 測試資料結構：(說明, 參考資料 TOML, 檢查錯誤種類)
    let test_data: Vec<(&str, &str, fn(&ErrorKind) -> bool)> = vec![
        (
            "職業等級上限超過 20",
            r#"
            [[bab_progressions]]
            name = "Good"
            attack_bonus_table = { "1" = 1 }

            [[classes]]
            name = "Epic"
            hit_die = "d12"
            max_level = 30
            bab_progression = "Good"
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Validation(ValidationError::OutOfRange { max: 20, .. })
                )
            },
        ),
        (
            "職業引用不存在的 BAB",
            r#"
            [[classes]]
            name = "Fighter"
            hit_die = "d10"
            bab_progression = "Missing"
            "#,
            |kind| matches!(kind, ErrorKind::Load(LoadError::UnknownReference { .. })),
        ),
        (
            "種族引用不存在的體型",
            r#"
            [[races]]
            name = "Giant"
            size = "Huge"
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Load(LoadError::UnknownReference { kind: "體型", .. })
                )
            },
        ),
        (
            "每級技能點數超過 u32",
            r#"
            [[bab_progressions]]
            name = "Good"
            attack_bonus_table = { "1" = 1 }

            [[classes]]
            name = "Savant"
            hit_die = "d6"
            skill_points_per_level = 4294967297
            bab_progression = "Good"
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Validation(ValidationError::OutOfRange {
                        value: 4_294_967_297,
                        ..
                    })
                )
            },
        ),
        (
            "護甲加值為負數",
            r#"
            [[armors]]
            name = "Cursed Mail"
            armor_type = "Medium"
            armor_bonus = -2
            "#,
            |kind| matches!(kind, ErrorKind::Validation(ValidationError::Negative { .. })),
        ),
        (
            "護甲與物品名稱重複",
            r#"
            [[items]]
            name = "Chain Shirt"

            [[armors]]
            name = "Chain Shirt"
            armor_type = "Light"
            "#,
            |kind| matches!(kind, ErrorKind::Load(LoadError::DuplicateName { .. })),
        ),
        (
            "法術等級超過 9",
            r#"
            [[bab_progressions]]
            name = "Poor"
            attack_bonus_table = { "1" = 0 }

            [[classes]]
            name = "Wizard"
            hit_die = "d4"
            bab_progression = "Poor"

            [[spells]]
            name = "Wish"
            school = "Universal"
            casting_time = "1 standard action"
            range = "See text"
            levels = { Wizard = 10 }
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Validation(ValidationError::OutOfRange { value: 10, max: 9, .. })
                )
            },
        ),
        (
            "法術引用不存在的職業",
            r#"
            [[spells]]
            name = "Bless"
            school = "Enchantment"
            casting_time = "1 standard action"
            range = "50 ft."
            levels = { Paladin = 1 }
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Load(LoadError::UnknownReference { kind: "職業", .. })
                )
            },
        ),
        (
            "無效的生命骰",
            r#"
            [[bab_progressions]]
            name = "Good"
            attack_bonus_table = { "1" = 1 }

            [[classes]]
            name = "Fighter"
            hit_die = "d3"
            bab_progression = "Good"
            "#,
            |kind| matches!(kind, ErrorKind::Load(LoadError::ParseError(_))),
        ),
        (
            "種族等級調整超過 10",
            r#"
            [[sizes]]
            name = "Medium"
            space_ft = 5.0

            [[races]]
            name = "Dragon"
            level_adjustment = 11
            "#,
            |kind| {
                matches!(
                    kind,
                    ErrorKind::Validation(ValidationError::OutOfRange { max: 10, .. })
                )
            },
        ),
        (
            "出處年份過早",
            r#"
            [[sources]]
            name = "Chainmail"
            year = 1971
            "#,
            |kind| matches!(kind, ErrorKind::Validation(ValidationError::InvalidYear { .. })),
        ),
        (
            "成長表等級鍵不是數字",
            r#"
            [[bab_progressions]]
            name = "Good"
            attack_bonus_table = { "one" = 1 }
            "#,
            |kind| matches!(kind, ErrorKind::Load(LoadError::ParseError(_))),
        ),
        (
            "TOML 格式錯誤",
            "[[classes]\nname = ",
            |kind| matches!(kind, ErrorKind::Load(LoadError::DeserializeError { .. })),
        ),
    ];

    for (description, data, check) in test_data {
        let err = load_from_toml(data).unwrap_err();
        assert!(check(err.kind()), "{}: {}", description, err);
    }
}

#[test]
fn test_sample_armor_and_spells() {
    let data = load_from_toml(SAMPLE_DATA).unwrap();

    let full_plate = &data.compendium.armors["Full Plate"];
    assert_eq!(full_plate.armor_type, Some(ArmorType::Heavy));
    assert_eq!(full_plate.armor_bonus, Some(8));
    // 護甲同時登錄為物品
    assert_eq!(data.compendium.items["Full Plate"].weight_in_lb, Some(50.0));

    let tordek = data
        .compendium
        .resolve(data.find_character("Tordek").unwrap())
        .unwrap();
    assert_eq!(tordek.speed, 20);
    assert_eq!(tordek.modified_speed(), 15);

    let lidda = data
        .compendium
        .resolve(data.find_character("Lidda").unwrap())
        .unwrap();
    assert_eq!(lidda.modified_speed(), 20);

    assert_eq!(data.compendium.spells.len(), 4);
    assert_eq!(data.compendium.spells["Fireball"].school, MagicSchool::Evocation);
    let cleric_spells: Vec<(u8, &str)> = data
        .compendium
        .spells_for_class("Cleric")
        .into_iter()
        .map(|(level, spell)| (level, spell.name.as_str()))
        .collect();
    assert_eq!(
        cleric_spells,
        vec![(0, "Detect Magic"), (1, "Cure Light Wounds")]
    );
}

#[test]
fn test_sample_derived_lists_sorted() {
    let data = load_from_toml(SAMPLE_DATA).unwrap();
    let lidda = data
        .compendium
        .resolve(data.find_character("Lidda").unwrap())
        .unwrap();
    let stats = DerivedStats::compute(&lidda).unwrap();

    let skill_names: Vec<&str> = stats.skills.iter().map(|skill| skill.name.as_str()).collect();
    assert_eq!(skill_names, vec!["Disable Device", "Hide", "Search"]);
}
