//! 文字版角色表

use dnd_core::format::{gold_coin_notation, gold_k_notation};
use dnd_core::spells::SpellLevel;
use dnd_core::{CharacterSheet, Spell};
use std::fmt;

fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// 純文字角色表
pub struct TextSheet<'s, 'a>(pub &'s CharacterSheet<'a>);

impl fmt::Display for TextSheet<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sheet = self.0;
        let derived = &sheet.derived;

        let classes = sheet
            .classes
            .iter()
            .map(|(name, level)| format!("{} {}", name, level))
            .collect::<Vec<_>>()
            .join(" / ");

        writeln!(f, "{} ({} {}, {})", sheet.name, sheet.race, classes, sheet.alignment)?;
        writeln!(
            f,
            "Level {} ({} class levels), XP {}",
            sheet.level, derived.class_levels, sheet.experience
        )?;
        write!(
            f,
            "HP {}/{}  AC {}  Speed {} ft.",
            sheet.current_hit_points, sheet.max_hit_points, sheet.armor_class, derived.modified_speed
        )?;
        if derived.modified_speed != sheet.speed {
            write!(f, " ({} ft. base)", sheet.speed)?;
        }
        writeln!(f, "  SR {}", sheet.spell_resistance)?;

        writeln!(f)?;
        for line in &sheet.ability_scores {
            writeln!(
                f,
                "{:<13} {:>2} ({})",
                line.ability.to_string(),
                i64::from(line.value) + i64::from(line.bonus),
                signed(line.modifier)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Fortitude {}", signed(derived.fortitude_save))?;
        writeln!(f, "Reflex    {}", signed(derived.reflex_save))?;
        writeln!(f, "Will      {}", signed(derived.will_save))?;
        writeln!(f, "Initiative {}", signed(derived.initiative))?;
        let multiattack = if derived.multiattack_bab.is_empty() {
            "+0"
        } else {
            derived.multiattack_bab.as_str()
        };
        writeln!(f, "Base Attack {}", multiattack)?;
        writeln!(f, "Languages: {}", derived.list_of_languages)?;

        if !sheet.feats.is_empty() {
            writeln!(f, "Feats: {}", sheet.feats.join(", "))?;
        }

        if !derived.skills.is_empty() {
            writeln!(f)?;
            for skill in &derived.skills {
                writeln!(
                    f,
                    "{:<16} {} ({} ranks)",
                    skill.name,
                    signed(skill.total_bonus),
                    skill.ranks
                )?;
            }
        }

        for inventory in &derived.inventories {
            writeln!(f)?;
            writeln!(
                f,
                "{}: {} lb. carried, {} lb. free, worth {} ({})",
                inventory.name,
                inventory.total_weight,
                inventory.available_capacity,
                gold_k_notation(inventory.total_value),
                gold_coin_notation(inventory.total_value)
            )?;
        }

        Ok(())
    }
}

/// 職業法術列表，每個法術一行
pub struct SpellList<'a> {
    pub class: &'a str,
    pub spells: Vec<(SpellLevel, &'a Spell)>,
}

impl fmt::Display for SpellList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.spells.is_empty() {
            return writeln!(f, "{} has no spells", self.class);
        }
        for (level, spell) in &self.spells {
            writeln!(
                f,
                "{} {}: {} ({}; {})",
                self.class,
                level,
                spell.name,
                spell.school,
                spell.components_display()
            )?;
        }
        Ok(())
    }
}
