//! Path ("voie") menus

use super::Sheet;
use crate::application::ports::outbound::HandoutRef;
use crate::domain::services::chat_format::{
    attribute_ref, button, handout_link, numbered, roll_target, MenuTemplate, COMMAND_PREFIX,
    LINE_BREAK, ROLL_GLYPH,
};
use crate::domain::services::schema_registry::PathRoles;

/// The value a rank flag holds when the rank is owned
const RANK_OWNED: &str = "1";

/// One numbered link per named path, in path order
pub fn overview(sheet: &Sheet<'_>, descriptions_only: bool) -> String {
    let Some(paths) = sheet.schema.paths else {
        return String::new();
    };
    let flag = if descriptions_only { " --desc" } else { "" };

    let mut body = String::new();
    for number in 1..=paths.max_paths {
        let name = sheet.value(&paths.path_name(number));
        if name.trim().is_empty() {
            continue;
        }
        let target = format!(
            "{COMMAND_PREFIX} actions --voie {number}{flag} --charId={}",
            sheet.character.id
        );
        body.push_str(&button(&numbered(&name, number), &target));
        body.push_str(LINE_BREAK);
    }
    if body.is_empty() {
        return String::new();
    }

    let name = &sheet.character.name;
    MenuTemplate::new(
        attribute_ref(name, "character_name"),
        attribute_ref(name, "PROFIL"),
        "Capacités",
    )
    .wrap(&body)
}

/// Owned ranks of one path, each with its handout link and roll button
pub fn detail(sheet: &Sheet<'_>, path: u8, descriptions_only: bool) -> String {
    let Some(paths) = sheet.schema.paths else {
        return String::new();
    };
    if path == 0 || path > paths.max_paths {
        return String::new();
    }

    let mut body = String::new();
    for rank in 1..=paths.max_ranks {
        if sheet.value(&paths.rank_flag(path, rank)) != RANK_OWNED {
            continue;
        }
        let roll = if descriptions_only {
            None
        } else {
            rank_roll(sheet, &paths, path, rank)
        };
        let line = rank_line(sheet, &rank_label(sheet, &paths, path, rank), rank, roll.as_deref());
        if !line.is_empty() {
            body.push_str(&line);
            body.push_str(LINE_BREAK);
        }
    }
    if body.is_empty() {
        return String::new();
    }

    let name = &sheet.character.name;
    MenuTemplate::new(
        name.as_str(),
        "Capacités",
        attribute_ref(name, &paths.path_name(path)),
    )
    .wrap(&body)
}

/// The rank title, else the first line of its description
fn rank_label(sheet: &Sheet<'_>, paths: &PathRoles, path: u8, rank: u8) -> String {
    let title = sheet.value(&paths.rank_title(path, rank));
    if !title.trim().is_empty() {
        return title;
    }
    sheet
        .value(&paths.rank_description(path, rank))
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Roll for a rank: its `VnRm` ability when that has an action, else the
/// ability-roll row declaring the rank
fn rank_roll(sheet: &Sheet<'_>, paths: &PathRoles, path: u8, rank: u8) -> Option<String> {
    let ability = paths.rank_ability(path, rank);
    if let Some(found) = sheet.journal.find_ability(&sheet.character.id, &ability) {
        return (!found.action.trim().is_empty()).then_some(ability);
    }

    let roles = sheet.schema.rank_rolls?;
    let key = paths.rank_flag(path, rank);
    sheet
        .rows(roles.section)
        .into_iter()
        .find(|row| {
            sheet
                .row_value(roles.section, row, roles.rank_key)
                .trim()
                .eq_ignore_ascii_case(&key)
        })
        .map(|row| row.attribute_name(roles.section.0, roles.roll.0))
}

/// A rank label holds `;`-separated abilities, each `name` or `name | label`.
/// Handout links and plain labels number only the first one; roll buttons
/// always carry the rank number.
fn rank_line(sheet: &Sheet<'_>, label: &str, rank: u8, roll: Option<&str>) -> String {
    label
        .split(';')
        .enumerate()
        .filter_map(|(item, entry)| {
            let (ability, display) = match entry.split_once('|') {
                Some((ability, display)) => (ability.trim(), display.trim()),
                None => (entry.trim(), entry.trim()),
            };
            if ability.is_empty() {
                return None;
            }
            let sequence = if item == 0 { rank } else { 0 };
            let handout = sheet.journal.find_handout(ability);
            Some(rank_entry(sheet, display, sequence, rank, handout.as_ref(), roll))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn rank_entry(
    sheet: &Sheet<'_>,
    label: &str,
    sequence: u8,
    rank: u8,
    handout: Option<&HandoutRef>,
    roll: Option<&str>,
) -> String {
    let target = roll.map(|roll| roll_target(&sheet.character.id, roll));
    match (handout, target) {
        (Some(handout), Some(target)) => format!(
            "{} {}",
            handout_link(label, sequence, &handout.id),
            button(ROLL_GLYPH, &target)
        ),
        (Some(handout), None) => handout_link(label, sequence, &handout.id),
        (None, Some(target)) => button(&numbered(label, rank), &target),
        (None, None) => numbered(label, sequence),
    }
}
