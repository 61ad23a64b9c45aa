//! Roll list menus: abilities, attacks and characteristics

use super::Sheet;
use crate::domain::services::chat_format::{
    ability_call, attribute_ref, button, roll_target, MenuTemplate, LINE_BREAK,
};
use crate::domain::services::schema_registry::{AttackRoles, FieldName, RollTable};
use crate::domain::value_objects::RowId;

/// Attack type, as referenced by the sheet's attack type field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttackKind {
    Melee,
    Ranged,
    Magic,
    Mental,
    Psychic,
}

impl AttackKind {
    fn from_sheet(value: &str) -> Self {
        match value.trim() {
            "@{ATKTIR}" => AttackKind::Ranged,
            "@{ATKMAG}" => AttackKind::Magic,
            "@{ATKMEN}" => AttackKind::Mental,
            "@{ATKPSYINFLU}" | "@{ATKPSYINTUI}" => AttackKind::Psychic,
            _ => AttackKind::Melee,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            AttackKind::Melee => "C",
            AttackKind::Ranged => "D",
            AttackKind::Magic => "Mag",
            AttackKind::Mental => "Men",
            AttackKind::Psychic => "Psy",
        }
    }
}

pub fn abilities(sheet: &Sheet<'_>) -> String {
    let Some(roles) = sheet.schema.abilities else {
        return String::new();
    };

    let mut body = String::new();
    for row in sheet.rows(roles.section) {
        let skill = roles
            .skill
            .map(|field| sheet.row_value(roles.section, &row, field))
            .unwrap_or_default();
        let label = if skill.trim().is_empty() {
            sheet.row_value(roles.section, &row, roles.name)
        } else {
            skill
        };
        if label.trim().is_empty() {
            continue;
        }
        let roll = row.attribute_name(roles.section.0, roles.roll.0);
        body.push_str(&button(&label, &roll_target(&sheet.character.id, &roll)));
        body.push_str(LINE_BREAK);
    }
    if body.is_empty() {
        return String::new();
    }

    let name = &sheet.character.name;
    MenuTemplate::new(name.as_str(), attribute_ref(name, "PROFIL"), "Compétences").wrap(&body)
}

pub fn attacks(sheet: &Sheet<'_>) -> String {
    let Some(roles) = sheet.schema.attacks else {
        return String::new();
    };

    let mut body = String::new();
    for row in sheet.rows(roles.section) {
        let weapon = sheet.row_value(roles.section, &row, roles.name);
        if weapon.trim().is_empty() {
            continue;
        }
        let roll = row.attribute_name(roles.section.0, roles.roll.0);
        body.push_str(&button(&weapon, &roll_target(&sheet.character.id, &roll)));
        body.push_str(&attack_info(sheet, &roles, &row));
        body.push_str(LINE_BREAK);
    }
    if body.is_empty() {
        return String::new();
    }

    MenuTemplate::new(sheet.character.name.as_str(), "Combat", "Attaques").wrap(&body)
}

/// Roll label, limited-use note and the `(type:range)` qualifier, each
/// preceded by a space. Fields the schema lacks are left out.
fn attack_info(sheet: &Sheet<'_>, roles: &AttackRoles, row: &RowId) -> String {
    let field = |name: FieldName| sheet.row_value(roles.section, row, name);
    let mut info = String::new();

    for note in [roles.roll_label, roles.limited].into_iter().flatten() {
        let note = field(note);
        if !note.trim().is_empty() {
            info.push(' ');
            info.push_str(note.trim());
        }
    }

    if let Some(kind_field) = roles.kind {
        let kind = AttackKind::from_sheet(&field(kind_field));
        let range = roles.range.map(field).unwrap_or_default();
        let range = range.trim();
        if kind == AttackKind::Melee || range.is_empty() {
            info.push_str(&format!(" ({})", kind.tag()));
        } else {
            info.push_str(&format!(" ({}:{range})", kind.tag()));
        }
    }
    info
}

pub fn characteristics(sheet: &Sheet<'_>) -> String {
    let Some(table) = sheet.schema.characteristics else {
        return String::new();
    };
    let body = table
        .rolls()
        .iter()
        .map(|roll| button(&RollTable::code(*roll), &roll_target(&sheet.character.id, roll.0)))
        .collect::<Vec<_>>()
        .join(" | ");
    if body.is_empty() {
        return String::new();
    }
    MenuTemplate::new(sheet.character.name.as_str(), "Tests", "Caractéristiques").wrap(&body)
}

/// Inline call rolling one attack row, addressed by id or position
pub fn attack_roll(sheet: &Sheet<'_>, row: &RowId) -> String {
    let Some(roles) = sheet.schema.attacks else {
        return String::new();
    };
    ability_call(
        &sheet.character.name,
        &row.attribute_name(roles.section.0, roles.roll.0),
    )
}
