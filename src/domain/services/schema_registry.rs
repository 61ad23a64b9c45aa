//! Schema registry - which sheet attribute plays which role
//!
//! A schema is selected by (universe, archetype). A role that is `None` means
//! the matching feature does not apply to that sheet; renderers never guess a
//! fallback. Adding an archetype means adding one schema constant and one arm
//! in [`schema_for`].

use crate::domain::value_objects::{Archetype, BarSource, BarTable, CoshSettings, Universe};

/// A plain (non-repeating) attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrName(pub &'static str);

/// A repeating section name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionName(pub &'static str);

/// A field name inside a repeating row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldName(pub &'static str);

/// Ordered roll attributes for the characteristic menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTable(pub &'static [AttrName]);

impl RollTable {
    pub fn rolls(&self) -> &'static [AttrName] {
        self.0
    }

    /// Short code of a roll, taken from its name suffix (`jet_for` -> `FOR`)
    pub fn code(roll: AttrName) -> String {
        roll.0
            .rsplit('_')
            .next()
            .unwrap_or(roll.0)
            .to_ascii_uppercase()
    }
}

/// Attack repeating section roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoles {
    pub section: SectionName,
    pub name: FieldName,
    pub roll: FieldName,
    /// Free text naming the roll used (e.g. skill), shown after the button
    pub roll_label: Option<FieldName>,
    /// Attack type reference (`@{ATKTIR}`, ...); without it no qualifier is shown
    pub kind: Option<FieldName>,
    pub limited: Option<FieldName>,
    pub range: Option<FieldName>,
}

/// Ability-roll repeating section roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityRoles {
    pub section: SectionName,
    pub name: FieldName,
    pub skill: Option<FieldName>,
    pub roll: FieldName,
}

/// Talent tree ("voie") attributes. The naming is fixed by the sheet; only
/// the bounds vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRoles {
    pub max_paths: u8,
    pub max_ranks: u8,
}

impl PathRoles {
    pub fn path_name(&self, path: u8) -> String {
        format!("voie{path}nom")
    }

    /// `"1"` when the character has this rank
    pub fn rank_flag(&self, path: u8, rank: u8) -> String {
        format!("v{path}r{rank}")
    }

    pub fn rank_title(&self, path: u8, rank: u8) -> String {
        format!("v{path}r{rank}-t")
    }

    pub fn rank_description(&self, path: u8, rank: u8) -> String {
        format!("voie{path}-{rank}")
    }

    /// Name of the ability macro rolling this rank
    pub fn rank_ability(&self, path: u8, rank: u8) -> String {
        format!("V{path}R{rank}")
    }
}

/// Ability-roll rows that declare which rank they roll for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankRollRoles {
    pub section: SectionName,
    /// Holds the lowercase rank flag name (`v1r2`) the row rolls for
    pub rank_key: FieldName,
    pub roll: FieldName,
}

/// Every role a schema can define
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    GmFlag,
    AttackSection,
    AttackName,
    AttackRoll,
    AttackRollLabel,
    AttackKind,
    AttackLimited,
    AttackRange,
    AbilitySection,
    AbilityName,
    AbilitySkill,
    AbilityRoll,
    Paths,
    RankRollSection,
    RankRollKey,
    RankRoll,
    Characteristics,
}

/// Role table for one (universe, archetype)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Sheet toggle whose non-empty value requests GM-only results
    pub gm_flag: Option<AttrName>,
    pub attacks: Option<AttackRoles>,
    pub abilities: Option<AbilityRoles>,
    pub paths: Option<PathRoles>,
    pub rank_rolls: Option<RankRollRoles>,
    pub characteristics: Option<RollTable>,
}

#[cfg(test)]
impl Schema {
    /// Roles defined by this schema
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = Vec::new();
        if self.gm_flag.is_some() {
            roles.push(Role::GmFlag);
        }
        if let Some(attacks) = &self.attacks {
            roles.extend([Role::AttackSection, Role::AttackName, Role::AttackRoll]);
            let optional = [
                (attacks.roll_label, Role::AttackRollLabel),
                (attacks.kind, Role::AttackKind),
                (attacks.limited, Role::AttackLimited),
                (attacks.range, Role::AttackRange),
            ];
            roles.extend(optional.iter().filter(|(f, _)| f.is_some()).map(|(_, r)| *r));
        }
        if let Some(abilities) = &self.abilities {
            roles.extend([Role::AbilitySection, Role::AbilityName, Role::AbilityRoll]);
            if abilities.skill.is_some() {
                roles.push(Role::AbilitySkill);
            }
        }
        if self.paths.is_some() {
            roles.push(Role::Paths);
        }
        if self.rank_rolls.is_some() {
            roles.extend([Role::RankRollSection, Role::RankRollKey, Role::RankRoll]);
        }
        if self.characteristics.is_some() {
            roles.push(Role::Characteristics);
        }
        roles
    }
}

const PATHS: PathRoles = PathRoles {
    max_paths: 9,
    max_ranks: 5,
};

const PC_ROLLS: RollTable = RollTable(&[
    AttrName("jet_for"),
    AttrName("jet_dex"),
    AttrName("jet_con"),
    AttrName("jet_int"),
    AttrName("jet_per"),
    AttrName("jet_cha"),
]);

const NPC_ROLLS: RollTable = RollTable(&[
    AttrName("pnj_jet_for"),
    AttrName("pnj_jet_dex"),
    AttrName("pnj_jet_con"),
    AttrName("pnj_jet_int"),
    AttrName("pnj_jet_per"),
    AttrName("pnj_jet_cha"),
]);

const PLAYER_CHARACTER: Schema = Schema {
    gm_flag: Some(AttrName("togm")),
    attacks: Some(AttackRoles {
        section: SectionName("armes"),
        name: FieldName("armenom"),
        roll: FieldName("pjatk"),
        roll_label: Some(FieldName("armejetn")),
        kind: Some(FieldName("armeatk")),
        limited: Some(FieldName("armelim")),
        range: Some(FieldName("armeportee")),
    }),
    abilities: Some(AbilityRoles {
        section: SectionName("jetcapas"),
        name: FieldName("jetcapanom"),
        skill: Some(FieldName("jetcapatitre")),
        roll: FieldName("pjcapa"),
    }),
    paths: Some(PATHS),
    rank_rolls: Some(RankRollRoles {
        section: SectionName("jetcapas"),
        rank_key: FieldName("jetcapavr"),
        roll: FieldName("pjcapa"),
    }),
    characteristics: Some(PC_ROLLS),
};

const NON_PLAYER_CHARACTER: Schema = Schema {
    gm_flag: Some(AttrName("pnj_togm")),
    attacks: Some(AttackRoles {
        section: SectionName("pnjatk"),
        name: FieldName("atknom"),
        roll: FieldName("pnjatk"),
        roll_label: None,
        kind: None,
        limited: None,
        range: None,
    }),
    abilities: Some(AbilityRoles {
        section: SectionName("pnjcapas"),
        name: FieldName("capanom"),
        skill: None,
        roll: FieldName("pnjcapa"),
    }),
    paths: Some(PATHS),
    rank_rolls: None,
    characteristics: Some(NPC_ROLLS),
};

const VEHICLE: Schema = Schema {
    gm_flag: Some(AttrName("togm")),
    attacks: None,
    abilities: None,
    paths: None,
    rank_rolls: None,
    characteristics: None,
};

const STARSHIP: Schema = Schema {
    gm_flag: Some(AttrName("togm")),
    attacks: Some(AttackRoles {
        section: SectionName("armesv"),
        name: FieldName("armenom"),
        roll: FieldName("vatk"),
        roll_label: Some(FieldName("armejetn")),
        kind: None,
        limited: None,
        range: None,
    }),
    abilities: None,
    paths: None,
    rank_rolls: None,
    characteristics: None,
};

const MECHA: Schema = Schema {
    gm_flag: Some(AttrName("togm")),
    attacks: None,
    abilities: None,
    paths: None,
    rank_rolls: None,
    characteristics: None,
};

/// Look up the schema for a sheet. Unknown pairs yield `None`.
pub fn schema_for(universe: Universe, archetype: Archetype) -> Option<&'static Schema> {
    match (universe, archetype) {
        (_, Archetype::PlayerCharacter) => Some(&PLAYER_CHARACTER),
        (_, Archetype::NonPlayerCharacter) => Some(&NON_PLAYER_CHARACTER),
        (Universe::Coc, Archetype::Vehicle) => Some(&VEHICLE),
        (Universe::Cog, Archetype::Starship) => Some(&STARSHIP),
        (Universe::Cog, Archetype::Mecha) => Some(&MECHA),
        _ => None,
    }
}

/// Compiled bar table for a sheet
pub fn default_bar_table(universe: Universe, archetype: Archetype) -> Option<BarTable> {
    let table = match (universe, archetype) {
        (_, Archetype::PlayerCharacter) => BarTable::new(
            Some(BarSource::value("DEF")),
            Some(BarSource::gauge("PM")),
            Some(BarSource::gauge("PV")),
        ),
        (_, Archetype::NonPlayerCharacter) => BarTable::new(
            Some(BarSource::value("pnj_def")),
            None,
            Some(BarSource::gauge("pnj_pv")),
        ),
        (Universe::Coc, Archetype::Vehicle) => BarTable::new(
            Some(BarSource::value("DEFV")),
            None,
            Some(BarSource::gauge("PVV")),
        ),
        (Universe::Cog, Archetype::Starship) => BarTable::new(
            Some(BarSource::value("DEFRAP")),
            Some(BarSource::value("DEFSOL")),
            Some(BarSource::gauge("PV")),
        ),
        (Universe::Cog, Archetype::Mecha) => BarTable::new(
            Some(BarSource::value("mec_defrap")),
            Some(BarSource::value("mec_defsol")),
            Some(BarSource::gauge("mec_pv")),
        ),
        _ => return None,
    };
    Some(table)
}

/// Bar table in effect: a settings override wins over the compiled table
pub fn bar_table_for(settings: &CoshSettings, archetype: Archetype) -> Option<BarTable> {
    settings
        .bar_override(settings.universe, archetype)
        .cloned()
        .or_else(|| default_bar_table(settings.universe, archetype))
}
