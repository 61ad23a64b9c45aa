//! GM stat block layout and HTML rendering
//!
//! Stats are written `NAME[:facet[:label]]`, e.g. `pnj_pv:max` or
//! `RDS::RD`. A stat whose attribute is missing is left out of its row.

use super::chat_format::{element, style};
use crate::domain::value_objects::{Archetype, Facet, Universe};

/// Attribute holding the COC characteristic modifiers as a JSON object
pub const MODIFIERS_ATTRIBUTE: &str = "CARACS";

const NBSP_COLON: &str = "&nbsp;:&nbsp;";

/// One displayed stat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSpec<'a> {
    pub attribute: &'a str,
    pub facet: Facet,
    pub label: &'a str,
}

impl<'a> StatSpec<'a> {
    pub fn parse(spec: &'a str) -> Self {
        let mut parts = spec.split(':');
        let attribute = parts.next().unwrap_or(spec);
        let facet = parts.next().and_then(Facet::parse).unwrap_or_default();
        let label = parts.next().filter(|l| !l.is_empty()).unwrap_or(attribute);
        Self {
            attribute,
            facet,
            label,
        }
    }
}

/// A group of stats inside a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Stats separated by spaces
    Inline(&'static [&'static str]),
    /// `current / max`
    Gauge(&'static [&'static str]),
    /// Stats wrapped in parentheses
    Paren(&'static [&'static str]),
    /// Characteristics followed by `(modifier+buff)` read from [`MODIFIERS_ATTRIBUTE`]
    WithModifiers(&'static [&'static str]),
}

pub type Row = &'static [Segment];

const COC_PC_PHYSICAL: &[&str] = &["FORCE::FOR", "DEXTERITE::DEX", "CONSTITUTION::CON"];
const COC_PC_MENTAL: &[&str] = &["INTELLIGENCE::INT", "PERCEPTION::PER", "CHARISME::CHA"];
const NPC_PHYSICAL: &[&str] = &["pnj_for::FOR", "pnj_dex::DEX", "pnj_con::CON"];
const NPC_MENTAL: &[&str] = &["pnj_int::INT", "pnj_per::PER", "pnj_cha::CHA"];
const NPC_ALL: &[&str] = &[
    "pnj_for::FOR",
    "pnj_dex::DEX",
    "pnj_con::CON",
    "pnj_int::INT",
    "pnj_per::PER",
    "pnj_cha::CHA",
];
const COG_PC: &[&str] = &[
    "FOR_TEST::FOR",
    "DEX_TEST::DEX",
    "CON_TEST::CON",
    "INT_TEST::INT",
    "PER_TEST::PER",
    "CHA_TEST::CHA",
];
const COG_STARSHIP: &[&str] = &[
    "FOR_TEST::PUI",
    "DEX_TEST::MAN",
    "CON_TEST::COQ",
    "INT_TEST::ORD",
    "PER_TEST::SEN",
    "CHA_TEST::COM",
];
const COG_MECHA: &[&str] = &[
    "mec_for::FOR",
    "mec_dex::DEX",
    "mec_con::CON",
    "mec_int::INT",
    "mec_per::PER",
    "mec_cha::CHA",
];

const PC_HIT_POINTS: Segment = Segment::Gauge(&["PV", "PV:max"]);
const PC_WOUNDS: Segment = Segment::Paren(&["SEUILBG::BG"]);
const NPC_HIT_POINTS: Segment = Segment::Gauge(&["pnj_pv::PV", "pnj_pv:max"]);
const NPC_WOUNDS: Segment = Segment::Paren(&["pnj_sbg::BG"]);

const COC_PC: &[Row] = &[
    &[Segment::WithModifiers(COC_PC_PHYSICAL)],
    &[Segment::WithModifiers(COC_PC_MENTAL)],
    &[
        Segment::Inline(&["INIT", "DEF", "RDS::RD"]),
        PC_HIT_POINTS,
        PC_WOUNDS,
    ],
];

const COC_NPC: &[Row] = &[
    &[Segment::WithModifiers(NPC_PHYSICAL)],
    &[Segment::WithModifiers(NPC_MENTAL)],
    &[
        Segment::Inline(&["pnj_init::Init", "pnj_def::DEF", "pnj_rd::RD"]),
        NPC_HIT_POINTS,
        NPC_WOUNDS,
    ],
];

const COC_VEHICLE: &[Row] = &[&[
    Segment::Inline(&["FOV::FOR", "AGI", "DEFV::DEF", "RDV::RD"]),
    Segment::Gauge(&["PVV::PV", "PVV:max"]),
]];

const COG_PC_ROWS: &[Row] = &[
    &[Segment::Inline(COG_PC)],
    &[
        Segment::Inline(&["INIT", "DEF", "RDS::RD", "DEP"]),
        PC_HIT_POINTS,
        PC_WOUNDS,
    ],
];

const COG_NPC: &[Row] = &[
    &[Segment::Inline(NPC_ALL)],
    &[
        Segment::Inline(&["pnj_init::Init", "pnj_def::DEF", "pnj_rd::RD", "pnj_dep::DEP"]),
        NPC_HIT_POINTS,
        NPC_WOUNDS,
    ],
];

const COG_STARSHIP_ROWS: &[Row] = &[
    &[Segment::Inline(COG_STARSHIP)],
    &[
        Segment::Inline(&["INITV::Init", "DEFRAP::DEFrap", "DEFSOL::DEFsol"]),
        Segment::Gauge(&["PV", "PV:max"]),
        Segment::Paren(&["seuil_avarie::Av."]),
    ],
];

const COG_MECHA_ROWS: &[Row] = &[
    &[Segment::Inline(COG_MECHA)],
    &[
        Segment::Inline(&["mec_init::Init", "mec_defrap::DEFrap", "mec_defsol::DEFsol"]),
        Segment::Gauge(&["mec_pv::PV", "mec_pv:max"]),
    ],
];

/// Stat block rows for a sheet, `None` for unknown pairs
pub fn layout_for(universe: Universe, archetype: Archetype) -> Option<&'static [Row]> {
    match (universe, archetype) {
        (Universe::Coc, Archetype::PlayerCharacter) => Some(COC_PC),
        (Universe::Coc, Archetype::NonPlayerCharacter) => Some(COC_NPC),
        (Universe::Coc, Archetype::Vehicle) => Some(COC_VEHICLE),
        (Universe::Cog, Archetype::PlayerCharacter) => Some(COG_PC_ROWS),
        (Universe::Cog, Archetype::NonPlayerCharacter) => Some(COG_NPC),
        (Universe::Cog, Archetype::Starship) => Some(COG_STARSHIP_ROWS),
        (Universe::Cog, Archetype::Mecha) => Some(COG_MECHA_ROWS),
        _ => None,
    }
}

/// Read access to the character being summarised
pub trait StatSource {
    /// `None` when the attribute does not exist
    fn stat(&self, attribute: &str, facet: Facet) -> Option<String>;
}

fn stat_span(spec: &StatSpec<'_>, value: &str) -> String {
    let mut span = String::new();
    if spec.facet == Facet::Current {
        span.push_str(spec.label);
        span.push_str(NBSP_COLON);
    }
    span.push_str(&format!("<b>{value}</b>"));
    element("span", Some(&span), &[])
}

fn spans(source: &dyn StatSource, specs: &[&str]) -> Vec<String> {
    specs
        .iter()
        .map(|s| StatSpec::parse(s))
        .filter_map(|spec| {
            source
                .stat(spec.attribute, spec.facet)
                .map(|value| stat_span(&spec, &value))
        })
        .collect()
}

fn modifier_suffix(source: &dyn StatSource, modifiers: &serde_json::Value, code: &str) -> String {
    let modifier = match modifiers.get(code) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let buff = source
        .stat(&format!("{code}_BUFF"), Facet::Current)
        .unwrap_or_default();
    let buff = match buff.as_str() {
        "" | "0" => String::new(),
        b if b.starts_with('-') || b.starts_with('+') => b.to_string(),
        b => format!("+{b}"),
    };
    format!(" ({modifier}{buff})")
}

fn render_segment(source: &dyn StatSource, segment: &Segment, modifiers: &serde_json::Value) -> String {
    match segment {
        Segment::Inline(specs) => spans(source, specs).join(" "),
        Segment::Gauge(specs) => spans(source, specs).join(" / "),
        Segment::Paren(specs) => format!("({})", spans(source, specs).join("")),
        Segment::WithModifiers(specs) => specs
            .iter()
            .map(|s| StatSpec::parse(s))
            .filter_map(|spec| {
                let value = source.stat(spec.attribute, spec.facet)?;
                Some(stat_span(&spec, &value) + &modifier_suffix(source, modifiers, spec.label))
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Render the HTML stat block. `title` is the character name, decorated with
/// the archetype code for anything but a player character.
pub fn render_stat_block(
    title: &str,
    archetype: Archetype,
    rows: &[Row],
    source: &dyn StatSource,
) -> String {
    let banner = if archetype == Archetype::PlayerCharacter {
        title.to_string()
    } else {
        format!("{title} ({archetype})")
    };

    let modifiers = source
        .stat(MODIFIERS_ATTRIBUTE, Facet::Current)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or(serde_json::Value::Null);

    let mut content = element(
        "div",
        Some(&banner),
        &[(
            "style",
            &style(&[
                ("background-color", "darkgray"),
                ("color", "white"),
                ("text-align", "center"),
                ("border-radius", "4px"),
            ]),
        )],
    );

    let row_style = style(&[("font-size", "smaller"), ("text-align", "justify")]);
    for row in rows {
        let line = row
            .iter()
            .map(|segment| render_segment(source, segment, &modifiers))
            .collect::<Vec<_>>()
            .join(" ");
        content.push_str(&element("div", Some(&line), &[("style", &row_style)]));
    }

    element(
        "div",
        Some(&content),
        &[(
            "style",
            &style(&[
                ("border", "1px solid black"),
                ("padding", "2px"),
                ("border-radius", "4px"),
                ("box-shadow", "2px 2px 2px 1px rgba(0, 0, 0, 0.2)"),
            ]),
        )],
    )
}
