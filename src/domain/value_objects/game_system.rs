//! Game variant and character archetype selectors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The game variant whose sheet layout is in use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Universe {
    /// Chroniques Oubliées Contemporain
    #[default]
    #[serde(rename = "COC", alias = "coc")]
    Coc,
    /// Chroniques Oubliées Galactiques
    #[serde(rename = "COG", alias = "cog")]
    Cog,
}

impl Universe {
    pub fn code(&self) -> &'static str {
        match self {
            Universe::Coc => "COC",
            Universe::Cog => "COG",
        }
    }

    /// The other supported variant, used by the settings panel switch button
    pub fn other(&self) -> Universe {
        match self {
            Universe::Coc => Universe::Cog,
            Universe::Cog => Universe::Coc,
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Universe {
    type Err = UnknownUniverse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COC" => Ok(Universe::Coc),
            "COG" => Ok(Universe::Cog),
            _ => Err(UnknownUniverse(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown universe: {0}")]
pub struct UnknownUniverse(pub String);

/// Character category, stored on the sheet as `type_personnage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    PlayerCharacter,
    NonPlayerCharacter,
    Vehicle,
    Starship,
    Mecha,
}

impl Archetype {
    /// Sheet attribute holding the archetype code
    pub const SHEET_ATTRIBUTE: &'static str = "type_personnage";

    /// Parse the sheet code. An empty value is a player character sheet.
    pub fn from_sheet_code(code: &str) -> Option<Self> {
        match code.trim() {
            "" | "pj" => Some(Archetype::PlayerCharacter),
            "pnj" => Some(Archetype::NonPlayerCharacter),
            "vehicule" => Some(Archetype::Vehicle),
            "vaisseau" => Some(Archetype::Starship),
            "mecha" => Some(Archetype::Mecha),
            _ => None,
        }
    }

    pub fn sheet_code(&self) -> &'static str {
        match self {
            Archetype::PlayerCharacter => "pj",
            Archetype::NonPlayerCharacter => "pnj",
            Archetype::Vehicle => "vehicule",
            Archetype::Starship => "vaisseau",
            Archetype::Mecha => "mecha",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_code())
    }
}
