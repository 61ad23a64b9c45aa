//! Journal port - campaign-wide catalogues and per-character macros

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, HandoutId, MarkerDefinition};

/// A journal handout, matched by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoutRef {
    pub id: HandoutId,
    pub name: String,
}

/// A character ability macro
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityMacro {
    pub name: String,
    #[serde(default)]
    pub action: String,
}

pub trait JournalPort: Send + Sync {
    /// Custom token markers defined for the campaign
    fn marker_catalogue(&self) -> Vec<MarkerDefinition>;

    /// Case-insensitive lookup by name
    fn find_handout(&self, name: &str) -> Option<HandoutRef>;

    /// Case-insensitive lookup by name
    fn find_ability(&self, character: &CharacterId, name: &str) -> Option<AbilityMacro>;
}
