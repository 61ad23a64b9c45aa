//! Attribute store port - character sheet data owned by the host

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AttributeId, CharacterId, Facet};

/// A character journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    /// Image URL copied onto linked tokens
    #[serde(default)]
    pub avatar: String,
}

/// One sheet attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub id: AttributeId,
    pub name: String,
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub max: String,
}

impl AttributeRecord {
    pub fn value(&self, facet: Facet) -> &str {
        match facet {
            Facet::Current => &self.current,
            Facet::Max => &self.max,
        }
    }
}

/// Synchronous access to the host's attribute store. Reads never fail: a
/// missing attribute reads as the empty string.
pub trait AttributeStorePort: Send + Sync {
    fn character(&self, id: &CharacterId) -> Option<CharacterRecord>;

    /// Attributes of a character in store order, optionally only those whose
    /// name starts with `prefix`
    fn find_attributes(&self, character: &CharacterId, prefix: Option<&str>) -> Vec<AttributeRecord>;

    /// Exact-name lookup
    fn find_attribute(&self, character: &CharacterId, name: &str) -> Option<AttributeRecord>;

    fn attribute_value(&self, character: &CharacterId, name: &str, facet: Facet) -> String {
        self.find_attribute(character, name)
            .map(|a| a.value(facet).to_string())
            .unwrap_or_default()
    }

    /// Overwrite one facet of an existing attribute. Returns `false` when
    /// there is no such attribute; nothing is created.
    fn set_attribute_value(&self, character: &CharacterId, name: &str, facet: Facet, value: &str) -> bool;
}
