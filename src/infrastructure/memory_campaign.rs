//! In-memory campaign - host store adapter
//!
//! Implements every outbound port over plain collections. Seeded from a JSON
//! snapshot at startup and used as the store fake in tests. Attributes keep
//! insertion order, which is the discovery order seen by row resolution.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{
    AbilityMacro, AttributeRecord, AttributeStorePort, CharacterRecord, ChatMessage, ChatPort,
    HandoutRef, JournalPort, TokenRecord, TokenStorePort,
};
use crate::domain::value_objects::{
    AttributeId, CharacterId, Facet, FieldValue, MarkerDefinition, TokenField, TokenId,
};

/// A character with its sheet, as stored in a snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSeed {
    #[serde(flatten)]
    pub character: CharacterRecord,
    #[serde(default)]
    pub attributes: Vec<AttributeSeed>,
    #[serde(default)]
    pub abilities: Vec<AbilityMacro>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeSeed {
    #[serde(default = "AttributeId::generate")]
    pub id: AttributeId,
    pub name: String,
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub max: String,
}

/// Serialized campaign contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    #[serde(default)]
    pub characters: Vec<CharacterSeed>,
    #[serde(default)]
    pub tokens: Vec<TokenRecord>,
    #[serde(default)]
    pub handouts: Vec<HandoutRef>,
    #[serde(default)]
    pub token_markers: Vec<MarkerDefinition>,
}

#[derive(Debug, Clone)]
struct TokenEntry {
    record: TokenRecord,
    fields: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Default)]
struct CampaignState {
    characters: Vec<CharacterRecord>,
    attributes: Vec<(CharacterId, AttributeRecord)>,
    abilities: Vec<(CharacterId, AbilityMacro)>,
    tokens: Vec<TokenEntry>,
    handouts: Vec<HandoutRef>,
    token_markers: Vec<MarkerDefinition>,
    chat_log: Vec<ChatMessage>,
}

impl CampaignState {
    fn attribute_mut(&mut self, character: &CharacterId, name: &str) -> Option<&mut AttributeRecord> {
        self.attributes
            .iter_mut()
            .find(|(owner, a)| owner == character && a.name == name)
            .map(|(_, a)| a)
    }

    fn token_mut(&mut self, id: &TokenId) -> Option<&mut TokenEntry> {
        self.tokens.iter_mut().find(|t| &t.record.id == id)
    }
}

/// In-memory host store
#[derive(Debug, Default)]
pub struct InMemoryCampaign {
    state: RwLock<CampaignState>,
}

impl InMemoryCampaign {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: CampaignSnapshot) -> Self {
        let campaign = Self::new();
        {
            let mut state = campaign.write();
            for seed in snapshot.characters {
                let id = seed.character.id.clone();
                state.attributes.extend(seed.attributes.into_iter().map(|a| {
                    (
                        id.clone(),
                        AttributeRecord {
                            id: a.id,
                            name: a.name,
                            current: a.current,
                            max: a.max,
                        },
                    )
                }));
                state
                    .abilities
                    .extend(seed.abilities.into_iter().map(|m| (id.clone(), m)));
                state.characters.push(seed.character);
            }
            state.tokens = snapshot
                .tokens
                .into_iter()
                .map(|record| TokenEntry {
                    record,
                    fields: BTreeMap::new(),
                })
                .collect();
            state.handouts = snapshot.handouts;
            state.token_markers = snapshot.token_markers;
        }
        campaign
    }

    /// Load a JSON snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read campaign file {}", path.display()))?;
        let snapshot: CampaignSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse campaign file {}", path.display()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    fn read(&self) -> RwLockReadGuard<'_, CampaignState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CampaignState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every message broadcast so far
    pub fn chat_log(&self) -> Vec<ChatMessage> {
        self.read().chat_log.clone()
    }
}

/// Seeding helpers for tests
#[cfg(test)]
impl InMemoryCampaign {
    pub fn add_character(&self, id: &CharacterId, name: &str) {
        self.write().characters.push(CharacterRecord {
            id: id.clone(),
            name: name.to_string(),
            avatar: String::new(),
        });
    }

    pub fn set_avatar(&self, id: &CharacterId, avatar: &str) {
        if let Some(c) = self.write().characters.iter_mut().find(|c| &c.id == id) {
            c.avatar = avatar.to_string();
        }
    }

    /// Append an attribute (or overwrite an existing one of the same name)
    pub fn add_attribute(&self, character: &CharacterId, name: &str, current: &str, max: &str) -> AttributeId {
        let mut state = self.write();
        if let Some(existing) = state.attribute_mut(character, name) {
            existing.current = current.to_string();
            existing.max = max.to_string();
            return existing.id.clone();
        }
        let id = AttributeId::generate();
        state.attributes.push((
            character.clone(),
            AttributeRecord {
                id: id.clone(),
                name: name.to_string(),
                current: current.to_string(),
                max: max.to_string(),
            },
        ));
        id
    }

    pub fn add_ability(&self, character: &CharacterId, name: &str, action: &str) {
        self.write().abilities.push((
            character.clone(),
            AbilityMacro {
                name: name.to_string(),
                action: action.to_string(),
            },
        ));
    }

    pub fn add_handout(&self, name: &str) -> crate::domain::value_objects::HandoutId {
        let id = crate::domain::value_objects::HandoutId::generate();
        self.write().handouts.push(HandoutRef {
            id: id.clone(),
            name: name.to_string(),
        });
        id
    }

    pub fn add_marker_definition(&self, name: &str, tag: &str) {
        self.write().token_markers.push(MarkerDefinition {
            name: name.to_string(),
            tag: tag.to_string(),
        });
    }

    pub fn add_token(&self, record: TokenRecord) {
        self.write().tokens.push(TokenEntry {
            record,
            fields: BTreeMap::new(),
        });
    }

    /// Value of a token property outside the core record fields
    pub fn token_field(&self, id: &TokenId, field: &TokenField) -> Option<FieldValue> {
        self.read()
            .tokens
            .iter()
            .find(|t| &t.record.id == id)
            .and_then(|t| t.fields.get(&field.key()).cloned())
    }
}

impl AttributeStorePort for InMemoryCampaign {
    fn character(&self, id: &CharacterId) -> Option<CharacterRecord> {
        self.read().characters.iter().find(|c| &c.id == id).cloned()
    }

    fn find_attributes(&self, character: &CharacterId, prefix: Option<&str>) -> Vec<AttributeRecord> {
        self.read()
            .attributes
            .iter()
            .filter(|(owner, a)| owner == character && prefix.map_or(true, |p| a.name.starts_with(p)))
            .map(|(_, a)| a.clone())
            .collect()
    }

    fn find_attribute(&self, character: &CharacterId, name: &str) -> Option<AttributeRecord> {
        self.read()
            .attributes
            .iter()
            .find(|(owner, a)| owner == character && a.name == name)
            .map(|(_, a)| a.clone())
    }

    fn set_attribute_value(&self, character: &CharacterId, name: &str, facet: Facet, value: &str) -> bool {
        let mut state = self.write();
        match state.attribute_mut(character, name) {
            Some(attribute) => {
                match facet {
                    Facet::Current => attribute.current = value.to_string(),
                    Facet::Max => attribute.max = value.to_string(),
                }
                true
            }
            None => false,
        }
    }
}

impl TokenStorePort for InMemoryCampaign {
    fn token(&self, id: &TokenId) -> Option<TokenRecord> {
        self.read()
            .tokens
            .iter()
            .find(|t| &t.record.id == id)
            .map(|t| t.record.clone())
    }

    fn set_token_field(&self, id: &TokenId, field: TokenField, value: FieldValue) {
        let mut state = self.write();
        let Some(token) = state.token_mut(id) else {
            return;
        };
        match (&field, value) {
            (TokenField::Name, FieldValue::Text(name)) => token.record.name = name,
            (TokenField::ImgSrc, FieldValue::Text(src)) => token.record.imgsrc = src,
            (TokenField::Represents, FieldValue::Text(character)) => {
                token.record.represents = Some(CharacterId::new(character))
            }
            (_, value) => {
                token.fields.insert(field.key(), value);
            }
        }
    }

    fn set_token_markers(&self, id: &TokenId, markers: &str) {
        if let Some(token) = self.write().token_mut(id) {
            token.record.statusmarkers = markers.to_string();
        }
    }
}

impl ChatPort for InMemoryCampaign {
    fn broadcast(&self, message: ChatMessage) {
        self.write().chat_log.push(message);
    }
}

impl JournalPort for InMemoryCampaign {
    fn marker_catalogue(&self) -> Vec<MarkerDefinition> {
        self.read().token_markers.clone()
    }

    fn find_handout(&self, name: &str) -> Option<HandoutRef> {
        self.read()
            .handouts
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn find_ability(&self, character: &CharacterId, name: &str) -> Option<AbilityMacro> {
        self.read()
            .abilities
            .iter()
            .find(|(owner, m)| owner == character && m.name.eq_ignore_ascii_case(name))
            .map(|(_, m)| m.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_seeding_keeps_attribute_order() {
        let snapshot: CampaignSnapshot = serde_json::from_str(
            r#"{
                "characters": [{
                    "id": "-C1", "name": "Zora",
                    "attributes": [
                        {"name": "PV", "current": "8", "max": "10"},
                        {"name": "DEF", "current": "15"}
                    ],
                    "abilities": [{"name": "V1R1", "action": "/roll 1d20"}]
                }],
                "tokens": [{"id": "-T1", "represents": "-C1"}],
                "handouts": [{"id": "-H1", "name": "Manoeuvre"}],
                "token_markers": [{"name": "blessed", "tag": "Blessed::1"}]
            }"#,
        )
        .unwrap();
        let campaign = InMemoryCampaign::from_snapshot(snapshot);
        let zora = CharacterId::new("-C1");

        let names: Vec<String> = campaign
            .find_attributes(&zora, None)
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["PV", "DEF"]);
        assert_eq!(campaign.attribute_value(&zora, "PV", Facet::Max), "10");
        assert_eq!(campaign.attribute_value(&zora, "missing", Facet::Current), "");
        assert!(campaign.find_ability(&zora, "v1r1").is_some());
        assert!(campaign.find_handout("MANOEUVRE").is_some());
        assert_eq!(campaign.marker_catalogue().len(), 1);
        assert_eq!(
            campaign.token(&TokenId::new("-T1")).unwrap().represents,
            Some(zora)
        );
    }

    #[test]
    fn test_set_attribute_value_never_creates() {
        let campaign = InMemoryCampaign::new();
        let id = CharacterId::new("-C1");
        assert!(!campaign.set_attribute_value(&id, "ETATDE", Facet::Current, "12"));
        assert!(campaign.find_attribute(&id, "ETATDE").is_none());

        campaign.add_attribute(&id, "ETATDE", "20", "");
        assert!(campaign.set_attribute_value(&id, "ETATDE", Facet::Current, "12"));
        assert_eq!(campaign.attribute_value(&id, "ETATDE", Facet::Current), "12");
    }

    #[test]
    fn test_token_fields() {
        let campaign = InMemoryCampaign::new();
        let token = TokenId::new("-T1");
        campaign.add_token(TokenRecord {
            id: token.clone(),
            ..Default::default()
        });
        campaign.set_token_field(&token, TokenField::Represents, FieldValue::text("-C9"));
        campaign.set_token_field(&token, TokenField::BarValue(1), FieldValue::text("5"));
        campaign.set_token_markers(&token, "red,dead");

        let record = campaign.token(&token).unwrap();
        assert_eq!(record.represents, Some(CharacterId::new("-C9")));
        assert_eq!(record.statusmarkers, "red,dead");
        assert_eq!(
            campaign.token_field(&token, &TokenField::BarValue(1)),
            Some(FieldValue::text("5"))
        );
    }
}
