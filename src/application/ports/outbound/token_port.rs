//! Token store port - graphics on the tabletop

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, FieldValue, TokenField, TokenId};

/// A token as seen by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: TokenId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub imgsrc: String,
    /// Character the token stands for, if any
    #[serde(default)]
    pub represents: Option<CharacterId>,
    /// Comma-separated marker tags
    #[serde(default)]
    pub statusmarkers: String,
}

pub trait TokenStorePort: Send + Sync {
    fn token(&self, id: &TokenId) -> Option<TokenRecord>;

    fn set_token_field(&self, id: &TokenId, field: TokenField, value: FieldValue);

    fn token_markers(&self, id: &TokenId) -> String {
        self.token(id).map(|t| t.statusmarkers).unwrap_or_default()
    }

    fn set_token_markers(&self, id: &TokenId, markers: &str);
}
