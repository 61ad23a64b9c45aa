//! Strongly-typed identifiers for host objects
//!
//! The host hands out opaque string ids (e.g. `-NcKq3xZ1a`), so these wrap a
//! `String` rather than a UUID. Ids minted locally (in-memory campaign) are
//! UUID-derived.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        // Not every id type uses every constructor
        #[allow(dead_code)]
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh id in the host's `-xxxx` style
            pub fn generate() -> Self {
                Self(format!("-{}", Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(CharacterId);
define_id!(TokenId);
define_id!(AttributeId);
define_id!(HandoutId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct_and_dash_prefixed() {
        let a = TokenId::generate();
        let b = TokenId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with('-'));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = CharacterId::new("-Mabc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"-Mabc\"");
    }
}
