//! Attribute value facets

use serde::{Deserialize, Serialize};

/// Which of an attribute's two values to read or write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    #[default]
    Current,
    Max,
}

impl Facet {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "current" => Some(Facet::Current),
            "max" => Some(Facet::Max),
            _ => None,
        }
    }
}
