//! Token fields written by the engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// A writable token property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TokenField {
    Name,
    ImgSrc,
    Represents,
    BarValue(u8),
    BarMax(u8),
    BarLink(u8),
    /// Any other property, by its host name (e.g. `status_dead`)
    Other(String),
}

impl TokenField {
    pub fn key(&self) -> String {
        match self {
            TokenField::Name => "name".to_string(),
            TokenField::ImgSrc => "imgsrc".to_string(),
            TokenField::Represents => "represents".to_string(),
            TokenField::BarValue(n) => format!("bar{n}_value"),
            TokenField::BarMax(n) => format!("bar{n}_max"),
            TokenField::BarLink(n) => format!("bar{n}_link"),
            TokenField::Other(key) => key.clone(),
        }
    }

    fn parse(key: &str) -> Self {
        let bar = |suffix: &str| -> Option<u8> {
            key.strip_prefix("bar")?
                .strip_suffix(suffix)?
                .parse()
                .ok()
        };
        match key {
            "name" => TokenField::Name,
            "imgsrc" => TokenField::ImgSrc,
            "represents" => TokenField::Represents,
            _ => {
                if let Some(n) = bar("_value") {
                    TokenField::BarValue(n)
                } else if let Some(n) = bar("_max") {
                    TokenField::BarMax(n)
                } else if let Some(n) = bar("_link") {
                    TokenField::BarLink(n)
                } else {
                    TokenField::Other(key.to_string())
                }
            }
        }
    }
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<TokenField> for String {
    fn from(field: TokenField) -> Self {
        field.key()
    }
}

impl From<String> for TokenField {
    fn from(key: String) -> Self {
        TokenField::parse(&key)
    }
}

/// Value stored in a token property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(u8),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_round_trip_through_host_names() {
        assert_eq!(TokenField::BarLink(3).key(), "bar3_link");
        assert_eq!(TokenField::from("bar2_max".to_string()), TokenField::BarMax(2));
        assert_eq!(
            TokenField::from("status_dead".to_string()),
            TokenField::Other("status_dead".to_string())
        );
    }
}
