//! Repeating section naming conventions
//!
//! Attributes named `repeating_<section>_<rowId>_<field>` belong to a row of a
//! dynamically sized section. Row ids are opaque and unique only within one
//! section of one character.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every repeating attribute name
pub const REPEATING_PREFIX: &str = "repeating_";

/// Prefix of the per-section display order attribute
pub const REPORDER_PREFIX: &str = "_reporder_";

/// Opaque identifier of one row inside a repeating section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A purely numeric row reference addresses the row by position
    /// (`$0`, `$1`, ...) rather than by its stored id.
    pub fn is_positional(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())
    }

    /// Full attribute name of `field` in this row of `section`
    pub fn attribute_name(&self, section: &str, field: &str) -> String {
        if self.is_positional() {
            format!("{REPEATING_PREFIX}{section}_${}_{field}", self.0)
        } else {
            format!("{REPEATING_PREFIX}{section}_{}_{field}", self.0)
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name prefix matching every attribute of `section`
pub fn section_prefix(section: &str) -> String {
    format!("{REPEATING_PREFIX}{section}_")
}

/// Name of the display order attribute for `section`
pub fn order_attribute(section: &str) -> String {
    format!("{REPORDER_PREFIX}{section}")
}

/// Extract the row id from an attribute name of `section`, if it is one
pub fn row_id_of(attribute_name: &str, section: &str) -> Option<RowId> {
    let rest = attribute_name.strip_prefix(&section_prefix(section))?;
    let row = rest.split('_').next().unwrap_or_default();
    if row.is_empty() {
        None
    } else {
        Some(RowId::new(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_and_positional_rows_format_differently() {
        let opaque = RowId::new("-MzX1a");
        assert_eq!(
            opaque.attribute_name("armes", "pjatk"),
            "repeating_armes_-MzX1a_pjatk"
        );

        let positional = RowId::new("0");
        assert!(positional.is_positional());
        assert_eq!(
            positional.attribute_name("armes", "pjatk"),
            "repeating_armes_$0_pjatk"
        );
    }

    #[test]
    fn test_row_id_extraction() {
        assert_eq!(
            row_id_of("repeating_armes_-Abc_armenom", "armes"),
            Some(RowId::new("-Abc"))
        );
        // `armesv` must not be mistaken for `armes`
        assert_eq!(row_id_of("repeating_armesv_-Abc_armenom", "armes"), None);
        assert_eq!(row_id_of("PV", "armes"), None);
    }
}
