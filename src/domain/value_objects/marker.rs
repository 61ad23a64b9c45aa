//! Token status marker value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name that targets every marker in a remove operation
pub const WILDCARD_MARKER: &str = "*";

/// Whether an operation sets or clears a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerOpKind {
    Add,
    Remove,
}

/// Numeric badge shown on a marker, 1 to 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Badge(u8);

impl Badge {
    pub fn new(value: u8) -> Option<Self> {
        (1..=9).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// One requested marker change. Transient: consumed once by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerOp {
    pub op: MarkerOpKind,
    pub name: String,
    /// 0 means no badge; values outside 1..=9 are ignored
    #[serde(default)]
    pub badge: u8,
}

impl MarkerOp {
    #[cfg(test)]
    pub fn add(name: impl Into<String>) -> Self {
        Self {
            op: MarkerOpKind::Add,
            name: name.into(),
            badge: 0,
        }
    }

    #[cfg(test)]
    pub fn add_with_badge(name: impl Into<String>, badge: u8) -> Self {
        Self {
            badge,
            ..Self::add(name)
        }
    }

    #[cfg(test)]
    pub fn remove(name: impl Into<String>) -> Self {
        Self {
            op: MarkerOpKind::Remove,
            name: name.into(),
            badge: 0,
        }
    }

    pub fn badge(&self) -> Option<Badge> {
        Badge::new(self.badge)
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD_MARKER
    }
}

/// A campaign-defined custom marker (`{name, tag}` catalogue entry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDefinition {
    pub name: String,
    pub tag: String,
}

/// The host's built-in marker vocabulary. These carry a legacy
/// `status_<name>` property on the token in addition to the marker tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardMarker {
    Red,
    Blue,
    Green,
    Brown,
    Purple,
    Pink,
    Yellow,
    Dead,
}

impl StandardMarker {
    pub const ALL: [StandardMarker; 8] = [
        StandardMarker::Red,
        StandardMarker::Blue,
        StandardMarker::Green,
        StandardMarker::Brown,
        StandardMarker::Purple,
        StandardMarker::Pink,
        StandardMarker::Yellow,
        StandardMarker::Dead,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StandardMarker::Red => "red",
            StandardMarker::Blue => "blue",
            StandardMarker::Green => "green",
            StandardMarker::Brown => "brown",
            StandardMarker::Purple => "purple",
            StandardMarker::Pink => "pink",
            StandardMarker::Yellow => "yellow",
            StandardMarker::Dead => "dead",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Standard marker a token tag belongs to, ignoring any `@badge` suffix
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::from_name(base_tag(tag))
    }

    /// Legacy token property mirroring this marker
    pub fn legacy_property(&self) -> String {
        format!("status_{}", self.name())
    }
}

impl fmt::Display for StandardMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strip the `@badge` suffix from a marker tag
pub fn base_tag(tag: &str) -> &str {
    tag.split('@').next().unwrap_or(tag)
}

/// The ordered set of marker tags active on a token, as stored in its
/// comma-separated `statusmarkers` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet(Vec<String>);

impl MarkerSet {
    /// Parse the stored representation. The empty string (canonical empty
    /// set) and empty fragments produce no tags.
    pub fn parse(stored: &str) -> Self {
        Self(
            stored
                .split(',')
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Add `tag` unless the exact same string is already present.
    /// Returns whether the set changed.
    pub fn insert(&mut self, tag: String) -> bool {
        if self.contains(&tag) {
            false
        } else {
            self.0.push(tag);
            true
        }
    }

    /// Remove every tag starting with `prefix`, returning the removed tags
    pub fn remove_prefixed(&mut self, prefix: &str) -> Vec<String> {
        let (removed, kept): (Vec<String>, Vec<String>) = std::mem::take(&mut self.0)
            .into_iter()
            .partition(|tag| tag.starts_with(prefix));
        self.0 = kept;
        removed
    }

    /// Remove every tag, returning what was there
    pub fn clear(&mut self) -> Vec<String> {
        std::mem::take(&mut self.0)
    }

    /// Stored representation
    pub fn to_stored(&self) -> String {
        self.0.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_range() {
        assert!(Badge::new(0).is_none());
        assert_eq!(Badge::new(9).map(|b| b.value()), Some(9));
        assert!(Badge::new(10).is_none());
    }

    #[test]
    fn test_canonical_empty_set_parses_to_no_tags() {
        assert!(MarkerSet::parse("").is_empty());
        assert_eq!(MarkerSet::parse("red,dead@2").tags(), ["red", "dead@2"]);
    }

    #[test]
    fn test_standard_marker_from_badged_tag() {
        assert_eq!(StandardMarker::from_tag("dead@3"), Some(StandardMarker::Dead));
        assert_eq!(StandardMarker::from_tag("Blessed::1234"), None);
        assert_eq!(StandardMarker::Pink.legacy_property(), "status_pink");
    }

    #[test]
    fn test_marker_op_deserializes_without_badge() {
        let op: MarkerOp = serde_json::from_str(r#"{"op":"remove","name":"*"}"#).unwrap();
        assert!(op.is_wildcard());
        assert_eq!(op.op, MarkerOpKind::Remove);
        assert!(op.badge().is_none());
    }
}
