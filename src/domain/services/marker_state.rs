//! Token marker state machine
//!
//! Pure transition from (current marker set, operations, catalogue) to a new
//! marker set plus the side effects the caller must apply: legacy
//! `status_<name>` mirrors for standard markers and attribute writes for
//! markers with a sheet meaning. Unresolvable names are skipped; the rest of
//! the batch still applies, in input order.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    Badge, FieldValue, MarkerDefinition, MarkerOp, MarkerOpKind, MarkerSet, StandardMarker,
};

/// A non-standard marker that also sets a character attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerAttributeEffect {
    pub marker: &'static str,
    pub attribute: &'static str,
    pub on_add: &'static str,
    pub on_remove: &'static str,
}

/// Markers with a sheet meaning. New entries need no state machine change.
pub const MARKER_ATTRIBUTE_EFFECTS: &[MarkerAttributeEffect] = &[MarkerAttributeEffect {
    // Weakened: the sheet rolls d12 instead of d20
    marker: "affaibli",
    attribute: "ETATDE",
    on_add: "12",
    on_remove: "20",
}];

/// Legacy token property update for a standard marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LegacyMirror {
    Set {
        marker: StandardMarker,
        badge: Option<u8>,
    },
    Clear {
        marker: StandardMarker,
    },
}

impl LegacyMirror {
    pub fn marker(&self) -> StandardMarker {
        match self {
            LegacyMirror::Set { marker, .. } | LegacyMirror::Clear { marker } => *marker,
        }
    }

    /// Badge number when set with one, `true` when set without, `false` when cleared
    pub fn value(&self) -> FieldValue {
        match self {
            LegacyMirror::Set {
                badge: Some(badge), ..
            } => FieldValue::Number(*badge),
            LegacyMirror::Set { badge: None, .. } => FieldValue::Bool(true),
            LegacyMirror::Clear { .. } => FieldValue::Bool(false),
        }
    }
}

/// Character attribute overwrite requested by a marker operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeWrite {
    pub attribute: String,
    pub value: String,
}

/// Result of applying a batch of operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerTransition {
    pub markers: MarkerSet,
    pub mirrors: Vec<LegacyMirror>,
    pub attribute_writes: Vec<AttributeWrite>,
    /// Names that resolved to no marker
    pub ignored: Vec<String>,
}

/// Marker name resolved to the tag stored on the token
struct ResolvedMarker {
    tag: String,
    standard: Option<StandardMarker>,
}

/// Catalogue entries win over the standard vocabulary
fn resolve(name: &str, catalogue: &[MarkerDefinition]) -> Option<ResolvedMarker> {
    if let Some(custom) = catalogue.iter().find(|m| m.name == name) {
        return Some(ResolvedMarker {
            tag: custom.tag.clone(),
            standard: None,
        });
    }
    StandardMarker::from_name(name).map(|standard| ResolvedMarker {
        tag: standard.name().to_string(),
        standard: Some(standard),
    })
}

fn badged(tag: &str, badge: Option<Badge>) -> String {
    match badge {
        Some(badge) => format!("{tag}@{}", badge.value()),
        None => tag.to_string(),
    }
}

/// Apply `ops` in order to `current`
pub fn apply_marker_ops(
    current: MarkerSet,
    ops: &[MarkerOp],
    catalogue: &[MarkerDefinition],
) -> MarkerTransition {
    let mut transition = MarkerTransition {
        markers: current,
        ..Default::default()
    };

    for op in ops {
        match op.op {
            MarkerOpKind::Add => add(&mut transition, op, catalogue),
            MarkerOpKind::Remove if op.is_wildcard() => clear_all(&mut transition),
            MarkerOpKind::Remove => remove(&mut transition, op, catalogue),
        }

        if StandardMarker::from_name(&op.name).is_none() {
            if let Some(effect) = MARKER_ATTRIBUTE_EFFECTS.iter().find(|e| e.marker == op.name) {
                let value = match op.op {
                    MarkerOpKind::Add => effect.on_add,
                    MarkerOpKind::Remove => effect.on_remove,
                };
                transition.attribute_writes.push(AttributeWrite {
                    attribute: effect.attribute.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    transition
}

fn add(transition: &mut MarkerTransition, op: &MarkerOp, catalogue: &[MarkerDefinition]) {
    let Some(resolved) = resolve(&op.name, catalogue) else {
        transition.ignored.push(op.name.clone());
        return;
    };
    let badge = op.badge();
    if let Some(marker) = resolved.standard {
        transition.mirrors.push(LegacyMirror::Set {
            marker,
            badge: badge.map(|b| b.value()),
        });
    }
    // Exact-string dedup: `dead@2` and `dead@5` coexist
    transition.markers.insert(badged(&resolved.tag, badge));
}

fn remove(transition: &mut MarkerTransition, op: &MarkerOp, catalogue: &[MarkerDefinition]) {
    let Some(resolved) = resolve(&op.name, catalogue) else {
        transition.ignored.push(op.name.clone());
        return;
    };
    transition.markers.remove_prefixed(&resolved.tag);
    if let Some(marker) = StandardMarker::from_name(&op.name) {
        transition.mirrors.push(LegacyMirror::Clear { marker });
    }
}

fn clear_all(transition: &mut MarkerTransition) {
    let mut cleared: Vec<StandardMarker> = Vec::new();
    for tag in transition.markers.clear() {
        if let Some(marker) = StandardMarker::from_tag(&tag) {
            if !cleared.contains(&marker) {
                cleared.push(marker);
            }
        }
    }
    transition
        .mirrors
        .extend(cleared.into_iter().map(|marker| LegacyMirror::Clear { marker }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<MarkerDefinition> {
        vec![MarkerDefinition {
            name: "blessed".to_string(),
            tag: "Blessed::4821".to_string(),
        }]
    }

    fn run(current: &str, ops: &[MarkerOp]) -> MarkerTransition {
        apply_marker_ops(MarkerSet::parse(current), ops, &catalogue())
    }

    #[test]
    fn test_add_replaces_canonical_empty_set() {
        let t = run("", &[MarkerOp::add("dead")]);
        assert_eq!(t.markers.to_stored(), "dead");
    }

    #[test]
    fn test_add_is_idempotent_on_exact_tag() {
        let t = run("", &[MarkerOp::add("dead"), MarkerOp::add("dead")]);
        assert_eq!(t.markers.tags(), ["dead"]);
    }

    #[test]
    fn test_differing_badges_coexist() {
        let t = run("", &[MarkerOp::add("dead"), MarkerOp::add_with_badge("dead", 3)]);
        assert_eq!(t.markers.tags(), ["dead", "dead@3"]);
    }

    #[test]
    fn test_remove_by_base_name_removes_badge_variants() {
        let t = run("dead@2,dead@5", &[MarkerOp::remove("dead")]);
        assert!(t.markers.is_empty());
        assert_eq!(
            t.mirrors,
            vec![LegacyMirror::Clear {
                marker: StandardMarker::Dead
            }]
        );
    }

    #[test]
    fn test_unrelated_markers_are_preserved() {
        let t = run("Blessed::4821,red", &[MarkerOp::add("blue"), MarkerOp::remove("red")]);
        assert_eq!(t.markers.tags(), ["Blessed::4821", "blue"]);
    }

    #[test]
    fn test_custom_marker_uses_catalogue_tag_without_mirror() {
        let t = run("", &[MarkerOp::add_with_badge("blessed", 2)]);
        assert_eq!(t.markers.tags(), ["Blessed::4821@2"]);
        assert!(t.mirrors.is_empty());
    }

    #[test]
    fn test_standard_add_sets_mirror_with_badge() {
        let t = run("", &[MarkerOp::add_with_badge("red", 4), MarkerOp::add("green")]);
        assert_eq!(t.mirrors[0].value(), FieldValue::Number(4));
        assert_eq!(t.mirrors[1].value(), FieldValue::Bool(true));
        assert_eq!(t.mirrors[1].marker(), StandardMarker::Green);
    }

    #[test]
    fn test_out_of_range_badge_is_dropped() {
        let t = run("", &[MarkerOp::add_with_badge("red", 12)]);
        assert_eq!(t.markers.tags(), ["red"]);
    }

    #[test]
    fn test_unknown_names_are_ignored_and_batch_continues() {
        let t = run(
            "red",
            &[
                MarkerOp::add("sparkly"),
                MarkerOp::remove("nothing"),
                MarkerOp::add("dead"),
            ],
        );
        assert_eq!(t.markers.tags(), ["red", "dead"]);
        assert_eq!(t.ignored, vec!["sparkly", "nothing"]);
    }

    #[test]
    fn test_wildcard_clears_everything_and_standard_mirrors() {
        let t = run("red@2,Blessed::4821,dead,red", &[MarkerOp::remove("*")]);
        assert!(t.markers.is_empty());
        assert_eq!(
            t.mirrors,
            vec![
                LegacyMirror::Clear {
                    marker: StandardMarker::Red
                },
                LegacyMirror::Clear {
                    marker: StandardMarker::Dead
                },
            ]
        );
    }

    #[test]
    fn test_operations_apply_in_order() {
        let t = run("", &[MarkerOp::add("red"), MarkerOp::remove("*"), MarkerOp::add("blue")]);
        assert_eq!(t.markers.tags(), ["blue"]);
    }

    #[test]
    fn test_weakened_marker_writes_die_attribute() {
        let t = run("", &[MarkerOp::add("affaibli"), MarkerOp::remove("affaibli")]);
        assert_eq!(
            t.attribute_writes,
            vec![
                AttributeWrite {
                    attribute: "ETATDE".to_string(),
                    value: "12".to_string()
                },
                AttributeWrite {
                    attribute: "ETATDE".to_string(),
                    value: "20".to_string()
                },
            ]
        );
        // not in the catalogue, so no tag either way
        assert!(t.markers.is_empty());
    }
}
