//! Repeating section resolver
//!
//! Row ids are recomputed on every call: the store may change between
//! commands, so nothing is cached.

use tracing::trace;

use crate::application::ports::outbound::AttributeStorePort;
use crate::domain::value_objects::{
    order_attribute, row_id_of, section_prefix, CharacterId, Facet, RowId,
};

/// Row ids of `section` for a character.
///
/// Rows come in discovery (store) order unless the section's order
/// attribute lists some of them: listed rows come first, in listed order
/// (matched case-insensitively), then the unlisted rows in discovery order.
/// Listed ids with no attribute are dropped.
pub fn row_ids_for(store: &dyn AttributeStorePort, character: &CharacterId, section: &str) -> Vec<RowId> {
    let mut discovered: Vec<RowId> = Vec::new();
    for attribute in store.find_attributes(character, Some(&section_prefix(section))) {
        if let Some(row) = row_id_of(&attribute.name, section) {
            if !discovered.contains(&row) {
                discovered.push(row);
            }
        }
    }

    let order = store.attribute_value(character, &order_attribute(section), Facet::Current);
    if order.trim().is_empty() {
        return discovered;
    }

    let listed = order
        .split(',')
        .map(|id| id.trim().to_lowercase())
        .filter_map(|id| {
            discovered
                .iter()
                .find(|row| row.as_str().to_lowercase() == id)
                .cloned()
        });

    let mut ordered: Vec<RowId> = Vec::with_capacity(discovered.len());
    for row in listed.chain(discovered.iter().cloned()) {
        if !ordered.contains(&row) {
            ordered.push(row);
        }
    }
    trace!(section, rows = ordered.len(), "Resolved ordered rows");
    ordered
}
