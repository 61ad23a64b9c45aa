//! Marker Service - applies marker operations to a token
//!
//! Runs the marker state machine over the token's stored markers and
//! writes back its results: the new marker string, the legacy status
//! properties and, for a token representing a character, the attribute
//! overwrites.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::outbound::{
    AttributeStorePort, JournalPort, TokenRecord, TokenStorePort,
};
use crate::domain::services::marker_state::{apply_marker_ops, MarkerTransition};
use crate::domain::value_objects::{Facet, MarkerOp, MarkerSet, TokenField};

/// Marker synchronisation use case
pub trait MarkerService: Send + Sync {
    fn apply_marker_ops(&self, token: &TokenRecord, ops: &[MarkerOp]) -> MarkerTransition;
}

pub struct MarkerServiceImpl {
    tokens: Arc<dyn TokenStorePort>,
    attributes: Arc<dyn AttributeStorePort>,
    journal: Arc<dyn JournalPort>,
}

impl MarkerServiceImpl {
    pub fn new(
        tokens: Arc<dyn TokenStorePort>,
        attributes: Arc<dyn AttributeStorePort>,
        journal: Arc<dyn JournalPort>,
    ) -> Self {
        Self {
            tokens,
            attributes,
            journal,
        }
    }
}

impl MarkerService for MarkerServiceImpl {
    #[instrument(skip(self, token), fields(token = %token.id, ops = ops.len()))]
    fn apply_marker_ops(&self, token: &TokenRecord, ops: &[MarkerOp]) -> MarkerTransition {
        let current = MarkerSet::parse(&self.tokens.token_markers(&token.id));
        let catalogue = self.journal.marker_catalogue();
        let transition = apply_marker_ops(current, ops, &catalogue);

        self.tokens
            .set_token_markers(&token.id, &transition.markers.to_stored());
        for mirror in &transition.mirrors {
            self.tokens.set_token_field(
                &token.id,
                TokenField::Other(mirror.marker().legacy_property()),
                mirror.value(),
            );
        }

        if let Some(character) = &token.represents {
            for write in &transition.attribute_writes {
                let written = self.attributes.set_attribute_value(
                    character,
                    &write.attribute,
                    Facet::Current,
                    &write.value,
                );
                debug!(attribute = %write.attribute, value = %write.value, written, "Marker attribute write");
            }
        }

        if !transition.ignored.is_empty() {
            debug!(ignored = ?transition.ignored, "Unresolved marker names");
        }
        debug!(markers = transition.markers.tags().len(), "Markers applied");
        transition
    }
}
