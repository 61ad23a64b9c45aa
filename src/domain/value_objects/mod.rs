//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod bars;
mod game_system;
mod ids;
mod marker;
mod repeating;
mod settings;
mod token;

pub use attribute::Facet;
pub use bars::{BarBinding, BarOutcome, BarSource, BarTable, LinkSummary};
pub use game_system::{Archetype, Universe};
pub use ids::*;
pub use marker::{Badge, MarkerDefinition, MarkerOp, MarkerOpKind, MarkerSet, StandardMarker};
pub use repeating::{order_attribute, row_id_of, section_prefix, RowId};
pub use settings::{BarOverride, CoshSettings, SettingsUpdate};
pub use token::{FieldValue, TokenField};
