//! Domain services - Pure logic over value objects

pub mod chat_format;
pub mod marker_state;
pub mod schema_registry;
pub mod stat_block;
