//! Domain layer - Core sheet logic with no I/O
//!
//! This layer contains:
//! - Value objects: ids, universe/archetype, markers, bars, settings
//! - Domain services: schema registry, marker state machine, chat markup,
//!   stat block layout

pub mod services;
pub mod value_objects;
