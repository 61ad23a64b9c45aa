//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Memory campaign: in-memory host store implementing every port
//! - HTTP: REST API routes for the typed command surface
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod memory_campaign;
pub mod state;
