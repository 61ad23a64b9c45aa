//! Application layer - Use cases over the host ports
//!
//! This layer contains:
//! - Ports: attribute, token, chat and journal interfaces the host implements
//! - DTOs: the typed command surface and its outcomes
//! - Services: repeating rows, menus, markers, bar links, command handling

pub mod dto;
pub mod ports;
pub mod services;
