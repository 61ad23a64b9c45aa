//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize commands without knowing the services behind them.

pub mod command;

pub use command::*;
