//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles: it holds the
//! outbound ports it needs and never touches an adapter directly.

pub mod bar_link_service;
pub mod command_service;
pub mod marker_service;
pub mod menu;
pub mod repeating_sections;

// Re-export the command entry point
pub use command_service::{CommandError, CommandService};

// Re-export use case traits
#[allow(unused_imports)]
pub use bar_link_service::{BarLinkService, BarLinkServiceImpl};
#[allow(unused_imports)]
pub use marker_service::{MarkerService, MarkerServiceImpl};
#[allow(unused_imports)]
pub use menu::{MenuService, MenuServiceImpl};
