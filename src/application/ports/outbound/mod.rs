//! Outbound ports - Interfaces that the application requires from the host

mod attribute_port;
mod chat_port;
mod journal_port;
mod token_port;

pub use attribute_port::{AttributeRecord, AttributeStorePort, CharacterRecord};
pub use chat_port::{ChatMessage, ChatPort, Recipient};
pub use journal_port::{AbilityMacro, HandoutRef, JournalPort};
pub use token_port::{TokenRecord, TokenStorePort};
