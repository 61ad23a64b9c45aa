//! Chat port - outgoing messages

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CharacterId;

/// Who receives a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", content = "character", rename_all = "snake_case")]
pub enum Recipient {
    All,
    Gm,
    /// Whisper to a character (its controllers and the GM)
    Character(CharacterId),
}

/// A message ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name the message is sent as
    pub speaker: String,
    pub text: String,
    pub recipient: Recipient,
}

pub trait ChatPort: Send + Sync {
    fn broadcast(&self, message: ChatMessage);
}
