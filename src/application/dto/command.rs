//! Command DTOs
//!
//! The typed command surface. Whatever parses user input builds one of
//! these; the engine never sees free text.

use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::ChatMessage;
use crate::domain::services::marker_state::LegacyMirror;
use crate::domain::value_objects::{
    CharacterId, CoshSettings, LinkSummary, MarkerOp, MarkerSet, RowId, SettingsUpdate, TokenId,
};

/// Which menu to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuKind {
    /// Overview of the character's paths
    Paths {
        #[serde(default)]
        descriptions_only: bool,
    },
    /// Ranks owned in one path
    Path {
        number: u8,
        #[serde(default)]
        descriptions_only: bool,
    },
    Abilities,
    Attacks,
    Characteristics,
    /// Roll one attack row directly
    AttackRoll { row: RowId },
    /// GM summary of the sheet
    StatBlock,
}

/// A fully parsed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    RenderMenu {
        character_id: CharacterId,
        menu: MenuKind,
    },
    ApplyMarkerOps {
        token_id: TokenId,
        ops: Vec<MarkerOp>,
    },
    LinkBars {
        token_id: TokenId,
        /// Character to link to; defaults to the one the token represents
        #[serde(default)]
        character_id: Option<CharacterId>,
        #[serde(default)]
        mook: bool,
    },
    UpdateSettings {
        update: SettingsUpdate,
    },
    ShowSettings,
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// `None` when the menu had nothing to show
    Menu { message: Option<ChatMessage> },
    Markers {
        markers: MarkerSet,
        mirrors: Vec<LegacyMirror>,
    },
    Bars { summary: LinkSummary },
    Settings { settings: CoshSettings },
}
