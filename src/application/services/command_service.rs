//! Command Service - entry point for typed commands
//!
//! Owns the runtime settings and routes each [`Command`] to the use case
//! handling it. Missing host objects are the only reported errors; inside
//! the use cases everything degrades to empty output.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::dto::{Command, CommandOutcome};
use crate::application::ports::outbound::{
    AttributeStorePort, CharacterRecord, ChatMessage, ChatPort, JournalPort, Recipient,
    TokenRecord, TokenStorePort,
};
use crate::application::services::bar_link_service::{BarLinkService, BarLinkServiceImpl};
use crate::application::services::marker_service::{MarkerService, MarkerServiceImpl};
use crate::application::services::menu::{MenuService, MenuServiceImpl};
use crate::domain::services::chat_format::{button, COMMAND_PREFIX};
use crate::domain::value_objects::{CharacterId, CoshSettings, TokenId};

/// Name the settings panel is sent as
pub const HELPER_NAME: &str = "COsh";

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),
    #[error("Token {0} does not represent a character")]
    TokenNotLinked(TokenId),
}

pub struct CommandService {
    settings: CoshSettings,
    attributes: Arc<dyn AttributeStorePort>,
    tokens: Arc<dyn TokenStorePort>,
    chat: Arc<dyn ChatPort>,
    menus: Arc<dyn MenuService>,
    markers: Arc<dyn MarkerService>,
    bars: Arc<dyn BarLinkService>,
}

impl CommandService {
    pub fn new(
        settings: CoshSettings,
        attributes: Arc<dyn AttributeStorePort>,
        tokens: Arc<dyn TokenStorePort>,
        journal: Arc<dyn JournalPort>,
        chat: Arc<dyn ChatPort>,
    ) -> Self {
        let menus = Arc::new(MenuServiceImpl::new(
            attributes.clone(),
            journal.clone(),
            chat.clone(),
        ));
        let markers = Arc::new(MarkerServiceImpl::new(
            tokens.clone(),
            attributes.clone(),
            journal,
        ));
        let bars = Arc::new(BarLinkServiceImpl::new(tokens.clone(), attributes.clone()));
        Self {
            settings,
            attributes,
            tokens,
            chat,
            menus,
            markers,
            bars,
        }
    }

    pub fn settings(&self) -> &CoshSettings {
        &self.settings
    }

    #[instrument(skip(self, command))]
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        match command {
            Command::RenderMenu { character_id, menu } => {
                info!(character = %character_id, ?menu, "Rendering menu");
                let character = self.character(&character_id)?;
                let message = self.menus.render(&self.settings, &character, &menu);
                Ok(CommandOutcome::Menu { message })
            }
            Command::ApplyMarkerOps { token_id, ops } => {
                info!(token = %token_id, ops = ops.len(), "Applying marker operations");
                let token = self.token(&token_id)?;
                let transition = self.markers.apply_marker_ops(&token, &ops);
                Ok(CommandOutcome::Markers {
                    markers: transition.markers,
                    mirrors: transition.mirrors,
                })
            }
            Command::LinkBars {
                token_id,
                character_id,
                mook,
            } => {
                info!(token = %token_id, mook, "Linking bars");
                let token = self.token(&token_id)?;
                let character_id = character_id
                    .or_else(|| token.represents.clone())
                    .ok_or_else(|| CommandError::TokenNotLinked(token_id.clone()))?;
                let character = self.character(&character_id)?;
                let summary = self.bars.link_bars(&self.settings, &token, &character, mook);
                Ok(CommandOutcome::Bars { summary })
            }
            Command::UpdateSettings { update } => {
                info!(?update, "Updating settings");
                self.settings.apply(&update);
                self.show_settings();
                Ok(CommandOutcome::Settings {
                    settings: self.settings.clone(),
                })
            }
            Command::ShowSettings => {
                self.show_settings();
                Ok(CommandOutcome::Settings {
                    settings: self.settings.clone(),
                })
            }
        }
    }

    fn character(&self, id: &CharacterId) -> Result<CharacterRecord, CommandError> {
        self.attributes
            .character(id)
            .ok_or_else(|| CommandError::CharacterNotFound(id.clone()))
    }

    fn token(&self, id: &TokenId) -> Result<TokenRecord, CommandError> {
        self.tokens
            .token(id)
            .ok_or_else(|| CommandError::TokenNotFound(id.clone()))
    }

    /// Whisper the settings panel to the GM
    fn show_settings(&self) {
        let text = settings_panel(&self.settings);
        if self.settings.logging {
            debug!(%text, "Settings panel");
        }
        self.chat.broadcast(ChatMessage {
            speaker: HELPER_NAME.to_string(),
            text,
            recipient: Recipient::Gm,
        });
    }
}

fn settings_panel(settings: &CoshSettings) -> String {
    let other = settings.universe.other();
    let config = |option: &str| format!("{COMMAND_PREFIX} config {option}");
    format!(
        "&{{template:default}} {{{{name={HELPER_NAME} v{} Config}}}} \
         {{{{Univers=*{}* {}}}}} \
         {{{{Msg privés=*{}* {}}}}} \
         {{{{Logging=*{}* {}}}}}",
        env!("CARGO_PKG_VERSION"),
        settings.universe,
        button(other.code(), &config(&format!("--universe {}", other.code()))),
        settings.whisper,
        button("Toggle", &config("--whisper")),
        settings.logging,
        button("Toggle", &config("--log")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::MenuKind;
    use crate::domain::value_objects::{Archetype, MarkerOp, SettingsUpdate, Universe};
    use crate::infrastructure::memory_campaign::InMemoryCampaign;

    fn setup() -> (Arc<InMemoryCampaign>, CommandService) {
        let campaign = Arc::new(InMemoryCampaign::new());
        let service = CommandService::new(
            CoshSettings::default(),
            campaign.clone(),
            campaign.clone(),
            campaign.clone(),
            campaign.clone(),
        );
        (campaign, service)
    }

    #[test]
    fn test_missing_objects_are_reported() {
        let (_, mut service) = setup();
        let result = service.execute(Command::RenderMenu {
            character_id: CharacterId::new("-nope"),
            menu: MenuKind::Attacks,
        });
        assert!(matches!(result, Err(CommandError::CharacterNotFound(_))));

        let result = service.execute(Command::ApplyMarkerOps {
            token_id: TokenId::new("-nope"),
            ops: vec![MarkerOp::add("dead")],
        });
        assert!(matches!(result, Err(CommandError::TokenNotFound(_))));
    }

    #[test]
    fn test_link_bars_needs_a_character() {
        let (campaign, mut service) = setup();
        let token = TokenId::new("-T1");
        campaign.add_token(TokenRecord {
            id: token.clone(),
            ..Default::default()
        });
        let result = service.execute(Command::LinkBars {
            token_id: token.clone(),
            character_id: None,
            mook: false,
        });
        assert!(matches!(result, Err(CommandError::TokenNotLinked(_))));

        let character = CharacterId::new("-C1");
        campaign.add_character(&character, "Gobelin");
        campaign.add_attribute(&character, Archetype::SHEET_ATTRIBUTE, "pnj", "");
        campaign.add_attribute(&character, "pnj_pv", "5", "12");
        let outcome = service
            .execute(Command::LinkBars {
                token_id: token.clone(),
                character_id: Some(character.clone()),
                mook: false,
            })
            .unwrap();
        let CommandOutcome::Bars { summary } = outcome else {
            panic!("expected bars outcome");
        };
        assert!(summary.mook);
        assert_eq!(campaign.token(&token).unwrap().represents, Some(character));
    }

    #[test]
    fn test_settings_updates_are_whispered_to_gm() {
        let (campaign, mut service) = setup();
        service
            .execute(Command::UpdateSettings {
                update: SettingsUpdate::SetUniverse {
                    universe: Universe::Cog,
                },
            })
            .unwrap();
        service
            .execute(Command::UpdateSettings {
                update: SettingsUpdate::ToggleWhisper,
            })
            .unwrap();
        assert_eq!(service.settings().universe, Universe::Cog);
        assert!(service.settings().whisper);

        let log = campaign.chat_log();
        assert_eq!(log.len(), 2);
        let panel = &log[1];
        assert_eq!(panel.recipient, Recipient::Gm);
        assert_eq!(panel.speaker, HELPER_NAME);
        assert!(panel.text.contains("{{Univers=*COG* [COC](!cosh config --universe COC\""));
        assert!(panel.text.contains("{{Msg privés=*true* [Toggle](!cosh config --whisper\""));
    }

    #[test]
    fn test_commands_parse_from_json() {
        let command: Command = serde_json::from_str(
            r#"{"command":"apply_marker_ops","token_id":"-T1",
                "ops":[{"op":"add","name":"dead","badge":2},{"op":"remove","name":"*"}]}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::ApplyMarkerOps {
                token_id: TokenId::new("-T1"),
                ops: vec![MarkerOp::add_with_badge("dead", 2), MarkerOp::remove("*")],
            }
        );

        let command: Command = serde_json::from_str(
            r#"{"command":"render_menu","character_id":"-C1","menu":{"kind":"paths"}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::RenderMenu {
                character_id: CharacterId::new("-C1"),
                menu: MenuKind::Paths {
                    descriptions_only: false
                },
            }
        );
    }
}
