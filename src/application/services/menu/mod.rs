//! Menu synthesis - action menus rendered from a character sheet
//!
//! Every renderer returns the finished chat text, or an empty string when
//! there is nothing to show. An empty result is never broadcast.

mod paths;
mod rolls;

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dto::MenuKind;
use crate::application::ports::outbound::{
    AttributeStorePort, CharacterRecord, ChatMessage, ChatPort, JournalPort, Recipient,
};
use crate::application::services::repeating_sections::row_ids_for;
use crate::domain::services::schema_registry::{schema_for, FieldName, Schema, SectionName};
use crate::domain::services::stat_block::{layout_for, render_stat_block, StatSource};
use crate::domain::value_objects::{Archetype, CoshSettings, Facet, RowId};

/// Read access to one character's sheet under its schema
pub(crate) struct Sheet<'a> {
    pub attributes: &'a dyn AttributeStorePort,
    pub journal: &'a dyn JournalPort,
    pub character: &'a CharacterRecord,
    pub schema: &'static Schema,
}

impl Sheet<'_> {
    pub fn value(&self, name: &str) -> String {
        self.attributes
            .attribute_value(&self.character.id, name, Facet::Current)
    }

    pub fn row_value(&self, section: SectionName, row: &RowId, field: FieldName) -> String {
        self.value(&row.attribute_name(section.0, field.0))
    }

    pub fn rows(&self, section: SectionName) -> Vec<RowId> {
        row_ids_for(self.attributes, &self.character.id, section.0)
    }

    /// GM when the sheet's GM toggle is set, else the character itself when
    /// whispering is on, else everyone
    fn recipient(&self, settings: &CoshSettings) -> Recipient {
        let to_gm = self
            .schema
            .gm_flag
            .map(|flag| self.value(flag.0))
            .unwrap_or_default();
        if !to_gm.trim().is_empty() {
            Recipient::Gm
        } else if settings.whisper {
            Recipient::Character(self.character.id.clone())
        } else {
            Recipient::All
        }
    }
}

struct SheetStats<'a> {
    attributes: &'a dyn AttributeStorePort,
    character: &'a CharacterRecord,
}

impl StatSource for SheetStats<'_> {
    fn stat(&self, attribute: &str, facet: Facet) -> Option<String> {
        self.attributes
            .find_attribute(&self.character.id, attribute)
            .map(|a| a.value(facet).to_string())
    }
}

/// Menu rendering use case
pub trait MenuService: Send + Sync {
    /// Render a menu and broadcast it. Returns the message sent, if any.
    fn render(&self, settings: &CoshSettings, character: &CharacterRecord, kind: &MenuKind) -> Option<ChatMessage>;
}

pub struct MenuServiceImpl {
    attributes: Arc<dyn AttributeStorePort>,
    journal: Arc<dyn JournalPort>,
    chat: Arc<dyn ChatPort>,
}

impl MenuServiceImpl {
    pub fn new(
        attributes: Arc<dyn AttributeStorePort>,
        journal: Arc<dyn JournalPort>,
        chat: Arc<dyn ChatPort>,
    ) -> Self {
        Self {
            attributes,
            journal,
            chat,
        }
    }

    fn archetype(&self, character: &CharacterRecord) -> Option<Archetype> {
        let code = self.attributes.attribute_value(
            &character.id,
            Archetype::SHEET_ATTRIBUTE,
            Facet::Current,
        );
        Archetype::from_sheet_code(&code)
    }

    fn stat_block(&self, settings: &CoshSettings, character: &CharacterRecord, archetype: Archetype) -> String {
        let Some(rows) = layout_for(settings.universe, archetype) else {
            return String::new();
        };
        let source = SheetStats {
            attributes: self.attributes.as_ref(),
            character,
        };
        render_stat_block(&character.name, archetype, rows, &source)
    }
}

impl MenuService for MenuServiceImpl {
    #[instrument(skip(self, settings, character), fields(character = %character.id))]
    fn render(&self, settings: &CoshSettings, character: &CharacterRecord, kind: &MenuKind) -> Option<ChatMessage> {
        let Some(archetype) = self.archetype(character) else {
            debug!("Unknown sheet type, nothing to render");
            return None;
        };
        let Some(schema) = schema_for(settings.universe, archetype) else {
            debug!(universe = %settings.universe, %archetype, "No schema for sheet");
            return None;
        };
        let sheet = Sheet {
            attributes: self.attributes.as_ref(),
            journal: self.journal.as_ref(),
            character,
            schema,
        };

        let (text, recipient) = match kind {
            MenuKind::Paths { descriptions_only } => {
                (paths::overview(&sheet, *descriptions_only), sheet.recipient(settings))
            }
            MenuKind::Path {
                number,
                descriptions_only,
            } => (
                paths::detail(&sheet, *number, *descriptions_only),
                sheet.recipient(settings),
            ),
            MenuKind::Abilities => (rolls::abilities(&sheet), sheet.recipient(settings)),
            MenuKind::Attacks => (rolls::attacks(&sheet), sheet.recipient(settings)),
            MenuKind::Characteristics => (rolls::characteristics(&sheet), sheet.recipient(settings)),
            MenuKind::AttackRoll { row } => (rolls::attack_roll(&sheet, row), sheet.recipient(settings)),
            MenuKind::StatBlock => (self.stat_block(settings, character, archetype), Recipient::Gm),
        };

        if text.is_empty() {
            debug!(?kind, "Nothing to show");
            return None;
        }

        let message = ChatMessage {
            speaker: character.name.clone(),
            text,
            recipient,
        };
        if settings.logging {
            debug!(text = %message.text, recipient = ?message.recipient, "Menu message");
        }
        self.chat.broadcast(message.clone());
        Some(message)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::value_objects::{CharacterId, Universe};
    use crate::infrastructure::memory_campaign::InMemoryCampaign;

    pub(crate) struct Fixture {
        pub campaign: Arc<InMemoryCampaign>,
        pub service: MenuServiceImpl,
        pub character: CharacterRecord,
    }

    impl Fixture {
        pub fn new(sheet_type: &str) -> Self {
            let campaign = Arc::new(InMemoryCampaign::new());
            let id = CharacterId::new("-C1");
            campaign.add_character(&id, "Zora");
            campaign.add_attribute(&id, Archetype::SHEET_ATTRIBUTE, sheet_type, "");
            let service = MenuServiceImpl::new(campaign.clone(), campaign.clone(), campaign.clone());
            let character = campaign.character(&id).unwrap();
            Self {
                campaign,
                service,
                character,
            }
        }

        pub fn set(&self, name: &str, value: &str) {
            self.campaign
                .add_attribute(&self.character.id, name, value, "");
        }

        pub fn render(&self, universe: Universe, kind: MenuKind) -> Option<ChatMessage> {
            let settings = CoshSettings {
                universe,
                ..Default::default()
            };
            self.service.render(&settings, &self.character, &kind)
        }
    }

    #[test]
    fn test_cog_pilot_end_to_end() {
        let fx = Fixture::new("pj");
        fx.set("voie1nom", "Pilote");
        fx.set("v1r1", "1");
        fx.set("v1r1-t", "Manoeuvre");

        let overview = fx
            .render(Universe::Cog, MenuKind::Paths { descriptions_only: false })
            .unwrap();
        assert_eq!(overview.text.matches("!cosh actions --voie").count(), 1);
        assert!(overview.text.contains("[1. Pilote](!cosh actions --voie 1 --charId=-C1\""));

        let detail = fx
            .render(
                Universe::Cog,
                MenuKind::Path {
                    number: 1,
                    descriptions_only: false,
                },
            )
            .unwrap();
        assert!(detail.text.contains("{{name=@{Zora|voie1nom}}}"));
        assert!(detail.text.contains("{{desc=1. Manoeuvre\n\r }}"));
        assert_eq!(fx.campaign.chat_log().len(), 2);
    }

    #[test]
    fn test_empty_menu_is_not_broadcast() {
        let fx = Fixture::new("pj");
        assert!(fx.render(Universe::Coc, MenuKind::Attacks).is_none());
        assert!(fx
            .render(Universe::Coc, MenuKind::Paths { descriptions_only: false })
            .is_none());
        assert!(fx.campaign.chat_log().is_empty());
    }

    #[test]
    fn test_unknown_sheet_renders_nothing() {
        let fx = Fixture::new("dragon");
        fx.set("voie1nom", "Pilote");
        assert!(fx
            .render(Universe::Coc, MenuKind::Paths { descriptions_only: false })
            .is_none());

        let vehicle_in_cog = Fixture::new("vehicule");
        assert!(vehicle_in_cog.render(Universe::Cog, MenuKind::StatBlock).is_none());
    }

    #[test]
    fn test_recipient_rules() {
        let fx = Fixture::new("pj");
        assert_eq!(
            fx.render(Universe::Coc, MenuKind::Characteristics).unwrap().recipient,
            Recipient::All
        );

        let whisper = CoshSettings {
            whisper: true,
            ..Default::default()
        };
        let message = fx
            .service
            .render(&whisper, &fx.character, &MenuKind::Characteristics)
            .unwrap();
        assert_eq!(message.recipient, Recipient::Character(fx.character.id.clone()));

        fx.set("togm", "/w gm ");
        let message = fx
            .service
            .render(&whisper, &fx.character, &MenuKind::Characteristics)
            .unwrap();
        assert_eq!(message.recipient, Recipient::Gm);
    }

    #[test]
    fn test_stat_block_goes_to_gm() {
        let fx = Fixture::new("pnj");
        fx.campaign
            .add_attribute(&fx.character.id, "pnj_pv", "5", "12");
        let message = fx.render(Universe::Coc, MenuKind::StatBlock).unwrap();
        assert_eq!(message.recipient, Recipient::Gm);
        assert!(message.text.contains("Zora (pnj)"));
        assert!(message.text.contains("<b>5</b>"));
        assert!(message.text.contains("<b>12</b>"));
    }

    #[test]
    fn test_menu_kind_json() {
        let kind: MenuKind =
            serde_json::from_str(r#"{"kind":"path","number":2}"#).unwrap();
        assert_eq!(
            kind,
            MenuKind::Path {
                number: 2,
                descriptions_only: false
            }
        );
        let kind: MenuKind =
            serde_json::from_str(r#"{"kind":"attack_roll","row":"0"}"#).unwrap();
        assert_eq!(kind, MenuKind::AttackRoll { row: RowId::new("0") });
    }
}
