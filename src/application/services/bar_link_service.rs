//! Bar Link Service - binds token bars to sheet attributes
//!
//! Bars fed by a gauge are snapshot in mook mode so every copy of a
//! disposable creature tracks its own hit points. Everything else gets a
//! live link to the attribute.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{
    AttributeStorePort, CharacterRecord, TokenRecord, TokenStorePort,
};
use crate::domain::services::schema_registry::bar_table_for;
use crate::domain::value_objects::{
    Archetype, BarBinding, BarOutcome, CoshSettings, Facet, FieldValue, LinkSummary, TokenField,
};

/// Bar linking use case
pub trait BarLinkService: Send + Sync {
    /// Link the token to the character and bind its bars. `mook` is forced
    /// on for non-player characters.
    fn link_bars(
        &self,
        settings: &CoshSettings,
        token: &TokenRecord,
        character: &CharacterRecord,
        mook: bool,
    ) -> LinkSummary;
}

pub struct BarLinkServiceImpl {
    tokens: Arc<dyn TokenStorePort>,
    attributes: Arc<dyn AttributeStorePort>,
}

impl BarLinkServiceImpl {
    pub fn new(tokens: Arc<dyn TokenStorePort>, attributes: Arc<dyn AttributeStorePort>) -> Self {
        Self { tokens, attributes }
    }

    /// Avatar, represented character and display name
    fn link_token(&self, token: &TokenRecord, character: &CharacterRecord) {
        if !character.avatar.is_empty() {
            self.tokens.set_token_field(
                &token.id,
                TokenField::ImgSrc,
                FieldValue::text(character.avatar.as_str()),
            );
        }
        if token.represents.is_none() {
            self.tokens.set_token_field(
                &token.id,
                TokenField::Represents,
                FieldValue::text(character.id.as_str()),
            );
        }
        if token.name.trim().is_empty() {
            self.tokens.set_token_field(
                &token.id,
                TokenField::Name,
                FieldValue::text(character.name.as_str()),
            );
        }
    }
}

impl BarLinkService for BarLinkServiceImpl {
    #[instrument(skip(self, settings, token, character), fields(token = %token.id, character = %character.id))]
    fn link_bars(
        &self,
        settings: &CoshSettings,
        token: &TokenRecord,
        character: &CharacterRecord,
        mook: bool,
    ) -> LinkSummary {
        self.link_token(token, character);

        let code = self.attributes.attribute_value(
            &character.id,
            Archetype::SHEET_ATTRIBUTE,
            Facet::Current,
        );
        let archetype = Archetype::from_sheet_code(&code);
        let mook = mook || archetype == Some(Archetype::NonPlayerCharacter);
        let mut summary = LinkSummary {
            mook,
            bars: Vec::new(),
        };

        let Some(table) = archetype.and_then(|a| bar_table_for(settings, a)) else {
            warn!(sheet_type = %code, universe = %settings.universe, "No bar table for sheet");
            return summary;
        };

        for (bar, source) in table.entries() {
            let Some(attribute) = self.attributes.find_attribute(&character.id, &source.attribute) else {
                debug!(bar, attribute = %source.attribute, "Bar attribute missing, skipped");
                summary.bars.push(BarOutcome {
                    bar,
                    attribute: source.attribute.clone(),
                    binding: None,
                });
                continue;
            };

            let binding = if mook && source.with_max {
                self.tokens.set_token_field(
                    &token.id,
                    TokenField::BarValue(bar),
                    FieldValue::text(attribute.current.as_str()),
                );
                self.tokens.set_token_field(
                    &token.id,
                    TokenField::BarMax(bar),
                    FieldValue::text(attribute.max.as_str()),
                );
                self.tokens
                    .set_token_field(&token.id, TokenField::BarLink(bar), FieldValue::text(""));
                BarBinding::Snapshot {
                    current: attribute.current,
                    max: attribute.max,
                }
            } else {
                self.tokens.set_token_field(
                    &token.id,
                    TokenField::BarLink(bar),
                    FieldValue::text(attribute.id.as_str()),
                );
                BarBinding::Linked {
                    attribute_id: attribute.id.to_string(),
                }
            };
            debug!(bar, attribute = %source.attribute, ?binding, "Bar bound");
            summary.bars.push(BarOutcome {
                bar,
                attribute: source.attribute.clone(),
                binding: Some(binding),
            });
        }

        info!(mook, bound = summary.bound().count(), "Token bars linked");
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{BarOverride, BarSource, BarTable, CharacterId, TokenId, Universe};
    use crate::infrastructure::memory_campaign::InMemoryCampaign;

    struct Fixture {
        campaign: Arc<InMemoryCampaign>,
        service: BarLinkServiceImpl,
        token: TokenRecord,
        character: CharacterId,
    }

    fn setup(sheet_type: &str) -> Fixture {
        let campaign = Arc::new(InMemoryCampaign::new());
        let character = CharacterId::new("-C1");
        campaign.add_character(&character, "Gobelin");
        campaign.add_attribute(&character, Archetype::SHEET_ATTRIBUTE, sheet_type, "");
        let token = TokenRecord {
            id: TokenId::new("-T1"),
            ..Default::default()
        };
        campaign.add_token(token.clone());
        let service = BarLinkServiceImpl::new(campaign.clone(), campaign.clone());
        Fixture {
            campaign,
            service,
            token,
            character,
        }
    }

    impl Fixture {
        fn link(&self, settings: &CoshSettings, mook: bool) -> LinkSummary {
            let character = self.campaign.character(&self.character).unwrap();
            self.service.link_bars(settings, &self.token, &character, mook)
        }

        fn field(&self, field: TokenField) -> Option<FieldValue> {
            self.campaign.token_field(&self.token.id, &field)
        }
    }

    #[test]
    fn test_npc_hit_points_are_snapshot() {
        let fx = setup("pnj");
        let def = fx.campaign.add_attribute(&fx.character, "pnj_def", "14", "");
        fx.campaign.add_attribute(&fx.character, "pnj_pv", "5", "12");

        let summary = fx.link(&CoshSettings::default(), false);
        assert!(summary.mook);
        assert_eq!(
            summary.outcome(3).unwrap().binding,
            Some(BarBinding::Snapshot {
                current: "5".to_string(),
                max: "12".to_string()
            })
        );
        assert_eq!(fx.field(TokenField::BarValue(3)), Some(FieldValue::text("5")));
        assert_eq!(fx.field(TokenField::BarMax(3)), Some(FieldValue::text("12")));
        assert_eq!(fx.field(TokenField::BarLink(3)), Some(FieldValue::text("")));

        // Non-gauge bars stay linked even in mook mode
        assert_eq!(fx.field(TokenField::BarLink(1)), Some(FieldValue::text(def.as_str())));
        assert!(summary.outcome(2).is_none());
    }

    #[test]
    fn test_player_character_bars_are_linked() {
        let fx = setup("pj");
        fx.campaign.add_attribute(&fx.character, "DEF", "15", "");
        let pv = fx.campaign.add_attribute(&fx.character, "PV", "8", "10");

        let summary = fx.link(&CoshSettings::default(), false);
        assert!(!summary.mook);
        assert_eq!(
            summary.outcome(3).unwrap().binding,
            Some(BarBinding::Linked {
                attribute_id: pv.to_string()
            })
        );
        assert_eq!(fx.field(TokenField::BarValue(3)), None);
        // PM is missing: skipped without failing the other bars
        assert_eq!(summary.outcome(2).unwrap().binding, None);
        assert_eq!(summary.bound().count(), 2);
    }

    #[test]
    fn test_explicit_mook_flag_snapshots_player_gauges() {
        let fx = setup("pj");
        fx.campaign.add_attribute(&fx.character, "PV", "8", "10");
        let summary = fx.link(&CoshSettings::default(), true);
        assert!(matches!(
            summary.outcome(3).unwrap().binding,
            Some(BarBinding::Snapshot { .. })
        ));
    }

    #[test]
    fn test_token_is_linked_to_character() {
        let fx = setup("pj");
        fx.campaign.set_avatar(&fx.character, "https://img/gobelin.png");
        fx.link(&CoshSettings::default(), false);

        let token = fx.campaign.token(&fx.token.id).unwrap();
        assert_eq!(token.imgsrc, "https://img/gobelin.png");
        assert_eq!(token.represents, Some(fx.character.clone()));
        assert_eq!(token.name, "Gobelin");
    }

    #[test]
    fn test_settings_override_and_unknown_sheet() {
        let fx = setup("vaisseau");
        fx.campaign.add_attribute(&fx.character, "BOUCLIER", "3", "6");
        let settings = CoshSettings {
            universe: Universe::Cog,
            bar_overrides: vec![BarOverride {
                universe: Universe::Cog,
                archetype: Archetype::Starship,
                table: BarTable::new(None, Some(BarSource::gauge("BOUCLIER")), None),
            }],
            ..Default::default()
        };
        let summary = fx.link(&settings, false);
        assert_eq!(summary.bars.len(), 1);
        assert_eq!(summary.bars[0].bar, 2);

        // A starship has no bar table in COC
        let summary = fx.link(&CoshSettings::default(), false);
        assert!(summary.bars.is_empty());
    }
}
