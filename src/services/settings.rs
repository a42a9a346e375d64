//! Event settings resolver
//!
//! Pure functions that turn the persisted, partially-filled JSONB documents
//! into fully-populated typed views. Resolution is defaults + per-section
//! shallow merge; the legacy layout migration is a separate, idempotent pass
//! that runs after the merge on every load.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::settings::{
    CommonSettings, CountdownSettings, EventConfig, EventSettings, LandingPageSettings,
    PageSettings,
};

/// Resolve the persisted settings document against the default template.
///
/// Recognized sections merge field by field: a persisted field wins when it
/// deserializes to the field's type, otherwise the default stands. Unknown
/// top-level keys are preserved verbatim. The layout migration runs last.
pub fn resolve_settings(persisted: Option<&Value>) -> EventSettings {
    let mut settings = EventSettings::default();

    if let Some(Value::Object(doc)) = persisted {
        for (key, value) in doc {
            match key.as_str() {
                "countdown" => merge_countdown(&mut settings.countdown, value),
                "landingPage" => merge_landing_page(&mut settings.landing_page, value),
                "dinner" => merge_page(&mut settings.dinner, value),
                "party" => merge_page(&mut settings.party, value),
                "common" => merge_common(&mut settings.common, value),
                _ => {
                    settings.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }

    migrate_layout(&mut settings.landing_page.layout);
    settings
}

/// Resolve the module-toggle config document. Same rule as the settings
/// merge, one level deep.
pub fn resolve_config(persisted: Option<&Value>) -> EventConfig {
    let mut config = EventConfig::default();

    if let Some(Value::Object(doc)) = persisted {
        for (key, value) in doc {
            match key.as_str() {
                "rsvp" => merge_field(doc, "rsvp", &mut config.rsvp),
                "seating" => merge_field(doc, "seating", &mut config.seating),
                "wishlist" => merge_field(doc, "wishlist", &mut config.wishlist),
                "playlist" => merge_field(doc, "playlist", &mut config.playlist),
                "gallery" => merge_field(doc, "gallery", &mut config.gallery),
                "budget" => merge_field(doc, "budget", &mut config.budget),
                _ => {
                    config.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }

    config
}

/// Expand legacy composite layout tokens in place.
///
/// `"text"` becomes `"date", "welcome"` and `"actions"` becomes
/// `"rsvp", "links"`; everything else passes through in order. Running the
/// pass on already-migrated data is a no-op.
pub fn migrate_layout(layout: &mut Vec<String>) {
    if !layout.iter().any(|t| t == "text" || t == "actions") {
        return;
    }

    *layout = layout
        .iter()
        .flat_map(|token| match token.as_str() {
            "text" => vec!["date".to_string(), "welcome".to_string()],
            "actions" => vec!["rsvp".to_string(), "links".to_string()],
            other => vec![other.to_string()],
        })
        .collect();
}

/// Overwrite `slot` with the persisted value when it is present and
/// deserializes to the field's type.
fn merge_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, slot: &mut T) {
    if let Some(value) = obj.get(key) {
        if let Ok(parsed) = serde_json::from_value::<T>(value.clone()) {
            *slot = parsed;
        }
    }
}

fn merge_countdown(base: &mut CountdownSettings, patch: &Value) {
    let Some(obj) = patch.as_object() else { return };
    merge_field(obj, "target", &mut base.target);
}

fn merge_landing_page(base: &mut LandingPageSettings, patch: &Value) {
    let Some(obj) = patch.as_object() else { return };
    merge_field(obj, "title", &mut base.title);
    merge_field(obj, "dateText", &mut base.date_text);
    merge_field(obj, "welcomeText", &mut base.welcome_text);
    merge_field(obj, "showGallery", &mut base.show_gallery);
    merge_field(obj, "showRsvp", &mut base.show_rsvp);
    merge_field(obj, "showDinner", &mut base.show_dinner);
    merge_field(obj, "showParty", &mut base.show_party);
    merge_field(obj, "showWishlist", &mut base.show_wishlist);
    merge_field(obj, "showPlaylist", &mut base.show_playlist);
    merge_field(obj, "layout", &mut base.layout);
    merge_field(obj, "verticalOffset", &mut base.vertical_offset);
}

fn merge_page(base: &mut PageSettings, patch: &Value) {
    let Some(obj) = patch.as_object() else { return };
    merge_field(obj, "title", &mut base.title);
    merge_field(obj, "intro", &mut base.intro);
    merge_field(obj, "cards", &mut base.cards);
}

fn merge_common(base: &mut CommonSettings, patch: &Value) {
    let Some(obj) = patch.as_object() else { return };
    merge_field(obj, "bride", &mut base.bride);
    merge_field(obj, "groom", &mut base.groom);
    merge_field(obj, "toastmaster", &mut base.toastmaster);
    merge_field(obj, "hashtag", &mut base.hashtag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_resolve_null_returns_full_defaults() {
        let settings = resolve_settings(None);
        assert_eq!(settings, EventSettings::default());
        assert!(!settings.landing_page.layout.is_empty());
        assert!(!settings.dinner.cards.is_empty());
    }

    #[test]
    fn test_persisted_fields_win() {
        let doc = json!({
            "landingPage": {
                "title": "Kari & Ola",
                "showRsvp": false
            },
            "common": { "hashtag": "#kariogola2026" }
        });
        let settings = resolve_settings(Some(&doc));
        assert_eq!(settings.landing_page.title, "Kari & Ola");
        assert!(!settings.landing_page.show_rsvp);
        assert_eq!(settings.common.hashtag, "#kariogola2026");
        // Untouched fields retain their defaults
        let defaults = LandingPageSettings::default();
        assert_eq!(settings.landing_page.welcome_text, defaults.welcome_text);
        assert!(settings.landing_page.show_gallery);
    }

    #[test]
    fn test_type_mismatch_keeps_default() {
        let doc = json!({
            "landingPage": {
                "title": 42,
                "showRsvp": "yes please"
            }
        });
        let settings = resolve_settings(Some(&doc));
        let defaults = LandingPageSettings::default();
        assert_eq!(settings.landing_page.title, defaults.title);
        assert_eq!(settings.landing_page.show_rsvp, defaults.show_rsvp);
    }

    #[test]
    fn test_unknown_top_level_keys_preserved() {
        let doc = json!({
            "landingPage": { "title": "Hei" },
            "experiments": { "newGallery": true }
        });
        let settings = resolve_settings(Some(&doc));
        assert_eq!(
            settings.extra.get("experiments"),
            Some(&json!({ "newGallery": true }))
        );
        // The preserved key survives serialization of the merged view
        let round = serde_json::to_value(&settings).unwrap();
        assert_eq!(round["experiments"]["newGallery"], json!(true));
    }

    #[test]
    fn test_legacy_layout_tokens_expand_in_order() {
        let doc = json!({
            "landingPage": { "layout": ["title", "text", "actions"] }
        });
        let settings = resolve_settings(Some(&doc));
        assert_eq!(
            settings.landing_page.layout,
            vec!["title", "date", "welcome", "rsvp", "links"]
        );
    }

    #[test]
    fn test_migration_noop_on_modern_layout() {
        let mut layout = vec![
            "title".to_string(),
            "date".to_string(),
            "welcome".to_string(),
        ];
        let before = layout.clone();
        migrate_layout(&mut layout);
        assert_eq!(layout, before);
    }

    #[test]
    fn test_migration_runs_twice_same_result() {
        let mut layout = vec![
            "text".to_string(),
            "countdown".to_string(),
            "actions".to_string(),
        ];
        migrate_layout(&mut layout);
        let once = layout.clone();
        migrate_layout(&mut layout);
        assert_eq!(layout, once);
    }

    #[test]
    fn test_resolve_config_defaults_and_overrides() {
        let config = resolve_config(None);
        assert!(config.rsvp && config.budget);

        let doc = json!({ "budget": false, "futureModule": true });
        let config = resolve_config(Some(&doc));
        assert!(!config.budget);
        assert!(config.rsvp);
        assert_eq!(config.extra.get("futureModule"), Some(&json!(true)));
    }

    #[test]
    fn test_non_object_document_ignored() {
        let doc = json!("not an object");
        let settings = resolve_settings(Some(&doc));
        assert_eq!(settings, EventSettings::default());
    }

    fn token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("text".to_string()),
            Just("actions".to_string()),
            Just("title".to_string()),
            Just("countdown".to_string()),
            "[a-z]{1,8}",
        ]
    }

    proptest! {
        #[test]
        fn migration_is_idempotent(tokens in proptest::collection::vec(token_strategy(), 0..12)) {
            let mut once = tokens.clone();
            migrate_layout(&mut once);
            let mut twice = once.clone();
            migrate_layout(&mut twice);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn migration_preserves_non_legacy_tokens(
            tokens in proptest::collection::vec(
                "[a-z]{1,8}".prop_filter("legacy tokens migrate", |t| t != "text" && t != "actions"),
                0..12,
            )
        ) {
            let mut migrated = tokens.clone();
            migrate_layout(&mut migrated);
            prop_assert_eq!(migrated, tokens);
        }
    }
}
