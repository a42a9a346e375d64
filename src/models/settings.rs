//! Typed event settings and config documents
//!
//! `EventSettings` is the in-memory merged view the resolver produces from
//! the persisted JSONB document: every recognized field carries a default, so
//! a reader never sees a missing value. `EventConfig` is the second override
//! layer, a flat document of module toggles. JSON keys are camelCase to match
//! the persisted documents.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Fully-resolved settings document for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSettings {
    pub countdown: CountdownSettings,
    pub landing_page: LandingPageSettings,
    pub dinner: PageSettings,
    pub party: PageSettings,
    pub common: CommonSettings,
    /// Unrecognized top-level keys, preserved verbatim across a
    /// load/save round trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownSettings {
    pub target: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandingPageSettings {
    pub title: String,
    pub date_text: String,
    pub welcome_text: String,
    pub show_gallery: bool,
    pub show_rsvp: bool,
    pub show_dinner: bool,
    pub show_party: bool,
    pub show_wishlist: bool,
    pub show_playlist: bool,
    /// Ordered section tokens the landing page renders top to bottom
    pub layout: Vec<String>,
    /// Vertical offset of the hero block, in percent of viewport height
    pub vertical_offset: f64,
}

/// Content for one of the per-audience info pages (dinner or party)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub title: String,
    pub intro: String,
    pub cards: Vec<InfoCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoCard {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub body: String,
    pub detail: String,
}

/// Named roles and shared copy used across pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonSettings {
    pub bride: String,
    pub groom: String,
    pub toastmaster: String,
    pub hashtag: String,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            countdown: CountdownSettings::default(),
            landing_page: LandingPageSettings::default(),
            dinner: PageSettings::dinner_default(),
            party: PageSettings::party_default(),
            common: CommonSettings::default(),
            extra: serde_json::Map::new(),
        }
    }
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            // Placeholder date shown until the couple sets their own
            target: Utc.with_ymd_and_hms(2026, 6, 20, 14, 0, 0).unwrap(),
        }
    }
}

impl Default for LandingPageSettings {
    fn default() -> Self {
        Self {
            title: "Velkommen til festen".to_string(),
            date_text: "20. juni 2026".to_string(),
            welcome_text: "Vi gleder oss til å feire dagen sammen med dere!".to_string(),
            show_gallery: true,
            show_rsvp: true,
            show_dinner: true,
            show_party: true,
            show_wishlist: true,
            show_playlist: true,
            layout: vec![
                "title".to_string(),
                "date".to_string(),
                "welcome".to_string(),
                "countdown".to_string(),
                "rsvp".to_string(),
                "links".to_string(),
                "gallery".to_string(),
            ],
            vertical_offset: 30.0,
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            intro: String::new(),
            cards: Vec::new(),
        }
    }
}

impl PageSettings {
    fn dinner_default() -> Self {
        Self {
            title: "Middag".to_string(),
            intro: "Vi inviterer til middag med de nærmeste.".to_string(),
            cards: vec![
                InfoCard {
                    id: "time".to_string(),
                    icon: "clock".to_string(),
                    title: "Tidspunkt".to_string(),
                    body: "Middagen starter kl. 17:00.".to_string(),
                    detail: "Vennligst møt opp i god tid.".to_string(),
                },
                InfoCard {
                    id: "place".to_string(),
                    icon: "map-pin".to_string(),
                    title: "Sted".to_string(),
                    body: "Festlokalet".to_string(),
                    detail: String::new(),
                },
            ],
        }
    }

    fn party_default() -> Self {
        Self {
            title: "Fest".to_string(),
            intro: "Etter middagen åpner vi dørene for alle festgjester.".to_string(),
            cards: vec![InfoCard {
                id: "time".to_string(),
                icon: "clock".to_string(),
                title: "Tidspunkt".to_string(),
                body: "Festen starter kl. 21:00.".to_string(),
                detail: String::new(),
            }],
        }
    }
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            bride: String::new(),
            groom: String::new(),
            toastmaster: String::new(),
            hashtag: String::new(),
        }
    }
}

/// Resolved module-toggle document: which UI modules are enabled for an
/// event. Independent of `EventSettings`, which holds content and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventConfig {
    pub rsvp: bool,
    pub seating: bool,
    pub wishlist: bool,
    pub playlist: bool,
    pub gallery: bool,
    pub budget: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            rsvp: true,
            seating: true,
            wishlist: true,
            playlist: true,
            gallery: true,
            budget: true,
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_serialize_camel_case() {
        let settings = EventSettings::default();
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("landingPage").is_some());
        assert!(json["landingPage"].get("welcomeText").is_some());
        assert!(json["landingPage"].get("verticalOffset").is_some());
    }

    #[test]
    fn test_partial_info_card_fills_missing_fields() {
        let card: InfoCard =
            serde_json::from_value(serde_json::json!({ "title": "Tidspunkt" })).unwrap();
        assert_eq!(card.title, "Tidspunkt");
        assert_eq!(card.id, "");
        assert_eq!(card.icon, "");
        assert_eq!(card.body, "");
        assert_eq!(card.detail, "");
    }

    #[test]
    fn test_default_layout_has_no_legacy_tokens() {
        let layout = LandingPageSettings::default().layout;
        assert!(!layout.contains(&"text".to_string()));
        assert!(!layout.contains(&"actions".to_string()));
    }
}
