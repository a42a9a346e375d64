//! Landing page section rendering
//!
//! Maps the ordered layout tokens of a resolved settings document to
//! renderable section descriptors. Pure and order-preserving: hidden
//! sections and unrecognized tokens simply produce nothing.

use chrono::{DateTime, Utc};

use crate::models::settings::{EventSettings, LandingPageSettings};

/// One renderable section of the guest-facing landing page
#[derive(Debug, Clone, PartialEq)]
pub enum LandingSection {
    Title { text: String },
    DateText { text: String },
    Welcome { text: String },
    Countdown { target: DateTime<Utc> },
    Rsvp,
    Links { parts: Vec<LinkPart> },
    Gallery,
}

/// An element of the rendered links row: sub-links interleaved with
/// separators, never leading or trailing.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkPart {
    Link(LandingLink),
    Separator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandingLink {
    pub label: &'static str,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Dinner,
    Party,
    Wishlist,
    Playlist,
}

impl LinkTarget {
    pub fn label(&self) -> &'static str {
        match self {
            LinkTarget::Dinner => "Middag",
            LinkTarget::Party => "Fest",
            LinkTarget::Wishlist => "Ønskeliste",
            LinkTarget::Playlist => "Sangønsker",
        }
    }
}

/// Map the layout tokens to section descriptors, in layout order.
///
/// The sequence is lazy and finite; tokens whose section is switched off and
/// tokens nobody recognizes yield no element.
pub fn landing_sections(
    settings: &EventSettings,
) -> impl Iterator<Item = LandingSection> + '_ {
    settings
        .landing_page
        .layout
        .iter()
        .filter_map(move |token| section_for_token(settings, token))
}

fn section_for_token(settings: &EventSettings, token: &str) -> Option<LandingSection> {
    let page = &settings.landing_page;
    match token {
        "title" => Some(LandingSection::Title {
            text: page.title.clone(),
        }),
        "date" => Some(LandingSection::DateText {
            text: page.date_text.clone(),
        }),
        "welcome" => Some(LandingSection::Welcome {
            text: page.welcome_text.clone(),
        }),
        "countdown" => Some(LandingSection::Countdown {
            target: settings.countdown.target,
        }),
        "rsvp" => page.show_rsvp.then_some(LandingSection::Rsvp),
        "links" => {
            let parts = link_parts(page);
            if parts.is_empty() {
                None
            } else {
                Some(LandingSection::Links { parts })
            }
        }
        "gallery" => page.show_gallery.then_some(LandingSection::Gallery),
        _ => None,
    }
}

/// Build the links row: enabled sub-links in fixed order, joined by
/// separators.
fn link_parts(page: &LandingPageSettings) -> Vec<LinkPart> {
    let enabled = [
        (page.show_dinner, LinkTarget::Dinner),
        (page.show_party, LinkTarget::Party),
        (page.show_wishlist, LinkTarget::Wishlist),
        (page.show_playlist, LinkTarget::Playlist),
    ];

    let mut parts = Vec::new();
    for (show, target) in enabled {
        if !show {
            continue;
        }
        if !parts.is_empty() {
            parts.push(LinkPart::Separator);
        }
        parts.push(LinkPart::Link(LandingLink {
            label: target.label(),
            target,
        }));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::EventSettings;

    fn settings_with_layout(tokens: &[&str]) -> EventSettings {
        let mut settings = EventSettings::default();
        settings.landing_page.layout = tokens.iter().map(|t| t.to_string()).collect();
        settings
    }

    #[test]
    fn test_output_order_matches_layout_order() {
        let settings = settings_with_layout(&["welcome", "title", "date"]);
        let sections: Vec<_> = landing_sections(&settings).collect();
        assert!(matches!(sections[0], LandingSection::Welcome { .. }));
        assert!(matches!(sections[1], LandingSection::Title { .. }));
        assert!(matches!(sections[2], LandingSection::DateText { .. }));
    }

    #[test]
    fn test_hidden_sections_drop_without_reordering() {
        let mut settings = settings_with_layout(&["title", "rsvp", "gallery", "date"]);
        settings.landing_page.show_rsvp = false;
        settings.landing_page.show_gallery = false;
        let sections: Vec<_> = landing_sections(&settings).collect();
        assert_eq!(sections.len(), 2);
        assert!(matches!(sections[0], LandingSection::Title { .. }));
        assert!(matches!(sections[1], LandingSection::DateText { .. }));
    }

    #[test]
    fn test_unrecognized_tokens_yield_nothing() {
        let settings = settings_with_layout(&["title", "confetti", "map"]);
        let sections: Vec<_> = landing_sections(&settings).collect();
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_links_filter_and_separators() {
        let mut settings = settings_with_layout(&["links"]);
        settings.landing_page.show_dinner = false;
        settings.landing_page.show_party = true;
        settings.landing_page.show_wishlist = false;
        settings.landing_page.show_playlist = true;

        let sections: Vec<_> = landing_sections(&settings).collect();
        assert_eq!(sections.len(), 1);
        let LandingSection::Links { parts } = &sections[0] else {
            panic!("expected links section");
        };

        assert_eq!(parts.len(), 3);
        assert!(
            matches!(&parts[0], LinkPart::Link(link) if link.label == "Fest")
        );
        assert_eq!(parts[1], LinkPart::Separator);
        assert!(
            matches!(&parts[2], LinkPart::Link(link) if link.label == "Sangønsker")
        );
    }

    #[test]
    fn test_links_single_sub_link_has_no_separator() {
        let mut settings = settings_with_layout(&["links"]);
        settings.landing_page.show_dinner = true;
        settings.landing_page.show_party = false;
        settings.landing_page.show_wishlist = false;
        settings.landing_page.show_playlist = false;

        let sections: Vec<_> = landing_sections(&settings).collect();
        let LandingSection::Links { parts } = &sections[0] else {
            panic!("expected links section");
        };
        assert_eq!(parts.len(), 1);
        assert!(matches!(&parts[0], LinkPart::Link(link) if link.label == "Middag"));
    }

    #[test]
    fn test_links_all_disabled_renders_nothing() {
        let mut settings = settings_with_layout(&["links"]);
        settings.landing_page.show_dinner = false;
        settings.landing_page.show_party = false;
        settings.landing_page.show_wishlist = false;
        settings.landing_page.show_playlist = false;

        assert_eq!(landing_sections(&settings).count(), 0);
    }

    #[test]
    fn test_countdown_carries_target() {
        let settings = settings_with_layout(&["countdown"]);
        let sections: Vec<_> = landing_sections(&settings).collect();
        assert_eq!(
            sections[0],
            LandingSection::Countdown {
                target: settings.countdown.target
            }
        );
    }
}
