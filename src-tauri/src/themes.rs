//! Built-in color themes.
//!
//! Every theme fills the same [`ThemePalette`], so the stylesheet builder can
//! emit the full token set without checking for gaps.

use crate::{ThemeListing, ThemeSummary};

pub(crate) const DEFAULT_THEME_ID: &str = "midnight";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ThemePalette {
    pub(crate) bg_primary: &'static str,
    pub(crate) bg_secondary: &'static str,
    pub(crate) bg_tertiary: &'static str,
    pub(crate) text_primary: &'static str,
    pub(crate) text_secondary: &'static str,
    pub(crate) text_muted: &'static str,
    pub(crate) accent: &'static str,
    pub(crate) accent_strong: &'static str,
    pub(crate) ok: &'static str,
    pub(crate) warn: &'static str,
    pub(crate) danger: &'static str,
    pub(crate) border: &'static str,
    pub(crate) scroll_thumb: &'static str,
    pub(crate) scroll_track: &'static str,
}

impl ThemePalette {
    pub(crate) fn tokens(&self) -> [(&'static str, &'static str); 14] {
        [
            ("bg-primary", self.bg_primary),
            ("bg-secondary", self.bg_secondary),
            ("bg-tertiary", self.bg_tertiary),
            ("text-primary", self.text_primary),
            ("text-secondary", self.text_secondary),
            ("text-muted", self.text_muted),
            ("accent", self.accent),
            ("accent-strong", self.accent_strong),
            ("ok", self.ok),
            ("warn", self.warn),
            ("danger", self.danger),
            ("border", self.border),
            ("scroll-thumb", self.scroll_thumb),
            ("scroll-track", self.scroll_track),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ThemeDefinition {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) palette: ThemePalette,
}

pub(crate) const THEMES: [ThemeDefinition; 5] = [
    ThemeDefinition {
        id: "midnight",
        name: "Midnight",
        description: "Deep charcoal with the OpenClaw ember accent.",
        palette: ThemePalette {
            bg_primary: "#0f1117",
            bg_secondary: "#161922",
            bg_tertiary: "#1e2230",
            text_primary: "#e6e8ef",
            text_secondary: "#b4b9c8",
            text_muted: "#7c8396",
            accent: "#e85d3a",
            accent_strong: "#ff7a52",
            ok: "#3ecf8e",
            warn: "#f5b94a",
            danger: "#f0524f",
            border: "#262b3a",
            scroll_thumb: "rgba(230, 232, 239, 0.18)",
            scroll_track: "transparent",
        },
    },
    ThemeDefinition {
        id: "graphite",
        name: "Graphite",
        description: "Neutral greys that stay out of the way.",
        palette: ThemePalette {
            bg_primary: "#1b1b1d",
            bg_secondary: "#232326",
            bg_tertiary: "#2c2c30",
            text_primary: "#ececec",
            text_secondary: "#c2c2c6",
            text_muted: "#8a8a90",
            accent: "#9aa4b2",
            accent_strong: "#c3cad4",
            ok: "#5fbf7f",
            warn: "#d9a441",
            danger: "#e0605c",
            border: "#343438",
            scroll_thumb: "rgba(236, 236, 236, 0.16)",
            scroll_track: "transparent",
        },
    },
    ThemeDefinition {
        id: "ocean",
        name: "Ocean",
        description: "Cool navy layers with a cyan accent.",
        palette: ThemePalette {
            bg_primary: "#0b1622",
            bg_secondary: "#10202f",
            bg_tertiary: "#172a3d",
            text_primary: "#e2eef8",
            text_secondary: "#a9c0d3",
            text_muted: "#6f8aa1",
            accent: "#2fb5d6",
            accent_strong: "#5fd3ef",
            ok: "#36c98f",
            warn: "#f0b54a",
            danger: "#ef5d68",
            border: "#1f3447",
            scroll_thumb: "rgba(226, 238, 248, 0.18)",
            scroll_track: "transparent",
        },
    },
    ThemeDefinition {
        id: "aurora",
        name: "Aurora",
        description: "Dark violet with a green-to-purple glow.",
        palette: ThemePalette {
            bg_primary: "#120f1c",
            bg_secondary: "#1a1528",
            bg_tertiary: "#241d36",
            text_primary: "#ece8f7",
            text_secondary: "#c1b8da",
            text_muted: "#857ba3",
            accent: "#8b6cf6",
            accent_strong: "#4ee0a8",
            ok: "#4ee0a8",
            warn: "#f4c15a",
            danger: "#f4607a",
            border: "#2e2644",
            scroll_thumb: "rgba(236, 232, 247, 0.18)",
            scroll_track: "transparent",
        },
    },
    ThemeDefinition {
        id: "daylight",
        name: "Daylight",
        description: "Light surfaces for bright rooms.",
        palette: ThemePalette {
            bg_primary: "#f7f7f9",
            bg_secondary: "#ffffff",
            bg_tertiary: "#eceef2",
            text_primary: "#1c1f26",
            text_secondary: "#444a57",
            text_muted: "#7a8190",
            accent: "#d9482a",
            accent_strong: "#b8391e",
            ok: "#1f9d63",
            warn: "#b7791f",
            danger: "#c9302c",
            border: "#dde0e6",
            scroll_thumb: "rgba(28, 31, 38, 0.22)",
            scroll_track: "transparent",
        },
    },
];

pub(crate) fn find_theme(id: &str) -> Option<&'static ThemeDefinition> {
    let id = id.trim();
    THEMES
        .iter()
        .find(|theme| theme.id.eq_ignore_ascii_case(id))
}

pub(crate) fn default_theme() -> &'static ThemeDefinition {
    &THEMES[0]
}

pub(crate) fn theme_listing(current: &ThemeDefinition) -> ThemeListing {
    ThemeListing {
        themes: THEMES
            .iter()
            .map(|theme| ThemeSummary {
                id: theme.id,
                name: theme.name,
                description: theme.description,
            })
            .collect(),
        current: current.id,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn default_theme_is_first_catalog_entry() {
        assert_eq!(default_theme().id, DEFAULT_THEME_ID);
        assert_eq!(find_theme(DEFAULT_THEME_ID), Some(default_theme()));
    }

    #[test]
    fn theme_ids_are_unique() {
        let ids: HashSet<_> = THEMES.iter().map(|theme| theme.id).collect();
        assert_eq!(ids.len(), THEMES.len());
    }

    #[test]
    fn every_theme_fills_every_token() {
        for theme in &THEMES {
            for (token, value) in theme.palette.tokens() {
                assert!(!value.trim().is_empty(), "{}: {token} is empty", theme.id);
            }
        }
    }

    #[test]
    fn find_theme_is_case_insensitive() {
        assert_eq!(find_theme(" Ocean ").map(|theme| theme.id), Some("ocean"));
        assert_eq!(find_theme("solarized"), None);
    }

    #[test]
    fn listing_marks_current_theme() {
        let listing = theme_listing(find_theme("aurora").expect("aurora"));
        assert_eq!(listing.current, "aurora");
        assert_eq!(listing.themes.len(), THEMES.len());
        assert_eq!(listing.themes[0].id, "midnight");
    }
}
