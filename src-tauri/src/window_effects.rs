//! Window background effects requested by the page (`setVibrancy`).

use tauri::window::Effect;

const LEGACY_VIBRANCY: [&str; 5] = ["ultra-dark", "dark", "light", "medium-light", "appearance-based"];

/// `Ok(None)` clears the effect.
pub(crate) fn parse_vibrancy(raw: Option<&str>) -> Result<Option<Effect>, String> {
    let name = raw.map(str::trim).unwrap_or_default().to_ascii_lowercase();
    if name.is_empty() || name == "none" {
        return Ok(None);
    }
    if LEGACY_VIBRANCY.contains(&name.as_str()) {
        return Ok(Some(Effect::UnderWindowBackground));
    }

    let effect = match name.as_str() {
        "titlebar" => Effect::Titlebar,
        "selection" => Effect::Selection,
        "menu" => Effect::Menu,
        "popover" => Effect::Popover,
        "sidebar" => Effect::Sidebar,
        "header" => Effect::HeaderView,
        "sheet" => Effect::Sheet,
        "window" => Effect::WindowBackground,
        "hud" => Effect::HudWindow,
        "fullscreen-ui" => Effect::FullScreenUI,
        "tooltip" => Effect::Tooltip,
        "content" => Effect::ContentBackground,
        "under-window" => Effect::UnderWindowBackground,
        "under-page" => Effect::UnderPageBackground,
        "mica" => Effect::Mica,
        "tabbed" => Effect::Tabbed,
        "blur" => Effect::Blur,
        "acrylic" => Effect::Acrylic,
        other => return Err(format!("Unsupported vibrancy '{other}'.")),
    };
    Ok(Some(effect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_none_clear_the_effect() {
        assert_eq!(parse_vibrancy(None), Ok(None));
        assert_eq!(parse_vibrancy(Some("  ")), Ok(None));
        assert_eq!(parse_vibrancy(Some("None")), Ok(None));
    }

    #[test]
    fn named_effects_map_to_window_effects() {
        assert_eq!(parse_vibrancy(Some("sidebar")), Ok(Some(Effect::Sidebar)));
        assert_eq!(parse_vibrancy(Some("Under-Window")), Ok(Some(Effect::UnderWindowBackground)));
        assert_eq!(parse_vibrancy(Some("mica")), Ok(Some(Effect::Mica)));
    }

    #[test]
    fn legacy_names_fall_back_to_under_window() {
        for legacy in LEGACY_VIBRANCY {
            assert_eq!(parse_vibrancy(Some(legacy)), Ok(Some(Effect::UnderWindowBackground)));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(parse_vibrancy(Some("glitter")).is_err());
    }
}
