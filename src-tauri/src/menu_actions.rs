use crate::{themes, window_zoom::ZoomChange};

pub const MENU_RECONNECT_GATEWAY: &str = "app_reconnect_gateway";
pub const MENU_RELOAD_CONFIG: &str = "app_reload_config";
pub const MENU_RELOAD_WINDOW: &str = "view_reload_window";
pub const MENU_FORCE_RELOAD: &str = "view_force_reload";
pub const MENU_TOGGLE_DEVTOOLS: &str = "view_toggle_devtools";
pub const MENU_RESET_ZOOM: &str = "view_reset_zoom";
pub const MENU_ZOOM_IN: &str = "view_zoom_in";
pub const MENU_ZOOM_OUT: &str = "view_zoom_out";
pub const MENU_THEME_PREFIX: &str = "theme:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ReconnectGateway,
    ReloadConfig,
    ReloadWindow,
    ForceReload,
    ToggleDevtools,
    Zoom(ZoomChange),
    SelectTheme(&'static str),
}

pub fn theme_menu_id(theme_id: &str) -> String {
    format!("{MENU_THEME_PREFIX}{theme_id}")
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        MENU_RECONNECT_GATEWAY => Some(MenuAction::ReconnectGateway),
        MENU_RELOAD_CONFIG => Some(MenuAction::ReloadConfig),
        MENU_RELOAD_WINDOW => Some(MenuAction::ReloadWindow),
        MENU_FORCE_RELOAD => Some(MenuAction::ForceReload),
        MENU_TOGGLE_DEVTOOLS => Some(MenuAction::ToggleDevtools),
        MENU_RESET_ZOOM => Some(MenuAction::Zoom(ZoomChange::Reset)),
        MENU_ZOOM_IN => Some(MenuAction::Zoom(ZoomChange::In)),
        MENU_ZOOM_OUT => Some(MenuAction::Zoom(ZoomChange::Out)),
        other => other
            .strip_prefix(MENU_THEME_PREFIX)
            .and_then(themes::find_theme)
            .map(|theme| MenuAction::SelectTheme(theme.id)),
    }
}
