use tauri::AppHandle;

use crate::{
    main_window,
    menu_actions::{self, MenuAction},
    shell_actions,
};

pub fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    let result = match menu_actions::action_from_menu_id(menu_id) {
        Some(MenuAction::ReconnectGateway) => shell_actions::reconnect_gateway(app_handle),
        Some(MenuAction::ReloadConfig) => shell_actions::reload_config(app_handle),
        Some(MenuAction::ReloadWindow) => {
            main_window::reload_main_window(app_handle);
            Ok(())
        }
        Some(MenuAction::ForceReload) => {
            main_window::force_reload_main_window(app_handle);
            Ok(())
        }
        Some(MenuAction::ToggleDevtools) => {
            main_window::toggle_main_window_devtools(app_handle);
            Ok(())
        }
        Some(MenuAction::Zoom(change)) => {
            main_window::zoom_main_window(app_handle, change);
            Ok(())
        }
        Some(MenuAction::SelectTheme(theme_id)) => {
            shell_actions::select_theme(app_handle, theme_id)
        }
        None => Ok(()),
    };

    if let Err(error) = result {
        log::warn!("menu action {menu_id} failed: {error}");
    }
}
