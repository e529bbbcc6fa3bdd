use tauri::{
    menu::{AboutMetadata, CheckMenuItem, IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Manager, Wry,
};

use crate::{menu_actions, themes, WINDOW_TITLE};

pub(crate) struct MenuState {
    pub(crate) theme_items: Vec<(&'static str, CheckMenuItem<Wry>)>,
}

pub(crate) fn setup_app_menu(app_handle: &AppHandle, current_theme: &str) -> Result<(), String> {
    let theme_items = themes::THEMES
        .iter()
        .map(|theme| {
            CheckMenuItem::with_id(
                app_handle,
                menu_actions::theme_menu_id(theme.id),
                theme.name,
                true,
                theme.id == current_theme,
                None::<&str>,
            )
            .map(|item| (theme.id, item))
            .map_err(|error| format!("Failed to create theme menu item {}: {error}", theme.id))
        })
        .collect::<Result<Vec<_>, String>>()?;
    let theme_refs: Vec<&dyn IsMenuItem<Wry>> = theme_items
        .iter()
        .map(|(_, item)| item as &dyn IsMenuItem<Wry>)
        .collect();
    let themes_menu = Submenu::with_items(app_handle, "Themes", true, &theme_refs)
        .map_err(|error| format!("Failed to create themes submenu: {error}"))?;

    let reconnect_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_RECONNECT_GATEWAY,
        "Reconnect Gateway",
        true,
        Some("CmdOrCtrl+Shift+R"),
    )
    .map_err(|error| format!("Failed to create reconnect menu item: {error}"))?;
    let reload_config_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_RELOAD_CONFIG,
        "Reload Config",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create reload config menu item: {error}"))?;
    let reload_window_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_RELOAD_WINDOW,
        "Reload Window",
        true,
        Some("CmdOrCtrl+R"),
    )
    .map_err(|error| format!("Failed to create reload window menu item: {error}"))?;

    let predefined = |result: tauri::Result<PredefinedMenuItem<Wry>>| {
        result.map_err(|error| format!("Failed to create predefined menu item: {error}"))
    };
    let about = predefined(PredefinedMenuItem::about(
        app_handle,
        None,
        Some(AboutMetadata {
            name: Some(WINDOW_TITLE.to_string()),
            version: Some(app_handle.package_info().version.to_string()),
            ..Default::default()
        }),
    ))?;
    let app_separator = predefined(PredefinedMenuItem::separator(app_handle))?;
    let app_separator_end = predefined(PredefinedMenuItem::separator(app_handle))?;
    let hide = predefined(PredefinedMenuItem::hide(app_handle, None))?;
    let quit = predefined(PredefinedMenuItem::quit(app_handle, None))?;

    let app_menu = Submenu::with_items(
        app_handle,
        WINDOW_TITLE,
        true,
        &[
            &about,
            &app_separator,
            &reconnect_item,
            &reload_config_item,
            &themes_menu,
            &app_separator_end,
            &hide,
            &quit,
        ],
    )
    .map_err(|error| format!("Failed to create app submenu: {error}"))?;

    let edit_menu = Submenu::with_items(
        app_handle,
        "Edit",
        true,
        &[
            &predefined(PredefinedMenuItem::undo(app_handle, None))?,
            &predefined(PredefinedMenuItem::redo(app_handle, None))?,
            &predefined(PredefinedMenuItem::separator(app_handle))?,
            &predefined(PredefinedMenuItem::cut(app_handle, None))?,
            &predefined(PredefinedMenuItem::copy(app_handle, None))?,
            &predefined(PredefinedMenuItem::paste(app_handle, None))?,
            &predefined(PredefinedMenuItem::select_all(app_handle, None))?,
        ],
    )
    .map_err(|error| format!("Failed to create edit submenu: {error}"))?;

    let view_item = |id: &str, label: &str, accelerator: &str| {
        MenuItem::with_id(app_handle, id, label, true, Some(accelerator))
            .map_err(|error| format!("Failed to create {id} menu item: {error}"))
    };
    let force_reload_item = view_item(
        menu_actions::MENU_FORCE_RELOAD,
        "Force Reload",
        "CmdOrCtrl+Alt+R",
    )?;
    let reset_zoom_item = view_item(menu_actions::MENU_RESET_ZOOM, "Actual Size", "CmdOrCtrl+0")?;
    let zoom_in_item = view_item(menu_actions::MENU_ZOOM_IN, "Zoom In", "CmdOrCtrl+=")?;
    let zoom_out_item = view_item(menu_actions::MENU_ZOOM_OUT, "Zoom Out", "CmdOrCtrl+-")?;
    let view_separator = predefined(PredefinedMenuItem::separator(app_handle))?;
    let zoom_separator = predefined(PredefinedMenuItem::separator(app_handle))?;
    let fullscreen = predefined(PredefinedMenuItem::fullscreen(app_handle, None))?;

    #[cfg(debug_assertions)]
    let devtools_item = view_item(
        menu_actions::MENU_TOGGLE_DEVTOOLS,
        "Toggle Developer Tools",
        "CmdOrCtrl+Alt+I",
    )?;

    let mut view_items: Vec<&dyn IsMenuItem<Wry>> = vec![&reload_window_item, &force_reload_item];
    #[cfg(debug_assertions)]
    view_items.push(&devtools_item);
    let view_tail: [&dyn IsMenuItem<Wry>; 6] = [
        &view_separator,
        &reset_zoom_item,
        &zoom_in_item,
        &zoom_out_item,
        &zoom_separator,
        &fullscreen,
    ];
    view_items.extend(view_tail);
    let view_menu = Submenu::with_items(app_handle, "View", true, &view_items)
        .map_err(|error| format!("Failed to create view submenu: {error}"))?;

    let window_menu = Submenu::with_items(
        app_handle,
        "Window",
        true,
        &[
            &predefined(PredefinedMenuItem::minimize(app_handle, None))?,
            &predefined(PredefinedMenuItem::close_window(app_handle, None))?,
        ],
    )
    .map_err(|error| format!("Failed to create window submenu: {error}"))?;

    let menu = Menu::with_items(app_handle, &[&app_menu, &edit_menu, &view_menu, &window_menu])
        .map_err(|error| format!("Failed to build app menu: {error}"))?;
    app_handle
        .set_menu(menu)
        .map_err(|error| format!("Failed to install app menu: {error}"))?;

    if !app_handle.manage(MenuState { theme_items }) {
        log::debug!("menu state already exists, skipping manage");
    }
    Ok(())
}

/// Exactly one theme item stays checked.
pub(crate) fn sync_theme_checks(app_handle: &AppHandle, current_theme: &str) {
    let Some(menu_state) = app_handle.try_state::<MenuState>() else {
        return;
    };

    for (theme_id, item) in &menu_state.theme_items {
        if let Err(error) = item.set_checked(*theme_id == current_theme) {
            log::warn!("failed to update theme menu check for {theme_id}: {error}");
        }
    }
}
