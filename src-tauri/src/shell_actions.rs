use std::sync::Arc;

use tauri::{AppHandle, Manager, Webview, Wry};

use crate::{
    app_menu,
    connection_controller::ConnectionController,
    desktop_bridge::{self, PageKind},
    gateway_config, main_window,
    shell_injector::ScriptTarget,
    shell_scripts,
    shell_state::ShellState,
    themes, DEFAULT_GATEWAY_PORT, MAIN_WINDOW_LABEL,
};

pub(crate) fn current_gateway_port(app_handle: &AppHandle) -> u16 {
    app_handle
        .try_state::<Arc<ConnectionController>>()
        .map(|controller| controller.current_config().port)
        .unwrap_or(DEFAULT_GATEWAY_PORT)
}

/// Re-resolves the config file and restarts the connection cycle.
pub(crate) fn reconnect_gateway(app_handle: &AppHandle) -> Result<(), String> {
    let Some(controller) = app_handle.try_state::<Arc<ConnectionController>>() else {
        return Err("Connection controller is not initialized.".to_string());
    };
    let state = app_handle.state::<ShellState>();

    let resolved = gateway_config::resolve(&state.paths);
    state.set_custom_css_path(resolved.custom_css_path);
    log::info!("reconnecting to gateway on port {}", resolved.connection.port);
    controller.connect(resolved.connection);
    Ok(())
}

/// Same as a reconnect, and picks up a changed custom stylesheet right away.
pub(crate) fn reload_config(app_handle: &AppHandle) -> Result<(), String> {
    reconnect_gateway(app_handle)?;
    reapply_main_window_shell(app_handle);
    Ok(())
}

pub(crate) fn select_theme(app_handle: &AppHandle, theme_id: &str) -> Result<(), String> {
    let theme = themes::find_theme(theme_id)
        .ok_or_else(|| format!("Unknown theme '{}'.", theme_id.trim()))?;

    app_handle.state::<ShellState>().set_theme(theme);
    log::info!("theme changed to {}", theme.id);
    app_menu::sync_theme_checks(app_handle, theme.id);
    reapply_main_window_shell(app_handle);
    Ok(())
}

/// Page-load `Started` hook: the old page's handles are gone.
pub(crate) fn prepare_page(webview: &Webview<Wry>, url: &tauri::Url) {
    let app_handle = webview.app_handle();
    app_handle.state::<ShellState>().injector.forget_page_assets();

    let page = desktop_bridge::classify_page(url, current_gateway_port(app_handle));
    if page.is_trusted() {
        desktop_bridge::inject_desktop_bridge(webview);
    }
}

/// Page-load `Finished` hook.
pub(crate) fn apply_page_shell(webview: &Webview<Wry>, url: &tauri::Url) {
    let app_handle = webview.app_handle();
    let page = desktop_bridge::classify_page(url, current_gateway_port(app_handle));
    if !page.is_trusted() {
        log::debug!("skipping shell injection for foreign page");
        return;
    }

    desktop_bridge::inject_desktop_bridge(webview);
    apply_shell_to(app_handle, webview, page);
    main_window::reveal_main_window(app_handle);
}

pub(crate) fn reapply_main_window_shell(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    match main_window::main_window_page(&window, current_gateway_port(app_handle)) {
        Some(page) if page.is_trusted() => apply_shell_to(app_handle, &window, page),
        _ => log::debug!("main window shows no trusted page; shell not reapplied"),
    }
}

fn apply_shell_to(app_handle: &AppHandle, target: &dyn ScriptTarget, page: PageKind) {
    let state = app_handle.state::<ShellState>();
    let report = state.with_appearance(|appearance| state.injector.apply_shell(target, appearance));
    if !report.is_clean() {
        log::warn!("shell applied with failed steps: {:?}", report.failed);
    }

    if page == PageKind::Placeholder {
        let status = state.placeholder_status();
        if let Err(error) = target.run_script(&shell_scripts::placeholder_status_script(&status)) {
            log::warn!("failed to restore placeholder status: {error}");
        }
    }
}
