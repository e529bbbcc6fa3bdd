use tauri::{AppHandle, Manager, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    connection_controller::ConnectionSurface,
    desktop_bridge::{self, PageKind},
    shell_injector::ScriptTarget,
    shell_scripts,
    shell_state::ShellState,
    window_zoom::ZoomChange,
    MAIN_WINDOW_LABEL, PLACEHOLDER_PAGE, WINDOW_TITLE,
};

const WINDOW_WIDTH: f64 = 1400.0;
const WINDOW_HEIGHT: f64 = 900.0;
const WINDOW_MIN_WIDTH: f64 = 1024.0;
const WINDOW_MIN_HEIGHT: f64 = 768.0;

pub(crate) fn create_main_window(app_handle: &AppHandle) -> Result<WebviewWindow, String> {
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        return Ok(window);
    }

    let builder = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(PLACEHOLDER_PAGE.into()),
    )
    .title(WINDOW_TITLE)
    .inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
    .min_inner_size(WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT)
    .visible(false);

    #[cfg(target_os = "macos")]
    let builder = {
        use tauri::window::{Effect, EffectsBuilder};

        // The webview has to be see-through for the vibrancy layer to show.
        builder
            .transparent(true)
            .title_bar_style(tauri::TitleBarStyle::Overlay)
            .hidden_title(true)
            .effects(
                EffectsBuilder::new()
                    .effect(Effect::UnderWindowBackground)
                    .build(),
            )
    };

    let window = builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
    #[cfg(debug_assertions)]
    window.open_devtools();
    Ok(window)
}

/// Shows the window on its first finished load.
pub(crate) fn reveal_main_window(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if !state.mark_window_revealed() {
        return;
    }
    focus_main_window(app_handle);
}

pub(crate) fn focus_main_window(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log::debug!("focus skipped: main window not found");
        return;
    };

    if let Err(error) = window.unminimize() {
        log::warn!("failed to unminimize main window: {error}");
    }
    if let Err(error) = window.show() {
        log::warn!("failed to show main window: {error}");
    }
    if let Err(error) = window.set_focus() {
        log::warn!("failed to focus main window: {error}");
    }
}

pub(crate) fn reload_main_window(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log::debug!("reload skipped: main window not found");
        return;
    };

    app_handle.state::<ShellState>().injector.forget_page_assets();
    if let Err(error) = window.run_script("window.location.reload();") {
        log::warn!("failed to reload main window: {error}");
    }
}

/// Reloads by navigating to the current URL again instead of asking the page.
pub(crate) fn force_reload_main_window(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log::debug!("force reload skipped: main window not found");
        return;
    };

    match window.url() {
        Ok(url) => navigate_main_window(app_handle, url),
        Err(error) => log::warn!("failed to read main window url for reload: {error}"),
    }
}

pub(crate) fn zoom_main_window(app_handle: &AppHandle, change: ZoomChange) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log::debug!("zoom skipped: main window not found");
        return;
    };

    let factor = app_handle.state::<ShellState>().change_zoom(change);
    if let Err(error) = window.set_zoom(factor) {
        log::warn!("failed to set main window zoom to {factor}: {error}");
    }
}

pub(crate) fn toggle_main_window_devtools(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    #[cfg(debug_assertions)]
    {
        if window.is_devtools_open() {
            window.close_devtools();
        } else {
            window.open_devtools();
        }
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = window;
        log::debug!("devtools are only available in debug builds");
    }
}

pub(crate) fn main_window_page(window: &WebviewWindow, gateway_port: u16) -> Option<PageKind> {
    match window.url() {
        Ok(url) => Some(desktop_bridge::classify_page(&url, gateway_port)),
        Err(error) => {
            log::warn!("failed to read main window url: {error}");
            None
        }
    }
}

pub(crate) fn sync_fullscreen(window: &WebviewWindow) {
    let fullscreen = match window.is_fullscreen() {
        Ok(fullscreen) => fullscreen,
        Err(error) => {
            log::debug!("failed to read fullscreen state: {error}");
            return;
        }
    };

    let state = window.app_handle().state::<ShellState>();
    if !state.update_fullscreen(fullscreen) {
        return;
    }
    log::debug!("main window fullscreen changed: {fullscreen}");
    if let Err(error) = window.run_script(&shell_scripts::fullscreen_sync_script(fullscreen)) {
        log::warn!("failed to sync fullscreen state into page: {error}");
    }
}

fn navigate_main_window(app_handle: &AppHandle, url: Url) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log::debug!("navigation skipped: main window not found");
        return;
    };

    app_handle.state::<ShellState>().injector.forget_page_assets();
    if let Err(error) = window.navigate(url) {
        log::warn!("failed to navigate main window: {error}");
    }
}

fn show_placeholder(app_handle: &AppHandle, status: &str, gateway_port: u16) {
    let state = app_handle.state::<ShellState>();
    state.set_placeholder_status(status);

    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    if main_window_page(&window, gateway_port) == Some(PageKind::Placeholder) {
        if let Err(error) = window.run_script(&shell_scripts::placeholder_status_script(status)) {
            log::warn!("failed to update placeholder status: {error}");
        }
        return;
    }

    match desktop_bridge::placeholder_url() {
        Ok(url) => navigate_main_window(app_handle, url),
        Err(error) => log::warn!("{error}"),
    }
}

/// Window side of the connection controller. Calls are queued onto the main
/// thread in the order the controller issues them.
pub(crate) struct MainWindowSurface {
    app_handle: AppHandle,
}

impl MainWindowSurface {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }

    fn dispatch<F>(&self, action: &'static str, task: F)
    where
        F: FnOnce(&AppHandle) + Send + 'static,
    {
        let app_handle = self.app_handle.clone();
        if let Err(error) = self.app_handle.run_on_main_thread(move || task(&app_handle)) {
            log::warn!("failed to schedule {action} on main thread: {error}");
        }
    }
}

impl ConnectionSurface for MainWindowSurface {
    fn show_placeholder(&self, status: &str) {
        let status = status.to_string();
        self.dispatch("placeholder update", move |app_handle| {
            let gateway_port = crate::shell_actions::current_gateway_port(app_handle);
            show_placeholder(app_handle, &status, gateway_port);
        });
    }

    fn load_gateway(&self, url: &str) {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(error) => {
                log::warn!("refusing to load malformed gateway url: {error}");
                return;
            }
        };
        self.dispatch("gateway navigation", move |app_handle| {
            log::info!("loading gateway UI");
            navigate_main_window(app_handle, parsed);
        });
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    #[test]
    fn transparent_windows_are_enabled_in_app_config() {
        let config: Value =
            serde_json::from_str(include_str!("../tauri.conf.json")).expect("tauri.conf.json");
        assert_eq!(config["app"]["macOSPrivateApi"], true);
        assert!(include_str!("../Cargo.toml").contains(r#"features = ["macos-private-api"]"#));
    }
}
