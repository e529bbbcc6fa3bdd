use std::{
    process::{Command, Stdio},
    sync::Arc,
};

use tauri::{
    utils::config::WindowEffectsConfig, window::EffectsBuilder, AppHandle, Manager, Theme,
    WebviewWindow,
};
use url::Url;

use crate::{
    connection_controller::{ConnectionController, ConnectionPhase},
    shell_actions,
    shell_state::ShellState,
    themes, window_effects, BridgeResult, GatewayBridgeConfig, SystemInfo, ThemeListing,
};

fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'open': {error}"))
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("rundll32")
        .args(["url.dll,FileProtocolHandler", url])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'rundll32': {error}"))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("xdg-open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'xdg-open': {error}"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

#[tauri::command]
pub(crate) fn desktop_bridge_is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_system_info(window: WebviewWindow) -> SystemInfo {
    let is_dark_mode = match window.theme() {
        Ok(theme) => theme == Theme::Dark,
        Err(error) => {
            log::debug!("failed to read window theme: {error}");
            false
        }
    };

    SystemInfo {
        platform: tauri_plugin_os::platform().to_string(),
        arch: tauri_plugin_os::arch().to_string(),
        version: tauri_plugin_os::version().to_string(),
        is_dark_mode,
    }
}

#[tauri::command]
pub(crate) fn desktop_bridge_set_vibrancy(
    window: WebviewWindow,
    vibrancy: Option<String>,
) -> BridgeResult {
    let effect = match window_effects::parse_vibrancy(vibrancy.as_deref()) {
        Ok(effect) => effect,
        Err(reason) => return BridgeResult::failure(reason),
    };

    let applied = match effect {
        Some(effect) => window.set_effects(EffectsBuilder::new().effect(effect).build()),
        None => window.set_effects(None::<WindowEffectsConfig>),
    };
    applied
        .map_err(|error| format!("Failed to apply window effect: {error}"))
        .into()
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_gateway_config(
    app_handle: AppHandle,
) -> Option<GatewayBridgeConfig> {
    app_handle
        .try_state::<Arc<ConnectionController>>()
        .map(|controller| controller.current_config().bridge_summary())
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_connection_phase(app_handle: AppHandle) -> ConnectionPhase {
    app_handle
        .try_state::<Arc<ConnectionController>>()
        .map(|controller| controller.phase())
        .unwrap_or(ConnectionPhase::Idle)
}

#[tauri::command]
pub(crate) fn desktop_bridge_reconnect(app_handle: AppHandle) -> BridgeResult {
    shell_actions::reconnect_gateway(&app_handle).into()
}

#[tauri::command]
pub(crate) fn desktop_bridge_list_themes(app_handle: AppHandle) -> ThemeListing {
    let state = app_handle.state::<ShellState>();
    themes::theme_listing(state.theme())
}

#[tauri::command]
pub(crate) fn desktop_bridge_set_theme(app_handle: AppHandle, theme_id: String) -> BridgeResult {
    shell_actions::select_theme(&app_handle, &theme_id).into()
}

#[tauri::command]
pub(crate) fn desktop_bridge_open_external_url(url: String) -> BridgeResult {
    let parsed = match parse_openable_url(&url) {
        Ok(parsed) => parsed,
        Err(error) => return BridgeResult::failure(error),
    };

    let opened = open_url_with_system_browser(parsed.as_ref());
    if let Err(error) = &opened {
        log::warn!("failed to open external url: {error}");
    }
    opened.into()
}

#[tauri::command]
pub(crate) fn desktop_bridge_start_dragging(window: WebviewWindow) -> BridgeResult {
    window
        .start_dragging()
        .map_err(|error| format!("Failed to start window drag: {error}"))
        .into()
}

#[tauri::command]
pub(crate) fn desktop_bridge_toggle_maximize(window: WebviewWindow) -> BridgeResult {
    let toggled = match window.is_maximized() {
        Ok(true) => window.unmaximize(),
        Ok(false) => window.maximize(),
        Err(error) => Err(error),
    };
    toggled
        .map_err(|error| format!("Failed to toggle maximize: {error}"))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openable_urls_are_limited_to_http() {
        assert!(parse_openable_url("https://openclaw.ai/docs").is_ok());
        assert!(parse_openable_url("  http://127.0.0.1:18789/  ").is_ok());
        assert!(parse_openable_url("").is_err());
        assert!(parse_openable_url("file:///etc/passwd").is_err());
        assert!(parse_openable_url("javascript:alert(1)").is_err());
        assert!(parse_openable_url("not a url").is_err());
    }
}
