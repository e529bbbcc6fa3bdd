//! Page scripts evaluated by the shell.
//!
//! Each template under `scripts/` is a single function expression taking one
//! config object. Rendering wraps it as `(template)(config);` with the config
//! serialized by `serde_json`, so no value is ever spliced into script text.

use serde::Serialize;
use serde_json::json;

use crate::DRAG_REGION_HEIGHT_PX;

const INJECT_STYLE_TEMPLATE: &str = include_str!("scripts/inject_style.js");
const REMOVE_STYLES_TEMPLATE: &str = include_str!("scripts/remove_styles.js");
const DRAG_REGION_TEMPLATE: &str = include_str!("scripts/drag_region.js");
const FULLSCREEN_TEMPLATE: &str = include_str!("scripts/fullscreen.js");
const DESKTOP_BRIDGE_TEMPLATE: &str = include_str!("scripts/desktop_bridge.js");
const PLACEHOLDER_STATUS_TEMPLATE: &str = include_str!("scripts/placeholder_status.js");

pub(crate) const DRAG_REGION_ELEMENT_ID: &str = "openclaw-drag-region";
pub(crate) const TITLEBAR_INSET_VARIABLE: &str = "--openclaw-titlebar-inset";
pub(crate) const INTERACTIVE_SELECTOR: &str = "a, button, input, select, textarea, label, summary, \
[contenteditable], [role='button'], [role='link'], [role='menuitem'], [role='tab'], \
[role='checkbox'], [role='switch'], [role='textbox'], [role='combobox'], [role='slider']";

pub(crate) fn render_script<T: Serialize>(template: &str, config: &T) -> String {
    let payload = serde_json::to_string(config).unwrap_or_else(|error| {
        log::warn!("failed to serialize page script config: {error}");
        "{}".to_string()
    });
    format!("({})({payload});", template.trim())
}

pub(crate) fn inject_style_script(id: &str, css: &str) -> String {
    render_script(INJECT_STYLE_TEMPLATE, &json!({ "id": id, "css": css }))
}

pub(crate) fn remove_styles_script(ids: &[String]) -> String {
    render_script(REMOVE_STYLES_TEMPLATE, &json!({ "ids": ids }))
}

pub(crate) fn drag_region_script() -> String {
    render_script(
        DRAG_REGION_TEMPLATE,
        &json!({
            "elementId": DRAG_REGION_ELEMENT_ID,
            "height": DRAG_REGION_HEIGHT_PX,
            "interactiveSelector": INTERACTIVE_SELECTOR,
            "startDragCommand": "desktop_bridge_start_dragging",
            "toggleMaximizeCommand": "desktop_bridge_toggle_maximize",
        }),
    )
}

pub(crate) fn fullscreen_script(fullscreen: bool) -> String {
    render_script(
        FULLSCREEN_TEMPLATE,
        &json!({
            "fullscreen": fullscreen,
            "regionId": DRAG_REGION_ELEMENT_ID,
            "insetVariable": TITLEBAR_INSET_VARIABLE,
            "inset": DRAG_REGION_HEIGHT_PX,
        }),
    )
}

/// Calls the already installed fullscreen hook without re-wiring listeners.
pub(crate) fn fullscreen_sync_script(fullscreen: bool) -> String {
    format!(
        "window.__openclawShell && window.__openclawShell.setFullscreen && \
window.__openclawShell.setFullscreen({fullscreen});"
    )
}

pub(crate) fn desktop_bridge_script() -> String {
    render_script(
        DESKTOP_BRIDGE_TEMPLATE,
        &json!({
            "commands": {
                "isDesktopRuntime": "desktop_bridge_is_desktop_runtime",
                "getSystemInfo": "desktop_bridge_get_system_info",
                "setVibrancy": "desktop_bridge_set_vibrancy",
                "getGatewayConfig": "desktop_bridge_get_gateway_config",
                "getConnectionPhase": "desktop_bridge_get_connection_phase",
                "reconnect": "desktop_bridge_reconnect",
                "listThemes": "desktop_bridge_list_themes",
                "setTheme": "desktop_bridge_set_theme",
                "openExternalUrl": "desktop_bridge_open_external_url",
            }
        }),
    )
}

pub(crate) fn placeholder_status_script(status: &str) -> String {
    render_script(PLACEHOLDER_STATUS_TEMPLATE, &json!({ "status": status }))
}
