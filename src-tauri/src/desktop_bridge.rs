use tauri::Url;

use crate::{shell_injector::ScriptTarget, shell_scripts, GATEWAY_HOST, PLACEHOLDER_PAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageKind {
    Placeholder,
    Gateway,
    Foreign,
}

impl PageKind {
    pub(crate) fn is_trusted(self) -> bool {
        !matches!(self, Self::Foreign)
    }
}

pub(crate) fn classify_page(url: &Url, gateway_port: u16) -> PageKind {
    let host = url.host_str().unwrap_or_default();
    match url.scheme() {
        "tauri" if host == "localhost" => PageKind::Placeholder,
        "http" | "https" if host == "tauri.localhost" => PageKind::Placeholder,
        "http"
            if (host == GATEWAY_HOST || host == "localhost")
                && url.port_or_known_default() == Some(gateway_port) =>
        {
            PageKind::Gateway
        }
        _ => PageKind::Foreign,
    }
}

/// Bundled "connecting" page in the form the platform webview serves it.
pub(crate) fn placeholder_url() -> Result<Url, String> {
    #[cfg(target_os = "windows")]
    let raw = format!("http://tauri.localhost/{PLACEHOLDER_PAGE}");
    #[cfg(not(target_os = "windows"))]
    let raw = format!("tauri://localhost/{PLACEHOLDER_PAGE}");

    Url::parse(&raw).map_err(|error| format!("invalid placeholder url {raw}: {error}"))
}

pub(crate) fn inject_desktop_bridge(target: &dyn ScriptTarget) {
    if let Err(error) = target.run_script(&shell_scripts::desktop_bridge_script()) {
        log::warn!("failed to inject desktop bridge: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("url")
    }

    #[test]
    fn bundled_origins_are_placeholder() {
        assert_eq!(classify_page(&url("tauri://localhost/index.html"), 18789), PageKind::Placeholder);
        assert_eq!(classify_page(&url("http://tauri.localhost/"), 18789), PageKind::Placeholder);
    }

    #[test]
    fn loopback_on_configured_port_is_gateway() {
        assert_eq!(
            classify_page(&url("http://127.0.0.1:18789/?token=abc"), 18789),
            PageKind::Gateway
        );
        assert_eq!(classify_page(&url("http://localhost:9000/chat"), 9000), PageKind::Gateway);
    }

    #[test]
    fn other_ports_and_hosts_are_foreign() {
        assert_eq!(classify_page(&url("http://127.0.0.1:9000/"), 18789), PageKind::Foreign);
        assert_eq!(classify_page(&url("https://example.com/"), 18789), PageKind::Foreign);
        assert_eq!(classify_page(&url("http://127.0.0.1/"), 18789), PageKind::Foreign);
        assert!(!PageKind::Foreign.is_trusted());
        assert!(PageKind::Gateway.is_trusted());
    }

    #[test]
    fn placeholder_url_is_classified_as_placeholder() {
        let placeholder = placeholder_url().expect("placeholder url");
        assert_eq!(classify_page(&placeholder, 18789), PageKind::Placeholder);
        assert!(placeholder.path().ends_with(PLACEHOLDER_PAGE));
    }
}
