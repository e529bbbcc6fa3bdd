use std::time::Duration;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const WINDOW_TITLE: &str = "OpenClaw";
pub(crate) const PLACEHOLDER_PAGE: &str = "index.html";

pub(crate) const GATEWAY_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_GATEWAY_PORT: u16 = 18789;
pub(crate) const DEFAULT_GATEWAY_BIND: &str = "loopback";

pub(crate) const GATEWAY_PROBE_TIMEOUT: Duration = Duration::from_secs(3);
pub(crate) const GATEWAY_RETRY_DELAY: Duration = Duration::from_secs(3);
pub(crate) const GATEWAY_LAUNCH_GRACE: Duration = Duration::from_secs(5);
pub(crate) const GATEWAY_LAUNCH_HARD_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) const GATEWAY_BINARY_NAME: &str = "openclaw";
pub(crate) const GATEWAY_ENSURE_RUNNING_ARGS: [&str; 2] = ["gateway", "install"];

pub(crate) const OPENCLAW_HOME_ENV: &str = "OPENCLAW_HOME";
pub(crate) const OPENCLAW_CONFIG_PATH_ENV: &str = "OPENCLAW_CONFIG_PATH";
pub(crate) const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";
pub(crate) const GATEWAY_CMD_ENV: &str = "OPENCLAW_GATEWAY_CMD";
pub(crate) const AUTO_START_ENV: &str = "OPENCLAW_DESKTOP_AUTO_START";

pub(crate) const CONFIG_FILE_NAME: &str = "openclaw.json";
pub(crate) const CUSTOM_CSS_FILE_NAME: &str = "custom.css";
pub(crate) const SETTINGS_FILE_NAME: &str = "desktop-settings.json";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop";

pub(crate) const STATUS_STARTING_GATEWAY: &str = "Starting OpenClaw gateway…";

pub(crate) const DRAG_REGION_HEIGHT_PX: u32 = 28;

#[cfg(target_os = "windows")]
pub(crate) const CREATE_NO_WINDOW: u32 = 0x0800_0000;
