use std::{env, ffi::OsString, path::PathBuf};

use crate::{
    CONFIG_FILE_NAME, CUSTOM_CSS_FILE_NAME, OPENCLAW_CONFIG_PATH_ENV, OPENCLAW_HOME_ENV,
    SETTINGS_FILE_NAME, XDG_CONFIG_HOME_ENV,
};

/// Well-known locations resolved once at startup.
#[derive(Debug, Clone, Default)]
pub(crate) struct RuntimePaths {
    pub(crate) home_dir: Option<PathBuf>,
    pub(crate) openclaw_home: Option<PathBuf>,
    pub(crate) config_candidates: Vec<PathBuf>,
    pub(crate) custom_css: Option<PathBuf>,
    pub(crate) settings_file: Option<PathBuf>,
}

impl RuntimePaths {
    pub(crate) fn detect() -> Self {
        Self::from_parts(home::home_dir(), |key| env::var_os(key))
    }

    pub(crate) fn from_parts<F>(home_dir: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(PathBuf::from)
                .filter(|path| !path.as_os_str().is_empty())
        };

        let openclaw_home = non_empty(OPENCLAW_HOME_ENV)
            .or_else(|| home_dir.as_ref().map(|home| home.join(".openclaw")));
        let xdg_config_home = non_empty(XDG_CONFIG_HOME_ENV)
            .or_else(|| home_dir.as_ref().map(|home| home.join(".config")));

        let mut config_candidates = Vec::new();
        if let Some(explicit) = non_empty(OPENCLAW_CONFIG_PATH_ENV) {
            config_candidates.push(explicit);
        }
        if let Some(root) = &openclaw_home {
            config_candidates.push(root.join(CONFIG_FILE_NAME));
        }
        if let Some(root) = &xdg_config_home {
            config_candidates.push(root.join("openclaw").join(CONFIG_FILE_NAME));
        }

        Self {
            custom_css: openclaw_home
                .as_ref()
                .map(|root| root.join(CUSTOM_CSS_FILE_NAME)),
            settings_file: openclaw_home
                .as_ref()
                .map(|root| root.join(SETTINGS_FILE_NAME)),
            home_dir,
            openclaw_home,
            config_candidates,
        }
    }
}
