//! Gateway connection settings read from the OpenClaw config file.
//!
//! The file is JSON5 (`~/.openclaw/openclaw.json`); only the `gateway`
//! section matters here. Nothing in this module fails outward: a missing or
//! unreadable config degrades to [`ConnectionConfig::default`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{
    runtime_paths::RuntimePaths, AuthMode, BindScope, ConnectionConfig, DEFAULT_GATEWAY_BIND,
    DEFAULT_GATEWAY_PORT,
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{path} does not contain a config object")]
    NotAnObject { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedShellConfig {
    pub(crate) connection: ConnectionConfig,
    /// File the connection settings came from, `None` when defaults were used.
    pub(crate) source: Option<PathBuf>,
    pub(crate) custom_css_path: Option<PathBuf>,
}

pub(crate) fn resolve(paths: &RuntimePaths) -> ResolvedShellConfig {
    let (connection, source) = resolve_connection_config(&paths.config_candidates);
    let custom_css_path = locate_custom_css(paths.custom_css.as_deref());
    match &source {
        Some(path) => log::info!(
            "gateway config loaded from {}: port={} bind={:?} auth={:?}",
            path.display(),
            connection.port,
            connection.bind_scope,
            connection.auth_mode
        ),
        None => log::info!(
            "no usable gateway config found; using defaults (port {})",
            connection.port
        ),
    }
    if let BindScope::Other(scope) = &connection.bind_scope {
        log::info!("gateway bind scope is '{scope}'; the shell still connects over loopback");
    }
    if let Some(path) = &custom_css_path {
        log::info!("custom stylesheet found at {}", path.display());
    }

    ResolvedShellConfig {
        connection,
        source,
        custom_css_path,
    }
}

pub(crate) fn resolve_connection_config(
    candidates: &[PathBuf],
) -> (ConnectionConfig, Option<PathBuf>) {
    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }
        match load_candidate(candidate) {
            Ok(config) => return (config, Some(candidate.clone())),
            Err(error) => log::warn!("skipping gateway config candidate: {error}"),
        }
    }
    (ConnectionConfig::default(), None)
}

fn load_candidate(path: &Path) -> Result<ConnectionConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = json5::from_str(&raw).map_err(|error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;
    if !root.is_object() {
        return Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        });
    }
    Ok(connection_from_document(&root))
}

pub(crate) fn connection_from_document(root: &Value) -> ConnectionConfig {
    let gateway = root.get("gateway");
    let auth = gateway.and_then(|section| section.get("auth"));

    let port = gateway
        .and_then(|section| section.get("port"))
        .and_then(parse_port)
        .unwrap_or(DEFAULT_GATEWAY_PORT);

    let bind_scope = match gateway
        .and_then(|section| section.get("bind"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        None => BindScope::Loopback,
        Some(value) if value.eq_ignore_ascii_case(DEFAULT_GATEWAY_BIND) => BindScope::Loopback,
        Some(value) => BindScope::Other(value.to_string()),
    };

    let auth_mode = match auth
        .and_then(|section| section.get("mode"))
        .and_then(Value::as_str)
    {
        Some(mode) if mode.trim().eq_ignore_ascii_case("token") => AuthMode::Token,
        _ => AuthMode::None,
    };

    let auth_token = match auth_mode {
        AuthMode::Token => auth
            .and_then(|section| section.get("token"))
            .and_then(Value::as_str)
            .map(|token| token.trim().to_string())
            .unwrap_or_default(),
        AuthMode::None => String::new(),
    };

    ConnectionConfig {
        port,
        bind_scope,
        auth_mode,
        auth_token,
    }
}

fn parse_port(value: &Value) -> Option<u16> {
    let raw = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|number| number.fract() == 0.0 && *number >= 0.0)
                .map(|number| number as u64)
        })
        .or_else(|| value.as_str()?.trim().parse::<u64>().ok())?;
    u16::try_from(raw).ok().filter(|port| *port != 0)
}

fn locate_custom_css(path: Option<&Path>) -> Option<PathBuf> {
    path.filter(|candidate| candidate.is_file())
        .map(Path::to_path_buf)
}
