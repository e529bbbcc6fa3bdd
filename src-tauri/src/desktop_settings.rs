use std::{fs, path::Path};

use serde_json::{Map, Value};

use crate::themes::{self, ThemeDefinition};

const THEME_FIELD: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub(crate) enum SettingsError {
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize desktop settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub(crate) fn read_cached_theme(settings_path: Option<&Path>) -> Option<&'static ThemeDefinition> {
    let raw = fs::read_to_string(settings_path?).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    let theme_id = parsed.get(THEME_FIELD)?.as_str()?;
    let theme = themes::find_theme(theme_id);
    if theme.is_none() {
        log::warn!("unknown theme '{theme_id}' in desktop settings; using default");
    }
    theme
}

/// Stores the theme id, keeping any other keys already in the file.
pub(crate) fn write_cached_theme(
    theme: &ThemeDefinition,
    settings_path: Option<&Path>,
) -> Result<(), SettingsError> {
    let Some(settings_path) = settings_path else {
        log::info!("desktop settings path is unavailable; skipping theme persistence");
        return Ok(());
    };

    if let Some(parent_dir) = settings_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|source| SettingsError::Io {
            action: "create directory",
            path: parent_dir.display().to_string(),
            source,
        })?;
    }

    let mut object = match fs::read_to_string(settings_path) {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                log::warn!(
                    "desktop settings {} has non-object root; resetting file",
                    settings_path.display()
                );
                Map::new()
            }
            Err(error) => {
                log::warn!(
                    "failed to parse desktop settings {}: {error}. resetting file",
                    settings_path.display()
                );
                Map::new()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(source) => {
            return Err(SettingsError::Io {
                action: "read",
                path: settings_path.display().to_string(),
                source,
            });
        }
    };

    object.insert(THEME_FIELD.to_string(), Value::String(theme.id.to_string()));

    let serialized = serde_json::to_string_pretty(&Value::Object(object))?;
    fs::write(settings_path, serialized).map_err(|source| SettingsError::Io {
        action: "write",
        path: settings_path.display().to_string(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(id: &str) -> &'static ThemeDefinition {
        themes::find_theme(id).expect("known theme")
    }

    #[test]
    fn missing_settings_file_has_no_cached_theme() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(read_cached_theme(Some(dir.path().join("settings.json").as_path())), None);
        assert_eq!(read_cached_theme(None), None);
    }

    #[test]
    fn written_theme_is_read_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("desktop-settings.json");

        write_cached_theme(theme("ocean"), Some(path.as_path())).expect("write settings");

        assert_eq!(read_cached_theme(Some(path.as_path())).map(|theme| theme.id), Some("ocean"));
    }

    #[test]
    fn write_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("desktop-settings.json");
        fs::write(&path, r#"{ "theme": "midnight", "zoom": 1.25 }"#).expect("seed");

        write_cached_theme(theme("daylight"), Some(path.as_path())).expect("write settings");

        let stored: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(stored["theme"], "daylight");
        assert_eq!(stored["zoom"], 1.25);
    }

    #[test]
    fn corrupt_settings_are_reset_on_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("desktop-settings.json");
        fs::write(&path, "[\"not\", \"an object\"]").expect("seed");

        write_cached_theme(theme("graphite"), Some(path.as_path())).expect("write settings");

        assert_eq!(
            read_cached_theme(Some(path.as_path())).map(|theme| theme.id),
            Some("graphite")
        );
    }

    #[test]
    fn unknown_cached_theme_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("desktop-settings.json");
        fs::write(&path, r#"{ "theme": "solarized" }"#).expect("seed");

        assert_eq!(read_cached_theme(Some(path.as_path())), None);
    }

    #[test]
    fn missing_path_skips_persistence() {
        assert!(write_cached_theme(theme("ocean"), None).is_ok());
    }

    #[test]
    fn unwritable_location_reports_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").expect("seed");

        let result = write_cached_theme(theme("ocean"), Some(blocker.join("settings.json").as_path()));

        assert!(matches!(result, Err(SettingsError::Io { .. })));
    }
}
