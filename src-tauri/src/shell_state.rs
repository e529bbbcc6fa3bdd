use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use crate::{
    desktop_settings, gateway_config::ResolvedShellConfig, runtime_paths::RuntimePaths,
    shell_injector::{ShellAppearance, ShellInjector},
    themes::{self, ThemeDefinition},
    window_zoom::{self, ZoomChange},
    STATUS_STARTING_GATEWAY,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-wide shell context, managed by Tauri.
pub(crate) struct ShellState {
    pub(crate) paths: RuntimePaths,
    pub(crate) injector: ShellInjector,
    theme: Mutex<&'static ThemeDefinition>,
    custom_css_path: Mutex<Option<PathBuf>>,
    placeholder_status: Mutex<String>,
    zoom_level: Mutex<f64>,
    fullscreen: AtomicBool,
    window_revealed: AtomicBool,
}

impl ShellState {
    pub(crate) fn new(paths: RuntimePaths, resolved: &ResolvedShellConfig) -> Self {
        let theme = desktop_settings::read_cached_theme(paths.settings_file.as_deref())
            .unwrap_or_else(themes::default_theme);
        log::info!("active theme: {}", theme.id);
        Self {
            paths,
            injector: ShellInjector::default(),
            theme: Mutex::new(theme),
            custom_css_path: Mutex::new(resolved.custom_css_path.clone()),
            placeholder_status: Mutex::new(STATUS_STARTING_GATEWAY.to_string()),
            zoom_level: Mutex::new(0.0),
            fullscreen: AtomicBool::new(false),
            window_revealed: AtomicBool::new(false),
        }
    }

    pub(crate) fn theme(&self) -> &'static ThemeDefinition {
        *lock(&self.theme)
    }

    /// Applies in memory first; a failed write only loses persistence.
    pub(crate) fn set_theme(&self, theme: &'static ThemeDefinition) {
        *lock(&self.theme) = theme;
        if let Err(error) =
            desktop_settings::write_cached_theme(theme, self.paths.settings_file.as_deref())
        {
            log::warn!("failed to persist theme '{}': {error}", theme.id);
        }
    }

    pub(crate) fn set_custom_css_path(&self, path: Option<PathBuf>) {
        *lock(&self.custom_css_path) = path;
    }

    pub(crate) fn placeholder_status(&self) -> String {
        lock(&self.placeholder_status).clone()
    }

    pub(crate) fn set_placeholder_status(&self, status: &str) {
        *lock(&self.placeholder_status) = status.to_string();
    }

    /// Steps the zoom level and returns the scale factor to apply.
    pub(crate) fn change_zoom(&self, change: ZoomChange) -> f64 {
        let mut level = lock(&self.zoom_level);
        *level = window_zoom::next_zoom_level(*level, change);
        window_zoom::zoom_factor(*level)
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.fullscreen.load(Ordering::Relaxed)
    }

    /// Returns `true` when the stored value changed.
    pub(crate) fn update_fullscreen(&self, fullscreen: bool) -> bool {
        self.fullscreen.swap(fullscreen, Ordering::Relaxed) != fullscreen
    }

    /// Returns `true` only for the first caller since the last reset.
    pub(crate) fn mark_window_revealed(&self) -> bool {
        !self.window_revealed.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn reset_window(&self) {
        self.window_revealed.store(false, Ordering::Release);
        self.fullscreen.store(false, Ordering::Relaxed);
        *lock(&self.zoom_level) = 0.0;
        self.injector.forget_page_assets();
    }

    /// Runs `apply` with the current appearance; locks are released first.
    pub(crate) fn with_appearance<T>(&self, apply: impl FnOnce(&ShellAppearance<'_>) -> T) -> T {
        let theme = self.theme();
        let custom_css_path = lock(&self.custom_css_path).clone();
        apply(&ShellAppearance {
            theme,
            custom_css_path: custom_css_path.as_deref(),
            fullscreen: self.is_fullscreen(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_in(dir: &std::path::Path) -> ShellState {
        let paths = RuntimePaths {
            settings_file: Some(dir.join("desktop-settings.json")),
            ..RuntimePaths::default()
        };
        let resolved = ResolvedShellConfig {
            connection: Default::default(),
            source: None,
            custom_css_path: None,
        };
        ShellState::new(paths, &resolved)
    }

    #[test]
    fn starts_with_default_theme_and_restores_saved_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_in(dir.path());
        assert_eq!(state.theme().id, themes::DEFAULT_THEME_ID);

        state.set_theme(themes::find_theme("aurora").expect("aurora"));

        assert_eq!(state_in(dir.path()).theme().id, "aurora");
    }

    #[test]
    fn theme_applies_even_when_persistence_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").expect("seed");
        let state = state_in(&blocker);

        state.set_theme(themes::find_theme("daylight").expect("daylight"));

        assert_eq!(state.theme().id, "daylight");
    }

    #[test]
    fn window_reveal_happens_once_per_window() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_in(dir.path());
        assert!(state.mark_window_revealed());
        assert!(!state.mark_window_revealed());
        state.reset_window();
        assert!(state.mark_window_revealed());
    }

    #[test]
    fn fullscreen_updates_report_changes_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_in(dir.path());
        assert!(!state.update_fullscreen(false));
        assert!(state.update_fullscreen(true));
        assert!(!state.update_fullscreen(true));
        assert!(state.is_fullscreen());
    }

    #[test]
    fn placeholder_status_defaults_to_starting() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_in(dir.path());
        assert_eq!(state.placeholder_status(), STATUS_STARTING_GATEWAY);
        state.set_placeholder_status("Waiting for gateway on port 1…");
        assert_eq!(state.placeholder_status(), "Waiting for gateway on port 1…");
    }

    #[test]
    fn zoom_steps_and_resets_with_the_window() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_in(dir.path());

        let zoomed = state.change_zoom(ZoomChange::In);
        assert!(zoomed > 1.0);
        assert!(state.change_zoom(ZoomChange::In) > zoomed);
        assert_eq!(state.change_zoom(ZoomChange::Reset), 1.0);

        state.change_zoom(ZoomChange::Out);
        state.reset_window();
        assert_eq!(state.change_zoom(ZoomChange::In), zoomed);
    }
}
