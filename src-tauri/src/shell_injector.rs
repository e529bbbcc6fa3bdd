//! Presentation layer applied on top of whatever page the main window shows.
//!
//! Every page load discards what was injected before, so the window runs
//! [`ShellInjector::apply_shell`] after each finished load. Style elements are
//! tracked by id; they are removed before each pass and forgotten (not
//! removed) when a navigation starts.

use std::{
    fmt::Write as _,
    fs,
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use tauri::{Runtime, Webview, WebviewWindow};

use crate::{
    shell_scripts, sound_cues, themes::ThemeDefinition, DRAG_REGION_HEIGHT_PX,
};

const STYLE_ID_PREFIX: &str = "openclaw-shell-style-";

pub(crate) trait ScriptTarget {
    fn run_script(&self, script: &str) -> Result<(), String>;
}

impl<R: Runtime> ScriptTarget for Webview<R> {
    fn run_script(&self, script: &str) -> Result<(), String> {
        self.eval(script).map_err(|error| error.to_string())
    }
}

impl<R: Runtime> ScriptTarget for WebviewWindow<R> {
    fn run_script(&self, script: &str) -> Result<(), String> {
        self.eval(script).map_err(|error| error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleHandle(String);

impl StyleHandle {
    pub(crate) fn id(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Default)]
pub(crate) struct InjectedAssetSet {
    styles: Vec<StyleHandle>,
}

impl InjectedAssetSet {
    fn track(&mut self, handle: StyleHandle) {
        self.styles.push(handle);
    }

    fn drain(&mut self) -> Vec<StyleHandle> {
        std::mem::take(&mut self.styles)
    }

    fn ids(&self) -> Vec<String> {
        self.styles.iter().map(|handle| handle.id().to_string()).collect()
    }

    fn release(&mut self, ids: &[String]) {
        self.styles.retain(|handle| !ids.iter().any(|id| id == handle.id()));
    }

    fn len(&self) -> usize {
        self.styles.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShellStep {
    ClearStyles,
    ThemeStyles,
    CustomStyles,
    DragRegion,
    SoundCues,
    Fullscreen,
}

#[derive(Debug, Default)]
pub(crate) struct ShellReport {
    pub(crate) failed: Vec<ShellStep>,
}

impl ShellReport {
    pub(crate) fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub(crate) struct ShellAppearance<'a> {
    pub(crate) theme: &'a ThemeDefinition,
    pub(crate) custom_css_path: Option<&'a Path>,
    pub(crate) fullscreen: bool,
}

#[derive(Default)]
pub(crate) struct ShellInjector {
    assets: Mutex<InjectedAssetSet>,
    next_style_id: AtomicU64,
    classifier: sound_cues::NodeClassifier,
}

impl ShellInjector {
    fn assets(&self) -> MutexGuard<'_, InjectedAssetSet> {
        self.assets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_style_handle(&self) -> StyleHandle {
        let id = self.next_style_id.fetch_add(1, Ordering::Relaxed) + 1;
        StyleHandle(format!("{STYLE_ID_PREFIX}{id}"))
    }

    pub(crate) fn tracked_style_count(&self) -> usize {
        self.assets().len()
    }

    /// Handles die with the page; a new navigation only needs the set emptied.
    pub(crate) fn forget_page_assets(&self) {
        let forgotten = self.assets().drain();
        if !forgotten.is_empty() {
            log::debug!("forgot {} injected style handle(s) after navigation", forgotten.len());
        }
    }

    pub(crate) fn apply_shell(
        &self,
        target: &dyn ScriptTarget,
        appearance: &ShellAppearance<'_>,
    ) -> ShellReport {
        let mut report = ShellReport::default();
        let mut run = |step: ShellStep, result: Result<(), String>| {
            if let Err(error) = result {
                log::warn!("shell step {step:?} failed: {error}");
                report.failed.push(step);
            }
        };

        let cleared = self.clear_styles(target);
        let styles_cleared = cleared.is_ok();
        run(ShellStep::ClearStyles, cleared);
        if styles_cleared {
            run(
                ShellStep::ThemeStyles,
                self.inject_tracked_style(target, &build_shell_stylesheet(appearance.theme)),
            );
            if let Some(css) = appearance.custom_css_path.and_then(read_custom_css) {
                run(ShellStep::CustomStyles, self.inject_tracked_style(target, &css));
            }
        } else {
            log::warn!("previous shell styles are still on the page; skipping style injection");
        }
        run(
            ShellStep::DragRegion,
            target.run_script(&shell_scripts::drag_region_script()),
        );
        run(
            ShellStep::SoundCues,
            target.run_script(&sound_cues::sound_cues_script(&self.classifier)),
        );
        run(
            ShellStep::Fullscreen,
            target.run_script(&shell_scripts::fullscreen_script(appearance.fullscreen)),
        );

        report
    }

    /// Handles stay tracked until the page confirms their removal.
    fn clear_styles(&self, target: &dyn ScriptTarget) -> Result<(), String> {
        let ids = self.assets().ids();
        if ids.is_empty() {
            return Ok(());
        }
        target.run_script(&shell_scripts::remove_styles_script(&ids))?;
        self.assets().release(&ids);
        Ok(())
    }

    fn inject_tracked_style(&self, target: &dyn ScriptTarget, css: &str) -> Result<(), String> {
        let handle = self.next_style_handle();
        target.run_script(&shell_scripts::inject_style_script(handle.id(), css))?;
        self.assets().track(handle);
        Ok(())
    }
}

fn read_custom_css(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(css) if !css.trim().is_empty() => Some(css),
        Ok(_) => None,
        Err(error) => {
            log::debug!("custom stylesheet {} unavailable: {error}", path.display());
            None
        }
    }
}

pub(crate) fn build_shell_stylesheet(theme: &ThemeDefinition) -> String {
    let mut css = String::from(":root {\n");
    for (token, value) in theme.palette.tokens() {
        let _ = writeln!(css, "  --openclaw-{token}: {value};");
    }
    let _ = writeln!(
        css,
        "  {}: {DRAG_REGION_HEIGHT_PX}px;",
        shell_scripts::TITLEBAR_INSET_VARIABLE
    );
    css.push_str("}\n");
    css.push_str(SHELL_LAYOUT_RULES);
    css
}

const SHELL_LAYOUT_RULES: &str = "\
html, body {
  max-width: 100%;
  overflow-x: hidden;
}
body {
  box-sizing: border-box;
  padding-top: var(--openclaw-titlebar-inset);
}
img, video, canvas, pre, table {
  max-width: 100%;
}
* {
  scrollbar-width: thin;
  scrollbar-color: var(--openclaw-scroll-thumb) var(--openclaw-scroll-track);
}
::-webkit-scrollbar {
  width: 10px;
  height: 10px;
}
::-webkit-scrollbar-track {
  background: var(--openclaw-scroll-track);
}
::-webkit-scrollbar-thumb {
  background: var(--openclaw-scroll-thumb);
  border: 2px solid transparent;
  border-radius: 8px;
  background-clip: padding-box;
}
";
