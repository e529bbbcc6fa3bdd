//! Best-effort start of the gateway through the `openclaw` CLI.
//!
//! The CLI may hand the gateway off to a background service and exit, or keep
//! running for a while; either way `attempt_start` returns after a short grace
//! window. The result is advisory only.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::Duration,
};

use async_trait::async_trait;
use tokio::{process::Command, sync::oneshot};

use crate::{
    runtime_paths::RuntimePaths, AUTO_START_ENV, GATEWAY_BINARY_NAME, GATEWAY_CMD_ENV,
    GATEWAY_ENSURE_RUNNING_ARGS, GATEWAY_LAUNCH_GRACE, GATEWAY_LAUNCH_HARD_TIMEOUT,
};

#[async_trait]
pub(crate) trait GatewayLauncher: Send + Sync {
    async fn attempt_start(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum LaunchError {
    #[error("gateway auto-start is disabled (OPENCLAW_DESKTOP_AUTO_START=0)")]
    Disabled,
    #[error("no `openclaw` executable found in known locations or PATH")]
    NotFound,
    #[error("invalid OPENCLAW_GATEWAY_CMD: {0}")]
    InvalidCustomCommand(String),
    #[error("failed to spawn {command:?}: {source}")]
    Spawn {
        command: Vec<String>,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for {command:?}: {reason}")]
    Wait { command: Vec<String>, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchPlan {
    pub(crate) cmd: PathBuf,
    pub(crate) args: Vec<String>,
    pub(crate) path_env: Option<OsString>,
}

impl LaunchPlan {
    pub(crate) fn debug_command(&self) -> Vec<String> {
        let mut parts = vec![self.cmd.to_string_lossy().to_string()];
        parts.extend(self.args.iter().cloned());
        parts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LaunchTimings {
    /// How long `attempt_start` waits before reporting back.
    pub(crate) grace: Duration,
    /// When the child is killed if it is still running.
    pub(crate) hard_timeout: Duration,
}

impl Default for LaunchTimings {
    fn default() -> Self {
        Self {
            grace: GATEWAY_LAUNCH_GRACE,
            hard_timeout: GATEWAY_LAUNCH_HARD_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub(crate) enum LaunchOutcome {
    Exited(ExitStatus),
    StillRunning,
}

pub(crate) struct CliGatewayLauncher {
    candidates: Vec<PathBuf>,
    path_env: Option<OsString>,
    custom_command: Option<String>,
    enabled: bool,
    timings: LaunchTimings,
}

impl CliGatewayLauncher {
    pub(crate) fn from_environment(paths: &RuntimePaths) -> Self {
        let path_env = build_launch_path(
            paths.home_dir.as_deref(),
            paths.openclaw_home.as_deref(),
            env::var_os("PATH"),
        );
        let custom_command = env::var(GATEWAY_CMD_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let enabled = env::var(AUTO_START_ENV)
            .map(|value| value.trim() != "0")
            .unwrap_or(true);

        Self {
            candidates: default_binary_candidates(
                paths.home_dir.as_deref(),
                paths.openclaw_home.as_deref(),
            ),
            path_env,
            custom_command,
            enabled,
            timings: LaunchTimings::default(),
        }
    }

    pub(crate) fn resolve_launch_plan(&self) -> Result<LaunchPlan, LaunchError> {
        if !self.enabled {
            return Err(LaunchError::Disabled);
        }

        if let Some(custom) = &self.custom_command {
            let mut pieces = shlex::split(custom)
                .ok_or_else(|| LaunchError::InvalidCustomCommand(custom.clone()))?;
            if pieces.is_empty() {
                return Err(LaunchError::InvalidCustomCommand(custom.clone()));
            }
            let cmd = PathBuf::from(pieces.remove(0));
            return Ok(LaunchPlan {
                cmd,
                args: pieces,
                path_env: self.path_env.clone(),
            });
        }

        let cmd = locate_gateway_binary(&self.candidates, self.path_env.as_deref())
            .ok_or(LaunchError::NotFound)?;
        Ok(LaunchPlan {
            cmd,
            args: GATEWAY_ENSURE_RUNNING_ARGS
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
            path_env: self.path_env.clone(),
        })
    }
}

#[async_trait]
impl GatewayLauncher for CliGatewayLauncher {
    async fn attempt_start(&self) -> bool {
        let plan = match self.resolve_launch_plan() {
            Ok(plan) => plan,
            Err(error) => {
                log::info!("gateway launch skipped: {error}");
                return false;
            }
        };

        log::info!("starting gateway with {:?}", plan.debug_command());
        match run_launch_plan(&plan, self.timings).await {
            Ok(LaunchOutcome::Exited(status)) if status.success() => {
                log::info!("gateway launcher exited successfully");
                true
            }
            Ok(LaunchOutcome::Exited(status)) => {
                log::warn!("gateway launcher exited with {status}");
                false
            }
            Ok(LaunchOutcome::StillRunning) => {
                log::info!(
                    "gateway launcher still running after {}ms; continuing",
                    self.timings.grace.as_millis()
                );
                true
            }
            Err(error) => {
                log::warn!("gateway launch failed: {error}");
                false
            }
        }
    }
}

/// Spawns the plan and waits at most `timings.grace` for it to exit.
///
/// A watcher task keeps waiting on the child until `timings.hard_timeout`,
/// then kills it.
pub(crate) async fn run_launch_plan(
    plan: &LaunchPlan,
    timings: LaunchTimings,
) -> Result<LaunchOutcome, LaunchError> {
    let mut command = Command::new(&plan.cmd);
    command
        .args(&plan.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(path) = &plan.path_env {
        command.env("PATH", path);
    }
    #[cfg(target_os = "windows")]
    {
        command.creation_flags(crate::CREATE_NO_WINDOW);
    }

    let mut child = command.spawn().map_err(|source| LaunchError::Spawn {
        command: plan.debug_command(),
        source,
    })?;

    let (exit_tx, exit_rx) = oneshot::channel::<Result<ExitStatus, String>>();
    let hard_timeout = timings.hard_timeout;
    let debug_command = plan.debug_command();
    tokio::spawn(async move {
        let result = match tokio::time::timeout(hard_timeout, child.wait()).await {
            Ok(status) => status.map_err(|error| error.to_string()),
            Err(_) => {
                log::warn!(
                    "gateway launcher {debug_command:?} exceeded {}ms; killing it",
                    hard_timeout.as_millis()
                );
                if let Err(error) = child.kill().await {
                    log::warn!("failed to kill gateway launcher: {error}");
                }
                Err(format!("timed out after {}ms", hard_timeout.as_millis()))
            }
        };
        let _ = exit_tx.send(result);
    });

    match tokio::time::timeout(timings.grace, exit_rx).await {
        Ok(Ok(Ok(status))) => Ok(LaunchOutcome::Exited(status)),
        Ok(Ok(Err(reason))) => Err(LaunchError::Wait {
            command: plan.debug_command(),
            reason,
        }),
        Ok(Err(_)) => Err(LaunchError::Wait {
            command: plan.debug_command(),
            reason: "launcher watcher dropped".to_string(),
        }),
        Err(_) => Ok(LaunchOutcome::StillRunning),
    }
}

pub(crate) fn locate_gateway_binary(
    candidates: &[PathBuf],
    path_env: Option<&std::ffi::OsStr>,
) -> Option<PathBuf> {
    if let Some(found) = candidates.iter().find(|candidate| is_executable_file(candidate)) {
        return Some(found.clone());
    }

    let cwd = env::current_dir().unwrap_or_default();
    match path_env {
        Some(path) => which::which_in(GATEWAY_BINARY_NAME, Some(path), cwd).ok(),
        None => which::which(GATEWAY_BINARY_NAME).ok(),
    }
}

fn default_binary_candidates(home_dir: Option<&Path>, openclaw_home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    #[cfg(target_os = "windows")]
    {
        if let Some(app_data) = env::var_os("APPDATA") {
            candidates.push(PathBuf::from(app_data).join("npm").join("openclaw.cmd"));
        }
        if let Some(root) = openclaw_home {
            candidates.push(root.join("bin").join("openclaw.exe"));
        }
        let _ = home_dir;
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(root) = openclaw_home {
            candidates.push(root.join("bin").join(GATEWAY_BINARY_NAME));
        }
        candidates.push(PathBuf::from("/opt/homebrew/bin").join(GATEWAY_BINARY_NAME));
        candidates.push(PathBuf::from("/usr/local/bin").join(GATEWAY_BINARY_NAME));
        if let Some(home) = home_dir {
            for relative in [".npm-global/bin", ".local/bin", ".bun/bin"] {
                candidates.push(home.join(relative).join(GATEWAY_BINARY_NAME));
            }
        }
    }

    candidates
}

/// GUI launches often inherit a minimal PATH; add the usual CLI install dirs.
pub(crate) fn build_launch_path(
    home_dir: Option<&Path>,
    openclaw_home: Option<&Path>,
    inherited: Option<OsString>,
) -> Option<OsString> {
    let mut entries: Vec<PathBuf> = inherited
        .as_deref()
        .map(|value| env::split_paths(value).collect())
        .unwrap_or_default();

    let mut extras = Vec::new();
    if cfg!(not(target_os = "windows")) {
        extras.push(PathBuf::from("/opt/homebrew/bin"));
        extras.push(PathBuf::from("/usr/local/bin"));
    }
    if let Some(home) = home_dir {
        for relative in [".local/bin", ".npm-global/bin", ".bun/bin", ".volta/bin"] {
            extras.push(home.join(relative));
        }
    }
    if let Some(root) = openclaw_home {
        extras.push(root.join("bin"));
    }

    for extra in extras {
        if !entries.contains(&extra) {
            entries.push(extra);
        }
    }

    match env::join_paths(entries) {
        Ok(joined) => Some(joined),
        Err(error) => {
            log::warn!("failed to build launcher PATH, inheriting environment: {error}");
            inherited
        }
    }
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher_with(custom_command: Option<&str>, candidates: Vec<PathBuf>) -> CliGatewayLauncher {
        CliGatewayLauncher {
            candidates,
            path_env: Some(OsString::new()),
            custom_command: custom_command.map(str::to_string),
            enabled: true,
            timings: LaunchTimings {
                grace: Duration::from_millis(300),
                hard_timeout: Duration::from_secs(2),
            },
        }
    }

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::write(path, "#!/bin/sh\nexit 0\n").expect("write executable");
        let mut permissions = std::fs::metadata(path).expect("metadata").permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(path, permissions).expect("chmod");
    }

    #[test]
    fn disabled_launcher_resolves_no_plan() {
        let mut launcher = launcher_with(Some("sh -c 'exit 0'"), Vec::new());
        launcher.enabled = false;
        assert!(matches!(
            launcher.resolve_launch_plan(),
            Err(LaunchError::Disabled)
        ));
    }

    #[test]
    fn custom_command_is_split_like_a_shell() {
        let launcher = launcher_with(Some("/usr/bin/env openclaw gateway 'start --now'"), Vec::new());
        let plan = launcher.resolve_launch_plan().expect("plan");
        assert_eq!(plan.cmd, PathBuf::from("/usr/bin/env"));
        assert_eq!(plan.args, vec!["openclaw", "gateway", "start --now"]);
    }

    #[test]
    fn unbalanced_custom_command_is_rejected() {
        let launcher = launcher_with(Some("openclaw 'gateway"), Vec::new());
        assert!(matches!(
            launcher.resolve_launch_plan(),
            Err(LaunchError::InvalidCustomCommand(_))
        ));
    }

    #[test]
    fn missing_binary_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let launcher = launcher_with(None, vec![dir.path().join("openclaw")]);
        assert!(matches!(
            launcher.resolve_launch_plan(),
            Err(LaunchError::NotFound)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn first_executable_candidate_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let not_executable = dir.path().join("plain");
        std::fs::write(&not_executable, "").expect("write");
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        make_executable(&first);
        make_executable(&second);

        let launcher = launcher_with(
            None,
            vec![dir.path().join("missing"), not_executable, first.clone(), second],
        );
        let plan = launcher.resolve_launch_plan().expect("plan");

        assert_eq!(plan.cmd, first);
        assert_eq!(plan.args, vec!["gateway", "install"]);
    }

    #[cfg(unix)]
    #[test]
    fn path_lookup_is_the_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = dir.path().join("openclaw");
        make_executable(&binary);

        let found = locate_gateway_binary(&[], Some(dir.path().as_os_str()));

        assert_eq!(found, Some(binary));
    }

    #[test]
    fn launch_path_appends_known_dirs_once() {
        let inherited = env::join_paths([PathBuf::from("/usr/bin"), PathBuf::from("/home/claw/.local/bin")])
            .expect("join");
        let joined = build_launch_path(
            Some(Path::new("/home/claw")),
            Some(Path::new("/home/claw/.openclaw")),
            Some(inherited),
        )
        .expect("path");
        let entries: Vec<PathBuf> = env::split_paths(&joined).collect();

        assert_eq!(entries[0], PathBuf::from("/usr/bin"));
        assert_eq!(
            entries
                .iter()
                .filter(|entry| **entry == PathBuf::from("/home/claw/.local/bin"))
                .count(),
            1
        );
        assert!(entries.contains(&PathBuf::from("/home/claw/.bun/bin")));
        assert!(entries.contains(&PathBuf::from("/home/claw/.openclaw/bin")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn quick_success_reports_exit_status() {
        let launcher = launcher_with(Some("/bin/sh -c 'exit 0'"), Vec::new());
        assert!(launcher.attempt_start().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_launcher_reports_false() {
        let launcher = launcher_with(Some("/bin/sh -c 'exit 3'"), Vec::new());
        assert!(!launcher.attempt_start().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn long_running_launcher_returns_after_grace() {
        let plan = LaunchPlan {
            cmd: PathBuf::from("/bin/sh"),
            args: vec!["-c".to_string(), "sleep 5".to_string()],
            path_env: None,
        };
        let started = std::time::Instant::now();

        let outcome = run_launch_plan(
            &plan,
            LaunchTimings {
                grace: Duration::from_millis(150),
                hard_timeout: Duration::from_millis(600),
            },
        )
        .await
        .expect("spawned");

        assert!(matches!(outcome, LaunchOutcome::StillRunning));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    async fn run_delayed_touch(marker: &Path, hard_timeout: Duration) -> bool {
        let plan = LaunchPlan {
            cmd: PathBuf::from("/bin/sh"),
            args: vec![
                "-c".to_string(),
                format!("sleep 1; touch '{}'", marker.display()),
            ],
            path_env: None,
        };

        let outcome = run_launch_plan(
            &plan,
            LaunchTimings {
                grace: Duration::from_millis(100),
                hard_timeout,
            },
        )
        .await
        .expect("spawned");
        assert!(matches!(outcome, LaunchOutcome::StillRunning));

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        marker.exists()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launcher_is_killed_at_hard_timeout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let marker = dir.path().join("finished");

        assert!(!run_delayed_touch(&marker, Duration::from_millis(300)).await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launcher_within_hard_timeout_runs_to_completion() {
        let dir = tempfile::tempdir().expect("tempdir");
        let marker = dir.path().join("finished");

        assert!(run_delayed_touch(&marker, Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn unspawnable_command_is_swallowed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("does-not-exist");
        let launcher = launcher_with(Some(missing.to_string_lossy().as_ref()), Vec::new());

        assert!(!launcher.attempt_start().await);
    }
}
