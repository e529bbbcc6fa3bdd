use std::sync::Arc;

use tauri::{webview::PageLoadEvent, AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    app_menu,
    connection_controller::ConnectionController,
    gateway_config,
    gateway_health::HttpGatewayProbe,
    gateway_launcher::CliGatewayLauncher,
    main_window::{self, MainWindowSurface},
    menu_handler,
    runtime_paths::RuntimePaths,
    shell_actions,
    shell_state::ShellState,
    DESKTOP_LOG_FILE, GATEWAY_RETRY_DELAY, MAIN_WINDOW_LABEL,
};

fn log_plugin() -> tauri::plugin::TauriPlugin<tauri::Wry> {
    tauri_plugin_log::Builder::new()
        .level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .targets([
            tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Stdout),
            tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::LogDir {
                file_name: Some(DESKTOP_LOG_FILE.to_string()),
            }),
        ])
        .build()
}

/// Opens the window (if needed) and starts a connection cycle with a freshly
/// resolved config.
fn open_main_window_and_connect(app_handle: &AppHandle) {
    if let Err(error) = main_window::create_main_window(app_handle) {
        log::error!("{error}");
        return;
    }
    if let Err(error) = shell_actions::reconnect_gateway(app_handle) {
        log::warn!("failed to start connection cycle: {error}");
    }
}

pub(crate) fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            log::info!("second instance launched; focusing existing window");
            main_window::focus_main_window(app);
        }))
        .plugin(log_plugin())
        .plugin(tauri_plugin_os::init())
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::desktop_bridge_is_desktop_runtime,
            crate::desktop_bridge_commands::desktop_bridge_get_system_info,
            crate::desktop_bridge_commands::desktop_bridge_set_vibrancy,
            crate::desktop_bridge_commands::desktop_bridge_get_gateway_config,
            crate::desktop_bridge_commands::desktop_bridge_get_connection_phase,
            crate::desktop_bridge_commands::desktop_bridge_reconnect,
            crate::desktop_bridge_commands::desktop_bridge_list_themes,
            crate::desktop_bridge_commands::desktop_bridge_set_theme,
            crate::desktop_bridge_commands::desktop_bridge_open_external_url,
            crate::desktop_bridge_commands::desktop_bridge_start_dragging,
            crate::desktop_bridge_commands::desktop_bridge_toggle_maximize,
        ])
        .on_menu_event(|app, event| menu_handler::handle_menu_event(app, event.id().as_ref()))
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match event {
                WindowEvent::Resized(_) => {
                    if let Some(webview_window) =
                        window.app_handle().get_webview_window(MAIN_WINDOW_LABEL)
                    {
                        main_window::sync_fullscreen(&webview_window);
                    }
                }
                WindowEvent::Destroyed => {
                    let app_handle = window.app_handle();
                    log::info!("main window destroyed");
                    if let Some(controller) = app_handle.try_state::<Arc<ConnectionController>>() {
                        controller.shutdown();
                    }
                    app_handle.state::<ShellState>().reset_window();
                }
                _ => {}
            }
        })
        .on_page_load(|webview, payload| {
            if webview.window().label() != MAIN_WINDOW_LABEL {
                return;
            }
            match payload.event() {
                PageLoadEvent::Started => {
                    log::debug!("page-load started: {}", payload.url().origin().ascii_serialization());
                    shell_actions::prepare_page(webview, payload.url());
                }
                PageLoadEvent::Finished => {
                    log::debug!("page-load finished: {}", payload.url().origin().ascii_serialization());
                    shell_actions::apply_page_shell(webview, payload.url());
                }
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            log::info!("OpenClaw desktop {} starting", app.package_info().version);

            let paths = RuntimePaths::detect();
            let resolved = gateway_config::resolve(&paths);
            let launcher = CliGatewayLauncher::from_environment(&paths);
            let state = ShellState::new(paths, &resolved);
            let current_theme = state.theme().id;
            app.manage(state);

            let runtime = tauri::async_runtime::handle().inner().clone();
            let controller = ConnectionController::new(
                Arc::new(HttpGatewayProbe::default()),
                Arc::new(launcher),
                Arc::new(MainWindowSurface::new(app_handle.clone())),
                runtime,
                GATEWAY_RETRY_DELAY,
            );
            app.manage(controller);

            if let Err(error) = app_menu::setup_app_menu(&app_handle, current_theme) {
                log::warn!("failed to initialize app menu: {error}");
            }

            open_main_window_and_connect(&app_handle);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(handle_run_event);
}

#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
fn handle_run_event(app_handle: &AppHandle, event: RunEvent) {
    match event {
        RunEvent::ExitRequested { api, code, .. } => {
            // Closing the last window keeps the app alive on macOS.
            if cfg!(target_os = "macos") && code.is_none() {
                api.prevent_exit();
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            if app_handle.get_webview_window(MAIN_WINDOW_LABEL).is_none() {
                log::info!("reopening main window");
                open_main_window_and_connect(app_handle);
            } else {
                main_window::focus_main_window(app_handle);
            }
        }
        _ => {}
    }
}
