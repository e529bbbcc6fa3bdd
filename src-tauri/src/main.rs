#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_menu;
mod app_runtime;
mod app_types;
mod connection_controller;
mod desktop_bridge;
mod desktop_bridge_commands;
mod desktop_settings;
mod gateway_config;
mod gateway_health;
mod gateway_launcher;
mod main_window;
mod menu_actions;
mod menu_handler;
mod runtime_paths;
mod shell_actions;
mod shell_injector;
mod shell_scripts;
mod shell_state;
mod sound_cues;
mod themes;
mod window_effects;
mod window_zoom;

pub(crate) use app_constants::*;
pub(crate) use app_types::{
    AuthMode, BindScope, BridgeResult, ConnectionConfig, GatewayBridgeConfig, SystemInfo,
    ThemeListing, ThemeSummary,
};

fn main() {
    app_runtime::run();
}
