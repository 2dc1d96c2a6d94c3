//! Tauri application library for the TechQuiry GUI.

pub mod commands;

pub fn run() {
    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            commands::get_config_path,
            commands::load_config,
            commands::save_config,
            commands::connect_server,
            commands::disconnect_server,
            commands::connection_status,
            commands::login,
            commands::logout,
            commands::nav_bar_state,
            commands::check_login_route,
            commands::current_alert,
            commands::report_error,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
