//! Tauri commands for the TechQuiry GUI: config form, connection, login
//! form, navigation bar state, route guard, and the error toast.
//! The Tauri `#[command]` wrappers delegate to testable plain functions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use techquiry_client::{
    config::{self, ApiSection, Config, UiSection},
    no_auth_guard, RouteAccess, TechQuiryClient, UserLogin, HOME_ROUTE,
};

const DEFAULT_ALERT_TIME_MS: u64 = 5000;

// ── Global runtime and client state (single connection for the GUI) ────

fn global_runtime() -> &'static tokio::runtime::Runtime {
    static RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
    RT.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to create tokio runtime")
    })
}

static CLIENT: Mutex<Option<Arc<TechQuiryClient>>> = Mutex::new(None);
static ALERT: Mutex<Option<ErrorToast>> = Mutex::new(None);

fn current_client() -> Result<Arc<TechQuiryClient>, String> {
    CLIENT
        .lock()
        .map_err(|e| e.to_string())?
        .as_ref()
        .cloned()
        .ok_or_else(|| "Not connected".to_string())
}

// ── Config form ─────────────────────────────────────────────────────────

/// JSON-friendly config form values sent to/from the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigForm {
    pub api_base_url: String,
    pub timeout_secs: Option<u64>,
    pub alert_time_ms: u64,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            timeout_secs: None,
            alert_time_ms: DEFAULT_ALERT_TIME_MS,
        }
    }
}

impl From<Config> for ConfigForm {
    fn from(c: Config) -> Self {
        Self {
            api_base_url: c.api.base_url.unwrap_or_default(),
            timeout_secs: c.api.timeout_secs,
            alert_time_ms: c.ui.alert_time_ms.unwrap_or(DEFAULT_ALERT_TIME_MS),
        }
    }
}

impl From<ConfigForm> for Config {
    fn from(f: ConfigForm) -> Self {
        Config {
            api: ApiSection {
                base_url: Some(f.api_base_url),
                timeout_secs: f.timeout_secs,
            },
            ui: UiSection {
                alert_time_ms: Some(f.alert_time_ms),
            },
        }
    }
}

/// Resolve config path from optional override, env, or default.
pub fn resolve_config_path(override_path: Option<&str>) -> Result<PathBuf, String> {
    if let Some(p) = override_path {
        return Ok(PathBuf::from(p));
    }
    if let Ok(val) = std::env::var("TECHQUIRY_CONFIG") {
        return Ok(PathBuf::from(val));
    }
    config::default_config_path().ok_or_else(|| "Cannot determine config path".into())
}

/// Load config from `path` and return form values.
pub fn do_load_config(path: &str) -> Result<ConfigForm, String> {
    let cfg = config::load(std::path::Path::new(path)).map_err(|e| e.to_string())?;
    Ok(ConfigForm::from(cfg))
}

/// Save form values to `path` as YAML. Creates parent dirs if needed.
pub fn do_save_config(path: &str, form: &ConfigForm) -> Result<(), String> {
    let cfg: Config = form.clone().into();
    config::save(std::path::Path::new(path), &cfg).map_err(|e| e.to_string())
}

// ── Connection ──────────────────────────────────────────────────────────

/// Connection status returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionStatus {
    /// "connected" or "disconnected"
    pub state: String,
    pub message: Option<String>,
}

/// Build the client stack for `base_url`, start the error toast listener,
/// and run the initial session refresh.
/// Connection failure is reported in the status, never as an Err.
pub fn do_connect(base_url: &str, form: &ConfigForm) -> Result<ConnectionStatus, String> {
    let timeout = form.timeout_secs.map(Duration::from_secs);
    let client = match TechQuiryClient::connect(base_url, timeout) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            return Ok(ConnectionStatus {
                state: "disconnected".into(),
                message: Some(e.to_string()),
            })
        }
    };

    let toast = ErrorToast::start(&client, Duration::from_millis(form.alert_time_ms));
    {
        let mut guard = ALERT.lock().map_err(|e| e.to_string())?;
        *guard = Some(toast);
    }
    {
        let mut guard = CLIENT.lock().map_err(|e| e.to_string())?;
        *guard = Some(client.clone());
    }

    // Resolve the session before the first view renders; failures surface
    // through the toast, not here.
    global_runtime().block_on(client.session.refresh());

    Ok(ConnectionStatus {
        state: "connected".into(),
        message: None,
    })
}

/// Drop the current client stack. Safe to call when not connected.
pub fn do_disconnect() {
    if let Ok(mut guard) = CLIENT.lock() {
        *guard = None;
    }
    if let Ok(mut guard) = ALERT.lock() {
        *guard = None;
    }
}

pub fn is_connected() -> bool {
    CLIENT.lock().map(|g| g.is_some()).unwrap_or(false)
}

// ── Login form ──────────────────────────────────────────────────────────

/// Result of a login attempt returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginOutcome {
    pub logged_in: bool,
    /// Route to navigate to after a successful login.
    pub redirect: Option<String>,
    /// Form-level validation message ("required" fields), if any.
    pub validation: Option<String>,
}

/// Log in with the form values, then rebuild the session.
/// Empty fields fail validation without a network call; HTTP failures are
/// reported to the error hub for the toast and yield `logged_in: false`.
pub fn do_login(username: &str, password: &str) -> Result<LoginOutcome, String> {
    if username.trim().is_empty() || password.is_empty() {
        return Ok(LoginOutcome {
            logged_in: false,
            redirect: None,
            validation: Some("Username and password are required".into()),
        });
    }
    let client = current_client()?;
    let credentials = UserLogin::credentials(username, password);

    global_runtime().block_on(async {
        match client.users.login(&credentials).await {
            Ok(_) => {
                client.session.refresh().await;
                Ok(LoginOutcome {
                    logged_in: true,
                    redirect: Some(HOME_ROUTE.to_string()),
                    validation: None,
                })
            }
            Err(error) => {
                client.errors.report(error);
                Ok(LoginOutcome {
                    logged_in: false,
                    redirect: None,
                    validation: None,
                })
            }
        }
    })
}

/// Log out and drop to an anonymous session.
pub fn do_logout() -> Result<(), String> {
    let client = current_client()?;
    global_runtime().block_on(async {
        match client.users.logout().await {
            Ok(()) => client.session.clear(),
            Err(error) => client.errors.report(error),
        }
    });
    Ok(())
}

// ── Navigation bar ──────────────────────────────────────────────────────

/// Session summary rendered in the navigation bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavBarState {
    pub logged_in: bool,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub has_icon: bool,
}

pub fn session_status() -> Result<NavBarState, String> {
    let client = current_client()?;
    Ok(match client.session.current_session() {
        Some(session) => NavBarState {
            logged_in: true,
            username: Some(session.user_login.username.clone()),
            display_name: Some(session.display_name()),
            has_icon: session.user_icon.is_some(),
        },
        None => NavBarState {
            logged_in: false,
            username: None,
            display_name: None,
            has_icon: false,
        },
    })
}

// ── Route guard ─────────────────────────────────────────────────────────

/// Guard decision for the login route returned to the frontend router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuardDecision {
    pub allowed: bool,
    pub redirect: Option<String>,
}

/// Consult the session service before navigating to the login view.
/// Waits for an in-flight session lookup instead of racing a stale "none".
pub fn do_check_login_route() -> Result<GuardDecision, String> {
    let client = current_client()?;
    let access = global_runtime().block_on(no_auth_guard(&client.session));
    Ok(match access {
        RouteAccess::Allowed => GuardDecision {
            allowed: true,
            redirect: None,
        },
        RouteAccess::Denied => GuardDecision {
            allowed: false,
            redirect: Some(HOME_ROUTE.to_string()),
        },
    })
}

// ── Error toast ─────────────────────────────────────────────────────────

/// Current toast contents; `open: false` once the display delay has
/// elapsed after the latest error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlertState {
    pub open: bool,
    pub title: Option<String>,
    pub message: Option<String>,
}

/// Background listener turning hub errors into toast state.
///
/// Each error (re)opens the toast with its title/message; the toast closes
/// `alert_time` after the latest error, not the first.
#[derive(Debug)]
struct ErrorToast {
    state: Arc<Mutex<AlertState>>,
}

impl ErrorToast {
    fn start(client: &TechQuiryClient, alert_time: Duration) -> Self {
        let state = Arc::new(Mutex::new(AlertState::default()));
        let shared = state.clone();
        let mut errors = client.errors.subscribe();
        global_runtime().spawn(async move {
            use tokio::sync::broadcast::error::RecvError;
            loop {
                match errors.recv().await {
                    Ok(error) => set_alert(&shared, &error),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => return,
                }
                // Debounce: keep the toast open while errors keep coming.
                loop {
                    match tokio::time::timeout(alert_time, errors.recv()).await {
                        Ok(Ok(error)) => set_alert(&shared, &error),
                        Ok(Err(RecvError::Lagged(_))) => continue,
                        Ok(Err(RecvError::Closed)) => return,
                        Err(_) => {
                            close_alert(&shared);
                            break;
                        }
                    }
                }
            }
        });
        Self { state }
    }

    fn snapshot(&self) -> AlertState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

fn set_alert(state: &Arc<Mutex<AlertState>>, error: &techquiry_client::ErrorResponse) {
    if let Ok(mut guard) = state.lock() {
        *guard = AlertState {
            open: true,
            title: error.title(),
            message: Some(error.message.clone()),
        };
    }
}

fn close_alert(state: &Arc<Mutex<AlertState>>) {
    if let Ok(mut guard) = state.lock() {
        guard.open = false;
    }
}

/// Snapshot of the error toast for the frontend to render.
pub fn do_current_alert() -> AlertState {
    ALERT
        .lock()
        .ok()
        .and_then(|guard| guard.as_ref().map(|toast| toast.snapshot()))
        .unwrap_or_default()
}

/// Forward an untyped frontend error payload to the hub; malformed values
/// are dropped by the hub's guard.
pub fn do_report_error(payload: serde_json::Value) -> Result<(), String> {
    let client = current_client()?;
    client.errors.report_value(payload);
    Ok(())
}

// ── Tauri command wrappers ──────────────────────────────────────────────

#[tauri::command]
pub fn get_config_path() -> Result<String, String> {
    let p = resolve_config_path(None)?;
    p.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| "Config path is not valid UTF-8".into())
}

#[tauri::command]
pub fn load_config(path: String) -> Result<ConfigForm, String> {
    do_load_config(&path)
}

#[tauri::command]
pub fn save_config(path: String, form: ConfigForm) -> Result<(), String> {
    do_save_config(&path, &form)
}

#[tauri::command]
pub fn connect_server(base_url: String, form: ConfigForm) -> Result<ConnectionStatus, String> {
    do_connect(&base_url, &form)
}

#[tauri::command]
pub fn disconnect_server() -> Result<(), String> {
    do_disconnect();
    Ok(())
}

#[tauri::command]
pub fn connection_status() -> ConnectionStatus {
    if is_connected() {
        ConnectionStatus {
            state: "connected".into(),
            message: None,
        }
    } else {
        ConnectionStatus {
            state: "disconnected".into(),
            message: None,
        }
    }
}

#[tauri::command]
pub fn login(username: String, password: String) -> Result<LoginOutcome, String> {
    do_login(&username, &password)
}

#[tauri::command]
pub fn logout() -> Result<(), String> {
    do_logout()
}

#[tauri::command]
pub fn nav_bar_state() -> Result<NavBarState, String> {
    session_status()
}

#[tauri::command]
pub fn check_login_route() -> Result<GuardDecision, String> {
    do_check_login_route()
}

#[tauri::command]
pub fn current_alert() -> AlertState {
    do_current_alert()
}

#[tauri::command]
pub fn report_error(payload: serde_json::Value) -> Result<(), String> {
    do_report_error(payload)
}
