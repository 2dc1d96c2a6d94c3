//! techquiry: CLI for the TechQuiry platform.
//! Reads config, optionally logs in (`--user <name>`, password on stdin),
//! prints the resolved session and the first page of inquiries.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use techquiry_client::{config, TechQuiryClient, UserLogin};

const INQUIRY_PAGE_SIZE: u32 = 10;

fn resolve_config_path() -> PathBuf {
    // 1. --config <path> flag
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if let Some(path) = args.get(pos + 1) {
            return PathBuf::from(path);
        }
    }
    // 2. TECHQUIRY_CONFIG env var
    if let Ok(val) = std::env::var("TECHQUIRY_CONFIG") {
        return PathBuf::from(val);
    }
    // 3. Default path (~/.techquiry/config.yaml)
    config::default_config_path().unwrap_or_else(|| {
        eprintln!("Error: unable to determine config path (set --config or TECHQUIRY_CONFIG)");
        process::exit(1);
    })
}

fn username_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--user")
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let config_path = resolve_config_path();
    let cfg = match config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "Error: failed to load config from {}: {}",
                config_path.display(),
                e
            );
            process::exit(1);
        }
    };

    let base_url = cfg.api.base_url.unwrap_or_else(|| {
        eprintln!("Error: api.base_url missing from config");
        process::exit(1);
    });
    let timeout = cfg.api.timeout_secs.map(Duration::from_secs);

    // Read the password from stdin when logging in.
    let login = username_arg().map(|username| {
        let stdin = io::stdin();
        let mut password = String::new();
        stdin.lock().read_line(&mut password).unwrap_or(0);
        let password = password.trim_end_matches(['\r', '\n']).to_string();
        if password.is_empty() {
            eprintln!("Error: no password provided on stdin");
            process::exit(1);
        }
        UserLogin::credentials(username, password)
    });

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to create runtime: {}", e);
            process::exit(1);
        });

    rt.block_on(async {
        let client = match TechQuiryClient::connect(&base_url, timeout) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

        if let Some(credentials) = &login {
            if let Err(e) = client.users.login(credentials).await {
                eprintln!("Error: login failed: {}", e);
                process::exit(1);
            }
        }

        match client.session.refresh().await {
            Some(session) => {
                println!("Logged in as {}", session.display_name());
            }
            None => println!("Not logged in"),
        }

        match client.inquiries.range(INQUIRY_PAGE_SIZE, 1).await {
            Ok(inquiries) if inquiries.is_empty() => println!("No inquiries."),
            Ok(inquiries) => {
                println!("\nInquiries:");
                for inquiry in &inquiries {
                    println!("  {}", inquiry.title);
                }
            }
            Err(e) => {
                eprintln!("Error: failed to list inquiries: {}", e);
                process::exit(1);
            }
        }
    });
}
