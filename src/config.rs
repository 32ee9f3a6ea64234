use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001/api";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_ALERT_TTL_SECS: u64 = 5;
pub const DEFAULT_DOWNLOAD_REFRESH_DELAY_SECS: u64 = 2;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("KVM_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_host() -> String {
    env::var("KVM_PANEL_HOST")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn get_port() -> u16 {
    parse_env_number("KVM_PANEL_PORT", DEFAULT_PORT)
}

pub fn get_poll_interval() -> Duration {
    Duration::from_secs(parse_env_number("KVM_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS).max(1))
}

pub fn get_alert_ttl() -> Duration {
    Duration::from_secs(parse_env_number("KVM_ALERT_TTL_SECS", DEFAULT_ALERT_TTL_SECS))
}

pub fn get_download_refresh_delay() -> Duration {
    Duration::from_secs(parse_env_number(
        "KVM_DOWNLOAD_REFRESH_DELAY_SECS",
        DEFAULT_DOWNLOAD_REFRESH_DELAY_SECS,
    ))
}

fn parse_env_number<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, %default, "Invalid number in environment; using default");
                default
            }
        },
        _ => default,
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
