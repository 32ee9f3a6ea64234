use kvm_panel::config;
use kvm_panel::controller::ControllerSettings;
use std::env;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("http://kvm.lan:8001/api/"),
        "http://kvm.lan:8001/api"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("http://kvm.lan:8001/api///"),
        "http://kvm.lan:8001/api"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  http://kvm.lan:8001/api/  "),
        "http://kvm.lan:8001/api"
    );
}

#[test]
fn test_sanitize_base_url_empty_falls_back_to_default() {
    assert_eq!(config::sanitize_base_url(""), config::DEFAULT_API_BASE_URL);
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:8001/api");
}

// All KVM_API_URL cases live in one test; the variable is process-wide.
#[test]
fn test_get_api_base_url() {
    env::set_var("KVM_API_URL", "http://10.0.0.5:8001/api/");
    assert_eq!(config::get_api_base_url(), "http://10.0.0.5:8001/api");

    env::set_var("KVM_API_URL", "http://10.0.0.5:8001/api");
    assert_eq!(config::get_api_base_url(), "http://10.0.0.5:8001/api");

    env::remove_var("KVM_API_URL");
    assert_eq!(config::get_api_base_url(), "http://localhost:8001/api");
}

#[test]
fn test_get_port_ignores_invalid_value() {
    env::set_var("KVM_PANEL_PORT", "9090");
    assert_eq!(config::get_port(), 9090);

    env::set_var("KVM_PANEL_PORT", "not-a-port");
    assert_eq!(config::get_port(), config::DEFAULT_PORT);

    env::remove_var("KVM_PANEL_PORT");
    assert_eq!(config::get_port(), 8080);
}

#[test]
fn test_get_host_blank_uses_default() {
    env::set_var("KVM_PANEL_HOST", "  ");
    assert_eq!(config::get_host(), "127.0.0.1");

    env::set_var("KVM_PANEL_HOST", "0.0.0.0");
    assert_eq!(config::get_host(), "0.0.0.0");
    env::remove_var("KVM_PANEL_HOST");
}

#[test]
fn test_poll_interval_has_a_floor() {
    env::set_var("KVM_POLL_INTERVAL_SECS", "0");
    assert_eq!(config::get_poll_interval(), Duration::from_secs(1));

    env::set_var("KVM_POLL_INTERVAL_SECS", "10");
    assert_eq!(config::get_poll_interval(), Duration::from_secs(10));
    env::remove_var("KVM_POLL_INTERVAL_SECS");
}

#[test]
fn test_controller_settings_defaults() {
    let settings = ControllerSettings::default();
    assert_eq!(settings.poll_interval, Duration::from_secs(5));
    assert_eq!(settings.alert_ttl, Duration::from_secs(5));
    assert_eq!(settings.download_refresh_delay, Duration::from_secs(2));
}

#[test]
fn test_load_env_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "KVM_ALERT_TTL_SECS=9").unwrap();
    writeln!(file, "KVM_DOWNLOAD_REFRESH_DELAY_SECS=4").unwrap();

    config::load_env_file(file.path().to_str());
    assert_eq!(config::get_alert_ttl(), Duration::from_secs(9));
    assert_eq!(config::get_download_refresh_delay(), Duration::from_secs(4));

    env::remove_var("KVM_ALERT_TTL_SECS");
    env::remove_var("KVM_DOWNLOAD_REFRESH_DELAY_SECS");
}
