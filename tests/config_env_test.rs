//! Environment-driven configuration. These tests mutate process
//! environment variables and must not run concurrently.

use mentorlink::startup::config::{API_URL_VAR, HOME_VAR, LOG_VAR, TIMEOUT_VAR};
use mentorlink::startup::ClientConfig;
use serial_test::serial;
use std::time::Duration;

fn clear_env() {
    for var in [API_URL_VAR, TIMEOUT_VAR, HOME_VAR, LOG_VAR] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    std::env::set_var(API_URL_VAR, "https://mentors.example.com/api");
    std::env::set_var(TIMEOUT_VAR, "7");
    std::env::set_var(HOME_VAR, dir.path());
    std::env::set_var(LOG_VAR, "mentorlink=trace");

    let config = ClientConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.base_url, "https://mentors.example.com/api");
    assert_eq!(config.timeout(), Duration::from_secs(7));
    assert_eq!(config.log_filter, "mentorlink=trace");
    assert_eq!(config.session_path().unwrap(), dir.path().join("storage.json"));
}

#[test]
#[serial]
fn test_from_env_bad_timeout() {
    clear_env();
    std::env::set_var(TIMEOUT_VAR, "thirty");
    let err = ClientConfig::from_env().unwrap_err();
    clear_env();

    assert!(err.to_string().contains(TIMEOUT_VAR));
}
