use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_client_env() {
    unsafe {
        std::env::remove_var("ALLERPREDICT_API_URL");
        std::env::remove_var("ALLERPREDICT_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("ALLERPREDICT_CONNECT_TIMEOUT_SECS");
    }
}

fn default_timeouts() -> Timeouts {
    Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
}

#[test]
fn from_env_uses_defaults_and_overrides() {
    unsafe { clear_client_env() };

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "http://localhost:8000");
    assert_eq!(cfg.timeouts, default_timeouts());

    unsafe {
        std::env::set_var("ALLERPREDICT_API_URL", "https://api.example.test/v1/");
        std::env::set_var("ALLERPREDICT_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("ALLERPREDICT_CONNECT_TIMEOUT_SECS", "not-a-number");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://api.example.test/v1");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });

    unsafe { clear_client_env() };
}

#[test]
fn new_rejects_non_http_scheme() {
    let err = ClientConfig::new("ftp://files.example.test", default_timeouts()).unwrap_err();
    assert!(err.to_string().contains("scheme must be http or https"));
}

#[test]
fn new_rejects_garbage_url() {
    let err = ClientConfig::new("not a url", default_timeouts()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
}

#[test]
fn new_rejects_zero_timeout() {
    let err = ClientConfig::new("http://localhost:8000", Timeouts { request_secs: 0, connect_secs: 5 }).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroTimeout));
}

#[test]
fn overrides_replace_url_and_request_timeout() {
    let cfg = ClientConfig::new("http://localhost:8000", default_timeouts())
        .unwrap()
        .with_overrides(Some("http://10.0.0.2:9000/".into()), Some(5))
        .unwrap();
    assert_eq!(cfg.base_url, "http://10.0.0.2:9000");
    assert_eq!(cfg.timeouts.request_secs, 5);
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn overrides_absent_keep_config() {
    let cfg = ClientConfig::new("http://localhost:8000", default_timeouts()).unwrap();
    assert_eq!(cfg.clone().with_overrides(None, None).unwrap(), cfg);
}

#[test]
fn timeouts_convert_to_durations() {
    let t = Timeouts { request_secs: 3, connect_secs: 1 };
    assert_eq!(t.request(), Duration::from_secs(3));
    assert_eq!(t.connect(), Duration::from_secs(1));
}
