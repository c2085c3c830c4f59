use super::*;

#[test]
fn from_values_defaults_when_absent() {
    let config = ClientConfig::from_values(None, None, None).unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn from_values_treats_blank_as_absent() {
    let config = ClientConfig::from_values(Some("  "), Some(""), Some(" ")).unwrap();
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    assert_eq!(config.auth_header, DEFAULT_AUTH_HEADER);
}

#[test]
fn from_values_strips_trailing_slashes() {
    let config = ClientConfig::from_values(Some("http://localhost:8080//"), None, None).unwrap();
    assert_eq!(config.api_base_url, "http://localhost:8080");
}

#[test]
fn from_values_keeps_custom_key_and_header() {
    let config = ClientConfig::from_values(None, Some(" session "), Some("X-Auth-Token")).unwrap();
    assert_eq!(config.storage_key, "session");
    assert_eq!(config.auth_header, "X-Auth-Token");
}

#[test]
fn from_values_rejects_relative_base_url() {
    let err = ClientConfig::from_values(Some("/api"), None, None).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBaseUrl("/api".to_owned()));
}

#[test]
fn from_values_rejects_non_http_scheme() {
    assert!(ClientConfig::from_values(Some("ftp://example.com"), None, None).is_err());
}
