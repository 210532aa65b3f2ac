use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, env-mutating tests are serialized.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, env-mutating tests are serialized.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_essay_env() {
    // SAFETY: Test code only, env-mutating tests are serialized.
    unsafe {
        env::remove_var("ESSAY_PORT");
        env::remove_var("ESSAY_BIND_ADDR");
        env::remove_var("ESSAY_LANGUAGETOOL_URL");
        env::remove_var("ESSAY_GRAMMAR_TIMEOUT_SECS");
        env::remove_var("ESSAY_MODEL_PATH");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 5000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.languagetool_url, "https://api.languagetool.org");
    assert_eq!(config.grammar_timeout, Duration::from_secs(30));
    assert!(config.model_path.is_none());
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:5000");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
fn test_socket_addr_ipv6_is_bracketed() {
    let config = Config {
        bind_addr: IpAddr::V6(std::net::Ipv6Addr::LOCALHOST),
        ..Default::default()
    };
    let addr: std::net::SocketAddr = config.socket_addr().parse().expect("should parse");
    assert_eq!(addr.port(), 5000);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_essay_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 5000);
    assert_eq!(config.languagetool_url, DEFAULT_LANGUAGETOOL_URL);
    assert!(config.model_path.is_none());
}

#[test]
fn test_health_check_url_follows_bind_addr() {
    assert_eq!(
        Config::default().health_check_url(),
        "http://127.0.0.1:5000/healthz"
    );

    let config = Config {
        bind_addr: "10.1.2.3".parse().unwrap(),
        port: 8080,
        ..Default::default()
    };
    assert_eq!(config.health_check_url(), "http://10.1.2.3:8080/healthz");

    let config = Config {
        bind_addr: IpAddr::V6(std::net::Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 7)),
        ..Default::default()
    };
    assert_eq!(config.health_check_url(), "http://[fd00::7]:5000/healthz");
}

#[test]
fn test_probe_addr_maps_wildcard_to_loopback() {
    let config = Config {
        bind_addr: "0.0.0.0".parse().unwrap(),
        ..Default::default()
    };
    assert_eq!(config.probe_addr().to_string(), "127.0.0.1:5000");

    let config = Config {
        bind_addr: "::".parse().unwrap(),
        ..Default::default()
    };
    assert_eq!(config.probe_addr().to_string(), "[::1]:5000");
}

#[test]
#[serial]
fn test_health_check_url_from_env() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_BIND_ADDR", "192.168.4.20"), ("ESSAY_PORT", "7000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.health_check_url(), "http://192.168.4.20:7000/healthz");
    });
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_from_env_languagetool_url_strips_trailing_slash() {
    clear_essay_env();

    with_env_vars(
        &[("ESSAY_LANGUAGETOOL_URL", "http://localhost:8081/ ")],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.languagetool_url, "http://localhost:8081");
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_languagetool_url_uses_default() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_LANGUAGETOOL_URL", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.languagetool_url, DEFAULT_LANGUAGETOOL_URL);
    });
}

#[test]
#[serial]
fn test_from_env_custom_timeout() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_GRAMMAR_TIMEOUT_SECS", "5")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.grammar_timeout, Duration::from_secs(5));
    });
}

#[test]
#[serial]
fn test_from_env_zero_timeout_rejected() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_GRAMMAR_TIMEOUT_SECS", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_model_path() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_MODEL_PATH", "/models/all-MiniLM-L6-v2")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.model_path,
            Some(PathBuf::from("/models/all-MiniLM-L6-v2"))
        );
    });
}

#[test]
#[serial]
fn test_from_env_empty_model_path_is_none() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_MODEL_PATH", "  ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.model_path.is_none());
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_essay_env();

    with_env_vars(&[("ESSAY_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
fn test_validate_success_with_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_non_http_url() {
    let config = Config {
        languagetool_url: "ftp://languagetool.example".to_string(),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
}

#[test]
fn test_validate_nonexistent_model_path() {
    let config = Config {
        model_path: Some(PathBuf::from("/nonexistent/path/to/encoder")),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_validate_model_path_is_file() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let config = Config {
        model_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotADirectory { .. }));
}

#[test]
fn test_validate_model_path_directory_ok() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = Config {
        model_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}
