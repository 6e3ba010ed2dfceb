//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::CoreConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "CORE_";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    InvalidValue { key: String, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "IO error reading {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Load configuration from an optional TOML file, apply `CORE_*`
/// environment overrides and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<CoreConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => CoreConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to resolve variable names.
///
/// Keys follow the dotted config path upper-cased with `.` replaced by `_`
/// and prefixed with [`ENV_PREFIX`], e.g. `peer.address` → `CORE_PEER_ADDRESS`.
pub fn apply_env_overrides<F>(config: &mut CoreConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| lookup(&format!("{}{}", ENV_PREFIX, suffix));

    if let Some(address) = var("PEER_ADDRESS") {
        config.peer.address = address;
    }
    if let Some(msp_id) = var("PEER_LOCALMSPID") {
        config.peer.local_msp_id = msp_id;
    }
    if let Some(enabled) = var("PEER_TLS_ENABLED") {
        config.peer.tls.enabled = parse_bool("CORE_PEER_TLS_ENABLED", &enabled)?;
    }
    if let Some(root_cert) = var("PEER_TLS_ROOTCERT_FILE") {
        config.peer.tls.root_cert_file = Some(PathBuf::from(root_cert));
    }
    if let Some(server_name) = var("PEER_TLS_SERVERHOSTOVERRIDE") {
        config.peer.tls.server_host_override = server_name;
    }
    if let Some(level) = var("LOGGING_LEVEL") {
        config.logging.level = level;
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("CORE_PEER_ADDRESS", "peer1.org2.example.com:9051"),
            ("CORE_PEER_TLS_ENABLED", "true"),
            ("CORE_PEER_TLS_ROOTCERT_FILE", "/etc/peer/ca.pem"),
            ("CORE_PEER_TLS_SERVERHOSTOVERRIDE", "peer1.org2.example.com"),
            ("CORE_LOGGING_LEVEL", "debug"),
        ]);
        let mut config = CoreConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.peer.address, "peer1.org2.example.com:9051");
        assert!(config.peer.tls.enabled);
        assert_eq!(
            config.peer.tls.root_cert_file,
            Some(PathBuf::from("/etc/peer/ca.pem"))
        );
        assert_eq!(config.peer.tls.server_host_override, "peer1.org2.example.com");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_bool_override() {
        let vars = env(&[("CORE_PEER_TLS_ENABLED", "maybe")]);
        let mut config = CoreConfig::default();
        let err = apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("CORE_PEER_TLS_ENABLED"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[peer]\naddress = \"127.0.0.1:7051\"\nlocal_msp_id = \"Org1MSP\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.peer.local_msp_id, "Org1MSP");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/core.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/core.toml"));
    }
}
