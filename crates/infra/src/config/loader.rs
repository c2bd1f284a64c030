//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `OMFLOW_ARCGIS_TOKEN_URL`: GIS token endpoint
//! - `OMFLOW_ARCGIS_USERNAME` / `OMFLOW_ARCGIS_PASSWORD`: GIS credentials
//! - `OMFLOW_ARCGIS_REFERER`: referer bound to issued tokens
//! - `OMFLOW_ARCGIS_ORDER_LAYER_URL`: work-order layer
//! - `OMFLOW_ARCGIS_ACTIVITY_LAYER_URL`: activity layer
//! - `OMFLOW_SAP_API_URL`: SAP confirmation endpoint
//! - `OMFLOW_SAP_USER` / `OMFLOW_SAP_PASSWORD`: SAP Basic credentials
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./omflow.json` or `./omflow.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)

use std::path::{Path, PathBuf};

use omflow_domain::{ArcGisConfig, Config, OmFlowError, Result, SapConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `OmFlowError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `OmFlowError::Config` if required variables are missing.
pub fn load_from_env() -> Result<Config> {
    Ok(Config {
        arcgis: ArcGisConfig {
            token_url: env_var("OMFLOW_ARCGIS_TOKEN_URL")?,
            username: env_var("OMFLOW_ARCGIS_USERNAME")?,
            password: env_var("OMFLOW_ARCGIS_PASSWORD")?,
            referer: env_var("OMFLOW_ARCGIS_REFERER")?,
            order_layer_url: env_var("OMFLOW_ARCGIS_ORDER_LAYER_URL")?,
            activity_layer_url: env_var("OMFLOW_ARCGIS_ACTIVITY_LAYER_URL")?,
        },
        sap: SapConfig {
            api_url: env_var("OMFLOW_SAP_API_URL")?,
            user: env_var("OMFLOW_SAP_USER")?,
            password: env_var("OMFLOW_SAP_PASSWORD")?,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `OmFlowError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OmFlowError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OmFlowError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| OmFlowError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| OmFlowError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| OmFlowError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(OmFlowError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("omflow.json"),
            cwd.join("omflow.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `OmFlowError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| OmFlowError::Config(format!("Missing required environment variable: {key}")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 9] = [
        "OMFLOW_ARCGIS_TOKEN_URL",
        "OMFLOW_ARCGIS_USERNAME",
        "OMFLOW_ARCGIS_PASSWORD",
        "OMFLOW_ARCGIS_REFERER",
        "OMFLOW_ARCGIS_ORDER_LAYER_URL",
        "OMFLOW_ARCGIS_ACTIVITY_LAYER_URL",
        "OMFLOW_SAP_API_URL",
        "OMFLOW_SAP_USER",
        "OMFLOW_SAP_PASSWORD",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    fn set_all_env() {
        std::env::set_var("OMFLOW_ARCGIS_TOKEN_URL", "https://gis/sharing/rest/generateToken");
        std::env::set_var("OMFLOW_ARCGIS_USERNAME", "gis-user");
        std::env::set_var("OMFLOW_ARCGIS_PASSWORD", "gis-pass");
        std::env::set_var("OMFLOW_ARCGIS_REFERER", "https://maps.example.com");
        std::env::set_var("OMFLOW_ARCGIS_ORDER_LAYER_URL", "https://gis/FeatureServer/0");
        std::env::set_var("OMFLOW_ARCGIS_ACTIVITY_LAYER_URL", "https://gis/FeatureServer/1");
        std::env::set_var("OMFLOW_SAP_API_URL", "https://sap/confirm");
        std::env::set_var("OMFLOW_SAP_USER", "sap-user");
        std::env::set_var("OMFLOW_SAP_PASSWORD", "sap-pass");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        set_all_env();

        let config = load_from_env().expect("config should load from env");
        assert_eq!(config.arcgis.username, "gis-user");
        assert_eq!(config.arcgis.order_layer_url, "https://gis/FeatureServer/0");
        assert_eq!(config.sap.api_url, "https://sap/confirm");

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        set_all_env();
        std::env::remove_var("OMFLOW_SAP_PASSWORD");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with missing env var");
        assert!(matches!(result.unwrap_err(), OmFlowError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "arcgis": {
                "token_url": "https://gis/sharing/rest/generateToken",
                "username": "gis-user",
                "password": "gis-pass",
                "referer": "https://maps.example.com",
                "order_layer_url": "https://gis/FeatureServer/0",
                "activity_layer_url": "https://gis/FeatureServer/1"
            },
            "sap": {
                "api_url": "https://sap/confirm",
                "user": "sap-user",
                "password": "sap-pass"
            }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("JSON config should load");
        assert_eq!(config.arcgis.referer, "https://maps.example.com");
        assert_eq!(config.sap.user, "sap-user");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[arcgis]
token_url = "https://gis/sharing/rest/generateToken"
username = "gis-user"
password = "gis-pass"
referer = "https://maps.example.com"
order_layer_url = "https://gis/FeatureServer/0"
activity_layer_url = "https://gis/FeatureServer/1"

[sap]
api_url = "https://sap/confirm"
user = "sap-user"
password = "sap-pass"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("TOML config should load");
        assert_eq!(config.arcgis.activity_layer_url, "https://gis/FeatureServer/1");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result.unwrap_err(), OmFlowError::Config(_)));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let invalid_json = r#"{ "this is": "not valid json" "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_json.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_err(), "Should fail with invalid JSON");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let path = PathBuf::from("test.yaml");
        let result = parse_config("some content", &path);
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
