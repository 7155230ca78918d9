//! Runtime configuration loader.
//!
//! Reads `quillcast.toml` from the given directory and deserializes it into
//! [`RuntimeConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::Path;

use quillcast_types::config::RuntimeConfig;

/// Load runtime configuration from `{dir}/quillcast.toml`.
///
/// - If the file does not exist, returns [`RuntimeConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - Otherwise returns the parsed config (absent keys keep their serde
///   defaults).
pub async fn load_runtime_config(dir: &Path) -> RuntimeConfig {
    let config_path = dir.join("quillcast.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No quillcast.toml found at {}, using defaults",
                config_path.display()
            );
            return RuntimeConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return RuntimeConfig::default();
        }
    };

    match toml::from_str::<RuntimeConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RuntimeConfig::default()
        }
    }
}
