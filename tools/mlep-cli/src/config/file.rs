use super::CliConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Environment variable that points the CLI at an alternate config file
pub const CONFIG_PATH_ENV: &str = "MLEP_CONFIG_PATH";

/// Get the configuration directory path
pub fn get_config_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    Ok(home_dir.join(".mlep"))
}

/// Get the configuration file path, honouring `MLEP_CONFIG_PATH`
pub fn get_config_file_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Ok(get_config_dir()?.join("config.yml"))
}

/// Load configuration from a specific file
pub async fn load_config_from_path(config_path: &Path) -> Result<CliConfig> {
    if !config_path.exists() {
        return Err(anyhow::anyhow!("Configuration file does not exist"));
    }

    let content = fs::read_to_string(config_path).await.with_context(|| {
        format!("Failed to read config file: {:?}", config_path)
    })?;

    let config: CliConfig = serde_yaml::from_str(&content)
        .with_context(|| "Failed to parse configuration file")?;

    Ok(config)
}

/// Save configuration to a specific file
pub async fn save_config_to_path(
    config: &CliConfig,
    config_path: &Path,
) -> Result<()> {
    if let Some(config_dir) = config_path.parent() {
        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await.with_context(|| {
                format!("Failed to create config directory: {:?}", config_dir)
            })?;
        }
    }

    let content = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration")?;

    fs::write(config_path, content).await.with_context(|| {
        format!("Failed to write config file: {:?}", config_path)
    })?;

    Ok(())
}
