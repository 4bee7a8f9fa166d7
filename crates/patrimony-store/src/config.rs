use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use patrimony_config::{CONFIG_FILE_NAME, PatrimonyConfig};

fn parse_config(content: &str) -> Result<PatrimonyConfig> {
    let config: PatrimonyConfig =
        serde_json::from_str(content).context("parse patrimony.json")?;
    config
        .admin()
        .check()
        .context("invalid admin registration in patrimony.json")?;
    Ok(config)
}

/// Load patrimony.json config from current directory.
pub fn load_config() -> Result<PatrimonyConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if !path.exists() {
        anyhow::bail!("patrimony.json not found. Run 'patrimony init' first.");
    }

    let content = fs::read_to_string(&path).context("read patrimony.json")?;
    parse_config(&content)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<PatrimonyConfig> {
    if !path.exists() {
        anyhow::bail!("patrimony.json not found at: {}", path.display());
    }

    let content = fs::read_to_string(&path).context("read patrimony.json")?;
    parse_config(&content)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<PatrimonyConfig> {
    let config_path = if let Some(root) = project_root {
        root.join(CONFIG_FILE_NAME)
    } else {
        PathBuf::from(CONFIG_FILE_NAME)
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        Ok(PatrimonyConfig::default())
    }
}
