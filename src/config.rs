use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional `textdex.toml` settings. CLI flags win over the file; the file
/// wins over built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TextdexConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub memory: Option<bool>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("textdex.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("textdex.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TextdexConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TextdexConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TextdexConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
