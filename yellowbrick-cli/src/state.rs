use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use yellowbrick_core::JsonFileStore;

/// `$YELLOWBRICK_HOME` if set, else `$HOME/.yellowbrick`.
pub fn yellowbrick_home() -> Result<PathBuf> {
    resolve_home(
        std::env::var("YELLOWBRICK_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_home(override_dir: Option<String>, home: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match home.filter(|h| !h.trim().is_empty()) {
        Some(h) => Ok(PathBuf::from(h).join(".yellowbrick")),
        None => bail!("HOME is not set (or set YELLOWBRICK_HOME)"),
    }
}

pub fn ensure_home() -> Result<PathBuf> {
    let dir = yellowbrick_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn store_path() -> Result<PathBuf> {
    Ok(ensure_home()?.join("state.json"))
}

pub fn open_store() -> Result<JsonFileStore> {
    let p = store_path()?;
    JsonFileStore::open(&p).with_context(|| format!("open state store {}", p.display()))
}
