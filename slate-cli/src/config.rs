use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use slate_core::Preferences;

pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".slate").join("config.toml"))
}

/// Load planner preferences, falling back to the compiled defaults when the
/// file does not exist. `path` overrides the default location.
pub fn load_preferences(path: Option<PathBuf>) -> Result<Preferences> {
    let p = match path {
        Some(p) => p,
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Preferences::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse preferences toml")?)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(&Preferences::default()).context("serialize preferences")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}
