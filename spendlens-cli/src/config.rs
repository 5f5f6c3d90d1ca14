use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// How many of the largest spends to list
    pub top_n: usize,
    /// Glyph used when printing amounts
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing filter directive used when RUST_LOG is unset
    pub level: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_n: 3,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// `$SPENDLENS_CONFIG` if set, else `~/.spendlens/config.toml`
pub fn config_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os("SPENDLENS_CONFIG") {
        return Ok(PathBuf::from(p));
    }
    let home = std::env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendlens").join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

/// Write `cfg` to `p`, creating the parent directory
pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Pick the config a command runs with.
///
/// `config` subcommands must keep working when the file is broken (that is
/// how it gets inspected or rewritten), so for them a load failure falls back
/// to defaults with a warning. Every other command fails.
pub fn resolve_config(loaded: Result<Config>, lenient: bool) -> Result<Config> {
    match loaded {
        Ok(cfg) => Ok(cfg),
        Err(e) if lenient => {
            eprintln!("warning: {e:#}; using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e.context("fix or remove the config file (see `spendlens config show`)")),
    }
}
