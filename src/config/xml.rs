//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - Every field is optional; missing fields keep their defaults.
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use crate::config::types::{Config, LogLevel};
use crate::fs_ops::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RESEED_AFTER};
use crate::platform::{set_dir_mode_0700, write_file_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "max_attempts", default, deserialize_with = "de_u32_trimmed_opt")]
    max_attempts: Option<u32>,
    #[serde(rename = "reseed_after", default, deserialize_with = "de_u32_trimmed_opt")]
    reseed_after: Option<u32>,
}

// Numbers may be written with surrounding whitespace/newlines.
fn de_u32_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<u32>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid number '{s}': {e}"))),
    }
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        let s = s.trim();
        if !s.is_empty() {
            cfg.log_level = s
                .parse::<LogLevel>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("log_level")?;
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    if let Some(n) = parsed.max_attempts {
        cfg.max_attempts = n;
    }
    if let Some(n) = parsed.reseed_after {
        cfg.reseed_after = n;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let cfg = xml_to_config(parsed)
        .with_context(|| format!("invalid value in config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// Load the config from `$FDB_SYMLINK_CONFIG` or the platform default path.
/// Returns Ok(None) if no config file exists there.
pub fn load_config_from_xml() -> Result<Option<Config>> {
    let path = default_config_path().context("resolve config path")?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    load_config_from_xml_path(&path).map(Some)
}

/// Create a template config file and its parent directory (best-effort 0700).
/// Refuses to write through a symlinked ancestor or over an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir '{}'", parent.display()))?;
            let _ = set_dir_mode_0700(parent);
        }
    }

    let content = format!(
        "<!--\n  fdb_symlink configuration (XML)\n\n  Fields (all optional):\n    log_level     -> quiet | normal | info | debug\n    log_file      -> path to log file (stdout/stderr still used)\n    max_attempts  -> candidate temp names tried before giving up (>= 1)\n    reseed_after  -> name collisions tolerated before the suffix generator is reseeded\n\n  CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <max_attempts>{}</max_attempts>\n  <reseed_after>{}</reseed_after>\n</config>\n",
        DEFAULT_MAX_ATTEMPTS, DEFAULT_RESEED_AFTER
    );

    write_file_secure_new_0600(path, content.as_bytes())
        .with_context(|| format!("write template config '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}
