use crate::error::{PlanitError, Result};
use crate::types::config::ScoringConfig;
use std::path::{Path, PathBuf};
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "planit.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".planit/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/planit/config.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ScoringConfig,
    /// Files merged over the built-in defaults, in merge order.
    pub sources: Vec<PathBuf>,
}

/// Loads the scoring config for a dataset directory.
///
/// Layers, later ones winning key by key: built-in defaults, the global file
/// under `$HOME`, `planit.toml` in the dataset directory (or `explicit` when
/// given), then `.planit/local.toml`.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(dir, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    dir: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(PlanitError::ConfigNotFound(path.display().to_string()));
        }
    }

    let mut merged = Value::try_from(ScoringConfig::default())
        .map_err(|e| PlanitError::ConfigParse(e.to_string()))?;
    let mut sources = Vec::new();

    let dataset_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.join(DEFAULT_CONFIG_FILE));
    let layers = global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([dataset_path, dir.join(DEFAULT_LOCAL_FILE)]);
    for path in layers {
        if merge_file_if_exists(&mut merged, &path)? {
            tracing::debug!(path = %path.display(), "merged config layer");
            sources.push(path);
        }
    }

    let config: ScoringConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| PlanitError::ConfigParse(e.to_string()))?;
    config.validate()?;
    Ok(LoadedConfig { config, sources })
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| PlanitError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

pub fn render_config(config: &ScoringConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
