use anyhow::{Context, Result};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::color::ColorParams;
use crate::search::{DEFAULT_DEPTH_LIMIT, DEFAULT_MAX_HINTS, SearchLimits};

pub const CONFIG_FILE_NAME: &str = "treehop.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TreehopConfig {
    #[serde(default)]
    pub hints: HintsConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HintsConfig {
    /// Candidate hint symbols grouped by keyboard row.
    pub rows: BTreeMap<String, String>,
    /// Row names in priority order; earlier rows yield the shorter labels.
    pub row_order: Vec<String>,
    pub max_hints: usize,
    pub depth_limit: usize,
}

impl Default for HintsConfig {
    fn default() -> Self {
        let rows = [
            ("home", "asdfghjkl;"),
            ("top", "qwertyuiop"),
            ("bottom", "zxcvbnm,./"),
        ]
        .into_iter()
        .map(|(name, symbols)| (name.to_string(), symbols.to_string()))
        .collect();
        Self {
            rows,
            row_order: vec!["home".into(), "top".into(), "bottom".into()],
            max_hints: DEFAULT_MAX_HINTS,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl HintsConfig {
    /// Rows in priority order, skipping names that have no row.
    pub fn ordered_rows(&self) -> Vec<&str> {
        self.row_order
            .iter()
            .filter_map(|name| match self.rows.get(name) {
                Some(row) => Some(row.as_str()),
                None => {
                    warn!("Ignoring unknown hint row '{}'", name);
                    None
                }
            })
            .collect()
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_hints: self.max_hints,
            depth_limit: self.depth_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KeysConfig {
    /// Enters hint mode; only read while hints are inactive.
    pub activate: char,
    pub ascend: char,
    pub suspend: char,
    pub scroll_down: char,
    pub scroll_up: char,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            activate: 'f',
            ascend: 'u',
            suspend: 'q',
            scroll_down: 'n',
            scroll_up: 'p',
        }
    }
}

impl KeysConfig {
    /// Keys bound to commands while hints are active.
    pub fn reserved(&self) -> HashSet<char> {
        [self.ascend, self.suspend, self.scroll_down, self.scroll_up]
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ColorsConfig {
    /// Background color the hint colors are derived from, as `#rrggbb`.
    pub background: String,
    pub seed: String,
    #[serde(flatten)]
    pub params: ColorParams,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_string(),
            seed: "treehop".to_string(),
            params: ColorParams::default(),
        }
    }
}

pub fn load() -> Result<TreehopConfig> {
    let current_dir = std::env::current_dir()?;
    let Some(path) = find_config_path(&current_dir) else {
        return Ok(TreehopConfig::default());
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<TreehopConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

pub fn find_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
