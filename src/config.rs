//! TOML configuration for containers and logging.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use stockpile_container::SlotContainer;
use stockpile_core::{KindId, KindRegistry, ResourceStack};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/stockpile.toml";

/// Engine-wide defaults loaded from `config/stockpile.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StockpileConfig {
    /// Slot count for containers built by [`new_container`](Self::new_container).
    pub default_slot_count: usize,
    /// Ceiling used for kinds the registry does not know.
    pub default_max_quantity: u32,
    /// Uniform per-slot capacity override for new containers.
    pub slot_limit: Option<u32>,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// JSON kind registry, relative to the working directory.
    pub registry_path: Option<PathBuf>,
}

impl Default for StockpileConfig {
    fn default() -> Self {
        Self {
            default_slot_count: 1,
            default_max_quantity: 99,
            slot_limit: None,
            log_filter: "warn".to_string(),
            registry_path: None,
        }
    }
}

impl StockpileConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<StockpileConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    StockpileConfig::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!(
                        "Stockpile config not found at {}. Using defaults",
                        path.display()
                    );
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                StockpileConfig::default()
            }
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Empty container of the default size, with the configured slot limit.
    pub fn new_container(&self) -> SlotContainer {
        let container = SlotContainer::new(self.default_slot_count);
        match self.slot_limit {
            Some(limit) => container.with_slot_limit(move |_| Some(limit)),
            None => container,
        }
    }

    /// Load the configured kind registry, or an empty one when none is set.
    ///
    /// Unlike the config file itself, a configured registry that fails to
    /// load is an error.
    pub fn load_registry(&self) -> Result<KindRegistry> {
        let Some(path) = &self.registry_path else {
            return Ok(KindRegistry::new());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read kind registry {}", path.display()))?;
        KindRegistry::load_from_str(&contents)
            .with_context(|| format!("Failed to parse kind registry {}", path.display()))
    }

    /// Stack of `kind` using the registry ceiling, else the default ceiling.
    pub fn stack(&self, registry: &KindRegistry, kind: KindId, quantity: u32) -> ResourceStack {
        let max_quantity = registry
            .get(kind)
            .map_or(self.default_max_quantity, |def| def.max_quantity);
        ResourceStack::new(kind, quantity, max_quantity)
    }
}
