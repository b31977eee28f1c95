use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::catalog::{SatelliteCatalog, SatelliteEntry};
use crate::orbital::OrbitalLongitude;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub station: StationConfig,
    pub satellites: Vec<SatelliteConfig>,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            name: "Station".to_string(),
            latitude: 30.0,
            longitude: 120.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SatelliteConfig {
    pub name: String,
    pub orbital_longitude: OrbitalLongitude,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub refresh_rate: u64, // milliseconds
    pub show_compass: bool,
}

/// Shortest TUI input poll interval (ms); 0 would busy-loop.
const MIN_REFRESH_RATE: u64 = 16;

impl DisplayConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_rate.max(MIN_REFRESH_RATE))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 250,
            show_compass: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the per-user config file if it exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Built-in satellites followed by the configured ones.
    pub fn catalog(&self) -> SatelliteCatalog {
        let mut catalog = SatelliteCatalog::builtin();
        for sat in &self.satellites {
            if sat.name.trim().is_empty() {
                warn!("Ignoring satellite {} with an empty name", sat.orbital_longitude);
                continue;
            }
            catalog.insert(SatelliteEntry::new(
                sat.name.clone(),
                sat.orbital_longitude.to_string(),
            ));
        }
        catalog
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dishaim").join("config.toml"))
}
