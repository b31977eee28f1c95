use tracing::debug;

use crate::orbital::{DescriptorError, OrbitalLongitude};

/// Satellites offered out of the box, in display order.
pub const BUILTIN_SATELLITES: &[(&str, &str)] = &[
    ("Apstar-5C（Telstar 18 Vantage）", "138.0E"),
    ("EutelSat-172B", "172.0E"),
    ("Apstar-6D", "134.5E"),
    ("Apstar-6C", "134.0E"),
    ("Apstar-9", "142.0E"),
    ("Apstar-7", "76.5E"),
    ("AsiaSat-9", "122.0E"),
    ("AsiaSat-7", "105.5E"),
    ("ChinaSat-16（圆极化）", "110.5E"),
    ("ChinaSat-26（圆极化）", "125.0E"),
];

#[derive(Debug, Clone)]
pub struct SatelliteEntry {
    pub name: String,
    pub descriptor: String,
}

impl SatelliteEntry {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn orbital_longitude(&self) -> Result<OrbitalLongitude, DescriptorError> {
        self.descriptor.parse()
    }
}

/// Read-only name -> orbital longitude table.
#[derive(Debug, Clone)]
pub struct SatelliteCatalog {
    entries: Vec<SatelliteEntry>,
}

impl Default for SatelliteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SatelliteCatalog {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_SATELLITES
                .iter()
                .map(|(name, descriptor)| SatelliteEntry::new(*name, *descriptor))
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry, replacing the descriptor of an existing entry with the same name.
    pub fn insert(&mut self, entry: SatelliteEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                debug!(
                    "Replacing {} ({} -> {})",
                    existing.name, existing.descriptor, entry.descriptor
                );
                existing.descriptor = entry.descriptor;
            }
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SatelliteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> &[SatelliteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
