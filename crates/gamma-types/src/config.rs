// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{CM, DEFAULT_DECAY_INDEX_PATH, DEFAULT_RADIATION_PATH, KEV};
use crate::error::{SourceError, SourceResult};

/// Run-level source set-up. Lengths in mm, energies in MeV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Nuclide whose daughter-inclusive photon spectrum drives the energy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuclide: Option<String>,
    /// Photon lines below this energy are discarded [MeV].
    #[serde(default)]
    pub min_photon_energy: f64,
    /// Placement name of the emitting volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_volume: Option<String>,
    /// Placement name of the volume the emission cone aims at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_volume: Option<String>,
    /// Added to every side of the target bounding box [mm].
    #[serde(default)]
    pub target_margin: f64,
    /// Cap on rejection-sampling candidates per vertex. Absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_position_attempts: Option<u64>,
    #[serde(default)]
    pub data: DataPaths,
}

/// Locations of the two ICRP-07 tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPaths {
    #[serde(default = "default_decay_index")]
    pub decay_index: String,
    #[serde(default = "default_radiation")]
    pub radiation: String,
}

fn default_decay_index() -> String {
    DEFAULT_DECAY_INDEX_PATH.to_string()
}
fn default_radiation() -> String {
    DEFAULT_RADIATION_PATH.to_string()
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            decay_index: default_decay_index(),
            radiation: default_radiation(),
        }
    }
}

impl Default for SourceConfig {
    /// Cs-137 in `Source`, aimed at `Detector` with a 5 cm margin, 10 keV cut.
    fn default() -> Self {
        SourceConfig {
            nuclide: Some("Cs-137".to_string()),
            min_photon_energy: 10.0 * KEV,
            source_volume: Some("Source".to_string()),
            target_volume: Some("Detector".to_string()),
            target_margin: 5.0 * CM,
            max_position_attempts: None,
            data: DataPaths::default(),
        }
    }
}

impl SourceConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> SourceResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SourceResult<()> {
        if !self.min_photon_energy.is_finite() || self.min_photon_energy < 0.0 {
            return Err(SourceError::ConfigError(format!(
                "min_photon_energy must be finite and >= 0, got {}",
                self.min_photon_energy
            )));
        }
        if !self.target_margin.is_finite() {
            return Err(SourceError::ConfigError(
                "target_margin must be finite".to_string(),
            ));
        }
        if self.max_position_attempts == Some(0) {
            return Err(SourceError::ConfigError(
                "max_position_attempts must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gamma-types-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_matches_reference_setup() {
        let cfg = SourceConfig::default();
        assert_eq!(cfg.nuclide.as_deref(), Some("Cs-137"));
        assert_eq!(cfg.source_volume.as_deref(), Some("Source"));
        assert_eq!(cfg.target_volume.as_deref(), Some("Detector"));
        assert_relative_eq!(cfg.min_photon_energy, 0.01);
        assert_relative_eq!(cfg.target_margin, 50.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let path = scratch_file(
            "partial.json",
            r#"{ "nuclide": "Co-60", "min_photon_energy": 0.05 }"#,
        );
        let cfg = SourceConfig::from_file(&path.to_string_lossy()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.nuclide.as_deref(), Some("Co-60"));
        assert!(cfg.source_volume.is_none());
        assert!(cfg.target_volume.is_none());
        assert_eq!(cfg.data, DataPaths::default());
        assert_eq!(cfg.max_position_attempts, None);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SourceConfig::from_file("/nonexistent/gamma-source.json").unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_negative_cut_rejected() {
        let path = scratch_file("negative.json", r#"{ "min_photon_energy": -1.0 }"#);
        let err = SourceConfig::from_file(&path.to_string_lossy()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, SourceError::ConfigError(_)));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = SourceConfig::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: SourceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.nuclide, cfg2.nuclide);
        assert_eq!(cfg.target_volume, cfg2.target_volume);
        assert_eq!(cfg.data, cfg2.data);
    }
}
