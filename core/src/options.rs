use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::FattError;

/// Partition size the firmware reserves for its storage volume.
pub const DEFAULT_IMAGE_SIZE: u64 = 917_504;
pub const DEFAULT_LABEL: &str = "FFAT";
pub const DEFAULT_VOLUME_SERIAL: u32 = 0x1234_5678;
pub const DEFAULT_OEM_NAME: &str = "MSDOS5.0";

/// How the allocation tables describe cluster runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainMode {
    /// Only the reserved entries are written; readers address clusters directly.
    #[default]
    Unlinked,
    /// Every run is written as a real chain terminated with an end-of-chain marker.
    Linked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub image_size: u64,
    pub label: Option<String>,
    pub volume_serial: u32,
    pub oem_name: String,
    /// Fixed clock for directory entry timestamps. `None` reads local time once per build.
    pub timestamp: Option<NaiveDateTime>,
    pub chain_mode: ChainMode,
    pub additional_options: BTreeMap<String, String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            label: Some(DEFAULT_LABEL.to_string()),
            volume_serial: DEFAULT_VOLUME_SERIAL,
            oem_name: DEFAULT_OEM_NAME.to_string(),
            timestamp: None,
            chain_mode: ChainMode::Unlinked,
            additional_options: BTreeMap::new(),
        }
    }
}

impl BuildOptions {
    pub fn with_size(image_size: u64) -> Self {
        Self {
            image_size,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, FattError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, FattError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FattError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = BuildOptions::default();
        assert_eq!(opts.image_size, 917_504);
        assert_eq!(opts.label.as_deref(), Some("FFAT"));
        assert_eq!(opts.volume_serial, 0x12345678);
        assert_eq!(opts.chain_mode, ChainMode::Unlinked);
        assert!(opts.timestamp.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts = BuildOptions::from_json(
            r#"{"image_size": 65536, "chain_mode": "linked", "timestamp": "2026-01-09T04:10:00"}"#,
        )
        .unwrap();
        assert_eq!(opts.image_size, 65536);
        assert_eq!(opts.chain_mode, ChainMode::Linked);
        assert_eq!(opts.oem_name, "MSDOS5.0");
        assert_eq!(
            opts.timestamp.unwrap().to_string(),
            "2026-01-09 04:10:00"
        );
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err = BuildOptions::from_json("{ image_size: }").unwrap_err();
        assert!(matches!(err, FattError::SerializationError(_)));
    }
}
