// FAT16 image builder: Planner -> Allocator -> Encoder

use fatt_core::entry::total_content_size;
use fatt_core::{BuildOptions, BuildReport, FattError, ImageBuilder, InputEntry};
use log::{info, warn};

use super::allocator::allocate;
use super::encoder::Fat16Encoder;
use super::geometry::ImageGeometry;
use crate::fat_common::CLUSTER_SIZE;

/// Usage above this share of the data region is reported as a warning.
const USAGE_WARNING_PERCENT: u64 = 90;

pub struct Fat16ImageBuilder;

impl Fat16ImageBuilder {
    fn check_ascii(field: &str, value: &str) -> Result<(), FattError> {
        if !value.is_ascii() || value.bytes().any(|b| b.is_ascii_control()) {
            return Err(FattError::Configuration(format!(
                "{} '{}' must be printable ASCII",
                field, value
            )));
        }
        Ok(())
    }
}

impl ImageBuilder for Fat16ImageBuilder {
    fn name(&self) -> &'static str {
        "FAT16"
    }

    fn description(&self) -> &'static str {
        "FAT16 volume image with 4 KiB clusters and a 512-entry root directory"
    }

    fn validate_options(&self, options: &BuildOptions) -> Result<(), FattError> {
        if let Some(label) = &options.label {
            Self::check_ascii("Volume label", label)?;
            if label.len() > 11 {
                warn!("Volume label '{}' will be truncated to 11 characters", label);
            }
        }
        Self::check_ascii("OEM name", &options.oem_name)?;
        ImageGeometry::plan(options.image_size, options.chain_mode)?;
        Ok(())
    }

    fn dry_run(
        &self,
        entries: &[InputEntry],
        options: &BuildOptions,
    ) -> Result<BuildReport, FattError> {
        let geometry = ImageGeometry::plan(options.image_size, options.chain_mode)?;
        let allocation = allocate(entries, &geometry)?;

        let data_bytes = geometry.data_clusters as u64 * CLUSTER_SIZE as u64;
        let used_data = allocation.clusters_used as u64 * CLUSTER_SIZE as u64;

        let mut warnings = Vec::new();
        if data_bytes > 0 && used_data * 100 > data_bytes * USAGE_WARNING_PERCENT {
            warnings.push(format!(
                "Data region usage over {}% ({} of {} clusters)",
                USAGE_WARNING_PERCENT, allocation.clusters_used, geometry.data_clusters
            ));
        }

        Ok(BuildReport {
            format: "fat16".to_string(),
            image_size: options.image_size,
            file_count: allocation.files.len(),
            directory_count: allocation.directories.len() - 1,
            content_bytes: total_content_size(entries),
            used_bytes: geometry.data_offset as u64 + used_data,
            available_bytes: options.image_size,
            warnings,
        })
    }

    fn build(&self, entries: &[InputEntry], options: &BuildOptions) -> Result<Vec<u8>, FattError> {
        let geometry = ImageGeometry::plan(options.image_size, options.chain_mode)?;

        info!("Building FAT16 image:");
        info!("  Image size: {} bytes", geometry.image_size);
        info!("  Total sectors: {}", geometry.total_sectors);
        info!("  Root directory: {}", geometry.root_dir_offset);
        info!("  Data area: {}", geometry.data_offset);

        let allocation = allocate(entries, &geometry)?;
        Fat16Encoder::new(&geometry, &allocation, options).encode(entries)
    }
}

/// Build a FAT16 image from `entries` in one call.
pub fn build_fat16_image(entries: &[InputEntry], options: &BuildOptions) -> Result<Vec<u8>, FattError> {
    let builder = Fat16ImageBuilder;
    builder.validate_options(options)?;
    builder.build(entries, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_ascii_label() {
        let opts = BuildOptions {
            label: Some("MÜNCHEN".to_string()),
            ..BuildOptions::default()
        };
        assert!(matches!(
            Fat16ImageBuilder.validate_options(&opts),
            Err(FattError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_checks_size() {
        assert!(matches!(
            Fat16ImageBuilder.validate_options(&BuildOptions::with_size(1000)),
            Err(FattError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_dry_run_report() {
        let entries = vec![
            InputEntry::new("a.txt", vec![0; 10]),
            InputEntry::new("sub/b.json", vec![0; 5000]),
        ];
        let report = Fat16ImageBuilder
            .dry_run(&entries, &BuildOptions::with_size(65536))
            .unwrap();

        assert_eq!(report.file_count, 2);
        assert_eq!(report.directory_count, 1);
        assert_eq!(report.content_bytes, 5010);
        assert_eq!(report.used_bytes, 25088 + 4 * 4096);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_dry_run_warns_when_nearly_full() {
        let entries = vec![InputEntry::new("big.bin", vec![0; 9 * 4096])];
        let report = Fat16ImageBuilder
            .dry_run(&entries, &BuildOptions::with_size(65536))
            .unwrap();
        assert_eq!(report.warnings.len(), 1);
    }
}
