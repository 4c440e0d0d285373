// Static layout of the FAT16 image, derived only from the requested size

use fatt_core::{ChainMode, FattError};
use log::debug;

use crate::fat_common::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGeometry {
    pub image_size: usize,
    pub total_sectors: u32,
    pub fat1_offset: usize,
    pub fat2_offset: usize,
    pub root_dir_offset: usize,
    pub data_offset: usize,
    /// Clusters the data region can hold, bounded by what the chain mode can address.
    pub data_clusters: u32,
}

impl ImageGeometry {
    /// Bytes taken by the boot sector, both FATs and the root directory.
    pub const OVERHEAD: usize = RESERVED_SECTORS * SECTOR_SIZE + NUM_FATS * FAT_SIZE + ROOT_DIR_SIZE;

    /// Linked chains must fit in the 8-sector FAT; unlinked runs are only
    /// bounded by the 16-bit cluster field of a directory entry.
    pub fn plan(image_size: u64, chain_mode: ChainMode) -> Result<Self, FattError> {
        let invalid = |reason: String| FattError::InvalidSize {
            size: image_size,
            reason,
        };

        if image_size == 0 || image_size % SECTOR_SIZE as u64 != 0 {
            return Err(invalid(format!(
                "must be a positive multiple of {} bytes",
                SECTOR_SIZE
            )));
        }
        let total_sectors = u32::try_from(image_size / SECTOR_SIZE as u64)
            .map_err(|_| invalid("sector count does not fit the 32-bit BPB field".to_string()))?;
        let size = usize::try_from(image_size)
            .map_err(|_| invalid("too large to hold in memory".to_string()))?;
        if size < Self::OVERHEAD {
            return Err(invalid(format!(
                "smaller than the {} bytes of boot sector, FATs and root directory",
                Self::OVERHEAD
            )));
        }

        let fat1_offset = RESERVED_SECTORS * SECTOR_SIZE;
        let fat2_offset = fat1_offset + FAT_SIZE;
        let root_dir_offset = fat2_offset + FAT_SIZE;
        let data_offset = root_dir_offset + ROOT_DIR_SIZE;

        let region_clusters = ((size - data_offset) / CLUSTER_SIZE) as u32;
        let highest_cluster = match chain_mode {
            ChainMode::Linked => MAX_FAT_CLUSTER,
            ChainMode::Unlinked => MAX_CLUSTER_FIELD,
        };
        let addressable = highest_cluster + 1 - FIRST_DATA_CLUSTER as u32;
        let data_clusters = region_clusters.min(addressable);

        debug!(
            "Planned geometry: {} sectors, FATs at {}/{}, root at {}, data at {}, {} clusters",
            total_sectors, fat1_offset, fat2_offset, root_dir_offset, data_offset, data_clusters
        );

        Ok(Self {
            image_size: size,
            total_sectors,
            fat1_offset,
            fat2_offset,
            root_dir_offset,
            data_offset,
            data_clusters,
        })
    }

    pub fn fat_offsets(&self) -> [usize; NUM_FATS] {
        [self.fat1_offset, self.fat2_offset]
    }

    /// Byte offset of the first byte of `cluster` in the image.
    pub fn cluster_offset(&self, cluster: u16) -> usize {
        debug_assert!(cluster >= FIRST_DATA_CLUSTER);
        self.data_offset + (cluster - FIRST_DATA_CLUSTER) as usize * CLUSTER_SIZE
    }

    /// Highest cluster number that may be assigned.
    pub fn last_cluster(&self) -> u32 {
        FIRST_DATA_CLUSTER as u32 + self.data_clusters - 1
    }
}
