// Renders boot sector, allocation tables, directory entries and file data
// into one zero-initialized buffer.

use fatt_core::{BuildOptions, ChainMode, FattError, InputEntry};
use log::{debug, info};
use std::collections::BTreeMap;

use super::allocator::{parent_of, Allocation, DirectoryAssignment};
use super::geometry::ImageGeometry;
use crate::fat_common::*;

/// Display form of a directory path in errors.
fn display_dir(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn component_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub struct Fat16Encoder<'a> {
    geometry: &'a ImageGeometry,
    allocation: &'a Allocation,
    options: &'a BuildOptions,
    stamp: DosTimestamp,
    image: Vec<u8>,
    /// Names already placed in each directory, for collision detection.
    names: BTreeMap<String, BTreeMap<[u8; 11], String>>,
}

impl<'a> Fat16Encoder<'a> {
    pub fn new(
        geometry: &'a ImageGeometry,
        allocation: &'a Allocation,
        options: &'a BuildOptions,
    ) -> Self {
        Self {
            geometry,
            allocation,
            options,
            stamp: DosTimestamp::resolve(options.timestamp.as_ref()),
            image: vec![0u8; geometry.image_size],
            names: BTreeMap::new(),
        }
    }

    pub fn encode(mut self, entries: &[InputEntry]) -> Result<Vec<u8>, FattError> {
        self.write_boot_sector();
        self.write_fat_tables();
        self.write_directories()?;
        self.write_files(entries)?;

        info!(
            "FAT16 image rendered: {} bytes, {} clusters in use",
            self.image.len(),
            self.allocation.clusters_used
        );
        Ok(self.image)
    }

    fn write_boot_sector(&mut self) {
        let params = FatBootSectorParams {
            oem_name: format_oem_name(&self.options.oem_name),
            total_sectors: self.geometry.total_sectors,
            volume_serial: self.options.volume_serial,
            volume_label: format_volume_label(self.options.label.as_deref()),
        };
        let boot_sector = build_fat16_boot_sector(&params);
        self.image[..SECTOR_SIZE].copy_from_slice(&boot_sector);
    }

    fn write_fat_tables(&mut self) {
        let mut fat = Fat16Table::new();

        if self.options.chain_mode == ChainMode::Linked {
            for (_, dir) in self.allocation.subdirectories() {
                fat.mark_end_of_chain(dir.cluster);
            }
            for file in &self.allocation.files {
                fat.link_run(file.first_cluster, file.cluster_count);
            }
        }

        for offset in self.geometry.fat_offsets() {
            self.image[offset..offset + FAT_SIZE].copy_from_slice(fat.as_bytes());
        }
    }

    /// Dot entries open every subdirectory cluster; each directory is then
    /// listed in its parent. Sorted order guarantees parents come first.
    fn write_directories(&mut self) -> Result<(), FattError> {
        let allocation = self.allocation;

        for (path, dir) in allocation.subdirectories() {
            let parent_path = parent_of(path);
            let parent = self.directory(parent_path)?;

            let dot = DirEntryRecord::directory(DOT_NAME, dir.cluster, self.stamp);
            let dotdot = DirEntryRecord::directory(DOTDOT_NAME, parent.cluster, self.stamp);
            self.place(path, dir, &dot, &format!("{}/.", path))?;
            self.place(path, dir, &dotdot, &format!("{}/..", path))?;

            let name = self.short_name(component_of(path), path, true)?;
            self.claim_name(parent_path, name, path)?;
            let record = DirEntryRecord::directory(name, dir.cluster, self.stamp);
            let slot = self.place(parent_path, &parent, &record, path)?;
            debug!("Directory entry: {} -> cluster {} (slot {})", path, dir.cluster, slot);
        }

        Ok(())
    }

    fn write_files(&mut self, entries: &[InputEntry]) -> Result<(), FattError> {
        let allocation = self.allocation;

        for (entry, file) in entries.iter().zip(&allocation.files) {
            let parent_path = entry.parent_path();
            let parent = self.directory(parent_path)?;

            let name = self.short_name(entry.file_name(), &entry.path, false)?;
            self.claim_name(parent_path, name, &entry.path)?;

            let record = DirEntryRecord::file(name, file.first_cluster, file.size, self.stamp);
            self.place(parent_path, &parent, &record, &entry.path)?;
            debug!("Entry: {} -> cluster {}", entry.path, file.first_cluster);

            if file.cluster_count > 0 {
                let offset = self.geometry.cluster_offset(file.first_cluster);
                self.image[offset..offset + entry.content.len()].copy_from_slice(&entry.content);
            }
        }

        Ok(())
    }

    fn directory(&self, path: &str) -> Result<DirectoryAssignment, FattError> {
        self.allocation
            .directory(path)
            .cloned()
            .ok_or_else(|| FattError::Other(format!("No cluster assigned to directory '{}'", path)))
    }

    fn short_name(&self, component: &str, path: &str, is_dir: bool) -> Result<[u8; 11], FattError> {
        format_83_name(component, is_dir).map_err(|reason| FattError::NameEncoding {
            path: path.to_string(),
            reason: reason.to_string(),
        })
    }

    fn claim_name(&mut self, directory: &str, name: [u8; 11], path: &str) -> Result<(), FattError> {
        let placed = self.names.entry(directory.to_string()).or_default();
        if let Some(first) = placed.get(&name) {
            return Err(FattError::NameCollision {
                directory: display_dir(directory),
                short_name: display_name_field(&name),
                first: first.clone(),
                second: path.to_string(),
            });
        }
        placed.insert(name, path.to_string());
        Ok(())
    }

    /// Write `record` into the first free slot of the directory, returning the slot index.
    fn place(
        &mut self,
        dir_path: &str,
        dir: &DirectoryAssignment,
        record: &DirEntryRecord,
        path: &str,
    ) -> Result<usize, FattError> {
        let slot = (0..dir.capacity)
            .find(|slot| is_free_slot(self.image[dir.offset + slot * DIR_ENTRY_SIZE]))
            .ok_or_else(|| FattError::DirectoryFull {
                directory: display_dir(dir_path),
                capacity: dir.capacity,
                path: path.to_string(),
            })?;

        let offset = dir.offset + slot * DIR_ENTRY_SIZE;
        self.image[offset..offset + DIR_ENTRY_SIZE].copy_from_slice(&record.to_bytes());
        Ok(slot)
    }
}
