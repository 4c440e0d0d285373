// Cluster assignment for implied directories and file contents

use fatt_core::{FattError, InputEntry};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

use super::geometry::ImageGeometry;
use crate::fat_common::{CLUSTER_SIZE, FIRST_DATA_CLUSTER, ROOT_ENTRIES, SUBDIR_ENTRIES};

/// Where a directory's entry slots live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryAssignment {
    /// 0 for the root, which lives in the fixed root region.
    pub cluster: u16,
    pub offset: usize,
    pub capacity: usize,
}

impl DirectoryAssignment {
    pub fn is_root(&self) -> bool {
        self.cluster == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAssignment {
    pub path: String,
    /// 0 for empty files, which own no clusters.
    pub first_cluster: u16,
    pub cluster_count: u32,
    pub size: u32,
}

#[derive(Debug, Clone)]
pub struct Allocation {
    /// Keyed by directory path, `""` for root. Sorted order is allocation order.
    pub directories: BTreeMap<String, DirectoryAssignment>,
    /// In caller-supplied order.
    pub files: Vec<FileAssignment>,
    pub clusters_used: u32,
}

impl Allocation {
    pub fn directory(&self, path: &str) -> Option<&DirectoryAssignment> {
        self.directories.get(path)
    }

    pub fn file(&self, path: &str) -> Option<&FileAssignment> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Non-root directories in allocation order.
    pub fn subdirectories(&self) -> impl Iterator<Item = (&str, &DirectoryAssignment)> {
        self.directories
            .iter()
            .filter(|(_, d)| !d.is_root())
            .map(|(p, d)| (p.as_str(), d))
    }
}

pub fn clusters_for(size: u64) -> u32 {
    size.div_ceil(CLUSTER_SIZE as u64) as u32
}

/// Parent directory of a slash-separated path, `""` for root.
pub fn parent_of(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Assign clusters: directories first in sorted path order, one cluster each,
/// then files in the order given. Fails with `OutOfSpace` before anything is
/// rendered if the data region cannot hold every assignment.
pub fn allocate(entries: &[InputEntry], geometry: &ImageGeometry) -> Result<Allocation, FattError> {
    // An empty component would imply a directory named "" and shadow the root
    if let Some(entry) = entries.iter().find(|e| e.path.split('/').any(str::is_empty)) {
        return Err(FattError::NameEncoding {
            path: entry.path.clone(),
            reason: "empty path component".to_string(),
        });
    }

    let implied: BTreeSet<&str> = entries.iter().flat_map(|e| e.ancestor_dirs()).collect();

    let mut directories = BTreeMap::new();
    directories.insert(
        String::new(),
        DirectoryAssignment {
            cluster: 0,
            offset: geometry.root_dir_offset,
            capacity: ROOT_ENTRIES,
        },
    );

    let last_cluster = geometry.last_cluster();
    let mut next_cluster = FIRST_DATA_CLUSTER as u32;

    let mut reserve = |path: &str, count: u32| -> Result<u16, FattError> {
        let first = next_cluster;
        let needed = first - FIRST_DATA_CLUSTER as u32 + count;
        if count > 0 && first + count - 1 > last_cluster {
            return Err(FattError::OutOfSpace {
                path: path.to_string(),
                needed_clusters: needed as u64,
                available_clusters: geometry.data_clusters as u64,
            });
        }
        next_cluster += count;
        Ok(first as u16)
    };

    for dir in implied {
        let cluster = reserve(dir, 1)?;
        let offset = geometry.cluster_offset(cluster);
        debug!("Directory: {} -> cluster {}", dir, cluster);
        directories.insert(
            dir.to_string(),
            DirectoryAssignment {
                cluster,
                offset,
                capacity: SUBDIR_ENTRIES,
            },
        );
    }

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let size = u32::try_from(entry.content.len()).map_err(|_| {
            FattError::InvalidInput(format!("'{}' exceeds the 4 GiB FAT file size limit", entry.path))
        })?;
        let cluster_count = clusters_for(size as u64);
        let first_cluster = if cluster_count == 0 {
            0
        } else {
            reserve(&entry.path, cluster_count)?
        };

        files.push(FileAssignment {
            path: entry.path.clone(),
            first_cluster,
            cluster_count,
            size,
        });
    }

    let clusters_used = next_cluster - FIRST_DATA_CLUSTER as u32;
    info!(
        "Allocated {} directories and {} files: {} of {} clusters used",
        directories.len() - 1,
        files.len(),
        clusters_used,
        geometry.data_clusters
    );

    Ok(Allocation {
        directories,
        files,
        clusters_used,
    })
}
