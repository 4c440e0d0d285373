// Length-prefixed storage image: no filesystem structures, just indexed files.
//
// [u32 file count]
// per file: [u16 path length][path UTF-8][u32 content length][content][pad to 512]

use byteorder::{LittleEndian, WriteBytesExt};
use fatt_core::entry::total_content_size;
use fatt_core::{BuildOptions, BuildReport, FattError, ImageBuilder, InputEntry};
use log::{debug, info};
use std::io::Write;

pub const STORAGE_ALIGNMENT: usize = 512;
const COUNT_FIELD: usize = 4;
const PATH_LEN_FIELD: usize = 2;
const CONTENT_LEN_FIELD: usize = 4;

/// Bytes a record occupies before alignment padding.
fn record_size(entry: &InputEntry) -> usize {
    PATH_LEN_FIELD + entry.path.len() + CONTENT_LEN_FIELD + entry.content.len()
}

fn padding_for(offset: usize) -> usize {
    (STORAGE_ALIGNMENT - offset % STORAGE_ALIGNMENT) % STORAGE_ALIGNMENT
}

/// Walk the records without writing, returning the aligned end offset.
fn plan(entries: &[InputEntry], image_size: usize) -> Result<usize, FattError> {
    if entries.len() > u32::MAX as usize {
        return Err(FattError::InvalidInput("too many files for a 32-bit count".into()));
    }
    if image_size < COUNT_FIELD {
        return Err(FattError::InvalidSize {
            size: image_size as u64,
            reason: format!("must hold at least the {}-byte file count", COUNT_FIELD),
        });
    }

    let mut offset = COUNT_FIELD;
    for entry in entries {
        if entry.path.len() > u16::MAX as usize {
            return Err(FattError::NameEncoding {
                path: entry.path.clone(),
                reason: format!("path longer than {} bytes", u16::MAX),
            });
        }
        if entry.content.len() > u32::MAX as usize {
            return Err(FattError::InvalidInput(format!(
                "'{}' exceeds the 32-bit length field",
                entry.path
            )));
        }

        let needed = record_size(entry);
        if offset + needed > image_size {
            return Err(FattError::StorageFull {
                path: entry.path.clone(),
                needed: needed as u64,
                available: image_size.saturating_sub(offset) as u64,
            });
        }
        offset += needed;
        offset += padding_for(offset);
    }

    Ok(offset)
}

pub struct SimpleStorageBuilder;

impl ImageBuilder for SimpleStorageBuilder {
    fn name(&self) -> &'static str {
        "Simple Storage"
    }

    fn description(&self) -> &'static str {
        "Length-prefixed file records aligned to 512 bytes, no filesystem"
    }

    fn validate_options(&self, options: &BuildOptions) -> Result<(), FattError> {
        usize::try_from(options.image_size).map_err(|_| FattError::InvalidSize {
            size: options.image_size,
            reason: "too large to hold in memory".to_string(),
        })?;
        Ok(())
    }

    fn dry_run(
        &self,
        entries: &[InputEntry],
        options: &BuildOptions,
    ) -> Result<BuildReport, FattError> {
        let end = plan(entries, options.image_size as usize)?;
        Ok(BuildReport {
            format: "simple".to_string(),
            image_size: options.image_size,
            file_count: entries.len(),
            directory_count: 0,
            content_bytes: total_content_size(entries),
            used_bytes: end.min(options.image_size as usize) as u64,
            available_bytes: options.image_size,
            warnings: Vec::new(),
        })
    }

    fn build(&self, entries: &[InputEntry], options: &BuildOptions) -> Result<Vec<u8>, FattError> {
        let image_size = options.image_size as usize;
        plan(entries, image_size)?;

        info!("Building simple storage format...");
        info!("  Max size: {} bytes ({:.1} KB)", image_size, image_size as f64 / 1024.0);
        info!("  Files: {}", entries.len());

        let mut image = Vec::with_capacity(image_size);
        image.write_u32::<LittleEndian>(entries.len() as u32)?;

        for entry in entries {
            let record_start = image.len();
            image.write_u16::<LittleEndian>(entry.path.len() as u16)?;
            image.write_all(entry.path.as_bytes())?;
            image.write_u32::<LittleEndian>(entry.content.len() as u32)?;
            image.write_all(&entry.content)?;

            let padding = padding_for(image.len());
            image.resize(image.len() + padding, 0);
            debug!(
                "  Wrote: {} ({} bytes) @ offset {}",
                entry.path,
                entry.content.len(),
                record_start
            );
        }

        let used = image.len();
        // Alignment padding after the last record may run past the end
        image.resize(image_size, 0);

        info!(
            "Used: {} bytes ({:.1}%)",
            used,
            used as f64 * 100.0 / image_size as f64
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{ByteOrder, LittleEndian};

    fn build(entries: &[InputEntry], size: u64) -> Result<Vec<u8>, FattError> {
        SimpleStorageBuilder.build(entries, &BuildOptions::with_size(size))
    }

    #[test]
    fn test_layout() {
        let entries = vec![
            InputEntry::new("a.txt", b"hello".to_vec()),
            InputEntry::new("sub/b.json", b"{}".to_vec()),
        ];
        let image = build(&entries, 4096).unwrap();
        assert_eq!(image.len(), 4096);

        assert_eq!(LittleEndian::read_u32(&image[0..4]), 2);
        assert_eq!(LittleEndian::read_u16(&image[4..6]), 5);
        assert_eq!(&image[6..11], b"a.txt");
        assert_eq!(LittleEndian::read_u32(&image[11..15]), 5);
        assert_eq!(&image[15..20], b"hello");
        assert!(image[20..512].iter().all(|&b| b == 0));

        // Second record starts at the next 512-byte boundary
        assert_eq!(LittleEndian::read_u16(&image[512..514]), 10);
        assert_eq!(&image[514..524], b"sub/b.json");
        assert_eq!(LittleEndian::read_u32(&image[524..528]), 2);
        assert_eq!(&image[528..530], b"{}");
    }

    #[test]
    fn test_out_of_space_names_file() {
        let entries = vec![
            InputEntry::new("first.bin", vec![1; 400]),
            InputEntry::new("second.bin", vec![2; 600]),
        ];
        let err = build(&entries, 1024).unwrap_err();
        match err {
            FattError::StorageFull { path, needed, available } => {
                assert_eq!(path, "second.bin");
                assert_eq!(needed, 2 + 10 + 4 + 600);
                assert_eq!(available, 512);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_last_record_padding_may_exceed_image() {
        // 4 + 2 + 1 + 4 + 1 = 12 bytes used, padding would end at 512
        let entries = vec![InputEntry::new("x", vec![9])];
        let image = build(&entries, 12).unwrap();
        assert_eq!(image.len(), 12);
        assert_eq!(image[11], 9);
    }

    #[test]
    fn test_dry_run_counts_aligned_bytes() {
        let entries = vec![InputEntry::new("a", vec![0; 100])];
        let report = SimpleStorageBuilder
            .dry_run(&entries, &BuildOptions::with_size(4096))
            .unwrap();
        assert_eq!(report.used_bytes, 512);
        assert_eq!(report.file_count, 1);
    }

    #[test]
    fn test_empty_input() {
        let image = build(&[], 512).unwrap();
        assert_eq!(LittleEndian::read_u32(&image[0..4]), 0);
    }
}
