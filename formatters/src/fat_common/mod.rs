// Byte-layout building blocks shared by the FAT16 image synthesizer

pub mod boot_sector;
pub mod constants;
pub mod directory;
pub mod fat_table;
pub mod timestamps;

pub use boot_sector::*;
pub use constants::*;
pub use directory::*;
pub use fat_table::*;
pub use timestamps::*;

/// Convert a string to FAT volume label format (11 bytes, space-padded)
pub fn format_volume_label(label: Option<&str>) -> [u8; 11] {
    let mut result = [0x20u8; 11];

    match label {
        Some(label) => {
            let label = label.to_ascii_uppercase();
            let bytes = label.as_bytes();
            let len = bytes.len().min(11);
            result[..len].copy_from_slice(&bytes[..len]);
        }
        None => result.copy_from_slice(b"NO NAME    "),
    }

    result
}

/// OEM name field: 8 bytes, space-padded, case preserved
pub fn format_oem_name(oem: &str) -> [u8; 8] {
    let mut result = [0x20u8; 8];
    let bytes = oem.as_bytes();
    let len = bytes.len().min(8);
    result[..len].copy_from_slice(&bytes[..len]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_label() {
        assert_eq!(&format_volume_label(Some("ffat")), b"FFAT       ");
        assert_eq!(&format_volume_label(Some("a_very_long_label")), b"A_VERY_LONG");
        assert_eq!(&format_volume_label(None), b"NO NAME    ");
    }

    #[test]
    fn test_oem_name() {
        assert_eq!(&format_oem_name("MSDOS5.0"), b"MSDOS5.0");
        assert_eq!(&format_oem_name("FATT"), b"FATT    ");
    }
}
