// 8.3 short names and the 32-byte directory entry record

use byteorder::{ByteOrder, LittleEndian};

use super::constants::{DIR_ENTRY_SIZE, SLOT_DELETED, SLOT_FREE};
use super::timestamps::DosTimestamp;

pub mod attributes {
    pub const ATTR_DIRECTORY: u8 = 0x10;
    pub const ATTR_ARCHIVE: u8 = 0x20;
}

pub const DOT_NAME: [u8; 11] = *b".          ";
pub const DOTDOT_NAME: [u8; 11] = *b"..         ";

// Record field offsets
const DIR_NAME: usize = 0x00;
const DIR_ATTR: usize = 0x0B;
const DIR_CRT_TIME: usize = 0x0E;
const DIR_CRT_DATE: usize = 0x10;
const DIR_WRT_TIME: usize = 0x16;
const DIR_WRT_DATE: usize = 0x18;
const DIR_FST_CLUS: usize = 0x1A;
const DIR_FILE_SIZE: usize = 0x1C;

/// Encode one path component into the 11-byte name field.
///
/// Files split on the last `.`: the base is padded/truncated to 8 bytes and the
/// extension to 3. A file without a `.` and every directory fill all 11 bytes.
/// Letters are uppercased, padding is spaces. The error is the reason the
/// component cannot be represented.
pub fn format_83_name(component: &str, is_dir: bool) -> Result<[u8; 11], &'static str> {
    if component.is_empty() {
        return Err("empty path component");
    }
    if component == "." || component == ".." {
        return Err("relative path component");
    }
    if !component.is_ascii() {
        return Err("non-ASCII characters");
    }
    if component.bytes().any(|b| b.is_ascii_control()) {
        return Err("control characters");
    }
    if component.starts_with(' ') {
        return Err("leading space");
    }
    // A leading '.' would read back as a dot entry
    if component.starts_with('.') {
        return Err("leading dot");
    }

    let upper = component.to_ascii_uppercase();
    let mut result = [b' '; 11];

    match upper.rsplit_once('.') {
        Some((base, ext)) if !is_dir => {
            copy_padded(&mut result[..8], base.as_bytes());
            copy_padded(&mut result[8..], ext.as_bytes());
        }
        _ => copy_padded(&mut result, upper.as_bytes()),
    }

    Ok(result)
}

fn copy_padded(field: &mut [u8], value: &[u8]) {
    let len = value.len().min(field.len());
    field[..len].copy_from_slice(&value[..len]);
}

/// Render an 11-byte name field back to `BASE.EXT` form
pub fn parse_83_name(name: &[u8; 11]) -> String {
    let base = String::from_utf8_lossy(&name[..8]).trim_end().to_string();
    let ext = String::from_utf8_lossy(&name[8..]).trim_end().to_string();

    if ext.is_empty() {
        base
    } else {
        format!("{}.{}", base, ext)
    }
}

/// Readable form of a name field for diagnostics, e.g. `"README  TXT"`.
pub fn display_name_field(name: &[u8; 11]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// A slot whose first byte is 0x00 (never used) or 0xE5 (deleted).
pub fn is_free_slot(first_byte: u8) -> bool {
    first_byte == SLOT_FREE || first_byte == SLOT_DELETED
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntryRecord {
    pub name: [u8; 11],
    pub attributes: u8,
    pub stamp: DosTimestamp,
    pub first_cluster: u16,
    pub file_size: u32,
}

impl DirEntryRecord {
    pub fn file(name: [u8; 11], first_cluster: u16, file_size: u32, stamp: DosTimestamp) -> Self {
        Self {
            name,
            attributes: attributes::ATTR_ARCHIVE,
            stamp,
            first_cluster,
            file_size,
        }
    }

    pub fn directory(name: [u8; 11], cluster: u16, stamp: DosTimestamp) -> Self {
        Self {
            name,
            attributes: attributes::ATTR_DIRECTORY,
            stamp,
            first_cluster: cluster,
            file_size: 0,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.attributes & attributes::ATTR_DIRECTORY != 0
    }

    pub fn to_bytes(&self) -> [u8; DIR_ENTRY_SIZE] {
        let mut entry = [0u8; DIR_ENTRY_SIZE];

        entry[DIR_NAME..DIR_NAME + 11].copy_from_slice(&self.name);
        entry[DIR_ATTR] = self.attributes;

        LittleEndian::write_u16(&mut entry[DIR_CRT_TIME..], self.stamp.time);
        LittleEndian::write_u16(&mut entry[DIR_CRT_DATE..], self.stamp.date);
        LittleEndian::write_u16(&mut entry[DIR_WRT_TIME..], self.stamp.time);
        LittleEndian::write_u16(&mut entry[DIR_WRT_DATE..], self.stamp.date);

        LittleEndian::write_u16(&mut entry[DIR_FST_CLUS..], self.first_cluster);
        LittleEndian::write_u32(&mut entry[DIR_FILE_SIZE..], self.file_size);

        entry
    }

    /// Decode a record. Creation and write stamps are identical in records we emit;
    /// the write stamp is the one returned.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < DIR_ENTRY_SIZE || is_free_slot(bytes[0]) {
            return None;
        }

        let mut name = [0u8; 11];
        name.copy_from_slice(&bytes[DIR_NAME..DIR_NAME + 11]);

        Some(Self {
            name,
            attributes: bytes[DIR_ATTR],
            stamp: DosTimestamp {
                time: LittleEndian::read_u16(&bytes[DIR_WRT_TIME..]),
                date: LittleEndian::read_u16(&bytes[DIR_WRT_DATE..]),
            },
            first_cluster: LittleEndian::read_u16(&bytes[DIR_FST_CLUS..]),
            file_size: LittleEndian::read_u32(&bytes[DIR_FILE_SIZE..]),
        })
    }
}
