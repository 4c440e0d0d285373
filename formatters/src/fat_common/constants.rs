// FAT16 image constants. The geometry is fixed for the firmware's storage volume.

use static_assertions::const_assert_eq;

// Boot sector offsets
pub const BS_JMP_BOOT: usize = 0x00;
pub const BS_OEM_NAME: usize = 0x03;
pub const BPB_BYTES_PER_SEC: usize = 0x0B;
pub const BPB_SEC_PER_CLUS: usize = 0x0D;
pub const BPB_RSVD_SEC_CNT: usize = 0x0E;
pub const BPB_NUM_FATS: usize = 0x10;
pub const BPB_ROOT_ENT_CNT: usize = 0x11;
pub const BPB_TOT_SEC16: usize = 0x13;
pub const BPB_MEDIA: usize = 0x15;
pub const BPB_FAT_SZ16: usize = 0x16;
pub const BPB_TOT_SEC32: usize = 0x20;

// FAT16 extended boot record
pub const BS16_DRV_NUM: usize = 0x24;
pub const BS16_BOOT_SIG: usize = 0x26;
pub const BS16_VOL_ID: usize = 0x27;
pub const BS16_VOL_LAB: usize = 0x2B;
pub const BS16_FIL_SYS_TYPE: usize = 0x36;

pub const BOOT_SIGNATURE: [u8; 2] = [0x55, 0xAA];
pub const BOOT_SIGNATURE_OFFSET: usize = 0x1FE;
pub const JUMP_BOOT: [u8; 3] = [0xEB, 0x3C, 0x90];
pub const FS_TYPE_FAT16: &[u8; 8] = b"FAT16   ";
pub const DRIVE_NUMBER_FIXED: u8 = 0x80;
pub const EXTENDED_BOOT_SIGNATURE: u8 = 0x29;
pub const MEDIA_FIXED: u8 = 0xF8;

// Geometry
pub const SECTOR_SIZE: usize = 512;
pub const SECTORS_PER_CLUSTER: usize = 8;
pub const CLUSTER_SIZE: usize = SECTOR_SIZE * SECTORS_PER_CLUSTER;
pub const RESERVED_SECTORS: usize = 1;
pub const NUM_FATS: usize = 2;
pub const SECTORS_PER_FAT: usize = 8;
pub const FAT_SIZE: usize = SECTORS_PER_FAT * SECTOR_SIZE;
pub const ROOT_ENTRIES: usize = 512;
pub const DIR_ENTRY_SIZE: usize = 32;
pub const ROOT_DIR_SIZE: usize = ROOT_ENTRIES * DIR_ENTRY_SIZE;
pub const SUBDIR_ENTRIES: usize = CLUSTER_SIZE / DIR_ENTRY_SIZE;

// Clusters 0 and 1 are reserved by the format
pub const FIRST_DATA_CLUSTER: u16 = 2;
/// Highest cluster an 8-sector FAT16 table can describe.
pub const MAX_FAT_CLUSTER: u32 = (FAT_SIZE / 2) as u32 - 1;
/// Highest cluster number a directory entry may reference; larger values are reserved.
pub const MAX_CLUSTER_FIELD: u32 = 0xFFEF;

// FAT entry values
pub const FAT16_FREE: u16 = 0x0000;
pub const FAT16_EOC: u16 = 0xFFFF;
/// Reserved prefix of every table: FAT[0..2] as a 32-bit word, then FAT[2].
pub const FAT_RESERVED_WORD: u32 = 0xFFFF_FFF8;
pub const FAT_RESERVED_TAIL: u16 = 0xFFFF;

// Directory slot markers
pub const SLOT_FREE: u8 = 0x00;
pub const SLOT_DELETED: u8 = 0xE5;

const_assert_eq!(ROOT_DIR_SIZE % SECTOR_SIZE, 0);
const_assert_eq!(CLUSTER_SIZE % DIR_ENTRY_SIZE, 0);
const_assert_eq!(SUBDIR_ENTRIES, 128);
