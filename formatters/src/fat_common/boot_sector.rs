// Boot sector builder for the FAT16 image

use super::constants::*;

/// Fields of the boot sector that vary between builds
#[derive(Debug, Clone)]
pub struct FatBootSectorParams {
    pub oem_name: [u8; 8],
    pub total_sectors: u32,
    pub volume_serial: u32,
    pub volume_label: [u8; 11],
}

/// Build a FAT16 boot sector
///
/// Geometry fields come from the fixed image layout. The 16-bit total
/// sectors field is left zero and the 32-bit field always carries the count.
pub fn build_fat16_boot_sector(params: &FatBootSectorParams) -> [u8; SECTOR_SIZE] {
    let mut boot_sector = [0u8; SECTOR_SIZE];

    boot_sector[BS_JMP_BOOT..BS_JMP_BOOT + 3].copy_from_slice(&JUMP_BOOT);
    boot_sector[BS_OEM_NAME..BS_OEM_NAME + 8].copy_from_slice(&params.oem_name);

    // BPB
    boot_sector[BPB_BYTES_PER_SEC..BPB_BYTES_PER_SEC + 2]
        .copy_from_slice(&(SECTOR_SIZE as u16).to_le_bytes());
    boot_sector[BPB_SEC_PER_CLUS] = SECTORS_PER_CLUSTER as u8;
    boot_sector[BPB_RSVD_SEC_CNT..BPB_RSVD_SEC_CNT + 2]
        .copy_from_slice(&(RESERVED_SECTORS as u16).to_le_bytes());
    boot_sector[BPB_NUM_FATS] = NUM_FATS as u8;
    boot_sector[BPB_ROOT_ENT_CNT..BPB_ROOT_ENT_CNT + 2]
        .copy_from_slice(&(ROOT_ENTRIES as u16).to_le_bytes());
    boot_sector[BPB_TOT_SEC16..BPB_TOT_SEC16 + 2].copy_from_slice(&0u16.to_le_bytes());
    boot_sector[BPB_MEDIA] = MEDIA_FIXED;
    boot_sector[BPB_FAT_SZ16..BPB_FAT_SZ16 + 2]
        .copy_from_slice(&(SECTORS_PER_FAT as u16).to_le_bytes());
    boot_sector[BPB_TOT_SEC32..BPB_TOT_SEC32 + 4]
        .copy_from_slice(&params.total_sectors.to_le_bytes());

    // Extended boot record
    boot_sector[BS16_DRV_NUM] = DRIVE_NUMBER_FIXED;
    boot_sector[BS16_BOOT_SIG] = EXTENDED_BOOT_SIGNATURE;
    boot_sector[BS16_VOL_ID..BS16_VOL_ID + 4].copy_from_slice(&params.volume_serial.to_le_bytes());
    boot_sector[BS16_VOL_LAB..BS16_VOL_LAB + 11].copy_from_slice(&params.volume_label);
    boot_sector[BS16_FIL_SYS_TYPE..BS16_FIL_SYS_TYPE + 8].copy_from_slice(FS_TYPE_FAT16);

    boot_sector[BOOT_SIGNATURE_OFFSET..BOOT_SIGNATURE_OFFSET + 2].copy_from_slice(&BOOT_SIGNATURE);

    boot_sector
}
