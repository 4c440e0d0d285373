// In-memory FAT16 allocation table

use super::constants::*;

pub struct Fat16Table {
    bytes: Vec<u8>,
}

impl Fat16Table {
    /// A table of `FAT_SIZE` bytes with the reserved prefix written:
    /// `0xFFFFFFF8` at offset 0 and `0xFFFF` at offset 4.
    pub fn new() -> Self {
        let mut bytes = vec![0u8; FAT_SIZE];
        bytes[0..4].copy_from_slice(&FAT_RESERVED_WORD.to_le_bytes());
        bytes[4..6].copy_from_slice(&FAT_RESERVED_TAIL.to_le_bytes());
        Self { bytes }
    }

    pub fn entry_count(&self) -> u32 {
        (self.bytes.len() / 2) as u32
    }

    pub fn write_entry(&mut self, cluster: u16, value: u16) {
        let offset = cluster as usize * 2;
        self.bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub fn read_entry(&self, cluster: u16) -> u16 {
        let offset = cluster as usize * 2;
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    pub fn mark_end_of_chain(&mut self, cluster: u16) {
        self.write_entry(cluster, FAT16_EOC);
    }

    /// Link `count` contiguous clusters starting at `first`, terminating the last one.
    pub fn link_run(&mut self, first: u16, count: u32) {
        if count == 0 {
            return;
        }
        let last = first + (count - 1) as u16;
        for cluster in first..last {
            self.write_entry(cluster, cluster + 1);
        }
        self.mark_end_of_chain(last);
    }

    /// Follow a chain from `start` until an end-of-chain or free entry.
    pub fn chain(&self, start: u16) -> Vec<u16> {
        let mut chain = Vec::new();
        let mut current = start;

        while current >= FIRST_DATA_CLUSTER
            && (current as u32) < self.entry_count()
            && chain.len() < self.entry_count() as usize
        {
            chain.push(current);
            let next = self.read_entry(current);
            if next == FAT16_FREE || next >= 0xFFF8 {
                break;
            }
            current = next;
        }

        chain
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Fat16Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_prefix() {
        let fat = Fat16Table::new();
        let bytes = fat.as_bytes();
        assert_eq!(bytes.len(), 4096);
        assert_eq!(&bytes[0..6], &[0xF8, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(bytes[6..].iter().all(|&b| b == 0));
        assert_eq!(fat.entry_count(), 2048);
    }

    #[test]
    fn test_link_run() {
        let mut fat = Fat16Table::new();
        fat.link_run(5, 3);
        assert_eq!(fat.read_entry(5), 6);
        assert_eq!(fat.read_entry(6), 7);
        assert_eq!(fat.read_entry(7), 0xFFFF);
        assert_eq!(fat.chain(5), vec![5, 6, 7]);
    }

    #[test]
    fn test_single_cluster_and_empty_runs() {
        let mut fat = Fat16Table::new();
        fat.link_run(9, 1);
        fat.link_run(10, 0);
        assert_eq!(fat.read_entry(9), 0xFFFF);
        assert_eq!(fat.read_entry(10), 0);
        assert_eq!(fat.chain(9), vec![9]);
    }
}
