// `path,size,sha256` manifest lines for verifying flashed content

use fatt_core::InputEntry;
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    pub path: String,
    pub size: u64,
    pub sha256: String,
}

impl ManifestLine {
    pub fn for_content(path: impl Into<String>, content: &[u8]) -> Self {
        Self {
            path: path.into(),
            size: content.len() as u64,
            sha256: sha256_hex(content),
        }
    }
}

impl fmt::Display for ManifestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.path, self.size, self.sha256)
    }
}

pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// One line per entry, in entry order.
pub fn manifest_lines(entries: &[InputEntry]) -> Vec<ManifestLine> {
    entries
        .iter()
        .map(|e| ManifestLine::for_content(e.path.clone(), &e.content))
        .collect()
}

pub fn render_lines(lines: &[ManifestLine]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

pub fn render_manifest(entries: &[InputEntry]) -> String {
    render_lines(&manifest_lines(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_render_preserves_order() {
        let entries = vec![
            InputEntry::new("z.txt", b"abc".to_vec()),
            InputEntry::new("a/empty", Vec::new()),
        ];
        let text = render_manifest(&entries);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "z.txt,3,ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            lines[1],
            "a/empty,0,e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert!(text.ends_with('\n'));
    }
}
