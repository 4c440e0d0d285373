// JSON minification of a content tree before it is packed

use fatt_core::FattError;
use fatt_formatters::ManifestLine;
use log::{info, warn};
use std::path::Path;
use tokio::fs;

use crate::scanner::walk_files;

#[derive(Debug)]
pub struct MinifySummary {
    pub lines: Vec<ManifestLine>,
    pub total_bytes: u64,
}

/// Minify `text`, preserving key order.
pub fn minify_json(rel_path: &str, text: &[u8]) -> Result<String, FattError> {
    let value: serde_json::Value = serde_json::from_slice(text).map_err(|e| {
        FattError::InvalidInput(format!(
            "JSON error in {}: line {}, column {}: {}",
            rel_path,
            e.line(),
            e.column(),
            e
        ))
    })?;
    Ok(serde_json::to_string(&value)?)
}

/// Minify every `*.json` under `src` into the mirrored path under `dst`.
///
/// Fails if the minified total exceeds `limit` bytes; warns above 90%.
pub async fn minify_tree(
    src: &Path,
    dst: &Path,
    dry_run: bool,
    limit: u64,
) -> Result<MinifySummary, FattError> {
    let mut lines = Vec::new();
    let mut total_bytes = 0u64;

    for (rel_path, full_path) in walk_files(src).await? {
        if !rel_path.ends_with(".json") {
            continue;
        }
        info!("Processing: {}", rel_path);

        let text = fs::read(&full_path).await?;
        let minified = minify_json(&rel_path, &text)?;

        if !dry_run {
            let out_path = dst.join(&rel_path);
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&out_path, minified.as_bytes()).await?;
        }

        let line = ManifestLine::for_content(rel_path, minified.as_bytes());
        info!("Minimized: {} ({} bytes)", line.path, line.size);
        total_bytes += line.size;
        lines.push(line);
    }

    if total_bytes > limit {
        return Err(FattError::StorageFull {
            path: src.display().to_string(),
            needed: total_bytes,
            available: limit,
        });
    }
    if total_bytes * 10 > limit * 9 {
        warn!("Minified content uses over 90% of {} bytes", limit);
    }

    Ok(MinifySummary { lines, total_bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minify_preserves_key_order() {
        let out = minify_json("a.json", b"{\n  \"b\": 1,\n  \"a\": [1, 2]\n}\n").unwrap();
        assert_eq!(out, r#"{"b":1,"a":[1,2]}"#);
    }

    #[test]
    fn test_parse_error_names_file_and_position() {
        let err = minify_json("themes/bad.json", b"{\n  \"a\": ,\n}").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("themes/bad.json"));
        assert!(msg.contains("line 2"));
    }

    #[tokio::test]
    async fn test_minify_tree_mirrors_paths() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        std::fs::create_dir_all(src.path().join("scenes")).unwrap();
        std::fs::write(src.path().join("scenes/intro.json"), b"{ \"x\" : 1 }").unwrap();
        std::fs::write(src.path().join("notes.txt"), b"not json").unwrap();

        let summary = minify_tree(src.path(), dst.path(), false, 1024).await.unwrap();

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].path, "scenes/intro.json");
        assert_eq!(summary.total_bytes, 7);
        let written = std::fs::read_to_string(dst.path().join("scenes/intro.json")).unwrap();
        assert_eq!(written, r#"{"x":1}"#);
        assert!(!dst.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        std::fs::write(src.path().join("a.json"), b"[1, 2, 3]").unwrap();

        let summary = minify_tree(src.path(), dst.path(), true, 1024).await.unwrap();
        assert_eq!(summary.total_bytes, 7);
        assert!(!dst.path().join("a.json").exists());
    }

    #[tokio::test]
    async fn test_limit_exceeded() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        std::fs::write(src.path().join("a.json"), b"[1, 2, 3]").unwrap();

        let err = minify_tree(src.path(), dst.path(), true, 4).await.unwrap_err();
        assert!(matches!(err, FattError::StorageFull { needed: 7, available: 4, .. }));
    }
}
