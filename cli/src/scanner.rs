// Directory scanning: turns a source tree into forward-slash relative entries

use fatt_core::{FattError, InputEntry};
use log::debug;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Forward-slash path of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> Result<String, FattError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        FattError::InvalidInput(format!("{} is outside {}", path.display(), root.display()))
    })?;

    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| FattError::NameEncoding {
                path: rel.display().to_string(),
                reason: "path is not valid UTF-8".to_string(),
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}

/// Every regular file under `root` as `(relative path, full path)`, sorted by
/// relative path. Symlinks are not followed.
pub async fn walk_files(root: &Path) -> Result<Vec<(String, PathBuf)>, FattError> {
    let mut pending = vec![root.to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = pending.pop() {
        let mut read_dir = fs::read_dir(&dir).await?;
        while let Some(item) = read_dir.next_entry().await? {
            let file_type = item.file_type().await?;
            let path = item.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() {
                files.push((relative_path(root, &path)?, path));
            } else {
                debug!("Skipping {}", path.display());
            }
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Collect all files with forward-slash paths and their raw contents.
pub async fn collect_files(root: &Path) -> Result<Vec<InputEntry>, FattError> {
    let mut entries = Vec::new();
    for (rel_path, full_path) in walk_files(root).await? {
        let content = fs::read(&full_path).await?;
        debug!("Collected {} ({} bytes)", rel_path, content.len());
        entries.push(InputEntry::new(rel_path, content));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_collects_nested_files_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        std::fs::write(dir.path().join("z.txt"), b"zz").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std::fs::write(dir.path().join("sub/deeper/b.json"), b"{}").unwrap();

        let entries = collect_files(dir.path()).await.unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a.txt", "sub/deeper/b.json", "z.txt"]);
        assert_eq!(entries[1].content, b"{}");
    }

    #[tokio::test]
    async fn test_empty_tree() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("only_dirs")).unwrap();
        assert!(collect_files(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = collect_files(&dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, FattError::IoError(_)));
    }
}
