use thiserror::Error;

#[derive(Debug, Error)]
pub enum FattError {
    #[error("Invalid image size {size}: {reason}")]
    InvalidSize { size: u64, reason: String },

    #[error("Out of space at '{path}': needs {needed_clusters} cluster(s), only {available_clusters} available")]
    OutOfSpace {
        path: String,
        needed_clusters: u64,
        available_clusters: u64,
    },

    #[error("Out of space at '{path}': needs {needed} bytes, only {available} available")]
    StorageFull {
        path: String,
        needed: u64,
        available: u64,
    },

    #[error("Directory '{directory}' is full ({capacity} entries) while adding '{path}'")]
    DirectoryFull {
        directory: String,
        capacity: usize,
        path: String,
    },

    #[error("Name collision in '{directory}': '{first}' and '{second}' both encode to '{short_name}'")]
    NameCollision {
        directory: String,
        short_name: String,
        first: String,
        second: String,
    },

    #[error("Cannot encode '{path}' as an 8.3 name: {reason}")]
    NameEncoding { path: String, reason: String },

    #[error("Unknown image format: {0}")]
    UnknownFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type FattResult<T> = Result<T, FattError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_space_names_entry() {
        let err = FattError::OutOfSpace {
            path: "sub/b.json".to_string(),
            needed_clusters: 2,
            available_clusters: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("sub/b.json"));
        assert!(msg.contains("2 cluster"));
    }

    #[test]
    fn test_directory_full_names_directory() {
        let err = FattError::DirectoryFull {
            directory: "/".to_string(),
            capacity: 512,
            path: "file512.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Directory '/' is full (512 entries) while adding 'file512.txt'"
        );
    }
}
