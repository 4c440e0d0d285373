use crate::{BuildOptions, FattResult, InputEntry};
use serde::{Deserialize, Serialize};

/// What a build would produce, computed without rendering the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub format: String,
    pub image_size: u64,
    pub file_count: usize,
    pub directory_count: usize,
    pub content_bytes: u64,
    /// Bytes of the image consumed by metadata and content (cluster-granular for FAT16).
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub warnings: Vec<String>,
}

impl BuildReport {
    pub fn usage_percent(&self) -> f64 {
        if self.available_bytes == 0 {
            return 100.0;
        }
        self.used_bytes as f64 * 100.0 / self.available_bytes as f64
    }
}

pub trait ImageBuilder: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    fn validate_options(&self, options: &BuildOptions) -> FattResult<()>;

    fn dry_run(
        &self,
        entries: &[InputEntry],
        options: &BuildOptions,
    ) -> FattResult<BuildReport>;

    fn build(&self, entries: &[InputEntry], options: &BuildOptions) -> FattResult<Vec<u8>>;
}
