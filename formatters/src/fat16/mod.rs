// FAT16 image synthesizer

pub mod allocator;
pub mod builder;
pub mod encoder;
pub mod geometry;

pub use allocator::{allocate, Allocation, DirectoryAssignment, FileAssignment};
pub use builder::{build_fat16_image, Fat16ImageBuilder};
pub use encoder::Fat16Encoder;
pub use geometry::ImageGeometry;
