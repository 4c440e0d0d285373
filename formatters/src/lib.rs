pub mod fat16;
pub mod fat_common;
pub mod manifest;
pub mod registration;
pub mod simple_storage;

pub use fat16::{build_fat16_image, Fat16ImageBuilder, ImageGeometry};
pub use manifest::{render_manifest, ManifestLine};
pub use simple_storage::SimpleStorageBuilder;

pub use registration::{list_available_builders, register_builtin_builders};
