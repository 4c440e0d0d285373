pub mod builder;
pub mod entry;
pub mod error;
pub mod format;
pub mod options;
pub mod registry;

pub use builder::{BuildReport, ImageBuilder};
pub use entry::InputEntry;
pub use error::{FattError, FattResult};
pub use format::BuildManager;
pub use options::{BuildOptions, ChainMode};
pub use registry::BuilderRegistry;
