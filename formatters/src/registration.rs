use fatt_core::{BuilderRegistry, ImageBuilder};
use std::sync::Arc;

use crate::fat16::Fat16ImageBuilder;
use crate::simple_storage::SimpleStorageBuilder;

/// Register all built-in image builders
pub fn register_builtin_builders(registry: &mut BuilderRegistry) {
    registry.register(
        "fat16".to_string(),
        Arc::new(Fat16ImageBuilder) as Arc<dyn ImageBuilder>,
    );
    registry.register(
        "simple".to_string(),
        Arc::new(SimpleStorageBuilder) as Arc<dyn ImageBuilder>,
    );
}

/// Human-readable listing of registered builders
pub fn list_available_builders(registry: &BuilderRegistry) -> String {
    registry
        .list_builders()
        .into_iter()
        .map(|(name, description)| format!("  {} - {}\n", name, description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_builders_registered() {
        let mut registry = BuilderRegistry::new();
        register_builtin_builders(&mut registry);

        assert!(registry.is_supported("fat16"));
        assert!(registry.is_supported("simple"));
        assert_eq!(registry.get_builder("FAT16").unwrap().name(), "FAT16");

        let listing = list_available_builders(&registry);
        assert!(listing.starts_with("  fat16 - "));
        assert!(listing.contains("  simple - "));
    }
}
