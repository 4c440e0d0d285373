use crate::ImageBuilder;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct BuilderRegistry {
    builders: BTreeMap<String, Arc<dyn ImageBuilder>>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// Names are stored lowercase; lookups are case-insensitive.
    pub fn register(&mut self, name: String, builder: Arc<dyn ImageBuilder>) {
        let name = name.to_lowercase();
        debug!("Registering image builder '{}' ({})", name, builder.name());
        self.builders.insert(name, builder);
    }

    pub fn get_builder(&self, name: &str) -> Option<Arc<dyn ImageBuilder>> {
        self.builders.get(&name.to_lowercase()).cloned()
    }

    pub fn list_builders(&self) -> Vec<(String, &'static str)> {
        self.builders
            .iter()
            .map(|(name, b)| (name.clone(), b.description()))
            .collect()
    }

    pub fn is_supported(&self, format: &str) -> bool {
        self.builders.contains_key(&format.to_lowercase())
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildOptions, BuildReport, FattResult, InputEntry};

    struct NullBuilder;

    impl ImageBuilder for NullBuilder {
        fn name(&self) -> &'static str {
            "Null"
        }

        fn description(&self) -> &'static str {
            "Writes nothing"
        }

        fn validate_options(&self, _options: &BuildOptions) -> FattResult<()> {
            Ok(())
        }

        fn dry_run(&self, _entries: &[InputEntry], options: &BuildOptions) -> FattResult<BuildReport> {
            Ok(BuildReport {
                format: "null".to_string(),
                image_size: options.image_size,
                file_count: 0,
                directory_count: 0,
                content_bytes: 0,
                used_bytes: 0,
                available_bytes: options.image_size,
                warnings: Vec::new(),
            })
        }

        fn build(&self, _entries: &[InputEntry], _options: &BuildOptions) -> FattResult<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_mixed_case_registration() {
        let mut registry = BuilderRegistry::new();
        registry.register("Null".to_string(), Arc::new(NullBuilder));

        assert!(registry.is_supported("null"));
        assert!(registry.is_supported("NULL"));
        assert_eq!(registry.get_builder("null").unwrap().name(), "Null");
        assert_eq!(registry.list_builders(), vec![("null".to_string(), "Writes nothing")]);
    }
}
