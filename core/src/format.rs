use crate::{BuildOptions, BuildReport, BuilderRegistry, FattError, FattResult, InputEntry};
use std::sync::Arc;

pub struct BuildManager {
    registry: Arc<BuilderRegistry>,
}

impl BuildManager {
    pub fn new(registry: Arc<BuilderRegistry>) -> Self {
        Self { registry }
    }

    pub fn simulate_build(
        &self,
        format: &str,
        entries: &[InputEntry],
        options: &BuildOptions,
    ) -> FattResult<BuildReport> {
        let builder = self
            .registry
            .get_builder(format)
            .ok_or_else(|| FattError::UnknownFormat(format.to_string()))?;

        builder.validate_options(options)?;
        builder.dry_run(entries, options)
    }

    pub fn execute_build(
        &self,
        format: &str,
        entries: &[InputEntry],
        options: &BuildOptions,
    ) -> FattResult<Vec<u8>> {
        let builder = self
            .registry
            .get_builder(format)
            .ok_or_else(|| FattError::UnknownFormat(format.to_string()))?;

        builder.validate_options(options)?;
        builder.build(entries, options)
    }
}
