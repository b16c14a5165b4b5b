use std::collections::HashSet;

use crate::domain::{
    entities::{Manifest, ModuleDescriptor},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_descriptor(descriptor: &ModuleDescriptor) -> Result<(), DomainError> {
        descriptor.validate()
    }

    pub fn validate_manifest(manifest: &Manifest) -> Result<(), DomainError> {
        manifest.validate()
    }

    /// Reject a batch of descriptors that reuses a module name.
    pub fn validate_unique_modules<'a>(
        descriptors: impl IntoIterator<Item = &'a ModuleDescriptor>,
    ) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for descriptor in descriptors {
            if !seen.insert(descriptor.name()) {
                return Err(DomainError::DuplicateModule {
                    name: descriptor.name().to_string(),
                });
            }
        }
        Ok(())
    }
}
