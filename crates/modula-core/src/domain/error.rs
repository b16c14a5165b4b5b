// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may collect them across modules)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("Unknown {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid dependency reference '{reference}': {reason}")]
    InvalidDependency { reference: String, reason: String },

    #[error("Module '{module}' requests a testing target without an interface target")]
    TestingRequiresInterface { module: String },

    #[error("Product '{product}' cannot be used as a module product")]
    InvalidModuleProduct { product: String },

    #[error("Configuration list override for '{module}' is empty")]
    EmptyConfigurations { module: String },

    #[error("Duplicate configuration name: {name}")]
    DuplicateConfiguration { name: String },

    #[error("Module '{name}' is declared more than once")]
    DuplicateModule { name: String },

    #[error("Module '{module}' cannot depend on '{reference}': {reason}")]
    UnresolvedDependency {
        module: String,
        reference: String,
        reason: String,
    },

    #[error("Module '{module}' has a dependency cycle: {cycle}")]
    DependencyCycle { module: String, cycle: String },

    // ========================================================================
    // Manifest Invariants (assembler bugs if ever raised)
    // ========================================================================
    #[error("Duplicate target name in manifest: {name}")]
    DuplicateTarget { name: String },

    #[error("Target '{target}' depends on '{reference}', which is not in the manifest")]
    DanglingReference { target: String, reference: String },

    #[error("Scheme '{scheme}' references missing target '{reference}'")]
    DanglingSchemeReference { scheme: String, reference: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidModuleName { name, reason } => vec![
                format!("Module name '{}' is invalid: {}", name, reason),
                "Start with a letter and use only ASCII letters and digits".into(),
                "Examples: Login, Payments, FeatureFlags2".into(),
            ],
            Self::InvalidValue { field, value } => vec![
                format!("'{}' is not a known {}", value, field),
                match *field {
                    "product" => "  • app, framework, static-framework, static-library, dynamic-library, bundle".into(),
                    "kind" => "  • interface, testing, unit-tests, ui-tests, demo".into(),
                    "destination" => "  • iphone, ipad, mac, mac-catalyst, vision".into(),
                    "variant" => "  • debug, release".into(),
                    _ => "  • Check documentation for accepted values".into(),
                },
            ],
            Self::InvalidDependency { .. } => vec![
                "Dependency references use the form '<kind>:<value>'".into(),
                "  • target:Name".into(),
                "  • project:Name@relative/path".into(),
                "  • external:PackageProduct".into(),
                "  • sdk:Library.framework".into(),
            ],
            Self::TestingRequiresInterface { module } => vec![
                format!("Testing doubles for '{}' need an interface to implement", module),
                "Add 'interface' to the requested kinds".into(),
                "Or drop 'testing' from the requested kinds".into(),
            ],
            Self::EmptyConfigurations { .. } => vec![
                "Remove the configuration override to use dev/stage/prod".into(),
                "Or declare at least one [[configurations]] entry".into(),
            ],
            Self::UnresolvedDependency { module, .. } => vec![
                format!("'target:' references must name another target of '{}'", module),
                "Request the kind that produces the target".into(),
                "Use 'project:Name@path' for targets of other modules".into(),
            ],
            Self::DependencyCycle { cycle, .. } => vec![
                format!("The chain {} leads back to where it started", cycle),
                "Remove the 'target:' reference that closes the loop".into(),
                "Test and demo targets already depend on the main target".into(),
            ],
            Self::DuplicateModule { name } => vec![
                format!("Two descriptors declare the module '{}'", name),
                "Rename one of the modules or remove the duplicate descriptor".into(),
            ],
            Self::DuplicateTarget { .. }
            | Self::DanglingReference { .. }
            | Self::DanglingSchemeReference { .. }
            | Self::InvalidManifest(_) => vec![
                "The assembled manifest violates an internal invariant".into(),
                "This is a bug, please report it with the module descriptor".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidModuleName { .. }
            | Self::InvalidValue { .. }
            | Self::InvalidDependency { .. }
            | Self::TestingRequiresInterface { .. }
            | Self::InvalidModuleProduct { .. }
            | Self::EmptyConfigurations { .. }
            | Self::DuplicateConfiguration { .. }
            | Self::DuplicateModule { .. }
            | Self::UnresolvedDependency { .. }
            | Self::DependencyCycle { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::DuplicateTarget { .. }
            | Self::DanglingReference { .. }
            | Self::DanglingSchemeReference { .. }
            | Self::InvalidManifest(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testing_without_interface_is_a_validation_error() {
        let err = DomainError::TestingRequiresInterface {
            module: "Login".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("interface")));
    }

    #[test]
    fn invariant_violations_are_internal() {
        let err = DomainError::DanglingReference {
            target: "LoginTests".into(),
            reference: "LoginDemo".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn invalid_value_lists_accepted_kinds() {
        let err = DomainError::InvalidValue {
            field: "kind",
            value: "snapshot".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("unit-tests")));
    }
}
