//! Error types for class correspondence and tree conversion.

use icsr_model::{BuildError, FieldPath};
use thiserror::Error;

/// A class correspondence problem.
///
/// Registry construction failures are fatal configuration errors: they mean
/// the layer schemas have drifted apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("no counterpart of `{entity}` is registered for {from} -> {to}")]
    UnresolvableCounterpart {
        entity: String,
        from: &'static str,
        to: &'static str,
    },

    #[error("`{left}` and `{right}` do not share a canonical name")]
    NameMismatch { left: String, right: String },

    #[error("`{entity}` is paired more than once")]
    DuplicatePair { entity: String },

    #[error("`{entity}` is reachable in the {layer} schema but has no counterpart")]
    Unpaired { entity: String, layer: &'static str },

    #[error("`{entity}` is not part of the {layer} schema")]
    OutsideSchema { entity: String, layer: &'static str },
}

/// Failure while converting a document tree between layers.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The target type rejected the mapped attributes.
    #[error("cannot build `{target}` at `{path}`: {reason}")]
    Build {
        path: FieldPath,
        target: String,
        #[source]
        reason: BuildError,
    },

    #[error("cannot convert node at `{path}`: {error}")]
    Mapping {
        path: FieldPath,
        #[source]
        error: MappingError,
    },

    #[error("conversion produced `{found}` where `{expected}` was requested")]
    UnexpectedTarget { expected: String, found: String },
}

impl ConversionError {
    /// Location of the failing attribute or node, when known.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            ConversionError::Build { path, .. } | ConversionError::Mapping { path, .. } => {
                Some(path)
            }
            ConversionError::UnexpectedTarget { .. } => None,
        }
    }
}

impl From<MappingError> for ConversionError {
    fn from(error: MappingError) -> Self {
        ConversionError::Mapping {
            path: FieldPath::root(),
            error,
        }
    }
}
