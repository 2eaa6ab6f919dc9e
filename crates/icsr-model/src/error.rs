use thiserror::Error;

use crate::null_flavor::NullFlavor;
use crate::path::FieldPath;

/// A scalar could not be represented by a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    #[error("a value is required")]
    Missing,

    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("null flavor {0} is not accepted")]
    NullFlavorNotAccepted(NullFlavor),

    #[error("invalid {expected}: {reason}")]
    Invalid {
        expected: &'static str,
        reason: String,
    },
}

impl ScalarError {
    pub(crate) fn mismatch(expected: &'static str, found: &crate::Scalar) -> Self {
        match found {
            crate::Scalar::NullFlavor(flavor) => Self::NullFlavorNotAccepted(*flavor),
            other => Self::Mismatch {
                expected,
                found: other.type_name(),
            },
        }
    }
}

/// An entity could not be constructed from a field map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("required field `{field}` has no value")]
    MissingRequired { field: &'static str },

    #[error("field `{field}`: {source}")]
    Scalar {
        field: &'static str,
        #[source]
        source: ScalarError,
    },

    #[error("field `{field}` expects `{expected}`, got `{found}`")]
    UnexpectedEntity {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}` expects {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` is not declared on `{entity}`")]
    UnknownField {
        entity: &'static str,
        field: &'static str,
    },
}

impl BuildError {
    /// Name of the field the error is located at.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequired { field }
            | Self::Scalar { field, .. }
            | Self::UnexpectedEntity { field, .. }
            | Self::ShapeMismatch { field, .. }
            | Self::UnknownField { field, .. } => field,
        }
    }

    pub(crate) fn scalar(field: &'static str, source: ScalarError) -> Self {
        match source {
            ScalarError::Missing => Self::MissingRequired { field },
            source => Self::Scalar { field, source },
        }
    }
}

/// Raw input did not fit the document's declared shape.
///
/// Located at the offending attribute, or at the root when the input is not
/// a document at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed ICSR document at {path}: {message}")]
pub struct StructuralError {
    pub path: FieldPath,
    pub message: String,
}

impl StructuralError {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for StructuralError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(FieldPath::root(), error.to_string())
    }
}
