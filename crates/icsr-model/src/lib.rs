//! Document tree model of an Individual Case Safety Report (ICSR).
//!
//! The same logical document is expressed in three structurally parallel
//! layers: [`api`] (external form), [`domain`] (business-rule form) and
//! [`storage`] (persisted form). Every node type implements [`Entity`], which
//! exposes its fields through a generated descriptor table so converters and
//! validators can work on any node without per-field glue.

pub mod api;
pub mod domain;
pub mod entity;
pub mod error;
pub mod issue;
pub mod null_flavor;
pub mod path;
pub mod scalar;
pub mod storage;
pub mod structure;

pub use entity::{
    Entity, EntityDescriptor, EntityType, FieldDescriptor, FieldKey, FieldMap, FieldRef,
    FieldShape, FieldValue, Layer,
};
pub use error::{BuildError, ScalarError, StructuralError};
pub use issue::{IssueReport, ValidationIssue};
pub use null_flavor::NullFlavor;
pub use path::{FieldPath, PathSegment};
pub use scalar::{Decimal, Nullable, ReactionRef, Scalar, ScalarField, ScalarType};
pub use structure::{ReadDocument, read_document};
