//! Layer-to-layer mapping of ICSR document trees.
//!
//! - [`registry`]: which entity type of one layer corresponds to which type of
//!   the adjacent layer.
//! - [`convert()`]: structural, registry-driven tree conversion.

pub mod convert;
pub mod error;
pub mod layers;
pub mod registry;

pub use convert::{Adjacent, Backward, Direction, Forward, TreeConverter, convert};
pub use error::{ConversionError, MappingError};
pub use layers::{ApiDomain, DomainStorage};
pub use registry::{ClassRegistry, Correspondence, Pair};

#[doc(hidden)]
pub mod __private {
    pub use icsr_model;
    pub use icsr_model::EntityType;
    pub use icsr_model::entity::same_canonical_name;
}
