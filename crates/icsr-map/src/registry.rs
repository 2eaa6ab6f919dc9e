//! Class correspondence between two adjacent layers.
//!
//! A correspondence is declared once with [`correspondence!`], listing the
//! entity types shared by both layers. The declaration is checked at compile
//! time (canonical names must agree) and again when the registry is first
//! built (both schemas fully covered, no duplicates). The built
//! [`ClassRegistry`] is cached for the life of the process.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;

use icsr_model::entity::same_canonical_name;
use icsr_model::{EntityDescriptor, EntityType, Layer};
use tracing::{debug, error};

use crate::error::MappingError;

/// One source type and the target type it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub source: &'static EntityDescriptor,
    pub target: &'static EntityDescriptor,
}

impl Pair {
    pub fn new(source: &'static EntityDescriptor, target: &'static EntityDescriptor) -> Self {
        Self { source, target }
    }
}

/// Bidirectional mapping between the entity types of two layers.
#[derive(Debug, PartialEq)]
pub struct ClassRegistry {
    source_layer: &'static str,
    target_layer: &'static str,
    pairs: Vec<Pair>,
    forward: HashMap<TypeId, usize>,
    backward: HashMap<TypeId, usize>,
}

impl ClassRegistry {
    /// Builds the registry for the schemas rooted at `source_root` and
    /// `target_root` from an explicit pair list.
    ///
    /// Every entity type reachable from either root must appear in exactly
    /// one pair, and both sides of a pair must share a canonical name.
    pub fn build(
        source_root: &'static EntityDescriptor,
        target_root: &'static EntityDescriptor,
        pairs: &[Pair],
    ) -> Result<Self, MappingError> {
        let source_schema = source_root.reachable();
        let target_schema = target_root.reachable();

        let mut registry = Self {
            source_layer: source_root.layer,
            target_layer: target_root.layer,
            pairs: Vec::with_capacity(pairs.len()),
            forward: HashMap::with_capacity(pairs.len()),
            backward: HashMap::with_capacity(pairs.len()),
        };

        for pair in pairs {
            if !same_canonical_name(pair.source.name, pair.target.name) {
                return Err(MappingError::NameMismatch {
                    left: pair.source.qualified_name(),
                    right: pair.target.qualified_name(),
                });
            }
            if !source_schema.contains(&pair.source) {
                return Err(MappingError::OutsideSchema {
                    entity: pair.source.qualified_name(),
                    layer: registry.source_layer,
                });
            }
            if !target_schema.contains(&pair.target) {
                return Err(MappingError::OutsideSchema {
                    entity: pair.target.qualified_name(),
                    layer: registry.target_layer,
                });
            }

            let index = registry.pairs.len();
            if registry
                .forward
                .insert(pair.source.type_id(), index)
                .is_some()
            {
                return Err(MappingError::DuplicatePair {
                    entity: pair.source.qualified_name(),
                });
            }
            if registry
                .backward
                .insert(pair.target.type_id(), index)
                .is_some()
            {
                return Err(MappingError::DuplicatePair {
                    entity: pair.target.qualified_name(),
                });
            }
            registry.pairs.push(*pair);
        }

        let unpaired_source = source_schema
            .iter()
            .find(|descriptor| !registry.forward.contains_key(&descriptor.type_id()))
            .map(|descriptor| (descriptor, registry.source_layer));
        let unpaired_target = target_schema
            .iter()
            .find(|descriptor| !registry.backward.contains_key(&descriptor.type_id()))
            .map(|descriptor| (descriptor, registry.target_layer));
        if let Some((descriptor, layer)) = unpaired_source.or(unpaired_target) {
            return Err(MappingError::Unpaired {
                entity: descriptor.qualified_name(),
                layer,
            });
        }

        debug!(
            source = registry.source_layer,
            target = registry.target_layer,
            pairs = registry.pairs.len(),
            "built class correspondence registry"
        );
        Ok(registry)
    }

    pub fn source_layer(&self) -> &'static str {
        self.source_layer
    }

    pub fn target_layer(&self) -> &'static str {
        self.target_layer
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in declaration order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Target-layer counterpart of a source-layer type.
    pub fn target_of(
        &self,
        source: &EntityDescriptor,
    ) -> Result<&'static EntityDescriptor, MappingError> {
        self.forward
            .get(&source.type_id())
            .map(|&index| self.pairs[index].target)
            .ok_or_else(|| MappingError::UnresolvableCounterpart {
                entity: source.qualified_name(),
                from: self.source_layer,
                to: self.target_layer,
            })
    }

    /// Source-layer counterpart of a target-layer type.
    pub fn source_of(
        &self,
        target: &EntityDescriptor,
    ) -> Result<&'static EntityDescriptor, MappingError> {
        self.backward
            .get(&target.type_id())
            .map(|&index| self.pairs[index].source)
            .ok_or_else(|| MappingError::UnresolvableCounterpart {
                entity: target.qualified_name(),
                from: self.target_layer,
                to: self.source_layer,
            })
    }
}

/// A declared correspondence between two layers.
///
/// Implemented by [`correspondence!`]; the registry is built on first use
/// and shared afterwards, including across threads.
pub trait Correspondence: 'static {
    type Source: Layer;
    type Target: Layer;

    /// The declared pairs, in declaration order.
    fn pairs() -> Vec<Pair>;

    #[doc(hidden)]
    fn cache() -> &'static OnceLock<Result<ClassRegistry, MappingError>>;

    /// Builds a fresh registry, bypassing the cache.
    fn build() -> Result<ClassRegistry, MappingError> {
        ClassRegistry::build(
            <<Self::Source as Layer>::Root as EntityType>::schema(),
            <<Self::Target as Layer>::Root as EntityType>::schema(),
            &Self::pairs(),
        )
    }

    /// The process-wide registry for this correspondence.
    fn registry() -> Result<&'static ClassRegistry, MappingError> {
        Self::cache()
            .get_or_init(|| {
                Self::build().inspect_err(|err| {
                    error!(
                        source = <Self::Source as Layer>::NAME,
                        target = <Self::Target as Layer>::NAME,
                        error = %err,
                        "class correspondence is inconsistent"
                    );
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Declares a [`Correspondence`] between two layer modules of `icsr_model`.
///
/// Each listed type name must exist in both modules, and the two types must
/// share a canonical name; a mismatch fails to compile.
#[macro_export]
macro_rules! correspondence {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $source:ident :: $source_layer:ident => $target:ident :: $target_layer:ident {
            $($entity:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name;

        $(
            const _: () = assert!(
                $crate::__private::same_canonical_name(
                    <$crate::__private::icsr_model::$source::$entity as $crate::__private::EntityType>::CANONICAL_NAME,
                    <$crate::__private::icsr_model::$target::$entity as $crate::__private::EntityType>::CANONICAL_NAME,
                ),
                concat!("canonical names differ for ", stringify!($entity)),
            );
        )*

        impl $crate::registry::Correspondence for $name {
            type Source = $crate::__private::icsr_model::$source::$source_layer;
            type Target = $crate::__private::icsr_model::$target::$target_layer;

            fn pairs() -> ::std::vec::Vec<$crate::registry::Pair> {
                vec![
                    $(
                        $crate::registry::Pair::new(
                            <$crate::__private::icsr_model::$source::$entity as $crate::__private::EntityType>::schema(),
                            <$crate::__private::icsr_model::$target::$entity as $crate::__private::EntityType>::schema(),
                        ),
                    )*
                ]
            }

            fn cache() -> &'static ::std::sync::OnceLock<
                ::std::result::Result<$crate::registry::ClassRegistry, $crate::error::MappingError>,
            > {
                static CACHE: ::std::sync::OnceLock<
                    ::std::result::Result<$crate::registry::ClassRegistry, $crate::error::MappingError>,
                > = ::std::sync::OnceLock::new();
                &CACHE
            }
        }
    };
}
