//! Generic structural conversion of document trees between adjacent layers.
//!
//! The converter never knows about individual entity types. For each node it
//! reads the fields in declaration order, converts nested nodes first, looks
//! up the counterpart type in the [`ClassRegistry`] and constructs it from the
//! mapped attributes. Scalar values are passed through as-is; each layer's
//! field types decide how to store them.

use std::marker::PhantomData;

use icsr_model::{
    Entity, EntityDescriptor, EntityType, FieldMap, FieldPath, FieldRef, FieldValue, Layer,
};
use tracing::{debug_span, trace};

use crate::error::{ConversionError, MappingError};
use crate::registry::{ClassRegistry, Correspondence};

/// Which way a [`Correspondence`] is walked.
pub trait Direction: 'static {
    type Source: Layer;
    type Target: Layer;

    fn registry() -> Result<&'static ClassRegistry, MappingError>;

    fn counterpart(
        registry: &ClassRegistry,
        source: &EntityDescriptor,
    ) -> Result<&'static EntityDescriptor, MappingError>;
}

/// From the correspondence's source layer to its target layer.
pub struct Forward<C>(PhantomData<C>);

/// From the correspondence's target layer back to its source layer.
pub struct Backward<C>(PhantomData<C>);

impl<C: Correspondence> Direction for Forward<C> {
    type Source = C::Source;
    type Target = C::Target;

    fn registry() -> Result<&'static ClassRegistry, MappingError> {
        C::registry()
    }

    fn counterpart(
        registry: &ClassRegistry,
        source: &EntityDescriptor,
    ) -> Result<&'static EntityDescriptor, MappingError> {
        registry.target_of(source)
    }
}

impl<C: Correspondence> Direction for Backward<C> {
    type Source = C::Target;
    type Target = C::Source;

    fn registry() -> Result<&'static ClassRegistry, MappingError> {
        C::registry()
    }

    fn counterpart(
        registry: &ClassRegistry,
        source: &EntityDescriptor,
    ) -> Result<&'static EntityDescriptor, MappingError> {
        registry.source_of(source)
    }
}

/// Marks `To` as directly reachable from this layer.
///
/// Only adjacent layers convert; api and storage never do.
pub trait Adjacent<To: Layer>: Layer {
    type Direction: Direction;
}

/// Converts document trees along one [`Direction`].
pub struct TreeConverter<D> {
    registry: &'static ClassRegistry,
    direction: PhantomData<D>,
}

impl<D: Direction> TreeConverter<D> {
    pub fn new() -> Result<Self, MappingError> {
        Ok(Self {
            registry: D::registry()?,
            direction: PhantomData,
        })
    }

    /// Converts `source` and everything below it into a new tree of `T`.
    ///
    /// The source tree is only read.
    pub fn convert<T: EntityType>(&self, source: &dyn Entity) -> Result<T, ConversionError> {
        let converted = self.convert_node(source)?;
        let found = converted.descriptor().qualified_name();
        converted
            .into_any()
            .downcast::<T>()
            .map(|entity| *entity)
            .map_err(|_| ConversionError::UnexpectedTarget {
                expected: T::schema().qualified_name(),
                found,
            })
    }

    /// Converts `source` into its counterpart, whatever its type.
    pub fn convert_node(&self, source: &dyn Entity) -> Result<Box<dyn Entity>, ConversionError> {
        self.convert_at(source, &FieldPath::root())
    }

    fn convert_at(
        &self,
        source: &dyn Entity,
        path: &FieldPath,
    ) -> Result<Box<dyn Entity>, ConversionError> {
        let fields = source.fields();
        let mut mapped = FieldMap::with_capacity(fields.len());
        for (name, value) in fields {
            let value = match value {
                FieldRef::Scalar(scalar) => FieldValue::Scalar(scalar),
                FieldRef::Child(child) => FieldValue::Child(
                    child
                        .map(|child| self.convert_at(child, &path.field(name)))
                        .transpose()?,
                ),
                FieldRef::Children(children) => FieldValue::Children(
                    children
                        .into_iter()
                        .enumerate()
                        .map(|(index, child)| self.convert_at(child, &path.field(name).index(index)))
                        .collect::<Result<Vec<_>, ConversionError>>()?,
                ),
            };
            mapped.insert(name, value);
        }

        let origin = source.descriptor();
        let target = D::counterpart(self.registry, origin).map_err(|error| {
            ConversionError::Mapping {
                path: path.clone(),
                error,
            }
        })?;
        trace!(path = %path, from = origin.type_name, to = %target.qualified_name(), "converting node");

        target
            .build(mapped)
            .map_err(|reason| ConversionError::Build {
                path: path.field(reason.field()),
                target: target.qualified_name(),
                reason,
            })
    }
}

/// Converts a document tree of one layer into the adjacent layer.
///
/// ```ignore
/// let domain: domain::Icsr = convert(&api_icsr)?;
/// let stored: storage::Icsr = convert(&domain)?;
/// ```
pub fn convert<S, T>(source: &S) -> Result<T, ConversionError>
where
    S: EntityType,
    T: EntityType,
    S::Layer: Adjacent<T::Layer>,
{
    let _span = debug_span!(
        "convert",
        from = <S::Layer as Layer>::NAME,
        to = <T::Layer as Layer>::NAME
    )
    .entered();
    TreeConverter::<<S::Layer as Adjacent<T::Layer>>::Direction>::new()?.convert(source)
}
