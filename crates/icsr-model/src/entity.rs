//! Entity trait and per-entity field descriptor tables.
//!
//! Every node type of every layer is declared with the [`entity!`] macro,
//! which generates alongside the struct:
//!
//! - a static [`EntityDescriptor`] listing its fields in declaration order,
//!   each with its shape (scalar, single child, repeated children),
//! - a name-keyed accessor ([`Entity::field`]) and an ordered reader
//!   ([`Entity::fields`]) producing layer-neutral [`FieldRef`]s,
//! - construction from an ordered [`FieldMap`] ([`EntityType::from_fields`]),
//! - a module named after the canonical entity name holding one typed
//!   [`FieldKey`] per field, so rule inputs are checked at compile time.
//!
//! # Example
//!
//! ```ignore
//! entity! {
//!     #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
//!     #[serde(default)]
//!     pub struct HNarrativeCaseSummary in DomainLayer => h_narrative_case_summary {
//!         children h_3_r_sender_diagnosis_meddra_code: Vec<H3RSenderDiagnosisMeddraCode>,
//!         scalar h_1_case_narrative: Option<String>,
//!     }
//! }
//!
//! // Typed key usable by rules registered against HNarrativeCaseSummary.
//! let key = h_narrative_case_summary::h_1_case_narrative;
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{BuildError, ScalarError};
use crate::null_flavor::NullFlavor;
use crate::scalar::{Scalar, ScalarField};

/// One of the structurally parallel schemas a document can be expressed in.
pub trait Layer: 'static {
    const NAME: &'static str;

    type Root: EntityType<Layer = Self>;
}

/// Shape of one declared field.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
    Scalar,
    Child(fn() -> &'static EntityDescriptor),
    Children(fn() -> &'static EntityDescriptor),
}

impl FieldShape {
    /// Entity type nested under this field, if any.
    pub fn entity(&self) -> Option<&'static EntityDescriptor> {
        match self {
            FieldShape::Scalar => None,
            FieldShape::Child(descriptor) | FieldShape::Children(descriptor) => Some(descriptor()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldShape::Scalar => "scalar",
            FieldShape::Child(_) => "child",
            FieldShape::Children(_) => "children",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub shape: FieldShape,
    pub required: bool,
    /// Null flavors the attribute accepts in place of a value, when it
    /// accepts any.
    pub null_flavors: Option<&'static [NullFlavor]>,
}

impl FieldDescriptor {
    /// Whether `flavor` may stand in for this attribute's value.
    pub fn accepts(&self, flavor: NullFlavor) -> bool {
        self.null_flavors.is_some_and(|allowed| allowed.contains(&flavor))
    }
}

/// Static description of one entity type of one layer.
pub struct EntityDescriptor {
    /// Canonical name shared by the corresponding types of every layer.
    pub name: &'static str,
    pub type_name: &'static str,
    pub layer: &'static str,
    pub fields: &'static [FieldDescriptor],
    #[doc(hidden)]
    pub type_id: fn() -> TypeId,
    #[doc(hidden)]
    pub build: fn(FieldMap) -> Result<Box<dyn Entity>, BuildError>,
}

impl EntityDescriptor {
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Constructs an instance of the described type from `fields`.
    pub fn build(&self, fields: FieldMap) -> Result<Box<dyn Entity>, BuildError> {
        (self.build)(fields)
    }

    /// This type followed by every entity type nested below it, breadth first.
    pub fn reachable(&'static self) -> Vec<&'static EntityDescriptor> {
        let mut seen: Vec<&'static EntityDescriptor> = vec![self];
        let mut cursor = 0;
        while let Some(current) = seen.get(cursor).copied() {
            cursor += 1;
            for child in current.fields.iter().filter_map(|field| field.shape.entity()) {
                if !seen.contains(&child) {
                    seen.push(child);
                }
            }
        }
        seen
    }

    /// Layer-qualified type name, e.g. `domain::Icsr`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.layer, self.type_name)
    }
}

impl PartialEq for EntityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for EntityDescriptor {}

impl fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("name", &self.name)
            .field("type", &self.qualified_name())
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Borrowed, layer-neutral view of one field value.
#[derive(Debug, Clone)]
pub enum FieldRef<'a> {
    Scalar(Option<Scalar>),
    Child(Option<&'a dyn Entity>),
    Children(Vec<&'a dyn Entity>),
}

impl<'a> FieldRef<'a> {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FieldRef::Scalar(scalar) => scalar.as_ref(),
            _ => None,
        }
    }

    pub fn as_child(&self) -> Option<&'a dyn Entity> {
        match self {
            FieldRef::Child(child) => *child,
            _ => None,
        }
    }

    pub fn as_children(&self) -> &[&'a dyn Entity] {
        match self {
            FieldRef::Children(children) => children,
            _ => &[],
        }
    }
}

/// Owned field value used to construct an entity.
#[derive(Debug)]
pub enum FieldValue {
    Scalar(Option<Scalar>),
    Child(Option<Box<dyn Entity>>),
    Children(Vec<Box<dyn Entity>>),
}

/// Ordered attribute mapping an entity is constructed from.
#[derive(Debug, Default)]
pub struct FieldMap {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Sets `name`, replacing any earlier value for it.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        match self.entries.iter_mut().find(|(entry, _)| *entry == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        let position = self.entries.iter().position(|(entry, _)| *entry == name)?;
        Some(self.entries.remove(position).1)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails if any field was left unclaimed by the entity being built.
    #[doc(hidden)]
    pub fn ensure_consumed(self, entity: &'static str) -> Result<(), BuildError> {
        match self.entries.into_iter().next() {
            Some((field, _)) => Err(BuildError::UnknownField { entity, field }),
            None => Ok(()),
        }
    }
}

/// A node of a document tree, of any layer.
pub trait Entity: Any + fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &'static EntityDescriptor;

    /// Surrogate identifier, absent until persisted.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    /// Reads the field called `name`, `None` if the type declares no such field.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Every field in declaration order, starting with `id`.
    fn fields(&self) -> Vec<(&'static str, FieldRef<'_>)>;

    /// Direct child nodes, single and repeated, in declaration order.
    fn children_mut(&mut self) -> Vec<&mut dyn Entity>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<'e> dyn Entity + 'e {
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Visits this node and every node below it, parents first.
    pub fn visit(&self, visit: &mut dyn FnMut(&dyn Entity)) {
        visit(self);
        for (_, field) in self.fields() {
            match field {
                FieldRef::Child(Some(child)) => child.visit(visit),
                FieldRef::Children(children) => {
                    for child in children {
                        child.visit(visit);
                    }
                }
                FieldRef::Child(None) | FieldRef::Scalar(_) => {}
            }
        }
    }

    /// Mutable counterpart of [`visit`](Self::visit).
    pub fn visit_mut(&mut self, visit: &mut dyn FnMut(&mut dyn Entity)) {
        visit(self);
        for child in self.children_mut() {
            child.visit_mut(visit);
        }
    }
}

/// A concrete, statically known entity type.
pub trait EntityType: Entity + Sized {
    type Layer: Layer;

    /// Canonical name shared by the corresponding types of every layer.
    const CANONICAL_NAME: &'static str;

    fn schema() -> &'static EntityDescriptor;

    fn from_fields(fields: FieldMap) -> Result<Self, BuildError>;
}

/// Field type holding a single optional child entity.
pub trait ChildField {
    type Entity: EntityType;
}

impl<T: EntityType> ChildField for Option<Box<T>> {
    type Entity = T;
}

/// Field type holding an ordered list of child entities.
pub trait ChildrenField {
    type Entity: EntityType;
}

impl<T: EntityType> ChildrenField for Vec<T> {
    type Entity = T;
}

/// Compile-time checked name of a field declared on `E`.
pub struct FieldKey<E> {
    name: &'static str,
    entity: PhantomData<fn() -> E>,
}

impl<E> FieldKey<E> {
    #[doc(hidden)]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            entity: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<E> Clone for FieldKey<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for FieldKey<E> {}

impl<E> fmt::Debug for FieldKey<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldKey").field(&self.name).finish()
    }
}

/// Case-insensitive ASCII comparison usable in constant evaluation.
pub const fn same_canonical_name(left: &str, right: &str) -> bool {
    let (left, right) = (left.as_bytes(), right.as_bytes());
    if left.len() != right.len() {
        return false;
    }
    let mut index = 0;
    while index < left.len() {
        if left[index].to_ascii_lowercase() != right[index].to_ascii_lowercase() {
            return false;
        }
        index += 1;
    }
    true
}

// ============================================================================
// Field helpers used by generated code
// ============================================================================

#[doc(hidden)]
pub fn build_boxed<T: EntityType>(fields: FieldMap) -> Result<Box<dyn Entity>, BuildError> {
    T::from_fields(fields).map(|entity| Box::new(entity) as Box<dyn Entity>)
}

#[doc(hidden)]
pub fn scalar_ref<T: ScalarField>(value: &T) -> FieldRef<'_> {
    FieldRef::Scalar(value.read())
}

#[doc(hidden)]
pub fn child_ref<T: Entity>(value: &Option<Box<T>>) -> FieldRef<'_> {
    FieldRef::Child(value.as_deref().map(|child| child as &dyn Entity))
}

#[doc(hidden)]
pub fn children_ref<T: Entity>(values: &[T]) -> FieldRef<'_> {
    FieldRef::Children(values.iter().map(|child| child as &dyn Entity).collect())
}

#[doc(hidden)]
pub fn collect_child_mut<'a, T: Entity>(
    value: &'a mut Option<Box<T>>,
    out: &mut Vec<&'a mut dyn Entity>,
) {
    if let Some(child) = value {
        out.push(child.as_mut());
    }
}

#[doc(hidden)]
pub fn collect_children_mut<'a, T: Entity>(
    values: &'a mut [T],
    out: &mut Vec<&'a mut dyn Entity>,
) {
    out.extend(values.iter_mut().map(|child| child as &mut dyn Entity));
}

#[doc(hidden)]
pub fn take_scalar<T: ScalarField>(
    fields: &mut FieldMap,
    field: &'static str,
    null_flavors: Option<&'static [NullFlavor]>,
) -> Result<T, BuildError> {
    let scalar = match fields.take(field) {
        None | Some(FieldValue::Scalar(None)) => None,
        Some(FieldValue::Scalar(scalar)) => scalar,
        Some(_) => {
            return Err(BuildError::ShapeMismatch {
                field,
                expected: "a scalar",
            });
        }
    };
    if let (Some(Scalar::NullFlavor(flavor)), Some(allowed)) = (&scalar, null_flavors) {
        if !allowed.contains(flavor) {
            return Err(BuildError::scalar(
                field,
                ScalarError::NullFlavorNotAccepted(*flavor),
            ));
        }
    }
    T::write(scalar).map_err(|source| BuildError::scalar(field, source))
}

#[doc(hidden)]
pub fn take_child<T: EntityType>(
    fields: &mut FieldMap,
    field: &'static str,
) -> Result<Option<Box<T>>, BuildError> {
    match fields.take(field) {
        None | Some(FieldValue::Child(None)) => Ok(None),
        Some(FieldValue::Child(Some(child))) => downcast_child(field, child).map(Some),
        Some(_) => Err(BuildError::ShapeMismatch {
            field,
            expected: "a single child",
        }),
    }
}

#[doc(hidden)]
pub fn take_children<T: EntityType>(
    fields: &mut FieldMap,
    field: &'static str,
) -> Result<Vec<T>, BuildError> {
    match fields.take(field) {
        None => Ok(Vec::new()),
        Some(FieldValue::Children(children)) => children
            .into_iter()
            .map(|child| downcast_child::<T>(field, child).map(|child| *child))
            .collect(),
        Some(_) => Err(BuildError::ShapeMismatch {
            field,
            expected: "a list of children",
        }),
    }
}

fn downcast_child<T: EntityType>(
    field: &'static str,
    child: Box<dyn Entity>,
) -> Result<Box<T>, BuildError> {
    let found = child.descriptor().type_name;
    child
        .into_any()
        .downcast::<T>()
        .map_err(|_| BuildError::UnexpectedEntity {
            field,
            expected: T::schema().type_name,
            found,
        })
}

#[doc(hidden)]
#[macro_export]
macro_rules! __icsr_field {
    (shape scalar, $ty:ty) => { $crate::entity::FieldShape::Scalar };
    (shape child, $ty:ty) => {
        $crate::entity::FieldShape::Child(
            <<$ty as $crate::entity::ChildField>::Entity as $crate::entity::EntityType>::schema,
        )
    };
    (shape children, $ty:ty) => {
        $crate::entity::FieldShape::Children(
            <<$ty as $crate::entity::ChildrenField>::Entity as $crate::entity::EntityType>::schema,
        )
    };

    (required scalar, $ty:ty) => { <$ty as $crate::scalar::ScalarField>::REQUIRED };
    (required child, $ty:ty) => { false };
    (required children, $ty:ty) => { false };

    (flavors) => { ::std::option::Option::None };
    (flavors [$($flavor:ident),+]) => {
        ::std::option::Option::Some(
            &[$($crate::null_flavor::NullFlavor::$flavor),+] as &'static [$crate::null_flavor::NullFlavor],
        )
    };

    (read scalar, $value:expr) => { $crate::entity::scalar_ref($value) };
    (read child, $value:expr) => { $crate::entity::child_ref($value) };
    (read children, $value:expr) => { $crate::entity::children_ref($value) };

    (collect_mut scalar, $value:expr, $out:expr) => {};
    (collect_mut child, $value:expr, $out:expr) => {
        $crate::entity::collect_child_mut($value, $out)
    };
    (collect_mut children, $value:expr, $out:expr) => {
        $crate::entity::collect_children_mut($value, $out)
    };

    (take scalar, $ty:ty, $fields:expr, $name:expr, $flavors:expr) => {
        $crate::entity::take_scalar::<$ty>($fields, $name, $flavors)
    };
    (take child, $ty:ty, $fields:expr, $name:expr, $flavors:expr) => {
        $crate::entity::take_child::<<$ty as $crate::entity::ChildField>::Entity>($fields, $name)
    };
    (take children, $ty:ty, $fields:expr, $name:expr, $flavors:expr) => {
        $crate::entity::take_children::<<$ty as $crate::entity::ChildrenField>::Entity>(
            $fields, $name,
        )
    };
}

/// Declares one entity type of one layer together with its field table.
///
/// Fields are written `shape name: Type` where `shape` is `scalar` (`Type`
/// implements [`ScalarField`](crate::scalar::ScalarField)), `child`
/// (`Option<Box<E>>`) or `children` (`Vec<E>`). A scalar that accepts null
/// flavors lists them after its type, as in `scalar d_2_1_date_birth:
/// Option<Nullable<String>> [Msk]`. An `id: Option<i64>` field is always
/// added first.
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $layer:ty => $canonical:ident {
            $(
                $(#[$field_meta:meta])*
                $shape:ident $field:ident : $ty:ty $([$($flavor:ident),+])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            pub id: ::std::option::Option<i64>,
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Field keys of [`", stringify!($name), "`].")]
        #[allow(non_upper_case_globals, dead_code)]
        pub mod $canonical {
            pub const id: $crate::entity::FieldKey<super::$name> =
                $crate::entity::FieldKey::new("id");
            $(
                pub const $field: $crate::entity::FieldKey<super::$name> =
                    $crate::entity::FieldKey::new(stringify!($field));
            )*
        }

        impl $crate::entity::EntityType for $name {
            type Layer = $layer;

            const CANONICAL_NAME: &'static str = stringify!($canonical);

            fn schema() -> &'static $crate::entity::EntityDescriptor {
                static DESCRIPTOR: $crate::entity::EntityDescriptor = $crate::entity::EntityDescriptor {
                    name: <$name as $crate::entity::EntityType>::CANONICAL_NAME,
                    type_name: stringify!($name),
                    layer: <$layer as $crate::entity::Layer>::NAME,
                    fields: &[
                        $crate::entity::FieldDescriptor {
                            name: "id",
                            shape: $crate::entity::FieldShape::Scalar,
                            required: false,
                            null_flavors: ::std::option::Option::None,
                        },
                        $(
                            $crate::entity::FieldDescriptor {
                                name: stringify!($field),
                                shape: $crate::__icsr_field!(shape $shape, $ty),
                                required: $crate::__icsr_field!(required $shape, $ty),
                                null_flavors: $crate::__icsr_field!(flavors $([$($flavor),+])?),
                            },
                        )*
                    ],
                    type_id: ::std::any::TypeId::of::<$name>,
                    build: $crate::entity::build_boxed::<$name>,
                };
                &DESCRIPTOR
            }

            fn from_fields(
                mut fields: $crate::entity::FieldMap,
            ) -> ::std::result::Result<Self, $crate::error::BuildError> {
                let entity = Self {
                    id: $crate::entity::take_scalar::<::std::option::Option<i64>>(
                        &mut fields,
                        "id",
                        ::std::option::Option::None,
                    )?,
                    $(
                        $field: $crate::__icsr_field!(
                            take $shape,
                            $ty,
                            &mut fields,
                            stringify!($field),
                            $crate::__icsr_field!(flavors $([$($flavor),+])?)
                        )?,
                    )*
                };
                fields.ensure_consumed(stringify!($name))?;
                Ok(entity)
            }
        }

        impl $crate::entity::Entity for $name {
            fn descriptor(&self) -> &'static $crate::entity::EntityDescriptor {
                <Self as $crate::entity::EntityType>::schema()
            }

            fn id(&self) -> ::std::option::Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: ::std::option::Option<i64>) {
                self.id = id;
            }

            fn field(&self, name: &str) -> ::std::option::Option<$crate::entity::FieldRef<'_>> {
                match name {
                    "id" => Some($crate::entity::scalar_ref(&self.id)),
                    $(
                        stringify!($field) => Some($crate::__icsr_field!(read $shape, &self.$field)),
                    )*
                    _ => None,
                }
            }

            fn fields(&self) -> ::std::vec::Vec<(&'static str, $crate::entity::FieldRef<'_>)> {
                vec![
                    ("id", $crate::entity::scalar_ref(&self.id)),
                    $(
                        (stringify!($field), $crate::__icsr_field!(read $shape, &self.$field)),
                    )*
                ]
            }

            #[allow(unused_mut)]
            fn children_mut(&mut self) -> ::std::vec::Vec<&mut dyn $crate::entity::Entity> {
                let mut children: ::std::vec::Vec<&mut dyn $crate::entity::Entity> =
                    ::std::vec::Vec::new();
                $(
                    $crate::__icsr_field!(collect_mut $shape, &mut self.$field, &mut children);
                )*
                children
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}
