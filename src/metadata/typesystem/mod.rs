//! Type system reconstructed from raw metadata.
//!
//! Raw records reference each other by index and address; this module turns that graph into
//! canonical, de-duplicated type entities that can be queried like a reflection API.
//!
//! # Key Components
//!
//! - [`TypeModel`]: Resolves definitions and usage records, and owns every entity it creates
//! - [`TypeEntity`]: A resolved type, with its shape-specific data in [`TypeShape`]
//! - [`TypeId`]: Stable handle of an entity within its model
//! - [`TypeKey`]: Structural identity used to de-duplicate entities
//! - [`classify`]: Maps a usage record to the [`UsageShape`] that decides how it resolves
//! - [`TypeAttributes`]: Semantic attributes derived from raw definition flags
//!
//! # Identity
//!
//! Every entity is keyed by what it is, never by where its raw record lives. Two usage records
//! at different addresses describing `List<Int32>` resolve to the same handle, and so do two
//! separate requests for the same definition index.
//!
//! # Examples
//!
//! ```rust
//! use il2scope::prelude::*;
//!
//! let mut store = MemoryStore::new();
//! let system = store.intern("System");
//! let name = store.intern("Int32");
//! let int32 = store.push_type_definition(RawTypeDefinition {
//!     namespace: system,
//!     name,
//!     ..Default::default()
//! });
//! let element = store.map_usage(RawTypeUsage::primitive(ELEMENT_TYPE::I4, int32));
//! let array = RawTypeUsage::sz_array(element);
//!
//! let model = TypeModel::new(store);
//! let id = model.resolve_usage(&array)?;
//!
//! assert_eq!(model.full_name(id)?, "System.Int32[]");
//! assert_eq!(model.display_name(id)?, "int[]");
//! assert_eq!(model.array_rank(id)?, 1);
//! # Ok::<(), il2scope::Error>(())
//! ```

mod attributes;
mod config;
mod names;
mod primitives;
mod registry;
mod resolver;
mod shape;

use std::fmt;

pub use attributes::TypeAttributes;
pub use config::{ModelConfig, PointerNaming};
pub use primitives::{keyword_alias, PrimitiveKind};
pub use resolver::{DefinitionWalk, TypeModel};
pub use shape::{classify, UsageShape};

use crate::metadata::{
    members::{FieldEntity, MethodEntity},
    records::RawTypeUsage,
    token::{GenericParameterIndex, TypeDefIndex},
};

/// Handle of a type entity inside its [`TypeModel`]
///
/// Handles are only meaningful for the model that issued them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(usize);

impl TypeId {
    pub(crate) fn new(index: usize) -> Self {
        TypeId(index)
    }

    /// Position of the entity in its model's arena
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural identity of a type entity
///
/// Composite keys are made of already resolved handles, so equal keys always describe the same
/// type no matter which raw records they were read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// A type definition
    Definition(TypeDefIndex),
    /// A generic definition applied to arguments, in order
    GenericInstance {
        /// The open generic definition
        definition: TypeId,
        /// The arguments, in instantiation order
        arguments: Vec<TypeId>,
    },
    /// A multi-dimensional array
    Array {
        /// The element type
        element: TypeId,
        /// Number of dimensions
        rank: u32,
    },
    /// A single-dimension zero-based array
    SzArray {
        /// The element type
        element: TypeId,
    },
    /// An unmanaged pointer
    Pointer {
        /// The pointee type
        pointee: TypeId,
    },
    /// A generic parameter placeholder
    GenericParameter {
        /// The generic parameter row
        index: GenericParameterIndex,
        /// Set for method-level parameters
        method: bool,
    },
}

/// Where an entity was created from, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOrigin {
    /// A row of the type definition table
    Definition(TypeDefIndex),
    /// A type usage record
    Usage(RawTypeUsage),
}

/// Shape-specific data of a [`TypeEntity`]
///
/// The variants are mutually exclusive: a raw usage record carries exactly one discriminant.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// A type backed by a definition row
    Definition {
        /// The definition row
        index: TypeDefIndex,
        /// Namespace, empty for the global namespace
        namespace: String,
        /// Simple name
        name: String,
        /// The type this one derives from
        base: Option<TypeId>,
        /// Declared fields, in table order
        fields: Vec<FieldEntity>,
        /// Declared methods, in table order
        methods: Vec<MethodEntity>,
    },
    /// A generic definition applied to arguments
    GenericInstance {
        /// The open generic definition
        definition: TypeId,
        /// The definition row of the open generic definition
        definition_index: TypeDefIndex,
        /// Concrete arguments or placeholders, in instantiation order
        arguments: Vec<TypeId>,
    },
    /// An array; namespace and name always come from the element
    Array {
        /// The element type
        element: TypeId,
        /// Number of dimensions, at least 1
        rank: u32,
        /// Set for single-dimension zero-based arrays
        sz: bool,
    },
    /// An unmanaged pointer
    Pointer {
        /// The pointee type
        pointee: TypeId,
    },
    /// An unresolved generic parameter
    GenericParameter {
        /// The generic parameter row
        index: GenericParameterIndex,
        /// Position in the owner's parameter list
        position: u16,
        /// Set for method-level parameters
        method: bool,
        /// Placeholder name derived from the position
        name: String,
    },
}

/// A resolved type
///
/// Entities are created once by their [`TypeModel`] and never change afterwards. Links to other
/// types are [`TypeId`] handles into the same model.
#[derive(Debug, Clone)]
pub struct TypeEntity {
    /// This entity's handle
    pub id: TypeId,
    /// The raw record this entity was created from
    pub origin: TypeOrigin,
    /// Semantic attributes
    pub attributes: TypeAttributes,
    /// Whether an unresolved generic parameter occurs anywhere in this type
    pub contains_generic_parameters: bool,
    /// Shape-specific data
    pub shape: TypeShape,
}

impl TypeEntity {
    /// Visible outside its image
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.attributes.contains(TypeAttributes::PUBLIC)
    }

    /// Cannot be instantiated
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.attributes.contains(TypeAttributes::ABSTRACT)
    }

    /// Cannot be derived from
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.attributes.contains(TypeAttributes::SEALED)
    }

    /// Declared as an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.attributes.contains(TypeAttributes::INTERFACE)
    }

    /// Anything not declared as an interface
    #[must_use]
    pub fn is_class(&self) -> bool {
        self.attributes.contains(TypeAttributes::CLASS)
    }

    /// Marked serializable
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        self.attributes.contains(TypeAttributes::SERIALIZABLE)
    }

    /// Is an array of any rank
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.shape, TypeShape::Array { .. })
    }

    /// Is an unmanaged pointer
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(self.shape, TypeShape::Pointer { .. })
    }

    /// Is a generic parameter placeholder
    #[must_use]
    pub fn is_generic_parameter(&self) -> bool {
        matches!(self.shape, TypeShape::GenericParameter { .. })
    }

    /// Is a generic definition applied to arguments
    #[must_use]
    pub fn is_generic_instance(&self) -> bool {
        matches!(self.shape, TypeShape::GenericInstance { .. })
    }

    /// Was created from a usage record rather than a definition row
    #[must_use]
    pub fn is_nested_usage(&self) -> bool {
        matches!(self.origin, TypeOrigin::Usage(_))
    }

    /// Arrays and pointers have an element type
    #[must_use]
    pub fn has_element_type(&self) -> bool {
        self.element_type().is_some()
    }

    /// The element of an array, or the pointee of a pointer
    #[must_use]
    pub fn element_type(&self) -> Option<TypeId> {
        match self.shape {
            TypeShape::Array { element, .. } => Some(element),
            TypeShape::Pointer { pointee } => Some(pointee),
            _ => None,
        }
    }

    /// Number of array dimensions, 0 for anything that is not an array
    #[must_use]
    pub fn array_rank(&self) -> u32 {
        match self.shape {
            TypeShape::Array { rank, .. } => rank,
            _ => 0,
        }
    }

    /// The open generic definition of an instantiation
    #[must_use]
    pub fn generic_definition(&self) -> Option<TypeId> {
        match self.shape {
            TypeShape::GenericInstance { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// Arguments of an instantiation, empty for anything else
    #[must_use]
    pub fn generic_arguments(&self) -> &[TypeId] {
        match &self.shape {
            TypeShape::GenericInstance { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Fields declared by a definition, empty for anything else
    #[must_use]
    pub fn fields(&self) -> &[FieldEntity] {
        match &self.shape {
            TypeShape::Definition { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Methods declared by a definition, empty for anything else
    #[must_use]
    pub fn methods(&self) -> &[MethodEntity] {
        match &self.shape {
            TypeShape::Definition { methods, .. } => methods,
            _ => &[],
        }
    }
}
