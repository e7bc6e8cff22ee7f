//! Fields, methods and parameters of resolved definitions.
//!
//! Members are built while their declaring definition is being resolved, so they must not
//! resolve types themselves: the declaring type is still only reserved at that point, and an
//! eager walk of every member type would pull in most of the image. Instead each member type is
//! a [`TypeLink`] that remembers its usage index and is resolved on first request through
//! [`TypeModel::resolve_link`].
//!
//! # Examples
//!
//! ```rust
//! use il2scope::prelude::*;
//!
//! let mut store = MemoryStore::new();
//! let system = store.intern("System");
//! let int32_name = store.intern("Int32");
//! let int32 = store.push_type_definition(RawTypeDefinition {
//!     namespace: system,
//!     name: int32_name,
//!     ..Default::default()
//! });
//! let int32_usage = store.push_usage(RawTypeUsage::primitive(ELEMENT_TYPE::I4, int32));
//!
//! let value = store.intern("value");
//! let field = store.push_field(RawFieldDefinition {
//!     name: value,
//!     type_index: int32_usage,
//!     token: 0x0400_0001,
//! });
//! let point = store.intern("Point");
//! let point = store.push_type_definition(RawTypeDefinition {
//!     name: point,
//!     field_start: field,
//!     field_count: 1,
//!     ..Default::default()
//! });
//!
//! let model = TypeModel::new(store);
//! let id = model.resolve_definition(point)?;
//! let field = &model.get(id)?.fields()[0];
//!
//! assert_eq!(field.name, "value");
//! assert_eq!(field.declaring_type, id);
//! let field_type = model.resolve_link(&field.field_type)?;
//! assert_eq!(model.display_name(field_type)?, "int");
//! # Ok::<(), il2scope::Error>(())
//! ```

use std::sync::OnceLock;

use bitflags::bitflags;

use crate::{
    metadata::{
        store::MetadataStore,
        token::{FieldIndex, MethodIndex, ParameterIndex, TypeUsageIndex},
        typesystem::{TypeId, TypeModel},
    },
    Result,
};

/// Mask for the member access bits of a method flag word
pub const METHOD_ACCESS_MASK: u16 = 0x0007;
/// Member access value of public methods
pub const METHOD_ACCESS_PUBLIC: u16 = 0x0006;

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u16 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// Runtime provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u16) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK)
    }
}

/// A lazily resolved reference from a member to its type
///
/// The link starts out holding only the type usage index. The first
/// [`TypeModel::resolve_link`] resolves it and every later call returns the memoized handle.
#[derive(Debug, Clone)]
pub struct TypeLink {
    usage: TypeUsageIndex,
    resolved: OnceLock<TypeId>,
}

impl TypeLink {
    /// Creates an unresolved link to the usage record at `usage`
    #[must_use]
    pub fn new(usage: TypeUsageIndex) -> Self {
        TypeLink {
            usage,
            resolved: OnceLock::new(),
        }
    }

    /// The usage record this link points at
    #[must_use]
    pub fn usage(&self) -> TypeUsageIndex {
        self.usage
    }

    /// The resolved handle, if the link was resolved before
    #[must_use]
    pub fn get(&self) -> Option<TypeId> {
        self.resolved.get().copied()
    }

    /// Memoizes `id`, keeping the first handle if another caller got there before
    pub(crate) fn set(&self, id: TypeId) -> TypeId {
        *self.resolved.get_or_init(|| id)
    }
}

/// A field declared by a definition
#[derive(Debug, Clone)]
pub struct FieldEntity {
    /// Row in the field table
    pub index: FieldIndex,
    /// Field name
    pub name: String,
    /// Metadata token
    pub token: u32,
    /// The definition declaring this field
    pub declaring_type: TypeId,
    /// The field's type
    pub field_type: TypeLink,
}

/// A parameter of a method
#[derive(Debug, Clone)]
pub struct ParameterEntity {
    /// Row in the parameter table
    pub index: ParameterIndex,
    /// Parameter name
    pub name: String,
    /// Metadata token
    pub token: u32,
    /// Zero-based position in the method signature
    pub position: u16,
    /// The parameter's type
    pub parameter_type: TypeLink,
}

/// A method declared by a definition
#[derive(Debug, Clone)]
pub struct MethodEntity {
    /// Row in the method table
    pub index: MethodIndex,
    /// Method name
    pub name: String,
    /// Metadata token
    pub token: u32,
    /// Raw method attribute word
    pub flags: u16,
    /// The definition declaring this method
    pub declaring_type: TypeId,
    /// The method's return type
    pub return_type: TypeLink,
    /// Parameters, in signature order
    pub parameters: Vec<ParameterEntity>,
}

impl MethodEntity {
    /// Modifiers decoded from the raw flag word
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// Accessible by anyone who can see the declaring type
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags & METHOD_ACCESS_MASK == METHOD_ACCESS_PUBLIC
    }

    /// Defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Dispatched through the vtable
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.modifiers().contains(MethodModifiers::VIRTUAL)
    }

    /// Has no implementation
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers().contains(MethodModifiers::ABSTRACT)
    }
}

/// Builds the member entity for one table row of a definition under construction
///
/// Builders only read raw records and strings; they never resolve types, because the owning
/// definition is still reserved while they run.
pub trait MemberBuilder<S: MetadataStore> {
    /// Handle of the table row to build from
    type Index;
    /// The entity produced
    type Entity;

    /// Builds the entity at `index`, owned by the definition `owner`
    ///
    /// # Errors
    /// Returns an error if the row or anything it references cannot be read from the store
    fn build(&self, model: &TypeModel<S>, owner: TypeId, index: Self::Index)
        -> Result<Self::Entity>;
}

/// Builds [`FieldEntity`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldBuilder;

impl<S: MetadataStore> MemberBuilder<S> for FieldBuilder {
    type Index = FieldIndex;
    type Entity = FieldEntity;

    fn build(&self, model: &TypeModel<S>, owner: TypeId, index: FieldIndex) -> Result<FieldEntity> {
        let record = model.store().field(index)?;

        Ok(FieldEntity {
            index,
            name: model.store().string(record.name)?.to_string(),
            token: record.token,
            declaring_type: owner,
            field_type: TypeLink::new(record.type_index),
        })
    }
}

/// Builds [`MethodEntity`]s, including their parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodBuilder;

impl<S: MetadataStore> MemberBuilder<S> for MethodBuilder {
    type Index = MethodIndex;
    type Entity = MethodEntity;

    fn build(
        &self,
        model: &TypeModel<S>,
        owner: TypeId,
        index: MethodIndex,
    ) -> Result<MethodEntity> {
        let store = model.store();
        let record = store.method(index)?;

        let mut parameters = Vec::with_capacity(usize::from(record.parameter_count));
        for (position, parameter) in (0u16..).zip(
            record
                .parameter_start
                .range(record.parameter_count),
        ) {
            let raw = store.parameter(parameter)?;
            parameters.push(ParameterEntity {
                index: parameter,
                name: store.string(raw.name)?.to_string(),
                token: raw.token,
                position,
                parameter_type: TypeLink::new(raw.type_index),
            });
        }

        Ok(MethodEntity {
            index,
            name: store.string(record.name)?.to_string(),
            token: record.token,
            flags: record.flags,
            declaring_type: owner,
            return_type: TypeLink::new(record.return_type),
            parameters,
        })
    }
}
