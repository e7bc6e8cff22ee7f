//! # il2scope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the il2scope library. Import this module to get quick access to the store, the type
//! model and the records needed to feed it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all il2scope operations
pub use crate::Error;

/// The result type used throughout il2scope
pub use crate::Result;

/// Configuration of a type model
pub use crate::{ModelConfig, PointerNaming};

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The resolver and cache of type entities
pub use crate::metadata::typesystem::{DefinitionWalk, TypeModel};

/// The metadata store contract and its in-memory implementation
pub use crate::metadata::store::{MappedRecord, MemoryStore, MetadataStore};

/// Interned identifier strings
pub use crate::metadata::streams::StringHeap;

// ================================================================================================
// Raw Records and Handles
// ================================================================================================

/// Raw records as the binary format lays them out
pub use crate::metadata::records::{
    RawArrayDescriptor, RawFieldDefinition, RawGenericClass, RawGenericInst, RawGenericParameter,
    RawMethodDefinition, RawParameterDefinition, RawTypeDefinition, RawTypeUsage, ELEMENT_TYPE,
    TYPE_ATTRIBUTE,
};

/// Typed handles into the metadata tables
pub use crate::metadata::token::{
    DataAddress, FieldIndex, GenericParameterIndex, MetadataTable, MethodIndex, ParameterIndex,
    StringIndex, TypeDefIndex, TypeUsageIndex,
};

// ================================================================================================
// Type System
// ================================================================================================

/// Resolved type entities and their identity
pub use crate::metadata::typesystem::{
    classify, keyword_alias, PrimitiveKind, TypeAttributes, TypeEntity, TypeId, TypeKey,
    TypeOrigin, TypeShape, UsageShape,
};

/// Members of resolved definitions
pub use crate::metadata::members::{
    FieldBuilder, FieldEntity, MemberBuilder, MethodBuilder, MethodEntity, MethodModifiers,
    ParameterEntity, TypeLink,
};
