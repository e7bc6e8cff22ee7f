//! Name derivation for resolved types.
//!
//! Names are never stored for composite shapes: an instantiation borrows the name of its generic
//! definition, and arrays and pointers borrow everything from their element. They are derived on
//! request, which also keeps naming away from entities that are still under construction.

use crate::{
    metadata::{
        store::MetadataStore,
        typesystem::{
            keyword_alias, registry::qualify, PointerNaming, TypeId, TypeModel, TypeShape,
        },
    },
    Result,
};

/// Name of every pointer under [`PointerNaming::VoidPlaceholder`]
const VOID_POINTER: &str = "void *";

/// Suffix of an array: `[]` for one dimension, one comma per additional dimension
///
/// Ranks above one deviate from older tooling, which prints a plain `[]` for every rank.
fn array_suffix(rank: u32) -> String {
    let commas = rank.saturating_sub(1) as usize;
    format!("[{}]", ",".repeat(commas))
}

impl<S: MetadataStore> TypeModel<S> {
    /// Namespace of a type; composites report the namespace of their element or definition
    ///
    /// # Errors
    /// Returns an error if `id` or a type it borrows its name from is not a readable entity
    pub fn namespace(&self, id: TypeId) -> Result<String> {
        match &self.get(id)?.shape {
            TypeShape::Definition { namespace, .. } => Ok(namespace.clone()),
            TypeShape::GenericInstance { definition, .. } => self.namespace(*definition),
            TypeShape::Array { element, .. } => self.namespace(*element),
            TypeShape::Pointer { pointee } => self.namespace(*pointee),
            TypeShape::GenericParameter { .. } => Ok(String::new()),
        }
    }

    /// Simple name of a type, e.g. `List<Int32>`, `Int32[,]` or `T`
    ///
    /// Generic arguments are rendered with their own simple names.
    ///
    /// # Errors
    /// Returns an error if `id` or a type it borrows its name from is not a readable entity
    pub fn name(&self, id: TypeId) -> Result<String> {
        match &self.get(id)?.shape {
            TypeShape::Definition { name, .. } => Ok(name.clone()),
            TypeShape::GenericInstance {
                definition,
                arguments,
                ..
            } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| self.name(*argument))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!(
                    "{}<{}>",
                    self.name(*definition)?,
                    arguments.join(", ")
                ))
            }
            TypeShape::Array { element, rank, .. } => {
                Ok(format!("{}{}", self.name(*element)?, array_suffix(*rank)))
            }
            TypeShape::Pointer { pointee } => match self.config().pointer_naming {
                PointerNaming::Pointee => Ok(format!("{}*", self.name(*pointee)?)),
                PointerNaming::VoidPlaceholder => Ok(VOID_POINTER.to_string()),
            },
            TypeShape::GenericParameter { name, .. } => Ok(name.clone()),
        }
    }

    /// Namespace-qualified name of a type, e.g. `N.Foo` or `System.Int32[]`
    ///
    /// The separator is left out for the global namespace, so an instantiation of a generic
    /// definition without namespace reads `List<Int32>`.
    ///
    /// # Errors
    /// Returns an error if `id` or a type it borrows its name from is not a readable entity
    pub fn full_name(&self, id: TypeId) -> Result<String> {
        match &self.get(id)?.shape {
            TypeShape::Definition {
                namespace, name, ..
            } => Ok(qualify(namespace, name)),
            TypeShape::GenericInstance { definition, .. } => {
                Ok(qualify(&self.namespace(*definition)?, &self.name(id)?))
            }
            TypeShape::Array { element, rank, .. } => Ok(format!(
                "{}{}",
                self.full_name(*element)?,
                array_suffix(*rank)
            )),
            TypeShape::Pointer { pointee } => match self.config().pointer_naming {
                PointerNaming::Pointee => Ok(format!("{}*", self.full_name(*pointee)?)),
                PointerNaming::VoidPlaceholder => Ok(VOID_POINTER.to_string()),
            },
            TypeShape::GenericParameter { name, .. } => Ok(name.clone()),
        }
    }

    /// Name of a type as C# source would spell it, e.g. `List<int>` or `string[]`
    ///
    /// Well-known definitions are replaced by their keyword; composites use the display names
    /// of their element and arguments.
    ///
    /// # Errors
    /// Returns an error if `id` or a type it borrows its name from is not a readable entity
    pub fn display_name(&self, id: TypeId) -> Result<String> {
        match &self.get(id)?.shape {
            TypeShape::Definition {
                namespace, name, ..
            } => Ok(keyword_alias(&qualify(namespace, name))
                .map_or_else(|| name.clone(), str::to_string)),
            TypeShape::GenericInstance {
                definition,
                arguments,
                ..
            } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| self.display_name(*argument))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!(
                    "{}<{}>",
                    self.display_name(*definition)?,
                    arguments.join(", ")
                ))
            }
            TypeShape::Array { element, rank, .. } => Ok(format!(
                "{}{}",
                self.display_name(*element)?,
                array_suffix(*rank)
            )),
            TypeShape::Pointer { pointee } => match self.config().pointer_naming {
                PointerNaming::Pointee => Ok(format!("{}*", self.display_name(*pointee)?)),
                PointerNaming::VoidPlaceholder => Ok(VOID_POINTER.to_string()),
            },
            TypeShape::GenericParameter { name, .. } => Ok(name.clone()),
        }
    }
}
