// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # il2scope
//!
//! A type-resolution core for reconstructing a reflection-style type model from the
//! index-addressed binary metadata emitted by IL2CPP-style ahead-of-time compilers.
//!
//! The metadata of such images encodes type definitions, member ranges and *type usages*
//! (references to types as used by fields, signatures, base-type slots, generic arguments,
//! arrays and pointers) as flat records addressed by integer indices and mapped addresses.
//! `il2scope` turns that graph into canonical, de-duplicated type entities that can be
//! queried like a reflection API: base types, generic arguments, element types and names.
//!
//! ## Features
//!
//! - **Identity-stable resolution** - resolving the same definition or the same logical
//!   usage twice always yields the same [`metadata::typesystem::TypeId`]
//! - **Cycle safety** - a two-phase reserve-then-fill protocol lets self-referential
//!   hierarchies (`class Node : Base<Node>`) resolve without unbounded recursion
//! - **Structural de-duplication** - generic instantiations, arrays and pointers are keyed
//!   by their resolved operands, never by the raw address they were read from
//! - **Naming** - raw, namespace-qualified and keyword-aliased display names
//! - **Thread safe** - lock-free reads, serialized construction
//!
//! ## Quick Start
//!
//! ```rust
//! use il2scope::prelude::*;
//!
//! let mut store = MemoryStore::new();
//! let namespace = store.intern("N");
//! let name = store.intern("Foo");
//! let foo = store.push_type_definition(RawTypeDefinition {
//!     namespace,
//!     name,
//!     flags: TYPE_ATTRIBUTE::PUBLIC,
//!     ..RawTypeDefinition::default()
//! });
//!
//! let model = TypeModel::new(store);
//! let id = model.resolve_definition(foo)?;
//!
//! assert_eq!(model.full_name(id)?, "N.Foo");
//! assert!(model.get(id)?.is_public());
//! # Ok::<(), il2scope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata::store`] - the [`metadata::store::MetadataStore`] collaborator contract and
//!   the in-memory [`metadata::store::MemoryStore`]
//! - [`metadata::typesystem`] - attribute mapping, usage classification, the
//!   [`metadata::typesystem::TypeModel`] resolver and naming derivation
//! - [`metadata::members`] - field, method and parameter builders
//! - [`Error`] and [`Result`] - error handling

#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use il2scope::prelude::*;
///
/// let model = TypeModel::new(MemoryStore::new());
/// assert!(model.is_empty());
/// ```
pub mod prelude;

/// Raw metadata records, typed handles, the store contract and the type system built on top.
pub mod metadata;

/// `il2scope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `il2scope` Error type
///
/// Every failure is scoped to the single resolution request that produced it; the type model
/// stays usable and its cache is left as it was before the request.
pub use error::Error;

pub use metadata::typesystem::{ModelConfig, PointerNaming, TypeModel};
