//! Raw metadata records and the type system reconstructed from them.
//!
//! The layering mirrors how data flows through the crate:
//!
//! - [`token`] - typed handles for every flat table and mapped address
//! - [`streams`] - the interned string heap
//! - [`records`] - raw, uninterpreted records as the binary format lays them out
//! - [`store`] - the [`store::MetadataStore`] contract and an in-memory implementation
//! - [`typesystem`] - the resolver, its cache and naming
//! - [`members`] - fields, methods and parameters attached to resolved definitions

/// Field, method and parameter entities and their builders
pub mod members;
/// Raw metadata records
pub mod records;
/// The metadata store contract and the in-memory store
pub mod store;
/// Interned string heap
pub mod streams;
/// Typed handles into the flat metadata tables
pub mod token;
/// Type resolution, caching and naming
pub mod typesystem;
