//! Metadata heaps.
//!
//! Only the string heap survives into the type-resolution core: names and namespaces of
//! definitions and members are byte offsets into it.

mod strings;

pub use strings::StringHeap;
