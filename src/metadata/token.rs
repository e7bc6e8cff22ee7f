//! Typed handles into the flat metadata tables.
//!
//! The binary format addresses everything by bare integers: indices into the type definition,
//! field, method, parameter and generic parameter tables, byte offsets into the string blob,
//! and mapped addresses of structural records (usage records, generic classes, instantiations,
//! array descriptors). Every one of them gets its own handle type here so that an index for one
//! table can never be passed where another table is expected.

use std::fmt;

/// The flat metadata tables a handle can point into.
///
/// Carried by [`crate::Error::IndexOutOfRange`] so that a bad index can be traced back to the
/// table it was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum MetadataTable {
    /// Type definitions
    TypeDefinition,
    /// Type usage pointer table
    TypeUsage,
    /// Field definitions
    Field,
    /// Method definitions
    Method,
    /// Method parameters
    Parameter,
    /// Generic parameters
    GenericParameter,
    /// Generic argument address list of an instantiation
    GenericArgument,
    /// Interned string blob
    String,
}

macro_rules! table_index {
    ($(#[$meta:meta])* $name:ident, $table:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw table index
            #[must_use]
            pub const fn new(value: u32) -> Self {
                $name(value)
            }

            /// Returns the raw index
            #[must_use]
            pub const fn value(&self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize`, for slicing into in-memory tables
            #[must_use]
            pub const fn as_usize(&self) -> usize {
                self.0 as usize
            }

            /// The table this handle indexes
            #[must_use]
            pub const fn table() -> MetadataTable {
                $table
            }

            /// Iterates `count` consecutive handles starting at this one
            pub fn range(self, count: u16) -> impl Iterator<Item = Self> {
                (self.0..self.0.saturating_add(u32::from(count))).map($name)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                $name(value)
            }
        }

        impl From<$name> for u32 {
            fn from(index: $name) -> Self {
                index.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

table_index!(
    /// Index into the type definition table
    TypeDefIndex,
    MetadataTable::TypeDefinition
);
table_index!(
    /// Index into the type usage pointer table (parents, field types, signatures)
    TypeUsageIndex,
    MetadataTable::TypeUsage
);
table_index!(
    /// Index into the field definition table
    FieldIndex,
    MetadataTable::Field
);
table_index!(
    /// Index into the method definition table
    MethodIndex,
    MetadataTable::Method
);
table_index!(
    /// Index into the parameter definition table
    ParameterIndex,
    MetadataTable::Parameter
);
table_index!(
    /// Index into the generic parameter table
    GenericParameterIndex,
    MetadataTable::GenericParameter
);
table_index!(
    /// Byte offset into the interned string blob
    StringIndex,
    MetadataTable::String
);

/// A mapped address of a structural record inside the binary image.
///
/// Usage records, generic classes, generic instantiations, argument lists and array
/// descriptors are not stored in flat tables; they reference each other by address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DataAddress(u64);

impl DataAddress {
    /// Creates an address from its raw value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        DataAddress(value)
    }

    /// Returns the raw address
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if this is a null address
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for DataAddress {
    fn from(value: u64) -> Self {
        DataAddress(value)
    }
}

impl fmt::Debug for DataAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataAddress(0x{:x})", self.0)
    }
}

impl fmt::Display for DataAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_handle_value() {
        let index = TypeDefIndex::new(5);
        assert_eq!(index.value(), 5);
        assert_eq!(index.as_usize(), 5);
        assert_eq!(u32::from(index), 5);
        assert_eq!(TypeDefIndex::from(5), index);
    }

    #[test]
    fn test_handle_table() {
        assert_eq!(TypeDefIndex::table(), MetadataTable::TypeDefinition);
        assert_eq!(FieldIndex::table(), MetadataTable::Field);
        assert_eq!(MethodIndex::table(), MetadataTable::Method);
        assert_eq!(StringIndex::table(), MetadataTable::String);
    }

    #[test]
    fn test_handle_range() {
        let fields: Vec<_> = FieldIndex::new(3).range(3).collect();
        assert_eq!(
            fields,
            vec![FieldIndex::new(3), FieldIndex::new(4), FieldIndex::new(5)]
        );
        assert_eq!(MethodIndex::new(9).range(0).count(), 0);
    }

    #[test]
    fn test_handle_range_saturates() {
        assert_eq!(FieldIndex::new(u32::MAX).range(4).count(), 0);
    }

    #[test]
    fn test_handle_formatting() {
        assert_eq!(format!("{}", TypeDefIndex::new(12)), "12");
        assert_eq!(format!("{:?}", TypeDefIndex::new(12)), "TypeDefIndex(12)");
        assert_eq!(format!("{}", DataAddress::new(0x1000)), "0x00001000");
        assert_eq!(format!("{:?}", DataAddress::new(0x1000)), "DataAddress(0x1000)");
    }

    #[test]
    fn test_address_null() {
        assert!(DataAddress::default().is_null());
        assert!(!DataAddress::new(8).is_null());
    }

    #[test]
    fn test_handle_as_key() {
        let mut map = HashMap::new();
        map.insert(TypeDefIndex::new(1), "first");
        map.insert(TypeDefIndex::new(2), "second");

        assert_eq!(map.get(&TypeDefIndex::new(1)), Some(&"first"));
        assert_eq!(map.get(&TypeDefIndex::new(3)), None);
    }

    #[test]
    fn test_table_names() {
        let names: Vec<String> = MetadataTable::iter().map(|t| t.to_string()).collect();
        assert!(names.contains(&"TypeDefinition".to_string()));
        assert!(names.contains(&"GenericArgument".to_string()));
    }
}
