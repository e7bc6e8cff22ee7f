//! Raw metadata records.
//!
//! These are the uninterpreted rows and mapped structures of an ahead-of-time compiled image:
//! every reference to another record is still a bare index or address. Nothing here resolves
//! anything; see [`crate::metadata::typesystem`] for that.

use crate::metadata::token::{
    DataAddress, FieldIndex, GenericParameterIndex, MethodIndex, ParameterIndex, StringIndex,
    TypeDefIndex, TypeUsageIndex,
};

#[allow(non_snake_case, dead_code, missing_docs)]
/// Raw type definition flag bits, as found in the `flags` word of a definition record
pub mod TYPE_ATTRIBUTE {
    /// Mask for the 3 visibility bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    pub const PUBLIC: u32 = 0x0000_0001;
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    pub const NESTED_FAM_AND_ASSEM: u32 = 0x0000_0006;
    pub const NESTED_FAM_OR_ASSEM: u32 = 0x0000_0007;
    pub const INTERFACE: u32 = 0x0000_0020;
    pub const ABSTRACT: u32 = 0x0000_0080;
    pub const SEALED: u32 = 0x0000_0100;
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
    pub const IMPORT: u32 = 0x0000_1000;
    pub const SERIALIZABLE: u32 = 0x0000_2000;
    pub const BEFORE_FIELD_INIT: u32 = 0x0010_0000;
}

#[allow(non_snake_case, dead_code, missing_docs)]
/// Possible discriminants of a type usage record - shared with the CLI signature encoding
pub mod ELEMENT_TYPE {
    //Marks end of a list
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    // Data is the address of the pointee usage
    pub const PTR: u8 = 0x0f;
    pub const BYREF: u8 = 0x10;
    // Data is a definition index
    pub const VALUETYPE: u8 = 0x11;
    // Data is a definition index
    pub const CLASS: u8 = 0x12;
    // Data is a generic parameter index, owned by a type
    pub const VAR: u8 = 0x13;
    // Data is the address of an array descriptor
    pub const ARRAY: u8 = 0x14;
    // Data is the address of a generic class record
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    pub const FNPTR: u8 = 0x1b;
    // System.Object
    pub const OBJECT: u8 = 0x1c;
    // Data is the address of the element usage
    pub const SZARRAY: u8 = 0x1d;
    // Data is a generic parameter index, owned by a method
    pub const MVAR: u8 = 0x1e;
    pub const CMOD_REQD: u8 = 0x1f;
    pub const CMOD_OPT: u8 = 0x20;
    pub const INTERNAL: u8 = 0x21;
    pub const MODIFIER: u8 = 0x40;
    pub const SENTINEL: u8 = 0x41;
    pub const PINNED: u8 = 0x45;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A row of the type definition table
pub struct RawTypeDefinition {
    /// an index into the string heap
    pub name: StringIndex,
    /// an index into the string heap, 0 for the global namespace
    pub namespace: StringIndex,
    /// an index into the type usage table, `None` for `System.Object` and interfaces
    pub parent: Option<TypeUsageIndex>,
    /// a 4-byte bitmask of type `TYPE_ATTRIBUTE`
    pub flags: u32,
    /// first of a contiguous run of fields owned by this type
    pub field_start: FieldIndex,
    /// number of fields owned by this type
    pub field_count: u16,
    /// first of a contiguous run of methods owned by this type
    pub method_start: MethodIndex,
    /// number of methods owned by this type
    pub method_count: u16,
}

/// A type usage record: a reference to a type as it is used somewhere else.
///
/// The meaning of `data` depends on `kind`, one of the [`ELEMENT_TYPE`] discriminants. Use the
/// constructors to build well-formed records, and [`crate::metadata::typesystem::classify`] to
/// interpret one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawTypeUsage {
    /// Definition index, generic parameter index or mapped address, depending on `kind`
    pub data: u64,
    /// Attribute bits of the usage site
    pub attrs: u16,
    /// The discriminant byte
    pub kind: u8,
    /// Set when the usage is passed by reference
    pub by_ref: bool,
}

impl RawTypeUsage {
    /// A reference-type usage of a definition
    #[must_use]
    pub const fn definition(index: TypeDefIndex) -> Self {
        Self::with_data(ELEMENT_TYPE::CLASS, index.value() as u64)
    }

    /// A value-type usage of a definition
    #[must_use]
    pub const fn value_type(index: TypeDefIndex) -> Self {
        Self::with_data(ELEMENT_TYPE::VALUETYPE, index.value() as u64)
    }

    /// A primitive usage; `kind` is the primitive's discriminant, `index` the definition backing it
    #[must_use]
    pub const fn primitive(kind: u8, index: TypeDefIndex) -> Self {
        Self::with_data(kind, index.value() as u64)
    }

    /// A generic instantiation; `class` is the address of a generic class record
    #[must_use]
    pub const fn generic_instance(class: DataAddress) -> Self {
        Self::with_data(ELEMENT_TYPE::GENERICINST, class.value())
    }

    /// A multi-dimensional array; `descriptor` is the address of an array descriptor
    #[must_use]
    pub const fn array(descriptor: DataAddress) -> Self {
        Self::with_data(ELEMENT_TYPE::ARRAY, descriptor.value())
    }

    /// A single-dimension zero-based array; `element` is the address of the element usage
    #[must_use]
    pub const fn sz_array(element: DataAddress) -> Self {
        Self::with_data(ELEMENT_TYPE::SZARRAY, element.value())
    }

    /// An unmanaged pointer; `pointee` is the address of the pointee usage
    #[must_use]
    pub const fn pointer(pointee: DataAddress) -> Self {
        Self::with_data(ELEMENT_TYPE::PTR, pointee.value())
    }

    /// A generic parameter of a type (`method == false`) or of a method
    #[must_use]
    pub const fn generic_parameter(index: GenericParameterIndex, method: bool) -> Self {
        let kind = if method {
            ELEMENT_TYPE::MVAR
        } else {
            ELEMENT_TYPE::VAR
        };
        Self::with_data(kind, index.value() as u64)
    }

    /// Marks the usage as passed by reference
    #[must_use]
    pub const fn passed_by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }

    const fn with_data(kind: u8, data: u64) -> Self {
        RawTypeUsage {
            data,
            attrs: 0,
            kind,
            by_ref: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Mapped record naming a generic definition and the instantiation applied to it
pub struct RawGenericClass {
    /// The open generic definition
    pub definition: TypeDefIndex,
    /// Address of the class instantiation (`RawGenericInst`)
    pub class_inst: DataAddress,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Mapped record holding the argument list of an instantiation
pub struct RawGenericInst {
    /// Number of generic arguments
    pub argc: u32,
    /// Address of `argc` consecutive usage record addresses
    pub argv: DataAddress,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Mapped record describing a multi-dimensional array
pub struct RawArrayDescriptor {
    /// Address of the element usage
    pub element: DataAddress,
    /// Number of dimensions, must be at least 1
    pub rank: i32,
    /// Number of declared dimension sizes
    pub num_sizes: i32,
    /// Number of declared lower bounds
    pub num_lobounds: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A row of the generic parameter table
pub struct RawGenericParameter {
    /// The generic container declaring this parameter
    pub owner: u32,
    /// an index into the string heap
    pub name: StringIndex,
    /// Zero-based position within the owner's parameter list
    pub num: u16,
    /// Variance and constraint flags
    pub flags: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A row of the field definition table
pub struct RawFieldDefinition {
    /// an index into the string heap
    pub name: StringIndex,
    /// an index into the type usage table
    pub type_index: TypeUsageIndex,
    /// The metadata token
    pub token: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A row of the method definition table
pub struct RawMethodDefinition {
    /// an index into the string heap
    pub name: StringIndex,
    /// The definition owning this method
    pub declaring_type: TypeDefIndex,
    /// an index into the type usage table
    pub return_type: TypeUsageIndex,
    /// first of a contiguous run of parameters
    pub parameter_start: ParameterIndex,
    /// number of parameters
    pub parameter_count: u16,
    /// a 2-byte bitmask of method attributes
    pub flags: u16,
    /// The metadata token
    pub token: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A row of the parameter definition table
pub struct RawParameterDefinition {
    /// an index into the string heap
    pub name: StringIndex,
    /// an index into the type usage table
    pub type_index: TypeUsageIndex,
    /// The metadata token
    pub token: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_constructors() {
        let class = RawTypeUsage::definition(TypeDefIndex::new(4));
        assert_eq!(class.kind, ELEMENT_TYPE::CLASS);
        assert_eq!(class.data, 4);
        assert!(!class.by_ref);

        let value = RawTypeUsage::value_type(TypeDefIndex::new(9));
        assert_eq!(value.kind, ELEMENT_TYPE::VALUETYPE);

        let var = RawTypeUsage::generic_parameter(GenericParameterIndex::new(2), false);
        assert_eq!(var.kind, ELEMENT_TYPE::VAR);
        let mvar = RawTypeUsage::generic_parameter(GenericParameterIndex::new(2), true);
        assert_eq!(mvar.kind, ELEMENT_TYPE::MVAR);

        let ptr = RawTypeUsage::pointer(DataAddress::new(0x40)).passed_by_ref();
        assert_eq!(ptr.kind, ELEMENT_TYPE::PTR);
        assert_eq!(ptr.data, 0x40);
        assert!(ptr.by_ref);
    }

    #[test]
    fn usage_equality_includes_by_ref() {
        let a = RawTypeUsage::definition(TypeDefIndex::new(1));
        assert_eq!(a, RawTypeUsage::definition(TypeDefIndex::new(1)));
        assert_ne!(a, a.passed_by_ref());
    }

    #[test]
    fn visibility_mask() {
        assert_eq!(
            TYPE_ATTRIBUTE::NESTED_PUBLIC & TYPE_ATTRIBUTE::VISIBILITY_MASK,
            TYPE_ATTRIBUTE::NESTED_PUBLIC
        );
        assert_ne!(
            TYPE_ATTRIBUTE::NESTED_PUBLIC & TYPE_ATTRIBUTE::VISIBILITY_MASK,
            TYPE_ATTRIBUTE::PUBLIC
        );
    }
}
