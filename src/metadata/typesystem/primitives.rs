use strum::IntoEnumIterator;

use crate::metadata::records::ELEMENT_TYPE;

/// Built-in types a usage record can name directly through its discriminant
///
/// The record still carries the index of the definition backing the primitive. The kinds also
/// make up the keyword table behind [`keyword_alias`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum PrimitiveKind {
    /// System.Void - represents no value
    Void,
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    I1,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int16 - signed 16-bit integer
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    U2,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    U4,
    /// System.Int64 - signed 64-bit integer
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    U8,
    /// System.Single - 32-bit floating point
    R4,
    /// System.Double - 64-bit floating point
    R8,
    /// System.IntPtr - native sized signed integer
    I,
    /// System.UIntPtr - native sized unsigned integer
    U,
    /// System.Object - base class for all reference types
    Object,
    /// System.String - immutable string of Unicode characters
    String,
}

impl PrimitiveKind {
    /// Returns the primitive named by a usage discriminant, if it names one
    #[must_use]
    pub fn from_byte(type_byte: u8) -> Option<Self> {
        match type_byte {
            ELEMENT_TYPE::VOID => Some(PrimitiveKind::Void),
            ELEMENT_TYPE::BOOLEAN => Some(PrimitiveKind::Boolean),
            ELEMENT_TYPE::CHAR => Some(PrimitiveKind::Char),
            ELEMENT_TYPE::I1 => Some(PrimitiveKind::I1),
            ELEMENT_TYPE::U1 => Some(PrimitiveKind::U1),
            ELEMENT_TYPE::I2 => Some(PrimitiveKind::I2),
            ELEMENT_TYPE::U2 => Some(PrimitiveKind::U2),
            ELEMENT_TYPE::I4 => Some(PrimitiveKind::I4),
            ELEMENT_TYPE::U4 => Some(PrimitiveKind::U4),
            ELEMENT_TYPE::I8 => Some(PrimitiveKind::I8),
            ELEMENT_TYPE::U8 => Some(PrimitiveKind::U8),
            ELEMENT_TYPE::R4 => Some(PrimitiveKind::R4),
            ELEMENT_TYPE::R8 => Some(PrimitiveKind::R8),
            ELEMENT_TYPE::I => Some(PrimitiveKind::I),
            ELEMENT_TYPE::U => Some(PrimitiveKind::U),
            ELEMENT_TYPE::OBJECT => Some(PrimitiveKind::Object),
            ELEMENT_TYPE::STRING => Some(PrimitiveKind::String),
            _ => None,
        }
    }

    #[cfg(test)]
    fn as_byte(&self) -> u8 {
        match self {
            PrimitiveKind::Void => ELEMENT_TYPE::VOID,
            PrimitiveKind::Boolean => ELEMENT_TYPE::BOOLEAN,
            PrimitiveKind::Char => ELEMENT_TYPE::CHAR,
            PrimitiveKind::I1 => ELEMENT_TYPE::I1,
            PrimitiveKind::U1 => ELEMENT_TYPE::U1,
            PrimitiveKind::I2 => ELEMENT_TYPE::I2,
            PrimitiveKind::U2 => ELEMENT_TYPE::U2,
            PrimitiveKind::I4 => ELEMENT_TYPE::I4,
            PrimitiveKind::U4 => ELEMENT_TYPE::U4,
            PrimitiveKind::I8 => ELEMENT_TYPE::I8,
            PrimitiveKind::U8 => ELEMENT_TYPE::U8,
            PrimitiveKind::R4 => ELEMENT_TYPE::R4,
            PrimitiveKind::R8 => ELEMENT_TYPE::R8,
            PrimitiveKind::I => ELEMENT_TYPE::I,
            PrimitiveKind::U => ELEMENT_TYPE::U,
            PrimitiveKind::Object => ELEMENT_TYPE::OBJECT,
            PrimitiveKind::String => ELEMENT_TYPE::STRING,
        }
    }

    /// The namespace of the backing definition
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        "System"
    }

    /// The name of the backing definition
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "Void",
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::I1 => "SByte",
            PrimitiveKind::U1 => "Byte",
            PrimitiveKind::I2 => "Int16",
            PrimitiveKind::U2 => "UInt16",
            PrimitiveKind::I4 => "Int32",
            PrimitiveKind::U4 => "UInt32",
            PrimitiveKind::I8 => "Int64",
            PrimitiveKind::U8 => "UInt64",
            PrimitiveKind::R4 => "Single",
            PrimitiveKind::R8 => "Double",
            PrimitiveKind::I => "IntPtr",
            PrimitiveKind::U => "UIntPtr",
            PrimitiveKind::Object => "Object",
            PrimitiveKind::String => "String",
        }
    }

    /// The keyword C# uses for this primitive, if it has one
    #[must_use]
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            PrimitiveKind::Void => Some("void"),
            PrimitiveKind::Boolean => Some("bool"),
            PrimitiveKind::Char => Some("char"),
            PrimitiveKind::I1 => Some("sbyte"),
            PrimitiveKind::U1 => Some("byte"),
            PrimitiveKind::I2 => Some("short"),
            PrimitiveKind::U2 => Some("ushort"),
            PrimitiveKind::I4 => Some("int"),
            PrimitiveKind::U4 => Some("uint"),
            PrimitiveKind::I8 => Some("long"),
            PrimitiveKind::U8 => Some("ulong"),
            PrimitiveKind::R4 => Some("float"),
            PrimitiveKind::R8 => Some("double"),
            PrimitiveKind::Object => Some("object"),
            PrimitiveKind::String => Some("string"),
            PrimitiveKind::I | PrimitiveKind::U => None,
        }
    }
}

/// `System.Decimal` has a keyword but no primitive discriminant
const DECIMAL: (&str, &str) = ("System.Decimal", "decimal");

/// Returns the keyword alias of a well-known full name, e.g. `System.Int32` is `int`
#[must_use]
pub fn keyword_alias(full_name: &str) -> Option<&'static str> {
    if full_name == DECIMAL.0 {
        return Some(DECIMAL.1);
    }

    let (namespace, name) = full_name.rsplit_once('.')?;
    PrimitiveKind::iter()
        .find(|kind| kind.namespace() == namespace && kind.name() == name)
        .and_then(|kind| kind.keyword())
}
