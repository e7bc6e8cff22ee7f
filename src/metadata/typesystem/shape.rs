//! Classification of raw type usage records.

use crate::{
    metadata::{
        records::{RawTypeUsage, ELEMENT_TYPE},
        token::{DataAddress, GenericParameterIndex, TypeDefIndex},
        typesystem::PrimitiveKind,
    },
    Error, Result,
};

/// The resolution strategy a usage record calls for, with its operand decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageShape {
    /// A class or value type, naming its definition
    DefinitionRef(TypeDefIndex),
    /// A built-in type, still backed by a definition
    Primitive {
        /// Which primitive the discriminant names
        kind: PrimitiveKind,
        /// The definition backing it
        definition: TypeDefIndex,
    },
    /// A generic instantiation; the operand is the generic class record
    GenericInst(DataAddress),
    /// A multi-dimensional array; the operand is the array descriptor
    Array(DataAddress),
    /// A single-dimension zero-based array; the operand is the element usage
    SzArray(DataAddress),
    /// An unmanaged pointer; the operand is the pointee usage
    Pointer(DataAddress),
    /// A generic parameter of a type or method
    GenericVar {
        /// The generic parameter row
        index: GenericParameterIndex,
        /// Set for method-level parameters (`MVAR`)
        method: bool,
    },
}

/// Decides how a usage record is resolved, from its discriminant alone.
///
/// The `by_ref` flag does not influence the shape.
///
/// # Errors
/// Returns [`Error::UnsupportedTypeShape`] for discriminants without a resolution strategy
/// (`BYREF`, `FNPTR`, `TYPEDBYREF`, modifiers, sentinels, ...), and a malformed error if the
/// operand does not fit the index it encodes.
///
/// # Examples
///
/// ```rust
/// use il2scope::metadata::{
///     records::RawTypeUsage,
///     token::TypeDefIndex,
///     typesystem::{classify, UsageShape},
/// };
///
/// let usage = RawTypeUsage::definition(TypeDefIndex::new(3));
/// assert_eq!(classify(&usage)?, UsageShape::DefinitionRef(TypeDefIndex::new(3)));
/// # Ok::<(), il2scope::Error>(())
/// ```
pub fn classify(usage: &RawTypeUsage) -> Result<UsageShape> {
    if let Some(kind) = PrimitiveKind::from_byte(usage.kind) {
        return Ok(UsageShape::Primitive {
            kind,
            definition: TypeDefIndex::new(operand_index(usage)?),
        });
    }

    match usage.kind {
        ELEMENT_TYPE::CLASS | ELEMENT_TYPE::VALUETYPE => Ok(UsageShape::DefinitionRef(
            TypeDefIndex::new(operand_index(usage)?),
        )),
        ELEMENT_TYPE::GENERICINST => Ok(UsageShape::GenericInst(DataAddress::new(usage.data))),
        ELEMENT_TYPE::ARRAY => Ok(UsageShape::Array(DataAddress::new(usage.data))),
        ELEMENT_TYPE::SZARRAY => Ok(UsageShape::SzArray(DataAddress::new(usage.data))),
        ELEMENT_TYPE::PTR => Ok(UsageShape::Pointer(DataAddress::new(usage.data))),
        ELEMENT_TYPE::VAR | ELEMENT_TYPE::MVAR => Ok(UsageShape::GenericVar {
            index: GenericParameterIndex::new(operand_index(usage)?),
            method: usage.kind == ELEMENT_TYPE::MVAR,
        }),
        other => Err(Error::UnsupportedTypeShape(other)),
    }
}

fn operand_index(usage: &RawTypeUsage) -> Result<u32> {
    u32::try_from(usage.data).map_err(|_| {
        malformed_error!(
            "Usage operand 0x{:x} does not fit a table index (kind 0x{:02x})",
            usage.data,
            usage.kind
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(kind: u8, data: u64) -> RawTypeUsage {
        RawTypeUsage {
            data,
            attrs: 0,
            kind,
            by_ref: false,
        }
    }

    #[test]
    fn definition_references() {
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::CLASS, 7)).unwrap(),
            UsageShape::DefinitionRef(TypeDefIndex::new(7))
        );
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::VALUETYPE, 8)).unwrap(),
            UsageShape::DefinitionRef(TypeDefIndex::new(8))
        );
    }

    #[test]
    fn primitives() {
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::I4, 3)).unwrap(),
            UsageShape::Primitive {
                kind: PrimitiveKind::I4,
                definition: TypeDefIndex::new(3)
            }
        );
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::STRING, 12)).unwrap(),
            UsageShape::Primitive {
                kind: PrimitiveKind::String,
                definition: TypeDefIndex::new(12)
            }
        );
    }

    #[test]
    fn composites() {
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::GENERICINST, 0x2000)).unwrap(),
            UsageShape::GenericInst(DataAddress::new(0x2000))
        );
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::ARRAY, 0x2010)).unwrap(),
            UsageShape::Array(DataAddress::new(0x2010))
        );
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::SZARRAY, 0x2020)).unwrap(),
            UsageShape::SzArray(DataAddress::new(0x2020))
        );
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::PTR, 0x2030)).unwrap(),
            UsageShape::Pointer(DataAddress::new(0x2030))
        );
    }

    #[test]
    fn generic_variables() {
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::VAR, 1)).unwrap(),
            UsageShape::GenericVar {
                index: GenericParameterIndex::new(1),
                method: false
            }
        );
        assert_eq!(
            classify(&usage(ELEMENT_TYPE::MVAR, 1)).unwrap(),
            UsageShape::GenericVar {
                index: GenericParameterIndex::new(1),
                method: true
            }
        );
    }

    #[test]
    fn by_ref_does_not_change_shape() {
        let plain = usage(ELEMENT_TYPE::CLASS, 2);
        assert_eq!(
            classify(&plain).unwrap(),
            classify(&plain.passed_by_ref()).unwrap()
        );
    }

    #[test]
    fn unsupported() {
        for kind in [
            ELEMENT_TYPE::END,
            ELEMENT_TYPE::BYREF,
            ELEMENT_TYPE::TYPEDBYREF,
            ELEMENT_TYPE::FNPTR,
            ELEMENT_TYPE::CMOD_REQD,
            ELEMENT_TYPE::CMOD_OPT,
            ELEMENT_TYPE::INTERNAL,
            ELEMENT_TYPE::MODIFIER,
            ELEMENT_TYPE::SENTINEL,
            ELEMENT_TYPE::PINNED,
            0xff,
        ] {
            match classify(&usage(kind, 0)) {
                Err(Error::UnsupportedTypeShape(found)) => assert_eq!(found, kind),
                other => panic!("kind 0x{kind:02x}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn oversized_index() {
        assert!(matches!(
            classify(&usage(ELEMENT_TYPE::CLASS, u64::from(u32::MAX) + 1)),
            Err(Error::Malformed { .. })
        ));
    }
}
