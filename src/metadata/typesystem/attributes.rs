use bitflags::bitflags;

use crate::metadata::records::TYPE_ATTRIBUTE;

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
    /// Semantic attributes of a resolved type
    ///
    /// Unlike the raw `TYPE_ATTRIBUTE` word these are independent bits, so a set can be tested
    /// with `contains` without masking.
    pub struct TypeAttributes: u32 {
        /// Visible outside its image
        const PUBLIC = 0x0001;
        /// Cannot be instantiated
        const ABSTRACT = 0x0002;
        /// Cannot be derived from
        const SEALED = 0x0004;
        /// Declared as an interface
        const INTERFACE = 0x0008;
        /// Anything not declared as an interface
        const CLASS = 0x0010;
        /// Marked serializable
        const SERIALIZABLE = 0x0020;
    }
}

impl TypeAttributes {
    /// Maps a raw definition flag word to its semantic attributes.
    ///
    /// Bits are tested in a fixed order: serializable, visibility, abstract, sealed, interface.
    /// Visibility only counts as public when the visibility field equals `PUBLIC`; nested
    /// visibilities do not. Afterwards every type that is not an interface is marked as a class.
    /// Value types, enums and delegates are not told apart from classes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use il2scope::metadata::{records::TYPE_ATTRIBUTE, typesystem::TypeAttributes};
    ///
    /// assert_eq!(TypeAttributes::from_raw(0), TypeAttributes::CLASS);
    /// assert_eq!(
    ///     TypeAttributes::from_raw(TYPE_ATTRIBUTE::INTERFACE),
    ///     TypeAttributes::INTERFACE
    /// );
    /// ```
    #[must_use]
    pub fn from_raw(flags: u32) -> Self {
        let mut attributes = TypeAttributes::empty();

        if flags & TYPE_ATTRIBUTE::SERIALIZABLE != 0 {
            attributes |= TypeAttributes::SERIALIZABLE;
        }
        if flags & TYPE_ATTRIBUTE::VISIBILITY_MASK == TYPE_ATTRIBUTE::PUBLIC {
            attributes |= TypeAttributes::PUBLIC;
        }
        if flags & TYPE_ATTRIBUTE::ABSTRACT != 0 {
            attributes |= TypeAttributes::ABSTRACT;
        }
        if flags & TYPE_ATTRIBUTE::SEALED != 0 {
            attributes |= TypeAttributes::SEALED;
        }
        if flags & TYPE_ATTRIBUTE::INTERFACE != 0 {
            attributes |= TypeAttributes::INTERFACE;
        }

        if !attributes.contains(TypeAttributes::INTERFACE) {
            attributes |= TypeAttributes::CLASS;
        }

        attributes
    }
}
