use thiserror::Error;

use crate::metadata::{token::MetadataTable, typesystem::TypeId};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Malformed input
/// - [`Error::IndexOutOfRange`] - A definition, member or usage index exceeds its table
/// - [`Error::UnsupportedTypeShape`] - A usage record carries a discriminant the model does not handle
/// - [`Error::MalformedArrayRank`] - An array descriptor declares a rank below one
/// - [`Error::Malformed`] - Any other structural damage (unmapped addresses, invalid strings)
/// - [`Error::RecursionLimit`] - A raw address chain nests deeper than the configured limit
///
/// ## Programmer errors
/// - [`Error::ReentrantUnfilledAccess`] - A reserved entity was read before it was filled
/// - [`Error::TypeNotFound`] - A handle does not belong to this model
///
/// None of these are fatal to the model: the caller may skip the offending type or member and
/// continue with others.
///
/// # Examples
///
/// ```rust
/// use il2scope::{
///     metadata::{store::MemoryStore, token::TypeDefIndex},
///     Error, TypeModel,
/// };
///
/// let model = TypeModel::new(MemoryStore::new());
/// match model.resolve_definition(TypeDefIndex::new(7)) {
///     Err(Error::IndexOutOfRange { index, .. }) => assert_eq!(index, 7),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be interpreted.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An index does not address a row of its table.
    ///
    /// The resolution request is abandoned and the cache is left untouched.
    #[error("Index {index} is out of range for the {table} table ({len} entries)")]
    IndexOutOfRange {
        /// The table the index was meant for
        table: MetadataTable,
        /// The offending index
        index: u64,
        /// Number of rows the table holds
        len: usize,
    },

    /// A type usage record carries a discriminant that has no resolution strategy.
    ///
    /// The associated value is the raw discriminant byte.
    #[error("Unsupported type usage shape - 0x{0:02x}")]
    UnsupportedTypeShape(u8),

    /// An array descriptor declares a rank of zero or less.
    #[error("Malformed array rank - {0}")]
    MalformedArrayRank(i32),

    /// A reserved entity was read before the resolver filled it.
    ///
    /// This only happens when a consumer dereferences a handle obtained from a cache probe while
    /// another request is still constructing it, or after that request was rolled back.
    #[error("Type {0} was read before it was filled")]
    ReentrantUnfilledAccess(TypeId),

    /// The handle does not belong to this type model.
    #[error("Failed to find type in TypeModel - {0}")]
    TypeNotFound(TypeId),

    /// Maximum recursion depth reached while following nested usage records.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
