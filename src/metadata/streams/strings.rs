//! Interned identifier strings.
//!
//! Names and namespaces are stored the way the binary format stores them: one blob of UTF-8,
//! NUL-terminated strings addressed by byte offset. Offset 0 always holds the empty string.

use std::{collections::HashMap, ffi::CStr};

use crate::{
    metadata::token::{MetadataTable, StringIndex},
    Error, Result,
};

/// An owned string heap, addressed by [`StringIndex`] byte offsets.
///
/// # Examples
///
/// ```rust
/// use il2scope::metadata::streams::StringHeap;
///
/// let mut heap = StringHeap::new();
/// let hello = heap.intern("Hello");
/// assert_eq!(heap.get(hello)?, "Hello");
/// assert_eq!(heap.intern("Hello"), hello);
/// # Ok::<(), il2scope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StringHeap {
    data: Vec<u8>,
    offsets: HashMap<String, StringIndex>,
}

impl StringHeap {
    /// Creates a heap holding only the empty string at offset 0
    #[must_use]
    pub fn new() -> Self {
        let mut offsets = HashMap::new();
        offsets.insert(String::new(), StringIndex::new(0));

        StringHeap {
            data: vec![0],
            offsets,
        }
    }

    /// Creates a heap from a raw blob, as it would be read out of a binary image
    ///
    /// # Errors
    /// Returns an error if the blob is empty or does not start with the empty string
    pub fn from(data: &[u8]) -> Result<Self> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Provided string heap is empty"));
        }

        Ok(StringHeap {
            data: data.to_vec(),
            offsets: HashMap::new(),
        })
    }

    /// Appends `value` to the heap, or returns the offset it already lives at
    ///
    /// Interior NUL bytes terminate the stored string early, as they would in the binary format.
    pub fn intern(&mut self, value: &str) -> StringIndex {
        if let Some(index) = self.offsets.get(value) {
            return *index;
        }

        let index = StringIndex::new(u32::try_from(self.data.len()).unwrap_or(u32::MAX));
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
        self.offsets.insert(value.to_string(), index);
        index
    }

    /// Reads the string starting at `index`
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if the offset lies past the heap, or a malformed error
    /// if the bytes there are not a terminated UTF-8 string
    pub fn get(&self, index: StringIndex) -> Result<&str> {
        let offset = index.as_usize();
        if offset >= self.data.len() {
            return Err(Error::IndexOutOfRange {
                table: MetadataTable::String,
                index: u64::from(index.value()),
                len: self.data.len(),
            });
        }

        match CStr::from_bytes_until_nul(&self.data[offset..]) {
            Ok(result) => match result.to_str() {
                Ok(result) => Ok(result),
                Err(_) => Err(malformed_error!("Invalid string at index - {}", offset)),
            },
            Err(_) => Err(malformed_error!("Invalid string at index - {}", offset)),
        }
    }

    /// Size of the blob in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap only holds the empty string
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() <= 1
    }
}

impl Default for StringHeap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data: [u8; 32] = [
            0x00,
            0x3c, 0x4d, 0x61, 0x69, 0x6e, 0x3e, 0x24, 0x00,
            0x53, 0x79, 0x73, 0x74, 0x65, 0x6d, 0x00,
            0x3c, 0x4d, 0x6f, 0x64, 0x75, 0x6c, 0x65, 0x3e, 0x00,
            0x4c, 0x69, 0x73, 0x74, 0x60, 0x31, 0x00,
        ];

        let heap = StringHeap::from(&data).unwrap();

        assert_eq!(heap.get(StringIndex::new(0)).unwrap(), "");
        assert_eq!(heap.get(StringIndex::new(1)).unwrap(), "<Main>$");
        assert_eq!(heap.get(StringIndex::new(9)).unwrap(), "System");
        assert_eq!(heap.get(StringIndex::new(16)).unwrap(), "<Module>");
        assert_eq!(heap.get(StringIndex::new(25)).unwrap(), "List`1");
        // Offsets into the middle of a string are valid and read its tail
        assert_eq!(heap.get(StringIndex::new(12)).unwrap(), "tem");
    }

    #[test]
    fn from_rejects_missing_empty_string() {
        assert!(StringHeap::from(&[]).is_err());
        assert!(StringHeap::from(&[b'A', 0]).is_err());
    }

    #[test]
    fn intern_dedupes() {
        let mut heap = StringHeap::new();
        assert!(heap.is_empty());

        let a = heap.intern("Int32");
        let b = heap.intern("System");
        let c = heap.intern("Int32");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(a, StringIndex::new(1));
        assert_eq!(b, StringIndex::new(7));
        assert_eq!(heap.intern(""), StringIndex::new(0));
        assert!(!heap.is_empty());
        assert_eq!(heap.len(), 14);
    }

    #[test]
    fn get_out_of_range() {
        let heap = StringHeap::new();
        match heap.get(StringIndex::new(4)) {
            Err(Error::IndexOutOfRange { table, index, len }) => {
                assert_eq!(table, MetadataTable::String);
                assert_eq!(index, 4);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn get_unterminated() {
        let heap = StringHeap::from(&[0, b'A', b'B']).unwrap();
        assert!(matches!(
            heap.get(StringIndex::new(1)),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn get_invalid_utf8() {
        let heap = StringHeap::from(&[0, 0xff, 0xfe, 0]).unwrap();
        assert!(matches!(
            heap.get(StringIndex::new(1)),
            Err(Error::Malformed { .. })
        ));
    }
}
