//! Read-only access to raw metadata.
//!
//! [`MetadataStore`] is the contract the type model consumes: typed-handle lookups for every
//! flat table, address lookups for mapped structural records, and the string heap. Reading
//! the binary image that backs it is somebody else's job; [`MemoryStore`] serves already
//! parsed data out of plain vectors and is what the tests and benchmarks build on.
//!
//! # Examples
//!
//! ```rust
//! use il2scope::prelude::*;
//!
//! let mut store = MemoryStore::new();
//! let namespace = store.intern("System");
//! let name = store.intern("Int32");
//! let int32 = store.push_type_definition(RawTypeDefinition {
//!     namespace,
//!     name,
//!     ..Default::default()
//! });
//! let element = store.map_usage(RawTypeUsage::value_type(int32));
//! let array = store.push_usage(RawTypeUsage::sz_array(element));
//!
//! assert_eq!(store.type_usage(array)?.kind, ELEMENT_TYPE::SZARRAY);
//! assert_eq!(store.type_usage_at(element)?.data, u64::from(int32.value()));
//! # Ok::<(), il2scope::Error>(())
//! ```

use std::collections::HashMap;

use crate::{
    metadata::{
        records::{
            RawArrayDescriptor, RawFieldDefinition, RawGenericClass, RawGenericInst,
            RawGenericParameter, RawMethodDefinition, RawParameterDefinition, RawTypeDefinition,
            RawTypeUsage,
        },
        streams::StringHeap,
        token::{
            DataAddress, FieldIndex, GenericParameterIndex, MetadataTable, MethodIndex,
            ParameterIndex, StringIndex, TypeDefIndex, TypeUsageIndex,
        },
    },
    Error, Result,
};

/// Read-only access to the raw records of one image.
///
/// Every lookup is by typed handle or mapped address, and every failure is reported rather than
/// panicking: an index past its table yields [`Error::IndexOutOfRange`], an address with no
/// record (or a record of the wrong kind) yields [`Error::Malformed`].
pub trait MetadataStore {
    /// Reads a row of the type definition table
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the table
    fn type_definition(&self, index: TypeDefIndex) -> Result<RawTypeDefinition>;

    /// Number of rows in the type definition table
    fn type_definition_count(&self) -> usize;

    /// Reads an interned string
    ///
    /// # Errors
    /// Returns an error if the offset is past the heap or does not start a valid string
    fn string(&self, index: StringIndex) -> Result<&str>;

    /// Reads the usage record a type usage index points at
    ///
    /// # Errors
    /// Returns an error if the index is past the pointer table or its address is unmapped
    fn type_usage(&self, index: TypeUsageIndex) -> Result<RawTypeUsage>;

    /// Reads the usage record mapped at `address`
    ///
    /// # Errors
    /// Returns an error if no usage record is mapped at `address`
    fn type_usage_at(&self, address: DataAddress) -> Result<RawTypeUsage>;

    /// Reads the generic class record mapped at `address`
    ///
    /// # Errors
    /// Returns an error if no generic class record is mapped at `address`
    fn generic_class(&self, address: DataAddress) -> Result<RawGenericClass>;

    /// Reads the instantiation record mapped at `address`
    ///
    /// # Errors
    /// Returns an error if no instantiation record is mapped at `address`
    fn generic_instantiation(&self, address: DataAddress) -> Result<RawGenericInst>;

    /// Reads `count` consecutive usage record addresses starting at `address`
    ///
    /// # Errors
    /// Returns an error if no argument list is mapped at `address`, or if it is shorter than `count`
    fn generic_argument_addresses(
        &self,
        address: DataAddress,
        count: u32,
    ) -> Result<Vec<DataAddress>>;

    /// Reads the array descriptor mapped at `address`
    ///
    /// # Errors
    /// Returns an error if no array descriptor is mapped at `address`
    fn array_descriptor(&self, address: DataAddress) -> Result<RawArrayDescriptor>;

    /// Reads a row of the generic parameter table
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the table
    fn generic_parameter(&self, index: GenericParameterIndex) -> Result<RawGenericParameter>;

    /// Reads a row of the field table
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the table
    fn field(&self, index: FieldIndex) -> Result<RawFieldDefinition>;

    /// Reads a row of the method table
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the table
    fn method(&self, index: MethodIndex) -> Result<RawMethodDefinition>;

    /// Reads a row of the parameter table
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the table
    fn parameter(&self, index: ParameterIndex) -> Result<RawParameterDefinition>;
}

/// A structural record mapped at some address of a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedRecord {
    /// A type usage record
    Usage(RawTypeUsage),
    /// A generic class record
    GenericClass(RawGenericClass),
    /// A generic instantiation record
    GenericInst(RawGenericInst),
    /// A list of usage record addresses, the arguments of an instantiation
    ArgumentList(Vec<DataAddress>),
    /// An array descriptor
    Array(RawArrayDescriptor),
}

impl MappedRecord {
    fn kind(&self) -> &'static str {
        match self {
            MappedRecord::Usage(_) => "type usage",
            MappedRecord::GenericClass(_) => "generic class",
            MappedRecord::GenericInst(_) => "generic instantiation",
            MappedRecord::ArgumentList(_) => "argument list",
            MappedRecord::Array(_) => "array descriptor",
        }
    }
}

/// Base of the synthetic address space handed out by [`MemoryStore`]
const ADDRESS_BASE: u64 = 0x1000;
/// Distance between two synthetic addresses
const ADDRESS_STRIDE: u64 = 0x10;

/// An in-memory [`MetadataStore`], built up with the `push_*`, `map_*` and `intern` helpers.
///
/// Flat tables are vectors indexed by their handles; structural records live in a map keyed by
/// synthetic addresses the store allocates itself.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    strings: StringHeap,
    type_definitions: Vec<RawTypeDefinition>,
    type_usages: Vec<DataAddress>,
    fields: Vec<RawFieldDefinition>,
    methods: Vec<RawMethodDefinition>,
    parameters: Vec<RawParameterDefinition>,
    generic_parameters: Vec<RawGenericParameter>,
    mapped: HashMap<DataAddress, MappedRecord>,
    next_address: u64,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        MemoryStore {
            strings: StringHeap::new(),
            type_definitions: Vec::new(),
            type_usages: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            parameters: Vec::new(),
            generic_parameters: Vec::new(),
            mapped: HashMap::new(),
            next_address: ADDRESS_BASE,
        }
    }

    /// Creates a store reading its strings from an existing heap
    #[must_use]
    pub fn with_strings(strings: StringHeap) -> Self {
        MemoryStore {
            strings,
            ..MemoryStore::new()
        }
    }

    /// The string heap backing this store
    #[must_use]
    pub fn strings(&self) -> &StringHeap {
        &self.strings
    }

    /// Interns a string, returning its heap offset
    pub fn intern(&mut self, value: &str) -> StringIndex {
        self.strings.intern(value)
    }

    /// Appends a type definition row
    pub fn push_type_definition(&mut self, record: RawTypeDefinition) -> TypeDefIndex {
        TypeDefIndex::new(push_row(&mut self.type_definitions, record))
    }

    /// Mutable access to an already pushed definition, for wiring up forward references
    pub fn type_definition_mut(&mut self, index: TypeDefIndex) -> Option<&mut RawTypeDefinition> {
        self.type_definitions.get_mut(index.as_usize())
    }

    /// Index the next pushed type definition will receive
    #[must_use]
    pub fn next_type_definition(&self) -> TypeDefIndex {
        TypeDefIndex::new(u32::try_from(self.type_definitions.len()).unwrap_or(u32::MAX))
    }

    /// Appends a field row
    pub fn push_field(&mut self, record: RawFieldDefinition) -> FieldIndex {
        FieldIndex::new(push_row(&mut self.fields, record))
    }

    /// Appends a method row
    pub fn push_method(&mut self, record: RawMethodDefinition) -> MethodIndex {
        MethodIndex::new(push_row(&mut self.methods, record))
    }

    /// Appends a parameter row
    pub fn push_parameter(&mut self, record: RawParameterDefinition) -> ParameterIndex {
        ParameterIndex::new(push_row(&mut self.parameters, record))
    }

    /// Appends a generic parameter row
    pub fn push_generic_parameter(&mut self, record: RawGenericParameter) -> GenericParameterIndex {
        GenericParameterIndex::new(push_row(&mut self.generic_parameters, record))
    }

    /// Hands out a fresh, still unmapped address
    pub fn allocate(&mut self) -> DataAddress {
        let address = DataAddress::new(self.next_address);
        self.next_address += ADDRESS_STRIDE;
        address
    }

    /// Maps `record` at `address`, replacing whatever was mapped there before
    pub fn map_record(&mut self, address: DataAddress, record: MappedRecord) {
        self.mapped.insert(address, record);
    }

    /// Maps a usage record at a fresh address
    pub fn map_usage(&mut self, usage: RawTypeUsage) -> DataAddress {
        self.map_new(MappedRecord::Usage(usage))
    }

    /// Maps a usage record and appends its address to the type usage pointer table
    pub fn push_usage(&mut self, usage: RawTypeUsage) -> TypeUsageIndex {
        let address = self.map_usage(usage);
        self.push_usage_address(address)
    }

    /// Appends an already mapped usage address to the type usage pointer table
    pub fn push_usage_address(&mut self, address: DataAddress) -> TypeUsageIndex {
        TypeUsageIndex::new(push_row(&mut self.type_usages, address))
    }

    /// Maps a generic class record at a fresh address
    pub fn map_generic_class(&mut self, class: RawGenericClass) -> DataAddress {
        self.map_new(MappedRecord::GenericClass(class))
    }

    /// Maps an argument list and the instantiation record pointing at it
    ///
    /// Returns the address of the instantiation record.
    pub fn map_generic_instantiation(&mut self, arguments: &[DataAddress]) -> DataAddress {
        let argv = self.map_new(MappedRecord::ArgumentList(arguments.to_vec()));
        self.map_new(MappedRecord::GenericInst(RawGenericInst {
            argc: u32::try_from(arguments.len()).unwrap_or(u32::MAX),
            argv,
        }))
    }

    /// Maps an array descriptor at a fresh address
    pub fn map_array(&mut self, descriptor: RawArrayDescriptor) -> DataAddress {
        self.map_new(MappedRecord::Array(descriptor))
    }

    fn map_new(&mut self, record: MappedRecord) -> DataAddress {
        let address = self.allocate();
        self.mapped.insert(address, record);
        address
    }

    fn mapped(&self, address: DataAddress, expected: &'static str) -> Result<&MappedRecord> {
        match self.mapped.get(&address) {
            Some(record) => Ok(record),
            None => Err(malformed_error!(
                "No {} record mapped at {}",
                expected,
                address
            )),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn push_row<T>(rows: &mut Vec<T>, record: T) -> u32 {
    let index = u32::try_from(rows.len()).unwrap_or(u32::MAX);
    rows.push(record);
    index
}

fn row<T: Copy>(rows: &[T], index: u32, table: MetadataTable) -> Result<T> {
    match rows.get(index as usize) {
        Some(record) => Ok(*record),
        None => Err(Error::IndexOutOfRange {
            table,
            index: u64::from(index),
            len: rows.len(),
        }),
    }
}

fn wrong_kind(address: DataAddress, expected: &str, found: &MappedRecord) -> Error {
    malformed_error!(
        "Expected a {} record at {}, found a {} record",
        expected,
        address,
        found.kind()
    )
}

impl MetadataStore for MemoryStore {
    fn type_definition(&self, index: TypeDefIndex) -> Result<RawTypeDefinition> {
        row(&self.type_definitions, index.value(), TypeDefIndex::table())
    }

    fn type_definition_count(&self) -> usize {
        self.type_definitions.len()
    }

    fn string(&self, index: StringIndex) -> Result<&str> {
        self.strings.get(index)
    }

    fn type_usage(&self, index: TypeUsageIndex) -> Result<RawTypeUsage> {
        let address = row(&self.type_usages, index.value(), TypeUsageIndex::table())?;
        self.type_usage_at(address)
    }

    fn type_usage_at(&self, address: DataAddress) -> Result<RawTypeUsage> {
        match self.mapped(address, "type usage")? {
            MappedRecord::Usage(usage) => Ok(*usage),
            other => Err(wrong_kind(address, "type usage", other)),
        }
    }

    fn generic_class(&self, address: DataAddress) -> Result<RawGenericClass> {
        match self.mapped(address, "generic class")? {
            MappedRecord::GenericClass(class) => Ok(*class),
            other => Err(wrong_kind(address, "generic class", other)),
        }
    }

    fn generic_instantiation(&self, address: DataAddress) -> Result<RawGenericInst> {
        match self.mapped(address, "generic instantiation")? {
            MappedRecord::GenericInst(inst) => Ok(*inst),
            other => Err(wrong_kind(address, "generic instantiation", other)),
        }
    }

    fn generic_argument_addresses(
        &self,
        address: DataAddress,
        count: u32,
    ) -> Result<Vec<DataAddress>> {
        match self.mapped(address, "argument list")? {
            MappedRecord::ArgumentList(arguments) => {
                let count = count as usize;
                if count > arguments.len() {
                    return Err(Error::IndexOutOfRange {
                        table: MetadataTable::GenericArgument,
                        index: count as u64,
                        len: arguments.len(),
                    });
                }
                Ok(arguments[..count].to_vec())
            }
            other => Err(wrong_kind(address, "argument list", other)),
        }
    }

    fn array_descriptor(&self, address: DataAddress) -> Result<RawArrayDescriptor> {
        match self.mapped(address, "array descriptor")? {
            MappedRecord::Array(descriptor) => Ok(*descriptor),
            other => Err(wrong_kind(address, "array descriptor", other)),
        }
    }

    fn generic_parameter(&self, index: GenericParameterIndex) -> Result<RawGenericParameter> {
        row(
            &self.generic_parameters,
            index.value(),
            GenericParameterIndex::table(),
        )
    }

    fn field(&self, index: FieldIndex) -> Result<RawFieldDefinition> {
        row(&self.fields, index.value(), FieldIndex::table())
    }

    fn method(&self, index: MethodIndex) -> Result<RawMethodDefinition> {
        row(&self.methods, index.value(), MethodIndex::table())
    }

    fn parameter(&self, index: ParameterIndex) -> Result<RawParameterDefinition> {
        row(&self.parameters, index.value(), ParameterIndex::table())
    }
}
