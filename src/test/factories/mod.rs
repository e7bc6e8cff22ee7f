//! Factories for in-memory metadata used across unit tests.

use crate::metadata::{
    records::{RawGenericClass, RawTypeDefinition, RawTypeUsage, ELEMENT_TYPE, TYPE_ATTRIBUTE},
    store::MemoryStore,
    token::{DataAddress, TypeDefIndex},
};

/// Pushes a definition without parent or members
pub fn definition(store: &mut MemoryStore, namespace: &str, name: &str, flags: u32) -> TypeDefIndex {
    let namespace = store.intern(namespace);
    let name = store.intern(name);
    store.push_type_definition(RawTypeDefinition {
        namespace,
        name,
        flags,
        ..Default::default()
    })
}

/// Pushes a definition deriving from `parent`
pub fn derived(
    store: &mut MemoryStore,
    namespace: &str,
    name: &str,
    flags: u32,
    parent: TypeDefIndex,
) -> TypeDefIndex {
    let parent = store.push_usage(RawTypeUsage::definition(parent));
    let index = definition(store, namespace, name, flags);
    if let Some(record) = store.type_definition_mut(index) {
        record.parent = Some(parent);
    }
    index
}

/// Maps a generic instantiation of `definition` over already mapped argument usages
pub fn instantiate(
    store: &mut MemoryStore,
    definition: TypeDefIndex,
    arguments: &[DataAddress],
) -> RawTypeUsage {
    let class_inst = store.map_generic_instantiation(arguments);
    let class = store.map_generic_class(RawGenericClass {
        definition,
        class_inst,
    });
    RawTypeUsage::generic_instance(class)
}

/// A small corlib: the root types, two primitives and two generic collections
pub struct ModelFixture {
    pub store: MemoryStore,
    pub object: TypeDefIndex,
    pub value_type: TypeDefIndex,
    pub int32: TypeDefIndex,
    pub string: TypeDefIndex,
    pub list: TypeDefIndex,
    pub dictionary: TypeDefIndex,
    /// `List<Int32>`
    pub list_of_int32: RawTypeUsage,
    /// `Dictionary<String, List<Int32>>`
    pub dictionary_of_string_list: RawTypeUsage,
}

impl ModelFixture {
    pub fn new() -> Self {
        let mut store = MemoryStore::new();
        let public = TYPE_ATTRIBUTE::PUBLIC;
        let sealed = TYPE_ATTRIBUTE::PUBLIC | TYPE_ATTRIBUTE::SEALED | TYPE_ATTRIBUTE::SERIALIZABLE;

        let object = definition(&mut store, "System", "Object", public);
        let value_type = derived(
            &mut store,
            "System",
            "ValueType",
            public | TYPE_ATTRIBUTE::ABSTRACT,
            object,
        );
        let int32 = derived(&mut store, "System", "Int32", sealed, value_type);
        let string = derived(&mut store, "System", "String", sealed, object);
        let list = derived(
            &mut store,
            "System.Collections.Generic",
            "List`1",
            public,
            object,
        );
        let dictionary = derived(
            &mut store,
            "System.Collections.Generic",
            "Dictionary`2",
            public,
            object,
        );

        let int32_usage = store.map_usage(RawTypeUsage::primitive(ELEMENT_TYPE::I4, int32));
        let string_usage = store.map_usage(RawTypeUsage::primitive(ELEMENT_TYPE::STRING, string));

        let list_of_int32 = instantiate(&mut store, list, &[int32_usage]);
        let list_usage = store.map_usage(list_of_int32);
        let dictionary_of_string_list =
            instantiate(&mut store, dictionary, &[string_usage, list_usage]);

        ModelFixture {
            store,
            object,
            value_type,
            int32,
            string,
            list,
            dictionary,
            list_of_int32,
            dictionary_of_string_list,
        }
    }
}
