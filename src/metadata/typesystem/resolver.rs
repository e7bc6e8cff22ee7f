//! The type model: resolver and cache in one.
//!
//! [`TypeModel`] is the only place type entities are constructed. Every request first probes
//! the cache; on a miss it classifies the raw record, resolves whatever the record references
//! through the model itself, and only then stores the new entity.
//!
//! # Cycles
//!
//! Definitions reserve their handle before anything they reference is resolved. A definition
//! that derives from itself, or from an instantiation that mentions it (`class Node : Base<Node>`),
//! finds its own reservation on the way down and links to it instead of recursing forever.
//!
//! A definition met while resolving something else is only reserved. Its record is queued and
//! filled once the current entity is done, so a base type chain is walked iteratively and its
//! length never counts against the recursion limit. Only nested usage records do.
//! Usage shapes (instantiations, arrays, pointers) are keyed by their resolved operands, so they
//! are reserved and filled in one step once those operands are known.
//!
//! # Failures
//!
//! Every reservation made by a request is journaled. If any step fails, all of them are withdrawn
//! again, leaving the cache exactly as it was before the request.
//!
//! # Thread Safety
//!
//! Requests that may construct entities are serialized on one resolution lock, held from the
//! first cache probe to the last fill. Reads (`get`, `lookup`, naming) never take it.

use std::sync::Mutex;

use tracing::{debug, trace, warn};

use crate::{
    metadata::{
        members::{FieldBuilder, MemberBuilder, MethodBuilder, TypeLink},
        records::{RawTypeDefinition, RawTypeUsage},
        store::MetadataStore,
        token::{DataAddress, GenericParameterIndex, TypeDefIndex, TypeUsageIndex},
        typesystem::{
            classify, registry::TypeRegistry, ModelConfig, TypeAttributes, TypeEntity, TypeId,
            TypeKey, TypeOrigin, TypeShape, UsageShape,
        },
    },
    Error::{self, MalformedArrayRank, RecursionLimit},
    Result,
};

/// Bookkeeping of one top-level request
struct ResolveContext {
    /// Current nesting of usage records
    depth: usize,
    /// Every reservation made so far, in order
    journal: Vec<(TypeKey, TypeId)>,
    /// Reserved definitions whose entity is still to be filled
    pending: Vec<(TypeDefIndex, TypeId, RawTypeDefinition)>,
}

impl ResolveContext {
    fn new() -> Self {
        ResolveContext {
            depth: 0,
            journal: Vec::new(),
            pending: Vec::new(),
        }
    }
}

/// Result of resolving the whole definition table
#[derive(Debug, Default)]
pub struct DefinitionWalk {
    /// Handles of every definition that resolved, in table order
    pub types: Vec<TypeId>,
    /// Definitions that failed, with the reason
    pub failures: Vec<(TypeDefIndex, Error)>,
}

/// Resolves raw metadata into canonical type entities and owns them.
///
/// # Examples
///
/// ```rust
/// use il2scope::prelude::*;
///
/// let mut store = MemoryStore::new();
/// let namespace = store.intern("N");
/// let name = store.intern("Foo");
/// let foo = store.push_type_definition(RawTypeDefinition {
///     namespace,
///     name,
///     ..Default::default()
/// });
///
/// let model = TypeModel::new(store);
/// let first = model.resolve_definition(foo)?;
/// let second = model.resolve_usage(&RawTypeUsage::definition(foo))?;
///
/// assert_eq!(first, second);
/// assert_eq!(model.lookup(&TypeKey::Definition(foo)), Some(first));
/// # Ok::<(), il2scope::Error>(())
/// ```
pub struct TypeModel<S> {
    store: S,
    config: ModelConfig,
    registry: TypeRegistry,
    resolution: Mutex<()>,
}

impl<S: MetadataStore> TypeModel<S> {
    /// Creates an empty model over `store` with the default configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, ModelConfig::default())
    }

    /// Creates an empty model over `store`
    pub fn with_config(store: S, config: ModelConfig) -> Self {
        TypeModel {
            store,
            config,
            registry: TypeRegistry::new(),
            resolution: Mutex::new(()),
        }
    }

    /// The store this model reads from
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The configuration this model was created with
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Resolves a type definition to its entity, creating it on first request.
    ///
    /// The base type is resolved to a handle; its own members are not walked. Member types are
    /// linked lazily and resolved through [`TypeModel::resolve_link`].
    ///
    /// # Errors
    /// Returns an error if the definition, or anything its base type references, cannot be
    /// read or resolved. The cache is left untouched in that case.
    pub fn resolve_definition(&self, index: TypeDefIndex) -> Result<TypeId> {
        if let Some(id) = self.registry.lookup(&TypeKey::Definition(index)) {
            trace!(%index, %id, "definition cache hit");
            return Ok(id);
        }

        self.transaction(|cx| self.definition(cx, index))
    }

    /// Resolves a usage record to its entity, creating it (and anything it references) on
    /// first request.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedTypeShape`] for discriminants without a resolution strategy,
    /// [`Error::MalformedArrayRank`] for arrays of rank below one, and store errors for missing
    /// records. The cache is left untouched in every case.
    pub fn resolve_usage(&self, usage: &RawTypeUsage) -> Result<TypeId> {
        if let UsageShape::DefinitionRef(index) | UsageShape::Primitive { definition: index, .. } =
            classify(usage)?
        {
            return self.resolve_definition(index);
        }

        self.transaction(|cx| self.usage(cx, usage))
    }

    /// Resolves the usage record at `index` of the type usage table
    ///
    /// # Errors
    /// Returns an error if the record cannot be read or resolved, see [`TypeModel::resolve_usage`]
    pub fn resolve_usage_index(&self, index: TypeUsageIndex) -> Result<TypeId> {
        let usage = self.store.type_usage(index)?;
        self.resolve_usage(&usage)
    }

    /// Resolves the type behind a member's lazy type link, memoizing it in the link
    ///
    /// # Errors
    /// Returns an error if the linked usage record cannot be read or resolved
    pub fn resolve_link(&self, link: &TypeLink) -> Result<TypeId> {
        if let Some(id) = link.get() {
            return Ok(id);
        }

        let id = self.resolve_usage_index(link.usage())?;
        Ok(link.set(id))
    }

    /// Resolves every row of the definition table, skipping the ones that fail
    pub fn resolve_all(&self) -> DefinitionWalk {
        let mut walk = DefinitionWalk::default();
        let count = u32::try_from(self.store.type_definition_count()).unwrap_or(u32::MAX);

        for index in (0..count).map(TypeDefIndex::new) {
            match self.resolve_definition(index) {
                Ok(id) => walk.types.push(id),
                Err(error) => {
                    warn!(%index, %error, "skipping type definition");
                    walk.failures.push((index, error));
                }
            }
        }

        debug!(
            resolved = walk.types.len(),
            failed = walk.failures.len(),
            "definition table resolved"
        );
        walk
    }

    /// Returns the handle of an already constructed entity, without constructing anything
    pub fn lookup(&self, key: &TypeKey) -> Option<TypeId> {
        self.registry.lookup(key)
    }

    /// Reads an entity
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] for handles of another model and
    /// [`Error::ReentrantUnfilledAccess`] for entities still under construction
    pub fn get(&self, id: TypeId) -> Result<&TypeEntity> {
        self.registry.get(id)
    }

    /// Looks up a resolved definition by its namespace-qualified name
    pub fn get_by_fullname(&self, fullname: &str) -> Option<TypeId> {
        self.registry.get_by_fullname(fullname)
    }

    /// Every entity constructed so far, ordered by handle
    pub fn all_types(&self) -> Vec<TypeId> {
        self.registry.all_types()
    }

    /// Number of entities constructed so far
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if nothing has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// The type `id` derives from
    ///
    /// Instantiations report the base of their generic definition.
    ///
    /// # Errors
    /// Returns an error if `id` (or its generic definition) is not a readable entity
    pub fn base_type(&self, id: TypeId) -> Result<Option<TypeId>> {
        match &self.get(id)?.shape {
            TypeShape::Definition { base, .. } => Ok(*base),
            TypeShape::GenericInstance { definition, .. } => self.base_type(*definition),
            _ => Ok(None),
        }
    }

    /// The element of an array, or the pointee of a pointer
    ///
    /// # Errors
    /// Returns an error if `id` is not a readable entity
    pub fn element_type(&self, id: TypeId) -> Result<Option<TypeId>> {
        Ok(self.get(id)?.element_type())
    }

    /// Number of array dimensions, 0 for anything that is not an array
    ///
    /// # Errors
    /// Returns an error if `id` is not a readable entity
    pub fn array_rank(&self, id: TypeId) -> Result<u32> {
        Ok(self.get(id)?.array_rank())
    }

    /// The open generic definition of an instantiation
    ///
    /// # Errors
    /// Returns an error if `id` is not a readable entity
    pub fn generic_definition(&self, id: TypeId) -> Result<Option<TypeId>> {
        Ok(self.get(id)?.generic_definition())
    }

    /// Whether the base type is `System.ValueType`
    ///
    /// # Errors
    /// Returns an error if `id` or its base type is not a readable entity
    pub fn is_value_type(&self, id: TypeId) -> Result<bool> {
        match self.base_type(id)? {
            Some(base) => Ok(self.full_name(base)? == "System.ValueType"),
            None => Ok(false),
        }
    }

    /// Runs one top-level request under the resolution lock, rolling back on failure
    fn transaction<T>(&self, request: impl FnOnce(&mut ResolveContext) -> Result<T>) -> Result<T> {
        let _guard = lock!(self.resolution);
        let mut cx = ResolveContext::new();

        let result = request(&mut cx).and_then(|value| {
            self.complete(&mut cx)?;
            Ok(value)
        });
        if let Err(error) = &result {
            if !cx.journal.is_empty() {
                warn!(
                    reservations = cx.journal.len(),
                    %error,
                    "type resolution failed, rolling back"
                );
            }
            for (key, id) in cx.journal.iter().rev() {
                self.registry.abandon(key, *id);
            }
        }

        result
    }

    /// Runs `step` one nesting level deeper, failing once the configured limit is reached
    fn descend<T>(
        &self,
        cx: &mut ResolveContext,
        step: impl FnOnce(&mut ResolveContext) -> Result<T>,
    ) -> Result<T> {
        if cx.depth >= self.config.max_recursion_depth {
            return Err(RecursionLimit(self.config.max_recursion_depth));
        }

        cx.depth += 1;
        let result = step(cx);
        cx.depth -= 1;
        result
    }

    /// Fills every queued definition, including the ones queued while filling
    fn complete(&self, cx: &mut ResolveContext) -> Result<()> {
        while let Some((index, id, record)) = cx.pending.pop() {
            self.fill_definition(cx, index, id, &record)?;
        }
        Ok(())
    }

    /// Returns the handle of a definition, reserving it and queueing its record on first sight
    fn definition(&self, cx: &mut ResolveContext, index: TypeDefIndex) -> Result<TypeId> {
        let key = TypeKey::Definition(index);
        if let Some(id) = self.registry.probe(&key) {
            trace!(%index, %id, "definition already reserved");
            return Ok(id);
        }

        let record = self.store.type_definition(index)?;

        let id = self.registry.reserve(key.clone());
        cx.journal.push((key, id));
        cx.pending.push((index, id, record));
        debug!(%index, %id, "reserved type definition");

        Ok(id)
    }

    fn fill_definition(
        &self,
        cx: &mut ResolveContext,
        index: TypeDefIndex,
        id: TypeId,
        record: &RawTypeDefinition,
    ) -> Result<()> {
        let namespace = self.store.string(record.namespace)?.to_string();
        let name = self.store.string(record.name)?.to_string();

        let base = match record.parent {
            Some(parent) => {
                let usage = self.store.type_usage(parent)?;
                Some(self.usage(cx, &usage)?)
            }
            None => None,
        };

        let fields = record
            .field_start
            .range(record.field_count)
            .map(|field| FieldBuilder.build(self, id, field))
            .collect::<Result<Vec<_>>>()?;
        let methods = record
            .method_start
            .range(record.method_count)
            .map(|method| MethodBuilder.build(self, id, method))
            .collect::<Result<Vec<_>>>()?;

        self.registry.fill(
            id,
            TypeEntity {
                id,
                origin: TypeOrigin::Definition(index),
                attributes: TypeAttributes::from_raw(record.flags),
                contains_generic_parameters: false,
                shape: TypeShape::Definition {
                    index,
                    namespace,
                    name,
                    base,
                    fields,
                    methods,
                },
            },
        )?;
        debug!(%index, %id, "filled type definition");

        Ok(())
    }

    fn usage(&self, cx: &mut ResolveContext, usage: &RawTypeUsage) -> Result<TypeId> {
        let shape = classify(usage)?;
        trace!(?shape, "dispatching type usage");

        match shape {
            UsageShape::DefinitionRef(index) | UsageShape::Primitive {
                definition: index, ..
            } => self.definition(cx, index),
            UsageShape::GenericInst(class) => {
                self.descend(cx, |cx| self.generic_instance(cx, usage, class))
            }
            UsageShape::Array(descriptor) => {
                self.descend(cx, |cx| self.array(cx, usage, descriptor))
            }
            UsageShape::SzArray(element) => {
                self.descend(cx, |cx| self.sz_array(cx, usage, element))
            }
            UsageShape::Pointer(pointee) => {
                self.descend(cx, |cx| self.pointer(cx, usage, pointee))
            }
            UsageShape::GenericVar { index, method } => {
                self.generic_parameter(cx, usage, index, method)
            }
        }
    }

    fn usage_at(&self, cx: &mut ResolveContext, address: DataAddress) -> Result<TypeId> {
        let usage = self.store.type_usage_at(address)?;
        self.usage(cx, &usage)
    }

    fn generic_instance(
        &self,
        cx: &mut ResolveContext,
        usage: &RawTypeUsage,
        class: DataAddress,
    ) -> Result<TypeId> {
        let class = self.store.generic_class(class)?;
        let definition = self.definition(cx, class.definition)?;

        let inst = self.store.generic_instantiation(class.class_inst)?;
        let arguments = self
            .store
            .generic_argument_addresses(inst.argv, inst.argc)?
            .into_iter()
            .map(|address| self.usage_at(cx, address))
            .collect::<Result<Vec<_>>>()?;

        let mut contains_generic_parameters = false;
        for argument in &arguments {
            contains_generic_parameters |= self.registry.contains_generic_parameters(*argument)?;
        }

        let key = TypeKey::GenericInstance {
            definition,
            arguments: arguments.clone(),
        };
        self.construct(cx, key, |id| TypeEntity {
            id,
            origin: TypeOrigin::Usage(*usage),
            attributes: TypeAttributes::CLASS,
            contains_generic_parameters,
            shape: TypeShape::GenericInstance {
                definition,
                definition_index: class.definition,
                arguments,
            },
        })
    }

    fn array(
        &self,
        cx: &mut ResolveContext,
        usage: &RawTypeUsage,
        descriptor: DataAddress,
    ) -> Result<TypeId> {
        let descriptor = self.store.array_descriptor(descriptor)?;
        let rank = match u32::try_from(descriptor.rank) {
            Ok(rank) if rank >= 1 => rank,
            _ => return Err(MalformedArrayRank(descriptor.rank)),
        };

        let element = self.usage_at(cx, descriptor.element)?;
        self.composite(cx, usage, TypeKey::Array { element, rank }, element, |element| {
            TypeShape::Array {
                element,
                rank,
                sz: false,
            }
        })
    }

    fn sz_array(
        &self,
        cx: &mut ResolveContext,
        usage: &RawTypeUsage,
        element: DataAddress,
    ) -> Result<TypeId> {
        let element = self.usage_at(cx, element)?;
        self.composite(cx, usage, TypeKey::SzArray { element }, element, |element| {
            TypeShape::Array {
                element,
                rank: 1,
                sz: true,
            }
        })
    }

    fn pointer(
        &self,
        cx: &mut ResolveContext,
        usage: &RawTypeUsage,
        pointee: DataAddress,
    ) -> Result<TypeId> {
        let pointee = self.usage_at(cx, pointee)?;
        self.composite(cx, usage, TypeKey::Pointer { pointee }, pointee, |pointee| {
            TypeShape::Pointer { pointee }
        })
    }

    fn generic_parameter(
        &self,
        cx: &mut ResolveContext,
        usage: &RawTypeUsage,
        index: GenericParameterIndex,
        method: bool,
    ) -> Result<TypeId> {
        let key = TypeKey::GenericParameter { index, method };
        if let Some(id) = self.registry.probe(&key) {
            trace!(%index, %id, "generic parameter cache hit");
            return Ok(id);
        }

        let record = self.store.generic_parameter(index)?;
        let position = record.num;

        self.construct(cx, key, |id| TypeEntity {
            id,
            origin: TypeOrigin::Usage(*usage),
            attributes: TypeAttributes::CLASS,
            contains_generic_parameters: true,
            shape: TypeShape::GenericParameter {
                index,
                position,
                method,
                name: placeholder_name(position),
            },
        })
    }

    /// Constructs an array or pointer around an already resolved inner type
    fn composite(
        &self,
        cx: &mut ResolveContext,
        usage: &RawTypeUsage,
        key: TypeKey,
        inner: TypeId,
        shape: impl FnOnce(TypeId) -> TypeShape,
    ) -> Result<TypeId> {
        let contains_generic_parameters = self.registry.contains_generic_parameters(inner)?;

        self.construct(cx, key, |id| TypeEntity {
            id,
            origin: TypeOrigin::Usage(*usage),
            attributes: TypeAttributes::empty(),
            contains_generic_parameters,
            shape: shape(inner),
        })
    }

    /// Returns the entity for `key`, or reserves and fills it in one step
    fn construct(
        &self,
        cx: &mut ResolveContext,
        key: TypeKey,
        build: impl FnOnce(TypeId) -> TypeEntity,
    ) -> Result<TypeId> {
        if let Some(id) = self.registry.probe(&key) {
            trace!(?key, %id, "type usage cache hit");
            return Ok(id);
        }

        let id = self.registry.reserve(key.clone());
        debug!(?key, %id, "constructing type");
        cx.journal.push((key, id));
        self.registry.fill(id, build(id))?;

        Ok(id)
    }
}

/// Placeholder name of the generic parameter at `position`: `T`, `T1`, `T2`, ...
fn placeholder_name(position: u16) -> String {
    if position == 0 {
        "T".to_string()
    } else {
        format!("T{position}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            records::{RawArrayDescriptor, RawGenericParameter, RawTypeDefinition, TYPE_ATTRIBUTE},
            store::MemoryStore,
        },
        test::factories::{definition, ModelFixture},
    };

    #[test]
    fn placeholder_names() {
        assert_eq!(placeholder_name(0), "T");
        assert_eq!(placeholder_name(1), "T1");
        assert_eq!(placeholder_name(12), "T12");
    }

    #[test]
    fn definition_identity_is_stable() {
        let mut store = MemoryStore::new();
        let foo = definition(&mut store, "N", "Foo", TYPE_ATTRIBUTE::PUBLIC);
        let model = TypeModel::new(store);

        let first = model.resolve_definition(foo).unwrap();
        let second = model.resolve_definition(foo).unwrap();
        let through_usage = model
            .resolve_usage(&RawTypeUsage::definition(foo))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first, through_usage);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn self_derived_definition_terminates() {
        let mut store = MemoryStore::new();
        let index = store.next_type_definition();
        let parent = store.push_usage(RawTypeUsage::definition(index));
        let name = store.intern("Loop");
        store.push_type_definition(RawTypeDefinition {
            name,
            parent: Some(parent),
            ..Default::default()
        });

        let model = TypeModel::new(store);
        let id = model.resolve_definition(index).unwrap();
        assert_eq!(model.base_type(id).unwrap(), Some(id));
    }

    #[test]
    fn missing_definition_leaves_cache_untouched() {
        let model = TypeModel::new(MemoryStore::new());
        assert!(matches!(
            model.resolve_definition(TypeDefIndex::new(0)),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(model.is_empty());
    }

    #[test]
    fn failed_base_rolls_back_reservation() {
        let mut store = MemoryStore::new();
        let broken = store.push_usage(RawTypeUsage {
            kind: crate::metadata::records::ELEMENT_TYPE::FNPTR,
            ..Default::default()
        });
        let index = definition(&mut store, "N", "Broken", 0);
        store.type_definition_mut(index).unwrap().parent = Some(broken);

        let model = TypeModel::new(store);
        assert!(matches!(
            model.resolve_definition(index),
            Err(Error::UnsupportedTypeShape(_))
        ));
        assert!(model.is_empty());
        assert_eq!(model.lookup(&TypeKey::Definition(index)), None);
        assert_eq!(model.get_by_fullname("N.Broken"), None);
    }

    #[test]
    fn rank_is_checked_before_element() {
        let mut store = MemoryStore::new();
        let descriptor = store.map_array(RawArrayDescriptor {
            element: DataAddress::new(0xbad),
            rank: 0,
            ..Default::default()
        });

        let model = TypeModel::new(store);
        assert!(matches!(
            model.resolve_usage(&RawTypeUsage::array(descriptor)),
            Err(Error::MalformedArrayRank(0))
        ));
    }

    #[test]
    fn recursion_limit() {
        let mut store = MemoryStore::new();
        let address = store.allocate();
        store.map_record(
            address,
            crate::metadata::store::MappedRecord::Usage(RawTypeUsage::pointer(address)),
        );

        let model = TypeModel::with_config(store, ModelConfig::default().with_max_recursion_depth(16));
        assert!(matches!(
            model.resolve_usage(&RawTypeUsage::pointer(address)),
            Err(Error::RecursionLimit(16))
        ));
        assert!(model.is_empty());
    }

    #[test]
    fn oversized_argument_count_is_an_error() {
        let mut store = MemoryStore::new();
        let list = definition(&mut store, "", "List", 0);
        let argv = store.allocate();
        store.map_record(
            argv,
            crate::metadata::store::MappedRecord::ArgumentList(Vec::new()),
        );
        let class_inst = store.allocate();
        store.map_record(
            class_inst,
            crate::metadata::store::MappedRecord::GenericInst(
                crate::metadata::records::RawGenericInst {
                    argc: u32::MAX,
                    argv,
                },
            ),
        );
        let class = store.map_generic_class(crate::metadata::records::RawGenericClass {
            definition: list,
            class_inst,
        });

        let model = TypeModel::new(store);
        assert!(matches!(
            model.resolve_usage(&RawTypeUsage::generic_instance(class)),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(model.is_empty());
    }

    #[test]
    fn deep_hierarchy_resolves_from_most_derived() {
        let mut store = MemoryStore::new();
        let mut parent = None;
        let mut last = TypeDefIndex::new(0);
        for i in 0..150 {
            last = definition(&mut store, "Deep", &format!("T{i}"), 0);
            store.type_definition_mut(last).unwrap().parent = parent;
            parent = Some(store.push_usage(RawTypeUsage::definition(last)));
        }

        let model = TypeModel::new(store);
        let id = model.resolve_definition(last).unwrap();
        assert_eq!(model.len(), 150);

        let mut depth = 0;
        let mut current = id;
        while let Some(base) = model.base_type(current).unwrap() {
            current = base;
            depth += 1;
        }
        assert_eq!(depth, 149);
        assert_eq!(model.full_name(current).unwrap(), "Deep.T0");
        assert!(model.resolve_all().failures.is_empty());
    }

    #[test]
    fn generic_parameter_placeholder() {
        let mut store = MemoryStore::new();
        let name = store.intern("TValue");
        let index = store.push_generic_parameter(RawGenericParameter {
            owner: 0,
            name,
            num: 1,
            flags: 0,
        });

        let model = TypeModel::new(store);
        let usage = RawTypeUsage::generic_parameter(index, false);
        let id = model.resolve_usage(&usage).unwrap();
        let entity = model.get(id).unwrap();

        assert!(entity.contains_generic_parameters);
        assert!(entity.is_generic_parameter());
        assert!(entity.is_class());
        assert_eq!(entity.element_type(), None);
        assert_eq!(model.base_type(id).unwrap(), None);
        assert_eq!(model.name(id).unwrap(), "T1");
        assert_eq!(model.resolve_usage(&usage).unwrap(), id);

        let method_level = model
            .resolve_usage(&RawTypeUsage::generic_parameter(index, true))
            .unwrap();
        assert_ne!(method_level, id);
    }

    #[test]
    fn fixture_list_of_int() {
        let fixture = ModelFixture::new();
        let model = TypeModel::new(fixture.store);

        let id = model.resolve_usage(&fixture.list_of_int32).unwrap();
        let entity = model.get(id).unwrap();
        assert!(entity.is_generic_instance());
        assert!(!entity.contains_generic_parameters);
        assert_eq!(entity.generic_arguments().len(), 1);
        assert_eq!(
            model.generic_definition(id).unwrap(),
            model.get_by_fullname("System.Collections.Generic.List`1")
        );
    }
}
