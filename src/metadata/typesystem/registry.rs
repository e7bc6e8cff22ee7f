//! Arena and identity index backing a [`super::TypeModel`].
//!
//! Entities live in an append-only arena of slots; a [`TypeId`] is a position in it. Each slot
//! is reserved before its entity exists and filled exactly once afterwards, which is what lets
//! a type refer to itself while it is still being built.
//!
//! # Thread Safety
//!
//! - Lock-free append-only storage for slots (`boxcar::Vec`)
//! - Concurrent hash maps for the key and full-name indices (`DashMap`)
//! - One-shot fill latches per slot (`OnceLock`)
//!
//! Reads never block. Reserving, filling and abandoning are only done by the resolver while it
//! holds its resolution lock.

use std::sync::OnceLock;

use dashmap::DashMap;

use crate::{
    metadata::typesystem::{TypeEntity, TypeId, TypeKey, TypeShape},
    Error::{ReentrantUnfilledAccess, TypeNotFound},
    Result,
};

/// One arena slot: the identity it was reserved for, and the entity once it is filled
struct TypeSlot {
    key: TypeKey,
    entity: OnceLock<TypeEntity>,
}

/// Storage for every entity a model creates, indexed by structural identity
pub(crate) struct TypeRegistry {
    slots: boxcar::Vec<TypeSlot>,
    keys: DashMap<TypeKey, TypeId>,
    fullnames: DashMap<String, TypeId>,
}

impl TypeRegistry {
    pub(crate) fn new() -> Self {
        TypeRegistry {
            slots: boxcar::Vec::new(),
            keys: DashMap::new(),
            fullnames: DashMap::new(),
        }
    }

    /// Returns the handle reserved for `key`, whether or not it has been filled yet
    pub(crate) fn probe(&self, key: &TypeKey) -> Option<TypeId> {
        self.keys.get(key).map(|entry| *entry.value())
    }

    /// Returns the handle for `key` only once its entity is readable
    pub(crate) fn lookup(&self, key: &TypeKey) -> Option<TypeId> {
        let id = self.probe(key)?;
        if self.is_filled(id) {
            Some(id)
        } else {
            None
        }
    }

    /// Claims a fresh slot for `key` and publishes the handle in the key index
    pub(crate) fn reserve(&self, key: TypeKey) -> TypeId {
        let id = TypeId::new(self.slots.push(TypeSlot {
            key: key.clone(),
            entity: OnceLock::new(),
        }));
        self.keys.insert(key, id);
        id
    }

    /// Stores the finished entity in its reserved slot
    ///
    /// # Errors
    /// Returns an error if `id` was never reserved, or if the slot was already filled
    pub(crate) fn fill(&self, id: TypeId, entity: TypeEntity) -> Result<()> {
        let slot = self.slot(id)?;

        let fullname = match &entity.shape {
            TypeShape::Definition {
                namespace, name, ..
            } => Some(qualify(namespace, name)),
            _ => None,
        };

        if slot.entity.set(entity).is_err() {
            return Err(malformed_error!("Type {} was filled twice", id));
        }

        if let Some(fullname) = fullname {
            self.fullnames.entry(fullname).or_insert(id);
        }

        Ok(())
    }

    /// Withdraws a reservation made by a request that failed
    ///
    /// The slot itself stays in the arena, but nothing indexes it any more; a later request for
    /// the same key reserves a new one. The arena cannot shrink, so every rolled-back request
    /// leaks its slots (filled ones included) for the lifetime of the model. That is bounded by
    /// the number of failing requests against a finite metadata image.
    pub(crate) fn abandon(&self, key: &TypeKey, id: TypeId) {
        self.keys.remove_if(key, |_, existing| *existing == id);

        if let Ok(TypeShape::Definition {
            namespace, name, ..
        }) = self.get(id).map(|entity| &entity.shape)
        {
            self.fullnames
                .remove_if(&qualify(namespace, name), |_, existing| *existing == id);
        }
    }

    /// Reads a filled entity
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] for foreign handles and
    /// [`crate::Error::ReentrantUnfilledAccess`] for slots that are reserved but not yet filled
    pub(crate) fn get(&self, id: TypeId) -> Result<&TypeEntity> {
        self.slot(id)?
            .entity
            .get()
            .ok_or(ReentrantUnfilledAccess(id))
    }

    pub(crate) fn is_filled(&self, id: TypeId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|slot| slot.entity.get().is_some())
    }

    /// Whether `id` contains unresolved generic parameters
    ///
    /// Reserved definitions are still answerable: a definition never contains generic
    /// parameters and a placeholder always does, whatever their entity ends up holding.
    pub(crate) fn contains_generic_parameters(&self, id: TypeId) -> Result<bool> {
        let slot = self.slot(id)?;
        if let Some(entity) = slot.entity.get() {
            return Ok(entity.contains_generic_parameters);
        }

        match slot.key {
            TypeKey::Definition(_) => Ok(false),
            TypeKey::GenericParameter { .. } => Ok(true),
            _ => Err(ReentrantUnfilledAccess(id)),
        }
    }

    pub(crate) fn get_by_fullname(&self, fullname: &str) -> Option<TypeId> {
        self.fullnames.get(fullname).map(|entry| *entry.value())
    }

    /// Every live, filled entity, ordered by handle
    pub(crate) fn all_types(&self) -> Vec<TypeId> {
        let mut types: Vec<TypeId> = self
            .keys
            .iter()
            .map(|entry| *entry.value())
            .filter(|id| self.is_filled(*id))
            .collect();
        types.sort_unstable();
        types
    }

    /// Number of live entities, reserved or filled
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    fn slot(&self, id: TypeId) -> Result<&TypeSlot> {
        self.slots.get(id.index()).ok_or(TypeNotFound(id))
    }
}

/// Joins a namespace and a name, leaving out the separator for the global namespace
pub(crate) fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            token::{GenericParameterIndex, TypeDefIndex},
            typesystem::{TypeAttributes, TypeOrigin},
        },
        Error,
    };

    fn definition(id: TypeId, index: u32, namespace: &str, name: &str) -> TypeEntity {
        TypeEntity {
            id,
            origin: TypeOrigin::Definition(TypeDefIndex::new(index)),
            attributes: TypeAttributes::CLASS,
            contains_generic_parameters: false,
            shape: TypeShape::Definition {
                index: TypeDefIndex::new(index),
                namespace: namespace.to_string(),
                name: name.to_string(),
                base: None,
                fields: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    #[test]
    fn reserve_then_fill() {
        let registry = TypeRegistry::new();
        let key = TypeKey::Definition(TypeDefIndex::new(0));

        let id = registry.reserve(key.clone());
        assert_eq!(registry.probe(&key), Some(id));
        assert_eq!(registry.lookup(&key), None);
        assert!(matches!(
            registry.get(id),
            Err(Error::ReentrantUnfilledAccess(unfilled)) if unfilled == id
        ));

        registry.fill(id, definition(id, 0, "N", "Foo")).unwrap();
        assert_eq!(registry.lookup(&key), Some(id));
        assert_eq!(registry.get(id).unwrap().id, id);
        assert_eq!(registry.get_by_fullname("N.Foo"), Some(id));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all_types(), vec![id]);
    }

    #[test]
    fn fill_twice_fails() {
        let registry = TypeRegistry::new();
        let id = registry.reserve(TypeKey::Definition(TypeDefIndex::new(0)));

        registry.fill(id, definition(id, 0, "", "Foo")).unwrap();
        assert!(registry.fill(id, definition(id, 0, "", "Foo")).is_err());
        assert_eq!(registry.get_by_fullname("Foo"), Some(id));
    }

    #[test]
    fn foreign_handle() {
        let registry = TypeRegistry::new();
        assert!(matches!(
            registry.get(TypeId::new(5)),
            Err(Error::TypeNotFound(_))
        ));
        assert!(!registry.is_filled(TypeId::new(5)));
    }

    #[test]
    fn abandon_withdraws_key_and_fullname() {
        let registry = TypeRegistry::new();
        let key = TypeKey::Definition(TypeDefIndex::new(1));
        let id = registry.reserve(key.clone());
        registry.fill(id, definition(id, 1, "N", "Bar")).unwrap();

        registry.abandon(&key, id);
        assert_eq!(registry.probe(&key), None);
        assert_eq!(registry.get_by_fullname("N.Bar"), None);
        assert!(registry.all_types().is_empty());

        let again = registry.reserve(key.clone());
        assert_ne!(again, id);
        assert_eq!(registry.probe(&key), Some(again));

        // The withdrawn slot still occupies the arena
        assert!(registry.is_filled(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn abandon_keeps_newer_reservation() {
        let registry = TypeRegistry::new();
        let key = TypeKey::Definition(TypeDefIndex::new(2));
        let stale = registry.reserve(key.clone());
        let fresh = registry.reserve(key.clone());

        registry.abandon(&key, stale);
        assert_eq!(registry.probe(&key), Some(fresh));
    }

    #[test]
    fn generic_parameters_of_reserved_slots() {
        let registry = TypeRegistry::new();
        let definition = registry.reserve(TypeKey::Definition(TypeDefIndex::new(0)));
        let parameter = registry.reserve(TypeKey::GenericParameter {
            index: GenericParameterIndex::new(0),
            method: false,
        });
        let pointer = registry.reserve(TypeKey::Pointer {
            pointee: definition,
        });

        assert!(!registry.contains_generic_parameters(definition).unwrap());
        assert!(registry.contains_generic_parameters(parameter).unwrap());
        assert!(matches!(
            registry.contains_generic_parameters(pointer),
            Err(Error::ReentrantUnfilledAccess(_))
        ));
    }

    #[test]
    fn qualify_names() {
        assert_eq!(qualify("N", "Foo"), "N.Foo");
        assert_eq!(qualify("", "Foo"), "Foo");
    }
}
