//! Record storage behind a create/list/update/delete interface
//!
//! [`InMemoryRepository`] keeps records in insertion order so listings read
//! the way they were entered. A persistent backend only has to implement
//! [`Repository`].

use crate::error::RegistryError;
use indexmap::IndexMap;
use oir_model::{
    Correspondence, CorrespondenceId, Document, DocumentId, Member, MemberId, Union, UnionCode,
    Workflow, WorkflowId,
};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Record with a unique key
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Name used in error messages
    const KIND: &'static str;

    type Key: Clone + Eq + Hash + Display + Debug + Send + Sync;

    fn key(&self) -> Self::Key;
}

impl Entity for Union {
    const KIND: &'static str = "union";
    type Key = UnionCode;

    fn key(&self) -> UnionCode {
        self.code
    }
}

impl Entity for Document {
    const KIND: &'static str = "document";
    type Key = DocumentId;

    fn key(&self) -> DocumentId {
        self.id
    }
}

impl Entity for Member {
    const KIND: &'static str = "member";
    type Key = MemberId;

    fn key(&self) -> MemberId {
        self.id
    }
}

impl Entity for Workflow {
    const KIND: &'static str = "workflow";
    type Key = WorkflowId;

    fn key(&self) -> WorkflowId {
        self.id
    }
}

impl Entity for Correspondence {
    const KIND: &'static str = "correspondence";
    type Key = CorrespondenceId;

    fn key(&self) -> CorrespondenceId {
        self.id
    }
}

/// Storage for one record type
pub trait Repository<T: Entity>: Send + Sync + Debug {
    /// Insert a new record; fails if the key is taken
    fn create(&self, item: T) -> Result<T, RegistryError>;

    fn get(&self, key: &T::Key) -> Option<T>;

    fn contains(&self, key: &T::Key) -> bool {
        self.get(key).is_some()
    }

    /// Every record, in insertion order
    fn list(&self) -> Vec<T>;

    /// Replace an existing record, keeping its position
    fn update(&self, item: T) -> Result<T, RegistryError>;

    fn delete(&self, key: &T::Key) -> Result<T, RegistryError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered in-memory store
#[derive(Debug)]
pub struct InMemoryRepository<T: Entity> {
    items: RwLock<IndexMap<T::Key, T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(IndexMap::new()),
        }
    }

    /// Repository pre-filled with `items`; fails on the first duplicate key
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Result<Self, RegistryError> {
        let repo = Self::new();
        for item in items {
            repo.create(item)?;
        }
        Ok(repo)
    }

    /// Records matching `predicate`, in insertion order
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Build one record and insert it under a single write lock
    ///
    /// `build` can ask which keys are taken; no other writer can claim a key
    /// between that answer and the insert.
    pub fn create_with(
        &self,
        build: impl FnOnce(&dyn Fn(&T::Key) -> bool) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let mut items = self.items.write();
        let item = build(&|key: &T::Key| items.contains_key(key))?;
        let key = item.key();
        if items.contains_key(&key) {
            return Err(duplicate::<T>(&key));
        }
        items.insert(key, item.clone());
        Ok(item)
    }

    /// Build several records and insert all of them or none
    pub fn create_all_with(
        &self,
        build: impl FnOnce(&dyn Fn(&T::Key) -> bool) -> Result<Vec<T>, RegistryError>,
    ) -> Result<Vec<T>, RegistryError> {
        let mut items = self.items.write();
        let built = build(&|key: &T::Key| items.contains_key(key))?;

        let mut keys = HashSet::with_capacity(built.len());
        for item in &built {
            let key = item.key();
            if items.contains_key(&key) || !keys.insert(key.clone()) {
                return Err(duplicate::<T>(&key));
            }
        }
        for item in &built {
            items.insert(item.key(), item.clone());
        }
        Ok(built)
    }

    /// Mutate a record in place and return the new value
    pub fn modify(
        &self,
        key: &T::Key,
        change: impl FnOnce(&mut T),
    ) -> Result<T, RegistryError> {
        let mut items = self.items.write();
        let item = items
            .get_mut(key)
            .ok_or_else(|| RegistryError::not_found(T::KIND, key))?;
        change(item);
        Ok(item.clone())
    }
}

fn duplicate<T: Entity>(key: &T::Key) -> RegistryError {
    RegistryError::Duplicate {
        kind: T::KIND,
        key: key.to_string(),
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn create(&self, item: T) -> Result<T, RegistryError> {
        let key = item.key();
        let mut items = self.items.write();
        if items.contains_key(&key) {
            return Err(duplicate::<T>(&key));
        }
        items.insert(key, item.clone());
        Ok(item)
    }

    fn get(&self, key: &T::Key) -> Option<T> {
        self.items.read().get(key).cloned()
    }

    fn contains(&self, key: &T::Key) -> bool {
        self.items.read().contains_key(key)
    }

    fn list(&self) -> Vec<T> {
        self.items.read().values().cloned().collect()
    }

    fn update(&self, item: T) -> Result<T, RegistryError> {
        let key = item.key();
        let mut items = self.items.write();
        match items.get_mut(&key) {
            Some(slot) => {
                *slot = item.clone();
                Ok(item)
            }
            None => Err(RegistryError::not_found(T::KIND, key)),
        }
    }

    fn delete(&self, key: &T::Key) -> Result<T, RegistryError> {
        self.items
            .write()
            .shift_remove(key)
            .ok_or_else(|| RegistryError::not_found(T::KIND, key))
    }

    fn len(&self) -> usize {
        self.items.read().len()
    }
}
