use bevy_ecs::prelude::Resource;
use indexmap::IndexMap;
use std::marker::PhantomData;
use thiserror::Error;
use valence_ident::Ident;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegistryId<E> {
    Index {
        index: usize,
        marker: PhantomData<E>,
    },
    Identifier {
        identifier: Ident<String>,
    },
    StaticIdentifier {
        identifier: Ident<&'static str>,
    },
}

impl<E> From<Ident<String>> for RegistryId<E> {
    fn from(value: Ident<String>) -> Self {
        RegistryId::Identifier { identifier: value }
    }
}

impl<E> From<&Ident<String>> for RegistryId<E> {
    fn from(value: &Ident<String>) -> Self {
        RegistryId::Identifier {
            identifier: value.clone(),
        }
    }
}

impl<E> From<Ident<&'static str>> for RegistryId<E> {
    fn from(value: Ident<&'static str>) -> Self {
        RegistryId::StaticIdentifier { identifier: value }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("registry already contains an entry named {}", .0.as_str())]
pub struct DuplicateEntry(pub Ident<String>);

#[derive(Resource)]
pub struct Registry<E> {
    items: IndexMap<Ident<String>, E>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Registry<E> {
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    pub fn get(&self, id: impl Into<RegistryId<E>>) -> Option<&E> {
        match id.into() {
            RegistryId::Index { index, .. } => self.items.get_index(index).map(|(_, v)| v),
            RegistryId::Identifier { identifier } => self.items.get(&identifier),
            RegistryId::StaticIdentifier { identifier } => self.items.get(identifier.as_str()),
        }
    }

    pub fn get_full(&self, id: impl Into<RegistryId<E>>) -> Option<(usize, &E)> {
        match id.into() {
            RegistryId::Index { index, .. } => self.items.get_index(index).map(|(_, v)| (index, v)),
            RegistryId::Identifier { identifier } => self
                .items
                .get_full(&identifier)
                .map(|(index, _, v)| (index, v)),
            RegistryId::StaticIdentifier { identifier } => self
                .items
                .get_full(identifier.as_str())
                .map(|(index, _, v)| (index, v)),
        }
    }

    pub fn contains(&self, id: impl Into<RegistryId<E>>) -> bool {
        self.get(id).is_some()
    }

    /// Inserts or replaces the entry under `id`. A replaced entry keeps its index.
    pub fn insert(&mut self, id: impl Into<Ident<String>>, entry: E) -> RegistryRef<E> {
        let id = id.into();
        let (index, _) = self.items.insert_full(id.clone(), entry);

        RegistryRef {
            index,
            identifier: id,
            marker: PhantomData,
        }
    }

    pub fn try_insert(
        &mut self,
        id: impl Into<Ident<String>>,
        entry: E,
    ) -> Result<RegistryRef<E>, DuplicateEntry> {
        let id = id.into();
        if self.items.contains_key(&id) {
            return Err(DuplicateEntry(id));
        }
        Ok(self.insert(id, entry))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ident<String>, &E)> + '_ {
        self.items.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &E> + '_ {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = RegistryId<E>> + '_ {
        (0..self.items.len()).map(|index| RegistryId::Index {
            index,
            marker: PhantomData,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistryRef<E> {
    index: usize,
    identifier: Ident<String>,
    marker: PhantomData<E>,
}

impl<E> RegistryRef<E> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn identifier(&self) -> &Ident<String> {
        &self.identifier
    }
}

impl<E> From<RegistryRef<E>> for RegistryId<E> {
    fn from(value: RegistryRef<E>) -> Self {
        RegistryId::Index {
            index: value.index,
            marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valence_ident::ident;

    #[derive(Debug, PartialEq)]
    struct TestEntry(u32);

    const A: Ident<&'static str> = ident!("test_entry");
    const B: Ident<&'static str> = ident!("arbor:other_entry");

    #[test]
    fn lookup_by_every_id_kind() {
        let mut reg = Registry::<TestEntry>::new();
        let a = reg.insert(A, TestEntry(1));
        reg.insert(B, TestEntry(2));

        assert_eq!(a.index(), 0);
        assert_eq!(reg.get(a), Some(&TestEntry(1)));
        assert_eq!(reg.get(B), Some(&TestEntry(2)));
        let owned: Ident<String> = B.into();
        assert_eq!(reg.get(&owned), Some(&TestEntry(2)));
        assert_eq!(reg.get_full(owned), Some((1, &TestEntry(2))));
        assert!(reg.get(ident!("not_found")).is_none());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut reg = Registry::<TestEntry>::new();
        reg.insert(A, TestEntry(1));
        reg.insert(B, TestEntry(2));
        let replaced = reg.insert(A, TestEntry(3));

        assert_eq!(replaced.index(), 0);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(A), Some(&TestEntry(3)));
    }

    #[test]
    fn try_insert_rejects_duplicates() {
        let mut reg = Registry::<TestEntry>::new();
        assert!(reg.try_insert(A, TestEntry(1)).is_ok());
        let err = reg.try_insert(A, TestEntry(2)).unwrap_err();
        assert_eq!(err.0.as_str(), "minecraft:test_entry");
        assert_eq!(reg.get(A), Some(&TestEntry(1)));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut reg = Registry::<TestEntry>::new();
        reg.insert(B, TestEntry(2));
        reg.insert(A, TestEntry(1));

        let names: Vec<_> = reg.iter().map(|(id, _)| id.as_str().to_owned()).collect();
        assert_eq!(names, ["arbor:other_entry", "minecraft:test_entry"]);
        assert_eq!(reg.ids().count(), 2);
        assert!(!reg.is_empty());
    }
}
