//! Collection directory models and lookup tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};


/// One searchable sub-index in multi-collection mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
}

impl Collection {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into() }
    }
}


/// The session's collection listing plus both lookup directions, built once
/// and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionDirectory {
    collections: Vec<Collection>,
    title_by_id: BTreeMap<String, String>,
    id_by_title: BTreeMap<String, String>,
}

impl CollectionDirectory {
    pub fn new(collections: Vec<Collection>) -> Self {
        let mut title_by_id = BTreeMap::new();
        let mut id_by_title = BTreeMap::new();
        for collection in &collections {
            title_by_id.insert(collection.id.clone(), collection.title.clone());
            id_by_title.insert(collection.title.clone(), collection.id.clone());
        }
        Self { collections, title_by_id, id_by_title }
    }

    pub fn title_of(&self, id: &str) -> Option<&str> {
        self.title_by_id.get(id).map(String::as_str)
    }

    pub fn id_of(&self, title: &str) -> Option<&str> {
        self.id_by_title.get(title).map(String::as_str)
    }

    /// Ids in directory order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|c| c.id.as_str())
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
