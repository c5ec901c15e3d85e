//! RecordCollection implementation
//!
//! Insertion-ordered id → record mapping with hand-written serde support.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::StudentRecord;

/// Every student record, keyed by id, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCollection {
    entries: Vec<(String, StudentRecord)>,
}

impl RecordCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a record by id
    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.position(id).map(|idx| &self.entries[idx].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Insert or replace a record
    ///
    /// A replaced record keeps its original position. Returns the previous
    /// record, if any.
    pub fn insert(&mut self, id: impl Into<String>, record: StudentRecord) -> Option<StudentRecord> {
        let id = id.into();
        match self.position(&id) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, record)),
            None => {
                self.entries.push((id, record));
                None
            }
        }
    }

    /// Remove a record, preserving the order of the rest
    pub fn remove(&mut self, id: &str) -> Option<StudentRecord> {
        let idx = self.position(id)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, record)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StudentRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == id)
    }
}

impl<K: Into<String>> FromIterator<(K, StudentRecord)> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = (K, StudentRecord)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (id, record) in iter {
            collection.insert(id, record);
        }
        collection
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for RecordCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CollectionVisitor)
    }
}

struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = RecordCollection;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object mapping student ids to records")
    }

    // Entries arrive in document order; a repeated id keeps its first slot.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut collection = RecordCollection::new();
        while let Some((id, record)) = access.next_entry::<String, StudentRecord>()? {
            collection.insert(id, record);
        }
        Ok(collection)
    }
}
