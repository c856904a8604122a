use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a reference.
///
/// Ordering is byte-wise lexicographic on the underlying string. The reference
/// table iterates, and therefore serializes, in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReferenceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ReferenceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&ReferenceId> for ReferenceId {
    fn from(value: &ReferenceId) -> Self {
        value.clone()
    }
}

/// A typed value: a category label (`kind`) and a payload.
///
/// Neither field may contain whitespace if the reference is to survive a
/// round trip through the text format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Reference {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    values: BTreeMap<ReferenceId, Reference>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ReferenceId) -> bool {
        self.values.contains_key(id)
    }

    /// Inserts `reference` under `id` unless the id is already taken.
    /// Returns `false` and leaves the table untouched on a duplicate.
    pub fn insert(&mut self, id: ReferenceId, reference: Reference) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.values.insert(id, reference);
        true
    }

    pub fn get(&self, id: &ReferenceId) -> Option<&Reference> {
        self.values.get(id)
    }

    /// Owned snapshot of all entries in id order.
    pub fn entries(&self) -> Vec<(ReferenceId, Reference)> {
        self.values
            .iter()
            .map(|(id, reference)| (id.clone(), reference.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReferenceId, &Reference)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl IntoIterator for ReferenceTable {
    type Item = (ReferenceId, Reference);
    type IntoIter = std::collections::btree_map::IntoIter<ReferenceId, Reference>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
