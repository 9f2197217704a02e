//! Text content of file nodes, keyed by node id.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::file_tree::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentMap {
    entries: FxHashMap<NodeId, String>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &NodeId) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns true when the stored text changed.
    pub fn set(&mut self, id: NodeId, content: impl Into<String>) -> bool {
        let content = content.into();
        match self.entries.get_mut(&id) {
            Some(existing) if *existing == content => false,
            Some(existing) => {
                *existing = content;
                true
            }
            None => {
                self.entries.insert(id, content);
                true
            }
        }
    }

    pub fn remove(&mut self, id: &NodeId) -> Option<String> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &str)> {
        self.entries.iter().map(|(id, text)| (id, text.as_str()))
    }
}

impl<K: Into<NodeId>, V: Into<String>> FromIterator<(K, V)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
