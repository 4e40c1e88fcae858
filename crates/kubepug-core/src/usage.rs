//! Observed usages of resource types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::key::ResourceTypeKey;

/// Scope recorded for cluster-scoped objects
pub const CLUSTER_SCOPE: &str = "OBJECT";

/// One concrete object found using a resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageItem {
    /// Namespace of the object, or [`CLUSTER_SCOPE`]
    pub scope: String,
    /// Object name
    pub name: String,
    /// Where the object was found (file path, cluster context, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UsageItem {
    pub fn new(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            name: name.into(),
            location: None,
        }
    }

    /// Item for an object without a namespace
    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self::new(CLUSTER_SCOPE, name)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Usages grouped by resource type key
///
/// Keys iterate in lexicographic order; items keep the order they were recorded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageIndex<I = UsageItem> {
    entries: BTreeMap<ResourceTypeKey, Vec<I>>,
}

impl<I> Default for UsageIndex<I> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<I> UsageIndex<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a usage under an already built key
    pub fn record(&mut self, key: ResourceTypeKey, item: I) {
        self.entries.entry(key).or_default().push(item);
    }

    /// Record a usage from a manifest's `apiVersion` and `kind`
    pub fn record_api_version(&mut self, api_version: &str, kind: &str, item: I) {
        self.record(ResourceTypeKey::from_api_version(api_version, kind), item);
    }

    pub fn get(&self, key: &ResourceTypeKey) -> Option<&[I]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of distinct resource types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded usages
    pub fn item_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ResourceTypeKey, Vec<I>> {
        self.entries.iter()
    }

    /// Append all usages of `other`, keeping this index's items first
    pub fn merge(&mut self, other: UsageIndex<I>) {
        for (key, items) in other.entries {
            self.entries.entry(key).or_default().extend(items);
        }
    }
}

impl<I> FromIterator<(ResourceTypeKey, I)> for UsageIndex<I> {
    fn from_iter<T: IntoIterator<Item = (ResourceTypeKey, I)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (key, item) in iter {
            index.record(key, item);
        }
        index
    }
}

impl<'a, I> IntoIterator for &'a UsageIndex<I> {
    type Item = (&'a ResourceTypeKey, &'a Vec<I>);
    type IntoIter = btree_map::Iter<'a, ResourceTypeKey, Vec<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
