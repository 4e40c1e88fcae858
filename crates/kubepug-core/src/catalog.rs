//! API catalog built from a Kubernetes swagger document
//!
//! The catalog lists every resource type a Kubernetes release exposes,
//! together with whether its documentation marks it as deprecated.
//!
//! A definition is cataloged only when it carries both an
//! `x-kubernetes-group-version-kind` extension and a non-empty `description`.
//! Nested field schemas have no extension and are skipped silently.
//!
//! Only the first group/version/kind of a definition is cataloged. Schemas
//! that advertise several mappings lose the remaining ones.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::collections::btree_map::Entry;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::key::{GroupVersionKind, ResourceTypeKey};

/// Swagger extension listing the group/version/kind triples of a schema
pub const GVK_EXTENSION: &str = "x-kubernetes-group-version-kind";

/// Decides whether a resource type is deprecated from its documentation
pub trait DeprecationClassifier: Send + Sync {
    fn is_deprecated(&self, description: &str) -> bool;
}

impl<F> DeprecationClassifier for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_deprecated(&self, description: &str) -> bool {
        self(description)
    }
}

/// Case-insensitive keyword search over the description
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keyword: String,
}

impl KeywordClassifier {
    pub fn new(keyword: impl AsRef<str>) -> Self {
        Self {
            keyword: keyword.as_ref().to_lowercase(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new("deprecated")
    }
}

impl DeprecationClassifier for KeywordClassifier {
    fn is_deprecated(&self, description: &str) -> bool {
        description.to_lowercase().contains(&self.keyword)
    }
}

/// What to do when two definitions produce the same key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Definitions are visited in name order; the last one wins
    #[default]
    KeepLast,
    /// Fail the build with [`CatalogError::DuplicateKey`]
    Reject,
}

/// A resource type known to the reference release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeInfo {
    #[serde(flatten)]
    gvk: GroupVersionKind,
    description: String,
    deprecated: bool,
}

impl ResourceTypeInfo {
    /// Create an entry, deriving the deprecation flag from the description
    ///
    /// Returns `None` when the version or kind is empty; such a triple does not
    /// name a resource type. An empty group is the core group.
    pub fn classify(
        gvk: GroupVersionKind,
        description: impl Into<String>,
        classifier: &dyn DeprecationClassifier,
    ) -> Option<Self> {
        if gvk.version.is_empty() || gvk.kind.is_empty() {
            return None;
        }

        let description = description.into();
        let deprecated = classifier.is_deprecated(&description);
        Some(Self {
            gvk,
            description,
            deprecated,
        })
    }

    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    pub fn group(&self) -> &str {
        &self.gvk.group
    }

    pub fn version(&self) -> &str {
        &self.gvk.version
    }

    pub fn kind(&self) -> &str {
        &self.gvk.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn key(&self) -> ResourceTypeKey {
        self.gvk.key()
    }
}

/// Read-only lookup table of resource types, keyed by [`ResourceTypeKey`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiCatalog {
    entries: BTreeMap<ResourceTypeKey, ResourceTypeInfo>,
}

impl ApiCatalog {
    /// Build a catalog from swagger JSON with the default settings
    pub fn from_swagger_str(json: &str) -> Result<Self> {
        CatalogBuilder::new().build_from_str(json)
    }

    /// Read and build a catalog from a swagger file with the default settings
    pub fn from_swagger_file(path: impl AsRef<Path>) -> Result<Self> {
        CatalogBuilder::new().build_from_file(path)
    }

    pub fn get(&self, key: &ResourceTypeKey) -> Option<&ResourceTypeInfo> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ResourceTypeKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceTypeKey, &ResourceTypeInfo)> {
        self.entries.iter()
    }

    /// Deprecated entries in key order
    pub fn deprecated(&self) -> impl Iterator<Item = &ResourceTypeInfo> {
        self.entries.values().filter(|info| info.is_deprecated())
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = ResourceTypeInfo>) -> Self {
        Self {
            entries: entries.into_iter().map(|info| (info.key(), info)).collect(),
        }
    }
}

/// Builder turning a swagger document into an [`ApiCatalog`]
pub struct CatalogBuilder {
    classifier: Box<dyn DeprecationClassifier>,
    conflict_policy: ConflictPolicy,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            classifier: Box::new(KeywordClassifier::default()),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the deprecation classifier
    pub fn classifier(mut self, classifier: impl DeprecationClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Set how key collisions are resolved
    pub fn conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn build_from_file(&self, path: impl AsRef<Path>) -> Result<ApiCatalog> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading swagger document");
        let bytes = std::fs::read(path)?;
        self.build_from_slice(&bytes)
    }

    pub fn build_from_str(&self, json: &str) -> Result<ApiCatalog> {
        let document: Value = serde_json::from_str(json)?;
        self.build_from_value(&document)
    }

    pub fn build_from_slice(&self, json: &[u8]) -> Result<ApiCatalog> {
        let document: Value = serde_json::from_slice(json)?;
        self.build_from_value(&document)
    }

    /// Build from an already parsed swagger document
    pub fn build_from_value(&self, document: &Value) -> Result<ApiCatalog> {
        let root = document.as_object().ok_or_else(|| {
            CatalogError::malformed(
                "$",
                format!("expected an object, found {}", type_name(document)),
            )
        })?;

        let definitions = root
            .get("definitions")
            .ok_or_else(|| CatalogError::malformed("definitions", "missing top-level field"))?;
        let definitions = definitions.as_object().ok_or_else(|| {
            CatalogError::malformed(
                "definitions",
                format!("expected an object, found {}", type_name(definitions)),
            )
        })?;

        // Name order makes collision handling independent of the JSON map backend
        let mut ordered: Vec<(&String, &Value)> = definitions.iter().collect();
        ordered.sort_by(|a, b| a.0.cmp(b.0));

        tracing::debug!(count = ordered.len(), "iterating through definitions");

        let mut entries = BTreeMap::new();
        let mut origins: HashMap<ResourceTypeKey, &str> = HashMap::new();

        for (name, schema) in ordered {
            let Some(info) = self.parse_definition(name, schema)? else {
                continue;
            };

            let key = info.key();
            tracing::debug!(
                definition = %name,
                key = %key,
                deprecated = info.is_deprecated(),
                "adding resource type to catalog"
            );

            match entries.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(info);
                }
                Entry::Occupied(mut slot) => {
                    let first = origins.get(&key).copied().unwrap_or_default();
                    match self.conflict_policy {
                        ConflictPolicy::Reject => {
                            return Err(CatalogError::DuplicateKey {
                                key: key.to_string(),
                                first: first.to_string(),
                                second: name.clone(),
                            });
                        }
                        ConflictPolicy::KeepLast => {
                            tracing::warn!(
                                key = %key,
                                replaced = first,
                                definition = %name,
                                "duplicate resource type, keeping the later definition"
                            );
                            slot.insert(info);
                        }
                    }
                }
            }
            origins.insert(key, name.as_str());
        }

        let catalog = ApiCatalog { entries };
        tracing::debug!(
            resource_types = catalog.len(),
            deprecated = catalog.deprecated().count(),
            "built API catalog"
        );

        Ok(catalog)
    }

    /// Turn one definition into a catalog entry, if it describes a resource type
    fn parse_definition(&self, name: &str, schema: &Value) -> Result<Option<ResourceTypeInfo>> {
        let schema = schema.as_object().ok_or_else(|| {
            CatalogError::malformed(
                format!("definitions.{}", name),
                format!("expected an object, found {}", type_name(schema)),
            )
        })?;

        let Some(gvk) = extract_gvk(name, schema)? else {
            return Ok(None);
        };

        let description = match schema.get("description").and_then(Value::as_str) {
            Some(d) if !d.is_empty() => d,
            _ => {
                tracing::debug!(definition = %name, "skipping resource type without a description");
                return Ok(None);
            }
        };

        Ok(ResourceTypeInfo::classify(
            gvk,
            description,
            self.classifier.as_ref(),
        ))
    }
}

/// Read the first group/version/kind triple of a definition
fn extract_gvk(name: &str, schema: &Map<String, Value>) -> Result<Option<GroupVersionKind>> {
    let Some(triples) = schema.get(GVK_EXTENSION).and_then(Value::as_array) else {
        return Ok(None);
    };
    let Some(first) = triples.first() else {
        return Ok(None);
    };

    let path = format!("definitions.{}.{}[0]", name, GVK_EXTENSION);
    let first = first.as_object().ok_or_else(|| {
        CatalogError::malformed(&path, format!("expected an object, found {}", type_name(first)))
    })?;

    let group = string_field(first, "group", &path)?;
    let version = string_field(first, "version", &path)?;
    let kind = string_field(first, "kind", &path)?;

    if version.is_empty() || kind.is_empty() {
        tracing::debug!(
            definition = %name,
            "skipping definition with incomplete group/version/kind"
        );
        return Ok(None);
    }

    if triples.len() > 1 {
        tracing::debug!(
            definition = %name,
            ignored = triples.len() - 1,
            "definition maps to several group/version/kinds, cataloging the first"
        );
    }

    Ok(Some(GroupVersionKind::new(group, version, kind)))
}

/// Optional string member; absent and null read as empty
fn string_field<'a>(object: &'a Map<String, Value>, field: &str, path: &str) -> Result<&'a str> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(CatalogError::malformed(
            format!("{}.{}", path, field),
            format!("expected a string, found {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
