//! Matching observed usages against the API catalog
//!
//! Findings are ordered by [`ResourceTypeKey`], so the same catalog and usage
//! index always produce the same report.

use serde::Serialize;

use crate::catalog::{ApiCatalog, ResourceTypeInfo};
use crate::key::{GroupVersionKind, ResourceTypeKey};
use crate::usage::{UsageIndex, UsageItem};

/// A deprecated resource type and the objects still using it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationFinding<I = UsageItem> {
    #[serde(flatten)]
    pub api: ResourceTypeInfo,
    pub items: Vec<I>,
}

impl<I> DeprecationFinding<I> {
    pub fn key(&self) -> ResourceTypeKey {
        self.api.key()
    }
}

/// A resource type in use that the reference release does not know about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedApi<I = UsageItem> {
    #[serde(flatten)]
    pub gvk: GroupVersionKind,
    pub items: Vec<I>,
}

impl<I> DeletedApi<I> {
    pub fn key(&self) -> ResourceTypeKey {
        self.gvk.key()
    }
}

/// Find usages of resource types the catalog marks as deprecated
///
/// Keys missing from the catalog, or present but not deprecated, yield nothing.
pub fn find_deprecated<I: Clone>(
    catalog: &ApiCatalog,
    usage: &UsageIndex<I>,
) -> Vec<DeprecationFinding<I>> {
    usage
        .iter()
        .filter_map(|(key, items)| {
            let api = catalog.get(key)?;
            tracing::debug!(key = %key, deprecated = api.is_deprecated(), "matched usage");
            api.is_deprecated().then(|| DeprecationFinding {
                api: api.clone(),
                items: items.clone(),
            })
        })
        .collect()
}

/// Find usages of resource types that do not exist in the catalog
pub fn find_deleted<I: Clone>(catalog: &ApiCatalog, usage: &UsageIndex<I>) -> Vec<DeletedApi<I>> {
    usage
        .iter()
        .filter(|(key, _)| !catalog.contains(key))
        .map(|(key, items)| {
            tracing::debug!(key = %key, "resource type not found in catalog");
            DeletedApi {
                gvk: key.gvk(),
                items: items.clone(),
            }
        })
        .collect()
}

/// Deprecated and deleted APIs found for one usage index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<I = UsageItem> {
    pub deprecated_apis: Vec<DeprecationFinding<I>>,
    pub deleted_apis: Vec<DeletedApi<I>>,
}

impl<I> Default for Report<I> {
    fn default() -> Self {
        Self {
            deprecated_apis: Vec::new(),
            deleted_apis: Vec::new(),
        }
    }
}

impl<I: Clone> Report<I> {
    pub fn analyze(catalog: &ApiCatalog, usage: &UsageIndex<I>) -> Self {
        let report = Self {
            deprecated_apis: find_deprecated(catalog, usage),
            deleted_apis: find_deleted(catalog, usage),
        };
        tracing::info!(
            deprecated = report.deprecated_apis.len(),
            deleted = report.deleted_apis.len(),
            "analysis finished"
        );
        report
    }
}

impl<I> Report<I> {
    /// True when nothing deprecated or deleted is in use
    pub fn is_clean(&self) -> bool {
        self.deprecated_apis.is_empty() && self.deleted_apis.is_empty()
    }
}
