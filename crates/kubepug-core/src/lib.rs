//! Kubepug Core - find deprecated Kubernetes APIs before upgrading a cluster
//!
//! This crate provides the pieces shared by every kubepug front-end:
//! - `ApiCatalog`: Resource types known to a Kubernetes release, built from its swagger document
//! - `ResourceTypeKey`: The canonical `group/version/kind` key both sides are indexed by
//! - `UsageIndex`: Observed usages of resource types, grouped by key
//! - `Report`: Deprecated and deleted API findings for a usage index
//!
//! # Example
//!
//! ```ignore
//! use kubepug_core::{ApiCatalog, Report, UsageIndex};
//!
//! let catalog = ApiCatalog::from_swagger_file("swagger.json")?;
//!
//! let mut usage = UsageIndex::new();
//! usage.record_api_version("policy/v1beta1", "PodDisruptionBudget", item);
//!
//! let report = Report::analyze(&catalog, &usage);
//! ```

pub mod catalog;
pub mod error;
pub mod key;
pub mod matcher;
pub mod usage;

pub use catalog::{
    ApiCatalog, CatalogBuilder, ConflictPolicy, DeprecationClassifier, KeywordClassifier,
    ResourceTypeInfo, GVK_EXTENSION,
};
pub use error::{CatalogError, Result};
pub use key::{GroupVersionKind, ResourceTypeKey};
pub use matcher::{DeletedApi, DeprecationFinding, Report, find_deleted, find_deprecated};
pub use usage::{CLUSTER_SCOPE, UsageIndex, UsageItem};
