//! Resource type identity
//!
//! Both the API catalog and every usage index are keyed by [`ResourceTypeKey`].
//! Keys are only ever built through the constructors in this module, so the
//! two sides cannot disagree on the format:
//!
//! - `<group>/<version>/<kind>` for named API groups (`apps/v1/Deployment`)
//! - `<version>/<kind>` for the core group (`v1/Pod`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kubernetes group/version/kind triple
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    /// API group, empty for the core group
    #[serde(default)]
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Build from a manifest `apiVersion` (`apps/v1` or `v1`) and a kind
    pub fn from_api_version(api_version: &str, kind: impl Into<String>) -> Self {
        let (group, version) = Self::parse_api_version(api_version);
        Self::new(group, version, kind)
    }

    /// Split an `apiVersion` into group and version
    ///
    /// The core group has no slash, so `v1` yields an empty group.
    pub fn parse_api_version(api_version: &str) -> (&str, &str) {
        match api_version.rsplit_once('/') {
            Some((group, version)) => (group, version),
            None => ("", api_version),
        }
    }

    /// The `apiVersion` form of this triple
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn is_core_group(&self) -> bool {
        self.group.is_empty()
    }

    pub fn key(&self) -> ResourceTypeKey {
        ResourceTypeKey::from_gvk(self)
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Canonical identity string of a resource type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTypeKey(String);

impl ResourceTypeKey {
    pub fn from_gvk(gvk: &GroupVersionKind) -> Self {
        Self::from_parts(&gvk.group, &gvk.version, &gvk.kind)
    }

    pub fn from_parts(group: &str, version: &str, kind: &str) -> Self {
        if group.is_empty() {
            Self(format!("{}/{}", version, kind))
        } else {
            Self(format!("{}/{}/{}", group, version, kind))
        }
    }

    /// Key for a manifest's `apiVersion` and `kind`
    pub fn from_api_version(api_version: &str, kind: &str) -> Self {
        let (group, version) = GroupVersionKind::parse_api_version(api_version);
        Self::from_parts(group, version, kind)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into its group/version/kind
    pub fn gvk(&self) -> GroupVersionKind {
        let mut parts = self.0.rsplitn(3, '/');
        let kind = parts.next().unwrap_or_default();
        let version = parts.next().unwrap_or_default();
        let group = parts.next().unwrap_or_default();
        GroupVersionKind::new(group, version, kind)
    }
}

impl fmt::Display for ResourceTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceTypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&GroupVersionKind> for ResourceTypeKey {
    fn from(gvk: &GroupVersionKind) -> Self {
        Self::from_gvk(gvk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_group_key() {
        let gvk = GroupVersionKind::new("apps", "v1", "Deployment");
        assert_eq!(gvk.key().as_str(), "apps/v1/Deployment");
    }

    #[test]
    fn test_core_group_key() {
        let gvk = GroupVersionKind::new("", "v1", "Pod");
        assert_eq!(gvk.key().as_str(), "v1/Pod");
        assert!(gvk.is_core_group());
    }

    #[test]
    fn test_api_version_key_matches_gvk_key() {
        assert_eq!(
            ResourceTypeKey::from_api_version("apps/v1", "Deployment"),
            GroupVersionKind::new("apps", "v1", "Deployment").key()
        );
        assert_eq!(
            ResourceTypeKey::from_api_version("v1", "Pod"),
            GroupVersionKind::new("", "v1", "Pod").key()
        );
    }

    #[test]
    fn test_parse_api_version() {
        assert_eq!(
            GroupVersionKind::parse_api_version("policy/v1beta1"),
            ("policy", "v1beta1")
        );
        assert_eq!(GroupVersionKind::parse_api_version("v1"), ("", "v1"));
        assert_eq!(
            GroupVersionKind::parse_api_version("rbac.authorization.k8s.io/v1"),
            ("rbac.authorization.k8s.io", "v1")
        );
    }

    #[test]
    fn test_api_version_roundtrip() {
        let gvk = GroupVersionKind::from_api_version("networking.k8s.io/v1", "Ingress");
        assert_eq!(gvk.group, "networking.k8s.io");
        assert_eq!(gvk.api_version(), "networking.k8s.io/v1");

        let core = GroupVersionKind::from_api_version("v1", "Service");
        assert_eq!(core.api_version(), "v1");
    }

    #[test]
    fn test_key_splits_back_into_gvk() {
        let gvk = GroupVersionKind::new("networking.k8s.io", "v1beta1", "Ingress");
        assert_eq!(gvk.key().gvk(), gvk);

        let core = GroupVersionKind::new("", "v1", "Pod");
        assert_eq!(core.key().gvk(), core);
    }

    #[test]
    fn test_key_ordering_is_lexicographic() {
        let mut keys = vec![
            ResourceTypeKey::from_parts("", "v1", "Pod"),
            ResourceTypeKey::from_parts("apps", "v1", "Deployment"),
            ResourceTypeKey::from_parts("", "v1", "ConfigMap"),
        ];
        keys.sort();
        let keys: Vec<_> = keys.iter().map(ResourceTypeKey::as_str).collect();
        assert_eq!(keys, vec!["apps/v1/Deployment", "v1/ConfigMap", "v1/Pod"]);
    }

    #[test]
    fn test_key_serializes_as_string() {
        let key = ResourceTypeKey::from_parts("batch", "v1beta1", "CronJob");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"batch/v1beta1/CronJob\"");
    }
}
