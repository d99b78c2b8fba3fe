// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use parley_xmpp::mods::caps::DiscoInfo;
use parley_xmpp::ns;

/// One entity's validated feature set, keyed in the cache by the
/// `node#ver` string it was advertised under.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CapabilityEntry {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub features: BTreeSet<String>,
    pub software: Option<String>,
    pub software_version: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
}

impl CapabilityEntry {
    pub fn from_disco_info(info: &DiscoInfo) -> Self {
        let mut entry = CapabilityEntry {
            features: info.features.iter().cloned().collect(),
            ..Default::default()
        };

        if let Some(identity) = info.identities.first() {
            entry.category = Some(identity.category.clone());
            entry.kind = Some(identity.kind.clone());
            entry.name = identity.name.clone();
        }

        if let Some(form) = info
            .extensions
            .iter()
            .find(|form| form.form_type.as_deref() == Some(ns::SOFTWARE_INFO))
        {
            let field = |var: &str| {
                form.fields
                    .iter()
                    .find(|(name, _)| name == var)
                    .and_then(|(_, values)| values.first().cloned())
            };
            entry.software = field("software");
            entry.software_version = field("software_version");
            entry.os = field("os");
            entry.os_version = field("os_version");
        }

        entry
    }
}

/// Discovered capabilities outlive a single connection; resolving a hash
/// once is enough for every later session that sees it advertised.
#[derive(Default, Clone)]
pub struct CapsCache {
    entries: Arc<RwLock<HashMap<String, CapabilityEntry>>>,
}

impl CapsCache {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn insert(&self, key: impl Into<String>, entry: CapabilityEntry) {
        let key = key.into();
        debug!(key = %key, features = entry.features.len(), "Caching capabilities");
        self.entries.write().insert(key, entry);
    }

    pub fn get(&self, key: &str) -> Option<CapabilityEntry> {
        self.entries.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use parley_xmpp::mods::caps::{DiscoForm, DiscoIdentity};

    use super::*;

    #[test]
    fn test_insert_then_get_returns_stored_entry() {
        let cache = CapsCache::default();
        let entry = CapabilityEntry {
            category: Some("client".to_string()),
            features: ["urn:xmpp:ping".to_string()].into_iter().collect(),
            ..Default::default()
        };

        assert!(!cache.contains("node#ver"));
        cache.insert("node#ver", entry.clone());
        assert!(cache.contains("node#ver"));
        assert_eq!(cache.get("node#ver"), Some(entry));
    }

    #[test]
    fn test_entry_from_disco_info_reads_software_form() {
        let info = DiscoInfo {
            node: None,
            identities: vec![DiscoIdentity {
                category: "client".to_string(),
                kind: "console".to_string(),
                lang: None,
                name: Some("Other".to_string()),
            }],
            features: vec!["urn:xmpp:ping".to_string()],
            extensions: vec![DiscoForm {
                form_type: Some("urn:xmpp:dataforms:softwareinfo".to_string()),
                fields: vec![
                    ("software".to_string(), vec!["other".to_string()]),
                    ("os".to_string(), vec!["Linux".to_string()]),
                ],
            }],
        };

        let entry = CapabilityEntry::from_disco_info(&info);
        assert_eq!(entry.category.as_deref(), Some("client"));
        assert_eq!(entry.software.as_deref(), Some("other"));
        assert_eq!(entry.os.as_deref(), Some("Linux"));
        assert!(entry.features.contains("urn:xmpp:ping"));
    }
}
