// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;

use jid::BareJid;

/// Inbound presence-subscription requests awaiting the user's verdict.
#[derive(Default)]
pub struct SubscriptionRequests {
    requests: BTreeMap<String, BareJid>,
}

impl SubscriptionRequests {
    /// Returns false when a request from this JID was already pending.
    pub fn insert(&mut self, jid: BareJid) -> bool {
        self.requests.insert(jid.to_string(), jid).is_none()
    }

    pub fn remove(&mut self, jid: &BareJid) -> bool {
        self.requests.remove(&jid.to_string()).is_some()
    }

    pub fn contains(&self, jid: &BareJid) -> bool {
        self.requests.contains_key(&jid.to_string())
    }

    pub fn jids(&self) -> Vec<BareJid> {
        self.requests.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}
