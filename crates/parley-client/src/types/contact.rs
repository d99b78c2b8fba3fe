// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use jid::BareJid;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::types::Availability;

/// Directional presence authorization as the roster reports it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    #[default]
    None,
    To,
    From,
    Both,
}

impl Subscription {
    pub fn grant_to(self) -> Self {
        match self {
            Subscription::None | Subscription::To => Subscription::To,
            Subscription::From | Subscription::Both => Subscription::Both,
        }
    }

    pub fn revoke_to(self) -> Self {
        match self {
            Subscription::None | Subscription::To => Subscription::None,
            Subscription::From | Subscription::Both => Subscription::From,
        }
    }

    pub fn grant_from(self) -> Self {
        match self {
            Subscription::None | Subscription::From => Subscription::From,
            Subscription::To | Subscription::Both => Subscription::Both,
        }
    }

    pub fn revoke_from(self) -> Self {
        match self {
            Subscription::None | Subscription::From => Subscription::None,
            Subscription::To | Subscription::Both => Subscription::To,
        }
    }
}

impl From<xmpp_parsers::roster::Subscription> for Subscription {
    fn from(value: xmpp_parsers::roster::Subscription) -> Self {
        use xmpp_parsers::roster::Subscription as Wire;
        match value {
            Wire::None | Wire::Remove => Subscription::None,
            Wire::To => Subscription::To,
            Wire::From => Subscription::From,
            Wire::Both => Subscription::Both,
        }
    }
}

/// One online endpoint of a contact.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub name: String,
    pub availability: Availability,
    pub priority: i8,
    pub status: Option<String>,
    /// The `node#ver` caps reference this resource last advertised.
    pub caps_node: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub jid: BareJid,
    pub name: Option<String>,
    pub subscription: Subscription,
    pub pending_out: bool,
    pub pending_in: bool,
    pub groups: Vec<String>,
    resources: HashMap<String, Resource>,
}

impl Contact {
    pub fn new(jid: BareJid) -> Self {
        Contact {
            jid,
            name: None,
            subscription: Subscription::None,
            pending_out: false,
            pending_in: false,
            groups: vec![],
            resources: HashMap::new(),
        }
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.jid.to_string())
    }

    /// The presence a contact list shows: taken from the available
    /// resource with the highest priority, offline without any.
    pub fn availability(&self) -> Availability {
        self.best_resource()
            .map(|resource| resource.availability)
            .unwrap_or(Availability::Offline)
    }

    pub fn status(&self) -> Option<&str> {
        self.best_resource().and_then(|r| r.status.as_deref())
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn resource_mut(&mut self, name: &str) -> Option<&mut Resource> {
        self.resources.get_mut(name)
    }

    pub fn update_resource(&mut self, resource: Resource) {
        self.resources.insert(resource.name.clone(), resource);
    }

    pub fn remove_resource(&mut self, name: &str) -> Option<Resource> {
        self.resources.remove(name)
    }

    /// Resources ordered for display: available before unavailable, then
    /// by descending priority, then by name.
    pub fn sorted_resources(&self) -> Vec<&Resource> {
        let mut resources: Vec<&Resource> = self.resources.values().collect();
        resources.sort_by(|a, b| {
            b.availability
                .is_available()
                .cmp(&a.availability.is_available())
                .then(b.priority.cmp(&a.priority))
                .then(a.name.cmp(&b.name))
        });
        resources
    }

    fn best_resource(&self) -> Option<&Resource> {
        self.resources
            .values()
            .filter(|r| r.availability.is_available())
            .max_by_key(|r| (r.priority, std::cmp::Reverse(r.name.clone())))
    }
}
