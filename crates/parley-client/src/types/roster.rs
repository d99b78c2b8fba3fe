// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;

use jid::BareJid;

use crate::types::{Availability, Contact, Resource, Subscription};

/// The local mirror of the server-side roster. Contacts are keyed by
/// their bare JID string; the ordered map doubles as the index for
/// prefix completion.
#[derive(Default)]
pub struct Roster {
    contacts: BTreeMap<String, Contact>,
}

impl Roster {
    /// A roster result replaces the whole contact set; the server is
    /// authoritative.
    pub fn replace(&mut self, contacts: impl IntoIterator<Item = Contact>) {
        self.contacts = contacts
            .into_iter()
            .map(|contact| (contact.jid.to_string(), contact))
            .collect();
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn upsert_contact(&mut self, contact: Contact) {
        self.contacts.insert(contact.jid.to_string(), contact);
    }

    pub fn contact(&self, jid: &BareJid) -> Option<&Contact> {
        self.contacts.get(&jid.to_string())
    }

    pub(crate) fn contact_mut(&mut self, jid: &BareJid) -> Option<&mut Contact> {
        self.contacts.get_mut(&jid.to_string())
    }

    pub(crate) fn contact_mut_or_insert(&mut self, jid: &BareJid) -> &mut Contact {
        self.contacts
            .entry(jid.to_string())
            .or_insert_with(|| Contact::new(jid.clone()))
    }

    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn set_subscription(&mut self, jid: &BareJid, subscription: Subscription) {
        self.contact_mut_or_insert(jid).subscription = subscription;
    }

    pub fn subscription(&self, jid: &BareJid) -> Option<Subscription> {
        self.contact(jid).map(|contact| contact.subscription)
    }

    pub fn set_pending_out(&mut self, jid: &BareJid) {
        self.contact_mut_or_insert(jid).pending_out = true;
    }

    pub fn clear_pending(&mut self, jid: &BareJid) {
        if let Some(contact) = self.contact_mut(jid) {
            contact.pending_out = false;
            contact.pending_in = false;
        }
    }

    pub fn has_pending_out(&self) -> bool {
        self.contacts.values().any(|contact| contact.pending_out)
    }

    pub fn contacts_with_availability(&self, availability: Availability) -> Vec<&Contact> {
        self.contacts
            .values()
            .filter(|contact| contact.availability() == availability)
            .collect()
    }

    pub fn contacts_in_group(&self, group: &str) -> Vec<&Contact> {
        self.contacts
            .values()
            .filter(|contact| contact.groups.iter().any(|g| g == group))
            .collect()
    }

    /// Completion lookup over the ordered key space.
    pub fn matching_prefix(&self, prefix: &str) -> Vec<&Contact> {
        self.contacts
            .range(prefix.to_string()..)
            .take_while(|(jid, _)| jid.starts_with(prefix))
            .map(|(_, contact)| contact)
            .collect()
    }

    /// Applies an inbound presence for `jid`/`resource`. Unknown contacts
    /// are ignored; the roster decides who exists. Returns the derived
    /// (availability, status) pair when it changed.
    pub fn apply_presence(
        &mut self,
        jid: &BareJid,
        resource: Option<Resource>,
        resource_name: &str,
    ) -> Option<(Availability, Option<String>)> {
        let contact = self.contact_mut(jid)?;

        let before = (
            contact.availability(),
            contact.status().map(ToString::to_string),
        );

        match resource {
            Some(resource) => contact.update_resource(resource),
            None => {
                contact.remove_resource(resource_name);
            }
        }

        let after = (
            contact.availability(),
            contact.status().map(ToString::to_string),
        );

        (before != after).then_some(after)
    }
}
