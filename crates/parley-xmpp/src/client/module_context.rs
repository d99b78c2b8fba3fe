// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{Arc, Weak};

use anyhow::Result;
use jid::FullJid;
use minidom::Element;
use parking_lot::RwLock;

use crate::client::builder::UndefinedConnector;
use crate::client::{Client, ConnectorProvider, EventHandler, ModuleLookup};
use crate::connector::Connection;
use crate::deps::{IDProvider, UUIDProvider};
use crate::Event;

#[derive(Clone)]
pub struct ModuleContext {
    pub(super) inner: Arc<ModuleContextInner>,
}

impl ModuleContext {
    pub(crate) fn send_stanza(&self, stanza: impl Into<Element>) -> Result<()> {
        let Some(conn) = &*self.inner.connection.read() else {
            return Ok(());
        };
        conn.send_stanza(stanza.into())
    }

    pub(crate) fn full_jid(&self) -> FullJid {
        self.inner
            .jid
            .read()
            .as_ref()
            .cloned()
            .unwrap_or_else(|| FullJid::new("placeholder@parley.im/client").unwrap())
    }

    pub(crate) fn generate_id(&self) -> String {
        self.inner.id_provider.new_id()
    }

    pub(crate) fn schedule_event(&self, event: Event) {
        self.inner.clone().schedule_event(event)
    }
}

pub(crate) struct ModuleContextInner {
    pub jid: RwLock<Option<FullJid>>,
    pub connector_provider: ConnectorProvider,
    pub connection: RwLock<Option<Box<dyn Connection>>>,
    pub event_handler: EventHandler,
    pub mods: Weak<ModuleLookup>,
    pub id_provider: Box<dyn IDProvider>,
}

impl ModuleContextInner {
    pub(crate) fn send_stanza(&self, stanza: impl Into<Element>) -> Result<()> {
        let Some(conn) = &*self.connection.read() else {
            return Ok(());
        };
        conn.send_stanza(stanza.into())
    }

    /// Events are delivered inline so that handlers observe stanzas in
    /// exactly the order they arrived.
    pub(crate) fn schedule_event(self: Arc<Self>, event: Event) {
        let Ok(client) = Client::try_from(self.clone()) else {
            return;
        };
        (self.event_handler)(client, event);
    }

    pub(crate) fn disconnect(&self) {
        if let Some(conn) = self.connection.write().take() {
            conn.disconnect()
        }
    }
}

impl Default for ModuleContext {
    fn default() -> Self {
        ModuleContext {
            inner: Arc::new(ModuleContextInner {
                connector_provider: Box::new(|| Box::new(UndefinedConnector {})),
                jid: RwLock::new(None),
                connection: Default::default(),
                event_handler: Box::new(|_, _| {}),
                mods: Default::default(),
                id_provider: Box::new(UUIDProvider::default()),
            }),
        }
    }
}
