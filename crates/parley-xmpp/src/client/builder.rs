// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::any::TypeId;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use jid::FullJid;
use minidom::Element;
use parking_lot::RwLock;
use secrecy::SecretString;

use crate::client::client::ClientInner;
use crate::client::module_context::ModuleContextInner;
use crate::client::{ConnectorProvider, EventHandler, ModuleContext, ModuleLookup};
use crate::connector::{Connection, ConnectionError, ConnectionEventHandler, Connector};
use crate::deps::{IDProvider, UUIDProvider};
use crate::mods::AnyModule;
use crate::{mods, Client, Event};

pub struct UndefinedConnector {}
pub struct UndefinedConnection {}

pub struct ClientBuilder {
    connector_provider: ConnectorProvider,
    mods: ModuleLookup,
    id_provider: Box<dyn IDProvider>,
    event_handler: EventHandler,
}

impl ClientBuilder {
    pub(super) fn new() -> Self {
        ClientBuilder {
            connector_provider: Box::new(|| Box::new(UndefinedConnector {})),
            mods: Default::default(),
            id_provider: Box::new(UUIDProvider::default()),
            event_handler: Box::new(|_, _| {}),
        }
        // Order matters…
        .add_mod(mods::Status::default())
        .add_mod(mods::Caps::default())
        .add_mod(mods::Muc::default())
        .add_mod(mods::Chat::default())
        .add_mod(mods::Roster::default())
        .add_mod(mods::Profile::default())
    }

    pub fn set_connector_provider(mut self, connector_provider: ConnectorProvider) -> Self {
        self.connector_provider = connector_provider;
        self
    }

    pub fn set_event_handler(
        mut self,
        handler: impl Fn(Client, Event) + Send + Sync + 'static,
    ) -> Self {
        self.event_handler = Box::new(handler);
        self
    }

    pub fn set_id_provider<P: IDProvider + 'static>(mut self, id_provider: P) -> Self {
        self.id_provider = Box::new(id_provider);
        self
    }

    pub fn build(self) -> Client {
        let mut mods = self.mods;
        mods.push((
            TypeId::of::<mods::Ping>(),
            RwLock::new(Box::new(mods::Ping::default())),
        ));

        let mods = Arc::new(mods);

        let context_inner = Arc::new(ModuleContextInner {
            connector_provider: self.connector_provider,
            jid: RwLock::new(None),
            connection: Default::default(),
            mods: Arc::downgrade(&mods),
            id_provider: self.id_provider,
            event_handler: self.event_handler,
        });

        for (_, m) in mods.iter() {
            m.write().register_with(ModuleContext {
                inner: context_inner.clone(),
            });
        }

        Client {
            inner: Arc::new(ClientInner {
                mods: mods.clone(),
                context: context_inner,
            }),
        }
    }
}

impl ClientBuilder {
    fn add_mod<M: AnyModule + Clone + 'static>(mut self, m: M) -> Self {
        self.mods
            .push((TypeId::of::<M>(), RwLock::new(Box::new(m))));
        self
    }
}

#[async_trait]
impl Connector for UndefinedConnector {
    async fn connect(
        &self,
        _jid: &FullJid,
        _password: SecretString,
        _server: Option<&str>,
        _event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn Connection>, ConnectionError> {
        panic!("Client doesn't have a connector. Provide one before calling connect()")
    }
}

impl Connection for UndefinedConnection {
    fn send_stanza(&self, _stanza: Element) -> Result<()> {
        panic!("Calling send_stanza on UndefinedConnection is illegal.")
    }

    fn disconnect(&self) {
        panic!("Calling disconnect on UndefinedConnection is illegal.")
    }
}
