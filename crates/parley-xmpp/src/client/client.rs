// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::any::TypeId;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use anyhow::Result;
use jid::FullJid;
use minidom::Element;
use secrecy::SecretString;
use tracing::{error, warn};
use xmpp_parsers::iq::IqType;

use crate::client::module_context::ModuleContextInner;
use crate::client::{ClientBuilder, Event, ModuleLookup};
use crate::connector::{ConnectionError, ConnectionEvent};
use crate::mods::AnyModule;
use crate::util::XmppElement;
use crate::Event as ClientEvent;

#[derive(Clone)]
pub struct Client {
    pub(super) inner: Arc<ClientInner>,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish()
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub async fn connect(
        &self,
        jid: &FullJid,
        password: SecretString,
        server: Option<&str>,
    ) -> Result<(), ConnectionError> {
        self.inner.clone().connect(jid, password, server).await
    }

    pub fn disconnect(&self) {
        self.inner.disconnect()
    }

    pub fn connected_jid(&self) -> Option<FullJid> {
        self.inner.context.jid.read().clone()
    }

    pub fn get_mod<M: AnyModule + Clone>(&self) -> M {
        self.inner.get_mod()
    }

    pub fn send_raw_stanza(&self, stanza: impl Into<Element>) -> Result<()> {
        self.inner.context.send_stanza(stanza)
    }
}

pub(super) struct ClientInner {
    pub context: Arc<ModuleContextInner>,
    pub mods: Arc<ModuleLookup>,
}

impl ClientInner {
    async fn connect(
        self: Arc<Self>,
        jid: &FullJid,
        password: SecretString,
        server: Option<&str>,
    ) -> Result<(), ConnectionError> {
        self.disconnect();

        *self.context.jid.write() = Some(jid.clone());

        let inner = self.clone();

        let connection = (self.context.connector_provider)()
            .connect(
                jid,
                password,
                server,
                Box::new(move |_, event| inner.handle_event(event)),
            )
            .await?;

        self.context.connection.write().replace(connection);

        for (_, m) in self.mods.iter() {
            if let Err(err) = m.read().handle_connect() {
                warn!("Encountered error in module {}", err);
            }
        }

        self.context
            .clone()
            .schedule_event(ClientEvent::Client(Event::Connected));

        Ok(())
    }

    fn disconnect(&self) {
        self.context.disconnect()
    }

    fn get_mod<M: AnyModule + Clone>(&self) -> M {
        let Some(entry) = self.mods.iter().find(|(k, _)| k == &TypeId::of::<M>()) else {
            panic!("Could not find requested module.")
        };
        entry.1.read().as_any().downcast_ref::<M>().unwrap().clone()
    }

    fn handle_event(&self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Disconnected { error } => self
                .context
                .clone()
                .schedule_event(ClientEvent::Client(Event::Disconnected { error })),
            ConnectionEvent::Stanza(stanza) => {
                Self::handle_stanza(&self.context, &self.mods, stanza)
            }
            ConnectionEvent::PingTimer => self
                .context
                .clone()
                .schedule_event(ClientEvent::Client(Event::PingTimer)),
        }
    }

    fn handle_stanza(ctx: &Arc<ModuleContextInner>, mods: &ModuleLookup, stanza: Element) {
        let element = match XmppElement::try_from(stanza) {
            Ok(elem) => elem,
            Err(err) => {
                error!("Failed to parse stanza. {}", err);
                return;
            }
        };

        if let XmppElement::Iq(iq) = &element {
            if let IqType::Error(err) = &iq.payload {
                error!("IQ error received, id: {}. {:?}", iq.id, err.texts);
                ctx.clone()
                    .schedule_event(ClientEvent::Client(Event::IqError {
                        id: iq.id.clone(),
                    }));
            }
        }

        // Each module sees the stanza in registration order and picks what
        // it is responsible for; a failing module never aborts dispatch.
        for (_, m) in mods.iter() {
            if let Err(err) = m.read().handle_element(&element) {
                error!("Encountered error in module {}", err);
            }
        }
    }
}

impl TryFrom<Arc<ModuleContextInner>> for Client {
    type Error = anyhow::Error;

    fn try_from(value: Arc<ModuleContextInner>) -> std::result::Result<Self, Self::Error> {
        let mods = value.mods.upgrade().ok_or(anyhow::format_err!(
            "Used module after client was released."
        ))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                context: value,
                mods,
            }),
        })
    }
}
