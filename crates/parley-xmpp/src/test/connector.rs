// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use jid::FullJid;
use minidom::Element;
use parking_lot::{Mutex, RwLock};
use secrecy::SecretString;

use crate::client::ConnectorProvider;
use crate::connector::{
    Connection as ConnectionTrait, ConnectionError, ConnectionEvent, ConnectionEventHandler,
    Connector as ConnectorTrait,
};

pub struct Connector {
    connection: Connection,
}

impl Connector {
    pub fn provider(connection: Connection) -> ConnectorProvider {
        Box::new(move || {
            Box::new(Connector {
                connection: connection.clone(),
            })
        })
    }
}

#[async_trait]
impl ConnectorTrait for Connector {
    async fn connect(
        &self,
        _jid: &FullJid,
        _password: SecretString,
        _server: Option<&str>,
        event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn ConnectionTrait>, ConnectionError> {
        *self.connection.inner.event_handler.write() = Some(event_handler);
        Ok(Box::new(self.connection.clone()))
    }
}

pub type SentStanzaHandler = dyn FnMut(&Element) -> Vec<Element> + Send;

#[derive(Default, Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

#[derive(Default)]
struct ConnectionInner {
    sent_stanzas: Mutex<Vec<Element>>,
    stanza_handler: Mutex<Option<Box<SentStanzaHandler>>>,
    event_handler: RwLock<Option<ConnectionEventHandler>>,
}

impl Connection {
    /// Installs a canned responder invoked for every outbound stanza; the
    /// elements it returns are delivered back inline.
    pub fn set_stanza_handler<F>(&self, handler: F)
    where
        F: FnMut(&Element) -> Vec<Element> + Send + 'static,
    {
        *self.inner.stanza_handler.lock() = Some(Box::new(handler))
    }

    pub fn sent_stanzas(&self) -> Vec<Element> {
        self.inner.sent_stanzas.lock().clone()
    }

    pub fn sent_stanza_strings(&self) -> Vec<String> {
        self.inner
            .sent_stanzas
            .lock()
            .iter()
            .map(String::from)
            .collect()
    }

    pub fn reset(&self) {
        self.inner.sent_stanzas.lock().clear()
    }

    pub fn receive_stanza(&self, stanza: impl Into<Element>) {
        self.fire_event(ConnectionEvent::Stanza(stanza.into()))
    }

    pub fn receive_disconnect(&self, error: Option<ConnectionError>) {
        self.fire_event(ConnectionEvent::Disconnected { error })
    }

    pub fn fire_ping_timer(&self) {
        self.fire_event(ConnectionEvent::PingTimer)
    }

    fn fire_event(&self, event: ConnectionEvent) {
        let guard = self.inner.event_handler.read();
        let event_handler = guard.as_ref().expect("No event handler registered");
        let conn = Connection {
            inner: self.inner.clone(),
        };
        (event_handler)(&conn, event)
    }
}

impl ConnectionTrait for Connection {
    fn send_stanza(&self, stanza: Element) -> Result<()> {
        let responses = if let Some(handler) = self.inner.stanza_handler.lock().as_mut() {
            (handler)(&stanza)
        } else {
            vec![]
        };

        self.inner.sent_stanzas.lock().push(stanza);

        if let Some(event_handler) = &*self.inner.event_handler.read() {
            for response in responses {
                let conn = Connection {
                    inner: self.inner.clone(),
                };
                (event_handler)(&conn, ConnectionEvent::Stanza(response));
            }
        }

        Ok(())
    }

    fn disconnect(&self) {}
}
