// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use jid::FullJid;
use minidom::Element;
use secrecy::SecretString;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("Timed out")]
    TimedOut,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{msg}")]
    Generic { msg: String },
}

pub type ConnectionEventHandler = Box<dyn Fn(&dyn Connection, ConnectionEvent) + Send + Sync>;

/// Establishes authenticated streams to an XMPP server. The transport
/// itself (DNS, TCP, TLS, SASL, XML framing) lives behind this trait.
#[async_trait]
pub trait Connector: Send + Sync {
    /// `server` overrides the host that would otherwise be resolved from
    /// the JID's domain.
    async fn connect(
        &self,
        jid: &FullJid,
        password: SecretString,
        server: Option<&str>,
        event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn Connection>, ConnectionError>;
}

#[derive(Debug)]
pub enum ConnectionEvent {
    Disconnected { error: Option<ConnectionError> },
    Stanza(Element),
    PingTimer,
}

pub trait Connection: Send + Sync {
    fn send_stanza(&self, stanza: Element) -> Result<()>;
    fn disconnect(&self);
}
