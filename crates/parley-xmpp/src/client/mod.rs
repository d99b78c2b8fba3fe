// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::any::TypeId;

use parking_lot::RwLock;

use crate::connector::{ConnectionError, Connector};
use crate::mods::AnyModule;

pub use builder::ClientBuilder;
pub use client::Client;
pub(crate) use module_context::ModuleContext;

mod builder;
#[allow(clippy::module_inception)]
mod client;
mod module_context;

pub type ConnectorProvider = Box<dyn Fn() -> Box<dyn Connector> + Send + Sync>;
pub type EventHandler = Box<dyn Fn(Client, crate::Event) + Send + Sync>;
pub(crate) type ModuleLookup = Vec<(TypeId, RwLock<Box<dyn AnyModule>>)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Connected,
    Disconnected { error: Option<ConnectionError> },
    PingTimer,
    IqError { id: String },
}
