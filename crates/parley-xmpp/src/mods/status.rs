// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::{BareJid, Jid};
use xmpp_parsers::presence::{self, Presence};

use crate::client::ModuleContext;
use crate::event::Event as ClientEvent;
use crate::mods::Module;
use crate::stanza::Caps;

/// Presence broadcast and RFC 6121 subscription management.
#[derive(Default, Clone)]
pub struct Status {
    ctx: ModuleContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Presence(Presence),
    Subscribe { from: BareJid },
    Subscribed { from: BareJid },
    Unsubscribe { from: BareJid },
    Unsubscribed { from: BareJid },
}

impl Module for Status {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context;
    }

    fn handle_presence_stanza(&self, stanza: &Presence) -> Result<()> {
        let subscription_event = |stanza: &Presence, f: fn(BareJid) -> Event| {
            stanza.from.as_ref().map(|from| f(from.to_bare()))
        };

        let event = match stanza.type_ {
            presence::Type::Subscribe => subscription_event(stanza, |from| Event::Subscribe { from }),
            presence::Type::Subscribed => {
                subscription_event(stanza, |from| Event::Subscribed { from })
            }
            presence::Type::Unsubscribe => {
                subscription_event(stanza, |from| Event::Unsubscribe { from })
            }
            presence::Type::Unsubscribed => {
                subscription_event(stanza, |from| Event::Unsubscribed { from })
            }
            presence::Type::None | presence::Type::Unavailable => {
                Some(Event::Presence(stanza.clone()))
            }
            presence::Type::Probe | presence::Type::Error => None,
        };

        if let Some(event) = event {
            self.ctx.schedule_event(ClientEvent::Status(event));
        }
        Ok(())
    }
}

impl Status {
    /// XMPP: Instant Messaging and Presence
    /// https://xmpp.org/rfcs/rfc6121.html#presence
    pub fn send_presence(
        &self,
        show: Option<presence::Show>,
        status: Option<&str>,
        caps: Option<Caps>,
        priority: Option<i8>,
    ) -> Result<()> {
        let mut presence = Presence::new(presence::Type::None);
        presence.show = show;
        if let Some(status) = status {
            presence.set_status("", status);
        }
        if let Some(caps) = caps {
            presence.payloads.push(caps.into())
        }
        if let Some(priority) = priority {
            presence.priority = priority
        }
        self.ctx.send_stanza(presence)?;
        Ok(())
    }

    pub fn subscribe(&self, to: &BareJid) -> Result<()> {
        self.send_subscription_presence(to, presence::Type::Subscribe)
    }

    pub fn subscribed(&self, to: &BareJid) -> Result<()> {
        self.send_subscription_presence(to, presence::Type::Subscribed)
    }

    pub fn unsubscribe(&self, to: &BareJid) -> Result<()> {
        self.send_subscription_presence(to, presence::Type::Unsubscribe)
    }

    pub fn unsubscribed(&self, to: &BareJid) -> Result<()> {
        self.send_subscription_presence(to, presence::Type::Unsubscribed)
    }

    fn send_subscription_presence(&self, to: &BareJid, type_: presence::Type) -> Result<()> {
        let mut presence = Presence::new(type_);
        presence.to = Some(Jid::from(to.clone()));
        self.ctx.send_stanza(presence)?;
        Ok(())
    }
}
