// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::BareJid;
use xmpp_parsers::iq::{Iq, IqType};
use xmpp_parsers::roster::{self, Ask, Subscription};

use crate::client::ModuleContext;
use crate::event::Event as ClientEvent;
use crate::mods::Module;
use crate::ns;

/// The id the roster request is issued under; the result is matched on it.
pub const ROSTER_REQUEST_ID: &str = "roster";

/// RFC 6121 roster management. The server's roster result is authoritative
/// and replaces whatever the owner knew before.
#[derive(Default, Clone)]
pub struct Roster {
    ctx: ModuleContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub jid: BareJid,
    pub name: Option<String>,
    pub subscription: Subscription,
    pub ask: Ask,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Received { items: Vec<Item> },
}

impl Module for Roster {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context
    }

    fn handle_iq_stanza(&self, stanza: &Iq) -> Result<()> {
        let IqType::Result(Some(payload)) = &stanza.payload else {
            return Ok(());
        };

        if stanza.id != ROSTER_REQUEST_ID || !payload.is("query", ns::ROSTER) {
            return Ok(());
        }

        let roster = roster::Roster::try_from(payload.clone())?;
        let items = roster
            .items
            .into_iter()
            .map(|item| Item {
                jid: item.jid,
                name: item.name,
                subscription: item.subscription,
                ask: item.ask,
                groups: item.groups.into_iter().map(|g| g.0).collect(),
            })
            .collect();

        self.ctx
            .schedule_event(ClientEvent::Roster(Event::Received { items }));
        Ok(())
    }
}

impl Roster {
    pub fn request_roster(&self) -> Result<()> {
        let query = roster::Roster {
            ver: None,
            items: vec![],
        };
        self.ctx
            .send_stanza(Iq::from_get(ROSTER_REQUEST_ID.to_string(), query))?;
        Ok(())
    }
}
