// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use xmpp_parsers::iq::{Iq, IqType};
use xmpp_parsers::ping::Ping as PingPayload;

use crate::client::ModuleContext;
use crate::mods::Module;
use crate::ns;

/// Id the keepalive ping is sent under.
pub const PING_ID: &str = "c2s1";

/// XEP-0199: XMPP Ping
/// https://xmpp.org/extensions/xep-0199.html
#[derive(Default, Clone)]
pub struct Ping {
    ctx: ModuleContext,
}

impl Module for Ping {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context
    }

    fn handle_iq_stanza(&self, stanza: &Iq) -> Result<()> {
        let IqType::Get(payload) = &stanza.payload else {
            return Ok(());
        };

        if !payload.is("ping", ns::PING) {
            return Ok(());
        }

        let Some(from) = &stanza.from else {
            return Ok(());
        };

        let pong = Iq {
            from: None,
            to: Some(from.clone()),
            id: stanza.id.clone(),
            payload: IqType::Result(None),
        };
        self.ctx.send_stanza(pong)?;
        Ok(())
    }
}

impl Ping {
    /// Keepalive towards our own server; the result is not tracked.
    pub fn send_ping(&self) -> Result<()> {
        self.ctx
            .send_stanza(Iq::from_get(PING_ID.to_string(), PingPayload))?;
        Ok(())
    }
}
