// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::{BareJid, Jid};
use xmpp_parsers::muc::user::MucUser;
use xmpp_parsers::muc::Muc as MucPayload;
use xmpp_parsers::presence::{self, Presence};

use crate::client::ModuleContext;
use crate::ns;

use super::Module;

/// XEP-0045: Multi-User Chat
/// https://xmpp.org/extensions/xep-0045.html
#[derive(Default, Clone)]
pub struct Muc {
    ctx: ModuleContext,
}

impl Module for Muc {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context
    }
}

impl Muc {
    /// Announces us in the room under `nick`. The empty `x` child tells the
    /// service this is a XEP-0045 join rather than a legacy one.
    pub fn join_room(&self, room: &BareJid, nick: &str) -> Result<()> {
        let mut presence = Presence::new(presence::Type::None);
        presence.to = Some(Jid::from(room.with_resource_str(nick)?));
        presence.payloads.push(MucPayload::new().into());
        self.ctx.send_stanza(presence)?;
        Ok(())
    }

    pub fn leave_room(&self, room: &BareJid, nick: &str) -> Result<()> {
        let mut presence = Presence::new(presence::Type::Unavailable);
        presence.to = Some(Jid::from(room.with_resource_str(nick)?));
        self.ctx.send_stanza(presence)?;
        Ok(())
    }

    /// In-room nick changes are presence to `room/newnick` without the
    /// join payload.
    pub fn change_nick(&self, room: &BareJid, nick: &str) -> Result<()> {
        let mut presence = Presence::new(presence::Type::None);
        presence.to = Some(Jid::from(room.with_resource_str(nick)?));
        self.ctx.send_stanza(presence)?;
        Ok(())
    }
}

/// The `muc#user` payload carried by room presence, if any.
pub fn muc_user(stanza: &Presence) -> Option<MucUser> {
    stanza
        .payloads
        .iter()
        .find(|p| p.is("x", ns::MUC_USER))
        .and_then(|p| MucUser::try_from(p.clone()).ok())
}

/// True when the occupant presence is about ourselves (status code 110).
pub fn is_self_presence(user: &MucUser) -> bool {
    user.status
        .iter()
        .any(|s| *s == xmpp_parsers::muc::user::Status::SelfPresence)
}
