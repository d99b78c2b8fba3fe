// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, FixedOffset};
use jid::{BareJid, Jid};

use parley_xmpp::mods::caps::{DiscoIdentity, DiscoItem};
use parley_xmpp::ConnectionError;

use crate::types::{Availability, Subscription};

/// The upward interface: everything the embedding UI learns from the
/// session arrives through here, as owned snapshots.
pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, event: ClientEvent);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    LoginSuccess {
        jid: BareJid,
    },
    LoginFailed {
        error: ConnectionError,
    },
    LostConnection,
    /// The derived presence of a contact changed; fired once per change.
    ContactPresenceChanged {
        jid: BareJid,
        availability: Availability,
        status: Option<String>,
    },
    MessageReceived {
        from: Jid,
        body: String,
        delay: Option<DateTime<FixedOffset>>,
    },
    RoomMessageReceived {
        room: BareJid,
        nick: String,
        body: String,
        delay: Option<DateTime<FixedOffset>>,
    },
    ComposingChanged {
        from: BareJid,
        composing: bool,
    },
    RosterReplaced,
    SubscriptionRequested {
        from: BareJid,
    },
    SubscriptionChanged {
        jid: BareJid,
        subscription: Subscription,
    },
    RoomJoined {
        room: BareJid,
        nick: String,
    },
    RoomLeft {
        room: BareJid,
    },
    OccupantJoined {
        room: BareJid,
        nick: String,
        availability: Availability,
    },
    OccupantLeft {
        room: BareJid,
        nick: String,
    },
    DiscoInfoReceived {
        from: Option<Jid>,
        identities: Vec<DiscoIdentity>,
        features: Vec<String>,
    },
    DiscoItemsReceived {
        from: Option<Jid>,
        items: Vec<DiscoItem>,
    },
    RoomListReceived {
        from: Option<Jid>,
        items: Vec<DiscoItem>,
    },
    SoftwareVersionReceived {
        from: Option<Jid>,
        name: String,
        version: String,
        os: Option<String>,
    },
    IqError {
        id: String,
    },
    /// The reconnect interval elapsed after a lost connection; the owner
    /// of the credentials decides whether to call `connect` again.
    ReconnectDue,
}
