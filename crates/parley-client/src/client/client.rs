// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use jid::{BareJid, FullJid, Jid};
use parking_lot::RwLock;
use secrecy::SecretString;
use tracing::instrument;
use xmpp_parsers::chatstates::ChatState;
use xmpp_parsers::message::MessageType;

use parley_xmpp::mods;
use parley_xmpp::mods::caps::{
    DISCO_INFO_REQUEST_ID, DISCO_ITEMS_REQUEST_ID, ROOM_LIST_REQUEST_ID,
};
use parley_xmpp::{Client as XmppClient, TimeProvider};

use crate::client::{ClientBuilder, ClientDelegate, ClientEvent};
use crate::types::{
    Availability, AutoAwayMode, Capabilities, CapsCache, ChatSessions, ConnectionStatus, Contact,
    Occupant, Preferences, Room, Rooms, Roster, SoftwareVersion, SubscriptionRequests,
};
use crate::ClientError;

/// The session core. Owns the connection state machine and every
/// per-connection model; the embedding UI drives it through these
/// methods and listens through its [`ClientDelegate`].
#[derive(Clone)]
pub struct Client {
    pub(super) inner: Arc<ClientInner>,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish()
    }
}

#[derive(Default)]
pub(super) struct Timers {
    pub next_ping: Option<DateTime<FixedOffset>>,
    pub reconnect_at: Option<DateTime<FixedOffset>>,
    /// The presence to restore when auto-away releases.
    pub auto_away_from: Option<Availability>,
}

pub(super) struct ClientInner {
    pub(super) xmpp: XmppClient,
    pub(super) delegate: Option<Box<dyn ClientDelegate>>,
    pub(super) time_provider: Arc<dyn TimeProvider>,
    pub(super) capabilities: Capabilities,
    pub(super) software: SoftwareVersion,
    pub(super) resource: String,
    pub(super) status: RwLock<ConnectionStatus>,
    pub(super) self_presence: RwLock<Availability>,
    pub(super) roster: RwLock<Roster>,
    pub(super) rooms: RwLock<Rooms>,
    pub(super) chat_sessions: RwLock<ChatSessions>,
    pub(super) caps_cache: CapsCache,
    pub(super) subscription_requests: RwLock<SubscriptionRequests>,
    pub(super) prefs: RwLock<Preferences>,
    pub(super) timers: RwLock<Timers>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Opens the stream and authenticates. Valid while disconnected;
    /// a successful return means the session is live and the initial
    /// presence and roster request are already on the wire.
    #[instrument(skip(self, password))]
    pub async fn connect(
        &self,
        jid: &BareJid,
        password: SecretString,
        server: Option<&str>,
    ) -> Result<(), ClientError> {
        {
            let mut status = self.inner.status.write();
            match *status {
                ConnectionStatus::Disconnected | ConnectionStatus::Started => {
                    *status = ConnectionStatus::Connecting
                }
                _ => return Err(ClientError::AlreadyConnected),
            }
        }

        let full_jid = match jid.with_resource_str(&self.inner.resource) {
            Ok(full_jid) => full_jid,
            Err(err) => {
                *self.inner.status.write() = ConnectionStatus::Disconnected;
                return Err(ClientError::Other(err.into()));
            }
        };

        match self.inner.xmpp.connect(&full_jid, password, server).await {
            Ok(()) => Ok(()),
            Err(error) => {
                *self.inner.status.write() = ConnectionStatus::Disconnected;
                *self.inner.self_presence.write() = Availability::Offline;
                self.inner.fire(ClientEvent::LoginFailed {
                    error: error.clone(),
                });
                Err(error.into())
            }
        }
    }

    /// Sends the stream close. The state machine stays in
    /// `Disconnecting` until the server acknowledges.
    pub fn disconnect(&self) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        *self.inner.status.write() = ConnectionStatus::Disconnecting;
        *self.inner.timers.write() = Timers::default();
        self.inner.xmpp.disconnect();
        Ok(())
    }

    pub fn send_chat_message(&self, to: &Jid, body: &str) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;

        let peer = to.to_bare();
        let (states, gone_minutes) = {
            let prefs = self.inner.prefs.read();
            (prefs.states, prefs.gone_minutes)
        };

        let chat_state = states.then_some(ChatState::Active);
        self.inner
            .chat_mod()
            .send_message(to.clone(), body, &MessageType::Chat, chat_state)?;

        if states {
            let mut sessions = self.inner.chat_sessions.write();
            let session = sessions.get_or_create(&peer);
            session.last_sent = Some(ChatState::Active);
            session.gone_deadline = (gone_minutes > 0).then(|| {
                self.inner.time_provider.now() + chrono::Duration::minutes(gone_minutes as i64)
            });
        }

        Ok(())
    }

    pub fn send_room_message(&self, room: &BareJid, body: &str) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner.ensure_in_room(room)?;

        self.inner.chat_mod().send_message(
            Jid::from(room.clone()),
            body,
            &MessageType::Groupchat,
            None,
        )?;
        Ok(())
    }

    /// Joining an already-active room is a no-op.
    pub fn join_room(&self, room: &BareJid, nick: &str) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;

        if !self.inner.rooms.write().join(room, nick) {
            return Ok(());
        }
        self.inner.muc_mod().join_room(room, nick)?;
        Ok(())
    }

    pub fn leave_room(&self, room: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;

        let Some(left) = self.inner.rooms.write().leave(room) else {
            return Err(ClientError::NotInRoom {
                room: room.to_string(),
            });
        };
        self.inner.muc_mod().leave_room(room, &left.nick)?;
        Ok(())
    }

    pub fn change_room_nick(&self, room: &BareJid, nick: &str) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner.ensure_in_room(room)?;

        self.inner.muc_mod().change_nick(room, nick)?;
        if let Some(room) = self.inner.rooms.write().get_mut(room) {
            room.set_nick(nick);
        }
        Ok(())
    }

    pub fn request_subscription(&self, jid: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner.status_mod().subscribe(jid)?;
        self.inner.roster.write().set_pending_out(jid);
        Ok(())
    }

    pub fn approve_subscription(&self, jid: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner.status_mod().subscribed(jid)?;
        self.inner.subscription_requests.write().remove(jid);

        let subscription = {
            let mut roster = self.inner.roster.write();
            let contact = roster.contact_mut_or_insert(jid);
            contact.subscription = contact.subscription.grant_from();
            contact.pending_in = false;
            contact.subscription
        };
        self.inner.fire(ClientEvent::SubscriptionChanged {
            jid: jid.clone(),
            subscription,
        });
        Ok(())
    }

    pub fn deny_subscription(&self, jid: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner.status_mod().unsubscribed(jid)?;
        self.inner.subscription_requests.write().remove(jid);

        let subscription = {
            let mut roster = self.inner.roster.write();
            match roster.contact_mut(jid) {
                Some(contact) => {
                    contact.pending_in = false;
                    contact.subscription = contact.subscription.revoke_from();
                    contact.subscription
                }
                None => Default::default(),
            }
        };
        self.inner.fire(ClientEvent::SubscriptionChanged {
            jid: jid.clone(),
            subscription,
        });
        Ok(())
    }

    /// Stops receiving the contact's presence.
    pub fn retract_subscription(&self, jid: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner.status_mod().unsubscribe(jid)?;

        let subscription = {
            let mut roster = self.inner.roster.write();
            match roster.contact_mut(jid) {
                Some(contact) => {
                    contact.pending_out = false;
                    contact.subscription = contact.subscription.revoke_to();
                    contact.subscription
                }
                None => Default::default(),
            }
        };
        self.inner.fire(ClientEvent::SubscriptionChanged {
            jid: jid.clone(),
            subscription,
        });
        Ok(())
    }

    pub fn update_self_presence(
        &self,
        availability: Availability,
        status: Option<&str>,
        priority: Option<i8>,
    ) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        if availability == Availability::Offline {
            return Err(ClientError::InvalidPreference {
                name: "presence",
                value: availability.to_string(),
            });
        }

        self.inner.status_mod().send_presence(
            availability.to_show(),
            status,
            Some(self.inner.capabilities.caps_element()),
            priority,
        )?;

        *self.inner.self_presence.write() = availability;
        self.inner.timers.write().auto_away_from = None;
        Ok(())
    }

    pub fn request_roster(&self) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner.roster_mod().request_roster()?;
        Ok(())
    }

    pub fn request_disco_info(&self, jid: &Jid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner
            .caps_mod()
            .query_disco_info(jid.clone(), None, DISCO_INFO_REQUEST_ID)?;
        Ok(())
    }

    pub fn request_disco_items(&self, jid: &Jid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner
            .caps_mod()
            .query_disco_items(jid.clone(), DISCO_ITEMS_REQUEST_ID)?;
        Ok(())
    }

    /// Lists the rooms a conference service hosts.
    pub fn request_room_list(&self, service: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner
            .caps_mod()
            .query_disco_items(Jid::from(service.clone()), ROOM_LIST_REQUEST_ID)?;
        Ok(())
    }

    pub fn request_software_version(&self, jid: &FullJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;
        self.inner
            .profile_mod()
            .request_software_version(Jid::from(jid.clone()))?;
        Ok(())
    }

    /// `0` disables the keepalive.
    pub fn set_autoping_interval(&self, seconds: u32) -> Result<(), ClientError> {
        self.inner.prefs.write().autoping_seconds = seconds;
        let connected = *self.inner.status.read() == ConnectionStatus::Connected;

        let mut timers = self.inner.timers.write();
        timers.next_ping = (seconds > 0 && connected)
            .then(|| self.inner.time_provider.now() + chrono::Duration::seconds(seconds as i64));
        Ok(())
    }

    pub fn set_autoaway(
        &self,
        mode: AutoAwayMode,
        minutes: u32,
        message: Option<String>,
        check: bool,
    ) -> Result<(), ClientError> {
        let mut prefs = self.inner.prefs.write();
        prefs.autoaway_mode = mode;
        prefs.autoaway_time = minutes;
        prefs.autoaway_message = message;
        prefs.autoaway_check = check;
        Ok(())
    }

    /// The user is typing towards `peer`; emits `composing` once per
    /// transition when the peer understands chat states.
    pub fn user_typed(&self, peer: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;

        let send = {
            let prefs = self.inner.prefs.read();
            if !(prefs.states && prefs.outtype) {
                return Ok(());
            }
            let mut sessions = self.inner.chat_sessions.write();
            let session = sessions.get_or_create(peer);
            let send = session.supports_chat_states
                && session.last_sent != Some(ChatState::Composing);
            if send {
                session.last_sent = Some(ChatState::Composing);
            }
            send
        };

        if send {
            self.inner.chat_mod().send_chat_state(
                Jid::from(peer.clone()),
                ChatState::Composing,
                &MessageType::Chat,
            )?;
        }
        Ok(())
    }

    /// The user stopped typing without sending.
    pub fn user_paused(&self, peer: &BareJid) -> Result<(), ClientError> {
        self.inner.ensure_connected()?;

        let send = {
            let prefs = self.inner.prefs.read();
            if !(prefs.states && prefs.outtype) {
                return Ok(());
            }
            let mut sessions = self.inner.chat_sessions.write();
            let Some(session) = sessions.get_mut(peer) else {
                return Ok(());
            };
            let send = session.supports_chat_states
                && session.last_sent == Some(ChatState::Composing);
            if send {
                session.last_sent = Some(ChatState::Paused);
            }
            send
        };

        if send {
            self.inner.chat_mod().send_chat_state(
                Jid::from(peer.clone()),
                ChatState::Paused,
                &MessageType::Chat,
            )?;
        }
        Ok(())
    }

    /// The chat window closed; says goodbye when the peer would
    /// understand it.
    pub fn close_chat(&self, peer: &BareJid) -> Result<(), ClientError> {
        let send_gone = {
            let prefs = self.inner.prefs.read();
            let mut sessions = self.inner.chat_sessions.write();
            let session = sessions.remove(peer);
            *self.inner.status.read() == ConnectionStatus::Connected
                && prefs.states
                && session
                    .map(|session| session.supports_chat_states)
                    .unwrap_or(false)
        };

        if send_gone {
            self.inner.chat_mod().send_chat_state(
                Jid::from(peer.clone()),
                ChatState::Gone,
                &MessageType::Chat,
            )?;
        }
        Ok(())
    }

    /// One pump slice: fires whichever deadlines have passed. `idle` is
    /// how long the user has been inactive, as measured by the host
    /// loop.
    pub fn tick(&self, idle: Duration) {
        self.inner.tick(idle)
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        *self.inner.status.read()
    }

    pub fn connected_jid(&self) -> Option<BareJid> {
        self.inner.xmpp.connected_jid().map(|jid| jid.to_bare())
    }

    pub fn self_presence(&self) -> Availability {
        *self.inner.self_presence.read()
    }

    pub fn subscription_requests(&self) -> Vec<BareJid> {
        self.inner.subscription_requests.read().jids()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.inner.roster.read().contacts().cloned().collect()
    }

    pub fn contact(&self, jid: &BareJid) -> Option<Contact> {
        self.inner.roster.read().contact(jid).cloned()
    }

    pub fn contacts_matching(&self, prefix: &str) -> Vec<Contact> {
        self.inner
            .roster
            .read()
            .matching_prefix(prefix)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn contacts_with_availability(&self, availability: Availability) -> Vec<Contact> {
        self.inner
            .roster
            .read()
            .contacts_with_availability(availability)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn has_pending_subscription_requests(&self) -> bool {
        self.inner.roster.read().has_pending_out()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.inner.rooms.read().iter().cloned().collect()
    }

    pub fn room_occupants(&self, room: &BareJid) -> Result<Vec<Occupant>, ClientError> {
        self.inner
            .rooms
            .read()
            .get(room)
            .map(|room| room.occupants().into_iter().cloned().collect())
            .ok_or(ClientError::NotInRoom {
                room: room.to_string(),
            })
    }

    pub fn peer_supports_chat_states(&self, peer: &BareJid) -> bool {
        self.inner.chat_sessions.read().supports_chat_states(peer)
    }

    pub fn capability_cache(&self) -> &CapsCache {
        &self.inner.caps_cache
    }

    pub fn preferences(&self) -> Preferences {
        self.inner.prefs.read().clone()
    }

    pub fn set_preferences(&self, preferences: Preferences) -> Result<(), ClientError> {
        preferences.validate()?;
        let autoping = preferences.autoping_seconds;
        *self.inner.prefs.write() = preferences;
        self.set_autoping_interval(autoping)
    }
}

impl ClientInner {
    pub(super) fn ensure_connected(&self) -> Result<(), ClientError> {
        if *self.status.read() != ConnectionStatus::Connected {
            return Err(ClientError::NotConnected);
        }
        Ok(())
    }

    fn ensure_in_room(&self, room: &BareJid) -> Result<(), ClientError> {
        if !self.rooms.read().is_active(room) {
            return Err(ClientError::NotInRoom {
                room: room.to_string(),
            });
        }
        Ok(())
    }

    pub(super) fn fire(&self, event: ClientEvent) {
        if let Some(delegate) = &self.delegate {
            delegate.handle_event(event);
        }
    }

    pub(super) fn self_bare_jid(&self) -> Option<BareJid> {
        self.xmpp.connected_jid().map(|jid| jid.to_bare())
    }

    pub(super) fn chat_mod(&self) -> mods::Chat {
        self.xmpp.get_mod::<mods::Chat>()
    }

    pub(super) fn status_mod(&self) -> mods::Status {
        self.xmpp.get_mod::<mods::Status>()
    }

    pub(super) fn muc_mod(&self) -> mods::Muc {
        self.xmpp.get_mod::<mods::Muc>()
    }

    pub(super) fn roster_mod(&self) -> mods::Roster {
        self.xmpp.get_mod::<mods::Roster>()
    }

    pub(super) fn caps_mod(&self) -> mods::Caps {
        self.xmpp.get_mod::<mods::Caps>()
    }

    pub(super) fn profile_mod(&self) -> mods::Profile {
        self.xmpp.get_mod::<mods::Profile>()
    }

    pub(super) fn ping_mod(&self) -> mods::Ping {
        self.xmpp.get_mod::<mods::Ping>()
    }

    pub(super) fn tick(&self, idle: Duration) {
        let now = self.time_provider.now();

        if *self.status.read() != ConnectionStatus::Connected {
            let due = {
                let mut timers = self.timers.write();
                match timers.reconnect_at {
                    Some(at) if at <= now => {
                        timers.reconnect_at = None;
                        true
                    }
                    _ => false,
                }
            };
            if due {
                self.fire(ClientEvent::ReconnectDue);
            }
            return;
        }

        self.check_ping(now);
        self.check_auto_away(idle);
        self.check_gone_deadlines(now);
    }

    pub(super) fn check_ping(&self, now: DateTime<FixedOffset>) {
        let interval = self.prefs.read().autoping_seconds;

        let send = {
            let mut timers = self.timers.write();
            if interval == 0 {
                timers.next_ping = None;
                false
            } else {
                match timers.next_ping {
                    Some(at) if at <= now => {
                        timers.next_ping =
                            Some(now + chrono::Duration::seconds(interval as i64));
                        true
                    }
                    None => {
                        timers.next_ping =
                            Some(now + chrono::Duration::seconds(interval as i64));
                        false
                    }
                    _ => false,
                }
            }
        };

        if send {
            if let Err(err) = self.ping_mod().send_ping() {
                tracing::warn!("Failed to send ping. {}", err);
            }
        }
    }

    fn check_auto_away(&self, idle: Duration) {
        let prefs = self.prefs.read().clone();
        if prefs.autoaway_mode == AutoAwayMode::Off || prefs.autoaway_time == 0 {
            return;
        }

        let threshold = Duration::from_secs(prefs.autoaway_time as u64 * 60);
        let auto_away_from = self.timers.read().auto_away_from;

        if auto_away_from.is_none() {
            if idle < threshold || *self.self_presence.read() != Availability::Online {
                return;
            }

            let message = match prefs.autoaway_mode {
                AutoAwayMode::Away => prefs.autoaway_message.clone(),
                _ => None,
            };
            if self
                .status_mod()
                .send_presence(
                    Availability::Away.to_show(),
                    message.as_deref(),
                    Some(self.capabilities.caps_element()),
                    None,
                )
                .is_ok()
            {
                self.timers.write().auto_away_from = Some(Availability::Online);
                *self.self_presence.write() = Availability::Away;
            }
        } else if prefs.autoaway_check && idle < threshold {
            let prior = auto_away_from.unwrap_or(Availability::Online);
            if self
                .status_mod()
                .send_presence(
                    prior.to_show(),
                    None,
                    Some(self.capabilities.caps_element()),
                    None,
                )
                .is_ok()
            {
                self.timers.write().auto_away_from = None;
                *self.self_presence.write() = prior;
            }
        }
    }

    pub(super) fn check_gone_deadlines(&self, now: DateTime<FixedOffset>) {
        let expired = self.chat_sessions.read().expired(now);
        if expired.is_empty() {
            return;
        }

        let states = self.prefs.read().states;
        for peer in expired {
            let supported = {
                let mut sessions = self.chat_sessions.write();
                sessions
                    .remove(&peer)
                    .map(|session| session.supports_chat_states)
                    .unwrap_or(false)
            };

            if states && supported {
                if let Err(err) = self.chat_mod().send_chat_state(
                    Jid::from(peer),
                    ChatState::Gone,
                    &MessageType::Chat,
                ) {
                    tracing::warn!("Failed to close chat session. {}", err);
                }
            }
        }
    }
}
