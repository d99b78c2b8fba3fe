// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::Jid;
use tracing::{debug, info, warn};
use xmpp_parsers::chatstates::ChatState;
use xmpp_parsers::message::MessageType;
use xmpp_parsers::presence::{self, Presence};
use xmpp_parsers::roster::Ask;

use parley_xmpp::mods::caps::{CAPS_REQUEST_ID, DISCO_INFO_REQUEST_ID, DISCO_ITEMS_REQUEST_ID,
    ROOM_LIST_REQUEST_ID};
use parley_xmpp::mods::{caps, chat, muc, profile, roster, status};
use parley_xmpp::{client, Event};

use crate::client::client::ClientInner;
use crate::client::ClientEvent;
use crate::types::{
    ver_hash_for_info, Availability, CapabilityEntry, ConnectionStatus, Contact, Occupant,
    Resource,
};

impl ClientInner {
    pub(super) fn handle_xmpp_event(&self, event: Event) {
        match event {
            Event::Client(event) => self.handle_client_event(event),
            Event::Chat(event) => self.handle_chat_event(event),
            Event::Status(event) => self.handle_status_event(event),
            Event::Caps(event) => self.handle_caps_event(event),
            Event::Roster(event) => self.handle_roster_event(event),
            Event::Profile(event) => self.handle_profile_event(event),
        }
    }

    fn handle_client_event(&self, event: client::Event) {
        match event {
            client::Event::Connected => self.handle_connected(),
            client::Event::Disconnected { error } => self.handle_disconnected(error),
            client::Event::PingTimer => {
                if *self.status.read() == ConnectionStatus::Connected {
                    let now = self.time_provider.now();
                    self.check_ping(now);
                    self.check_gone_deadlines(now);
                }
            }
            client::Event::IqError { id } => self.fire(ClientEvent::IqError { id }),
        }
    }

    fn handle_connected(&self) {
        *self.status.write() = ConnectionStatus::Connected;
        *self.self_presence.write() = Availability::Online;

        if let Err(err) = self.status_mod().send_presence(
            None,
            None,
            Some(self.capabilities.caps_element()),
            None,
        ) {
            warn!("Failed to send initial presence. {}", err);
        }
        if let Err(err) = self.roster_mod().request_roster() {
            warn!("Failed to request roster. {}", err);
        }

        {
            let mut timers = self.timers.write();
            timers.reconnect_at = None;
            let interval = self.prefs.read().autoping_seconds;
            timers.next_ping = (interval > 0)
                .then(|| self.time_provider.now() + chrono::Duration::seconds(interval as i64));
        }

        if let Some(jid) = self.self_bare_jid() {
            info!(%jid, "Logged in");
            self.fire(ClientEvent::LoginSuccess { jid });
        }
    }

    fn handle_disconnected(&self, error: Option<parley_xmpp::ConnectionError>) {
        let previous = {
            let mut status = self.status.write();
            let previous = *status;
            *status = ConnectionStatus::Disconnected;
            previous
        };
        *self.self_presence.write() = Availability::Offline;

        // Per-connection models die with the stream; the capability
        // cache is process-lived.
        self.roster.write().clear();
        self.rooms.write().clear();
        self.chat_sessions.write().clear();
        self.subscription_requests.write().clear();

        let reconnect_seconds = self.prefs.read().reconnect_seconds;
        {
            let mut timers = self.timers.write();
            timers.next_ping = None;
            timers.auto_away_from = None;
            timers.reconnect_at = None;
        }

        match previous {
            ConnectionStatus::Disconnecting => (),
            ConnectionStatus::Connected => {
                info!("Lost connection");
                if reconnect_seconds > 0 {
                    self.timers.write().reconnect_at = Some(
                        self.time_provider.now()
                            + chrono::Duration::seconds(reconnect_seconds as i64),
                    );
                }
                self.fire(ClientEvent::LostConnection);
            }
            _ => {
                let error = error.unwrap_or(parley_xmpp::ConnectionError::Generic {
                    msg: "connection failed".to_string(),
                });
                self.fire(ClientEvent::LoginFailed { error });
            }
        }
    }

    fn handle_chat_event(&self, event: chat::Event) {
        match event {
            chat::Event::Sent(_) => (),
            chat::Event::ChatStateChanged {
                from,
                chat_state,
                message_type,
            } => {
                if message_type == MessageType::Groupchat {
                    return;
                }
                let peer = from.to_bare();
                self.chat_sessions.write().mark_supported(&peer);

                if self.prefs.read().intype {
                    self.fire(ClientEvent::ComposingChanged {
                        from: peer,
                        composing: chat_state == ChatState::Composing,
                    });
                }
            }
            chat::Event::Message(message) => {
                let Some(from) = message.from.clone() else {
                    return;
                };
                let Some(body) = message.body.clone() else {
                    return;
                };
                let delay = message.delay.as_ref().map(|delay| delay.stamp.0);

                if message.type_ == MessageType::Groupchat {
                    self.fire(ClientEvent::RoomMessageReceived {
                        room: from.to_bare(),
                        nick: from
                            .resource()
                            .map(|resource| resource.to_string())
                            .unwrap_or_default(),
                        body,
                        delay,
                    });
                    return;
                }

                let peer = from.to_bare();
                self.chat_sessions.write().get_or_create(&peer);
                self.fire(ClientEvent::MessageReceived { from, body, delay });
            }
        }
    }

    fn handle_status_event(&self, event: status::Event) {
        match event {
            status::Event::Presence(stanza) => self.handle_presence(stanza),
            status::Event::Subscribe { from } => {
                {
                    let mut roster = self.roster.write();
                    if let Some(contact) = roster.contact_mut(&from) {
                        // A request only makes sense while the contact's
                        // subscription is none or from.
                        if matches!(
                            contact.subscription,
                            crate::types::Subscription::To | crate::types::Subscription::Both
                        ) {
                            return;
                        }
                        contact.pending_in = true;
                    }
                }
                let newly = self.subscription_requests.write().insert(from.clone());
                if newly {
                    self.fire(ClientEvent::SubscriptionRequested { from });
                }
            }
            status::Event::Subscribed { from } => {
                let subscription = {
                    let mut roster = self.roster.write();
                    let contact = roster.contact_mut_or_insert(&from);
                    contact.subscription = contact.subscription.grant_to();
                    contact.pending_out = false;
                    contact.subscription
                };
                self.fire(ClientEvent::SubscriptionChanged {
                    jid: from,
                    subscription,
                });
            }
            status::Event::Unsubscribed { from } => {
                let subscription = {
                    let mut roster = self.roster.write();
                    let Some(contact) = roster.contact_mut(&from) else {
                        return;
                    };
                    contact.subscription = contact.subscription.revoke_to();
                    contact.pending_out = false;
                    contact.subscription
                };
                self.fire(ClientEvent::SubscriptionChanged {
                    jid: from,
                    subscription,
                });
            }
            status::Event::Unsubscribe { from } => {
                let subscription = {
                    let mut roster = self.roster.write();
                    let Some(contact) = roster.contact_mut(&from) else {
                        return;
                    };
                    contact.subscription = contact.subscription.revoke_from();
                    contact.pending_in = false;
                    contact.subscription
                };
                self.fire(ClientEvent::SubscriptionChanged {
                    jid: from,
                    subscription,
                });
            }
        }
    }

    fn handle_presence(&self, stanza: Presence) {
        let Some(from) = stanza.from.clone() else {
            return;
        };
        let bare = from.to_bare();

        if Some(&bare) == self.self_bare_jid().as_ref() {
            return;
        }

        if self.rooms.read().is_active(&bare) {
            self.handle_room_presence(stanza, from);
        } else {
            self.handle_contact_presence(stanza, from);
        }
    }

    fn handle_room_presence(&self, stanza: Presence, from: Jid) {
        let room_jid = from.to_bare();
        let Some(nick) = from.resource().map(|resource| resource.to_string()) else {
            return;
        };

        let muc_user = muc::muc_user(&stanza);
        let unavailable = stanza.type_ == presence::Type::Unavailable;

        let own_nick = match self.rooms.read().get(&room_jid) {
            Some(room) => room.nick.clone(),
            None => return,
        };
        let is_self = muc_user
            .as_ref()
            .map(muc::is_self_presence)
            .unwrap_or(false)
            || nick == own_nick;

        if unavailable {
            if is_self {
                self.rooms.write().leave(&room_jid);
                self.fire(ClientEvent::RoomLeft { room: room_jid });
            } else if self
                .rooms
                .write()
                .get_mut(&room_jid)
                .and_then(|room| room.remove_occupant(&nick))
                .is_some()
            {
                self.fire(ClientEvent::OccupantLeft {
                    room: room_jid,
                    nick,
                });
            }
            return;
        }

        let availability = Availability::from_show(stanza.show.clone());
        let status = stanza.statuses.values().next().cloned();

        let event = {
            let mut rooms = self.rooms.write();
            let Some(room) = rooms.get_mut(&room_jid) else {
                return;
            };

            if is_self {
                if nick != room.nick {
                    room.set_nick(nick.clone());
                }
                room.upsert_occupant(Occupant {
                    nick: nick.clone(),
                    availability,
                    status,
                });
                let newly_joined = !room.joined;
                room.joined = true;
                newly_joined.then(|| ClientEvent::RoomJoined {
                    room: room_jid.clone(),
                    nick: nick.clone(),
                })
            } else {
                let newly = room.upsert_occupant(Occupant {
                    nick: nick.clone(),
                    availability,
                    status,
                });
                newly.then(|| ClientEvent::OccupantJoined {
                    room: room_jid.clone(),
                    nick: nick.clone(),
                    availability,
                })
            }
        };

        if let Some(event) = event {
            self.fire(event);
        }
    }

    fn handle_contact_presence(&self, stanza: Presence, from: Jid) {
        let bare = from.to_bare();
        let resource_name = from
            .resource()
            .map(|resource| resource.to_string())
            .unwrap_or_default();

        let resource = (stanza.type_ != presence::Type::Unavailable).then(|| {
            // Keep the caps reference the resource advertised earlier;
            // the caps handler refreshes it separately.
            let caps_node = self
                .roster
                .read()
                .contact(&bare)
                .and_then(|contact| contact.resource(&resource_name))
                .and_then(|resource| resource.caps_node.clone());

            Resource {
                name: resource_name.clone(),
                availability: Availability::from_show(stanza.show.clone()),
                priority: stanza.priority,
                status: stanza.statuses.values().next().cloned(),
                caps_node,
            }
        });

        let change = self
            .roster
            .write()
            .apply_presence(&bare, resource, &resource_name);

        if let Some((availability, status)) = change {
            self.fire(ClientEvent::ContactPresenceChanged {
                jid: bare,
                availability,
                status,
            });
        }
    }

    fn handle_caps_event(&self, event: caps::Event) {
        match event {
            caps::Event::Caps { from, caps } => {
                let node_ver = caps.node_ver();
                let bare = from.to_bare();

                if let Some(resource) = from.resource().map(|resource| resource.to_string()) {
                    let mut roster = self.roster.write();
                    if let Some(resource) = roster
                        .contact_mut(&bare)
                        .and_then(|contact| contact.resource_mut(&resource))
                    {
                        resource.caps_node = Some(node_ver.clone());
                    }
                }

                if !self.caps_cache.contains(&node_ver) {
                    debug!(node = %node_ver, "Requesting capabilities");
                    if let Err(err) =
                        self.caps_mod()
                            .query_disco_info(from, Some(node_ver), CAPS_REQUEST_ID)
                    {
                        warn!("Failed to query capabilities. {}", err);
                    }
                }
            }
            caps::Event::DiscoInfoQuery { from, id, node } => {
                if let Err(err) = self.caps_mod().send_disco_info_response(
                    from,
                    id,
                    self.capabilities.disco_info_result(node),
                ) {
                    warn!("Failed to answer disco#info query. {}", err);
                }
            }
            caps::Event::DiscoInfoResult { from, id, info } => {
                if id == DISCO_INFO_REQUEST_ID {
                    self.fire(ClientEvent::DiscoInfoReceived {
                        from,
                        identities: info.identities,
                        features: info.features,
                    });
                } else if id.starts_with(CAPS_REQUEST_ID) {
                    self.cache_capabilities(info);
                }
            }
            caps::Event::DiscoItemsResult { from, id, items } => {
                if id == ROOM_LIST_REQUEST_ID {
                    self.fire(ClientEvent::RoomListReceived { from, items });
                } else if id == DISCO_ITEMS_REQUEST_ID {
                    self.fire(ClientEvent::DiscoItemsReceived { from, items });
                }
            }
        }
    }

    /// XEP-0115 §6: the response is trusted only when the hash we
    /// compute over it matches the ver segment of its node.
    fn cache_capabilities(&self, info: caps::DiscoInfo) {
        let Some(node) = info.node.clone() else {
            return;
        };
        let Some(declared) = node.splitn(2, '#').nth(1).map(ToString::to_string) else {
            return;
        };

        if self.caps_cache.contains(&node) {
            return;
        }

        let computed = ver_hash_for_info(&info);
        if computed != declared {
            info!(
                declared = %declared,
                computed = %computed,
                "Capability hash mismatch, dropping response"
            );
            return;
        }

        self.caps_cache
            .insert(node, CapabilityEntry::from_disco_info(&info));
    }

    fn handle_roster_event(&self, event: roster::Event) {
        let roster::Event::Received { items } = event;

        let contacts = items.into_iter().map(|item| {
            let mut contact = Contact::new(item.jid);
            contact.name = item.name;
            contact.subscription = item.subscription.into();
            contact.pending_out = item.ask == Ask::Subscribe;
            contact.groups = item.groups;
            contact
        });

        self.roster.write().replace(contacts);
        self.fire(ClientEvent::RosterReplaced);
    }

    fn handle_profile_event(&self, event: profile::Event) {
        match event {
            profile::Event::VersionQuery { from, id } => {
                if let Err(err) = self.profile_mod().send_software_version_response(
                    from,
                    id,
                    self.software.name.clone(),
                    self.software.version.clone(),
                    self.software.os.clone(),
                ) {
                    warn!("Failed to answer version query. {}", err);
                }
            }
            profile::Event::VersionResult {
                from,
                name,
                version,
                os,
            } => {
                self.fire(ClientEvent::SoftwareVersionReceived {
                    from,
                    name,
                    version,
                    os,
                });
            }
        }
    }
}
