// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use jid::BareJid;

use crate::types::Availability;

#[derive(Debug, Clone, PartialEq)]
pub struct Occupant {
    pub nick: String,
    pub availability: Availability,
    pub status: Option<String>,
}

/// An active room. Our own nickname is always present in the occupant
/// table while the room lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub jid: BareJid,
    pub nick: String,
    /// Set once the service confirmed our join with a self-presence.
    pub joined: bool,
    occupants: HashMap<String, Occupant>,
}

impl Room {
    pub fn new(jid: BareJid, nick: impl Into<String>) -> Self {
        let nick = nick.into();
        let mut occupants = HashMap::new();
        occupants.insert(
            nick.clone(),
            Occupant {
                nick: nick.clone(),
                availability: Availability::Online,
                status: None,
            },
        );
        Room {
            jid,
            nick,
            joined: false,
            occupants,
        }
    }

    pub fn occupant(&self, nick: &str) -> Option<&Occupant> {
        self.occupants.get(nick)
    }

    pub fn contains_nick(&self, nick: &str) -> bool {
        self.occupants.contains_key(nick)
    }

    pub fn upsert_occupant(&mut self, occupant: Occupant) -> bool {
        self.occupants
            .insert(occupant.nick.clone(), occupant)
            .is_none()
    }

    pub fn remove_occupant(&mut self, nick: &str) -> Option<Occupant> {
        if nick == self.nick {
            return None;
        }
        self.occupants.remove(nick)
    }

    pub fn set_nick(&mut self, nick: impl Into<String>) {
        let nick = nick.into();
        if let Some(mut own) = self.occupants.remove(&self.nick) {
            own.nick = nick.clone();
            self.occupants.insert(nick.clone(), own);
        }
        self.nick = nick;
    }

    /// Occupants ordered by nickname for display.
    pub fn occupants(&self) -> Vec<&Occupant> {
        let mut occupants: Vec<&Occupant> = self.occupants.values().collect();
        occupants.sort_by(|a, b| a.nick.cmp(&b.nick));
        occupants
    }
}

#[derive(Default)]
pub struct Rooms {
    rooms: HashMap<String, Room>,
}

impl Rooms {
    /// Returns false when the room was already active; joining twice is
    /// not an error.
    pub fn join(&mut self, jid: &BareJid, nick: impl Into<String>) -> bool {
        let key = jid.to_string();
        if self.rooms.contains_key(&key) {
            return false;
        }
        self.rooms.insert(key, Room::new(jid.clone(), nick));
        true
    }

    pub fn leave(&mut self, jid: &BareJid) -> Option<Room> {
        self.rooms.remove(&jid.to_string())
    }

    pub fn is_active(&self, jid: &BareJid) -> bool {
        self.rooms.contains_key(&jid.to_string())
    }

    pub fn get(&self, jid: &BareJid) -> Option<&Room> {
        self.rooms.get(&jid.to_string())
    }

    pub(crate) fn get_mut(&mut self, jid: &BareJid) -> Option<&mut Room> {
        self.rooms.get_mut(&jid.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }
}
