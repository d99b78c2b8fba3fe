// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::{client, mods};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Client(client::Event),
    Caps(mods::caps::Event),
    Chat(mods::chat::Event),
    Profile(mods::profile::Event),
    Roster(mods::roster::Event),
    Status(mods::status::Event),
}
