// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;
use serde::{Deserialize, Serialize};

use crate::types::Availability;

/// One configured account as the external config layer persists it. The
/// session consumes these values; loading and saving them is not its
/// business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSettings {
    pub jid: BareJid,
    pub server: Option<String>,
    pub resource: Option<String>,
    pub muc_service: Option<String>,
    pub muc_nick: Option<String>,
    pub last_presence: Availability,
    pub login_presence: Availability,
    pub priority_online: i8,
    pub priority_chat: i8,
    pub priority_away: i8,
    pub priority_xa: i8,
    pub priority_dnd: i8,
    pub enabled: bool,
}

impl AccountSettings {
    pub fn new(jid: BareJid) -> Self {
        AccountSettings {
            jid,
            server: None,
            resource: None,
            muc_service: None,
            muc_nick: None,
            last_presence: Availability::Online,
            login_presence: Availability::Online,
            priority_online: 0,
            priority_chat: 0,
            priority_away: 0,
            priority_xa: 0,
            priority_dnd: 0,
            enabled: true,
        }
    }

    pub fn priority_for(&self, availability: Availability) -> i8 {
        match availability {
            Availability::Online | Availability::Offline => self.priority_online,
            Availability::Chat => self.priority_chat,
            Availability::Away => self.priority_away,
            Availability::Xa => self.priority_xa,
            Availability::Dnd => self.priority_dnd,
        }
    }
}
