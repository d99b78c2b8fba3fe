// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use jid::BareJid;
use xmpp_parsers::chatstates::ChatState;

/// Per-peer XEP-0085 bookkeeping. A session exists from the first
/// exchanged message until the window closes or the gone timer fires.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub peer: BareJid,
    /// Flips to true on the first chat-state child the peer sends; until
    /// then we only ever attach states to bodied messages.
    pub supports_chat_states: bool,
    pub last_sent: Option<ChatState>,
    pub gone_deadline: Option<DateTime<FixedOffset>>,
}

impl ChatSession {
    fn new(peer: BareJid) -> Self {
        ChatSession {
            peer,
            supports_chat_states: false,
            last_sent: None,
            gone_deadline: None,
        }
    }
}

#[derive(Default)]
pub struct ChatSessions {
    sessions: HashMap<String, ChatSession>,
}

impl ChatSessions {
    pub fn get(&self, peer: &BareJid) -> Option<&ChatSession> {
        self.sessions.get(&peer.to_string())
    }

    pub(crate) fn get_mut(&mut self, peer: &BareJid) -> Option<&mut ChatSession> {
        self.sessions.get_mut(&peer.to_string())
    }

    pub fn get_or_create(&mut self, peer: &BareJid) -> &mut ChatSession {
        self.sessions
            .entry(peer.to_string())
            .or_insert_with(|| ChatSession::new(peer.clone()))
    }

    pub fn remove(&mut self, peer: &BareJid) -> Option<ChatSession> {
        self.sessions.remove(&peer.to_string())
    }

    /// Marks the peer as understanding chat states; returns true on the
    /// first time.
    pub fn mark_supported(&mut self, peer: &BareJid) -> bool {
        let session = self.get_or_create(peer);
        let newly = !session.supports_chat_states;
        session.supports_chat_states = true;
        newly
    }

    pub fn supports_chat_states(&self, peer: &BareJid) -> bool {
        self.get(peer)
            .map(|session| session.supports_chat_states)
            .unwrap_or(false)
    }

    /// Peers whose gone deadline has passed.
    pub fn expired(&self, now: DateTime<FixedOffset>) -> Vec<BareJid> {
        self.sessions
            .values()
            .filter(|session| {
                session
                    .gone_deadline
                    .map(|deadline| deadline <= now)
                    .unwrap_or(false)
            })
            .map(|session| session.peer.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_mark_supported_reports_first_transition() {
        let mut sessions = ChatSessions::default();
        let peer = BareJid::new("a@x").unwrap();

        assert!(!sessions.supports_chat_states(&peer));
        assert!(sessions.mark_supported(&peer));
        assert!(!sessions.mark_supported(&peer));
        assert!(sessions.supports_chat_states(&peer));
    }

    #[test]
    fn test_expired_reports_only_passed_deadlines() {
        let mut sessions = ChatSessions::default();
        let early = BareJid::new("early@x").unwrap();
        let late = BareJid::new("late@x").unwrap();

        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap().into();

        sessions.get_or_create(&early).gone_deadline =
            Some(Utc.with_ymd_and_hms(2026, 2, 1, 11, 0, 0).unwrap().into());
        sessions.get_or_create(&late).gone_deadline =
            Some(Utc.with_ymd_and_hms(2026, 2, 1, 13, 0, 0).unwrap().into());

        assert_eq!(sessions.expired(now), vec![early]);
    }
}
