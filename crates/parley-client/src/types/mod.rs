// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use account::AccountSettings;
pub use availability::Availability;
pub use capabilities::{
    supported_features, ver_hash, ver_hash_for_info, Capabilities, Identity, SoftwareVersion,
};
pub use caps_cache::{CapabilityEntry, CapsCache};
pub use chat_state::{ChatSession, ChatSessions};
pub use connection_status::ConnectionStatus;
pub use contact::{Contact, Resource, Subscription};
pub use muc::{Occupant, Room, Rooms};
pub use preferences::{AutoAwayMode, Preferences};
pub use roster::Roster;
pub use subscriptions::SubscriptionRequests;

mod account;
mod availability;
mod capabilities;
mod caps_cache;
mod chat_state;
mod connection_status;
mod contact;
mod muc;
mod preferences;
mod roster;
mod subscriptions;
