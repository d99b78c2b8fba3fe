// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod caps;
pub mod message;
pub mod ns;

pub use caps::Caps;
pub use message::Message;
