// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use strum_macros::Display;

/// Lifecycle of the stream to the server. `Started` is the freshly
/// initialized state before the first connect attempt; every terminal
/// failure lands back in `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    Disconnected,
    #[default]
    Started,
    Connecting,
    Connected,
    Disconnecting,
}
