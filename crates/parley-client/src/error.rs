// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use parley_xmpp::ConnectionError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Not connected")]
    NotConnected,
    #[error("Already connected or connecting")]
    AlreadyConnected,
    #[error("Not in room {room}")]
    NotInRoom { room: String },
    #[error("Value {value} out of range for {name}")]
    ValueOutOfRange { name: &'static str, value: i64 },
    #[error("Invalid value {value:?} for {name}")]
    InvalidPreference { name: &'static str, value: String },
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
