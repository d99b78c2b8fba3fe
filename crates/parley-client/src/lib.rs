// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use client::{Client, ClientBuilder, ClientDelegate, ClientEvent};
pub use error::ClientError;
pub use parley_xmpp::{ConnectionError, IDProvider, SystemTimeProvider, TimeProvider};

mod client;
mod error;
pub mod types;
