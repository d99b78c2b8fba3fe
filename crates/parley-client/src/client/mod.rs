// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use builder::ClientBuilder;
pub use client::Client;
pub use events::{ClientDelegate, ClientEvent};

mod builder;
#[allow(clippy::module_inception)]
mod client;
mod events;
mod handlers;
