// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use xmpp_parsers::presence::Show;

/// What a contact (or we ourselves) currently advertises. `Offline` never
/// appears on the wire; it is the absence of an available resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Online,
    Chat,
    Away,
    Xa,
    Dnd,
    Offline,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        *self != Availability::Offline
    }

    /// The `<show/>` child carried in presence; online is implicit.
    pub fn to_show(self) -> Option<Show> {
        match self {
            Availability::Online | Availability::Offline => None,
            Availability::Chat => Some(Show::Chat),
            Availability::Away => Some(Show::Away),
            Availability::Xa => Some(Show::Xa),
            Availability::Dnd => Some(Show::Dnd),
        }
    }

    pub fn from_show(show: Option<Show>) -> Self {
        match show {
            None => Availability::Online,
            Some(Show::Chat) => Availability::Chat,
            Some(Show::Away) => Availability::Away,
            Some(Show::Xa) => Availability::Xa,
            Some(Show::Dnd) => Availability::Dnd,
        }
    }
}
