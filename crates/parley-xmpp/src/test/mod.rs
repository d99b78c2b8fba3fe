// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connected_client::{ClientTestAdditions, ConnectedClient};
pub use connector::{Connection, Connector, SentStanzaHandler};
pub use constant_time_provider::ConstantTimeProvider;
pub use incrementing_id_provider::IncrementingIDProvider;

mod connector;

pub trait StrExt {
    fn to_xml_result_string(&self) -> String;
}

impl StrExt for &str {
    fn to_xml_result_string(&self) -> String {
        let mut result = self.to_string();
        result.retain(|c| c != '\n' && c != '\t');
        result.replace("  ", "")
    }
}
