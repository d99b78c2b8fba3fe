// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use xmpp_parsers::iq::Iq;
use xmpp_parsers::presence::Presence;

use crate::ns;
use crate::stanza::Message;

#[derive(Debug)]
pub enum XmppElement {
    Presence(Presence),
    Message(Message),
    Iq(Iq),
}

impl TryFrom<Element> for XmppElement {
    type Error = anyhow::Error;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        if value.is("iq", ns::JABBER_CLIENT) {
            Ok(Self::Iq(Iq::try_from(value)?))
        } else if value.is("message", ns::JABBER_CLIENT) {
            Ok(Self::Message(value.try_into()?))
        } else if value.is("presence", ns::JABBER_CLIENT) {
            Ok(Self::Presence(value.try_into()?))
        } else {
            Err(anyhow::format_err!("Encountered unknown element"))
        }
    }
}
