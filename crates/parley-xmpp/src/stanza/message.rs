// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::Jid;
use minidom::Element;
use xmpp_parsers::chatstates::ChatState;
use xmpp_parsers::delay::Delay;
use xmpp_parsers::message::{Body, MessageType};

use crate::ns;

/// A chat-oriented view of a `<message/>` stanza. Only the payloads the
/// session layer acts on are lifted out; everything else stays behind in
/// the raw element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub from: Option<Jid>,
    pub to: Option<Jid>,
    pub id: Option<String>,
    pub type_: MessageType,
    pub body: Option<String>,
    pub chat_state: Option<ChatState>,
    pub delay: Option<Delay>,
}

impl Message {
    pub fn new() -> Self {
        Message::default()
    }

    pub fn set_from(mut self, from: impl Into<Jid>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn set_to(mut self, to: impl Into<Jid>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_type(mut self, type_: MessageType) -> Self {
        self.type_ = type_;
        self
    }

    pub fn set_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn set_chat_state(mut self, state: Option<ChatState>) -> Self {
        self.chat_state = state;
        self
    }

    pub fn set_delay(mut self, delay: Delay) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl TryFrom<xmpp_parsers::message::Message> for Message {
    type Error = anyhow::Error;

    fn try_from(root: xmpp_parsers::message::Message) -> Result<Self, Self::Error> {
        let body = root
            .get_best_body(vec![])
            .map(|(_, body)| body.0.to_string());

        let mut message = Message {
            from: root.from,
            to: root.to,
            id: root.id,
            type_: root.type_,
            body,
            chat_state: None,
            delay: None,
        };

        for payload in root.payloads.into_iter() {
            match payload {
                _ if payload.has_ns(ns::CHATSTATES) => {
                    // A garbled state child is dropped, not fatal.
                    message.chat_state = ChatState::try_from(payload).ok()
                }
                _ if payload.is("delay", ns::DELAY) => {
                    message.delay = Delay::try_from(payload).ok()
                }
                _ => (),
            }
        }

        Ok(message)
    }
}

impl TryFrom<Element> for Message {
    type Error = anyhow::Error;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        Message::try_from(xmpp_parsers::message::Message::try_from(value)?)
    }
}

impl From<Message> for Element {
    fn from(value: Message) -> Self {
        let mut root = xmpp_parsers::message::Message::new(None::<Jid>);
        root.from = value.from;
        root.to = value.to;
        root.id = value.id;
        root.type_ = value.type_;

        if let Some(body) = value.body {
            root.bodies.insert(String::new(), Body(body));
        }
        if let Some(chat_state) = value.chat_state {
            root.payloads.push(chat_state.into());
        }
        if let Some(delay) = value.delay {
            root.payloads.push(delay.into());
        }

        root.into()
    }
}
