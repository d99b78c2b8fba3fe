// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::Jid;
use tracing::debug;
use xmpp_parsers::chatstates::ChatState;
use xmpp_parsers::message::MessageType;

use crate::client::ModuleContext;
use crate::event::Event as ClientEvent;
use crate::mods::Module;
use crate::stanza::Message;

/// One-to-one and room messaging, with XEP-0085 chat state notifications.
#[derive(Default, Clone)]
pub struct Chat {
    ctx: ModuleContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(Message),
    Sent(Message),
    ChatStateChanged {
        from: Jid,
        chat_state: ChatState,
        message_type: MessageType,
    },
}

impl Module for Chat {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context
    }

    fn handle_message_stanza(&self, stanza: &Message) -> Result<()> {
        if stanza.type_ == MessageType::Error {
            debug!("Dropping message of type error from {:?}", stanza.from);
            return Ok(());
        }

        if let (Some(from), Some(chat_state)) = (stanza.from.clone(), stanza.chat_state.clone()) {
            self.ctx
                .schedule_event(ClientEvent::Chat(Event::ChatStateChanged {
                    from,
                    chat_state,
                    message_type: stanza.type_.clone(),
                }));
        }

        // Receipts, delay-only stanzas and the like carry no body and are
        // not delivered anywhere.
        if stanza.body.is_none() {
            return Ok(());
        }

        self.ctx
            .schedule_event(ClientEvent::Chat(Event::Message(stanza.clone())));

        Ok(())
    }
}

impl Chat {
    pub fn send_message(
        &self,
        to: impl Into<Jid>,
        body: impl Into<String>,
        message_type: &MessageType,
        chat_state: Option<ChatState>,
    ) -> Result<()> {
        let stanza = Message::new()
            .set_type(message_type.clone())
            .set_id(self.ctx.generate_id())
            .set_from(self.ctx.full_jid())
            .set_to(to)
            .set_body(body)
            .set_chat_state(chat_state);

        self.send_message_stanza(stanza)
    }

    pub fn send_chat_state(
        &self,
        to: impl Into<Jid>,
        chat_state: ChatState,
        message_type: &MessageType,
    ) -> Result<()> {
        let stanza = Message::new()
            .set_type(message_type.clone())
            .set_from(self.ctx.full_jid())
            .set_to(to)
            .set_chat_state(Some(chat_state));
        self.ctx.send_stanza(stanza)
    }
}

impl Chat {
    fn send_message_stanza(&self, message: Message) -> Result<()> {
        self.ctx
            .schedule_event(ClientEvent::Chat(Event::Sent(message.clone())));
        self.ctx.send_stanza(message)
    }
}
