// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::Jid;
use xmpp_parsers::iq::{Iq, IqType};
use xmpp_parsers::version::{VersionQuery, VersionResult};

use crate::client::ModuleContext;
use crate::event::Event as ClientEvent;
use crate::mods::Module;
use crate::ns;

/// XEP-0092: Software Version
/// https://xmpp.org/extensions/xep-0092.html
#[derive(Default, Clone)]
pub struct Profile {
    ctx: ModuleContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A peer asked which software we run; the owner replies.
    VersionQuery { from: Jid, id: String },
    VersionResult {
        from: Option<Jid>,
        name: String,
        version: String,
        os: Option<String>,
    },
}

impl Module for Profile {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context
    }

    fn handle_iq_stanza(&self, stanza: &Iq) -> Result<()> {
        match &stanza.payload {
            IqType::Get(payload) if payload.is("query", ns::VERSION) => {
                let Some(from) = &stanza.from else {
                    return Ok(());
                };

                self.ctx
                    .schedule_event(ClientEvent::Profile(Event::VersionQuery {
                        from: from.clone(),
                        id: stanza.id.clone(),
                    }));
            }
            IqType::Result(Some(payload)) if payload.is("query", ns::VERSION) => {
                let version = VersionResult::try_from(payload.clone())?;

                self.ctx
                    .schedule_event(ClientEvent::Profile(Event::VersionResult {
                        from: stanza.from.clone(),
                        name: version.name,
                        version: version.version,
                        os: version.os,
                    }));
            }
            _ => (),
        }

        Ok(())
    }
}

impl Profile {
    pub fn request_software_version(&self, to: impl Into<Jid>) -> Result<()> {
        self.ctx
            .send_stanza(Iq::from_get(self.ctx.generate_id(), VersionQuery).with_to(to.into()))?;
        Ok(())
    }

    pub fn send_software_version_response(
        &self,
        to: impl Into<Jid>,
        id: String,
        name: impl Into<String>,
        version: impl Into<String>,
        os: Option<String>,
    ) -> Result<()> {
        let result = VersionResult {
            name: name.into(),
            version: version.into(),
            os,
        };
        self.ctx
            .send_stanza(Iq::from_result(id, Some(result)).with_to(to.into()))?;
        Ok(())
    }
}
