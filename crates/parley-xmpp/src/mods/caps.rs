// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::Jid;
use xmpp_parsers::data_forms::DataForm;
use xmpp_parsers::disco::{
    DiscoInfoQuery, DiscoInfoResult, DiscoItemsQuery, DiscoItemsResult, Feature, Identity,
};
use xmpp_parsers::iq::{Iq, IqType};

use crate::client::ModuleContext;
use crate::event::Event as ClientEvent;
use crate::mods::Module;
use crate::ns;
use crate::stanza::Caps as CapsElement;

/// Id of a plain disco#info request issued on the user's behalf.
pub const DISCO_INFO_REQUEST_ID: &str = "discoinforeq";
/// Id prefix of disco#info requests resolving a XEP-0115 caps node.
pub const CAPS_REQUEST_ID: &str = "capsreq";
/// Id of a plain disco#items request.
pub const DISCO_ITEMS_REQUEST_ID: &str = "discoitemsreq";
/// Id of a disco#items request listing a conference service's rooms.
pub const ROOM_LIST_REQUEST_ID: &str = "confreq";

/// XEP-0030: Service Discovery, plus the XEP-0115 caps advertisements that
/// ride on presence.
#[derive(Default, Clone)]
pub struct Caps {
    ctx: ModuleContext,
}

/// A disco#info response reduced to the fields the owner acts on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscoInfo {
    pub node: Option<String>,
    pub identities: Vec<DiscoIdentity>,
    pub features: Vec<String>,
    pub extensions: Vec<DiscoForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoIdentity {
    pub category: String,
    pub kind: String,
    pub lang: Option<String>,
    pub name: Option<String>,
}

/// A data-form extension attached to a disco#info response (XEP-0128).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscoForm {
    pub form_type: Option<String>,
    pub fields: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoItem {
    pub jid: Jid,
    pub node: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Someone advertised a caps hash in presence.
    Caps { from: Jid, caps: CapsElement },
    /// Someone asked what we support; the owner replies.
    DiscoInfoQuery {
        from: Jid,
        id: String,
        node: Option<String>,
    },
    DiscoInfoResult {
        from: Option<Jid>,
        id: String,
        info: DiscoInfo,
    },
    DiscoItemsResult {
        from: Option<Jid>,
        id: String,
        items: Vec<DiscoItem>,
    },
}

impl Module for Caps {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context
    }

    fn handle_presence_stanza(&self, stanza: &xmpp_parsers::presence::Presence) -> Result<()> {
        let (Some(from), Some(payload)) = (
            &stanza.from,
            stanza.payloads.iter().find(|p| p.is("c", ns::CAPS)),
        ) else {
            return Ok(());
        };

        self.ctx.schedule_event(ClientEvent::Caps(Event::Caps {
            from: from.clone(),
            caps: CapsElement::try_from(payload)?,
        }));
        Ok(())
    }

    fn handle_iq_stanza(&self, stanza: &Iq) -> Result<()> {
        match &stanza.payload {
            IqType::Get(payload) if payload.is("query", ns::DISCO_INFO) => {
                let query = DiscoInfoQuery::try_from(payload.clone())?;

                let Some(from) = &stanza.from else {
                    return Ok(());
                };

                self.ctx
                    .schedule_event(ClientEvent::Caps(Event::DiscoInfoQuery {
                        from: from.clone(),
                        id: stanza.id.clone(),
                        node: query.node,
                    }));
            }
            IqType::Get(payload) if payload.is("query", ns::DISCO_ITEMS) => {
                // We have no child nodes to offer; answer with an empty
                // item list right away.
                let Some(from) = &stanza.from else {
                    return Ok(());
                };

                let result = DiscoItemsResult {
                    node: None,
                    items: vec![],
                    rsm: None,
                };
                self.ctx.send_stanza(
                    Iq::from_result(stanza.id.clone(), Some(result)).with_to(from.clone()),
                )?;
            }
            IqType::Result(Some(payload)) if payload.is("query", ns::DISCO_INFO) => {
                let disco = DiscoInfoResult::try_from(payload.clone())?;

                self.ctx
                    .schedule_event(ClientEvent::Caps(Event::DiscoInfoResult {
                        from: stanza.from.clone(),
                        id: stanza.id.clone(),
                        info: disco.into(),
                    }));
            }
            IqType::Result(Some(payload)) if payload.is("query", ns::DISCO_ITEMS) => {
                let disco = DiscoItemsResult::try_from(payload.clone())?;

                self.ctx
                    .schedule_event(ClientEvent::Caps(Event::DiscoItemsResult {
                        from: stanza.from.clone(),
                        id: stanza.id.clone(),
                        items: disco
                            .items
                            .into_iter()
                            .map(|item| DiscoItem {
                                jid: item.jid,
                                node: item.node,
                                name: item.name,
                            })
                            .collect(),
                    }));
            }
            _ => (),
        }

        Ok(())
    }
}

impl Caps {
    pub fn query_disco_info(
        &self,
        to: impl Into<Jid>,
        node: Option<String>,
        id: impl Into<String>,
    ) -> Result<()> {
        self.ctx
            .send_stanza(Iq::from_get(id.into(), DiscoInfoQuery { node }).with_to(to.into()))?;
        Ok(())
    }

    pub fn query_disco_items(&self, to: impl Into<Jid>, id: impl Into<String>) -> Result<()> {
        self.ctx.send_stanza(
            Iq::from_get(id.into(), DiscoItemsQuery { node: None, rsm: None }).with_to(to.into()),
        )?;
        Ok(())
    }

    pub fn send_disco_info_response(
        &self,
        to: impl Into<Jid>,
        id: String,
        disco: DiscoInfoResult,
    ) -> Result<()> {
        self.ctx
            .send_stanza(Iq::from_result(id, Some(disco)).with_to(to.into()))?;
        Ok(())
    }
}

impl From<DiscoInfoResult> for DiscoInfo {
    fn from(value: DiscoInfoResult) -> Self {
        DiscoInfo {
            node: value.node,
            identities: value.identities.into_iter().map(Into::into).collect(),
            features: value.features.into_iter().map(|f| f.var).collect(),
            extensions: value.extensions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Identity> for DiscoIdentity {
    fn from(value: Identity) -> Self {
        DiscoIdentity {
            category: value.category,
            kind: value.type_,
            lang: value.lang,
            name: value.name,
        }
    }
}

impl From<DataForm> for DiscoForm {
    fn from(value: DataForm) -> Self {
        DiscoForm {
            form_type: value.form_type,
            fields: value
                .fields
                .into_iter()
                .map(|field| (field.var.unwrap_or_default(), field.values))
                .collect(),
        }
    }
}

pub fn feature(var: impl Into<String>) -> Feature {
    Feature { var: var.into() }
}
