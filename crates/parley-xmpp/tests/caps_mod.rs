// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::{BareJid, FullJid, Jid};
use minidom::Element;
use pretty_assertions::assert_eq;

use parley_xmpp::mods;
use parley_xmpp::mods::caps::{DiscoIdentity, DiscoInfo};
use parley_xmpp::stanza::Caps;
use parley_xmpp::test::{ClientTestAdditions, ConnectedClient};
use parley_xmpp::{Client, Event};

#[tokio::test]
async fn test_sends_caps_event_for_presence_advertisement() -> Result<()> {
    let ConnectedClient {
        connection,
        sent_events,
        ..
    } = Client::connected_client().await?;

    let presence: Element = "<presence xmlns='jabber:client' from='a@x/desk'>\
        <c xmlns='http://jabber.org/protocol/caps' hash='sha-1' \
        node='https://example.org' ver='QgayPKawpkPSDYmwT/WM94uAlu0='/>\
        </presence>"
        .parse()?;

    connection.receive_stanza(presence);

    let events = sent_events.read();
    assert!(events.contains(&Event::Caps(mods::caps::Event::Caps {
        from: Jid::from(FullJid::new("a@x/desk")?),
        caps: Caps::new("https://example.org", "QgayPKawpkPSDYmwT/WM94uAlu0=")
    })));

    Ok(())
}

#[tokio::test]
async fn test_sends_disco_info_query_event() -> Result<()> {
    let ConnectedClient {
        connection,
        sent_events,
        ..
    } = Client::connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='get' id='disco1' from='a@x/desk'>\
        <query xmlns='http://jabber.org/protocol/disco#info'/></iq>"
        .parse()?;

    connection.receive_stanza(iq);

    assert_eq!(
        *sent_events.read(),
        vec![Event::Caps(mods::caps::Event::DiscoInfoQuery {
            from: Jid::from(FullJid::new("a@x/desk")?),
            id: "disco1".to_string(),
            node: None,
        })]
    );

    Ok(())
}

#[tokio::test]
async fn test_answers_disco_items_query_with_empty_list() -> Result<()> {
    let ConnectedClient {
        connection,
        sent_events,
        ..
    } = Client::connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='get' id='items1' from='a@x/desk'>\
        <query xmlns='http://jabber.org/protocol/disco#items'/></iq>"
        .parse()?;

    connection.receive_stanza(iq);

    assert_eq!(*sent_events.read(), vec![]);

    let sent = connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("type='result'"));
    assert!(sent[0].contains("id='items1'"));
    assert!(sent[0].contains("to='a@x/desk'"));
    assert!(sent[0].contains("<query xmlns='http://jabber.org/protocol/disco#items'/>"));

    Ok(())
}

#[tokio::test]
async fn test_sends_disco_info_result_event() -> Result<()> {
    let ConnectedClient {
        connection,
        sent_events,
        ..
    } = Client::connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='result' id='discoinforeq' from='x'>\
        <query xmlns='http://jabber.org/protocol/disco#info'>\
        <identity category='server' type='im' name='X'/>\
        <feature var='urn:xmpp:ping'/>\
        </query></iq>"
        .parse()?;

    connection.receive_stanza(iq);

    assert_eq!(
        *sent_events.read(),
        vec![Event::Caps(mods::caps::Event::DiscoInfoResult {
            from: Some(Jid::from(BareJid::new("x")?)),
            id: "discoinforeq".to_string(),
            info: DiscoInfo {
                node: None,
                identities: vec![DiscoIdentity {
                    category: "server".to_string(),
                    kind: "im".to_string(),
                    lang: None,
                    name: Some("X".to_string()),
                }],
                features: vec!["urn:xmpp:ping".to_string()],
                extensions: vec![],
            }
        })]
    );

    Ok(())
}

#[tokio::test]
async fn test_queries_disco_info_with_node() -> Result<()> {
    let ConnectedClient {
        client, connection, ..
    } = Client::connected_client().await?;

    let caps = client.get_mod::<mods::Caps>();
    caps.query_disco_info(
        FullJid::new("a@x/desk")?,
        Some("https://example.org#ver".to_string()),
        mods::caps::CAPS_REQUEST_ID,
    )?;

    let sent = connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("id='capsreq'"));
    assert!(sent[0].contains("node='https://example.org#ver'"));

    Ok(())
}
