// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use minidom::Element;
use pretty_assertions::assert_eq;

use parley_client::types::ver_hash;
use parley_client::ClientEvent;
use parley_xmpp::mods::caps::DiscoIdentity;

mod helpers;
use helpers::connected_client;

fn identity() -> DiscoIdentity {
    DiscoIdentity {
        category: "client".to_string(),
        kind: "console".to_string(),
        lang: None,
        name: None,
    }
}

#[tokio::test]
async fn test_unknown_caps_trigger_disco_query() -> Result<()> {
    let test = connected_client().await?;

    let presence: Element = "<presence xmlns='jabber:client' from='a@x/desk'>\
        <c xmlns='http://jabber.org/protocol/caps' hash='sha-1' node='https://x' ver='abc'/>\
        </presence>"
        .parse()?;
    test.connection.receive_stanza(presence);

    let sent = test.connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("id='capsreq'"));
    assert!(sent[0].contains("node='https://x#abc'"));
    assert!(sent[0].contains("to='a@x/desk'"));

    Ok(())
}

#[tokio::test]
async fn test_mismatching_caps_response_is_dropped() -> Result<()> {
    let test = connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='result' id='capsreq' from='a@x/desk'>\
        <query xmlns='http://jabber.org/protocol/disco#info' node='https://x#nonsense'>\
        <identity category='client' type='console'/>\
        <feature var='urn:xmpp:ping'/>\
        </query></iq>"
        .parse()?;
    test.connection.receive_stanza(iq);

    assert!(!test.client.capability_cache().contains("https://x#nonsense"));
    Ok(())
}

#[tokio::test]
async fn test_matching_caps_response_is_cached() -> Result<()> {
    let test = connected_client().await?;

    let features = vec!["urn:xmpp:ping".to_string()];
    let ver = ver_hash(&[identity()], &features, &[]);
    let node = format!("https://x#{ver}");

    let iq: Element = format!(
        "<iq xmlns='jabber:client' type='result' id='capsreq' from='a@x/desk'>\
         <query xmlns='http://jabber.org/protocol/disco#info' node='{node}'>\
         <identity category='client' type='console'/>\
         <feature var='urn:xmpp:ping'/>\
         </query></iq>"
    )
    .parse()?;
    test.connection.receive_stanza(iq);

    let cache = test.client.capability_cache();
    assert!(cache.contains(&node));

    let entry = cache.get(&node).unwrap();
    assert_eq!(entry.category.as_deref(), Some("client"));
    assert!(entry.features.contains("urn:xmpp:ping"));

    Ok(())
}

#[tokio::test]
async fn test_known_caps_are_not_requeried() -> Result<()> {
    let test = connected_client().await?;

    let features = vec!["urn:xmpp:ping".to_string()];
    let ver = ver_hash(&[identity()], &features, &[]);
    let node = format!("https://x#{ver}");

    let iq: Element = format!(
        "<iq xmlns='jabber:client' type='result' id='capsreq' from='a@x/desk'>\
         <query xmlns='http://jabber.org/protocol/disco#info' node='{node}'>\
         <identity category='client' type='console'/>\
         <feature var='urn:xmpp:ping'/>\
         </query></iq>"
    )
    .parse()?;
    test.connection.receive_stanza(iq);
    test.clear();

    let presence: Element = format!(
        "<presence xmlns='jabber:client' from='b@y/phone'>\
         <c xmlns='http://jabber.org/protocol/caps' hash='sha-1' node='https://x' ver='{ver}'/>\
         </presence>"
    )
    .parse()?;
    test.connection.receive_stanza(presence);

    assert_eq!(test.connection.sent_stanza_strings().len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_disco_info_query_is_answered_with_our_identity() -> Result<()> {
    let test = connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='get' id='q1' from='a@x/desk'>\
        <query xmlns='http://jabber.org/protocol/disco#info'/></iq>"
        .parse()?;
    test.connection.receive_stanza(iq);

    let sent = test.connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("type='result'"));
    assert!(sent[0].contains("id='q1'"));
    assert!(sent[0].contains("category='client'"));
    assert!(sent[0].contains("type='console'"));
    assert!(sent[0].contains("var='urn:xmpp:ping'"));

    Ok(())
}

#[tokio::test]
async fn test_software_version_query_is_answered() -> Result<()> {
    let test = connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='get' id='v1' from='a@x/desk'>\
        <query xmlns='jabber:iq:version'/></iq>"
        .parse()?;
    test.connection.receive_stanza(iq);

    let sent = test.connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("<name>Parley</name>"));
    assert!(sent[0].contains("type='result'"));

    Ok(())
}

#[tokio::test]
async fn test_version_result_reaches_delegate() -> Result<()> {
    let test = connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='result' id='id-1' from='a@x/desk'>\
        <query xmlns='jabber:iq:version'><name>Other</name><version>2.0</version></query></iq>"
        .parse()?;
    test.connection.receive_stanza(iq);

    assert_eq!(
        test.events(),
        vec![ClientEvent::SoftwareVersionReceived {
            from: Some(jid::Jid::new("a@x/desk")?),
            name: "Other".to_string(),
            version: "2.0".to_string(),
            os: None,
        }]
    );

    Ok(())
}

#[tokio::test]
async fn test_room_list_and_disco_items_results_are_routed_by_id() -> Result<()> {
    let test = connected_client().await?;

    let iq: Element = "<iq xmlns='jabber:client' type='result' id='confreq' from='conf.x'>\
        <query xmlns='http://jabber.org/protocol/disco#items'>\
        <item jid='room@conf.x' name='Room'/></query></iq>"
        .parse()?;
    test.connection.receive_stanza(iq);

    let iq: Element = "<iq xmlns='jabber:client' type='result' id='discoitemsreq' from='x'>\
        <query xmlns='http://jabber.org/protocol/disco#items'>\
        <item jid='muc.x'/></query></iq>"
        .parse()?;
    test.connection.receive_stanza(iq);

    let events = test.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        ClientEvent::RoomListReceived { items, .. } if items.len() == 1
    ));
    assert!(matches!(
        &events[1],
        ClientEvent::DiscoItemsReceived { items, .. } if items.len() == 1
    ));

    Ok(())
}
