// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use jid::BareJid;
use minidom::Element;
use pretty_assertions::assert_eq;

use parley_client::types::Availability;
use parley_client::{ClientError, ClientEvent};

mod helpers;
use helpers::connected_client;

#[tokio::test]
async fn test_join_room_sends_muc_presence_and_is_idempotent() -> Result<()> {
    let test = connected_client().await?;
    let room = BareJid::new("room@conf.x")?;

    test.client.join_room(&room, "hank")?;
    test.client.join_room(&room, "hank")?;

    let sent = test.connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("to='room@conf.x/hank'"));
    assert!(sent[0].contains("<x xmlns='http://jabber.org/protocol/muc'/>"));

    assert_eq!(test.client.rooms().len(), 1);
    let occupants = test.client.room_occupants(&room)?;
    assert_eq!(occupants.len(), 1);
    assert_eq!(occupants[0].nick, "hank");

    Ok(())
}

#[tokio::test]
async fn test_self_presence_confirms_join() -> Result<()> {
    let test = connected_client().await?;
    let room = BareJid::new("room@conf.x")?;
    test.client.join_room(&room, "hank")?;
    test.clear();

    let presence: Element = "<presence xmlns='jabber:client' from='room@conf.x/hank'>\
        <x xmlns='http://jabber.org/protocol/muc#user'>\
        <item affiliation='member' role='participant'/>\
        <status code='110'/></x></presence>"
        .parse()?;
    test.connection.receive_stanza(presence);

    assert_eq!(
        test.events(),
        vec![ClientEvent::RoomJoined {
            room: room.clone(),
            nick: "hank".to_string(),
        }]
    );

    Ok(())
}

#[tokio::test]
async fn test_occupants_join_and_leave() -> Result<()> {
    let test = connected_client().await?;
    let room = BareJid::new("room@conf.x")?;
    test.client.join_room(&room, "hank")?;
    test.clear();

    let presence: Element = "<presence xmlns='jabber:client' from='room@conf.x/zoe'>\
        <show>away</show>\
        <x xmlns='http://jabber.org/protocol/muc#user'>\
        <item affiliation='member' role='participant'/></x></presence>"
        .parse()?;
    test.connection.receive_stanza(presence);

    assert_eq!(
        test.events(),
        vec![ClientEvent::OccupantJoined {
            room: room.clone(),
            nick: "zoe".to_string(),
            availability: Availability::Away,
        }]
    );

    let occupants = test.client.room_occupants(&room)?;
    assert_eq!(occupants.len(), 2);

    test.events.write().clear();
    let presence: Element =
        "<presence xmlns='jabber:client' from='room@conf.x/zoe' type='unavailable'/>".parse()?;
    test.connection.receive_stanza(presence);

    assert_eq!(
        test.events(),
        vec![ClientEvent::OccupantLeft {
            room: room.clone(),
            nick: "zoe".to_string(),
        }]
    );
    assert_eq!(test.client.room_occupants(&room)?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_groupchat_message_is_routed_to_room() -> Result<()> {
    let test = connected_client().await?;
    let room = BareJid::new("room@conf.x")?;
    test.client.join_room(&room, "hank")?;
    test.clear();

    // The sender does not need to be a known occupant.
    let message: Element = "<message xmlns='jabber:client' type='groupchat' \
        from='room@conf.x/ghost'><body>boo</body></message>"
        .parse()?;
    test.connection.receive_stanza(message);

    assert_eq!(
        test.events(),
        vec![ClientEvent::RoomMessageReceived {
            room: room.clone(),
            nick: "ghost".to_string(),
            body: "boo".to_string(),
            delay: None,
        }]
    );

    Ok(())
}

#[tokio::test]
async fn test_send_room_message_requires_membership() -> Result<()> {
    let test = connected_client().await?;
    let room = BareJid::new("room@conf.x")?;

    let result = test.client.send_room_message(&room, "hi");
    assert!(matches!(result, Err(ClientError::NotInRoom { .. })));

    test.client.join_room(&room, "hank")?;
    test.clear();

    test.client.send_room_message(&room, "hi")?;
    let sent = test.connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("type='groupchat'"));
    assert!(sent[0].contains("to='room@conf.x'"));
    assert!(sent[0].contains("<body>hi</body>"));

    Ok(())
}

#[tokio::test]
async fn test_leave_room_sends_unavailable_and_forgets_room() -> Result<()> {
    let test = connected_client().await?;
    let room = BareJid::new("room@conf.x")?;
    test.client.join_room(&room, "hank")?;
    test.clear();

    test.client.leave_room(&room)?;

    let sent = test.connection.sent_stanza_strings();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("to='room@conf.x/hank'"));
    assert!(sent[0].contains("type='unavailable'"));
    assert!(test.client.rooms().is_empty());

    assert!(matches!(
        test.client.leave_room(&room),
        Err(ClientError::NotInRoom { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_room_presence_after_leave_is_contact_presence() -> Result<()> {
    let test = connected_client().await?;
    let room = BareJid::new("room@conf.x")?;
    test.client.join_room(&room, "hank")?;
    test.client.leave_room(&room)?;
    test.clear();

    // No longer active: treated as (unknown) contact presence, ignored.
    let presence: Element =
        "<presence xmlns='jabber:client' from='room@conf.x/zoe'/>".parse()?;
    test.connection.receive_stanza(presence);
    assert_eq!(test.events(), vec![]);

    Ok(())
}
