// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use jid::BareJid;
use parking_lot::RwLock;

use parley_client::{Client, ClientDelegate, ClientEvent};
use parley_xmpp::test::{Connection, Connector, ConstantTimeProvider, IncrementingIDProvider};

pub struct TestClient {
    pub client: Client,
    pub connection: Connection,
    pub time: Arc<ConstantTimeProvider>,
    pub events: Arc<RwLock<Vec<ClientEvent>>>,
}

impl TestClient {
    pub fn events(&self) -> Vec<ClientEvent> {
        self.events.read().clone()
    }

    pub fn clear(&self) {
        self.events.write().clear();
        self.connection.reset();
    }
}

struct RecordingDelegate {
    events: Arc<RwLock<Vec<ClientEvent>>>,
}

impl ClientDelegate for RecordingDelegate {
    fn handle_event(&self, event: ClientEvent) {
        self.events.write().push(event);
    }
}

pub fn test_client() -> TestClient {
    let connection = Connection::default();
    let time = Arc::new(ConstantTimeProvider::ymd(2026, 2, 1));
    let events = Arc::new(RwLock::new(vec![]));

    let client = Client::builder()
        .set_connector_provider(Connector::provider(connection.clone()))
        .set_id_provider(IncrementingIDProvider::new("id"))
        .set_time_provider(time.clone())
        .set_delegate(Some(Box::new(RecordingDelegate {
            events: events.clone(),
        })))
        .build();

    TestClient {
        client,
        connection,
        time,
        events,
    }
}

pub async fn connected_client() -> Result<TestClient> {
    let test_client = test_client();
    test_client
        .client
        .connect(&BareJid::new("hank@parley.im")?, "secret".to_string().into(), None)
        .await?;
    test_client.clear();
    Ok(test_client)
}
