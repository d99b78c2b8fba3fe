// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::RwLock;

use parley_xmpp::client::ConnectorProvider;
use parley_xmpp::{Client as XmppClient, IDProvider, SystemTimeProvider, TimeProvider};

use crate::client::client::{ClientInner, Timers};
use crate::client::{Client, ClientDelegate};
use crate::types::{
    supported_features, Availability, Capabilities, CapsCache, Preferences, SoftwareVersion,
};

pub struct ClientBuilder {
    connector_provider: Option<ConnectorProvider>,
    delegate: Option<Box<dyn ClientDelegate>>,
    id_provider: Option<Box<dyn IDProvider>>,
    time_provider: Arc<dyn TimeProvider>,
    software: SoftwareVersion,
    caps_node: String,
    resource: String,
    preferences: Preferences,
}

impl ClientBuilder {
    pub(super) fn new() -> Self {
        ClientBuilder {
            connector_provider: None,
            delegate: None,
            id_provider: None,
            time_provider: Arc::new(SystemTimeProvider::default()),
            software: SoftwareVersion::default(),
            caps_node: "https://parley.im".to_string(),
            resource: "parley".to_string(),
            preferences: Preferences::default(),
        }
    }

    pub fn set_connector_provider(mut self, connector_provider: ConnectorProvider) -> Self {
        self.connector_provider = Some(connector_provider);
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn set_id_provider<P: IDProvider + 'static>(mut self, id_provider: P) -> Self {
        self.id_provider = Some(Box::new(id_provider));
        self
    }

    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }

    pub fn set_software_version(mut self, software: SoftwareVersion) -> Self {
        self.software = software;
        self
    }

    pub fn set_caps_node(mut self, node: impl Into<String>) -> Self {
        self.caps_node = node.into();
        self
    }

    /// The resource part used when connecting with a bare JID.
    pub fn set_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn set_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn build(self) -> Client {
        let capabilities = Capabilities::new(
            self.software.name.clone(),
            self.caps_node.clone(),
            supported_features(),
        );

        let connector_provider = self.connector_provider;
        let id_provider = self.id_provider;

        let inner = Arc::new_cyclic(|weak: &std::sync::Weak<ClientInner>| {
            let weak = weak.clone();

            let mut builder = XmppClient::builder().set_event_handler(move |_, event| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_xmpp_event(event);
                }
            });
            if let Some(connector_provider) = connector_provider {
                builder = builder.set_connector_provider(connector_provider);
            }
            if let Some(id_provider) = id_provider {
                builder = builder.set_id_provider(id_provider);
            }

            ClientInner {
                xmpp: builder.build(),
                delegate: self.delegate,
                time_provider: self.time_provider,
                capabilities,
                software: self.software,
                resource: self.resource,
                status: RwLock::new(Default::default()),
                self_presence: RwLock::new(Availability::Offline),
                roster: RwLock::new(Default::default()),
                rooms: RwLock::new(Default::default()),
                chat_sessions: RwLock::new(Default::default()),
                caps_cache: CapsCache::default(),
                subscription_requests: RwLock::new(Default::default()),
                prefs: RwLock::new(self.preferences),
                timers: RwLock::new(Timers::default()),
            }
        });

        Client { inner }
    }
}
