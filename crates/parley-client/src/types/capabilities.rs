// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use base64::{engine::general_purpose, Engine as _};
use sha1::{Digest, Sha1};
use xmpp_parsers::disco::DiscoInfoResult;

use parley_xmpp::mods::caps::{feature, DiscoForm, DiscoIdentity, DiscoInfo};
use parley_xmpp::ns;
use parley_xmpp::stanza::Caps;

/// The protocol namespaces this client implements and advertises.
pub fn supported_features() -> Vec<String> {
    [
        ns::CAPS,
        ns::CHATSTATES,
        ns::DISCO_INFO,
        ns::DISCO_ITEMS,
        ns::MUC,
        ns::PING,
        ns::VERSION,
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// What this client advertises about itself: a XEP-0030 identity, the
/// feature set, and the XEP-0115 verification hash derived from both.
#[derive(Clone, Debug)]
pub struct Capabilities {
    pub node: String,
    pub identity: Identity,
    pub features: Vec<String>,
    pub ver: String,
}

#[derive(Clone, Debug)]
pub struct Identity {
    pub category: String,
    pub kind: String,
    pub name: String,
}

/// The identity strings answered to XEP-0092 queries.
#[derive(Clone, Debug, PartialEq)]
pub struct SoftwareVersion {
    pub name: String,
    pub version: String,
    pub os: Option<String>,
}

impl Default for SoftwareVersion {
    fn default() -> Self {
        SoftwareVersion {
            name: "Parley".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: None,
        }
    }
}

impl Capabilities {
    pub fn new(
        client_name: impl Into<String>,
        client_website: impl Into<String>,
        features: impl IntoIterator<Item = String>,
    ) -> Self {
        let identity = Identity {
            category: "client".to_string(),
            kind: "console".to_string(),
            name: client_name.into(),
        };
        let features: Vec<String> = features.into_iter().collect();

        let ver = ver_hash(
            &[DiscoIdentity {
                category: identity.category.clone(),
                kind: identity.kind.clone(),
                lang: None,
                name: Some(identity.name.clone()),
            }],
            &features,
            &[],
        );

        Capabilities {
            node: client_website.into(),
            identity,
            features,
            ver,
        }
    }

    /// The `<c/>` element advertised with every outbound presence.
    pub fn caps_element(&self) -> Caps {
        Caps::new(self.node.clone(), self.ver.clone())
    }

    /// Our own disco#info answer; `node` echoes the queried node.
    pub fn disco_info_result(&self, node: Option<String>) -> DiscoInfoResult {
        DiscoInfoResult {
            node,
            identities: vec![xmpp_parsers::disco::Identity {
                category: self.identity.category.clone(),
                type_: self.identity.kind.clone(),
                lang: None,
                name: Some(self.identity.name.clone()),
            }],
            features: self.features.iter().map(feature).collect(),
            extensions: vec![],
        }
    }
}

/// XEP-0115 §5: the SHA-1 verification string over sorted identities,
/// features and extension forms, base64 encoded.
pub fn ver_hash(identities: &[DiscoIdentity], features: &[String], forms: &[DiscoForm]) -> String {
    let mut input = String::new();

    let mut identity_strings: Vec<String> = identities
        .iter()
        .map(|identity| {
            format!(
                "{}/{}/{}/{}",
                identity.category,
                identity.kind,
                identity.lang.as_deref().unwrap_or(""),
                identity.name.as_deref().unwrap_or("")
            )
        })
        .collect();
    identity_strings.sort();

    for identity in identity_strings {
        input.push_str(&identity);
        input.push('<');
    }

    let mut features: Vec<&String> = features.iter().collect();
    features.sort();

    for feature in features {
        input.push_str(feature);
        input.push('<');
    }

    let mut forms: Vec<&DiscoForm> = forms.iter().collect();
    forms.sort_by_key(|form| form.form_type.clone());

    for form in forms {
        input.push_str(form.form_type.as_deref().unwrap_or(""));
        input.push('<');

        let mut fields: Vec<&(String, Vec<String>)> = form
            .fields
            .iter()
            .filter(|(var, _)| var != "FORM_TYPE")
            .collect();
        fields.sort_by_key(|(var, _)| var.clone());

        for (var, values) in fields {
            input.push_str(var);
            input.push('<');

            let mut values: Vec<&String> = values.iter().collect();
            values.sort();
            for value in values {
                input.push_str(value);
                input.push('<');
            }
        }
    }

    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    general_purpose::STANDARD.encode(hasher.finalize())
}

/// The hash for a received disco#info response, as used to validate the
/// ver segment a peer declared.
pub fn ver_hash_for_info(info: &DiscoInfo) -> String {
    ver_hash(&info.identities, &info.features, &info.extensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The canonical example from XEP-0115 §5.2.
    #[test]
    fn test_ver_hash() {
        let identities = vec![DiscoIdentity {
            category: "client".to_string(),
            kind: "pc".to_string(),
            lang: None,
            name: Some("Exodus 0.9.1".to_string()),
        }];
        let features = vec![
            "http://jabber.org/protocol/muc".to_string(),
            "http://jabber.org/protocol/caps".to_string(),
            "http://jabber.org/protocol/disco#items".to_string(),
            "http://jabber.org/protocol/disco#info".to_string(),
        ];

        assert_eq!(
            ver_hash(&identities, &features, &[]),
            "QgayPKawpkPSDYmwT/WM94uAlu0="
        );
    }

    #[test]
    fn test_ver_hash_is_sort_invariant() {
        let identities = vec![
            DiscoIdentity {
                category: "client".to_string(),
                kind: "pc".to_string(),
                lang: None,
                name: Some("Psi".to_string()),
            },
            DiscoIdentity {
                category: "client".to_string(),
                kind: "console".to_string(),
                lang: None,
                name: Some("Psi".to_string()),
            },
        ];
        let features = vec!["b".to_string(), "a".to_string(), "c".to_string()];

        let mut shuffled_identities = identities.clone();
        shuffled_identities.reverse();
        let mut shuffled_features = features.clone();
        shuffled_features.reverse();

        assert_eq!(
            ver_hash(&identities, &features, &[]),
            ver_hash(&shuffled_identities, &shuffled_features, &[])
        );
    }

    #[test]
    fn test_ver_hash_includes_extension_forms() {
        let identities = vec![DiscoIdentity {
            category: "client".to_string(),
            kind: "console".to_string(),
            lang: None,
            name: None,
        }];
        let features = vec!["http://jabber.org/protocol/disco#info".to_string()];

        let form = DiscoForm {
            form_type: Some("urn:xmpp:dataforms:softwareinfo".to_string()),
            fields: vec![
                ("FORM_TYPE".to_string(), vec![]),
                ("os".to_string(), vec!["Linux".to_string()]),
                (
                    "software".to_string(),
                    vec!["parley".to_string(), "mirror".to_string()],
                ),
            ],
        };

        let without = ver_hash(&identities, &features, &[]);
        let with = ver_hash(&identities, &features, &[form.clone()]);
        assert_ne!(without, with);

        let mut scrambled = form.clone();
        scrambled.fields.reverse();
        scrambled.fields.iter_mut().for_each(|(_, values)| {
            values.reverse();
        });
        assert_eq!(with, ver_hash(&identities, &features, &[scrambled]));
    }
}
