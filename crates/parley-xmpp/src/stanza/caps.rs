// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use minidom::Element;

use crate::ns;

/// XEP-0115: Entity Capabilities
/// https://xmpp.org/extensions/xep-0115.html
///
/// The `<c/>` element advertised in presence. `ver` is the base64 SHA-1
/// verification string; `node` identifies the advertising software.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caps {
    pub node: String,
    pub ver: String,
    pub hash: String,
}

impl Caps {
    pub fn new(node: impl Into<String>, ver: impl Into<String>) -> Self {
        Caps {
            node: node.into(),
            ver: ver.into(),
            hash: "sha-1".to_string(),
        }
    }

    /// The `node#ver` string used as disco#info node and cache key.
    pub fn node_ver(&self) -> String {
        format!("{}#{}", self.node, self.ver)
    }
}

impl TryFrom<&Element> for Caps {
    type Error = anyhow::Error;

    fn try_from(value: &Element) -> Result<Self> {
        if !value.is("c", ns::CAPS) {
            return Err(anyhow::format_err!(
                "Expected element c in namespace {}. Got {} in {} instead.",
                ns::CAPS,
                value.name(),
                value.ns()
            ));
        }

        let req = |name: &str| {
            value
                .attr(name)
                .map(ToString::to_string)
                .ok_or(anyhow::format_err!("Missing attribute {} in caps.", name))
        };

        Ok(Caps {
            node: req("node")?,
            ver: req("ver")?,
            hash: req("hash")?,
        })
    }
}

impl From<Caps> for Element {
    fn from(value: Caps) -> Self {
        Element::builder("c", ns::CAPS)
            .attr("hash", value.hash)
            .attr("node", value.node)
            .attr("ver", value.ver)
            .build()
    }
}
