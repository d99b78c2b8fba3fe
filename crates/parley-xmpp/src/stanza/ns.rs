// parley/parley-xmpp
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use xmpp_parsers::ns::*;

// See all at: https://xmpp.org/registrar/namespaces.html

/// XEP-0232: Software Information (legacy caps extension form)
pub const SOFTWARE_INFO: &str = "urn:xmpp:dataforms:softwareinfo";
