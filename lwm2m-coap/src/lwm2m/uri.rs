// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use super::*;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6};
use std::str::FromStr;

lazy_static! {
    /// Splits a server URI into "scheme", "IPv6 literal" and "port".
    ///
    /// * scheme  = $1
    /// * address = $2
    /// * port    = $4
    ///
    /// Anything after the authority (a path, query or fragment) is ignored.
    static ref SERVER_URI: Regex = Regex::new(r#"^([A-Za-z][-+.A-Za-z0-9]*)://\[([^\]]*)\](:([0-9]*))?([/?#].*)?$"#)
        .expect("SERVER_URI");
}

/// Address of a LWM2M server or bootstrap server, as found in the Security object.
///
/// Only IPv6 literals are accepted for the host, e.g. `coaps://[2001:db8::1]:5684`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ServerUri {
    /// Server address.
    pub address: Ipv6Addr,

    /// Server port. Defaults to 5683 for `coap` and 5684 for `coaps`.
    pub port: u16,

    /// True for `coaps`.
    pub secure: bool,
}

impl ServerUri {
    /// Parses a `coap://[addr]:port` or `coaps://[addr]:port` URI.
    pub fn parse(uri: &str) -> Result<ServerUri, Error> {
        if uri.len() < 4 {
            return Err(Error::InvalidLength);
        }

        let captures = SERVER_URI.captures(uri).ok_or(Error::InvalidData)?;

        let scheme = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let (secure, default_port) = if scheme.eq_ignore_ascii_case(URI_SCHEME_COAPS) {
            (true, DEFAULT_PORT_COAP_DTLS)
        } else if scheme.eq_ignore_ascii_case(URI_SCHEME_COAP) {
            (false, DEFAULT_PORT_COAP_UDP)
        } else {
            debug!("unsupported scheme {:?}", scheme);
            return Err(Error::InvalidData);
        };

        let address = captures
            .get(2)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(Error::InvalidData)?;
        let address = Ipv6Addr::from_str(address).map_err(|_| Error::InvalidData)?;

        let port = match captures.get(4).map(|m| m.as_str()) {
            None | Some("") => default_port,
            Some(port) => u16::from_str(port).map_err(|_| Error::InvalidData)?,
        };

        Ok(ServerUri {
            address,
            port,
            secure,
        })
    }

    /// Returns the socket address to send to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V6(SocketAddrV6::new(self.address, self.port, 0, 0))
    }
}

impl FromStr for ServerUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerUri::parse(s)
    }
}

impl Display for ServerUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let scheme = if self.secure {
            URI_SCHEME_COAPS
        } else {
            URI_SCHEME_COAP
        };
        write!(f, "{}://[{}]:{}", scheme, self.address, self.port)
    }
}
