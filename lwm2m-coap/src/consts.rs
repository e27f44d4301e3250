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

//! Module defining various CoAP and LWM2M related constants.

/// The standard default IP port number used for CoAP-over-UDP.
pub const DEFAULT_PORT_COAP_UDP: u16 = 5683;

/// The standard default IP port number used for CoAP-over-DTLS.
pub const DEFAULT_PORT_COAP_DTLS: u16 = 5684;

/// The standard URI scheme for vanilla CoAP-over-UDP on IP networks.
pub const URI_SCHEME_COAP: &'static str = "coap";

/// The standard URI scheme for CoAP-over-DTLS on IP networks.
pub const URI_SCHEME_COAPS: &'static str = "coaps";

/// The only CoAP protocol version defined by [IETF-RFC7252](https://tools.ietf.org/html/rfc7252).
pub const COAP_VERSION: u8 = 1;

/// Byte separating the options of a CoAP message from its payload.
pub const COAP_PAYLOAD_MARKER: u8 = 0xFF;

/// Size of the fixed CoAP message header.
pub const COAP_HEADER_SIZE: usize = 4;

/// Largest token length permitted by the CoAP header.
pub const COAP_MAX_TOKEN_LEN: usize = 8;

/// Maximum number of options a single [`Message`](crate::message::Message) can hold.
pub const COAP_MAX_NUMBER_OF_OPTIONS: usize = 8;

/// Uri-Path used when registering with a LWM2M server.
pub const LWM2M_REGISTER_URI_PATH: &'static str = "rd";

/// Uri-Path used when requesting bootstrap from a LWM2M bootstrap server.
pub const LWM2M_BOOTSTRAP_URI_PATH: &'static str = "bs";

/// Initial token value of the registration interface.
pub const LWM2M_REGISTER_TOKEN_START: u16 = 0xAE1C;

/// Initial token value of the bootstrap interface.
pub const LWM2M_BOOTSTRAP_TOKEN_START: u16 = 0x012A;
