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

//! A compact implementation of the Constrained Application Protocol (CoAP) message format,
//! with a request router and client helpers for OMA Lightweight M2M (LWM2M).
//!
//! The crate is synchronous and allocation-light: a decoded [`Message`](message::Message)
//! borrows its option values and payload straight from the receive buffer, and
//! encoding writes into a caller-supplied buffer. Moving datagrams is left to a
//! [`Transport`], of which an in-memory [`LoopbackTransport`] and an implementation for
//! [`std::net::UdpSocket`] are included. A Tokio-based transport lives in the
//! `lwm2m-coap-tokio` crate.
//!
//! ## Messages
//!
//! ```
//! use lwm2m_coap::prelude::*;
//! use lwm2m_coap::message::Message;
//!
//! let mut msg = Message::new(MsgType::Con, MsgCode::MethodGet, 0x1234);
//! msg.set_token(MsgToken::from(0xABCDu16));
//! msg.append_option_with_str(OptionNumber::URI_PATH, "temp").unwrap();
//!
//! let bytes = msg.to_vec().unwrap();
//! assert_eq!(&bytes[..4], &[0x42, 0x01, 0x12, 0x34]);
//!
//! let decoded = Message::decode(&bytes).unwrap();
//! assert_eq!(decoded.msg_code(), MsgCode::MethodGet);
//! assert_eq!(decoded.option_values(OptionNumber::URI_PATH).next(), Some(&b"temp"[..]));
//! ```
//!
//! ## LWM2M routing
//!
//! Objects and object instances are registered with an [`Lwm2mService`](lwm2m::Lwm2mService).
//! [`dispatch`](lwm2m::Lwm2mService::dispatch) resolves the Uri-Path of a request to one of
//! them, derives the LWM2M [`Operation`](lwm2m::Operation) from the method and invokes the
//! matching callback:
//!
//! ```
//! use lwm2m_coap::prelude::*;
//! use lwm2m_coap::message::Message;
//! use lwm2m_coap::lwm2m::*;
//!
//! let service: Lwm2mService = Lwm2mService::new();
//!
//! service
//!     .instance_add(Lwm2mInstance::new(
//!         OBJ_DEVICE,
//!         0,
//!         DeviceObject,
//!         |instance, resource_id, op, _request| {
//!             assert_eq!(instance.object_id(), OBJ_DEVICE);
//!             assert_eq!(resource_id, 9);
//!             assert_eq!(op, Operation::READ);
//!             Ok(())
//!         },
//!     ))
//!     .unwrap();
//!
//! let mut request = Message::new(MsgType::Con, MsgCode::MethodGet, 1);
//! request.append_option_with_str(OptionNumber::URI_PATH, "3").unwrap();
//! request.append_option_with_str(OptionNumber::URI_PATH, "0").unwrap();
//! request.append_option_with_str(OptionNumber::URI_PATH, "9").unwrap();
//!
//! service.dispatch(&request).unwrap();
//! ```

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(clippy::all)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

pub mod consts;
#[doc(hidden)]
pub use consts::*;

mod error;
pub use error::*;

mod util;
use util::*;

pub mod message;
pub mod option;

mod content_format;
pub use content_format::*;

mod params;
pub use params::*;

mod transport;
pub use transport::*;

pub mod lwm2m;

/// Module containing the most commonly used types and traits.
pub mod prelude {
    pub use super::message::MsgCode;
    pub use super::message::MsgCodeClass;
    pub use super::message::MsgId;
    pub use super::message::MsgToken;
    pub use super::message::MsgType;

    pub use super::option;
    pub use option::CoapOption;
    pub use option::OptionAppend;
    pub use option::OptionIterator;
    pub use option::OptionNumber;
    pub use option::OptionValue;

    pub use super::ContentFormat;
    pub use super::ContentFormatMask;

    pub use super::Lwm2mParams;
    pub use super::StandardLwm2mParams;

    pub use super::LoopbackTransport;
    pub use super::Transport;

    pub use super::Error;
}

use message::Message;
use prelude::*;
