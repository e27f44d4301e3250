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

//! This crate provides [`TokioUdpTransport`]\: a [Tokio][]-based UDP implementation of
//! the [`Transport`](lwm2m_coap::Transport) used by the `lwm2m-coap` client helpers,
//! plus an asynchronous receive helper that decodes each datagram into a
//! [`Message`](lwm2m_coap::message::Message).
//!
//! # Example
//!
//! ```no_run
//! use lwm2m_coap::lwm2m::{Lwm2mClient, ServerConfig};
//! use lwm2m_coap_tokio::TokioUdpTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = TokioUdpTransport::bind("[::]:0")
//!         .await
//!         .expect("UDP bind failed");
//!
//!     let client = Lwm2mClient::new(transport);
//!     let server: std::net::SocketAddr = "[2001:db8::1]:5683".parse().unwrap();
//!
//!     client
//!         .register(&server, "node-1", &ServerConfig::default(), b"</3/0>")
//!         .expect("register failed");
//!
//!     let mut buffer = [0u8; 1152];
//!     let (response, from) = client
//!         .transport()
//!         .recv_message(&mut buffer)
//!         .await
//!         .expect("receive failed");
//!
//!     client.handle_response(&response, &from).expect("unexpected response");
//! }
//! ```
//!
//! [Tokio]: https://tokio.rs/

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod udp_transport;
pub use udp_transport::TokioUdpTransport;
