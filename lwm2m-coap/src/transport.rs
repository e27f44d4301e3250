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

//! The datagram transport seam used by the LWM2M client helpers.

use super::*;
use std::net::SocketAddr;
use std::sync::Mutex;

/// A byte-oriented datagram sender.
///
/// The LWM2M client only ever needs to push a finished message to a remote, so this is
/// the whole interface. Receiving is left to the application, which feeds decoded
/// messages back into [`Lwm2mService::dispatch`](crate::lwm2m::Lwm2mService::dispatch)
/// or [`Lwm2mClient::handle_response`](crate::lwm2m::Lwm2mClient::handle_response).
pub trait Transport {
    /// The address type identifying a remote.
    type SocketAddr: Clone + PartialEq + core::fmt::Debug;

    /// Sends `buf` to `addr` as one datagram, returning the number of bytes sent.
    fn send_to(&self, buf: &[u8], addr: &Self::SocketAddr) -> Result<usize, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type SocketAddr = T::SocketAddr;

    fn send_to(&self, buf: &[u8], addr: &Self::SocketAddr) -> Result<usize, Error> {
        (**self).send_to(buf, addr)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    type SocketAddr = T::SocketAddr;

    fn send_to(&self, buf: &[u8], addr: &Self::SocketAddr) -> Result<usize, Error> {
        (**self).send_to(buf, addr)
    }
}

impl Transport for std::net::UdpSocket {
    type SocketAddr = SocketAddr;

    fn send_to(&self, buf: &[u8], addr: &SocketAddr) -> Result<usize, Error> {
        Ok(std::net::UdpSocket::send_to(self, buf, addr)?)
    }
}

/// An in-memory [`Transport`] that records every datagram instead of sending it.
#[derive(Debug)]
pub struct LoopbackTransport<A = SocketAddr> {
    sent: Mutex<Vec<(Vec<u8>, A)>>,
}

impl<A> Default for LoopbackTransport<A> {
    fn default() -> Self {
        LoopbackTransport {
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl<A: Clone> LoopbackTransport<A> {
    /// Creates an empty loopback transport.
    pub fn new() -> LoopbackTransport<A> {
        Default::default()
    }

    /// Removes and returns every datagram recorded so far, oldest first.
    pub fn take_sent(&self) -> Vec<(Vec<u8>, A)> {
        match self.sent.lock() {
            Ok(mut sent) => std::mem::replace(&mut *sent, Vec::new()),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), Vec::new()),
        }
    }

    /// Returns a copy of the most recently recorded datagram.
    pub fn last_sent(&self) -> Option<(Vec<u8>, A)> {
        self.sent.lock().ok()?.last().cloned()
    }
}

impl<A: Clone + PartialEq + core::fmt::Debug> Transport for LoopbackTransport<A> {
    type SocketAddr = A;

    fn send_to(&self, buf: &[u8], addr: &A) -> Result<usize, Error> {
        trace!(
            "loopback send_to {:?}: {}",
            addr,
            crate::message::CoapByteDisplayFormatter(buf)
        );
        self.sent
            .lock()
            .map_err(|_| Error::Unspecified)?
            .push((buf.to_vec(), addr.clone()));
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_records() {
        let transport = LoopbackTransport::<u8>::new();
        assert_eq!(transport.send_to(&[1, 2, 3], &7), Ok(3));
        assert_eq!(transport.last_sent(), Some((vec![1, 2, 3], 7)));

        let sent = transport.take_sent();
        assert_eq!(sent.len(), 1);
        assert!(transport.take_sent().is_empty());
    }

    #[test]
    fn udp_send() {
        let rx = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let tx = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = rx.local_addr().unwrap();

        assert_eq!(Transport::send_to(&tx, b"ping", &addr), Ok(4));

        let mut buf = [0u8; 8];
        let (len, _) = rx.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"ping");
    }
}
