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

use lwm2m_coap::message::Message;
use lwm2m_coap::{Error, Transport};
use std::net::SocketAddr;
use std::ops::Deref;
use tokio::net::UdpSocket;

/// A [`Transport`] wrapper around [`tokio::net::UdpSocket`].
///
/// Sending never waits: [`Transport::send_to`] is synchronous and goes through a
/// [`std::net::UdpSocket`] handle to the same socket, so it does not depend on
/// Tokio having polled the socket for write readiness. A datagram the kernel
/// cannot queue right away (`WouldBlock`) fails with [`Error::IOError`].
/// Receiving is asynchronous through [`TokioUdpTransport::recv_message`].
///
/// In order to use this type, you must be using [Tokio][] for your event loop.
///
/// [Tokio]: https://tokio.rs/
#[derive(Debug)]
pub struct TokioUdpTransport {
    socket: UdpSocket,
    sender: std::net::UdpSocket,
}

impl TokioUdpTransport {
    /// Analog of [`std::net::UdpSocket::bind`] for [`TokioUdpTransport`].
    pub async fn bind<A>(addr: A) -> std::io::Result<TokioUdpTransport>
    where
        A: tokio::net::ToSocketAddrs,
    {
        let socket = UdpSocket::bind(addr).await?;
        TokioUdpTransport::from_std(socket.into_std()?)
    }

    /// Upgrades a [`std::net::UdpSocket`] by wrapping it in a [`TokioUdpTransport`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_std(udp_socket: std::net::UdpSocket) -> std::io::Result<TokioUdpTransport> {
        udp_socket.set_nonblocking(true)?;
        let sender = udp_socket.try_clone()?;
        Ok(TokioUdpTransport {
            socket: UdpSocket::from_std(udp_socket)?,
            sender,
        })
    }

    /// Waits for the next datagram and decodes it into `buffer`.
    ///
    /// The returned message borrows its options and payload from `buffer`. A datagram
    /// that does not decode is reported with the codec error; the datagram is consumed
    /// either way.
    pub async fn recv_message<'a>(
        &self,
        buffer: &'a mut [u8],
    ) -> Result<(Message<'a>, SocketAddr), Error> {
        let (len, from) = self.socket.recv_from(buffer).await?;
        let buffer: &'a [u8] = buffer;

        match Message::decode(&buffer[..len]) {
            Ok(msg) => {
                trace!("recv from {}: {}", from, msg);
                Ok((msg, from))
            }
            Err(e) => {
                debug!("dropping {} bytes from {}: {:?}", len, from, e);
                Err(e)
            }
        }
    }
}

impl Transport for TokioUdpTransport {
    type SocketAddr = SocketAddr;

    fn send_to(&self, buf: &[u8], addr: &SocketAddr) -> Result<usize, Error> {
        match self.sender.send_to(buf, addr) {
            Ok(len) => Ok(len),
            Err(e) => {
                warn!("send to {} failed: {}", addr, e);
                Err(e.into())
            }
        }
    }
}

impl Deref for TokioUdpTransport {
    type Target = UdpSocket;

    fn deref(&self) -> &Self::Target {
        &self.socket
    }
}
