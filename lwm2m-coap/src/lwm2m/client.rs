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
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard};

/// The exchange a response passed to [`Lwm2mClient::handle_response`] completes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NotificationKind {
    /// Response to [`Lwm2mClient::register`].
    Register,

    /// Response to [`Lwm2mClient::update`].
    Update,

    /// Response to [`Lwm2mClient::deregister`].
    Deregister,

    /// Response to [`Lwm2mClient::bootstrap`].
    Bootstrap,
}

/// Callback invoked with the kind of exchange, the responding remote and the response
/// code whenever a response completes a pending exchange.
pub type NotificationCallback<A> = dyn Fn(NotificationKind, &A, MsgCode) + Send + Sync;

/// Registration parameters sent as Uri-Query options on register and update.
///
/// Zero and empty fields are left out of the request.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ServerConfig {
    /// Registration lifetime in seconds, sent as `lt=`.
    pub lifetime: u32,

    /// LWM2M major version, sent as `lwm2m=major.minor`.
    pub lwm2m_version_major: u8,

    /// LWM2M minor version.
    pub lwm2m_version_minor: u8,

    /// MSISDN for SMS binding, sent as `sms=`.
    pub msisdn: u64,

    /// Binding mode, e.g. `U` or `UQ`, sent as `b=`.
    pub binding: String,
}

impl ServerConfig {
    fn queries(&self) -> Vec<String> {
        let mut queries = Vec::new();

        if self.lifetime > 0 {
            queries.push(format!("lt={}", self.lifetime));
        }

        if self.lwm2m_version_major > 0 || self.lwm2m_version_minor > 0 {
            queries.push(format!(
                "lwm2m={}.{}",
                self.lwm2m_version_major, self.lwm2m_version_minor
            ));
        }

        if self.msisdn > 0 {
            queries.push(format!("sms={}", self.msisdn));
        }

        if !self.binding.is_empty() {
            queries.push(format!("b={}", self.binding));
        }

        queries
    }
}

struct ClientState<A> {
    msg_id: MsgId,
    register_token: u16,
    bootstrap_token: u16,
    locations: Vec<(A, Vec<String>)>,
    pending: Vec<(MsgToken, NotificationKind, A)>,
    notification: Option<Arc<NotificationCallback<A>>>,
}

/// LWM2M client side of the registration and bootstrap interfaces.
///
/// Every request is a confirmable message with a fresh message id and a token from a
/// per-interface counter. The client does not retransmit; the application receives
/// responses and hands them to [`Lwm2mClient::handle_response`], which records the
/// location a server assigns on registration and fires the notification callback.
pub struct Lwm2mClient<T: Transport, P: Lwm2mParams = StandardLwm2mParams> {
    transport: T,
    params: P,
    state: Mutex<ClientState<T::SocketAddr>>,
}

impl<T: Transport> Lwm2mClient<T, StandardLwm2mParams> {
    /// Creates a client sending through `transport`, with the standard limits.
    pub fn new(transport: T) -> Self {
        Lwm2mClient::with_params(transport, StandardLwm2mParams)
    }
}

impl<T: Transport, P: Lwm2mParams> core::fmt::Debug for Lwm2mClient<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.lock();
        f.debug_struct("Lwm2mClient")
            .field("params", &self.params)
            .field("msg_id", &state.msg_id)
            .field("locations", &state.locations)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl<T: Transport, P: Lwm2mParams> Lwm2mClient<T, P> {
    /// Creates a client sending through `transport`, with the given limits.
    pub fn with_params(transport: T, params: P) -> Self {
        Lwm2mClient {
            transport,
            params,
            state: Mutex::new(ClientState {
                msg_id: rand::thread_rng().gen(),
                register_token: LWM2M_REGISTER_TOKEN_START,
                bootstrap_token: LWM2M_BOOTSTRAP_TOKEN_START,
                locations: Vec::new(),
                pending: Vec::new(),
                notification: None,
            }),
        }
    }

    /// Returns the transport this client sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn lock(&self) -> MutexGuard<'_, ClientState<T::SocketAddr>> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Sets the callback invoked by [`Lwm2mClient::handle_response`].
    pub fn set_notification_handler<F>(&self, callback: F)
    where
        F: Fn(NotificationKind, &T::SocketAddr, MsgCode) + Send + Sync + 'static,
    {
        self.lock().notification = Some(Arc::new(callback));
    }

    /// Returns the location path segments the server at `remote` assigned on registration.
    pub fn location(&self, remote: &T::SocketAddr) -> Option<Vec<String>> {
        self.lock()
            .locations
            .iter()
            .find(|(addr, _)| addr == remote)
            .map(|(_, location)| location.clone())
    }

    /// Starts a new confirmable request, taking the next message id and the next token
    /// of the interface `kind` belongs to.
    pub(super) fn new_request<'a>(&self, msg_code: MsgCode, kind: NotificationKind) -> Message<'a> {
        let mut state = self.lock();

        let msg_id = state.msg_id;
        state.msg_id = state.msg_id.wrapping_add(1);

        let counter = match kind {
            NotificationKind::Bootstrap => &mut state.bootstrap_token,
            _ => &mut state.register_token,
        };
        let token = MsgToken::from(*counter);
        *counter = counter.wrapping_add(1);

        let mut msg = Message::new(MsgType::Con, msg_code, msg_id);
        msg.set_token(token);
        msg
    }

    /// Sends `msg` to `remote` and records it as a pending exchange of `kind`.
    pub(super) fn send_request(
        &self,
        msg: &Message<'_>,
        kind: NotificationKind,
        remote: &T::SocketAddr,
    ) -> Result<(), Error> {
        let bytes = msg.to_vec()?;
        let token = msg.token();

        {
            let mut state = self.lock();
            if state.pending.len() >= self.params.max_servers() {
                let (stale, stale_kind, _) = state.pending.remove(0);
                debug!("dropping unanswered {:?} exchange, token {}", stale_kind, stale);
            }
            state.pending.push((token, kind, remote.clone()));
        }

        trace!("send to {:?}: {}", remote, msg);

        if let Err(e) = self.transport.send_to(&bytes, remote) {
            warn!("{:?} send to {:?} failed: {:?}", kind, remote, e);
            self.lock().pending.retain(|(x, _, _)| *x != token);
            return Err(e);
        }

        Ok(())
    }

    /// Registers with the server at `remote`.
    ///
    /// Sends a POST to `/rd` carrying the endpoint name and the non-default fields of
    /// `config` as Uri-Query options, and `link_format` as the payload.
    pub fn register(
        &self,
        remote: &T::SocketAddr,
        endpoint: &str,
        config: &ServerConfig,
        link_format: &[u8],
    ) -> Result<(), Error> {
        if link_format.len() > self.params.message_data_max_size() {
            warn!(
                "link-format payload of {} bytes exceeds {}",
                link_format.len(),
                self.params.message_data_max_size()
            );
            return Err(Error::BufferTooSmall);
        }

        let ep = format!("ep={}", endpoint);
        let queries = config.queries();

        let mut msg = self.new_request(MsgCode::MethodPost, NotificationKind::Register);
        msg.append_option_with_str(OptionNumber::URI_PATH, LWM2M_REGISTER_URI_PATH)?;
        msg.append_option(
            OptionNumber::CONTENT_FORMAT,
            ContentFormat::APPLICATION_LINK_FORMAT.into(),
        )?;
        msg.append_option_with_str(OptionNumber::URI_QUERY, &ep)?;
        for query in &queries {
            msg.append_option_with_str(OptionNumber::URI_QUERY, query)?;
        }
        msg.set_payload(link_format);

        info!("register {} with {:?}", endpoint, remote);
        self.send_request(&msg, NotificationKind::Register, remote)
    }

    /// Sends an update or deregister request to the stored location of `remote`.
    fn location_request(
        &self,
        msg_code: MsgCode,
        kind: NotificationKind,
        remote: &T::SocketAddr,
        queries: &[String],
    ) -> Result<(), Error> {
        let location = self.location(remote).ok_or_else(|| {
            warn!("no registration location for {:?}", remote);
            Error::NotFound
        })?;

        let mut msg = self.new_request(msg_code, kind);
        for segment in &location {
            msg.append_option_with_str(OptionNumber::URI_PATH, segment)?;
        }
        for query in queries {
            msg.append_option_with_str(OptionNumber::URI_QUERY, query)?;
        }

        info!("{:?} at /{} with {:?}", kind, location.join("/"), remote);
        self.send_request(&msg, kind, remote)
    }

    /// Updates the registration with the server at `remote`.
    ///
    /// Sends a POST to the location assigned on registration, with `config` as Uri-Query
    /// options. Fails with [`Error::NotFound`] if `remote` has not assigned a location.
    pub fn update(&self, remote: &T::SocketAddr, config: &ServerConfig) -> Result<(), Error> {
        let queries = config.queries();
        self.location_request(
            MsgCode::MethodPost,
            NotificationKind::Update,
            remote,
            &queries,
        )
    }

    /// Deregisters from the server at `remote` with a DELETE on the assigned location.
    ///
    /// Fails with [`Error::NotFound`] if `remote` has not assigned a location.
    pub fn deregister(&self, remote: &T::SocketAddr) -> Result<(), Error> {
        self.location_request(
            MsgCode::MethodDelete,
            NotificationKind::Deregister,
            remote,
            &[],
        )
    }

    fn save_location(&self, remote: &T::SocketAddr, response: &Message<'_>) -> Result<(), Error> {
        let mut location = Vec::new();
        let mut len = 0;

        for segment in response.option_values(OptionNumber::LOCATION_PATH) {
            len += segment.len();
            if len > self.params.max_location_len() {
                warn!("location from {:?} exceeds {} bytes", remote, len);
                return Err(Error::OutOfMemory);
            }

            let segment = std::str::from_utf8(segment).map_err(|_| Error::InvalidContent)?;
            location.push(segment.to_string());
        }

        if location.is_empty() {
            return Ok(());
        }

        let mut state = self.lock();
        let max_servers = self.params.max_servers();

        match state.locations.iter().position(|(addr, _)| addr == remote) {
            Some(index) => state.locations[index].1 = location,
            None if state.locations.len() >= max_servers => {
                warn!("location table full, dropping location of {:?}", remote);
                return Err(Error::OutOfMemory);
            }
            None => state.locations.push((remote.clone(), location)),
        }

        info!("location of {:?} saved", remote);
        Ok(())
    }

    /// Completes the pending exchange that `response` answers.
    ///
    /// A successful register or update response carrying Location-Path options records
    /// them as the location of `remote`, replacing any earlier one. The notification callback, if set,
    /// is invoked with the kind of exchange and the response code, also when the location
    /// cannot be stored. Fails with [`Error::NotFound`] if no pending exchange matches the
    /// token and remote, or with the error from storing the location.
    pub fn handle_response(
        &self,
        response: &Message<'_>,
        remote: &T::SocketAddr,
    ) -> Result<NotificationKind, Error> {
        let (kind, notification) = {
            let mut state = self.lock();

            let index = state
                .pending
                .iter()
                .position(|(token, _, addr)| *token == response.token() && addr == remote)
                .ok_or(Error::NotFound)?;

            let (_, kind, _) = state.pending.remove(index);
            (kind, state.notification.clone())
        };

        debug!("{:?} response {} from {:?}", kind, response.msg_code(), remote);

        let binds_location = match kind {
            NotificationKind::Register | NotificationKind::Update => true,
            _ => false,
        };
        let saved = if binds_location && response.msg_code().is_success() {
            self.save_location(remote, response)
        } else {
            Ok(())
        };

        // The exchange is complete even when its location could not be kept.
        if let Some(notification) = notification {
            notification(kind, remote, response.msg_code());
        }

        saved.map(|()| kind)
    }

    /// Sends an empty piggybacked response with `msg_code` to `request`.
    pub fn respond_with_code(
        &self,
        msg_code: MsgCode,
        request: &Message<'_>,
        remote: &T::SocketAddr,
    ) -> Result<(), Error> {
        respond_with_code(&self.transport, msg_code, request, remote)
    }

    /// Sends a 2.05 Content piggybacked response carrying `payload` to `request`.
    pub fn respond_with_payload(
        &self,
        payload: &[u8],
        request: &Message<'_>,
        remote: &T::SocketAddr,
    ) -> Result<(), Error> {
        respond_with_payload(&self.transport, payload, request, remote)
    }
}

/// Sends an empty piggybacked response with `msg_code` to `request` through `transport`.
pub fn respond_with_code<T: Transport>(
    transport: &T,
    msg_code: MsgCode,
    request: &Message<'_>,
    remote: &T::SocketAddr,
) -> Result<(), Error> {
    let response = Message::response_to(request, msg_code);
    transport.send_to(&response.to_vec()?, remote)?;
    Ok(())
}

/// Sends a 2.05 Content piggybacked response carrying `payload` to `request` through
/// `transport`.
pub fn respond_with_payload<T: Transport>(
    transport: &T,
    payload: &[u8],
    request: &Message<'_>,
    remote: &T::SocketAddr,
) -> Result<(), Error> {
    let mut response = Message::response_to(request, MsgCode::SuccessContent);
    response.set_payload(payload);
    transport.send_to(&response.to_vec()?, remote)?;
    Ok(())
}
