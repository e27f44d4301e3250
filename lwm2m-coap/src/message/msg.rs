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

/// A CoAP message: header fields, token, a bounded list of options and a payload.
///
/// The lifetime `'a` is the lifetime of the bytes the message borrows. For a decoded
/// message this is the receive buffer passed to [`Message::decode`]; for an outgoing
/// message it is the lifetime of the strings and byte slices appended to it. A message can
/// therefore never outlive the buffer its options and payload point into.
///
/// Options are kept in the order they appear on the wire, which is always ascending by
/// option number. At most [`COAP_MAX_NUMBER_OF_OPTIONS`] options can be held.
#[derive(Debug, Clone)]
pub struct Message<'a> {
    pub(super) version: u8,
    pub(super) msg_type: MsgType,
    pub(super) msg_code: MsgCode,
    pub(super) msg_id: MsgId,
    pub(super) token: MsgToken,
    pub(super) options: [CoapOption<'a>; COAP_MAX_NUMBER_OF_OPTIONS],
    pub(super) options_count: usize,

    /// Number of the last option appended; the delta base for the next one.
    pub(super) options_delta: OptionNumber,

    /// Accumulated encoded size of all options.
    pub(super) options_len: usize,

    pub(super) payload: &'a [u8],
}

impl<'a> Message<'a> {
    /// Creates a new, empty message with the given type, code and message id.
    pub fn new(msg_type: MsgType, msg_code: MsgCode, msg_id: MsgId) -> Message<'a> {
        Message {
            version: COAP_VERSION,
            msg_type,
            msg_code,
            msg_id,
            token: MsgToken::EMPTY,
            options: [CoapOption::default(); COAP_MAX_NUMBER_OF_OPTIONS],
            options_count: 0,
            options_delta: OptionNumber(0),
            options_len: 0,
            payload: &[],
        }
    }

    /// Creates an empty piggybacked response to `request`: an ACK for a confirmable
    /// request, a NON for a non-confirmable one, with the request's message id and token.
    pub fn response_to(request: &Message<'_>, msg_code: MsgCode) -> Message<'a> {
        let mut response = Message::new(
            request.msg_type().response_type(),
            msg_code,
            request.msg_id(),
        );
        response.set_token(request.token());
        response
    }

    /// Returns the protocol version from the header.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the message type.
    pub fn msg_type(&self) -> MsgType {
        self.msg_type
    }

    /// Returns the message code.
    pub fn msg_code(&self) -> MsgCode {
        self.msg_code
    }

    /// Returns the message id.
    pub fn msg_id(&self) -> MsgId {
        self.msg_id
    }

    /// Returns the message token.
    pub fn token(&self) -> MsgToken {
        self.token
    }

    /// Returns the payload. Empty if the message has none.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Returns the options of this message in wire order.
    pub fn options(&self) -> &[CoapOption<'a>] {
        &self.options[..self.options_count]
    }

    /// Returns the number of options held.
    pub fn options_count(&self) -> usize {
        self.options_count
    }

    /// Returns the values of every option with the given number, in order.
    pub fn option_values(&self, key: OptionNumber) -> impl Iterator<Item = &[u8]> + '_ {
        self.options()
            .iter()
            .filter(move |option| option.number == key)
            .map(|option| option.value.as_bytes())
    }

    /// Decodes the first option with the given number as an unsigned integer.
    ///
    /// Fails with [`Error::NotFound`] if no such option is present.
    pub fn option_u32(&self, key: OptionNumber) -> Result<u32, Error> {
        let value = self.option_values(key).next().ok_or(Error::NotFound)?;
        decode_uint(value)
    }

    /// Sets the message type.
    pub fn set_msg_type(&mut self, msg_type: MsgType) {
        self.msg_type = msg_type;
    }

    /// Sets the message code.
    pub fn set_msg_code(&mut self, msg_code: MsgCode) {
        self.msg_code = msg_code;
    }

    /// Sets the message id.
    pub fn set_msg_id(&mut self, msg_id: MsgId) {
        self.msg_id = msg_id;
    }

    /// Sets the token.
    pub fn set_token(&mut self, token: MsgToken) {
        self.token = token;
    }

    /// Sets the payload. The bytes are borrowed, not copied.
    pub fn set_payload(&mut self, payload: &'a [u8]) {
        self.payload = payload;
    }

    /// Returns the number of bytes [`Message::encode`] will write for this message.
    pub fn encoded_len(&self) -> usize {
        let mut len = COAP_HEADER_SIZE + self.token.len() + self.options_len;

        if !self.payload.is_empty() {
            len += 1 + self.payload.len();
        }

        len
    }
}

impl<'a> Default for Message<'a> {
    fn default() -> Self {
        Message::new(MsgType::Con, MsgCode::Empty, 0)
    }
}
