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
use core::convert::TryFrom;

impl<'a> Message<'a> {
    /// The minimum buffer size that can be passed into [`Message::decode`].
    pub const MIN_MESSAGE_BUFFER_LEN: usize = COAP_HEADER_SIZE;

    /// Decodes a stand-alone UDP CoAP message from `buffer`.
    ///
    /// Option values and the payload of the returned message borrow from `buffer`.
    pub fn decode(buffer: &'a [u8]) -> Result<Message<'a>, Error> {
        if buffer.len() < Message::MIN_MESSAGE_BUFFER_LEN {
            return Err(Error::InvalidLength);
        }

        let msg_code = MsgCode::from(buffer[1]);
        let msg_type = MsgType::from_bits((buffer[0] & COAP_MSG_T_MASK) >> COAP_MSG_T_OFFS);
        let msg_id = u16::from_be_bytes([buffer[2], buffer[3]]);

        let token_len = (buffer[0] & COAP_MSG_TKL_MASK) as usize;
        if token_len > COAP_MAX_TOKEN_LEN {
            return Err(Error::InvalidData);
        }

        let token = buffer
            .get(COAP_HEADER_SIZE..COAP_HEADER_SIZE + token_len)
            .ok_or(Error::InvalidLength)?;

        let mut msg = Message::new(msg_type, msg_code, msg_id);
        msg.version = buffer[0] >> COAP_MSG_VER_OFFS;
        msg.token = MsgToken::try_from(token)?;

        let mut iter = OptionIterator::new(&buffer[COAP_HEADER_SIZE + token_len..]);

        loop {
            // A reserved delta nibble anywhere but in the marker itself.
            if let Some(&header) = iter.as_slice().first() {
                if header != COAP_PAYLOAD_MARKER && header >> 4 == 0xF {
                    return Err(Error::InvalidContent);
                }
            }

            match iter.next() {
                Some(option) => {
                    let (key, value) = option?;
                    msg.append_option(key, OptionValue::Bytes(value))?;
                }
                None => break,
            }
        }

        if let Some((&COAP_PAYLOAD_MARKER, payload)) = iter.as_slice().split_first() {
            msg.payload = payload;
        }

        Ok(msg)
    }
}
