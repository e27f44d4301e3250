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

use super::codec::*;
use super::*;

impl<'a> OptionAppend<'a> for Message<'a> {
    fn append_option(&mut self, key: OptionNumber, value: OptionValue<'a>) -> Result<(), Error> {
        if self.options_count >= COAP_MAX_NUMBER_OF_OPTIONS {
            warn!("no free option slot for {}", key);
            return Err(Error::OutOfOptionSlots);
        }

        let len = encode_option(None, self.options_delta, key, value.as_bytes())?;

        self.options[self.options_count] = CoapOption { number: key, value };
        self.options_count += 1;
        self.options_delta = key;
        self.options_len += len;

        Ok(())
    }
}

impl<'a> Message<'a> {
    /// Encodes this message into `buffer`, returning the number of bytes written.
    ///
    /// An empty `buffer` is a size query: nothing is written and the required size is
    /// returned. A non-empty buffer smaller than that fails with [`Error::BufferTooSmall`].
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        let len = self.encoded_len();

        if buffer.is_empty() {
            return Ok(len);
        }

        if buffer.len() < len {
            warn!("message needs {} bytes, buffer has {}", len, buffer.len());
            return Err(Error::BufferTooSmall);
        }

        let token = self.token.as_bytes();

        buffer[0] = ((self.version & 0x3) << COAP_MSG_VER_OFFS)
            | ((self.msg_type as u8) << COAP_MSG_T_OFFS)
            | (token.len() as u8 & COAP_MSG_TKL_MASK);
        buffer[1] = self.msg_code.into();
        buffer[2..4].copy_from_slice(&self.msg_id.to_be_bytes());

        let mut index = COAP_HEADER_SIZE;
        buffer[index..index + token.len()].copy_from_slice(token);
        index += token.len();

        let mut prev_key = OptionNumber(0);
        for option in self.options() {
            index += encode_option(
                Some(&mut buffer[index..]),
                prev_key,
                option.number,
                option.value.as_bytes(),
            )?;
            prev_key = option.number;
        }

        if !self.payload.is_empty() {
            buffer[index] = COAP_PAYLOAD_MARKER;
            index += 1;
            buffer[index..index + self.payload.len()].copy_from_slice(self.payload);
            index += self.payload.len();
        }

        Ok(index)
    }

    /// Encodes this message into a newly allocated vector.
    pub fn to_vec(&self) -> Result<Vec<u8>, Error> {
        let mut buffer = vec![0u8; self.encoded_len()];
        let len = self.encode(&mut buffer)?;
        buffer.truncate(len);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn get_temp<'a>() -> Message<'a> {
        let mut msg = Message::new(MsgType::Con, MsgCode::MethodGet, 0x1234);
        msg.set_token(MsgToken::from(0xABCDu16));
        msg.append_option_with_str(OptionNumber::URI_PATH, "temp")
            .unwrap();
        msg
    }

    #[test]
    fn encode_get_request() {
        let bytes = get_temp().to_vec().unwrap();
        assert_eq!(
            bytes,
            vec![0x42, 0x01, 0x12, 0x34, 0xAB, 0xCD, 0xB4, b't', b'e', b'm', b'p']
        );

        let decoded = Message::decode(&bytes).unwrap();
        assert_eq!(decoded.msg_code(), MsgCode::MethodGet);
        assert_eq!(decoded.token(), MsgToken::from(0xABCDu16));
        assert_eq!(decoded.options(), get_temp().options());
    }

    #[test]
    fn size_query() {
        let mut msg = get_temp();
        msg.set_payload(b"hello");

        let size = msg.encode(&mut []).unwrap();
        assert_eq!(size, 17);

        let mut exact = vec![0u8; size];
        assert_eq!(msg.encode(&mut exact), Ok(size));

        let mut short = vec![0u8; size - 1];
        assert_eq!(msg.encode(&mut short), Err(Error::BufferTooSmall));
    }

    #[test]
    fn append_out_of_order() {
        let mut msg = Message::new(MsgType::Con, MsgCode::MethodPost, 1);
        msg.append_option_with_str(OptionNumber::URI_QUERY, "ep=a")
            .unwrap();

        assert_eq!(
            msg.append_option_with_str(OptionNumber::URI_PATH, "rd"),
            Err(Error::InvalidData)
        );
        assert_eq!(msg.options_count(), 1);
    }

    #[test]
    fn append_until_full() {
        let mut msg = Message::new(MsgType::Con, MsgCode::MethodGet, 1);
        for _ in 0..COAP_MAX_NUMBER_OF_OPTIONS {
            msg.append_option_with_str(OptionNumber::URI_PATH, "a")
                .unwrap();
        }

        assert_eq!(
            msg.append_option_with_str(OptionNumber::URI_PATH, "a"),
            Err(Error::OutOfOptionSlots)
        );
    }

    #[test]
    fn zero_uint_option() {
        let mut msg = Message::new(MsgType::Con, MsgCode::MethodGet, 1);
        msg.append_option_with_u32(OptionNumber::CONTENT_FORMAT, 0)
            .unwrap();

        let bytes = msg.to_vec().unwrap();
        assert_eq!(&bytes[4..], &[0xC0]);

        let decoded = Message::decode(&bytes).unwrap();
        assert_eq!(decoded.option_u32(OptionNumber::CONTENT_FORMAT), Ok(0));
    }

    #[test]
    fn stress_round_trip() {
        let mut gen = SmallRng::from_seed(Default::default());
        let values: Vec<Vec<u8>> = (0..COAP_MAX_NUMBER_OF_OPTIONS)
            .map(|i| vec![i as u8; i * 60])
            .collect();

        for _ in 0..200 {
            let mut msg = Message::new(MsgType::Non, MsgCode::MethodPut, gen.gen());
            let mut key = 0u16;

            for value in values.iter().take(gen.gen_range(0, COAP_MAX_NUMBER_OF_OPTIONS + 1)) {
                key = key.saturating_add(gen.gen_range(0, 400));
                msg.append_option_with_bytes(OptionNumber(key), value)
                    .unwrap();
            }

            let bytes = msg.to_vec().unwrap();
            assert_eq!(bytes.len(), msg.encoded_len());

            let decoded = Message::decode(&bytes).unwrap();
            assert_eq!(decoded.msg_id(), msg.msg_id());
            assert_eq!(decoded.options(), msg.options());
        }
    }
}
