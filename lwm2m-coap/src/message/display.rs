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
use core::fmt::{Display, Formatter};

impl<'a> Display for Message<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "<{:?} {}", self.msg_type(), self.msg_code())?;
        write!(f, " MID:{:04X}", self.msg_id())?;

        let token = self.token();
        if !token.is_empty() {
            write!(f, " TOK:{}", token)?;
        }

        let mut content_format: Option<u16> = None;

        for option in self.options() {
            let bytes = option.value.as_bytes();
            if option.number == OptionNumber::CONTENT_FORMAT {
                content_format = try_decode_u16(bytes);
            }
            f.write_str(" ")?;
            option.number.fmt_with_value(f, bytes)?;
        }

        let payload = self.payload();
        if !payload.is_empty() {
            let is_text = content_format.map_or(true, |i| ContentFormat(i).is_utf8());

            match std::str::from_utf8(payload) {
                Ok(payload_str) if is_text => write!(f, " {:?}", payload_str)?,
                _ => write!(f, " {:02x?}", payload)?,
            }
        }

        write!(f, ">")
    }
}

/// Helper struct for formatting a raw CoAP buffer for logging.
///
/// Buffers that fail to decode are shown as hex.
#[derive(Copy, Clone)]
pub struct CoapByteDisplayFormatter<'buf>(pub &'buf [u8]);

impl<'buf> Display for CoapByteDisplayFormatter<'buf> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match Message::decode(self.0) {
            Ok(msg) => Display::fmt(&msg, f),
            Err(e) => write!(f, "<CORRUPTED {:?} {:02x?}>", e, self.0),
        }
    }
}

impl<'buf> core::fmt::Debug for CoapByteDisplayFormatter<'buf> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "CoapByteDisplayFormatter({}, {:02x?})", self, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_request() {
        let bytes = [
            0x42, 0x01, 0x12, 0x34, 0xAB, 0xCD, 0xB4, b't', b'e', b'm', b'p',
        ];
        let s = CoapByteDisplayFormatter(&bytes).to_string();

        assert!(s.starts_with("<Con 0.01 MID:1234 TOK:"), "{}", s);
        assert!(s.contains("temp"), "{}", s);
        assert!(s.ends_with('>'), "{}", s);
    }

    #[test]
    fn display_corrupted() {
        let s = CoapByteDisplayFormatter(&[0x40]).to_string();
        assert!(s.starts_with("<CORRUPTED InvalidLength"), "{}", s);
    }
}
