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
use core::ops::Deref;

/// Type for holding the value of a CoAP message token (zero to eight bytes).
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub struct MsgToken {
    len: u8,
    bytes: [u8; COAP_MAX_TOKEN_LEN],
}

impl MsgToken {
    /// Constant representing an empty token.
    pub const EMPTY: MsgToken = MsgToken {
        len: 0u8,
        bytes: [0; COAP_MAX_TOKEN_LEN],
    };

    /// Returns the length of this token.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if the length of this token is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a byte slice containing this token.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl std::fmt::Display for MsgToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in self.as_bytes() {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

impl Default for MsgToken {
    fn default() -> Self {
        MsgToken::EMPTY
    }
}

impl Deref for MsgToken {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl core::cmp::PartialEq<[u8]> for MsgToken {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

/// Tokens built from a `u16` always occupy two bytes, big-endian.
impl core::convert::From<u16> for MsgToken {
    fn from(x: u16) -> Self {
        let mut bytes = [0u8; COAP_MAX_TOKEN_LEN];
        bytes[..2].copy_from_slice(&x.to_be_bytes());
        MsgToken { len: 2, bytes }
    }
}

/// Tokens built from a `u32` use the minimal integer encoding.
impl core::convert::From<u32> for MsgToken {
    fn from(x: u32) -> Self {
        let mut bytes = [0u8; COAP_MAX_TOKEN_LEN];
        let len = encode_uint(x, &mut bytes).len();
        MsgToken {
            len: len as u8,
            bytes,
        }
    }
}

impl TryFrom<&[u8]> for MsgToken {
    type Error = Error;

    fn try_from(x: &[u8]) -> Result<Self, Self::Error> {
        if x.len() > COAP_MAX_TOKEN_LEN {
            return Err(Error::InvalidData);
        }

        let mut bytes = [0u8; COAP_MAX_TOKEN_LEN];
        bytes[..x.len()].copy_from_slice(x);
        Ok(MsgToken {
            len: x.len() as u8,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_from_u16() {
        let token = MsgToken::from(0xAE1Cu16);
        assert_eq!(token.as_bytes(), &[0xAE, 0x1C]);
        assert_eq!(token.to_string(), "AE1C");

        // Still two bytes when the high byte is zero.
        assert_eq!(MsgToken::from(0x002Au16).len(), 2);
    }

    #[test]
    fn token_from_slice() {
        assert_eq!(
            MsgToken::try_from(&[1u8, 2, 3][..]).map(|t| t.len()),
            Ok(3)
        );
        assert_eq!(
            MsgToken::try_from(&[0u8; 9][..]),
            Err(Error::InvalidData)
        );
        assert!(MsgToken::try_from(&[0u8; 0][..]).unwrap().is_empty());
    }
}
