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

/// Type describing the type of an option's value.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone)]
pub enum OptionValueType {
    /// Opaque option value.
    Opaque,

    /// Option value is determined by the presence or absence of the option.
    Flag,

    /// Integer value.
    Integer,

    /// UTF8 string value.
    String,

    /// Integer value containing a `ContentFormat`.
    ContentFormat,
}

/// The value of an option held by a [`Message`](crate::message::Message).
///
/// Decoded messages and appended string/opaque values borrow the caller's bytes for
/// `'a`. Integer values are encoded once on append and stored inline, so the message
/// never points into a temporary.
#[derive(Debug, Copy, Clone)]
pub enum OptionValue<'a> {
    /// Borrowed value bytes.
    Bytes(&'a [u8]),

    /// Minimal big-endian encoding of an unsigned integer.
    Uint {
        /// Encoded bytes; only the first `len` are meaningful.
        bytes: [u8; 4],

        /// Encoded length, 0 through 4.
        len: u8,
    },
}

impl<'a> OptionValue<'a> {
    /// Returns the encoded value bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            OptionValue::Bytes(x) => x,
            OptionValue::Uint { bytes, len } => &bytes[..*len as usize],
        }
    }

    /// Returns the length of the encoded value.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the value is zero-length.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Values compare by their encoded bytes, regardless of representation.
impl<'a> PartialEq for OptionValue<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> Eq for OptionValue<'a> {}

impl<'a> Default for OptionValue<'a> {
    fn default() -> Self {
        OptionValue::Bytes(&[])
    }
}

impl<'a> From<u32> for OptionValue<'a> {
    fn from(value: u32) -> Self {
        let mut bytes = [0u8; 4];
        let len = encode_uint(value, &mut bytes).len() as u8;
        OptionValue::Uint { bytes, len }
    }
}

impl<'a> From<u16> for OptionValue<'a> {
    fn from(value: u16) -> Self {
        OptionValue::from(value as u32)
    }
}

impl<'a> From<ContentFormat> for OptionValue<'a> {
    fn from(value: ContentFormat) -> Self {
        OptionValue::from(value.0 as u32)
    }
}

impl<'a> From<&'a [u8]> for OptionValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        OptionValue::Bytes(value)
    }
}

impl<'a> From<&'a str> for OptionValue<'a> {
    fn from(value: &'a str) -> Self {
        OptionValue::Bytes(value.as_bytes())
    }
}

impl<'a> From<()> for OptionValue<'a> {
    fn from(_: ()) -> Self {
        OptionValue::Bytes(&[])
    }
}

/// A single option of a [`Message`](crate::message::Message): its logical number and value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct CoapOption<'a> {
    /// Logical option number, not the on-wire delta.
    pub number: OptionNumber,

    /// Option value.
    pub value: OptionValue<'a>,
}
