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

/// A convenience iterator for parsing options from a byte buffer.
///
/// Iteration stops at the end of the buffer or at the payload marker. After the first
/// error, the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct OptionIterator<'a> {
    buffer: &'a [u8],
    last_option: OptionNumber,
}

impl<'a> Default for OptionIterator<'a> {
    fn default() -> Self {
        OptionIterator::new(&[])
    }
}

impl<'a> OptionIterator<'a> {
    /// Creates a new instance of an `OptionIterator` with the given byte slice.
    pub fn new(buffer: &'a [u8]) -> OptionIterator<'a> {
        OptionIterator {
            buffer,
            last_option: Default::default(),
        }
    }

    /// Returns the unread remaining bytes, starting at the next option or payload marker.
    pub fn as_slice(&self) -> &'a [u8] {
        self.buffer
    }

    /// Peek ahead to the next option without moving the iterator forward.
    pub fn peek(&self) -> Option<Result<(OptionNumber, &'a [u8]), Error>> {
        self.clone().next()
    }
}

impl<'a> Iterator for OptionIterator<'a> {
    type Item = Result<(OptionNumber, &'a [u8]), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.buffer.first() {
            None | Some(&COAP_PAYLOAD_MARKER) => return None,
            Some(_) => (),
        }

        match decode_option(self.buffer, self.last_option) {
            Ok((key, value, consumed)) => {
                self.buffer = &self.buffer[consumed..];
                self.last_option = key;
                Some(Ok((key, value)))
            }
            Err(e) => {
                self.buffer = &[];
                Some(Err(e))
            }
        }
    }
}

impl AsRef<[u8]> for OptionIterator<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterate_until_marker() {
        // Uri-Path "rd", Content-Format 40, Uri-Query "ep=a", marker, payload.
        let bytes = [
            0xB2, b'r', b'd', 0x11, 40, 0x34, b'e', b'p', b'=', b'a', 0xFF, b'<', b'>',
        ];
        let mut iter = OptionIterator::new(&bytes);

        assert_eq!(
            Some(Ok((OptionNumber::URI_PATH, &b"rd"[..]))),
            iter.next()
        );
        assert_eq!(
            Some(Ok((OptionNumber::CONTENT_FORMAT, &[40u8][..]))),
            iter.peek()
        );
        assert_eq!(
            Some(Ok((OptionNumber::CONTENT_FORMAT, &[40u8][..]))),
            iter.next()
        );
        assert_eq!(
            Some(Ok((OptionNumber::URI_QUERY, &b"ep=a"[..]))),
            iter.next()
        );
        assert_eq!(None, iter.next());
        assert_eq!(iter.as_slice(), &[0xFF, b'<', b'>']);
    }

    #[test]
    fn stops_after_error() {
        let mut iter = OptionIterator::new(&[0xB4, b'x']);
        assert_eq!(Some(Err(Error::TruncatedInput)), iter.next());
        assert_eq!(None, iter.next());
    }
}
