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

//! Primitive value codec used for option values and TLV payloads.

use super::*;

/// Encodes an unsigned 32-bit number into the given buffer, returning
/// the resized buffer. The returned buffer is only as large as it needs
/// to be to represent the given value: empty for zero, otherwise one,
/// two or four bytes in network byte order. A three-byte form is never
/// produced, even though [`decode_uint`] accepts one.
///
/// `dst` must be at least four bytes long for values above `0xFFFF`.
pub fn encode_uint(value: u32, dst: &mut [u8]) -> &mut [u8] {
    if value == 0 {
        &mut []
    } else if value <= 0xFF {
        dst[0] = value as u8;
        &mut dst[..1]
    } else if value <= 0xFFFF {
        dst[..2].copy_from_slice(&(value as u16).to_be_bytes());
        &mut dst[..2]
    } else {
        dst[..4].copy_from_slice(&value.to_be_bytes());
        &mut dst[..4]
    }
}

/// Decodes a big-endian unsigned integer of zero to four bytes.
///
/// Any other input length fails with [`Error::InvalidLength`].
pub fn decode_uint(src: &[u8]) -> Result<u32, Error> {
    try_decode_u32(src).ok_or(Error::InvalidLength)
}

/// Attempts to decode the given big-endian-encoded integer to a `u32`.
/// Input may be up to four bytes long. If the input is larger than four
/// bytes long, returns `None`.
pub fn try_decode_u32(src: &[u8]) -> Option<u32> {
    if src.len() > 4 {
        return None;
    }

    Some(src.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32))
}

/// Attempts to decode the given big-endian-encoded integer to a `u16`.
/// Input may be up to two bytes long. If the input is larger than two
/// bytes long, returns `None`.
pub fn try_decode_u16(src: &[u8]) -> Option<u16> {
    match src.len() {
        0 => Some(0u16),
        1 => Some(src[0] as u16),
        2 => Some(((src[0] as u16) << 8) + src[1] as u16),
        _ => None,
    }
}

/// Copies `value` into `dst`, returning the number of bytes the value occupies.
///
/// When `dst` is `None` nothing is written and only the length is returned.
pub fn encode_opaque(dst: Option<&mut [u8]>, value: &[u8]) -> Result<usize, Error> {
    if let Some(dst) = dst {
        if dst.len() < value.len() {
            warn!("opaque len:{}, blen:{}", value.len(), dst.len());
            return Err(Error::BufferTooSmall);
        }
        dst[..value.len()].copy_from_slice(value);
    }

    Ok(value.len())
}

/// String flavor of [`encode_opaque`]. No terminator is written.
pub fn encode_string(dst: Option<&mut [u8]>, value: &str) -> Result<usize, Error> {
    encode_opaque(dst, value.as_bytes())
}

#[cfg(test)]
mod tests {
    use crate::util::*;

    #[test]
    fn encode_decode_uint() {
        for &(i, len) in &[
            (0x00, 0),
            (0x01, 1),
            (0x0FF, 1),
            (0x100, 2),
            (0x0FFFF, 2),
            (0x10000, 4),
            (0x0FFFFFF, 4),
            (0x1000000, 4),
            (0xFFFFFFFF, 4),
        ] {
            let buf = &mut [0; 4];
            let enc = encode_uint(i, buf);
            assert_eq!(enc.len(), len);
            assert_eq!(decode_uint(enc), Ok(i));
        }

        assert_eq!(decode_uint(&[0; 5]), Err(Error::InvalidLength));
    }

    #[test]
    fn encode_uint_never_uses_three_bytes() {
        assert_eq!(encode_uint(0x10000, &mut [0; 4]), &[0x00, 0x01, 0x00, 0x00]);
        assert_eq!(encode_uint(0xFFFFFF, &mut [0; 4]), &[0x00, 0xFF, 0xFF, 0xFF]);
        assert_eq!(encode_uint(0, &mut [0; 4]), &[] as &[u8]);
    }

    #[test]
    fn decode_three_byte_uint() {
        assert_eq!(decode_uint(&[0x01, 0x02, 0x03]), Ok(0x010203));
        assert_eq!(decode_uint(&[]), Ok(0));
    }

    #[test]
    fn encode_decode_u16() {
        for i in 0u32..=core::u16::MAX as u32 {
            let buf = &mut [0; 4];
            let enc = encode_uint(i as u32, buf);
            assert_eq!(try_decode_u16(enc).unwrap(), i as u16, "enc:{:02x?}", enc);
        }

        assert_eq!(try_decode_u16(&mut [0; 3]), None);
    }

    #[test]
    fn opaque_bounds() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_opaque(None, &[1, 2, 3, 4, 5]), Ok(5));
        assert_eq!(
            encode_opaque(Some(&mut buf), &[1, 2, 3, 4, 5]),
            Err(Error::BufferTooSmall)
        );
        assert_eq!(encode_string(Some(&mut buf), "rd"), Ok(2));
        assert_eq!(&buf[..2], b"rd");
    }
}
