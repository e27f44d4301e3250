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

//! Low-level option codec functions.
//!
//! Each option on the wire is a header byte holding a four-bit delta (relative to the
//! previous option number) and a four-bit length, followed by up to two extended delta
//! bytes, up to two extended length bytes and the value. Nibble values 13 and 14 escape
//! to one byte (+13) and two big-endian bytes (+269); 15 is reserved.

use super::option::*;
use super::*;
use std::convert::TryFrom;

/// Calculates the encoded size of a CoAP option.
pub fn calc_option_size(prev_key: OptionNumber, key: OptionNumber, mut value_len: usize) -> usize {
    if value_len >= 269 {
        value_len += 2;
    } else if value_len >= 13 {
        value_len += 1;
    }

    let option_delta = key - prev_key;

    if option_delta >= 269 {
        value_len += 3;
    } else if option_delta >= 13 {
        value_len += 2;
    } else {
        value_len += 1;
    }

    value_len
}

/// Returns the header nibble and number of extended bytes used to carry `value`.
fn extended_nibble(value: u32) -> (u8, usize) {
    if value >= 269 {
        (14, 2)
    } else if value >= 13 {
        (13, 1)
    } else {
        (value as u8, 0)
    }
}

fn write_extended(dst: &mut [u8], value: u32) {
    match dst.len() {
        1 => dst[0] = (value - 13) as u8,
        2 => dst.copy_from_slice(&((value - 269) as u16).to_be_bytes()),
        _ => (),
    }
}

fn read_extended(buffer: &[u8], index: &mut usize, nibble: u8) -> Result<u32, Error> {
    match nibble {
        13 => {
            let ext = *buffer.get(*index).ok_or(Error::TruncatedInput)?;
            *index += 1;
            Ok(13 + ext as u32)
        }
        14 => {
            let ext = buffer
                .get(*index..*index + 2)
                .ok_or(Error::TruncatedInput)?;
            *index += 2;
            Ok(269 + u16::from_be_bytes([ext[0], ext[1]]) as u32)
        }
        15 => Err(Error::InvalidData),
        x => Ok(x as u32),
    }
}

/// Decodes one option from the start of `buffer`.
///
/// Returns the absolute option number (`last_option` plus the decoded delta), the value
/// as a slice of `buffer`, and the total number of bytes the option occupies.
///
/// The caller is responsible for checking for the payload marker first: a leading `0xFF`
/// is reported as [`Error::InvalidData`], as is any other use of the reserved nibble 15.
/// A header declaring more bytes than `buffer` holds fails with [`Error::TruncatedInput`].
pub fn decode_option<'a>(
    buffer: &'a [u8],
    last_option: OptionNumber,
) -> Result<(OptionNumber, &'a [u8], usize), Error> {
    let header = *buffer.first().ok_or(Error::TruncatedInput)?;
    let mut index = 1;

    let key_delta = read_extended(buffer, &mut index, header >> 4)?;
    let len = read_extended(buffer, &mut index, header & 0xF)? as usize;

    // Don't let the key wrap.
    let key = u16::try_from(key_delta)
        .ok()
        .and_then(|delta| last_option.checked_add(delta))
        .ok_or(Error::InvalidData)?;

    let value = buffer
        .get(index..index + len)
        .ok_or(Error::TruncatedInput)?;

    Ok((key, value, index + len))
}

/// Encodes an option into the given buffer, including the value, returning the number of
/// bytes the option occupies.
///
/// Passing `None` for `buffer` performs a dry run: nothing is written and only the size is
/// returned. Options must be encoded in ascending order, so `key < prev_key` fails with
/// [`Error::InvalidData`].
pub fn encode_option(
    buffer: Option<&mut [u8]>,
    prev_key: OptionNumber,
    key: OptionNumber,
    value: &[u8],
) -> Result<usize, Error> {
    if prev_key > key {
        warn!("option out of order: prev:{} key:{}", prev_key, key);
        return Err(Error::InvalidData);
    }

    if value.len() > MAX_OPTION_VALUE_SIZE {
        warn!("value_len:{}, max:{}", value.len(), MAX_OPTION_VALUE_SIZE);
        return Err(Error::InvalidData);
    }

    let calc_len = calc_option_size(prev_key, key, value.len());

    let buffer = match buffer {
        Some(buffer) => buffer,
        None => return Ok(calc_len),
    };

    if calc_len > buffer.len() {
        warn!("calc_len:{}, blen:{}", calc_len, buffer.len());
        return Err(Error::BufferTooSmall);
    }

    let option_delta = (key - prev_key) as u32;
    let (delta_nibble, delta_ext) = extended_nibble(option_delta);
    let (len_nibble, len_ext) = extended_nibble(value.len() as u32);

    buffer[0] = (delta_nibble << 4) | len_nibble;

    let mut index = 1;
    write_extended(&mut buffer[index..index + delta_ext], option_delta);
    index += delta_ext;
    write_extended(&mut buffer[index..index + len_ext], value.len() as u32);
    index += len_ext;

    // The value bytes are always at the end.
    buffer[index..index + value.len()].copy_from_slice(value);

    Ok(index + value.len())
}
