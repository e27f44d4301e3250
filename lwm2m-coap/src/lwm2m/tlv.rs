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

//! OMA LWM2M TLV codec.
//!
//! Each record is a type byte, an 8- or 16-bit identifier, an optional 8/16/24-bit
//! length and the value:
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! +-------+---+-------+-----------+
//! |id type|id |len typ| short len |
//! +-------+---+-------+-----------+
//! ```
//!
//! Lengths up to 7 fit in the type byte. Longer values escape to one, two or three
//! big-endian length bytes, the same way option lengths escape in the CoAP header.
//! As with the option codec, every encoder takes an optional buffer and returns the
//! encoded size when given `None`.

use super::*;

/// Maximum TLV value length, limited by the 24-bit length field.
pub const MAX_TLV_VALUE_LEN: usize = 0xFF_FFFF;

const TLV_ID_TYPE_OFFS: u8 = 6;
const TLV_ID_LEN_BIT: u8 = 0b0010_0000;
const TLV_LEN_TYPE_OFFS: u8 = 3;
const TLV_LEN_TYPE_MASK: u8 = 0b0001_1000;
const TLV_SHORT_LEN_MASK: u8 = 0b0000_0111;

/// What a TLV identifier refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TlvIdType {
    /// An object instance; the value is a sequence of resource TLVs.
    ObjectInstance = 0,

    /// One instance of a multiple resource.
    ResourceInstance = 1,

    /// A multiple resource; the value is a sequence of resource instance TLVs.
    MultipleResource = 2,

    /// A single resource with its value.
    ResourceValue = 3,
}

impl TlvIdType {
    fn from_bits(bits: u8) -> TlvIdType {
        match bits & 0x3 {
            0 => TlvIdType::ObjectInstance,
            1 => TlvIdType::ResourceInstance,
            2 => TlvIdType::MultipleResource,
            _ => TlvIdType::ResourceValue,
        }
    }
}

/// One TLV record. The value borrows from the decode buffer or the caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tlv<'a> {
    /// What `id` refers to.
    pub id_type: TlvIdType,

    /// Object instance, resource or resource instance id.
    pub id: u16,

    /// Raw value bytes.
    pub value: &'a [u8],
}

impl<'a> Tlv<'a> {
    /// Creates a record.
    pub fn new(id_type: TlvIdType, id: u16, value: &'a [u8]) -> Tlv<'a> {
        Tlv { id_type, id, value }
    }

    /// Creates a resource value record.
    pub fn resource(id: u16, value: &'a [u8]) -> Tlv<'a> {
        Tlv::new(TlvIdType::ResourceValue, id, value)
    }

    /// Returns the number of bytes [`Tlv::encode`] writes for this record.
    pub fn encoded_len(&self) -> usize {
        let id_len = if self.id > 0xFF { 2 } else { 1 };
        1 + id_len + length_bytes(self.value.len()) + self.value.len()
    }

    /// Encodes this record into `buffer`, returning the number of bytes written.
    ///
    /// With `None` for `buffer`, nothing is written and only the size is returned.
    pub fn encode(&self, buffer: Option<&mut [u8]>) -> Result<usize, Error> {
        let value_len = self.value.len();
        if value_len > MAX_TLV_VALUE_LEN {
            warn!("TLV value of {} bytes is too long", value_len);
            return Err(Error::InvalidLength);
        }

        let calc_len = self.encoded_len();

        let buffer = match buffer {
            Some(buffer) => buffer,
            None => return Ok(calc_len),
        };

        if calc_len > buffer.len() {
            warn!("calc_len:{}, blen:{}", calc_len, buffer.len());
            return Err(Error::BufferTooSmall);
        }

        let len_bytes = length_bytes(value_len);

        let mut type_byte = (self.id_type as u8) << TLV_ID_TYPE_OFFS;
        if self.id > 0xFF {
            type_byte |= TLV_ID_LEN_BIT;
        }
        if len_bytes == 0 {
            type_byte |= value_len as u8;
        } else {
            type_byte |= (len_bytes as u8) << TLV_LEN_TYPE_OFFS;
        }
        buffer[0] = type_byte;

        let mut index = 1;
        if self.id > 0xFF {
            buffer[index..index + 2].copy_from_slice(&self.id.to_be_bytes());
            index += 2;
        } else {
            buffer[index] = self.id as u8;
            index += 1;
        }

        let len_be = (value_len as u32).to_be_bytes();
        buffer[index..index + len_bytes].copy_from_slice(&len_be[4 - len_bytes..]);
        index += len_bytes;

        index += encode_opaque(Some(&mut buffer[index..]), self.value)?;

        Ok(index)
    }

    /// Decodes one record from the start of `buffer`, returning it and the number of
    /// bytes it occupies.
    pub fn decode(buffer: &'a [u8]) -> Result<(Tlv<'a>, usize), Error> {
        let type_byte = *buffer.first().ok_or(Error::TruncatedInput)?;
        let id_type = TlvIdType::from_bits(type_byte >> TLV_ID_TYPE_OFFS);

        let mut index = 1;

        let id = if type_byte & TLV_ID_LEN_BIT != 0 {
            let bytes = buffer.get(index..index + 2).ok_or(Error::TruncatedInput)?;
            index += 2;
            u16::from_be_bytes([bytes[0], bytes[1]])
        } else {
            let byte = *buffer.get(index).ok_or(Error::TruncatedInput)?;
            index += 1;
            byte as u16
        };

        let len_bytes = ((type_byte & TLV_LEN_TYPE_MASK) >> TLV_LEN_TYPE_OFFS) as usize;
        let len = if len_bytes == 0 {
            (type_byte & TLV_SHORT_LEN_MASK) as usize
        } else {
            let bytes = buffer
                .get(index..index + len_bytes)
                .ok_or(Error::TruncatedInput)?;
            index += len_bytes;
            bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize)
        };

        let value = buffer
            .get(index..index + len)
            .ok_or(Error::TruncatedInput)?;

        Ok((Tlv { id_type, id, value }, index + len))
    }

    /// Iterates over the records nested in the value of an object instance or multiple
    /// resource record.
    pub fn children(&self) -> TlvIterator<'a> {
        TlvIterator::new(self.value)
    }

    /// Decodes the value as a signed integer of 1, 2, 4 or 8 bytes.
    pub fn as_int(&self) -> Result<i64, Error> {
        decode_int(self.value)
    }

    /// Decodes the value as a boolean.
    pub fn as_bool(&self) -> Result<bool, Error> {
        match self.value {
            [0] => Ok(false),
            [1] => Ok(true),
            [_] => Err(Error::InvalidData),
            _ => Err(Error::InvalidLength),
        }
    }

    /// Decodes the value as a UTF-8 string.
    pub fn as_str(&self) -> Result<&'a str, Error> {
        std::str::from_utf8(self.value).map_err(|_| Error::InvalidData)
    }
}

fn length_bytes(len: usize) -> usize {
    if len <= TLV_SHORT_LEN_MASK as usize {
        0
    } else if len <= 0xFF {
        1
    } else if len <= 0xFFFF {
        2
    } else {
        3
    }
}

/// Writes the shortest big-endian two's complement form of `value` (1, 2, 4 or 8
/// bytes) into `dst`, returning the used part.
pub fn encode_int(value: i64, dst: &mut [u8; 8]) -> &[u8] {
    let len = if value >= i8::min_value() as i64 && value <= i8::max_value() as i64 {
        1
    } else if value >= i16::min_value() as i64 && value <= i16::max_value() as i64 {
        2
    } else if value >= i32::min_value() as i64 && value <= i32::max_value() as i64 {
        4
    } else {
        8
    };

    *dst = value.to_be_bytes();
    &dst[8 - len..]
}

/// Decodes a big-endian two's complement integer of 1, 2, 4 or 8 bytes.
pub fn decode_int(src: &[u8]) -> Result<i64, Error> {
    match src.len() {
        1 | 2 | 4 | 8 => {
            let fill = if src[0] & 0x80 != 0 { 0xFF } else { 0x00 };
            let mut bytes = [fill; 8];
            bytes[8 - src.len()..].copy_from_slice(src);
            Ok(i64::from_be_bytes(bytes))
        }
        _ => Err(Error::InvalidLength),
    }
}

/// Encodes an integer resource.
pub fn encode_int_resource(buffer: Option<&mut [u8]>, id: u16, value: i64) -> Result<usize, Error> {
    let mut bytes = [0u8; 8];
    Tlv::resource(id, encode_int(value, &mut bytes)).encode(buffer)
}

/// Encodes a boolean resource.
pub fn encode_bool_resource(
    buffer: Option<&mut [u8]>,
    id: u16,
    value: bool,
) -> Result<usize, Error> {
    Tlv::resource(id, &[value as u8]).encode(buffer)
}

/// Encodes a string resource.
pub fn encode_str_resource(buffer: Option<&mut [u8]>, id: u16, value: &str) -> Result<usize, Error> {
    Tlv::resource(id, value.as_bytes()).encode(buffer)
}

/// Encodes an opaque resource.
pub fn encode_opaque_resource(
    buffer: Option<&mut [u8]>,
    id: u16,
    value: &[u8],
) -> Result<usize, Error> {
    Tlv::resource(id, value).encode(buffer)
}

/// Iterator over consecutive TLV records in a buffer.
///
/// After the first error, the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct TlvIterator<'a> {
    buffer: &'a [u8],
}

impl<'a> TlvIterator<'a> {
    /// Creates an iterator over the records in `buffer`.
    pub fn new(buffer: &'a [u8]) -> TlvIterator<'a> {
        TlvIterator { buffer }
    }

    /// Returns the bytes not yet decoded.
    pub fn as_slice(&self) -> &'a [u8] {
        self.buffer
    }
}

impl<'a> Iterator for TlvIterator<'a> {
    type Item = Result<Tlv<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            return None;
        }

        match Tlv::decode(self.buffer) {
            Ok((tlv, consumed)) => {
                self.buffer = &self.buffer[consumed..];
                Some(Ok(tlv))
            }
            Err(e) => {
                self.buffer = &[];
                Some(Err(e))
            }
        }
    }
}

/// Returns the resource records of `buffer`, unwrapping a leading object instance
/// record if there is one.
fn resource_records(buffer: &[u8]) -> Result<TlvIterator<'_>, Error> {
    match TlvIterator::new(buffer).next() {
        Some(Ok(tlv)) if tlv.id_type == TlvIdType::ObjectInstance => Ok(tlv.children()),
        Some(Err(e)) => Err(e),
        _ => Ok(TlvIterator::new(buffer)),
    }
}

/// Sums up the encoded records, writing each after the previous one unless dry-running.
struct TlvWrite<'a> {
    buffer: Option<&'a mut [u8]>,
    len: usize,
}

impl<'a> TlvWrite<'a> {
    fn new(buffer: Option<&'a mut [u8]>) -> TlvWrite<'a> {
        TlvWrite { buffer, len: 0 }
    }

    fn put<F>(&mut self, encode: F) -> Result<(), Error>
    where
        F: FnOnce(Option<&mut [u8]>) -> Result<usize, Error>,
    {
        let len = self.len;
        let dst = match self.buffer.as_mut() {
            Some(buffer) => Some(buffer.get_mut(len..).ok_or(Error::BufferTooSmall)?),
            None => None,
        };
        self.len += encode(dst)?;
        Ok(())
    }
}

/// Resource values of an LWM2M Server object instance.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ServerInstance {
    /// Resource 0.
    pub short_server_id: u16,

    /// Resource 1, in seconds.
    pub lifetime: u32,

    /// Resource 2, in seconds.
    pub default_minimum_period: u32,

    /// Resource 3, in seconds.
    pub default_maximum_period: u32,

    /// Resource 5, in seconds.
    pub disable_timeout: u32,

    /// Resource 6.
    pub notification_storing_on_disabled: bool,

    /// Resource 7.
    pub binding: String,
}

impl ServerInstance {
    /// Encodes the readable resources as TLV records into `buffer`, returning the length.
    ///
    /// With `None` for `buffer`, nothing is written and only the length is returned.
    pub fn encode(&self, buffer: Option<&mut [u8]>) -> Result<usize, Error> {
        let mut write = TlvWrite::new(buffer);
        write.put(|b| encode_int_resource(b, 0, self.short_server_id as i64))?;
        write.put(|b| encode_int_resource(b, 1, self.lifetime as i64))?;
        write.put(|b| encode_int_resource(b, 2, self.default_minimum_period as i64))?;
        write.put(|b| encode_int_resource(b, 3, self.default_maximum_period as i64))?;
        write.put(|b| encode_int_resource(b, 5, self.disable_timeout as i64))?;
        write.put(|b| encode_bool_resource(b, 6, self.notification_storing_on_disabled))?;
        write.put(|b| encode_str_resource(b, 7, &self.binding))?;
        Ok(write.len)
    }

    /// Updates this instance from the TLV records in `buffer`.
    ///
    /// Resources missing from `buffer` keep their value; unknown resources are skipped.
    pub fn decode(&mut self, buffer: &[u8]) -> Result<(), Error> {
        for tlv in resource_records(buffer)? {
            let tlv = tlv?;
            match tlv.id {
                0 => self.short_server_id = int_as(&tlv)?,
                1 => self.lifetime = int_as(&tlv)?,
                2 => self.default_minimum_period = int_as(&tlv)?,
                3 => self.default_maximum_period = int_as(&tlv)?,
                5 => self.disable_timeout = int_as(&tlv)?,
                6 => self.notification_storing_on_disabled = tlv.as_bool()?,
                7 => self.binding = tlv.as_str()?.to_string(),
                id => trace!("skipping server resource {}", id),
            }
        }
        Ok(())
    }
}

/// Resource values of an LWM2M Security object instance.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct SecurityInstance {
    /// Resource 0.
    pub server_uri: String,

    /// Resource 1.
    pub bootstrap_server: bool,

    /// Resource 2.
    pub security_mode: u8,

    /// Resource 3.
    pub public_key: Vec<u8>,

    /// Resource 4.
    pub server_public_key: Vec<u8>,

    /// Resource 5.
    pub secret_key: Vec<u8>,

    /// Resource 6.
    pub sms_security_mode: u8,

    /// Resource 7.
    pub sms_binding_key_param: Vec<u8>,

    /// Resource 8.
    pub sms_binding_secret_keys: Vec<u8>,

    /// Resource 9.
    pub sms_number: String,

    /// Resource 10.
    pub short_server_id: u16,

    /// Resource 11, in seconds.
    pub client_hold_off_time: u32,
}

impl SecurityInstance {
    /// Encodes all resources as TLV records into `buffer`, returning the length.
    ///
    /// With `None` for `buffer`, nothing is written and only the length is returned.
    pub fn encode(&self, buffer: Option<&mut [u8]>) -> Result<usize, Error> {
        let mut write = TlvWrite::new(buffer);
        write.put(|b| encode_str_resource(b, 0, &self.server_uri))?;
        write.put(|b| encode_bool_resource(b, 1, self.bootstrap_server))?;
        write.put(|b| encode_int_resource(b, 2, self.security_mode as i64))?;
        write.put(|b| encode_opaque_resource(b, 3, &self.public_key))?;
        write.put(|b| encode_opaque_resource(b, 4, &self.server_public_key))?;
        write.put(|b| encode_opaque_resource(b, 5, &self.secret_key))?;
        write.put(|b| encode_int_resource(b, 6, self.sms_security_mode as i64))?;
        write.put(|b| encode_opaque_resource(b, 7, &self.sms_binding_key_param))?;
        write.put(|b| encode_opaque_resource(b, 8, &self.sms_binding_secret_keys))?;
        write.put(|b| encode_str_resource(b, 9, &self.sms_number))?;
        write.put(|b| encode_int_resource(b, 10, self.short_server_id as i64))?;
        write.put(|b| encode_int_resource(b, 11, self.client_hold_off_time as i64))?;
        Ok(write.len)
    }

    /// Updates this instance from the TLV records in `buffer`.
    ///
    /// Resources missing from `buffer` keep their value; unknown resources are skipped.
    pub fn decode(&mut self, buffer: &[u8]) -> Result<(), Error> {
        for tlv in resource_records(buffer)? {
            let tlv = tlv?;
            match tlv.id {
                0 => self.server_uri = tlv.as_str()?.to_string(),
                1 => self.bootstrap_server = tlv.as_bool()?,
                2 => self.security_mode = int_as(&tlv)?,
                3 => self.public_key = tlv.value.to_vec(),
                4 => self.server_public_key = tlv.value.to_vec(),
                5 => self.secret_key = tlv.value.to_vec(),
                6 => self.sms_security_mode = int_as(&tlv)?,
                7 => self.sms_binding_key_param = tlv.value.to_vec(),
                8 => self.sms_binding_secret_keys = tlv.value.to_vec(),
                9 => self.sms_number = tlv.as_str()?.to_string(),
                10 => self.short_server_id = int_as(&tlv)?,
                11 => self.client_hold_off_time = int_as(&tlv)?,
                id => trace!("skipping security resource {}", id),
            }
        }
        Ok(())
    }
}

/// Digital Output State resource id of IPSO objects.
pub const IPSO_DIGITAL_OUTPUT_STATE: u16 = 5550;

/// Digital Output Polarity resource id of IPSO objects.
pub const IPSO_DIGITAL_OUTPUT_POLARITY: u16 = 5551;

/// Application Type resource id of IPSO objects.
pub const IPSO_APPLICATION_TYPE: u16 = 5750;

/// Resource values of an IPSO Digital Output object instance (object 3201).
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct IpsoDigitalOutput {
    /// Resource 5550, the output is on.
    pub state: bool,

    /// Resource 5551, the output is inverted.
    pub polarity: bool,

    /// Resource 5750.
    pub application_type: String,
}

impl IpsoDigitalOutput {
    /// Encodes the resources as TLV records into `buffer`, returning the length.
    ///
    /// With `None` for `buffer`, nothing is written and only the length is returned.
    pub fn encode(&self, buffer: Option<&mut [u8]>) -> Result<usize, Error> {
        let mut write = TlvWrite::new(buffer);
        write.put(|b| encode_bool_resource(b, IPSO_DIGITAL_OUTPUT_STATE, self.state))?;
        write.put(|b| encode_bool_resource(b, IPSO_DIGITAL_OUTPUT_POLARITY, self.polarity))?;
        write.put(|b| encode_str_resource(b, IPSO_APPLICATION_TYPE, &self.application_type))?;
        Ok(write.len)
    }

    /// Updates this instance from the TLV records in `buffer`.
    pub fn decode(&mut self, buffer: &[u8]) -> Result<(), Error> {
        for tlv in resource_records(buffer)? {
            let tlv = tlv?;
            match tlv.id {
                IPSO_DIGITAL_OUTPUT_STATE => self.state = tlv.as_bool()?,
                IPSO_DIGITAL_OUTPUT_POLARITY => self.polarity = tlv.as_bool()?,
                IPSO_APPLICATION_TYPE => self.application_type = tlv.as_str()?.to_string(),
                id => trace!("skipping digital output resource {}", id),
            }
        }
        Ok(())
    }
}

/// Decodes an integer record into a narrower type, rejecting out-of-range values.
fn int_as<T: std::convert::TryFrom<i64>>(tlv: &Tlv<'_>) -> Result<T, Error> {
    T::try_from(tlv.as_int()?).map_err(|_| Error::InvalidData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn header_forms() {
        let mut buffer = [0u8; 16];

        let len = Tlv::resource(1, &[0x2A]).encode(Some(&mut buffer)).unwrap();
        assert_eq!(&buffer[..len], &[0xC1, 0x01, 0x2A]);

        let len = Tlv::resource(0x0100, &[0; 8]).encode(Some(&mut buffer)).unwrap();
        assert_eq!(&buffer[..4], &[0xE8, 0x01, 0x00, 0x08]);
        assert_eq!(len, 12);

        let len = Tlv::new(TlvIdType::ObjectInstance, 0, &[]).encode(Some(&mut buffer)).unwrap();
        assert_eq!(&buffer[..len], &[0x00, 0x00]);
    }

    #[test]
    fn length_boundaries() {
        let value = vec![0x5Au8; 0x1_0000];
        for &len in &[7usize, 8, 0xFF, 0x100, 0xFFFF, 0x1_0000] {
            let tlv = Tlv::resource(3, &value[..len]);
            let mut buffer = vec![0u8; tlv.encoded_len()];
            assert_eq!(tlv.encode(None), Ok(buffer.len()));
            assert_eq!(tlv.encode(Some(&mut buffer)), Ok(buffer.len()));
            assert_eq!(Tlv::decode(&buffer), Ok((tlv, buffer.len())));
        }
    }

    #[test]
    fn encode_too_small() {
        let mut buffer = [0u8; 3];
        assert_eq!(
            Tlv::resource(1, b"abcd").encode(Some(&mut buffer)),
            Err(Error::BufferTooSmall)
        );
    }

    #[test]
    fn decode_truncated() {
        assert_eq!(Tlv::decode(&[]), Err(Error::TruncatedInput));
        assert_eq!(Tlv::decode(&[0xC3, 0x01, 0x00]), Err(Error::TruncatedInput));
        assert_eq!(Tlv::decode(&[0xE8, 0x01]), Err(Error::TruncatedInput));
    }

    #[test]
    fn ints() {
        let mut bytes = [0u8; 8];
        assert_eq!(encode_int(0, &mut bytes), &[0x00]);
        assert_eq!(encode_int(-1, &mut bytes), &[0xFF]);
        assert_eq!(encode_int(128, &mut bytes), &[0x00, 0x80]);
        assert_eq!(encode_int(86400, &mut bytes), &[0x00, 0x01, 0x51, 0x80]);
        assert_eq!(encode_int(1 << 40, &mut bytes).len(), 8);

        assert_eq!(decode_int(&[0xFF, 0x7F]), Ok(-129));
        assert_eq!(decode_int(&[0x01, 0x02, 0x03]), Err(Error::InvalidLength));
    }

    #[test]
    fn int_stress() {
        let mut gen = SmallRng::from_seed(Default::default());
        let mut bytes = [0u8; 8];

        for _ in 0..1000 {
            let value: i64 = gen.gen::<i64>() >> gen.gen_range(0u32, 63);
            assert_eq!(decode_int(encode_int(value, &mut bytes)), Ok(value));
        }
    }

    #[test]
    fn bools() {
        assert_eq!(Tlv::resource(6, &[1]).as_bool(), Ok(true));
        assert_eq!(Tlv::resource(6, &[2]).as_bool(), Err(Error::InvalidData));
        assert_eq!(Tlv::resource(6, &[]).as_bool(), Err(Error::InvalidLength));
    }

    #[test]
    fn server_instance() {
        let server = ServerInstance {
            short_server_id: 101,
            lifetime: 86400,
            default_minimum_period: 1,
            default_maximum_period: 60,
            disable_timeout: 86400,
            notification_storing_on_disabled: true,
            binding: "UQ".to_string(),
        };

        let len = server.encode(None).unwrap();
        let mut buffer = vec![0u8; len];
        assert_eq!(server.encode(Some(&mut buffer)), Ok(len));
        assert_eq!(
            server.encode(Some(&mut buffer[..len - 1])),
            Err(Error::BufferTooSmall)
        );

        let mut decoded = ServerInstance::default();
        decoded.decode(&buffer).unwrap();
        assert_eq!(decoded, server);

        // The same resources wrapped in an object instance record.
        let wrapped = Tlv::new(TlvIdType::ObjectInstance, 0, &buffer);
        let mut outer = vec![0u8; wrapped.encoded_len()];
        wrapped.encode(Some(&mut outer)).unwrap();

        let mut decoded = ServerInstance::default();
        decoded.decode(&outer).unwrap();
        assert_eq!(decoded, server);
    }

    #[test]
    fn ipso_digital_output() {
        let output = IpsoDigitalOutput {
            state: true,
            polarity: false,
            application_type: "relay".to_string(),
        };

        let len = output.encode(None).unwrap();
        let mut buffer = vec![0u8; len];
        assert_eq!(output.encode(Some(&mut buffer)), Ok(len));

        // Resource ids above 0xFF take the two-byte id form.
        assert_eq!(&buffer[..4], &[0xE1, 0x15, 0xAE, 0x01]);
        assert_eq!(&buffer[4..8], &[0xE1, 0x15, 0xAF, 0x00]);
        assert_eq!(&buffer[8..11], &[0xE5, 0x16, 0x76]);
        assert_eq!(&buffer[11..], b"relay");

        let mut decoded = IpsoDigitalOutput::default();
        decoded.decode(&buffer).unwrap();
        assert_eq!(decoded, output);

        // A write of the state alone leaves the rest untouched.
        let mut toggle = [0u8; 4];
        encode_bool_resource(Some(&mut toggle), IPSO_DIGITAL_OUTPUT_STATE, false).unwrap();
        decoded.decode(&toggle).unwrap();
        assert!(!decoded.state);
        assert_eq!(decoded.application_type, "relay");
    }

    #[test]
    fn security_instance() {
        let security = SecurityInstance {
            server_uri: "coaps://[2001:db8::1]:5684".to_string(),
            bootstrap_server: false,
            security_mode: 0,
            public_key: b"identity".to_vec(),
            secret_key: vec![0x11; 16],
            short_server_id: 101,
            client_hold_off_time: 10,
            ..Default::default()
        };

        let mut buffer = vec![0u8; security.encode(None).unwrap()];
        security.encode(Some(&mut buffer)).unwrap();

        let mut decoded = SecurityInstance::default();
        decoded.decode(&buffer).unwrap();
        assert_eq!(decoded, security);
    }

    #[test]
    fn out_of_range_resource() {
        let mut buffer = [0u8; 8];
        let len = encode_int_resource(Some(&mut buffer), 0, 70000).unwrap();

        let mut server = ServerInstance::default();
        assert_eq!(server.decode(&buffer[..len]), Err(Error::InvalidData));
    }
}
