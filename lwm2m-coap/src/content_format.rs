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

//! Content-Format values and Accept/Content-Format negotiation.

use super::*;
use std::borrow::Cow;

/// A type for representing a CoAP Content Format value.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd)]
pub struct ContentFormat(pub u16);

impl ContentFormat {
    /// From IETF-RFC7252.
    pub const TEXT_PLAIN_UTF8: ContentFormat = ContentFormat(0);

    /// From IETF-RFC7252.
    pub const APPLICATION_LINK_FORMAT: ContentFormat = ContentFormat(40);

    /// From IETF-RFC7252.
    pub const APPLICATION_XML: ContentFormat = ContentFormat(41);

    /// From IETF-RFC7252.
    pub const APPLICATION_OCTET_STREAM: ContentFormat = ContentFormat(42);

    /// From IETF-RFC7252.
    pub const APPLICATION_EXI: ContentFormat = ContentFormat(47);

    /// From IETF-RFC7252.
    pub const APPLICATION_JSON: ContentFormat = ContentFormat(50);

    /// JSON-formatted RFC8428 Sensor Measurement Lists (SenML)
    pub const APPLICATION_SENML_JSON: ContentFormat = ContentFormat(110);

    /// CBOR-formatted RFC8428 Sensor Measurement Lists (SenML)
    pub const APPLICATION_SENML_CBOR: ContentFormat = ContentFormat(112);

    /// Pre-registration LWM2M TLV, still sent by older servers.
    pub const APPLICATION_VND_OMA_LWM2M_TLV_OLD: ContentFormat = ContentFormat(1542);

    /// Pre-registration LWM2M JSON.
    pub const APPLICATION_VND_OMA_LWM2M_JSON_OLD: ContentFormat = ContentFormat(1543);

    /// OMA LWM2M TLV.
    pub const APPLICATION_VND_OMA_LWM2M_TLV: ContentFormat = ContentFormat(11542);

    /// OMA LWM2M JSON.
    pub const APPLICATION_VND_OMA_LWM2M_JSON: ContentFormat = ContentFormat(11543);

    /// Returns the MIME name of this content format as a `&'static str`, if possible.
    pub fn static_name(self) -> Option<&'static str> {
        Some(match self {
            Self::TEXT_PLAIN_UTF8 => "text/plain;charset=utf-8",
            Self::APPLICATION_LINK_FORMAT => "application/link-format",
            Self::APPLICATION_XML => "application/xml",
            Self::APPLICATION_OCTET_STREAM => "application/octet-stream",
            Self::APPLICATION_EXI => "application/exi",
            Self::APPLICATION_JSON => "application/json",
            Self::APPLICATION_SENML_JSON => "application/senml+json",
            Self::APPLICATION_SENML_CBOR => "application/senml+cbor",
            Self::APPLICATION_VND_OMA_LWM2M_TLV | Self::APPLICATION_VND_OMA_LWM2M_TLV_OLD => {
                "application/vnd.oma.lwm2m+tlv"
            }
            Self::APPLICATION_VND_OMA_LWM2M_JSON | Self::APPLICATION_VND_OMA_LWM2M_JSON_OLD => {
                "application/vnd.oma.lwm2m+json"
            }
            _ => return None,
        })
    }

    /// Returns a MIME name for this content format.
    pub fn name(&self) -> Cow<'static, str> {
        match self.static_name() {
            Some(name) => Cow::from(name),
            None => Cow::from(self.to_string()),
        }
    }

    /// Returns true if this content format is known to contain UTF8.
    pub fn is_utf8(self) -> bool {
        match self {
            Self::TEXT_PLAIN_UTF8 | Self::APPLICATION_LINK_FORMAT => true,
            Self::APPLICATION_XML => true,
            Self::APPLICATION_JSON | Self::APPLICATION_SENML_JSON => true,
            Self::APPLICATION_VND_OMA_LWM2M_JSON | Self::APPLICATION_VND_OMA_LWM2M_JSON_OLD => {
                true
            }
            _ => false,
        }
    }

    /// Returns the negotiation mask bit for this format. Formats that take no part in
    /// negotiation map to the empty mask.
    pub fn mask(self) -> ContentFormatMask {
        match self {
            Self::TEXT_PLAIN_UTF8 => ContentFormatMask::TEXT_PLAIN,
            Self::APPLICATION_LINK_FORMAT => ContentFormatMask::LINK_FORMAT,
            Self::APPLICATION_XML => ContentFormatMask::XML,
            Self::APPLICATION_OCTET_STREAM => ContentFormatMask::OCTET_STREAM,
            Self::APPLICATION_EXI => ContentFormatMask::EXI,
            Self::APPLICATION_JSON => ContentFormatMask::JSON,
            _ => ContentFormatMask::EMPTY,
        }
    }
}

impl core::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(n) = self.static_name() {
            f.write_str(n)
        } else {
            write!(f, "application/x-coap-{}", self.0)
        }
    }
}

/// A set of negotiable content formats, one bit per format.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone, Default)]
pub struct ContentFormatMask(pub u8);

impl ContentFormatMask {
    /// No formats.
    pub const EMPTY: ContentFormatMask = ContentFormatMask(0);

    /// `text/plain;charset=utf-8`
    pub const TEXT_PLAIN: ContentFormatMask = ContentFormatMask(0x01);

    /// `application/link-format`
    pub const LINK_FORMAT: ContentFormatMask = ContentFormatMask(0x02);

    /// `application/xml`
    pub const XML: ContentFormatMask = ContentFormatMask(0x04);

    /// `application/octet-stream`
    pub const OCTET_STREAM: ContentFormatMask = ContentFormatMask(0x08);

    /// `application/exi`
    pub const EXI: ContentFormatMask = ContentFormatMask(0x10);

    /// `application/json`
    pub const JSON: ContentFormatMask = ContentFormatMask(0x20);

    const FORMATS: [(ContentFormatMask, ContentFormat); 6] = [
        (Self::TEXT_PLAIN, ContentFormat::TEXT_PLAIN_UTF8),
        (Self::LINK_FORMAT, ContentFormat::APPLICATION_LINK_FORMAT),
        (Self::XML, ContentFormat::APPLICATION_XML),
        (Self::OCTET_STREAM, ContentFormat::APPLICATION_OCTET_STREAM),
        (Self::EXI, ContentFormat::APPLICATION_EXI),
        (Self::JSON, ContentFormat::APPLICATION_JSON),
    ];

    /// Returns true if no bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is also set in `self`.
    pub fn contains(self, other: ContentFormatMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the content format of the lowest set bit, if any.
    pub fn lowest(self) -> Option<ContentFormat> {
        Self::FORMATS
            .iter()
            .find(|(bit, _)| self.0 & bit.0 != 0)
            .map(|&(_, format)| format)
    }

    /// Collects the mask bits of every option with number `key` in `msg`.
    ///
    /// Values that fail to decode as an integer, or that name an unknown format,
    /// contribute nothing.
    pub fn from_options(msg: &Message<'_>, key: OptionNumber) -> ContentFormatMask {
        msg.option_values(key)
            .filter_map(try_decode_u16)
            .map(|x| ContentFormat(x).mask())
            .fold(ContentFormatMask::EMPTY, |acc, x| acc | x)
    }
}

impl core::ops::BitOr for ContentFormatMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        ContentFormatMask(self.0 | rhs.0)
    }
}

impl core::ops::BitAnd for ContentFormatMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        ContentFormatMask(self.0 & rhs.0)
    }
}

impl From<ContentFormat> for ContentFormatMask {
    fn from(format: ContentFormat) -> Self {
        format.mask()
    }
}

/// Returns the mask of the Content-Format options of `msg`.
pub fn ct_mask(msg: &Message<'_>) -> ContentFormatMask {
    ContentFormatMask::from_options(msg, OptionNumber::CONTENT_FORMAT)
}

/// Returns the mask of the Accept options of `msg`, or plain text when there are none.
pub fn accept_mask(msg: &Message<'_>) -> ContentFormatMask {
    if msg.option_values(OptionNumber::ACCEPT).next().is_none() {
        return ContentFormatMask::TEXT_PLAIN;
    }
    ContentFormatMask::from_options(msg, OptionNumber::ACCEPT)
}

/// Selects the response format for `request` out of the `supported` formats.
///
/// The lowest format both supported and acceptable wins. Fails with
/// [`Error::NotFound`] when there is none.
pub fn ct_match_select(
    supported: ContentFormatMask,
    request: &Message<'_>,
) -> Result<ContentFormat, Error> {
    (supported & accept_mask(request))
        .lowest()
        .ok_or(Error::NotFound)
}
