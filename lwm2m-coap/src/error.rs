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

use super::message::MsgCode;
use std::fmt::{Debug, Display, Formatter};

/// Type for errors encountered while encoding, decoding or dispatching CoAP and LWM2M messages.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Error {
    /// A required input was missing or empty.
    NullInput,

    /// The input was too short for a header, or an integer field had an unsupported width.
    InvalidLength,

    /// A field contained a malformed value, such as a reserved nibble or a bad IPv6 literal.
    InvalidData,

    /// The header was well-formed, but the bytes following the options did not start
    /// with a payload marker.
    InvalidContent,

    /// An option header declared more bytes than remained in the buffer.
    TruncatedInput,

    /// There is not enough space in the given buffer to complete the operation.
    BufferTooSmall,

    /// A bounded table (registry, location table, scratch storage) is full.
    OutOfMemory,

    /// The requested object, instance, resource, option or location was not found.
    NotFound,

    /// The bounded option array of a message is full.
    OutOfOptionSlots,

    /// The request method is not allowed on the addressed entity.
    MethodNotAllowed,

    /// An I/O error occurred while handing a datagram to the transport.
    IOError,

    /// An unspecified error has occurred.
    Unspecified,
}

impl Error {
    /// Returns the CoAP response code an application would typically send back
    /// when a request fails with this error.
    pub fn to_response_code(self) -> MsgCode {
        match self {
            Error::NotFound => MsgCode::ClientErrorNotFound,
            Error::MethodNotAllowed => MsgCode::ClientErrorMethodNotAllowed,
            Error::NullInput
            | Error::InvalidLength
            | Error::InvalidData
            | Error::InvalidContent
            | Error::TruncatedInput
            | Error::OutOfOptionSlots => MsgCode::ClientErrorBadRequest,
            Error::BufferTooSmall => MsgCode::ClientErrorRequestEntityTooLarge,
            Error::OutOfMemory | Error::IOError | Error::Unspecified => {
                MsgCode::ServerErrorInternalServerError
            }
        }
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Error::IOError
    }
}

impl std::convert::From<Error> for core::fmt::Error {
    fn from(_: Error) -> Self {
        core::fmt::Error
    }
}

impl From<std::fmt::Error> for crate::Error {
    fn from(_err: std::fmt::Error) -> Self {
        Error::BufferTooSmall
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        <Self as Debug>::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl Default for Error {
    fn default() -> Self {
        Error::Unspecified
    }
}
