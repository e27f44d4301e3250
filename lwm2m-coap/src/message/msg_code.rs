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

/// Enum representing the *class* of a CoAP message code.
#[derive(Debug, Copy, Eq, PartialEq, Clone)]
pub enum MsgCodeClass {
    /// Class for methods
    Method = 0,

    /// Class for successful responses
    Success = 2,

    /// Class for client error responses
    ClientError = 4,

    /// Class for server error responses
    ServerError = 5,
}

impl MsgCodeClass {
    /// Tries to calculate the message code class from the given message code.
    pub fn try_from(x: u8) -> Option<MsgCodeClass> {
        match x {
            0 => Some(MsgCodeClass::Method),
            2 => Some(MsgCodeClass::Success),
            4 => Some(MsgCodeClass::ClientError),
            5 => Some(MsgCodeClass::ServerError),
            _ => None,
        }
    }

    /// Returns true if the given message code is in this message code class.
    pub fn contains(self, code: MsgCode) -> bool {
        code.0 != 0 && (code.0 >> 5) == self as u8
    }
}

/// Helper function
const fn calc_code(class: u8, detail: u8) -> u8 {
    ((class & 0x7) << 5) + detail
}

/// Type representing a CoAP message code.
///
/// Any 8-bit value is a valid `MsgCode`: codes that are not registered decode and
/// round-trip unchanged. The registered ones are available as associated constants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct MsgCode(pub u8);

#[allow(non_upper_case_globals)]
impl MsgCode {
    /// Empty message code. Only used for ping requests, resets, and empty acknowledgements.
    pub const Empty: MsgCode = MsgCode(0x00);

    /// CoAP GET method.
    pub const MethodGet: MsgCode = MsgCode(0x01);

    /// CoAP POST method.
    pub const MethodPost: MsgCode = MsgCode(0x02);

    /// CoAP PUT method.
    pub const MethodPut: MsgCode = MsgCode(0x03);

    /// CoAP DELETE method.
    pub const MethodDelete: MsgCode = MsgCode(0x04);

    /// CoAP FETCH method.
    pub const MethodFetch: MsgCode = MsgCode(0x05);

    /// CoAP PATCH method.
    pub const MethodPatch: MsgCode = MsgCode(0x06);

    /// CoAP iPATCH method.
    pub const MethodIPatch: MsgCode = MsgCode(0x07);

    /// CoAP CREATED success code.
    pub const SuccessCreated: MsgCode = MsgCode(0x41);

    /// CoAP DELETED success code.
    pub const SuccessDeleted: MsgCode = MsgCode(0x42);

    /// CoAP VALID success code.
    pub const SuccessValid: MsgCode = MsgCode(0x43);

    /// CoAP CHANGED success code.
    pub const SuccessChanged: MsgCode = MsgCode(0x44);

    /// CoAP CONTENT success code.
    pub const SuccessContent: MsgCode = MsgCode(0x45);

    /// CoAP CONTINUE success code.
    pub const SuccessContinue: MsgCode = MsgCode(0x5F);

    /// CoAP BAD_REQUEST client error.
    pub const ClientErrorBadRequest: MsgCode = MsgCode(0x80);

    /// CoAP UNAUTHORIZED client error.
    pub const ClientErrorUnauthorized: MsgCode = MsgCode(0x81);

    /// CoAP BAD_OPTION client error.
    pub const ClientErrorBadOption: MsgCode = MsgCode(0x82);

    /// CoAP FORBIDDEN client error.
    pub const ClientErrorForbidden: MsgCode = MsgCode(0x83);

    /// CoAP NOT_FOUND client error.
    pub const ClientErrorNotFound: MsgCode = MsgCode(0x84);

    /// CoAP METHOD_NOT_ALLOWED client error.
    pub const ClientErrorMethodNotAllowed: MsgCode = MsgCode(0x85);

    /// CoAP NOT_ACCEPTABLE client error.
    pub const ClientErrorNotAcceptable: MsgCode = MsgCode(0x86);

    /// CoAP REQUEST_ENTITY_INCOMPLETE client error.
    pub const ClientErrorRequestEntityIncomplete: MsgCode = MsgCode(0x88);

    /// CoAP PRECONDITION_FAILED client error.
    pub const ClientErrorPreconditionFailed: MsgCode = MsgCode(0x8C);

    /// CoAP REQUEST_ENTITY_TOO_LARGE client error.
    pub const ClientErrorRequestEntityTooLarge: MsgCode = MsgCode(0x8D);

    /// CoAP UNSUPPORTED_MEDIA_TYPE client error.
    pub const ClientErrorUnsupportedMediaType: MsgCode = MsgCode(0x8F);

    /// RFC8516 "Too Many Requests" Response Code for the Constrained Application Protocol
    pub const ClientErrorTooManyRequests: MsgCode = MsgCode(calc_code(4, 29));

    /// CoAP INTERNAL_SERVER_ERROR server error.
    pub const ServerErrorInternalServerError: MsgCode = MsgCode(0xA0);

    /// CoAP NOT_IMPLEMENTED server error.
    pub const ServerErrorNotImplemented: MsgCode = MsgCode(0xA1);

    /// CoAP BAD_GATEWAY server error.
    pub const ServerErrorBadGateway: MsgCode = MsgCode(0xA2);

    /// CoAP SERVICE_UNAVAILABLE server error.
    pub const ServerErrorServiceUnavailable: MsgCode = MsgCode(0xA3);

    /// CoAP GATEWAY_TIMEOUT server error.
    pub const ServerErrorGatewayTimeout: MsgCode = MsgCode(0xA4);

    /// CoAP PROXYING_NOT_SUPPORTED server error.
    pub const ServerErrorProxyingNotSupported: MsgCode = MsgCode(0xA5);

    /// Tries to convert the given `u8` into a registered `MsgCode`. If the given code
    /// isn't recognized, this method will return `None`.
    pub fn try_from(x: u8) -> Option<MsgCode> {
        MsgCode(x).name().map(|_| MsgCode(x))
    }

    /// Returns the name of this code, or `None` if it is not registered.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            MsgCode::Empty => "Empty",
            MsgCode::MethodGet => "MethodGet",
            MsgCode::MethodPost => "MethodPost",
            MsgCode::MethodPut => "MethodPut",
            MsgCode::MethodDelete => "MethodDelete",
            MsgCode::MethodFetch => "MethodFetch",
            MsgCode::MethodPatch => "MethodPatch",
            MsgCode::MethodIPatch => "MethodIPatch",
            MsgCode::SuccessCreated => "SuccessCreated",
            MsgCode::SuccessDeleted => "SuccessDeleted",
            MsgCode::SuccessValid => "SuccessValid",
            MsgCode::SuccessChanged => "SuccessChanged",
            MsgCode::SuccessContent => "SuccessContent",
            MsgCode::SuccessContinue => "SuccessContinue",
            MsgCode::ClientErrorBadRequest => "ClientErrorBadRequest",
            MsgCode::ClientErrorUnauthorized => "ClientErrorUnauthorized",
            MsgCode::ClientErrorBadOption => "ClientErrorBadOption",
            MsgCode::ClientErrorForbidden => "ClientErrorForbidden",
            MsgCode::ClientErrorNotFound => "ClientErrorNotFound",
            MsgCode::ClientErrorMethodNotAllowed => "ClientErrorMethodNotAllowed",
            MsgCode::ClientErrorNotAcceptable => "ClientErrorNotAcceptable",
            MsgCode::ClientErrorRequestEntityIncomplete => "ClientErrorRequestEntityIncomplete",
            MsgCode::ClientErrorPreconditionFailed => "ClientErrorPreconditionFailed",
            MsgCode::ClientErrorRequestEntityTooLarge => "ClientErrorRequestEntityTooLarge",
            MsgCode::ClientErrorUnsupportedMediaType => "ClientErrorUnsupportedMediaType",
            MsgCode::ClientErrorTooManyRequests => "ClientErrorTooManyRequests",
            MsgCode::ServerErrorInternalServerError => "ServerErrorInternalServerError",
            MsgCode::ServerErrorNotImplemented => "ServerErrorNotImplemented",
            MsgCode::ServerErrorBadGateway => "ServerErrorBadGateway",
            MsgCode::ServerErrorServiceUnavailable => "ServerErrorServiceUnavailable",
            MsgCode::ServerErrorGatewayTimeout => "ServerErrorGatewayTimeout",
            MsgCode::ServerErrorProxyingNotSupported => "ServerErrorProxyingNotSupported",
            _ => return None,
        };
        Some(name)
    }

    /// Returns an approximation of this message code as an HTTP status code.
    pub fn to_http_code(self) -> u16 {
        let (class, detail) = self.class_detail();
        class as u16 * 100 + detail as u16
    }

    /// Returns true if this is the empty code.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if message code is a method.
    pub fn is_method(self) -> bool {
        MsgCodeClass::Method.contains(self)
    }

    /// Returns true if message code is a client error.
    pub fn is_client_error(self) -> bool {
        MsgCodeClass::ClientError.contains(self)
    }

    /// Returns true if message code is a server error.
    pub fn is_server_error(self) -> bool {
        MsgCodeClass::ServerError.contains(self)
    }

    /// Returns true if message code is any sort of error.
    pub fn is_error(self) -> bool {
        self.is_client_error() || self.is_server_error()
    }

    /// Returns true if message code indicates success.
    pub fn is_success(self) -> bool {
        MsgCodeClass::Success.contains(self)
    }

    /// Returns the class and detail of this code, e.g. `(2, 5)` for 2.05 Content.
    pub fn class_detail(self) -> (u8, u8) {
        (self.0 >> 5, self.0 & 0b11111)
    }
}

impl core::convert::From<u8> for MsgCode {
    fn from(code: u8) -> Self {
        MsgCode(code)
    }
}

impl core::convert::From<MsgCode> for u8 {
    fn from(code: MsgCode) -> Self {
        code.0
    }
}

impl core::convert::From<MsgCode> for u16 {
    fn from(code: MsgCode) -> Self {
        code.0 as u16
    }
}

impl core::convert::From<MsgCode> for u32 {
    fn from(code: MsgCode) -> Self {
        code.0 as u32
    }
}

impl core::fmt::Display for MsgCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (class, detail) = self.class_detail();
        write!(f, "{}.{:02}", class, detail)
    }
}

impl core::fmt::Debug for MsgCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "MsgCode({})", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_packing() {
        assert_eq!(MsgCode::SuccessContent.0, (2 << 5) | 5);
        assert_eq!(MsgCode::SuccessContent.class_detail(), (2, 5));
        assert_eq!(MsgCode::ClientErrorNotFound.to_string(), "4.04");
        assert_eq!(MsgCode::ClientErrorNotFound.to_http_code(), 404);
        assert_eq!(Some(MsgCode::MethodFetch), MsgCode::try_from(0x05));
        assert_eq!(None, MsgCode::try_from(0x46));
        assert!(MsgCode::MethodPost.is_method());
        assert!(MsgCode::SuccessCreated.is_success());
        assert!(!MsgCode::Empty.is_method());
    }

    #[test]
    fn unassigned_codes() {
        let code = MsgCode::from(0x08);
        assert_eq!(code.name(), None);
        assert_eq!(code.class_detail(), (0, 8));
        assert!(code.is_method());
        assert_eq!(format!("{:?}", code), "MsgCode(0.08)");
        assert_eq!(format!("{:?}", MsgCode::SuccessContent), "SuccessContent");
        assert!(MsgCode::from(0x9F).is_client_error());
        assert_eq!(u8::from(MsgCode::from(0xE1)), 0xE1);
    }
}
