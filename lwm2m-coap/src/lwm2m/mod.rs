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

//! LWM2M resource-tree routing and client helpers on top of the CoAP codec.
//!
//! Objects and object instances are registered with an [`Lwm2mService`], which routes
//! decoded requests to them by Uri-Path. [`Lwm2mClient`] builds the registration,
//! update, deregistration and bootstrap requests and tracks the location each server
//! assigns.

use super::*;

mod operation;
pub use operation::*;

mod objects;
pub use objects::*;

mod registry;
pub use registry::*;

mod dispatch;

mod link_format;

mod client;
pub use client::*;

mod bootstrap;

pub mod tlv;

mod uri;
pub use uri::*;

/// Object id marking a named (non-numeric) object. Equal to [`INVALID_INSTANCE`].
pub const NAMED_OBJECT: u16 = 65535;

/// Instance id meaning "no instance addressed".
pub const INVALID_INSTANCE: u16 = 65535;

/// Resource id meaning "no resource addressed".
pub const INVALID_RESOURCE: u16 = 65535;

/// Security object id.
pub const OBJ_SECURITY: u16 = 0;

/// Server object id.
pub const OBJ_SERVER: u16 = 1;

/// Access Control object id.
pub const OBJ_ACL: u16 = 2;

/// Device object id.
pub const OBJ_DEVICE: u16 = 3;

/// Connectivity Monitoring object id.
pub const OBJ_CONN_MON: u16 = 4;

/// Firmware Update object id.
pub const OBJ_FIRMWARE: u16 = 5;

/// Location object id.
pub const OBJ_LOCATION: u16 = 6;

/// Connectivity Statistics object id.
pub const OBJ_CONN_STAT: u16 = 7;

/// Software Update object id.
pub const OBJ_SOFTWARE_UPDATE: u16 = 9;

/// IPSO Digital Output object id.
pub const OBJ_IPSO_DIGITAL_OUTPUT: u16 = 3201;
