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

/// Trait defining the capacity limits of an LWM2M endpoint.
///
/// Every limit is an associated constant with a matching accessor, so an implementation
/// can either override the constant or compute the value at runtime.
pub trait Lwm2mParams: Default + Copy + Sync + Send + core::fmt::Debug {
    /// See [`Self::MAX_OBJECTS`].
    fn max_objects(&self) -> usize {
        Self::MAX_OBJECTS
    }

    /// See [`Self::MAX_INSTANCES`].
    fn max_instances(&self) -> usize {
        Self::MAX_INSTANCES
    }

    /// See [`Self::MAX_SERVERS`].
    fn max_servers(&self) -> usize {
        Self::MAX_SERVERS
    }

    /// See [`Self::MAX_LOCATION_LEN`].
    fn max_location_len(&self) -> usize {
        Self::MAX_LOCATION_LEN
    }

    /// See [`Self::MESSAGE_DATA_MAX_SIZE`].
    fn message_data_max_size(&self) -> usize {
        Self::MESSAGE_DATA_MAX_SIZE
    }

    /// Maximum number of objects in the registry.
    const MAX_OBJECTS: usize = 16;

    /// Maximum number of object instances in the registry.
    const MAX_INSTANCES: usize = 16;

    /// Maximum number of remote servers with a stored registration location.
    const MAX_SERVERS: usize = 4;

    /// Maximum total length of a stored location path, in bytes.
    const MAX_LOCATION_LEN: usize = 64;

    /// Size of the scratch buffer used to build outgoing registration payloads.
    const MESSAGE_DATA_MAX_SIZE: usize = 256;
}

/// Default limits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct StandardLwm2mParams;

impl Lwm2mParams for StandardLwm2mParams {}
