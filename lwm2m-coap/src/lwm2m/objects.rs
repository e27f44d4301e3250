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

/// Per-resource operation table of an object instance.
///
/// The dispatcher consults this to decide whether a POST to a resource is an execute or
/// a write.
pub trait ResourceOperations: Send + Sync {
    /// Returns the operations allowed on `resource_id`, or `None` if the instance has no
    /// such resource.
    fn resource_operation(&self, resource_id: u16) -> Option<Operation>;

    /// Returns the number of resources in the table.
    fn num_resources(&self) -> usize;
}

/// An explicit table of `(resource_id, operations)` pairs, for application objects.
impl ResourceOperations for [(u16, Operation)] {
    fn resource_operation(&self, resource_id: u16) -> Option<Operation> {
        self.iter()
            .find(|(id, _)| *id == resource_id)
            .map(|&(_, op)| op)
    }

    fn num_resources(&self) -> usize {
        self.len()
    }
}

impl ResourceOperations for Vec<(u16, Operation)> {
    fn resource_operation(&self, resource_id: u16) -> Option<Operation> {
        self.as_slice().resource_operation(resource_id)
    }

    fn num_resources(&self) -> usize {
        self.len()
    }
}

const R: Operation = Operation::READ;
const W: Operation = Operation::WRITE;
const E: Operation = Operation::EXECUTE;
const RW: Operation = Operation::READ_WRITE;
const N: Operation = Operation::NONE;

macro_rules! standard_object {
    ($(#[$meta:meta])* $name:ident = $id:expr, [$($op:expr),* $(,)*]) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
        pub struct $name;

        impl $name {
            /// The registered object id.
            pub const OBJECT_ID: u16 = $id;

            const OPERATIONS: &'static [Operation] = &[$($op),*];
        }

        impl ResourceOperations for $name {
            fn resource_operation(&self, resource_id: u16) -> Option<Operation> {
                Self::OPERATIONS.get(resource_id as usize).copied()
            }

            fn num_resources(&self) -> usize {
                Self::OPERATIONS.len()
            }
        }
    };
}

standard_object!(
    /// LWM2M Security object. Only reachable through bootstrap, so no resource allows any
    /// operation.
    SecurityObject = OBJ_SECURITY,
    [N, N, N, N, N, N, N, N, N, N, N, N]
);

standard_object!(
    /// LWM2M Server object.
    ServerObject = OBJ_SERVER,
    [R, RW, RW, RW, E, RW, RW, RW, E]
);

standard_object!(
    /// LWM2M Access Control object.
    AclObject = OBJ_ACL,
    [R, R, RW, RW]
);

standard_object!(
    /// LWM2M Device object.
    DeviceObject = OBJ_DEVICE,
    [R, R, R, R, E, E, R, R, R, R, R, R, E, RW, RW, RW, R]
);

standard_object!(
    /// LWM2M Connectivity Monitoring object.
    ConnMonObject = OBJ_CONN_MON,
    [R, R, R, R, R, R, R, R, R, R, R]
);

standard_object!(
    /// LWM2M Firmware Update object.
    FirmwareObject = OBJ_FIRMWARE,
    [W, W, E, R, RW, R]
);

standard_object!(
    /// LWM2M Location object.
    LocationObject = OBJ_LOCATION,
    [R, R, R, R, R, R]
);

standard_object!(
    /// LWM2M Connectivity Statistics object.
    ConnStatObject = OBJ_CONN_STAT,
    [R, R, R, R, R, R, E]
);

standard_object!(
    /// LWM2M Software Update object.
    SoftwareUpdateObject = OBJ_SOFTWARE_UPDATE,
    [R, R, W, W, E, R, E, R, RW]
);
