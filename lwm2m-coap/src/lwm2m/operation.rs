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

/// A set of LWM2M operations, as carried in resource operation tables and passed to
/// object and instance callbacks.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Operation(pub u8);

impl Operation {
    /// No operation.
    pub const NONE: Operation = Operation(0);

    /// Read.
    pub const READ: Operation = Operation(0x01);

    /// Write.
    pub const WRITE: Operation = Operation(0x02);

    /// Execute.
    pub const EXECUTE: Operation = Operation(0x04);

    /// Delete.
    pub const DELETE: Operation = Operation(0x08);

    /// Create.
    pub const CREATE: Operation = Operation(0x10);

    /// Discover.
    pub const DISCOVER: Operation = Operation(0x20);

    /// Observe.
    pub const OBSERVE: Operation = Operation(0x40);

    /// Read and write.
    pub const READ_WRITE: Operation = Operation(0x03);

    /// Returns true if any bit of `other` is also set in `self`.
    pub fn intersects(self, other: Operation) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if no bit is set.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns a human-readable name for single-bit operations.
    pub fn description(self) -> &'static str {
        match self {
            Operation::NONE => "NONE",
            Operation::READ => "READ",
            Operation::WRITE => "WRITE",
            Operation::EXECUTE => "EXECUTE",
            Operation::DELETE => "DELETE",
            Operation::CREATE => "CREATE",
            Operation::DISCOVER => "DISCOVER",
            Operation::OBSERVE => "OBSERVE",
            _ => "UNKNOWN",
        }
    }
}

impl core::ops::BitOr for Operation {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Operation(self.0 | rhs.0)
    }
}

impl core::fmt::Debug for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Operation({})", self.description())
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions() {
        assert_eq!(Operation::NONE.description(), "NONE");
        assert_eq!(Operation::EXECUTE.description(), "EXECUTE");
        assert_eq!(Operation::OBSERVE.to_string(), "OBSERVE");
        assert_eq!(Operation::READ_WRITE.description(), "UNKNOWN");
    }

    #[test]
    fn bits() {
        assert_eq!(Operation::READ | Operation::WRITE, Operation::READ_WRITE);
        assert!(Operation::READ_WRITE.intersects(Operation::WRITE));
        assert!(!Operation::READ_WRITE.intersects(Operation::EXECUTE));
    }
}
