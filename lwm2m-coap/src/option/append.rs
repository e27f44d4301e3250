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

/// Trait for types that allow you to append CoAP options to them.
///
/// Options must be appended in non-decreasing option-number order; implementations
/// reject an option whose number is lower than the last one appended.
pub trait OptionAppend<'a> {
    /// Appends an option with the given value to the message.
    fn append_option(&mut self, key: OptionNumber, value: OptionValue<'a>) -> Result<(), Error>;

    /// Appends an option with no value.
    fn append_option_empty(&mut self, key: OptionNumber) -> Result<(), Error> {
        self.append_option(key, OptionValue::Bytes(&[]))
    }

    /// Appends an option with an unsigned integer value, using the minimal encoding.
    /// A value of zero is appended as a zero-length option.
    fn append_option_with_u32(&mut self, key: OptionNumber, value: u32) -> Result<(), Error> {
        self.append_option(key, OptionValue::from(value))
    }

    /// Appends an option with a string value. The string is borrowed, not copied.
    fn append_option_with_str(&mut self, key: OptionNumber, value: &'a str) -> Result<(), Error> {
        self.append_option(key, OptionValue::from(value))
    }

    /// Appends an option with an opaque value. The bytes are borrowed, not copied.
    fn append_option_with_bytes(
        &mut self,
        key: OptionNumber,
        value: &'a [u8],
    ) -> Result<(), Error> {
        self.append_option(key, OptionValue::from(value))
    }
}
