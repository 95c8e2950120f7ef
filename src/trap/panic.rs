// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::Error;
use crate::trap::Trap;

/// A trap that panics with the trapped error.
///
/// Use it when an undelivered notification must bring the program down. The panic happens on
/// whichever thread completes the delivery.
///
/// # Examples
///
/// ```should_panic
/// use logforth_hipchat::Error;
/// use logforth_hipchat::trap::PanicTrap;
/// use logforth_hipchat::trap::Trap;
///
/// PanicTrap::default().trap(&Error::new("room not found"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct PanicTrap {}

impl Trap for PanicTrap {
    fn trap(&self, err: &Error) {
        panic!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "room not found")]
    fn panics_with_error_message() {
        PanicTrap::default().trap(&Error::new("room not found"));
    }
}
