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

use std::fmt;

use crate::Error;
use crate::layout::Layout;
use crate::record::Record;

type FormatFunction = dyn Fn(&Record) -> Result<String, Error> + Send + Sync + 'static;

/// A layout that you can pass the custom layout function.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::layout::CustomLayout;
/// use logforth_hipchat::record::Record;
///
/// let layout = CustomLayout::new(|record: &Record| {
///     Ok(format!("({}) {}", record.level(), record.payload()))
/// });
/// ```
pub struct CustomLayout {
    f: Box<FormatFunction>,
}

impl fmt::Debug for CustomLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CustomLayout {{ ... }}")
    }
}

impl CustomLayout {
    /// Creates a new `CustomLayout` with the given format function.
    pub fn new(
        layout: impl Fn(&Record) -> Result<String, Error> + Send + Sync + 'static,
    ) -> Self {
        CustomLayout {
            f: Box::new(layout),
        }
    }
}

impl Layout for CustomLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        (self.f)(record).map(String::into_bytes)
    }
}
