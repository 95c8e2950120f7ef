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
use crate::layout::Layout;
use crate::record::Record;

/// A layout that renders the message text only.
///
/// This is the default layout of the [`HipChat`](crate::append::HipChat) appender.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::layout::Layout;
/// use logforth_hipchat::layout::MessagePassThroughLayout;
/// use logforth_hipchat::record::Record;
///
/// let record = Record::builder().payload("Log event #1").build();
/// let bytes = MessagePassThroughLayout::default().format(&record).unwrap();
/// assert_eq!(bytes, b"Log event #1");
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct MessagePassThroughLayout {}

impl Layout for MessagePassThroughLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        Ok(record.payload().as_bytes().to_vec())
    }
}
