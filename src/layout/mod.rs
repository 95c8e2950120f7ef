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

//! Layouts for formatting log records.

use std::fmt;
use std::time::SystemTime;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::record::Record;

mod basic;
#[cfg(feature = "colored")]
mod colored;
mod config;
mod custom;
mod pass_through;
mod pattern;

pub use self::basic::BasicLayout;
#[cfg(feature = "colored")]
pub use self::colored::ColoredLayout;
pub use self::config::LayoutConfig;
pub use self::custom::CustomLayout;
pub use self::pass_through::MessagePassThroughLayout;
pub use self::pattern::PatternLayout;

/// A layout for formatting log records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log record.
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Render the record time as `2016-06-10T11:50:53.819` in the given timezone.
pub(crate) fn format_time(time: SystemTime, timezone: &TimeZone) -> Result<String, Error> {
    let ts = Timestamp::try_from(time)
        .map_err(|err| Error::new("failed to convert record time").with_source(err))?;
    let zoned = ts.to_zoned(timezone.clone());
    Ok(zoned.strftime("%Y-%m-%dT%H:%M:%S%.3f").to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn format_time_in_utc() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_millis(1_465_559_453_819);
        let text = format_time(time, &TimeZone::UTC).unwrap();
        assert_eq!(text, "2016-06-10T11:50:53.819");
    }
}
