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

use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::Layout;
use crate::layout::format_time;
use crate::record::Record;

/// A layout that prefixes the message with its time, level and target.
///
/// Output format:
///
/// ```text
/// [2016-06-10T11:50:53.819] [DEBUG] myLogger - Log event #3
/// [2016-06-10T11:50:53.821] [WARN] myLogger - Disk usage above 90%
/// ```
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use logforth_hipchat::layout::BasicLayout;
///
/// let layout = BasicLayout::default().timezone(TimeZone::UTC);
/// ```
#[derive(Debug, Clone)]
pub struct BasicLayout {
    timezone: TimeZone,
}

impl Default for BasicLayout {
    fn default() -> Self {
        Self {
            timezone: TimeZone::system(),
        }
    }
}

impl BasicLayout {
    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }
}

impl Layout for BasicLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let time = format_time(record.time(), &self.timezone)?;
        let level = record.level();
        let target = record.target();
        let message = record.payload();
        Ok(format!("[{time}] [{level}] {target} - {message}").into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::SystemTime;

    use super::*;
    use crate::record::Level;

    #[test]
    fn includes_timestamp_level_and_target() {
        let record = Record::builder()
            .time(SystemTime::UNIX_EPOCH + Duration::from_millis(1_465_559_453_819))
            .level(Level::Debug)
            .target("myLogger")
            .payload("Log event #3")
            .build();

        let layout = BasicLayout::default().timezone(TimeZone::UTC);
        let text = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        assert_eq!(text, "[2016-06-10T11:50:53.819] [DEBUG] myLogger - Log event #3");
    }
}
