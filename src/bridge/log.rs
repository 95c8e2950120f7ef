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

use std::borrow::Cow;

use crate::Filter;
use crate::Logger;
use crate::filter::FilterResult;
use crate::record::Level;
use crate::record::LevelFilter;
use crate::record::Metadata;
use crate::record::MetadataBuilder;
use crate::record::RecordBuilder;

impl From<log::LevelFilter> for LevelFilter {
    fn from(level: log::LevelFilter) -> Self {
        match level {
            log::LevelFilter::Off => Self::Off,
            log::LevelFilter::Error => Self::MoreSevereEqual(Level::Error),
            log::LevelFilter::Warn => Self::MoreSevereEqual(Level::Warn),
            log::LevelFilter::Info => Self::MoreSevereEqual(Level::Info),
            log::LevelFilter::Debug => Self::MoreSevereEqual(Level::Debug),
            log::LevelFilter::Trace => Self::MoreSevereEqual(Level::Trace),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl Filter for log::LevelFilter {
    fn enabled(&self, metadata: &Metadata) -> FilterResult {
        if LevelFilter::from(*self).test(metadata.level()) {
            FilterResult::Neutral
        } else {
            FilterResult::Reject
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let metadata = MetadataBuilder::default()
            .target(metadata.target())
            .level(metadata.level().into())
            .build();

        Logger::enabled(self, &metadata)
    }

    fn log(&self, record: &log::Record) {
        // static messages are borrowed, formatted ones are rendered once here
        let payload = match record.args().as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(record.args().to_string()),
        };

        let record = RecordBuilder::default()
            .payload(payload)
            .level(record.level().into())
            .target(record.target())
            .module_path(record.module_path())
            .file(record.file())
            .line(record.line())
            .build();

        Logger::log(self, &record);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels_convert() {
        assert_eq!(Level::from(log::Level::Error), Level::Error);
        assert_eq!(Level::from(log::Level::Trace), Level::Trace);
        assert_eq!(LevelFilter::from(log::LevelFilter::Off), LevelFilter::Off);
        assert_eq!(
            LevelFilter::from(log::LevelFilter::Warn),
            LevelFilter::MoreSevereEqual(Level::Warn)
        );
    }

    #[test]
    fn log_level_filter_keeps_fatal_and_mark() {
        let filter = log::LevelFilter::Error;
        for (level, expected) in [
            (Level::Mark, FilterResult::Neutral),
            (Level::Fatal, FilterResult::Neutral),
            (Level::Error, FilterResult::Neutral),
            (Level::Warn, FilterResult::Reject),
        ] {
            let metadata = Metadata::builder().level(level).build();
            assert_eq!(Filter::enabled(&filter, &metadata), expected);
        }
    }
}
