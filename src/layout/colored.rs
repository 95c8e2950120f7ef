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

use colored::Color;
use colored::ColoredString;
use colored::Colorize;
use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::Layout;
use crate::layout::format_time;
use crate::record::Level;
use crate::record::Record;

/// A layout like [`BasicLayout`](crate::layout::BasicLayout) with the prefix colored by level.
///
/// Output format:
///
/// ```text
/// [2016-06-10T11:50:53.819] [ERROR] myLogger - Log event #2
/// ```
///
/// The `[time] [LEVEL] target -` prefix is colored, the message is not. Chat clients usually
/// render ANSI escapes verbatim, so this layout is mostly useful when a notifier forwards to a
/// terminal or a service that understands them.
///
/// # Examples
///
/// ```
/// use colored::Color;
/// use logforth_hipchat::layout::ColoredLayout;
///
/// let layout = ColoredLayout::default().warn_color(Color::BrightYellow);
/// ```
#[derive(Debug, Clone)]
pub struct ColoredLayout {
    colors: LevelColor,
    no_color: bool,
    timezone: TimeZone,
}

impl Default for ColoredLayout {
    fn default() -> Self {
        Self {
            colors: LevelColor::default(),
            no_color: false,
            timezone: TimeZone::system(),
        }
    }
}

impl ColoredLayout {
    /// Customize the color of the mark log level. Default to white.
    pub fn mark_color(mut self, color: Color) -> Self {
        self.colors.mark = color;
        self
    }

    /// Customize the color of the fatal log level. Default to magenta.
    pub fn fatal_color(mut self, color: Color) -> Self {
        self.colors.fatal = color;
        self
    }

    /// Customize the color of the error log level. Default to red.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the color of the warn log level. Default to yellow.
    pub fn warn_color(mut self, color: Color) -> Self {
        self.colors.warn = color;
        self
    }

    /// Customize the color of the info log level. Default to green.
    pub fn info_color(mut self, color: Color) -> Self {
        self.colors.info = color;
        self
    }

    /// Customize the color of the debug log level. Default to cyan.
    pub fn debug_color(mut self, color: Color) -> Self {
        self.colors.debug = color;
        self
    }

    /// Customize the color of the trace log level. Default to blue.
    pub fn trace_color(mut self, color: Color) -> Self {
        self.colors.trace = color;
        self
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }
}

impl Layout for ColoredLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let time = format_time(record.time(), &self.timezone)?;
        let level = record.level();
        let target = record.target();
        let prefix = format!("[{time}] [{level}] {target} -");
        let prefix = self.colors.colorize(self.no_color, level, prefix);
        let message = record.payload();
        Ok(format!("{prefix} {message}").into_bytes())
    }
}

/// Colors for different log levels.
#[derive(Debug, Clone)]
struct LevelColor {
    mark: Color,
    fatal: Color,
    error: Color,
    warn: Color,
    info: Color,
    debug: Color,
    trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            mark: Color::White,
            fatal: Color::Magenta,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::Cyan,
            trace: Color::Blue,
        }
    }
}

impl LevelColor {
    fn colorize(&self, no_color: bool, level: Level, text: String) -> ColoredString {
        if no_color {
            return ColoredString::from(text);
        }

        let color = match level {
            Level::Mark => self.mark,
            Level::Fatal => self.fatal,
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
        };
        ColoredString::from(text).color(color)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::SystemTime;

    use super::*;

    #[test]
    fn no_color_matches_basic_format() {
        let record = Record::builder()
            .time(SystemTime::UNIX_EPOCH + Duration::from_millis(1_465_559_453_819))
            .level(Level::Error)
            .target("myLogger")
            .payload("Log event #2")
            .build();

        let layout = ColoredLayout::default()
            .no_color()
            .timezone(TimeZone::UTC);
        let text = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        assert_eq!(text, "[2016-06-10T11:50:53.819] [ERROR] myLogger - Log event #2");
    }
}
