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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::Layout;
use crate::layout::format_time;
use crate::record::Record;

/// A layout that renders a record according to a pattern string.
///
/// Supported specifiers:
///
/// | Specifier | Output |
/// |---|---|
/// | `%d` | time, e.g. `2016-06-10T11:50:53.819` |
/// | `%p` | level, e.g. `WARN` |
/// | `%c` | target |
/// | `%m` | message |
/// | `%f` | file name |
/// | `%l` | line number |
/// | `%M` | module path |
/// | `%n` | newline |
/// | `%%` | a literal `%` |
///
/// Any other `%x` sequence is emitted verbatim.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::layout::Layout;
/// use logforth_hipchat::layout::PatternLayout;
/// use logforth_hipchat::record::Level;
/// use logforth_hipchat::record::Record;
///
/// let layout = PatternLayout::new("%p %c: %m");
/// let record = Record::builder()
///     .level(Level::Warn)
///     .target("billing")
///     .payload("card declined")
///     .build();
/// assert_eq!(layout.format(&record).unwrap(), b"WARN billing: card declined");
/// ```
#[derive(Debug, Clone)]
pub struct PatternLayout {
    segments: Vec<Segment>,
    timezone: TimeZone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Time,
    Level,
    Target,
    Message,
    File,
    Line,
    Module,
}

impl PatternLayout {
    /// Creates a new `PatternLayout` from the given pattern.
    pub fn new(pattern: impl AsRef<str>) -> Self {
        Self {
            segments: parse(pattern.as_ref()),
            timezone: TimeZone::system(),
        }
    }

    /// Set the timezone for `%d`.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }
}

fn parse(pattern: &str) -> Vec<Segment> {
    let mut segments = vec![];
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let segment = match chars.next() {
            Some('d') => Segment::Time,
            Some('p') => Segment::Level,
            Some('c') => Segment::Target,
            Some('m') => Segment::Message,
            Some('f') => Segment::File,
            Some('l') => Segment::Line,
            Some('M') => Segment::Module,
            Some('n') => {
                literal.push('\n');
                continue;
            }
            Some('%') => {
                literal.push('%');
                continue;
            }
            Some(other) => {
                literal.push('%');
                literal.push(other);
                continue;
            }
            None => {
                literal.push('%');
                continue;
            }
        };

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(segment);
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

impl Layout for PatternLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => text.push_str(s),
                Segment::Time => text.push_str(&format_time(record.time(), &self.timezone)?),
                Segment::Level => text.push_str(record.level().as_str()),
                Segment::Target => text.push_str(record.target()),
                Segment::Message => text.push_str(record.payload()),
                Segment::File => text.push_str(&record.filename()),
                Segment::Line => {
                    let line = record.line().unwrap_or_default();
                    write!(&mut text, "{line}").map_err(Error::from_fmt_error)?;
                }
                Segment::Module => text.push_str(record.module_path().unwrap_or_default()),
            }
        }
        Ok(text.into_bytes())
    }
}
