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
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::layout::BasicLayout;
use crate::layout::Layout;
use crate::layout::MessagePassThroughLayout;
use crate::layout::PatternLayout;

/// A serializable layout selection, tagged by `type` with type-specific options.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::layout::LayoutConfig;
///
/// let config: LayoutConfig =
///     serde_json::from_str(r#"{ "type": "pattern", "pattern": "%p %m" }"#).unwrap();
/// let layout = config.build().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutConfig {
    /// Renders the message text only. See [`MessagePassThroughLayout`].
    #[default]
    MessagePassThrough,
    /// See [`BasicLayout`].
    Basic {
        /// IANA timezone name, default to the system timezone.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    /// See [`ColoredLayout`](crate::layout::ColoredLayout). Falls back to [`BasicLayout`]
    /// when the `colored` feature is disabled.
    #[serde(alias = "coloured")]
    Colored {
        /// IANA timezone name, default to the system timezone.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    /// See [`PatternLayout`].
    Pattern {
        /// The pattern string.
        #[serde(default = "default_pattern")]
        pattern: String,
        /// IANA timezone name, default to the system timezone.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
}

fn default_pattern() -> String {
    "%d %p %c - %m".to_string()
}

fn resolve_timezone(timezone: Option<&str>) -> Result<TimeZone, Error> {
    match timezone {
        None => Ok(TimeZone::system()),
        Some(name) if name.eq_ignore_ascii_case("utc") => Ok(TimeZone::UTC),
        Some(name) => TimeZone::get(name).map_err(|err| {
            Error::new("unknown timezone")
                .with_context("timezone", name)
                .with_source(err)
        }),
    }
}

impl LayoutConfig {
    /// Build the selected layout.
    ///
    /// # Errors
    ///
    /// Return an error if a configured timezone cannot be found.
    pub fn build(&self) -> Result<Box<dyn Layout>, Error> {
        let layout: Box<dyn Layout> = match self {
            LayoutConfig::MessagePassThrough => Box::new(MessagePassThroughLayout::default()),
            LayoutConfig::Basic { timezone } => {
                let tz = resolve_timezone(timezone.as_deref())?;
                Box::new(BasicLayout::default().timezone(tz))
            }
            #[cfg(feature = "colored")]
            LayoutConfig::Colored { timezone } => {
                let tz = resolve_timezone(timezone.as_deref())?;
                Box::new(crate::layout::ColoredLayout::default().timezone(tz))
            }
            #[cfg(not(feature = "colored"))]
            LayoutConfig::Colored { timezone } => {
                let tz = resolve_timezone(timezone.as_deref())?;
                Box::new(BasicLayout::default().timezone(tz))
            }
            LayoutConfig::Pattern { pattern, timezone } => {
                let tz = resolve_timezone(timezone.as_deref())?;
                Box::new(PatternLayout::new(pattern).timezone(tz))
            }
        };
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use crate::record::Record;

    fn parse(json: &str) -> LayoutConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn selects_layout_by_name() {
        assert_eq!(
            parse(r#"{"type":"messagePassThrough"}"#),
            LayoutConfig::MessagePassThrough
        );
        assert_eq!(
            parse(r#"{"type":"basic"}"#),
            LayoutConfig::Basic { timezone: None }
        );
        assert_eq!(
            parse(r#"{"type":"coloured","timezone":"UTC"}"#),
            LayoutConfig::Colored {
                timezone: Some("UTC".to_string())
            }
        );
        assert_eq!(
            parse(r#"{"type":"pattern"}"#),
            LayoutConfig::Pattern {
                pattern: "%d %p %c - %m".to_string(),
                timezone: None
            }
        );
    }

    #[test]
    fn rejects_unknown_layout() {
        let result = serde_json::from_str::<LayoutConfig>(r#"{"type":"xml"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn builds_pattern_layout() {
        let layout = parse(r#"{"type":"pattern","pattern":"%p|%m","timezone":"UTC"}"#)
            .build()
            .unwrap();
        let record = Record::builder()
            .level(Level::Fatal)
            .payload("out of memory")
            .build();
        assert_eq!(layout.format(&record).unwrap(), b"FATAL|out of memory");
    }

    #[test]
    fn unknown_timezone_fails_to_build() {
        let config = LayoutConfig::Basic {
            timezone: Some("Mars/Olympus_Mons".to_string()),
        };
        let err = config.build().unwrap_err();
        assert_eq!(err.message(), "unknown timezone");
    }
}
