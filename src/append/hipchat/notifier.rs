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

use crate::append::hipchat::Completion;
use crate::record::Level;

/// The host a notifier talks to unless told otherwise.
pub const DEFAULT_HOST: &str = "api.hipchat.com";

/// The notification severity category of the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Neutral, low priority notifications.
    Info,
    /// Something needs attention.
    Warning,
    /// Something failed.
    Failure,
    /// Everything else.
    Success,
}

impl Bucket {
    /// Map a log level to its bucket.
    ///
    /// | Level | Bucket |
    /// |---|---|
    /// | `TRACE`, `DEBUG` | `info` |
    /// | `WARN` | `warning` |
    /// | `ERROR`, `FATAL` | `failure` |
    /// | anything else | `success` |
    pub fn from_level(level: Level) -> Bucket {
        match level {
            Level::Trace | Level::Debug => Bucket::Info,
            Level::Warn => Bucket::Warning,
            Level::Error | Level::Fatal => Bucket::Failure,
            _ => Bucket::Success,
        }
    }

    /// Return the name the chat service uses for this bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Info => "info",
            Bucket::Warning => "warning",
            Bucket::Failure => "failure",
            Bucket::Success => "success",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A client that delivers notifications to a chat room.
///
/// The setters are called once while the [`HipChat`](crate::append::HipChat) appender is built.
/// Afterwards the client is shared across threads and only the delivery operations are called.
///
/// A delivery must not block the caller: implementations hand the message to their own I/O
/// machinery and call [`Completion::finish`] once the outcome is known.
pub trait Notifier: fmt::Debug + Send + Sync + 'static {
    /// Set the target room id or name.
    fn set_room(&mut self, room: &str);

    /// Set the sender label.
    fn set_from(&mut self, from: &str);

    /// Set the API host.
    fn set_host(&mut self, host: &str);

    /// Set whether a delivery should alert room members.
    fn set_notify(&mut self, notify: bool);

    /// Deliver a message in the given bucket.
    fn send(&self, bucket: Bucket, message: String, completion: Completion);

    /// Deliver a message in the `info` bucket.
    fn info(&self, message: String, completion: Completion) {
        self.send(Bucket::Info, message, completion)
    }

    /// Deliver a message in the `warning` bucket.
    fn warning(&self, message: String, completion: Completion) {
        self.send(Bucket::Warning, message, completion)
    }

    /// Deliver a message in the `failure` bucket.
    fn failure(&self, message: String, completion: Completion) {
        self.send(Bucket::Failure, message, completion)
    }

    /// Deliver a message in the `success` bucket.
    fn success(&self, message: String, completion: Completion) {
        self.send(Bucket::Success, message, completion)
    }
}

impl<T: Notifier> From<T> for Box<dyn Notifier> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_levels_map_to_info() {
        assert_eq!(Bucket::from_level(Level::Trace), Bucket::Info);
        assert_eq!(Bucket::from_level(Level::Debug), Bucket::Info);
    }

    #[test]
    fn warn_maps_to_warning() {
        assert_eq!(Bucket::from_level(Level::Warn), Bucket::Warning);
    }

    #[test]
    fn error_levels_map_to_failure() {
        assert_eq!(Bucket::from_level(Level::Error), Bucket::Failure);
        assert_eq!(Bucket::from_level(Level::Fatal), Bucket::Failure);
    }

    #[test]
    fn unmapped_levels_default_to_success() {
        assert_eq!(Bucket::from_level(Level::Info), Bucket::Success);
        assert_eq!(Bucket::from_level(Level::Mark), Bucket::Success);
    }

    #[test]
    fn bucket_names() {
        let names: Vec<_> = [
            Bucket::Info,
            Bucket::Warning,
            Bucket::Failure,
            Bucket::Success,
        ]
        .iter()
        .map(Bucket::to_string)
        .collect();
        assert_eq!(names, ["info", "warning", "failure", "success"]);
    }
}
