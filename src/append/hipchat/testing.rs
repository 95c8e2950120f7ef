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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::append::hipchat::Bucket;
use crate::append::hipchat::Completion;
use crate::append::hipchat::DEFAULT_HOST;
use crate::append::hipchat::Notifier;

/// A notifier that records deliveries in memory instead of sending them.
///
/// Clones share the same state, so a test can keep one handle and give the other to the
/// appender. Recorded completions are left to the test to call.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::append::Append;
/// use logforth_hipchat::append::hipchat::Bucket;
/// use logforth_hipchat::append::hipchat::HipChatBuilder;
/// use logforth_hipchat::append::hipchat::RecordingNotifier;
/// use logforth_hipchat::record::Level;
/// use logforth_hipchat::record::Record;
///
/// let notifier = RecordingNotifier::default();
/// let appender = HipChatBuilder::new("ops", "token").build({
///     let notifier = notifier.clone();
///     move |_, _| notifier
/// });
///
/// let record = Record::builder().level(Level::Warn).payload("disk almost full").build();
/// appender.append(&record).unwrap();
///
/// let deliveries = notifier.take_deliveries();
/// assert_eq!(deliveries[0].bucket(), Bucket::Warning);
/// assert_eq!(deliveries[0].message(), "disk almost full");
/// ```
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    state: Arc<Mutex<State>>,
}

#[derive(Debug)]
struct State {
    room: String,
    token: String,
    from: String,
    host: String,
    notify: bool,
    deliveries: Vec<Delivery>,
}

/// One recorded delivery.
#[derive(Debug)]
pub struct Delivery {
    bucket: Bucket,
    message: String,
    completion: Completion,
}

impl Delivery {
    /// The bucket the message was delivered in.
    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// The delivered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The completion handed over with the message.
    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    /// Take the completion out, e.g. to [`finish`](Completion::finish) it.
    pub fn into_completion(self) -> Completion {
        self.completion
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl RecordingNotifier {
    /// Creates a new `RecordingNotifier` bound to the given room and token.
    ///
    /// The host starts as [`DEFAULT_HOST`], the sender label empty and notify off.
    pub fn new(room: &str, token: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                room: room.to_string(),
                token: token.to_string(),
                from: String::new(),
                host: DEFAULT_HOST.to_string(),
                notify: false,
                deliveries: vec![],
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current room.
    pub fn room(&self) -> String {
        self.state().room.clone()
    }

    /// The token the notifier was created with.
    pub fn token(&self) -> String {
        self.state().token.clone()
    }

    /// The current sender label.
    pub fn from_label(&self) -> String {
        self.state().from.clone()
    }

    /// The current API host.
    pub fn host(&self) -> String {
        self.state().host.clone()
    }

    /// The current notify flag.
    pub fn notify(&self) -> bool {
        self.state().notify
    }

    /// The number of recorded deliveries.
    pub fn len(&self) -> usize {
        self.state().deliveries.len()
    }

    /// Whether nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.state().deliveries.is_empty()
    }

    /// Drain and return all recorded deliveries.
    pub fn take_deliveries(&self) -> Vec<Delivery> {
        std::mem::take(&mut self.state().deliveries)
    }
}

impl Notifier for RecordingNotifier {
    fn set_room(&mut self, room: &str) {
        self.state().room = room.to_string();
    }

    fn set_from(&mut self, from: &str) {
        self.state().from = from.to_string();
    }

    fn set_host(&mut self, host: &str) {
        self.state().host = host.to_string();
    }

    fn set_notify(&mut self, notify: bool) {
        self.state().notify = notify;
    }

    fn send(&self, bucket: Bucket, message: String, completion: Completion) {
        self.state().deliveries.push(Delivery {
            bucket,
            message,
            completion,
        });
    }
}
