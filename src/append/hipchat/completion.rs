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
use std::sync::Arc;

use crate::Error;
use crate::trap::Trap;

pub(crate) type ResponseCallback =
    dyn Fn(Option<Error>, Option<&Response>) -> Result<(), Error> + Send + Sync + 'static;

/// The response of the chat service to one delivery, as reported by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: String,
}

impl Response {
    /// Creates a new `Response` with the given HTTP status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The response body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// The default response callback: return the delivery error, ignore success.
pub(crate) fn raise_on_error(err: Option<Error>, _: Option<&Response>) -> Result<(), Error> {
    match err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// The completion signal handed to a [`Notifier`](super::Notifier) with every delivery.
///
/// Without a custom response callback, completing with an error raises that error: [`call`]
/// returns it and [`finish`] hands it to the appender's [`Trap`]. A custom callback replaces
/// this behavior entirely and its result is passed through unchanged.
///
/// [`call`]: Completion::call
/// [`finish`]: Completion::finish
pub struct Completion {
    callback: Arc<ResponseCallback>,
    trap: Arc<dyn Trap>,
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("callback", &"{ ... }")
            .field("trap", &self.trap)
            .finish()
    }
}

impl Completion {
    pub(crate) fn new(callback: Arc<ResponseCallback>, trap: Arc<dyn Trap>) -> Self {
        Self { callback, trap }
    }

    /// Run the response callback and return its result.
    pub fn call(&self, err: Option<Error>, response: Option<&Response>) -> Result<(), Error> {
        (self.callback)(err, response)
    }

    /// Run the response callback and trap the error it returns, if any.
    ///
    /// Notifiers call this once a delivery has ended.
    pub fn finish(self, err: Option<Error>, response: Option<&Response>) {
        if let Err(err) = self.call(err, response) {
            self.trap.trap(&err);
        }
    }
}
