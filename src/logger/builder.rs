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

use crate::Append;
use crate::Error;
use crate::Filter;
use crate::Logger;
use crate::Trap;
use crate::logger::log_impl::Dispatch;
use crate::trap::DefaultTrap;

/// Create a new empty [`LoggerBuilder`] instance for configuring log dispatching.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::append::hipchat::HipChatBuilder;
/// use logforth_hipchat::append::hipchat::RecordingNotifier;
///
/// let logger = logforth_hipchat::builder()
///     .dispatch(|d| d.append(HipChatBuilder::new("ops", "token").build(RecordingNotifier::new)))
///     .build();
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder {
        dispatches: vec![],
        trap: Arc::new(DefaultTrap::default()),
    }
}

/// A builder for configuring log dispatching and setting up the global logger.
#[must_use = "call `apply` to set the global logger or `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    // stashed dispatches
    dispatches: Vec<Dispatch>,
    trap: Arc<dyn Trap>,
}

impl LoggerBuilder {
    /// Register a new dispatch with the [`LoggerBuilder`].
    pub fn dispatch<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DispatchBuilder<false>) -> DispatchBuilder<true>,
    {
        self.dispatches.push(f(DispatchBuilder::new()).build());
        self
    }

    /// Set the trap that receives append and flush errors.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        Logger::new(self.dispatches, self.trap)
    }

    /// Set up the [`log`] crate global logger with all the configured dispatches.
    ///
    /// This should be called early in the execution of a Rust program. Any log events that occur
    /// before initialization will be ignored.
    ///
    /// This function will set the global maximum log level to `Trace`. To override this, call
    /// [`log::set_max_level`] after this function.
    ///
    /// # Errors
    ///
    /// Return an error if a global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// if let Err(err) = logforth_hipchat::builder().try_apply() {
    ///     eprintln!("failed to set logger: {err}");
    /// }
    /// ```
    pub fn try_apply(self) -> Result<(), Error> {
        log::set_boxed_logger(Box::new(self.build()))
            .map_err(|err| Error::new("log global logger has been already setup").with_source(err))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    /// Set up the [`log`] crate global logger with all the configured dispatches.
    ///
    /// # Panics
    ///
    /// Panic if the global logger has already been set.
    pub fn apply(self) {
        self.try_apply()
            .expect("LoggerBuilder::apply must be called before the global logger initialized");
    }
}

/// A builder for configuring a log dispatch, including filters and appenders.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::append::hipchat::HipChatBuilder;
/// use logforth_hipchat::append::hipchat::RecordingNotifier;
/// use logforth_hipchat::record::Level;
/// use logforth_hipchat::record::LevelFilter;
///
/// let logger = logforth_hipchat::builder()
///     .dispatch(|d| {
///         d.filter(LevelFilter::MoreSevereEqual(Level::Warn))
///             .append(HipChatBuilder::new("ops", "token").build(RecordingNotifier::new))
///     })
///     .build();
/// ```
#[derive(Debug)]
pub struct DispatchBuilder<const APPEND: bool> {
    filters: Vec<Box<dyn Filter>>,
    appends: Vec<Box<dyn Append>>,
}

impl DispatchBuilder<false> {
    fn new() -> Self {
        DispatchBuilder {
            filters: vec![],
            appends: vec![],
        }
    }

    /// Add a filter to this dispatch.
    pub fn filter(mut self, filter: impl Into<Box<dyn Filter>>) -> Self {
        self.filters.push(filter.into());
        self
    }
}

impl DispatchBuilder<true> {
    fn build(self) -> Dispatch {
        Dispatch::new(self.filters, self.appends)
    }
}

impl<const APPEND: bool> DispatchBuilder<APPEND> {
    /// Add an appender to this dispatch.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> DispatchBuilder<true> {
        self.appends.push(append.into());
        DispatchBuilder {
            filters: self.filters,
            appends: self.appends,
        }
    }
}
