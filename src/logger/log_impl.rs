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
use crate::Trap;
use crate::filter::FilterResult;
use crate::record::Metadata;
use crate::record::Record;

/// A logger facade that dispatches log records to one or more dispatcher.
///
/// Use [`builder`](crate::builder) to construct one. It can be used directly through
/// [`Logger::log`], or installed as the global logger of the [`log`] crate.
#[derive(Debug)]
pub struct Logger {
    dispatches: Vec<Dispatch>,
    trap: Arc<dyn Trap>,
}

impl Logger {
    pub(super) fn new(dispatches: Vec<Dispatch>, trap: Arc<dyn Trap>) -> Self {
        Self { dispatches, trap }
    }

    /// Determine if a log message with the specified metadata would be logged.
    pub fn enabled(&self, metadata: &Metadata) -> bool {
        self.dispatches
            .iter()
            .any(|dispatch| dispatch.enabled(metadata))
    }

    /// Log the [`Record`].
    ///
    /// Append errors are handed to the logger's trap.
    pub fn log(&self, record: &Record) {
        for dispatch in &self.dispatches {
            for err in dispatch.log(record) {
                let err = Error::new("failed to append record")
                    .with_context("level", record.level())
                    .with_context("target", record.target())
                    .with_source(err);
                self.trap.trap(&err);
            }
        }
    }

    /// Flush any buffered records.
    pub fn flush(&self) {
        for dispatch in &self.dispatches {
            for err in dispatch.flush() {
                let err = Error::new("failed to flush appender").with_source(err);
                self.trap.trap(&err);
            }
        }
    }
}

/// A grouped set of appenders and filters.
///
/// The [`Logger`] facade dispatches log records to one or more [`Dispatch`] instances.
/// Each [`Dispatch`] instance contains a set of filters and appenders.
///
/// `filters` are used to determine whether a log record should be passed to the appenders.
/// `appends` are used to write log records to a destination.
#[derive(Debug)]
pub(super) struct Dispatch {
    filters: Vec<Box<dyn Filter>>,
    appends: Vec<Box<dyn Append>>,
}

impl Dispatch {
    pub(super) fn new(filters: Vec<Box<dyn Filter>>, appends: Vec<Box<dyn Append>>) -> Self {
        debug_assert!(
            !appends.is_empty(),
            "A Dispatch must have at least one append"
        );

        Self { filters, appends }
    }

    fn enabled(&self, metadata: &Metadata) -> bool {
        for filter in &self.filters {
            match filter.enabled(metadata) {
                FilterResult::Reject => return false,
                FilterResult::Accept => return true,
                FilterResult::Neutral => {}
            }
        }

        true
    }

    fn log(&self, record: &Record) -> Vec<Error> {
        if !self.enabled(record.metadata()) {
            return vec![];
        }

        self.appends
            .iter()
            .filter_map(|append| append.append(record).err())
            .collect()
    }

    fn flush(&self) -> Vec<Error> {
        self.appends
            .iter()
            .filter_map(|append| append.flush().err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::append::hipchat::Bucket;
    use crate::append::hipchat::HipChatBuilder;
    use crate::append::hipchat::RecordingNotifier;
    use crate::filter::CustomFilter;
    use crate::record::Level;
    use crate::record::LevelFilter;

    #[derive(Debug)]
    struct FailingAppend;

    impl Append for FailingAppend {
        fn append(&self, _: &Record) -> Result<(), Error> {
            Err(Error::new("append failed"))
        }

        fn flush(&self) -> Result<(), Error> {
            Err(Error::new("flush failed"))
        }
    }

    #[derive(Debug, Default, Clone)]
    struct CollectTrap(Arc<Mutex<Vec<String>>>);

    impl Trap for CollectTrap {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    fn hipchat(notifier: &RecordingNotifier) -> crate::append::HipChat {
        let notifier = notifier.clone();
        HipChatBuilder::new("R", "T").build(move |_, _| notifier)
    }

    #[test]
    fn filters_select_dispatches() {
        let errors = RecordingNotifier::default();
        let everything = RecordingNotifier::default();

        let logger = crate::builder()
            .dispatch(|d| {
                d.filter(LevelFilter::MoreSevereEqual(Level::Error))
                    .append(hipchat(&errors))
            })
            .dispatch(|d| d.append(hipchat(&everything)))
            .build();

        for level in [Level::Debug, Level::Warn, Level::Fatal] {
            let record = Record::builder().level(level).payload("event").build();
            logger.log(&record);
        }

        let buckets: Vec<_> = errors
            .take_deliveries()
            .iter()
            .map(|d| d.bucket())
            .collect();
        assert_eq!(buckets, [Bucket::Failure]);
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn accepting_filter_short_circuits() {
        let notifier = RecordingNotifier::default();
        let logger = crate::builder()
            .dispatch(|d| {
                d.filter(CustomFilter::new(|metadata: &Metadata| {
                    if metadata.target() == "billing" {
                        FilterResult::Accept
                    } else {
                        FilterResult::Neutral
                    }
                }))
                .filter(LevelFilter::Off)
                .append(hipchat(&notifier))
            })
            .build();

        let accepted = Metadata::builder().target("billing").build();
        let rejected = Metadata::builder().target("search").build();
        assert!(logger.enabled(&accepted));
        assert!(!logger.enabled(&rejected));

        logger.log(&Record::builder().target("billing").payload("paid").build());
        logger.log(&Record::builder().target("search").payload("miss").build());
        let deliveries = notifier.take_deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].message(), "paid");
    }

    #[test]
    fn append_errors_are_trapped() {
        let trap = CollectTrap::default();
        let notifier = RecordingNotifier::default();
        let logger = crate::builder()
            .dispatch(|d| d.append(FailingAppend).append(hipchat(&notifier)))
            .trap(trap.clone())
            .build();

        let record = Record::builder()
            .level(Level::Warn)
            .target("disk")
            .payload("almost full")
            .build();
        logger.log(&record);
        logger.flush();

        assert_eq!(notifier.len(), 1);
        assert_eq!(
            *trap.0.lock().unwrap(),
            [
                "failed to append record, context: { level: WARN, target: disk }, sources: [append failed]",
                "failed to flush appender, sources: [flush failed]",
            ]
        );
    }
}
