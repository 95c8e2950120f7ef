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

//! Forward log records as HipChat room notifications.
//!
//! The [`HipChat`] appender formats each record with its layout, picks a [`Bucket`] from the
//! record level and hands the message to a [`Notifier`]. The notifier owns the wire protocol;
//! this module only ships the trait and an in-memory [`RecordingNotifier`].

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::Layout;
use crate::Trap;
use crate::append::Append;
use crate::layout::MessagePassThroughLayout;
use crate::record::Record;
use crate::trap::DefaultTrap;

mod completion;
mod config;
mod notifier;
mod testing;

pub use self::completion::Completion;
pub use self::completion::Response;
pub use self::config::AppenderKind;
pub use self::config::HipChatConfig;
pub use self::notifier::Bucket;
pub use self::notifier::DEFAULT_HOST;
pub use self::notifier::Notifier;
pub use self::testing::Delivery;
pub use self::testing::RecordingNotifier;

use self::completion::ResponseCallback;
use self::completion::raise_on_error;

/// An appender that sends log records to a HipChat room.
///
/// Appending never waits for the delivery: the notifier completes it later through a
/// [`Completion`].
///
/// # Examples
///
/// ```
/// use logforth_hipchat::append::hipchat::HipChatBuilder;
/// use logforth_hipchat::append::hipchat::RecordingNotifier;
///
/// let appender = HipChatBuilder::new("Room_ID_Or_Name", "User_Token")
///     .from_label("deploy-bot")
///     .notify(true)
///     .build(RecordingNotifier::new);
/// ```
pub struct HipChat {
    notifier: Box<dyn Notifier>,
    layout: Box<dyn Layout>,
    callback: Arc<ResponseCallback>,
    trap: Arc<dyn Trap>,
}

impl fmt::Debug for HipChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HipChat")
            .field("notifier", &self.notifier)
            .field("layout", &self.layout)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl Append for HipChat {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let bytes = self.layout.format(record)?;
        let message = String::from_utf8_lossy(&bytes).into_owned();
        let completion = Completion::new(self.callback.clone(), self.trap.clone());

        match Bucket::from_level(record.level()) {
            Bucket::Info => self.notifier.info(message, completion),
            Bucket::Warning => self.notifier.warning(message, completion),
            Bucket::Failure => self.notifier.failure(message, completion),
            Bucket::Success => self.notifier.success(message, completion),
        }
        Ok(())
    }
}

/// A builder to configure and create a [`HipChat`] appender.
pub struct HipChatBuilder {
    room: String,
    token: String,
    from: String,
    notify: bool,
    host: Option<String>,
    layout: Box<dyn Layout>,
    callback: Arc<ResponseCallback>,
    trap: Arc<dyn Trap>,
}

impl fmt::Debug for HipChatBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HipChatBuilder")
            .field("room", &self.room)
            .field("from", &self.from)
            .field("notify", &self.notify)
            .field("host", &self.host)
            .field("layout", &self.layout)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl HipChatBuilder {
    /// Creates a new [`HipChatBuilder`] for the given room and token.
    ///
    /// Neither value is validated; both are passed to the notifier as they are.
    pub fn new(room: impl Into<String>, token: impl Into<String>) -> Self {
        HipChatBuilder {
            room: room.into(),
            token: token.into(),
            from: String::new(),
            notify: false,
            host: None,
            layout: Box::new(MessagePassThroughLayout::default()),
            callback: Arc::new(raise_on_error),
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Creates a new [`HipChatBuilder`] from a deserialized configuration.
    ///
    /// # Errors
    ///
    /// Return an error if the configured layout cannot be built.
    pub fn from_config(config: &HipChatConfig) -> Result<Self, Error> {
        let mut builder = HipChatBuilder::new(&config.hipchat_room, &config.hipchat_token)
            .from_label(&config.hipchat_from)
            .notify(config.hipchat_notify);
        if let Some(host) = &config.hipchat_host {
            builder = builder.host(host);
        }
        if let Some(layout) = &config.layout {
            builder.layout = layout.build()?;
        }
        Ok(builder)
    }

    /// Set the sender label. Default to an empty string.
    pub fn from_label(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    /// Set whether deliveries alert room members. Default to `false`.
    pub fn notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }

    /// Override the API host, e.g. for a self-hosted server.
    ///
    /// Without an override the notifier keeps its own default, usually [`DEFAULT_HOST`].
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the layout. Default to [`MessagePassThroughLayout`].
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set a callback that receives the outcome of every delivery.
    ///
    /// It replaces the default behavior of raising delivery errors, and whatever it returns is
    /// what [`Completion::call`] returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use logforth_hipchat::Error;
    /// use logforth_hipchat::append::hipchat::HipChatBuilder;
    /// use logforth_hipchat::append::hipchat::Response;
    ///
    /// let builder = HipChatBuilder::new("ops", "token").response_callback(
    ///     |err: Option<Error>, _: Option<&Response>| {
    ///         if let Some(err) = err {
    ///             eprintln!("notification dropped: {err}");
    ///         }
    ///         Ok(())
    ///     },
    /// );
    /// ```
    pub fn response_callback(
        mut self,
        callback: impl Fn(Option<Error>, Option<&Response>) -> Result<(), Error>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.callback = Arc::new(callback);
        self
    }

    /// Set the trap that receives errors raised when a delivery completes.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }

    /// Build the [`HipChat`] appender, creating its notifier with `make_notifier(room, token)`.
    ///
    /// The room, sender label, notify flag and host override are applied to the notifier here,
    /// once; the configuration never changes afterwards.
    pub fn build<N, F>(self, make_notifier: F) -> HipChat
    where
        N: Notifier,
        F: FnOnce(&str, &str) -> N,
    {
        let HipChatBuilder {
            room,
            token,
            from,
            notify,
            host,
            layout,
            callback,
            trap,
        } = self;

        let mut notifier = make_notifier(&room, &token);
        notifier.set_room(&room);
        notifier.set_from(&from);
        notifier.set_notify(notify);
        if let Some(host) = host.as_deref() {
            notifier.set_host(host);
        }

        HipChat {
            notifier: Box::new(notifier),
            layout,
            callback,
            trap,
        }
    }
}

/// Build a [`HipChat`] appender from a deserialized configuration.
///
/// # Errors
///
/// Return an error if the configured layout cannot be built.
///
/// # Examples
///
/// ```
/// use logforth_hipchat::append::hipchat::HipChatConfig;
/// use logforth_hipchat::append::hipchat::RecordingNotifier;
///
/// let config = HipChatConfig::from_json(r#"{ "type": "hipchat", "hipchat_room": "ops" }"#).unwrap();
/// let appender = logforth_hipchat::configure(&config, RecordingNotifier::new).unwrap();
/// ```
pub fn configure<N, F>(config: &HipChatConfig, make_notifier: F) -> Result<HipChat, Error>
where
    N: Notifier,
    F: FnOnce(&str, &str) -> N,
{
    HipChatBuilder::from_config(config).map(|builder| builder.build(make_notifier))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::layout::CustomLayout;
    use crate::record::Level;

    fn build(builder: HipChatBuilder) -> (HipChat, RecordingNotifier) {
        let mut handle = None;
        let appender = builder.build(|room, token| {
            let notifier = RecordingNotifier::new(room, token);
            handle = Some(notifier.clone());
            notifier
        });
        (appender, handle.unwrap())
    }

    fn log(appender: &HipChat, level: Level, message: &'static str) {
        let record = Record::builder()
            .level(level)
            .target("myCategory")
            .payload(message)
            .build();
        appender.append(&record).unwrap();
    }

    #[derive(Debug, Default)]
    struct CollectTrap(Mutex<Vec<String>>);

    impl Trap for Arc<CollectTrap> {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    #[test]
    fn custom_host_notify_and_sender() {
        let builder = HipChatBuilder::new("R", "T")
            .from_label("F")
            .notify(true)
            .host("custom.host");
        let (appender, notifier) = build(builder);
        log(&appender, Level::Warn, "Log event #1");

        assert_eq!(notifier.room(), "R");
        assert_eq!(notifier.token(), "T");
        assert_eq!(notifier.from_label(), "F");
        assert_eq!(notifier.host(), "custom.host");
        assert!(notifier.notify());

        let deliveries = notifier.take_deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].bucket(), Bucket::Warning);
        assert_eq!(deliveries[0].message(), "Log event #1");
    }

    #[test]
    fn missing_options_keep_defaults() {
        let (appender, notifier) = build(HipChatBuilder::new("", ""));
        log(&appender, Level::Error, "Log event #2");

        assert_eq!(notifier.host(), DEFAULT_HOST);
        assert_eq!(notifier.host(), "api.hipchat.com");
        assert!(!notifier.notify());
        assert_eq!(notifier.from_label(), "");

        let deliveries = notifier.take_deliveries();
        assert_eq!(deliveries[0].bucket(), Bucket::Failure);
        assert_eq!(deliveries[0].message(), "Log event #2");
    }

    #[test]
    fn every_level_lands_in_its_bucket() {
        let (appender, notifier) = build(HipChatBuilder::new("R", "T"));
        let cases = [
            (Level::Trace, Bucket::Info),
            (Level::Debug, Bucket::Info),
            (Level::Info, Bucket::Success),
            (Level::Warn, Bucket::Warning),
            (Level::Error, Bucket::Failure),
            (Level::Fatal, Bucket::Failure),
            (Level::Mark, Bucket::Success),
        ];
        for (level, _) in cases {
            log(&appender, level, "event");
        }

        let buckets: Vec<_> = notifier
            .take_deliveries()
            .iter()
            .map(Delivery::bucket)
            .collect();
        let expected: Vec<_> = cases.iter().map(|(_, bucket)| *bucket).collect();
        assert_eq!(buckets, expected);
    }

    #[test]
    fn message_is_the_layout_output() {
        let layout = CustomLayout::new(|record: &Record| {
            Ok(format!("[{}] {} - {}", record.level(), record.target(), record.payload()))
        });
        let (appender, notifier) = build(HipChatBuilder::new("R", "T").layout(layout));
        log(&appender, Level::Debug, "Log event #3");

        let deliveries = notifier.take_deliveries();
        assert_eq!(deliveries[0].message(), "[DEBUG] myCategory - Log event #3");
        assert_eq!(deliveries[0].bucket(), Bucket::Info);
    }

    #[test]
    fn layout_error_is_returned() {
        let layout = CustomLayout::new(|_: &Record| Err(Error::new("layout exploded")));
        let (appender, notifier) = build(HipChatBuilder::new("R", "T").layout(layout));
        let record = Record::builder().payload("lost").build();

        let err = appender.append(&record).unwrap_err();
        assert_eq!(err.to_string(), "layout exploded");
        assert!(notifier.is_empty());
    }

    #[test]
    fn default_callback_raises_delivery_error() {
        let trap = Arc::new(CollectTrap::default());
        let (appender, notifier) = build(HipChatBuilder::new("R", "T").trap(trap.clone()));
        log(&appender, Level::Info, "something has happened");

        let delivery = notifier.take_deliveries().pop().unwrap();
        let err = delivery
            .completion()
            .call(Some(Error::new("oh dear")), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "oh dear");

        delivery
            .into_completion()
            .finish(Some(Error::new("oh dear")), None);
        assert_eq!(*trap.0.lock().unwrap(), ["oh dear"]);
    }

    #[test]
    fn default_callback_accepts_success() {
        let trap = Arc::new(CollectTrap::default());
        let (appender, notifier) = build(HipChatBuilder::new("R", "T").trap(trap.clone()));
        log(&appender, Level::Info, "something has happened");

        let delivery = notifier.take_deliveries().pop().unwrap();
        let response = Response::new(204, "");
        assert!(delivery.completion().call(None, Some(&response)).is_ok());
        delivery.into_completion().finish(None, Some(&response));
        assert!(trap.0.lock().unwrap().is_empty());
    }

    #[test]
    fn custom_callback_replaces_default() {
        let trap = Arc::new(CollectTrap::default());
        let builder = HipChatBuilder::new("R", "T")
            .trap(trap.clone())
            .response_callback(|err: Option<Error>, _: Option<&Response>| match err {
                Some(_) => Ok(()),
                None => Err(Error::new("works")),
            });
        let (appender, notifier) = build(builder);
        log(&appender, Level::Warn, "Log event #1");

        let delivery = notifier.take_deliveries().pop().unwrap();
        let completion = delivery.into_completion();
        assert!(completion.call(Some(Error::new("oh dear")), None).is_ok());
        let err = completion.call(None, None).unwrap_err();
        assert_eq!(err.to_string(), "works");

        completion.finish(Some(Error::new("oh dear")), None);
        assert!(trap.0.lock().unwrap().is_empty());
    }

    #[test]
    fn configure_from_json() {
        let config = HipChatConfig::from_json(
            r#"{
                "type": "hipchat",
                "hipchat_token": "User_Token_With_Notification_Privs",
                "hipchat_room": "Room_ID_Or_Name",
                "hipchat_from": "release-bot",
                "hipchat_notify": true,
                "hipchat_host": "hipchat.your-company.tld",
                "layout": { "type": "pattern", "pattern": "%p: %m" }
            }"#,
        )
        .unwrap();

        let mut handle = None;
        let appender = configure(&config, |room, token| {
            let notifier = RecordingNotifier::new(room, token);
            handle = Some(notifier.clone());
            notifier
        })
        .unwrap();
        let notifier = handle.unwrap();
        log(&appender, Level::Fatal, "fatal event");

        assert_eq!(notifier.room(), "Room_ID_Or_Name");
        assert_eq!(notifier.token(), "User_Token_With_Notification_Privs");
        assert_eq!(notifier.from_label(), "release-bot");
        assert_eq!(notifier.host(), "hipchat.your-company.tld");
        assert!(notifier.notify());

        let deliveries = notifier.take_deliveries();
        assert_eq!(deliveries[0].bucket(), Bucket::Failure);
        assert_eq!(deliveries[0].message(), "FATAL: fatal event");
    }
}
