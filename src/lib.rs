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

//! A HipChat notification appender for Rust applications, with a small Logforth-style logging
//! core to host it.
//!
//! # Overview
//!
//! Log records flow from the `log` crate macros through a [`Logger`] and its dispatches into
//! appenders. The [`HipChat`](append::HipChat) appender formats each record with a [`Layout`],
//! maps the record level to a notification bucket and hands the message to a
//! [`Notifier`](append::hipchat::Notifier), which owns the HTTP call.
//!
//! | Level          | Bucket    |
//! |----------------|-----------|
//! | TRACE, DEBUG   | info      |
//! | WARN           | warning   |
//! | ERROR, FATAL   | failure   |
//! | anything else  | success   |
//!
//! # Examples
//!
//! Forward warnings and more severe records to a room:
//!
//! ```
//! use log::LevelFilter;
//! use logforth_hipchat::append::hipchat::HipChatBuilder;
//! use logforth_hipchat::append::hipchat::RecordingNotifier;
//! use logforth_hipchat::layout::BasicLayout;
//!
//! logforth_hipchat::builder()
//!     .dispatch(|d| {
//!         d.filter(LevelFilter::Warn).append(
//!             HipChatBuilder::new("Room_ID_Or_Name", "User_Token")
//!                 .from_label("deploy-bot")
//!                 .layout(BasicLayout::default())
//!                 .build(RecordingNotifier::new),
//!         )
//!     })
//!     .apply();
//!
//! log::warn!("disk usage at 91%");
//! ```
//!
//! Build the appender from serialized configuration:
//!
//! ```
//! use logforth_hipchat::append::hipchat::HipChatConfig;
//! use logforth_hipchat::append::hipchat::RecordingNotifier;
//!
//! let config = HipChatConfig::from_json(
//!     r#"{
//!         "type": "hipchat",
//!         "hipchat_token": "User_Token",
//!         "hipchat_room": "Room_ID_Or_Name",
//!         "hipchat_notify": true,
//!         "layout": { "type": "pattern", "pattern": "%p %c - %m" }
//!     }"#,
//! )
//! .unwrap();
//!
//! let appender = logforth_hipchat::configure(&config, RecordingNotifier::new).unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod filter;
pub mod layout;
pub mod record;
pub mod trap;

pub use append::Append;
pub use append::hipchat::configure;
pub use filter::Filter;
pub use layout::Layout;
pub use trap::Trap;

mod bridge;

mod error;
pub use error::Error;

mod logger;
pub use logger::*;
