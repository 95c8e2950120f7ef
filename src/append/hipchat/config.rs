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

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::layout::LayoutConfig;

/// The discriminator of [`HipChatConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppenderKind {
    /// The HipChat appender.
    #[default]
    #[serde(rename = "hipchat")]
    HipChat,
}

/// Serializable configuration of the [`HipChat`](crate::append::HipChat) appender.
///
/// Only `type` is required to deserialize. Token and room are never validated here; when they
/// are absent the notifier factory receives empty strings.
///
/// The response callback cannot be expressed in serialized data; set it with
/// [`HipChatBuilder::response_callback`](crate::append::hipchat::HipChatBuilder::response_callback).
///
/// # Examples
///
/// ```
/// use logforth_hipchat::append::hipchat::HipChatConfig;
///
/// let config = HipChatConfig::from_json(
///     r#"{
///         "type": "hipchat",
///         "hipchat_token": "User_Token_With_Notification_Privs",
///         "hipchat_room": "Room_ID_Or_Name",
///         "hipchat_notify": true,
///         "layout": { "type": "basic" }
///     }"#,
/// )
/// .unwrap();
/// assert!(config.hipchat_notify);
/// assert_eq!(config.hipchat_from, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HipChatConfig {
    /// Literal `"hipchat"`.
    #[serde(rename = "type")]
    pub kind: AppenderKind,
    /// User token with notification privileges.
    #[serde(default)]
    pub hipchat_token: String,
    /// Room id or name.
    #[serde(default)]
    pub hipchat_room: String,
    /// A label to say where the message is from.
    #[serde(default)]
    pub hipchat_from: String,
    /// Whether deliveries alert room members.
    #[serde(default)]
    pub hipchat_notify: bool,
    /// API host override for self-hosted servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hipchat_host: Option<String>,
    /// Layout selection, default to message pass-through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
}

impl HipChatConfig {
    /// Creates a new `HipChatConfig` for the given room and token with all other fields
    /// defaulted.
    pub fn new(room: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            hipchat_room: room.into(),
            hipchat_token: token.into(),
            ..Default::default()
        }
    }

    /// Parse a configuration from its JSON form.
    ///
    /// # Errors
    ///
    /// Return an error if the input is not valid JSON, `type` is not `"hipchat"`, or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::from_config_error)
    }
}
