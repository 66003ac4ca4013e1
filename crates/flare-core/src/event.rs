// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Captured error events and the uncaught-error channel payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tags::Tags;

/// Browser/runtime context attached to every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserInfo {
	/// Current page or process URL.
	pub location: String,
	/// Runtime user-agent string.
	#[serde(rename = "userAgent")]
	pub user_agent: String,
}

/// An uncaught error as delivered by the runtime's notification channel.
///
/// `source`, `line`, and `column` are part of the channel contract but are
/// not serialized into the event payload; the captured stack trace carries
/// the position information instead.
#[derive(Debug, Clone, Default)]
pub struct UncaughtError {
	/// Human-readable error message.
	pub message: String,
	/// Originating resource (script URL, module path).
	pub source: String,
	/// Line number within the originating resource.
	pub line: u32,
	/// Column number within the originating resource.
	pub column: u32,
	/// The native error value rendered to text, when one was attached.
	pub error: Option<String>,
}

impl UncaughtError {
	/// Creates an uncaught-error payload carrying only a message.
	pub fn from_message(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			..Default::default()
		}
	}
}

/// A captured error event, ready for submission to the collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
	/// Human-readable error message.
	pub message: String,
	/// The native error value rendered to text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Plaintext stack trace, newline-joined, mapped against source maps.
	#[serde(rename = "stackTrace")]
	pub stack_trace: String,
	/// Browser/runtime context.
	pub browser: BrowserInfo,
}

impl ErrorEvent {
	/// Assembles the event payload with the given tags merged in.
	///
	/// Base fields are written first, then tag entries are copied in one by
	/// one, so a tag that shares a key with a base field overrides it
	/// (last-write-wins).
	pub fn to_payload(&self, tags: &Tags) -> Value {
		let mut payload = Map::new();
		payload.insert("message".to_string(), Value::String(self.message.clone()));
		if let Some(error) = &self.error {
			payload.insert("error".to_string(), Value::String(error.clone()));
		}
		payload.insert(
			"stackTrace".to_string(),
			Value::String(self.stack_trace.clone()),
		);
		let mut browser = Map::new();
		browser.insert(
			"location".to_string(),
			Value::String(self.browser.location.clone()),
		);
		browser.insert(
			"userAgent".to_string(),
			Value::String(self.browser.user_agent.clone()),
		);
		payload.insert("browser".to_string(), Value::Object(browser));

		for (k, v) in tags.iter() {
			payload.insert(k.clone(), v.clone());
		}

		Value::Object(payload)
	}
}
