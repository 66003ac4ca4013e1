// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the reporter SDK.

use thiserror::Error;

/// Result type alias for reporter operations.
pub type Result<T> = std::result::Result<T, ReporterError>;

/// Errors that can occur in the reporter SDK.
#[derive(Debug, Error)]
pub enum ReporterError {
	/// Missing collector token.
	#[error("collector token is required")]
	MissingToken,

	/// Missing sourcetype identifier.
	#[error("sourcetype is required")]
	MissingSourcetype,

	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Collector returned an error.
	#[error("collector error (status {status}): {message}")]
	ServerError {
		/// HTTP status code.
		status: u16,
		/// Error message from the collector.
		message: String,
	},

	/// The stack-mapping capability reported a failure.
	#[error("stack mapping failed: {0}")]
	MappingFailed(String),

	/// The stack-mapping capability did not respond in time.
	#[error("stack mapping timed out")]
	MappingTimeout,

	/// Failed to serialize the event payload.
	#[error("serialization error: {0}")]
	SerializationError(#[from] serde_json::Error),
}
