// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User context attached to the submission envelope.

use serde::{Deserialize, Serialize};

/// Literal `source` value used when no user is authenticated.
pub const ANONYMOUS_SOURCE: &str = "anonymous";

/// The authenticated user at report time.
///
/// The submission envelope's `source` field carries the user's login, or
/// the literal `"anonymous"` when no user context is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
	/// The user's login name.
	pub login: String,
}

impl UserContext {
	/// Creates a user context for the given login.
	pub fn new(login: impl Into<String>) -> Self {
		Self {
			login: login.into(),
		}
	}
}

/// Resolves the envelope `source` field from an optional user context.
pub fn envelope_source(user: Option<&UserContext>) -> &str {
	user.map(|u| u.login.as_str()).unwrap_or(ANONYMOUS_SOURCE)
}
