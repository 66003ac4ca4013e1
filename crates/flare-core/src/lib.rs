// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the flare error-reporting SDK.
//!
//! This crate provides the wire-format data model shared by the reporter
//! client: the captured error event, the browser/runtime context attached to
//! it, the tag mapping merged into every event, and the user context that
//! determines the submission envelope's `source` field.

pub mod event;
pub mod tags;
pub mod user;

pub use event::{BrowserInfo, ErrorEvent, UncaughtError};
pub use tags::Tags;
pub use user::{envelope_source, UserContext, ANONYMOUS_SOURCE};
