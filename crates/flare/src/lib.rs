// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error-reporting SDK for capturing and forwarding uncaught errors.
//!
//! The reporter intercepts uncaught runtime errors, maps their stack trace
//! to original source positions through an external mapping capability,
//! attaches session/user/deployment tags, and POSTs a JSON envelope to a
//! remote collector endpoint over HTTPS, guarded against recursive
//! re-entry by a single handling flag.
//!
//! # Overview
//!
//! - [`Reporter`] owns the handling guard, tag mapping, and user context,
//!   and drives one handling cycle per uncaught error: stack capture →
//!   mapping → event assembly → submission.
//! - [`StackMapper`] is the seam for source-map resolution; the SDK ships
//!   only [`PassthroughMapper`].
//! - [`Reporter::install_panic_hook`] registers a process-wide panic hook
//!   so panics flow through the same pipeline.
//!
//! Delivery is fire-and-forget: a failed submission is logged and the
//! event is lost. A failure also leaves the handling guard set, which
//! disables reporting for the rest of the session — carried over from the
//! original implementation deliberately (see `guard`).

pub mod backtrace;
pub mod error;
pub mod guard;
mod panic_hook;
pub mod reporter;
pub mod stackmap;

pub use backtrace::capture_raw_stack;
pub use error::{ReporterError, Result};
pub use guard::HandlingGuard;
pub use reporter::{
	HandleOutcome, Reporter, ReporterBuilder, ReporterConfig, DEFAULT_COLLECTOR_URL,
};
pub use stackmap::{PassthroughMapper, StackMapper};

pub use flare_core::{BrowserInfo, ErrorEvent, Tags, UncaughtError, UserContext};
