// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-wide panic hook that routes panics into the reporter.
//!
//! This is the Rust-native registration onto the uncaught-error channel:
//! panics reach the reporter through the same guard and submission
//! semantics as errors fed to `handle_uncaught`. The previous hook still
//! runs afterwards, so default panic output is preserved.

use std::panic;
use std::sync::{Arc, Once};

use flare_core::UncaughtError;

use crate::backtrace::capture_raw_stack;
use crate::reporter::ReporterInner;

static HOOK: Once = Once::new();

/// Installs the panic hook. Subsequent calls are no-ops; the first
/// reporter to install wins.
pub(crate) fn install_panic_hook(inner: Arc<ReporterInner>) {
	HOOK.call_once(|| {
		let previous = panic::take_hook();
		panic::set_hook(Box::new(move |info| {
			let message = info
				.payload()
				.downcast_ref::<&str>()
				.map(|s| s.to_string())
				.or_else(|| info.payload().downcast_ref::<String>().cloned())
				.unwrap_or_else(|| "panic".to_string());

			let (source, line, column) = info
				.location()
				.map(|loc| (loc.file().to_string(), loc.line(), loc.column()))
				.unwrap_or_default();

			let err = UncaughtError {
				message,
				source,
				line,
				column,
				error: None,
			};

			// Capture before handing off; the hook must not panic itself.
			let raw_stack = capture_raw_stack();
			inner.report_panic_sync(err, raw_stack);

			previous(info);
		}));
	});
}
