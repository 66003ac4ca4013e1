// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Raw stack capture for uncaught errors.
//!
//! Produces the plaintext stack handed to the stack-mapping capability:
//! one demangled function name per line, with runtime and standard-library
//! frames filtered out so the mapped output focuses on application code.

use rustc_demangle::demangle;

/// Captures the current call stack as newline-separated demangled frames.
pub fn capture_raw_stack() -> String {
	let bt = ::backtrace::Backtrace::new();
	let mut lines = Vec::new();

	for frame in bt.frames() {
		for symbol in frame.symbols() {
			let Some(name) = symbol.name() else {
				continue;
			};
			let demangled = match name.as_str() {
				Some(raw) => demangle(raw).to_string(),
				None => name.to_string(),
			};
			if is_app_frame(&demangled) {
				lines.push(demangled);
			}
		}
	}

	lines.join("\n")
}

/// Returns true for frames from application code, false for runtime and
/// standard-library plumbing.
fn is_app_frame(function: &str) -> bool {
	const SYSTEM_PREFIXES: &[&str] = &[
		"std::",
		"core::",
		"alloc::",
		"<std::",
		"<core::",
		"<alloc::",
		"tokio::",
		"<tokio::",
		"futures::",
		"<futures::",
		"backtrace::",
		"<backtrace::",
		"rust_begin_unwind",
		"rust_panic",
		"__rust_",
		"_rust_",
		"__libc_",
		"_start",
	];

	const SYSTEM_CONTAINS: &[&str] = &[
		"::panic::",
		"::panicking::",
		"::thread::",
		"::rt::",
		"::runtime::",
		"::sys::",
		"::sys_common::",
	];

	!SYSTEM_PREFIXES.iter().any(|p| function.starts_with(p))
		&& !SYSTEM_CONTAINS.iter().any(|c| function.contains(c))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_system_frames_are_filtered() {
		assert!(!is_app_frame("std::panicking::begin_panic"));
		assert!(!is_app_frame("core::panicking::panic"));
		assert!(!is_app_frame("tokio::runtime::Runtime::block_on"));
		assert!(!is_app_frame("rust_begin_unwind"));
	}

	#[test]
	fn test_app_frames_are_kept() {
		assert!(is_app_frame("my_app::main"));
		assert!(is_app_frame("flare::reporter::Reporter::handle_uncaught"));
		assert!(is_app_frame("foo::bar::baz"));
	}

	#[test]
	fn test_capture_does_not_panic() {
		// The exact frames depend on compilation mode and debug info; only
		// verify capture itself is safe to call.
		let _stack = capture_raw_stack();
	}
}
