// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reentrancy guard for the error-handling cycle.
//!
//! At most one handling cycle is in flight at a time. The flag is taken
//! synchronously before the cycle's first await point, so a second uncaught
//! error raised while the first cycle is suspended is dropped instead of
//! triggering an overlapping submission.
//!
//! The flag is released only when a cycle ends successfully. A failed
//! delivery leaves it set, which disables all further reporting for the
//! rest of the session. That behavior is carried over from the original
//! implementation; whether it is an intentional stop-after-first-failure
//! valve or a bug is an open question, so it is preserved rather than
//! fixed. See `end`.

use std::sync::atomic::{AtomicBool, Ordering};

/// Guard state for the single in-flight handling cycle.
#[derive(Debug, Default)]
pub struct HandlingGuard {
	handling: AtomicBool,
}

impl HandlingGuard {
	/// Creates a guard in the idle state.
	pub fn new() -> Self {
		Self {
			handling: AtomicBool::new(false),
		}
	}

	/// Attempts to begin a handling cycle.
	///
	/// Returns true if the cycle was started, false if one is already in
	/// flight (the caller must drop the error silently).
	pub fn try_begin(&self) -> bool {
		self.handling
			.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.is_ok()
	}

	/// Ends a handling cycle.
	///
	/// The flag is reset only on success. On failure it stays set,
	/// suppressing all future cycles for the session (preserved original
	/// behavior, exercised by tests).
	pub fn end(&self, success: bool) {
		if success {
			self.handling.store(false, Ordering::SeqCst);
		}
	}

	/// Returns true if a handling cycle is currently in flight.
	pub fn is_handling(&self) -> bool {
		self.handling.load(Ordering::SeqCst)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_begin_succeeds_when_idle() {
		let guard = HandlingGuard::new();
		assert!(!guard.is_handling());
		assert!(guard.try_begin());
		assert!(guard.is_handling());
	}

	#[test]
	fn test_second_begin_is_rejected() {
		let guard = HandlingGuard::new();
		assert!(guard.try_begin());
		assert!(!guard.try_begin());
	}

	#[test]
	fn test_end_success_releases() {
		let guard = HandlingGuard::new();
		assert!(guard.try_begin());
		guard.end(true);
		assert!(!guard.is_handling());
		assert!(guard.try_begin());
	}

	#[test]
	fn test_end_failure_stays_blocked() {
		let guard = HandlingGuard::new();
		assert!(guard.try_begin());
		guard.end(false);
		assert!(guard.is_handling());
		assert!(!guard.try_begin());
	}

	proptest! {
		// Model check: the flag tracks "a cycle began and has not ended
		// successfully since", for any interleaving of begin/end calls.
		#[test]
		fn guard_matches_model(ops in proptest::collection::vec(any::<Option<bool>>(), 0..32)) {
			let guard = HandlingGuard::new();
			let mut model_handling = false;

			for op in ops {
				match op {
					None => {
						prop_assert_eq!(guard.try_begin(), !model_handling);
						model_handling = true;
					}
					Some(success) => {
						guard.end(success);
						if success {
							model_handling = false;
						}
					}
				}
				prop_assert_eq!(guard.is_handling(), model_handling);
			}
		}
	}
}
