// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack-trace mapping seam.
//!
//! Source-map resolution lives outside the SDK; the reporter only depends
//! on this trait. The shipped `PassthroughMapper` returns the captured
//! stack unchanged, one line per frame.

use async_trait::async_trait;

use crate::error::Result;

/// Maps a captured raw stack into human-readable source positions.
#[async_trait]
pub trait StackMapper: Send + Sync {
	/// Given the captured stack text, produces the ordered mapped lines.
	async fn map_stack(&self, raw_stack: &str) -> Result<Vec<String>>;
}

/// A mapper that returns the raw stack lines verbatim.
///
/// Used when no source-map service is available; the stack is still
/// demangled by capture, just not mapped to original sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughMapper;

#[async_trait]
impl StackMapper for PassthroughMapper {
	async fn map_stack(&self, raw_stack: &str) -> Result<Vec<String>> {
		Ok(raw_stack.lines().map(str::to_string).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_passthrough_splits_lines() {
		let mapped = PassthroughMapper
			.map_stack("app::main\napp::run")
			.await
			.unwrap();
		assert_eq!(mapped, vec!["app::main".to_string(), "app::run".to_string()]);
	}

	#[tokio::test]
	async fn test_passthrough_empty_stack() {
		let mapped = PassthroughMapper.map_stack("").await.unwrap();
		assert!(mapped.is_empty());
	}
}
