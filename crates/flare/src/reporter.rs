// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reporter client: captures uncaught errors and submits them to the
//! collector endpoint.

use std::sync::Arc;
use std::time::Duration;

use flare_core::{envelope_source, BrowserInfo, ErrorEvent, Tags, UncaughtError, UserContext};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::backtrace::capture_raw_stack;
use crate::error::{ReporterError, Result};
use crate::guard::HandlingGuard;
use crate::panic_hook::install_panic_hook;
use crate::stackmap::{PassthroughMapper, StackMapper};

/// Default collector endpoint for submitted events.
pub const DEFAULT_COLLECTOR_URL: &str =
	"https://splunk-ext.sourcegraph.com:8088/services/collector/event/1.0";

/// Authorization scheme expected by the collector.
const AUTH_SCHEME: &str = "Splunk";

/// Configuration for the reporter client.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
	/// Timeout for HTTP requests to the collector.
	pub request_timeout: Duration,
	/// Timeout for the stack-mapping capability.
	pub mapping_timeout: Duration,
}

impl Default for ReporterConfig {
	fn default() -> Self {
		Self {
			request_timeout: Duration::from_secs(30),
			mapping_timeout: Duration::from_secs(10),
		}
	}
}

/// Outcome of one uncaught-error handling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
	/// The event was delivered to the collector and the guard released.
	Submitted,
	/// A cycle was already in flight; the error was dropped silently.
	Suppressed,
	/// Mapping or delivery failed; the event is lost and the guard stays
	/// set (preserved original behavior).
	Failed,
}

/// Builder for constructing a Reporter.
pub struct ReporterBuilder {
	token: Option<String>,
	sourcetype: Option<String>,
	collector_url: Option<String>,
	location: Option<String>,
	user_agent: Option<String>,
	tags: Tags,
	user: Option<UserContext>,
	mapper: Option<Arc<dyn StackMapper>>,
	config: ReporterConfig,
}

impl ReporterBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			token: None,
			sourcetype: None,
			collector_url: None,
			location: None,
			user_agent: None,
			tags: Tags::new(),
			user: None,
			mapper: None,
			config: ReporterConfig::default(),
		}
	}

	/// Sets the collector shared-secret token (required).
	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	/// Sets the sourcetype string identifying the application (required).
	///
	/// Example: `sourcegraph-frontend`
	pub fn sourcetype(mut self, sourcetype: impl Into<String>) -> Self {
		self.sourcetype = Some(sourcetype.into());
		self
	}

	/// Overrides the collector endpoint URL.
	///
	/// Defaults to [`DEFAULT_COLLECTOR_URL`].
	pub fn collector_url(mut self, url: impl Into<String>) -> Self {
		self.collector_url = Some(url.into());
		self
	}

	/// Sets the page/process URL reported as `browser.location`.
	pub fn location(mut self, location: impl Into<String>) -> Self {
		self.location = Some(location.into());
		self
	}

	/// Overrides the user-agent string reported as `browser.userAgent`.
	///
	/// Defaults to the shared flare user agent.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	/// Sets the initial tag mapping merged into every event.
	pub fn tags(mut self, tags: Tags) -> Self {
		self.tags = tags;
		self
	}

	/// Sets the initial authenticated user.
	pub fn user(mut self, user: UserContext) -> Self {
		self.user = Some(user);
		self
	}

	/// Sets the stack-mapping capability.
	///
	/// Defaults to [`PassthroughMapper`].
	pub fn stack_mapper(mut self, mapper: impl StackMapper + 'static) -> Self {
		self.mapper = Some(Arc::new(mapper));
		self
	}

	/// Sets the HTTP request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;
		self
	}

	/// Sets the stack-mapping timeout.
	pub fn mapping_timeout(mut self, timeout: Duration) -> Self {
		self.config.mapping_timeout = timeout;
		self
	}

	/// Builds the Reporter.
	pub fn build(self) -> Result<Reporter> {
		let token = self.token.ok_or(ReporterError::MissingToken)?;
		let sourcetype = self.sourcetype.ok_or(ReporterError::MissingSourcetype)?;

		let collector_url = self
			.collector_url
			.unwrap_or_else(|| DEFAULT_COLLECTOR_URL.to_string());
		let browser = BrowserInfo {
			location: self.location.unwrap_or_default(),
			user_agent: self
				.user_agent
				.unwrap_or_else(flare_common_http::user_agent),
		};

		let http_client = flare_common_http::builder()
			.timeout(self.config.request_timeout)
			.build()
			.map_err(ReporterError::RequestFailed)?;

		let inner = Arc::new(ReporterInner {
			token,
			sourcetype,
			collector_url: collector_url.clone(),
			browser,
			http_client,
			config: self.config,
			tags: RwLock::new(self.tags),
			user: RwLock::new(self.user),
			guard: HandlingGuard::new(),
			mapper: self.mapper.unwrap_or_else(|| Arc::new(PassthroughMapper)),
		});

		info!(collector_url = %collector_url, "Reporter initialized");

		Ok(Reporter { inner })
	}
}

impl Default for ReporterBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Internal reporter state.
pub(crate) struct ReporterInner {
	token: String,
	sourcetype: String,
	collector_url: String,
	browser: BrowserInfo,
	http_client: Client,
	config: ReporterConfig,
	tags: RwLock<Tags>,
	user: RwLock<Option<UserContext>>,
	guard: HandlingGuard,
	mapper: Arc<dyn StackMapper>,
}

/// Submission envelope wrapping the event payload.
#[derive(Debug, Serialize)]
struct Envelope {
	source: String,
	sourcetype: String,
	event: Value,
}

impl ReporterInner {
	/// Handles a panic synchronously (for use in panic hooks).
	///
	/// The panic path cannot await, so the raw stack is submitted unmapped
	/// over a short-timeout blocking client. Guard semantics are identical
	/// to the async path.
	pub(crate) fn report_panic_sync(&self, err: UncaughtError, raw_stack: String) {
		if !self.guard.try_begin() {
			return;
		}

		let event = ErrorEvent {
			message: err.message,
			error: err.error,
			stack_trace: raw_stack,
			browser: self.browser.clone(),
		};
		let payload = event.to_payload(&self.tags.blocking_read());

		match self.submit_blocking(payload) {
			Ok(()) => {
				debug!("Panic reported successfully");
				self.guard.end(true);
			}
			Err(e) => {
				error!(error = %e, "Failed to report panic");
				self.guard.end(false);
			}
		}
	}

	fn submit_blocking(&self, payload: Value) -> Result<()> {
		let envelope = Envelope {
			source: envelope_source(self.user.blocking_read().as_ref()).to_string(),
			sourcetype: self.sourcetype.clone(),
			event: payload,
		};

		let client = reqwest::blocking::Client::builder()
			.timeout(Duration::from_secs(5))
			.build()
			.map_err(ReporterError::RequestFailed)?;

		let response = client
			.post(&self.collector_url)
			.header("Authorization", format!("{AUTH_SCHEME} {}", self.token))
			.header("Accept", "application/json")
			.json(&envelope)
			.send()
			.map_err(ReporterError::RequestFailed)?;

		if response.status().is_success() {
			Ok(())
		} else {
			let status = response.status().as_u16();
			let message = response.text().unwrap_or_default();
			Err(ReporterError::ServerError { status, message })
		}
	}
}

/// Client that intercepts uncaught errors and forwards them to the
/// collector endpoint, guarded against recursive re-entry.
///
/// # Example
///
/// ```ignore
/// use flare::{Reporter, UncaughtError, UserContext, Tags};
///
/// let reporter = Reporter::builder()
///     .token("D70E82E5-34CC-4DFA-A08A-E7FA115FB45B")
///     .sourcetype("sourcegraph-frontend")
///     .location("https://example.com/search")
///     .tags(Tags::new().insert("deployedCommit", "abc1234"))
///     .build()?;
///
/// // Route panics into the reporter.
/// reporter.install_panic_hook();
///
/// // Identify the user once authenticated.
/// reporter.set_user(UserContext::new("alice")).await;
///
/// // Feed the runtime's uncaught-error channel into the handler.
/// reporter
///     .handle_uncaught(UncaughtError::from_message("boom"))
///     .await;
/// ```
#[derive(Clone)]
pub struct Reporter {
	inner: Arc<ReporterInner>,
}

impl Reporter {
	/// Creates a new builder for constructing a Reporter.
	pub fn builder() -> ReporterBuilder {
		ReporterBuilder::new()
	}

	/// Installs a process-wide panic hook that reports panics through this
	/// reporter. Should be called early in startup; installing more than
	/// once is a no-op.
	pub fn install_panic_hook(&self) {
		install_panic_hook(Arc::clone(&self.inner));
		info!("Panic hook installed");
	}

	/// Handles one uncaught error from the runtime's notification channel.
	///
	/// If a handling cycle is already in flight the error is dropped
	/// silently. Otherwise the guard is taken synchronously, before the
	/// first await point, so a second error raised while this cycle is
	/// suspended cannot start an overlapping submission.
	///
	/// Failures never escape this method: mapping or delivery errors are
	/// logged and leave the guard set, disabling further reporting for the
	/// session (preserved original behavior).
	pub async fn handle_uncaught(&self, err: UncaughtError) -> HandleOutcome {
		if !self.inner.guard.try_begin() {
			// Re-entry: drop without logging so a failure inside the
			// reporting pipeline cannot feed back into itself.
			return HandleOutcome::Suppressed;
		}

		match self.report(err).await {
			Ok(()) => {
				self.inner.guard.end(true);
				HandleOutcome::Submitted
			}
			Err(e) => {
				error!(error = %e, "Failed to report uncaught error");
				self.inner.guard.end(false);
				HandleOutcome::Failed
			}
		}
	}

	/// Sets a tag merged into all subsequent events.
	pub async fn set_tag(&self, key: impl Into<String>, value: impl Into<Value>) {
		self.inner.tags.write().await.set(key, value);
	}

	/// Removes a tag.
	pub async fn remove_tag(&self, key: &str) {
		self.inner.tags.write().await.remove(key);
	}

	/// Replaces the whole tag mapping.
	pub async fn set_tags(&self, tags: Tags) {
		*self.inner.tags.write().await = tags;
	}

	/// Sets the authenticated user.
	pub async fn set_user(&self, user: UserContext) {
		*self.inner.user.write().await = Some(user);
	}

	/// Clears the authenticated user; events fall back to `"anonymous"`.
	pub async fn clear_user(&self) {
		*self.inner.user.write().await = None;
	}

	/// Returns true while a handling cycle is in flight (or stuck after a
	/// failed delivery).
	pub fn is_handling(&self) -> bool {
		self.inner.guard.is_handling()
	}

	async fn report(&self, err: UncaughtError) -> Result<()> {
		let raw_stack = capture_raw_stack();

		let mapped = tokio::time::timeout(
			self.inner.config.mapping_timeout,
			self.inner.mapper.map_stack(&raw_stack),
		)
		.await
		.map_err(|_| ReporterError::MappingTimeout)??;

		debug!(frames = mapped.len(), "Stack trace mapped");

		let event = ErrorEvent {
			message: err.message,
			error: err.error,
			stack_trace: mapped.join("\n"),
			browser: self.inner.browser.clone(),
		};
		let payload = {
			let tags = self.inner.tags.read().await;
			event.to_payload(&tags)
		};

		self.submit(payload).await
	}

	async fn submit(&self, payload: Value) -> Result<()> {
		let envelope = {
			let user = self.inner.user.read().await;
			Envelope {
				source: envelope_source(user.as_ref()).to_string(),
				sourcetype: self.inner.sourcetype.clone(),
				event: payload,
			}
		};

		debug!(url = %self.inner.collector_url, source = %envelope.source, "Submitting error event");

		let response = self
			.inner
			.http_client
			.post(&self.inner.collector_url)
			.header("Authorization", format!("{AUTH_SCHEME} {}", self.inner.token))
			.header("Accept", "application/json")
			.json(&envelope)
			.send()
			.await
			.map_err(ReporterError::RequestFailed)?;

		if response.status().is_success() {
			debug!("Error event submitted");
			Ok(())
		} else {
			let status = response.status().as_u16();
			let message = response.text().await.unwrap_or_default();
			Err(ReporterError::ServerError { status, message })
		}
	}
}
