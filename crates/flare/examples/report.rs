// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: report an uncaught error using the flare SDK.
//!
//! Run with:
//!   cargo run --example report -p flare

use flare::{HandleOutcome, Reporter, Tags, UncaughtError, UserContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let token =
		std::env::var("FLARE_TOKEN").expect("FLARE_TOKEN environment variable required");
	let collector_url = std::env::var("FLARE_COLLECTOR_URL")
		.unwrap_or_else(|_| flare::DEFAULT_COLLECTOR_URL.to_string());

	println!("Initializing reporter...");
	println!("  Collector URL: {}", collector_url);

	let reporter = Reporter::builder()
		.token(&token)
		.sourcetype("flare-example")
		.collector_url(&collector_url)
		.location("https://example.com/page")
		.tags(
			Tags::new()
				.insert("deployedCommit", "abc1234")
				.insert("environment", "development"),
		)
		.build()?;

	// Route panics through the reporter as well.
	reporter.install_panic_hook();

	// Identify the user.
	reporter.set_user(UserContext::new("example_user")).await;

	println!("\nReporting test error...");
	let outcome = reporter
		.handle_uncaught(UncaughtError::from_message(
			"Example test error from the flare SDK",
		))
		.await;

	match outcome {
		HandleOutcome::Submitted => println!("\nEvent submitted."),
		HandleOutcome::Suppressed => println!("\nEvent suppressed by the handling guard."),
		HandleOutcome::Failed => println!("\nDelivery failed; see logs."),
	}

	Ok(())
}
