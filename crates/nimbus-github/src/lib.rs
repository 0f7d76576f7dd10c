//! GitHub REST API client for nimbus-bot.
//!
//! [`GitHubClient`] implements [`nimbus_protocols::IssueTracker`] over
//! `reqwest`. Failed calls are reported as [`nimbus_protocols::TrackerError`]
//! and never retried.

mod client;
mod tracker;

pub use client::{Credentials, DEFAULT_API_URL, GitHubClient};
