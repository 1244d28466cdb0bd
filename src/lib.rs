//! # post-stamp - edit timestamps for static-site posts
//!
//! Polls a posts directory (`_posts` by default), tells real content edits
//! apart from saves that only touch the modification time, and stamps the
//! edit time into the `date:` line of each edited post's front matter.
//!
//! ## Date policy
//!
//! A post named `YYYY-MM-DD-title.md` whose date lies before today is left
//! alone. Posts dated today or later, and posts without a dated name, get
//! `date: YYYY-MM-DD HH:MM:SS ±HH00` in local time.
//!
//! ## Architecture
//!
//! ```text
//! Monitor ──(every interval)──► Tracker ──(content changed)──► DateUpdater
//!                                  │                               │
//!                           DocumentWalker                 FrontMatterFormat
//! ```
//!
//! ## Modules
//!
//! - [`monitor`]: polling loop with an explicit schedule and shutdown token
//! - [`tracker`]: in-memory tracking table and change classification
//! - [`scanner`]: directory walking and content fingerprints
//! - [`stamper`]: date decision policy and file rewrite
//! - [`front_matter`]: header splitting and date line substitution
//! - [`clock`]: source of local time
//! - [`config`]: configuration file and environment overrides
//! - [`error`]: error types
//! - [`paths`]: platform config location
//!
//! ## Usage Example
//!
//! ```no_run
//! use post_stamp::config::Config;
//! use post_stamp::monitor::{Monitor, Schedule};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let mut monitor = Monitor::from_config(&config)?;
//!     let schedule = Schedule::new(config.watch.interval(), CancellationToken::new());
//!     monitor.run(&schedule).await?;
//!     Ok(())
//! }
//! ```

/// Source of the current local time
pub mod clock;

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Metadata header parsing and date line rewriting
pub mod front_matter;

/// Fixed-interval polling loop
pub mod monitor;

/// Platform-specific configuration path
pub mod paths;

/// Directory walking and content fingerprinting
pub mod scanner;

/// Date decision policy and document rewrite
pub mod stamper;

/// Change tracking across scan cycles
pub mod tracker;
