//! Common utilities for the Sieve scraper.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - colored, deduplicated terminal output for recovered input
//! - **Networking** - blocking HTTP fetch for remote documents

pub mod net;
pub mod warning;
