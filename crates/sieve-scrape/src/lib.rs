//! Scrape pipeline for the Sieve parser.
//!
//! # Scope
//!
//! This crate provides:
//! - **Input providers** - file, URL, in-memory, and live-document sources
//!   behind the [`InputProvider`] trait
//! - **Pipeline** - [`Scraper`] loads markup from a provider, parses it with
//!   the configured suppression rules, and extracts nodes by class name

/// Input providers.
pub mod source;

pub use sieve_dom::{Document, Node};
pub use sieve_html::{ParserConfig, SuppressionAction, SuppressionRule};
pub use source::{
    FileSource, InlineSource, InputProvider, LiveDocumentSource, UrlSource, source_for,
};

use std::io;
use std::path::PathBuf;

use sieve_common::net::FetchError;
use sieve_common::warning::clear_warnings;
use thiserror::Error;

/// Failure to obtain markup from a provider.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    File {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A URL could not be fetched.
    #[error("failed to fetch '{url}': {source}")]
    Network {
        /// URL that was fetched.
        url: String,
        /// Underlying HTTP failure.
        #[source]
        source: FetchError,
    },
}

/// Failure of a whole load-and-parse run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The markup could not be obtained.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The markup was obtained but did not parse.
    #[error("{origin}: {source}")]
    Parse {
        /// Description of the provider the markup came from.
        origin: String,
        /// The lexing or parsing error.
        #[source]
        source: sieve_html::Error,
    },
}

/// Load, parse, and extract.
///
/// One scraper can be reused across documents; rule counters are reset for
/// every parse.
#[derive(Debug, Clone, Default)]
pub struct Scraper {
    config: ParserConfig,
}

impl Scraper {
    /// Scraper that parses with `config`.
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The parser configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read markup from `source` and parse it.
    ///
    /// Recovery warnings already reported for an earlier document are
    /// forgotten, so this document's warnings are printed again.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Load`] if the provider fails and
    /// [`ScrapeError::Parse`] if the markup is rejected.
    pub fn load(&self, source: &dyn InputProvider) -> Result<Document, ScrapeError> {
        clear_warnings();
        let markup = source.read()?;
        sieve_html::parse_with_config(&markup, self.config.clone()).map_err(|error| {
            ScrapeError::Parse {
                origin: source.describe(),
                source: error,
            }
        })
    }

    /// Every node in `document` whose class list contains `class_name`, in
    /// document order.
    #[must_use]
    pub fn extract<'d>(document: &'d Document, class_name: &str) -> Vec<&'d Node> {
        document.all_by_class(class_name)
    }

    /// The first node in `document` whose class list contains `class_name`.
    #[must_use]
    pub fn extract_first<'d>(document: &'d Document, class_name: &str) -> Option<&'d Node> {
        document.first_by_class(class_name)
    }
}
