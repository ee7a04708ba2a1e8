use std::fs;
use std::path::PathBuf;

use sieve_common::net::{fetch_text, is_remote};

use crate::LoadError;

/// Where markup comes from.
///
/// The parser itself never touches the filesystem or the network; the
/// driver is handed one of these and asks it for the text.
pub trait InputProvider {
    /// Short human-readable name of the source, used in error messages.
    fn describe(&self) -> String;

    /// Produce the markup.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the markup cannot be obtained.
    fn read(&self) -> Result<String, LoadError>;
}

/// Markup read from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InputProvider for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::File {
            path: self.path.clone(),
            source,
        })
    }
}

/// Markup fetched over HTTP(S) with a blocking GET.
#[derive(Debug, Clone)]
pub struct UrlSource {
    url: String,
}

impl UrlSource {
    /// Source fetching `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl InputProvider for UrlSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn read(&self) -> Result<String, LoadError> {
        fetch_text(&self.url).map_err(|source| LoadError::Network {
            url: self.url.clone(),
            source,
        })
    }
}

/// Markup already held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    label: String,
    markup: String,
}

impl InlineSource {
    /// Source yielding `markup`, described as `<inline>`.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self::labelled("<inline>", markup)
    }

    /// Source yielding `markup`, described as `label`.
    #[must_use]
    pub fn labelled(label: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            markup: markup.into(),
        }
    }
}

impl InputProvider for InlineSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn read(&self) -> Result<String, LoadError> {
        Ok(self.markup.clone())
    }
}

/// The serialized inner markup of a live document's root element.
///
/// A browser hands out the root's inner markup without the root tag itself,
/// so the source re-wraps it in `<html>...</html>` before parsing.
#[derive(Debug, Clone)]
pub struct LiveDocumentSource {
    inner_markup: String,
}

impl LiveDocumentSource {
    /// Source wrapping `inner_markup`.
    #[must_use]
    pub fn new(inner_markup: impl Into<String>) -> Self {
        Self {
            inner_markup: inner_markup.into(),
        }
    }
}

impl InputProvider for LiveDocumentSource {
    fn describe(&self) -> String {
        String::from("<live document>")
    }

    fn read(&self) -> Result<String, LoadError> {
        Ok(format!("<html>{}</html>", self.inner_markup))
    }
}

/// Pick a source for a command-line location: `http://` and `https://` URLs
/// are fetched, anything else is read as a file path.
#[must_use]
pub fn source_for(location: &str) -> Box<dyn InputProvider> {
    if is_remote(location) {
        Box::new(UrlSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}
