//! Where raw dataset bytes come from: local files, HTTP(S) URLs, or memory.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::error::DatasetError;

/// A readable origin of raw CSV bytes.
pub trait Source: Send + Sync {
    /// Human readable locator, used in logs and errors.
    fn locator(&self) -> &str;

    /// Read the whole resource. Blocking.
    fn fetch(&self) -> Result<Vec<u8>, DatasetError>;
}

/// Lets a caller keep a handle on a source it hands to a cache.
impl<T: Source + ?Sized> Source for Arc<T> {
    fn locator(&self) -> &str {
        (**self).locator()
    }

    fn fetch(&self) -> Result<Vec<u8>, DatasetError> {
        (**self).fetch()
    }
}

// ---------------------------------------------------------------------------
// Locator parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    Remote(String),
    Local(PathBuf),
}

impl SourceLocator {
    pub fn parse(locator: &str) -> Self {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            SourceLocator::Remote(locator.to_string())
        } else {
            SourceLocator::Local(PathBuf::from(locator))
        }
    }

    /// Build the matching [`Source`]. `timeout` only applies to remote fetches.
    pub fn open(&self, timeout: Duration) -> Box<dyn Source> {
        match self {
            SourceLocator::Remote(url) => Box::new(HttpSource::new(url, timeout)),
            SourceLocator::Local(path) => Box::new(FileSource::new(path.clone())),
        }
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocator::Remote(url) => write!(f, "{url}"),
            SourceLocator::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Local file
// ---------------------------------------------------------------------------

pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

impl Source for FileSource {
    fn locator(&self) -> &str {
        &self.display
    }

    fn fetch(&self) -> Result<Vec<u8>, DatasetError> {
        debug!("reading {}", self.display);
        std::fs::read(&self.path).map_err(|e| DatasetError::unavailable(&self.display, e))
    }
}

// ---------------------------------------------------------------------------
// HTTP(S)
// ---------------------------------------------------------------------------

pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }
}

impl Source for HttpSource {
    fn locator(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<u8>, DatasetError> {
        info!("fetching {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| DatasetError::unavailable(&self.url, e))?;
        let resp = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| DatasetError::unavailable(&self.url, e))?;
        let body = resp
            .bytes()
            .map_err(|e| DatasetError::unavailable(&self.url, e))?;
        debug!("fetched {} bytes from {}", body.len(), self.url);
        Ok(body.to_vec())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Fixed bytes served from memory. Counts how often it was fetched.
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            bytes: bytes.into(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Source for MemorySource {
    fn locator(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<u8>, DatasetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.bytes.clone())
    }
}
