//! URL decomposition for snippets that need host, port and path separately.
//!
//! The Node snippet cannot pass a URL string to `http.request()`, so the URL
//! is split into its host, port and path here. Successful decompositions are
//! memoized in a bounded LRU cache keyed by the exact input string.

use lru::LruCache;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use url::Url;

/// Default number of URLs kept by the process-wide cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Host, port and path of a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlDetails {
    /// Percent-decoded path with the raw query string (including `?`) appended.
    pub path: String,
    /// Explicit port, or the scheme default (443 for `https`, 80 otherwise).
    /// `None` when nothing could be derived from the input.
    pub port: Option<u16>,
    /// Percent-decoded host name.
    pub host_value: String,
}

impl UrlDetails {
    /// Decomposes `url` without touching any cache.
    ///
    /// Never fails: input that is not an absolute URL yields either a
    /// path-only result (for input starting with `/`) or empty defaults.
    pub fn parse(url: &str) -> Self {
        Self::parse_absolute(url).unwrap_or_else(|| Self::fallback(url))
    }

    /// Decomposes `url` if it parses as an absolute URL.
    ///
    /// # Arguments
    ///
    /// * `url` - Input URL, e.g. `https://domain.com/path?a=b`
    ///
    /// # Returns
    ///
    /// `None` when the input is empty or not absolute. Host-less absolute
    /// URLs such as `file:///tmp/x` or `mailto:a@b.c` still yield `Some`.
    pub fn parse_absolute(url: &str) -> Option<Self> {
        if url.is_empty() {
            return None;
        }
        let parsed = Url::parse(url).ok()?;

        let host_value = parsed
            .host_str()
            .map(|host| percent_decode_str(host).decode_utf8_lossy().into_owned())
            .unwrap_or_default();

        // Explicit port wins; otherwise the scheme default
        let port = parsed.port().unwrap_or(match parsed.scheme() {
            "https" => 443,
            _ => 80,
        });

        let mut path = match parsed.path() {
            "" => "/".to_string(),
            raw => percent_decode_str(raw).decode_utf8_lossy().into_owned(),
        };
        // The query is appended raw, only the path is decoded
        if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
            path.push('?');
            path.push_str(query);
        }

        Some(Self {
            path,
            port: Some(port),
            host_value,
        })
    }

    fn fallback(url: &str) -> Self {
        // Relative paths keep the whole input as path
        if url.starts_with('/') {
            return Self {
                path: url.to_string(),
                port: Some(80),
                host_value: String::new(),
            };
        }
        Self::default()
    }

    /// Returns the port as snippet text, empty when unknown.
    pub fn port_text(&self) -> String {
        self.port.map(|p| p.to_string()).unwrap_or_default()
    }
}

/// A bounded memo of [`UrlDetails`] keyed by the exact URL string.
///
/// Every input that parses as an absolute URL is stored, with or without a
/// host; fallback results are recomputed on every call.
#[derive(Debug)]
pub struct UrlDetailsCache {
    entries: LruCache<String, Arc<UrlDetails>>,
}

impl UrlDetailsCache {
    /// Creates a cache holding at most `capacity` URLs (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity_of(capacity)),
        }
    }

    /// Returns the details for `url`, computing and storing them on a miss.
    pub fn details(&mut self, url: &str) -> Arc<UrlDetails> {
        if let Some(hit) = self.entries.get(url) {
            return Arc::clone(hit);
        }

        match UrlDetails::parse_absolute(url) {
            Some(details) => {
                log::debug!("Caching URL details for {}", url);
                let details = Arc::new(details);
                self.entries.put(url.to_string(), Arc::clone(&details));
                details
            }
            None => Arc::new(UrlDetails::fallback(url)),
        }
    }

    /// Changes the capacity, evicting least recently used entries if needed.
    pub fn resize(&mut self, capacity: usize) {
        self.entries.resize(capacity_of(capacity));
    }

    /// Number of cached URLs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for UrlDetailsCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn capacity_of(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

/// Process-wide cache shared by every snippet.
static URL_CACHE: Lazy<Mutex<UrlDetailsCache>> = Lazy::new(|| {
    Mutex::new(UrlDetailsCache::new(
        crate::config::get_config().url_cache_capacity,
    ))
});

/// Returns the host, port and path of `url` using the process-wide cache.
///
/// Repeated calls with the same absolute URL return the same `Arc` for as
/// long as the entry stays in the cache.
pub fn url_details(url: &str) -> Arc<UrlDetails> {
    match URL_CACHE.lock() {
        Ok(mut cache) => cache.details(url),
        Err(_) => Arc::new(UrlDetails::parse(url)),
    }
}

/// Applies a new capacity to the process-wide cache.
pub fn set_url_cache_capacity(capacity: usize) {
    if let Ok(mut cache) = URL_CACHE.lock() {
        cache.resize(capacity);
    }
}

/// Empties the process-wide cache.
pub fn clear_url_cache() {
    if let Ok(mut cache) = URL_CACHE.lock() {
        cache.clear();
    }
}
