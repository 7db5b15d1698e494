//! Capabilities the enrichment pipeline reads references through.
//!
//! Defined here so the extractor can be exercised without touching the real
//! filesystem or network. The local filesystem and `reqwest` adapters live in
//! parley-infra.

use std::path::Path;

use parley_types::error::FetchError;

/// Read access to files named in a prompt.
pub trait FileSource: Send + Sync {
    /// Whether `path` names an existing regular (non-directory) file.
    fn is_regular_file(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;

    /// Read the whole file as UTF-8 text.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<String, std::io::Error>> + Send;
}

/// HTTP GET access to URLs named in a prompt.
pub trait UrlFetcher: Send + Sync {
    /// Fetch the body of `url`. Only a `200 OK` response counts as success.
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String, FetchError>> + Send;
}
