//! Reference extraction: find file paths and URLs in raw prompt text and
//! resolve them.
//!
//! Scanning is greedy and non-overlapping. Each reference is resolved
//! best-effort: a failed read or fetch stores an error description in place
//! of the content and never aborts the prompt.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::references::{EnrichedPrompt, PendingPrompt, ReferenceMap};
use super::source::{FileSource, UrlFetcher};

static POSIX_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s"'(\[<=])(/[A-Za-z0-9_.-]+(?:/[A-Za-z0-9_.-]+)*/?)"#)
        .expect("posix path pattern is valid")
});

static WINDOWS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s"'(\[<=])([A-Za-z]:\\(?:[A-Za-z0-9_.-]+\\)*[A-Za-z0-9_.-]*)"#)
        .expect("windows path pattern is valid")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[\w-]+\.)+[\w-]+(?:/[\w\-./?%&=]*)?").expect("url pattern is valid")
});

/// Which absolute path syntax to scan for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Posix,
    Windows,
}

impl PathStyle {
    /// The style of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            PathStyle::Posix => &POSIX_PATH,
            PathStyle::Windows => &WINDOWS_PATH,
        }
    }
}

/// Resolves file and URL references in prompt text.
pub struct ReferenceExtractor<F, U> {
    files: F,
    fetcher: U,
    path_style: PathStyle,
}

impl<F: FileSource, U: UrlFetcher> ReferenceExtractor<F, U> {
    pub fn new(files: F, fetcher: U) -> Self {
        Self {
            files,
            fetcher,
            path_style: PathStyle::native(),
        }
    }

    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Scan `raw` and resolve every reference it mentions.
    pub async fn extract(&self, raw: &str) -> PendingPrompt {
        let url_spans: Vec<(usize, usize)> =
            URL.find_iter(raw).map(|m| (m.start(), m.end())).collect();

        let files = self.resolve_files(raw, &url_spans).await;
        let urls = self.resolve_urls(raw).await;

        debug!(
            files = files.len(),
            urls = urls.len(),
            "resolved prompt references"
        );
        PendingPrompt::new(raw, files, urls)
    }

    /// Scan, resolve and assemble the enriched prompt in one step.
    pub async fn enrich(&self, raw: &str) -> EnrichedPrompt {
        self.extract(raw).await.into_enriched()
    }

    async fn resolve_files(&self, raw: &str, url_spans: &[(usize, usize)]) -> ReferenceMap {
        let mut files = ReferenceMap::new();

        for caps in self.path_style.pattern().captures_iter(raw) {
            let Some(m) = caps.get(1) else { continue };
            let inside_url = url_spans
                .iter()
                .any(|&(start, end)| m.start() >= start && m.end() <= end);
            if inside_url {
                continue;
            }

            let Some(path) = self.regular_file(m.as_str()).await else {
                continue;
            };
            if files.contains_key(path) {
                continue;
            }

            match self.files.read_to_string(Path::new(path)).await {
                Ok(content) => files.insert(path, content),
                Err(e) => {
                    warn!(path, error = %e, "failed to read referenced file");
                    files.insert(path, format!("Error reading file: {e}"));
                }
            }
        }

        files
    }

    /// The candidate itself when it names a regular file, else the candidate
    /// without trailing sentence dots when that does.
    async fn regular_file<'a>(&self, candidate: &'a str) -> Option<&'a str> {
        if self.files.is_regular_file(Path::new(candidate)).await {
            return Some(candidate);
        }

        let trimmed = candidate.trim_end_matches('.');
        if trimmed.len() < candidate.len()
            && !trimmed.is_empty()
            && self.files.is_regular_file(Path::new(trimmed)).await
        {
            return Some(trimmed);
        }

        None
    }

    async fn resolve_urls(&self, raw: &str) -> ReferenceMap {
        let mut urls = ReferenceMap::new();

        for m in URL.find_iter(raw) {
            let url = m.as_str();
            if urls.contains_key(url) {
                continue;
            }

            match self.fetcher.fetch(url).await {
                Ok(body) => urls.insert(url, body),
                Err(e) => {
                    warn!(url, error = %e, "failed to fetch referenced url");
                    urls.insert(url, e.to_string());
                }
            }
        }

        urls
    }
}
