//! Filesystem adapters for Parley.
//!
//! Implements the `FileSource` trait from `parley-core` over `tokio::fs`,
//! and resolves the data directory and history file locations.

use std::path::{Path, PathBuf};

use parley_core::enrich::FileSource;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PARLEY_DATA_DIR";

/// Local filesystem implementation of [`FileSource`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSource;

impl LocalFileSource {
    pub fn new() -> Self {
        Self
    }
}

impl FileSource for LocalFileSource {
    async fn is_regular_file(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        tokio::fs::read_to_string(path).await
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `PARLEY_DATA_DIR` environment variable
/// 2. `~/.parley`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".parley");
    }

    PathBuf::from(".parley")
}

/// Line-editor history file: `~/.parley_history`.
pub fn history_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".parley_history"))
        .unwrap_or_else(|| PathBuf::from(".parley_history"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_regular_file_is_detected() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("note.txt");
        tokio::fs::write(&file_path, "hello").await.unwrap();

        let fs = LocalFileSource::new();
        assert!(fs.is_regular_file(&file_path).await);
        assert_eq!(fs.read_to_string(&file_path).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_directory_is_not_a_regular_file() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSource::new();
        assert!(!fs.is_regular_file(dir.path()).await);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_a_regular_file() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSource::new();
        let missing = dir.path().join("nope.txt");
        assert!(!fs.is_regular_file(&missing).await);
        assert!(fs.read_to_string(&missing).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_enrichment_reads_real_file() {
        use parley_core::enrich::{PathStyle, ReferenceExtractor};

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("note.txt");
        tokio::fs::write(&file_path, "hello").await.unwrap();
        let path = file_path.to_string_lossy().into_owned();

        let fetcher = crate::http::ReqwestFetcher::new(std::time::Duration::from_secs(1)).unwrap();
        let extractor =
            ReferenceExtractor::new(LocalFileSource::new(), fetcher).with_path_style(PathStyle::Posix);
        let enriched = extractor.enrich(&format!("Check {path} please")).await;

        assert!(
            enriched
                .as_str()
                .ends_with(&format!("\n\nFiles:\n{path}:\n```\nhello\n```\n"))
        );
    }

    #[test]
    fn test_history_path_file_name() {
        assert!(history_path().ends_with(".parley_history"));
    }
}
