use thiserror::Error;

/// Errors from fetching a URL referenced in a prompt.
///
/// The `Display` text of these errors is stored in the enrichment map in
/// place of the page body, so it is written for the model to read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error accessing {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Error accessing {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Error accessing {url}: invalid response body: {message}")]
    Body { url: String, message: String },
}

/// Errors from loading the chat configuration or building a backend from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("unknown vendor: '{0}'")]
    UnknownVendor(String),

    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors from the speech synthesis collaborator.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech synthesizer '{0}' is not available")]
    Unavailable(String),

    #[error("speech synthesizer exited with status {0}")]
    Failed(i32),
}
