//! Prompt enrichment: resolve file paths and URLs mentioned in a prompt and
//! append their content.
//!
//! - [`extractor::ReferenceExtractor`] scans raw text and resolves each
//!   reference through the [`source`] capabilities.
//! - [`references`] holds the ordered reference maps and the assembly of the
//!   final enriched text.

pub mod extractor;
pub mod references;
pub mod source;

pub use extractor::{PathStyle, ReferenceExtractor};
pub use references::{EnrichedPrompt, PendingPrompt, ReferenceMap};
pub use source::{FileSource, UrlFetcher};
