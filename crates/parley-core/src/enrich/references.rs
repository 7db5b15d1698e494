//! Reference maps and enriched prompt assembly.
//!
//! A [`PendingPrompt`] is the raw text plus everything the extractor resolved.
//! It is consumed once into an [`EnrichedPrompt`]: the raw text followed by a
//! `Files:` section and then a `URLs:` section, each entry rendered as a
//! fenced block labeled with its path or URL.

use std::fmt;

/// Insertion-ordered map from a reference (path or URL) to its content or an
/// error description.
///
/// Re-inserting an existing key keeps its original position and replaces the
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: Vec<(String, String)>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw prompt text plus the references resolved from it.
#[derive(Debug, Clone)]
pub struct PendingPrompt {
    raw: String,
    files: ReferenceMap,
    urls: ReferenceMap,
}

impl PendingPrompt {
    pub fn new(raw: impl Into<String>, files: ReferenceMap, urls: ReferenceMap) -> Self {
        Self {
            raw: raw.into(),
            files,
            urls,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn files(&self) -> &ReferenceMap {
        &self.files
    }

    pub fn urls(&self) -> &ReferenceMap {
        &self.urls
    }

    /// Assemble the enriched text. Consumes the pending prompt.
    pub fn into_enriched(self) -> EnrichedPrompt {
        let mut text = self.raw;
        append_section(&mut text, "Files:", &self.files);
        append_section(&mut text, "URLs:", &self.urls);
        EnrichedPrompt(text)
    }
}

fn append_section(text: &mut String, title: &str, entries: &ReferenceMap) {
    if entries.is_empty() {
        return;
    }
    text.push_str("\n\n");
    text.push_str(title);
    for (key, value) in entries.iter() {
        text.push('\n');
        text.push_str(key);
        text.push_str(":\n```\n");
        text.push_str(value);
        text.push_str("\n```\n");
    }
}

/// Prompt text ready to send to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedPrompt(String);

impl EnrichedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EnrichedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
