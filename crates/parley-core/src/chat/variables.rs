//! Session variable table.
//!
//! Variables are plain `name -> value` strings set with `:var`. Two of them
//! act as output toggles: `text` (paced text output, on unless set to
//! something other than `true`) and `voice` (speech output, off unless set
//! to `true`). Both comparisons ignore case.

use std::collections::BTreeMap;

use thiserror::Error;

/// Variable controlling paced text output.
pub const TEXT_TOGGLE: &str = "text";

/// Variable controlling speech output.
pub const VOICE_TOGGLE: &str = "voice";

/// Errors from a malformed `:var` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariableError {
    #[error("expected `name=value`, got '{0}'")]
    MissingSeparator(String),

    #[error("variable name is empty")]
    EmptyName,

    #[error("value for '{0}' is empty")]
    EmptyValue(String),
}

/// The session's variable table. Keys are unique; listing is sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `name=value` argument and upsert it.
    ///
    /// The argument is split on the first `=` and both sides are trimmed.
    /// On error the table is left unchanged.
    pub fn set_from_argument(&mut self, argument: &str) -> Result<(String, String), VariableError> {
        let (name, value) = argument
            .split_once('=')
            .ok_or_else(|| VariableError::MissingSeparator(argument.to_string()))?;

        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return Err(VariableError::EmptyName);
        }
        if value.is_empty() {
            return Err(VariableError::EmptyValue(name.to_string()));
        }

        self.set(name, value);
        Ok((name.to_string(), value.to_string()))
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
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

    /// Whether responses are printed with the typing effect.
    pub fn text_enabled(&self) -> bool {
        self.flag(TEXT_TOGGLE, true)
    }

    /// Whether responses are sent to speech synthesis.
    pub fn voice_enabled(&self) -> bool {
        self.flag(VOICE_TOGGLE, false)
    }

    fn flag(&self, name: &str, default: bool) -> bool {
        self.get(name)
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(default)
    }
}
