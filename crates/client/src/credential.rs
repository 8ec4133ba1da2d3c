//! Tenant credential handling.

use std::fmt;

/// Shortest credential for which a partial reveal is still safe.
const PARTIAL_REVEAL_MIN_LEN: usize = 13;
const REVEAL_CHARS: usize = 4;

/// A tenant's API key for the Desk API.
///
/// `Debug` and `Display` never print the secret; use [`Credential::redacted`]
/// when a value has to show up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw secret. Only the HTTP transport should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form: first and last four characters for long keys, fully
    /// masked otherwise.
    pub fn redacted(&self) -> String {
        redact(&self.0)
    }
}

/// Mask an arbitrary secret the same way [`Credential::redacted`] does.
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < PARTIAL_REVEAL_MIN_LEN {
        return "****".to_string();
    }
    let head: String = chars[..REVEAL_CHARS].iter().collect();
    let tail: String = chars[chars.len() - REVEAL_CHARS..].iter().collect();
    format!("{head}...{tail}")
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
