//! Text filtering for selector caches.

/// A case-insensitive AND query.
///
/// The query text is split on whitespace; a label matches when it contains
/// every token as a substring, ignoring case. A query without tokens matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    tokens: Vec<String>,
}

impl FilterQuery {
    /// Parses query text into lower-cased tokens.
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// Returns the lower-cased tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns `true` if the query has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns `true` if `text` contains every token.
    pub fn matches(&self, text: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let text = text.to_lowercase();
        self.tokens.iter().all(|token| text.contains(token.as_str()))
    }
}
