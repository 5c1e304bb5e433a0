//! Token budget estimation
//!
//! A constant-ratio proxy for token counts (~4 characters per token). This is an
//! admission-control gate in front of provider calls, not a billing-accurate
//! tokenizer.

/// Default input budget: a 4096-token window minus 1000 tokens reserved for
/// the prompt template and the response.
pub const INPUT_TOKEN_BUDGET: usize = 3096;

const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `text` as `floor(chars / 4)`.
///
/// # Examples
///
/// ```
/// use arbor::tokens::estimate_tokens;
///
/// assert_eq!(estimate_tokens("abcdefgh"), 2);
/// assert_eq!(estimate_tokens("abc"), 0);
/// ```
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Admission gate comparing estimated tokens against a fixed input limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    limit: usize,
}

impl TokenBudget {
    pub fn new(limit: usize) -> Self {
        TokenBudget { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// True when `estimate_tokens(text) <= limit`.
    pub fn admits(&self, text: &str) -> bool {
        estimate_tokens(text) <= self.limit
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::new(INPUT_TOKEN_BUDGET)
    }
}
