//! Summarization Oracle
//!
//! The single capability the summarizer depends on: turn a content string into
//! a one-sentence summary, guided by a one-shot example. Failures never abort a
//! run; call sites log them and carry on with an empty summary.

pub mod prompt;
pub mod provider;

pub use prompt::{build_prompt, load_example_prompt, resolve_prompt_path, DEFAULT_EXAMPLE_PROMPT};
pub use provider::ProviderOracle;

use crate::error::OracleError;

/// Produces a one-sentence summary of `content` in the style of `example`.
pub trait SummaryOracle {
    fn summarize(&self, content: &str, example: &str) -> Result<String, OracleError>;
}

impl<O: SummaryOracle + ?Sized> SummaryOracle for &O {
    fn summarize(&self, content: &str, example: &str) -> Result<String, OracleError> {
        (**self).summarize(content, example)
    }
}

impl<O: SummaryOracle + ?Sized> SummaryOracle for Box<O> {
    fn summarize(&self, content: &str, example: &str) -> Result<String, OracleError> {
        (**self).summarize(content, example)
    }
}

/// Call the oracle, mapping any failure to an empty summary.
///
/// Returns the error alongside so callers can count failures.
pub fn summarize_or_empty(
    oracle: &dyn SummaryOracle,
    content: &str,
    example: &str,
) -> (String, Option<OracleError>) {
    match oracle.summarize(content, example) {
        Ok(summary) => (summary.trim().to_string(), None),
        Err(e) => {
            tracing::warn!(error = %e, "Error during summarization call");
            (String::new(), Some(e))
        }
    }
}
