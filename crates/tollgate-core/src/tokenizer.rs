/// Tokenizer failure
///
/// Never fails a request: the usage meter degrades to a word-count
/// approximation when counting is unavailable.
#[derive(Debug, thiserror::Error)]
#[error("tokenizer unavailable: {0}")]
pub struct TokenizerError(pub String);

/// Counts billable units in raw text for a given backend
pub trait Tokenizer: Send + Sync {
    /// Count units in `text` using the encoding appropriate for
    /// `backend_id`
    fn count(&self, text: &str, backend_id: &str) -> Result<u64, TokenizerError>;
}
