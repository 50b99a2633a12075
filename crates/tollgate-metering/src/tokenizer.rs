use tiktoken_rs::CoreBPE;
use tollgate_core::{Tokenizer, TokenizerError};

/// Default tokenizer backed by the `o200k_base` encoding
///
/// One encoding for every backend: unit counts feed admission estimates
/// and pricing blocks, where encoding differences between vendors are
/// noise compared to the 1k-unit pricing granularity.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Load the encoding
    ///
    /// # Errors
    ///
    /// Returns an error if the encoding tables fail to load; callers
    /// fall back to the meter's word-count approximation
    pub fn new() -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::o200k_base().map_err(|e| TokenizerError(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count(&self, text: &str, _backend_id: &str) -> Result<u64, TokenizerError> {
        Ok(self.bpe.encode_with_special_tokens(text).len() as u64)
    }
}

impl std::fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenTokenizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_stable() {
        let tokenizer = TiktokenTokenizer::new().unwrap();
        let first = tokenizer.count("hello world", "gpt-basic").unwrap();
        assert!(first > 0);
        assert_eq!(tokenizer.count("hello world", "gpt-basic").unwrap(), first);
    }

    #[test]
    fn empty_text_counts_zero() {
        let tokenizer = TiktokenTokenizer::new().unwrap();
        assert_eq!(tokenizer.count("", "gpt-basic").unwrap(), 0);
    }
}
