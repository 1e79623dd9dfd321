use tiktoken_rs::CoreBPE;

/// A loaded encoder able to count the tokens of a text.
pub trait Tokenizer: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

impl Tokenizer for CoreBPE {
    fn count(&self, text: &str) -> usize {
        self.encode_ordinary(text).len()
    }
}
