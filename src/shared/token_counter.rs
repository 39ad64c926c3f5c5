//! Whitespace-based token estimation for generation metrics.
//!
//! This is a deliberately coarse approximation, not a tokenizer: the
//! estimate only feeds the metrics block of a generation response, where
//! rough numbers are good enough and no provider-specific tokenizer is
//! worth the dependency.

pub struct TokenCounter;

impl TokenCounter {
    /// Estimate token count as the number of whitespace-separated words.
    pub fn estimate_tokens(text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Combined estimate for one generation call: prompt plus raw
    /// backend response.
    pub fn estimate_call(prompt: &str, response: &str) -> usize {
        Self::estimate_tokens(prompt) + Self::estimate_tokens(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(TokenCounter::estimate_tokens(""), 0);
        assert_eq!(TokenCounter::estimate_tokens("   "), 0);
        assert_eq!(TokenCounter::estimate_tokens("one"), 1);
        assert_eq!(TokenCounter::estimate_tokens("one two  three\nfour"), 4);
    }

    #[test]
    fn test_estimate_call_sums_both_sides() {
        assert_eq!(TokenCounter::estimate_call("a b c", "d e"), 5);
        assert_eq!(TokenCounter::estimate_call("", "[]"), 1);
    }
}
