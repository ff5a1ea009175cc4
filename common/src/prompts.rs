//! Prompt defaults
//!
//! The backend sends the prompt verbatim ahead of each row's combined
//! title/abstract/claims text, so it should ask for a JSON object carrying
//! the fields the summary view reads.

use crate::view::SUMMARY_KEYS;

/// Initial system instruction shown in the prompt editor
pub const DEFAULT_PROMPT: &str = "You are a patent analysis expert. Respond only in valid JSON format with fields: relevance_score, reasoning, follow_up_recommended, SUMMARY.";

/// Whether a prompt mentions every field the summary view needs
///
/// Used to warn (not block) when a custom prompt drops one of them.
pub fn missing_summary_fields(prompt: &str) -> Vec<&'static str> {
    SUMMARY_KEYS
        .iter()
        .copied()
        .filter(|key| !prompt.contains(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_covers_summary_fields() {
        assert!(missing_summary_fields(DEFAULT_PROMPT).is_empty());
    }

    #[test]
    fn test_custom_prompt_missing_fields() {
        let missing = missing_summary_fields("Score relevance_score and write a SUMMARY");
        assert_eq!(missing, vec!["reasoning", "follow_up_recommended"]);
    }
}
