//! Pronoun reflection.
//!
//! Captured text is echoed back from the other side of the conversation:
//! "my" becomes "your", "I am" becomes "you are". The table driving this
//! lives on the [`Script`](crate::Script) and its keys are lowercased and
//! accent-stripped at load time, matching the normalized text the engine
//! captures from.

use std::collections::HashMap;

/// Swap each word of `text` for its conversational counterpart.
///
/// Words are split on whitespace and looked up lowercased; words without a
/// table entry pass through in their original form. Output words are joined
/// with single spaces.
pub(crate) fn reflect(text: &str, table: &HashMap<String, String>) -> String {
    text.split_whitespace()
        .map(|word| match table.get(&word.to_lowercase()) {
            Some(counterpart) => counterpart.as_str(),
            None => word,
        })
        .collect::<Vec<_>>()
        .join(" ")
}
