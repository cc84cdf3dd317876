//! Answer matching shared by the session engine and the typed drill.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized expected answer (for display).
    pub expected_normalized: String,
}

/// Compare a typed answer to the expected answer, ignoring surrounding
/// whitespace and letter case.
pub fn compare_answers(typed: &str, expected: &str) -> MatchResult {
    let typed_normalized = normalize_answer(typed);
    let expected_normalized = normalize_answer(expected);

    MatchResult {
        is_correct: typed_normalized == expected_normalized,
        typed_normalized,
        expected_normalized,
    }
}

/// Trim and lower-case an answer.
pub fn normalize_answer(s: &str) -> String {
    s.trim().to_lowercase()
}
