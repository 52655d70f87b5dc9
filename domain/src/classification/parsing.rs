//! Completion parsing for claim classification.
//!
//! These functions extract a category code and explanation from the raw text
//! a chat model produced. They are pure domain logic with no I/O, only string
//! search and character classification.
//!
//! | Function | Step |
//! |----------|------|
//! | [`isolate_answer`] | Drop the prompt echo, keep the generated answer |
//! | [`extract_category`] | First ASCII digit is the code, the rest is the explanation |

use super::result::DecodedAnswer;
use crate::core::error::DomainError;

/// Literal role name separating the echoed prompt from the generated answer.
pub const ROLE_MARKER: &str = "assistant";

/// Isolate the generated answer from a completion that echoes its prompt.
///
/// Splits on [`ROLE_MARKER`] and returns the second segment, i.e. the text
/// between the first and the second occurrence of the marker (or the end).
/// A marker occurring inside the answer itself truncates the answer there.
/// A marker inside the user's claim comes first in the echo, so the segment
/// returned is the tail of the prompt instead of the answer.
pub fn isolate_answer(raw_completion: &str) -> Result<&str, DomainError> {
    raw_completion
        .split(ROLE_MARKER)
        .nth(1)
        .ok_or(DomainError::MalformedCompletion {
            marker: ROLE_MARKER,
        })
}

/// Extract the category code and explanation from an isolated answer.
///
/// The first ASCII digit is the code; everything after it, trimmed, is the
/// explanation. Without any digit the code is absent and the explanation is
/// the whole answer, untouched.
pub fn extract_category(answer: &str) -> DecodedAnswer {
    match answer.char_indices().find(|(_, c)| c.is_ascii_digit()) {
        Some((index, digit)) => DecodedAnswer {
            category_code: digit.to_digit(10).map(|d| d as u8),
            explanation: answer[index + digit.len_utf8()..].trim().to_string(),
        },
        None => DecodedAnswer {
            category_code: None,
            explanation: answer.to_string(),
        },
    }
}
