//! Unit tests for `llm_client::mask_token`.
//!
//! Verifies that API keys are masked for logging without leaking short keys.

use llm_client::mask_token;

/// **Test: A long key shows the first 7 and last 4 characters around "***".**
#[test]
fn long_key_shows_head_and_tail() {
    let masked = mask_token("sk-abcd1234efgh5678ijkl");
    assert_eq!(masked, "sk-abcd***ijkl");
}

/// **Test: Keys of 11 characters or fewer are fully masked.**
#[test]
fn short_key_is_fully_masked() {
    assert_eq!(mask_token("short"), "***");
    assert_eq!(mask_token("elevenchars"), "***");
}

/// **Test: A 12-character key is the shortest that keeps head and tail.**
#[test]
fn twelve_char_key_keeps_head_and_tail() {
    assert_eq!(mask_token("abcdefgh1234"), "abcdefg***1234");
}

/// **Test: The empty string is fully masked.**
#[test]
fn empty_key_is_fully_masked() {
    assert_eq!(mask_token(""), "***");
}
