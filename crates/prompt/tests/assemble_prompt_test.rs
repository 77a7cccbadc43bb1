//! Unit tests for `prompt::assemble_prompt`.
//!
//! Verifies section labels, ordering, and the empty-context placeholder.
//! External interactions: none (pure function tests).

use prompt::{
    assemble_prompt, ChatMessage, MessageRole, EMPTY_CONTEXT_PLACEHOLDER, PROMPT_PREAMBLE,
    SECTION_CONTEXT, SECTION_CONVERSATION,
};

/// **Test: Output starts with the instruction preamble and contains both section titles.**
#[test]
fn assemble_has_preamble_and_sections() {
    let out = assemble_prompt(["background"], ["hello"]);
    assert!(out.starts_with(PROMPT_PREAMBLE));
    assert!(out.contains(SECTION_CONTEXT));
    assert!(out.contains(SECTION_CONVERSATION));
}

/// **Test: Empty context emits the placeholder sentinel, not an empty section.**
#[test]
fn assemble_empty_context_uses_placeholder() {
    let out = assemble_prompt(&[] as &[&str], ["hello"]);
    assert!(out.contains(EMPTY_CONTEXT_PLACEHOLDER));
}

/// **Test: Whitespace-only context still degrades to the placeholder.**
#[test]
fn assemble_whitespace_context_uses_placeholder() {
    let out = assemble_prompt(["   ", "\n"], ["hello"]);
    assert!(out.contains(EMPTY_CONTEXT_PLACEHOLDER));
}

/// **Test: Context and transcript entries appear in insertion order, oldest first.**
#[test]
fn assemble_preserves_order_in_both_sections() {
    let out = assemble_prompt(["first context", "second context"], ["turn one", "turn two"]);
    let first = out.find("first context").unwrap();
    let second = out.find("second context").unwrap();
    assert!(first < second);
    let one = out.find("turn one").unwrap();
    let two = out.find("turn two").unwrap();
    assert!(one < two);
}

/// **Test: Context section precedes the conversation section.**
#[test]
fn assemble_context_section_before_conversation_section() {
    let out = assemble_prompt(["Patient is diabetic."], ["What should I watch for?"]);
    let ctx = out.find("Patient is diabetic.").unwrap();
    let conv = out.find("What should I watch for?").unwrap();
    assert!(ctx < conv);
}

/// **Test: An empty transcript string occupies a blank line in the conversation section.**
#[test]
fn assemble_empty_transcript_is_a_blank_line() {
    let out = assemble_prompt(&[] as &[&str], ["before", "", "after"]);
    assert!(out.ends_with("before\n\nafter"));
}

/// **Test: assemble_prompt accepts Vec<String> and Vec<&str> iterators.**
#[test]
fn assemble_accepts_string_and_str_iterators() {
    let context: Vec<String> = vec!["A".into()];
    let transcripts: Vec<&str> = vec!["B"];
    let out = assemble_prompt(&context, &transcripts);
    assert!(out.contains('A'));
    assert!(out.contains('B'));
}

/// **Test: ChatMessage constructors set the matching role.**
#[test]
fn chat_message_constructors_set_roles() {
    assert_eq!(ChatMessage::system("s").role, MessageRole::System);
    assert_eq!(ChatMessage::user("u").role, MessageRole::User);
    assert_eq!(ChatMessage::assistant("a").role, MessageRole::Assistant);
}
