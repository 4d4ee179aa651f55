use songsense::ai::prompt_builder::{
    MAX_PROMPT_FIELD_LEN, build_song_summary_instruction, sanitize_prompt_field,
};

#[test]
fn test_instruction_requests_fixed_json_shape() {
    let instruction = build_song_summary_instruction("Imagine", "John Lennon");
    assert!(instruction.contains("one-sentence summary"));
    assert!(instruction.contains("\"summary\""));
    assert!(instruction.contains("\"countries\""));
    assert!(instruction.contains("summary value should be an empty string"));
    assert!(instruction.contains("countries value should be an empty array"));
}

#[test]
fn test_instruction_neutralizes_quotes_in_fields() {
    let instruction = build_song_summary_instruction("Say \"hello\"", "Band");
    assert!(instruction.contains("\"Say 'hello'\" by \"Band\""));
}

#[test]
fn test_sanitize_prompt_field_truncates() {
    let long_input = "b".repeat(MAX_PROMPT_FIELD_LEN + 10);
    assert_eq!(sanitize_prompt_field(&long_input).len(), MAX_PROMPT_FIELD_LEN);
}
