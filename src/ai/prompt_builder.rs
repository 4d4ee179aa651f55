/// Longest title or artist accepted into the hosted prompt.
pub const MAX_PROMPT_FIELD_LEN: usize = 200;

/// Remove control characters and hard-truncate a user-supplied field
/// before it is embedded in an instruction.
#[must_use]
pub fn sanitize_prompt_field(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .take(MAX_PROMPT_FIELD_LEN)
        .collect::<String>()
        .replace('"', "'")
        .trim()
        .to_string()
}

/// The single instruction sent to the hosted model.
#[must_use]
pub fn build_song_summary_instruction(title: &str, artist: &str) -> String {
    let title = sanitize_prompt_field(title);
    let artist = sanitize_prompt_field(artist);

    format!(
        "Provide a one-sentence summary of the song \"{title}\" by \"{artist}\", \
         and extract all the countries and cities mentioned in the song lyrics. \
         For cities, take only the name of the country they are located in. \
         Format the response as JSON in the format: \
         {{\"summary\": \"<song meaning>\", \"countries\": [\"<country>\", ...]}}. \
         If the song was not found, the summary value should be an empty string. \
         If no countries or cities are mentioned, the countries value should be an empty array. \
         Respond with the JSON object only."
    )
}
