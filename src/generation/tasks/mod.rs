pub mod document_review_task;
pub mod profile_extraction_task;

/// Locates the JSON object embedded in a model response.
///
/// Model output frequently wraps JSON in markdown fences or surrounds it
/// with prose. This strips any fences and cuts down to the outermost brace
/// pair; returns `None` when no object-shaped region exists at all.
pub fn extract_json_object(response: &str) -> Option<&str> {
    let cleaned = response
        .trim()
        .strip_prefix("```json")
        .unwrap_or(response)
        .strip_prefix("```")
        .unwrap_or(response)
        .strip_suffix("```")
        .unwrap_or(response)
        .trim();

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&cleaned[start..=end])
}
