pub mod color_utils;
pub mod str_utils;

/// Lowercased suggestion query, or `None` when there is nothing to ask for.
pub fn normalize_suggestion_query(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    Some(input.to_lowercase())
}
