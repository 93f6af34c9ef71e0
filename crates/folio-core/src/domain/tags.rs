/// Raw tag input as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagInput {
    /// Already split values; each is trimmed and empties are dropped.
    List(Vec<String>),
    /// A comma-separated string such as `"rust, web,,blog"`.
    Text(String),
}

impl From<&str> for TagInput {
    fn from(value: &str) -> Self {
        TagInput::Text(value.to_string())
    }
}

impl From<Vec<String>> for TagInput {
    fn from(values: Vec<String>) -> Self {
        TagInput::List(values)
    }
}

/// Normalize raw tags into an ordered sequence of non-empty, trimmed tags.
///
/// Order is preserved and duplicates are kept. Absent input yields no tags.
pub fn normalize_tags(input: Option<TagInput>) -> Vec<String> {
    match input {
        None => Vec::new(),
        Some(TagInput::List(values)) => values
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
        Some(TagInput::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_splits_comma_separated_text() {
        let tags = normalize_tags(Some("a, b ,, c".into()));
        assert_eq!(tags, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_trims_list_and_drops_empties() {
        let tags = normalize_tags(Some(strings(&["  rust ", "", "   ", "web"]).into()));
        assert_eq!(tags, strings(&["rust", "web"]));
    }

    #[test]
    fn test_list_elements_are_not_split() {
        let tags = normalize_tags(Some(strings(&["a,b"]).into()));
        assert_eq!(tags, strings(&["a,b"]));
    }

    #[test]
    fn test_empty_inputs_yield_no_tags() {
        assert!(normalize_tags(None).is_empty());
        assert!(normalize_tags(Some("".into())).is_empty());
        assert!(normalize_tags(Some(" , ,".into())).is_empty());
        assert!(normalize_tags(Some(TagInput::List(Vec::new()))).is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_tags(Some(" x ,y,, z , x".into()));
        let twice = normalize_tags(Some(TagInput::List(once.clone())));
        let as_text = normalize_tags(Some(TagInput::Text(once.join(","))));
        assert_eq!(once, twice);
        assert_eq!(once, as_text);
        assert_eq!(once, strings(&["x", "y", "z", "x"]));
    }
}
