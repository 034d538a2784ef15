//! Helpers for form-style payloads where a blank text field means "no value".

/// Trim a submitted text value, mapping blank to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Merge an optional text field from an edit form: absent keeps the stored
/// value, blank clears it, anything else replaces it.
pub fn merge_text(current: Option<String>, submitted: Option<String>) -> Option<String> {
    match submitted {
        None => current,
        Some(value) => non_blank(Some(value)),
    }
}

/// Merge a nullable reference: absent keeps, explicit `null` clears
pub fn merge_ref<T>(current: Option<T>, submitted: Option<Option<T>>) -> Option<T> {
    submitted.unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  hi ".to_string())), Some("hi".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_merge_text() {
        let stored = Some("old".to_string());
        assert_eq!(merge_text(stored.clone(), None), stored);
        assert_eq!(merge_text(stored.clone(), Some(String::new())), None);
        assert_eq!(
            merge_text(stored, Some("new".to_string())),
            Some("new".to_string())
        );
    }

    #[test]
    fn test_merge_ref() {
        assert_eq!(merge_ref(Some(3), None), Some(3));
        assert_eq!(merge_ref(Some(3), Some(None)), None);
        assert_eq!(merge_ref(None, Some(Some(7))), Some(7));
    }
}
