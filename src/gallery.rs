//! Post gallery fields.
//!
//! The server stores a post's gallery as a JSON array of filenames inside a
//! string column, and already-stored rows include values whose closing
//! bracket was cut off or that are not arrays at all. [`parse_gallery`]
//! recovers whatever filenames it can and never fails.
//!
//! # Recovery Steps
//!
//! 1. An actual JSON array is returned unchanged.
//! 2. A string that does not end in `]` is repaired: everything after the
//!    last `"` is dropped and `]` appended, or `"]` is appended when the
//!    string has no quote at all.
//! 3. The (repaired) string is parsed; an array is returned, anything else
//!    yields an empty list.
//! 4. If parsing fails, the raw string is scanned for image filenames
//!    (`.jpg`, `.jpeg`, `.png`, `.webp`, any case).
//!
//! # Example
//!
//! ```rust
//! use charity_admin::gallery::parse_gallery;
//! use serde_json::json;
//!
//! assert_eq!(parse_gallery(&json!(r#"["a.jpg","b.png"]"#)), vec![json!("a.jpg"), json!("b.png")]);
//! assert_eq!(parse_gallery(&json!(r#"["a.jpg","b.png"#)), vec![json!("a.jpg"), json!("b.png")]);
//! assert!(parse_gallery(&json!(null)).is_empty());
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::config::UploadsBaseUrl;

fn image_filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)[\w.\-]+\.(?:jpe?g|png|webp)\b").expect("image filename pattern is valid")
    })
}

/// Coerces a gallery field of any shape into a list.
///
/// Arrays come back unchanged, so `parse_gallery(&Value::Array(parse_gallery(v)))`
/// equals `parse_gallery(v)`.
#[must_use]
pub fn parse_gallery(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::String(raw) => parse_gallery_str(raw),
        _ => Vec::new(),
    }
}

/// Coerces a raw gallery string into a list.
#[must_use]
pub fn parse_gallery_str(raw: &str) -> Vec<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let candidate = if trimmed.ends_with(']') {
        trimmed.to_string()
    } else {
        let repaired = repair_unterminated(trimmed);
        tracing::debug!("Repaired unterminated gallery value to {}", repaired);
        repaired
    };

    match serde_json::from_str::<Value>(&candidate) {
        Ok(Value::Array(items)) => items,
        Ok(_) => Vec::new(),
        Err(e) => {
            let found = scan_image_filenames(raw);
            tracing::debug!(
                "Gallery value is not valid JSON ({}); recovered {} filename(s) by scanning",
                e,
                found.len()
            );
            found.into_iter().map(Value::String).collect()
        }
    }
}

/// Closes an array whose final `]` was lost.
fn repair_unterminated(trimmed: &str) -> String {
    trimmed.rfind('"').map_or_else(
        || format!("{trimmed}\"]"),
        |last_quote| format!("{}]", &trimmed[..=last_quote]),
    )
}

/// Returns every image filename found in `raw`, in order of appearance.
#[must_use]
pub fn scan_image_filenames(raw: &str) -> Vec<String> {
    image_filename_pattern()
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Returns the string entries of a gallery field.
///
/// Non-string array elements are skipped.
#[must_use]
pub fn gallery_filenames(value: &Value) -> Vec<String> {
    parse_gallery(value)
        .into_iter()
        .filter_map(|item| match item {
            Value::String(name) if !name.trim().is_empty() => Some(name),
            _ => None,
        })
        .collect()
}

/// Resolves a gallery field to public image URLs.
///
/// # Example
///
/// ```rust
/// use charity_admin::gallery::gallery_urls;
/// use charity_admin::UploadsBaseUrl;
/// use serde_json::json;
///
/// let urls = gallery_urls(&json!(r#"["a.jpg"]"#), &UploadsBaseUrl::default());
/// assert_eq!(urls, vec!["http://localhost:4000/uploads/posts/a.jpg"]);
/// ```
#[must_use]
pub fn gallery_urls(value: &Value, uploads: &UploadsBaseUrl) -> Vec<String> {
    gallery_filenames(value)
        .iter()
        .map(|name| uploads.post_image_url(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| json!(s)).collect()
    }

    #[test]
    fn test_well_formed_string_parses() {
        assert_eq!(
            parse_gallery_str(r#"["a.jpg","b.png"]"#),
            strings(&["a.jpg", "b.png"])
        );
    }

    #[test]
    fn test_truncated_string_recovers_both_names() {
        assert_eq!(
            parse_gallery_str(r#"["a.jpg","b.png"#),
            strings(&["a.jpg", "b.png"])
        );
    }

    #[test]
    fn test_missing_bracket_only_is_repaired() {
        assert_eq!(
            parse_gallery_str(r#"["a.jpg","b.png""#),
            strings(&["a.jpg", "b.png"])
        );
    }

    #[test]
    fn test_whitespace_is_trimmed_before_repair() {
        assert_eq!(
            parse_gallery_str("  [\"a.jpg\"  \n"),
            strings(&["a.jpg"])
        );
    }

    #[test]
    fn test_garbage_falls_back_to_extension_scan() {
        let result = parse_gallery_str("not json but a.jpg and b.PNG here");
        assert_eq!(result, strings(&["a.jpg", "b.PNG"]));
    }

    #[test]
    fn test_scan_matches_all_extensions() {
        let found = scan_image_filenames("x.JPEG, y.webp; z.Jpg and notes.txt");
        assert_eq!(found, vec!["x.JPEG", "y.webp", "z.Jpg"]);
    }

    #[test]
    fn test_scan_takes_image_name_out_of_longer_name() {
        // Best effort: the match stops at the word boundary after the extension.
        let found = scan_image_filenames("photo.jpg.bak, c.jpeg");
        assert_eq!(found, vec!["photo.jpg", "c.jpeg"]);
    }

    #[test]
    fn test_garbage_without_images_is_empty() {
        assert!(parse_gallery_str("completely unrelated text").is_empty());
    }

    #[test]
    fn test_non_array_json_is_empty() {
        assert!(parse_gallery_str(r#"{"a": 1}"#).is_empty());
        assert!(parse_gallery_str("[1, 2]x]").is_empty());
    }

    #[test]
    fn test_empty_and_non_string_inputs_are_empty() {
        assert!(parse_gallery(&json!("")).is_empty());
        assert!(parse_gallery(&json!("   ")).is_empty());
        assert!(parse_gallery(&json!(null)).is_empty());
        assert!(parse_gallery(&json!(42)).is_empty());
        assert!(parse_gallery(&json!(true)).is_empty());
        assert!(parse_gallery(&json!({"gallery": []})).is_empty());
    }

    #[test]
    fn test_array_input_is_returned_unchanged() {
        let value = json!(["a.jpg", 7, null]);
        assert_eq!(parse_gallery(&value), vec![json!("a.jpg"), json!(7), json!(null)]);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        for raw in [
            r#"["a.jpg","b.png"]"#,
            r#"["a.jpg","b.png"#,
            "not json but a.jpg and b.PNG here",
            "",
        ] {
            let once = parse_gallery(&json!(raw));
            let twice = parse_gallery(&Value::Array(once.clone()));
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn test_repair_without_any_quote() {
        assert_eq!(repair_unterminated("[abc"), "[abc\"]");
        assert_eq!(repair_unterminated(r#"["a","b"#), r#"["a","]"#);
    }

    #[test]
    fn test_gallery_filenames_skips_non_strings() {
        let names = gallery_filenames(&json!(["a.jpg", 3, "", "b.png"]));
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_gallery_urls_resolve_against_uploads_base() {
        let uploads = UploadsBaseUrl::new("https://cdn.example.org").unwrap();
        let urls = gallery_urls(&json!(r#"["a.jpg","b.png"#), &uploads);
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.org/uploads/posts/a.jpg",
                "https://cdn.example.org/uploads/posts/b.png",
            ]
        );
    }
}
