//! Multipart request encoding for GraphQL file uploads.
//!
//! Implements the GraphQL multipart request convention: a form with an
//! `operations` field holding the operation (files replaced by `null`), a
//! `map` field pointing each file index at the `null` it replaces, and then
//! one field per file named by its index.
//!
//! Fields are always written in the order `operations`, `map`, files. Some
//! servers parse the form in a single pass and reject files that arrive
//! before the map.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::clients::errors::MultipartError;
use crate::clients::variables::{FileUpload, ListItem, VariableValue, Variables};

/// The `map` field: file index to the one dotted path it fills.
///
/// Serializes as `{"0": ["variables.f"], "1": ["variables.g.0"], ...}` with
/// keys in index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileMap {
    paths: Vec<String>,
}

impl FileMap {
    /// Returns the path for file `index`.
    #[must_use]
    pub fn path(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }

    /// Returns the number of mapped files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no files are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn push(&mut self, path: String) {
        self.paths.push(path);
    }
}

impl Serialize for FileMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.paths.len()))?;
        for (index, path) in self.paths.iter().enumerate() {
            map.serialize_entry(&index.to_string(), &[path])?;
        }
        map.end()
    }
}

/// The three ingredients of a multipart GraphQL request.
///
/// Borrowing the files from the caller's [`Variables`] keeps the caller's
/// data untouched; bytes are copied only when the form is built.
///
/// # Example
///
/// ```rust
/// use charity_admin::clients::{FileUpload, MultipartEnvelope, Variables};
/// use serde_json::json;
///
/// let variables = Variables::new()
///     .with("f", FileUpload::new("a.jpg", vec![1]))
///     .with("g", vec![FileUpload::new("b.jpg", vec![2]), FileUpload::new("c.jpg", vec![3])]);
///
/// let envelope = MultipartEnvelope::new("mutation($f: Upload!, $g: [Upload!]!) { x }", &variables);
///
/// assert_eq!(
///     serde_json::to_value(envelope.map()).unwrap(),
///     json!({"0": ["variables.f"], "1": ["variables.g.0"], "2": ["variables.g.1"]})
/// );
/// assert_eq!(envelope.operations()["variables"], json!({"f": null, "g": [null, null]}));
/// ```
#[derive(Debug)]
pub struct MultipartEnvelope<'a> {
    operations: Value,
    map: FileMap,
    files: Vec<&'a FileUpload>,
}

impl<'a> MultipartEnvelope<'a> {
    /// Builds the envelope for `query` and `variables`.
    ///
    /// File indices are assigned by walking variables in insertion order
    /// and, within a list, in element order. The counter starts at zero and
    /// is shared by all variables.
    #[must_use]
    pub fn new(query: &str, variables: &'a Variables) -> Self {
        let mut map = FileMap::default();
        let mut files = Vec::new();

        for (key, value) in variables.iter() {
            match value {
                VariableValue::Scalar(_) => {}
                VariableValue::File(file) => {
                    map.push(format!("variables.{key}"));
                    files.push(file);
                }
                VariableValue::List(items) => {
                    for (position, item) in items.iter().enumerate() {
                        if let ListItem::File(file) = item {
                            map.push(format!("variables.{key}.{position}"));
                            files.push(file);
                        }
                    }
                }
            }
        }

        let operations = serde_json::json!({
            "query": query,
            "variables": variables.to_json(),
        });

        Self {
            operations,
            map,
            files,
        }
    }

    /// Returns the `operations` JSON.
    #[must_use]
    pub const fn operations(&self) -> &Value {
        &self.operations
    }

    /// Returns the `map` field.
    #[must_use]
    pub const fn map(&self) -> &FileMap {
        &self.map
    }

    /// Returns the files in index order.
    #[must_use]
    pub fn files(&self) -> &[&'a FileUpload] {
        &self.files
    }

    /// Encodes the envelope as a `reqwest` multipart form.
    ///
    /// The boundary and the `Content-Type` header are left to `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`MultipartError::Serialize`] if `operations` or `map` cannot
    /// be serialized, or [`MultipartError::Part`] if a file's MIME type is
    /// invalid.
    pub fn into_form(self) -> Result<reqwest::multipart::Form, MultipartError> {
        let operations = serde_json::to_string(&self.operations)?;
        let map = serde_json::to_string(&self.map)?;

        let mut form = reqwest::multipart::Form::new()
            .text("operations", operations)
            .text("map", map);

        for (index, file) in self.files.into_iter().enumerate() {
            let mut part = reqwest::multipart::Part::bytes(file.bytes().to_vec())
                .file_name(file.file_name().to_string());
            if let Some(mime) = file.mime_type() {
                part = part.mime_str(mime)?;
            }
            form = form.part(index.to_string(), part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file(name: &str) -> FileUpload {
        FileUpload::new(name, name.as_bytes().to_vec())
    }

    #[test]
    fn test_map_assigns_indices_key_then_element() {
        let variables = Variables::new()
            .with("f", file("a.jpg"))
            .with("g", vec![file("b.jpg"), file("c.jpg")]);
        let envelope = MultipartEnvelope::new("q", &variables);

        assert_eq!(
            serde_json::to_value(envelope.map()).unwrap(),
            json!({"0": ["variables.f"], "1": ["variables.g.0"], "2": ["variables.g.1"]})
        );
        assert_eq!(
            envelope.operations(),
            &json!({"query": "q", "variables": {"f": null, "g": [null, null]}})
        );
    }

    #[test]
    fn test_list_paths_use_element_position() {
        let variables = Variables::new().with(
            "gallery",
            vec![
                ListItem::Scalar(json!("old.jpg")),
                ListItem::File(file("new.jpg")),
            ],
        );
        let envelope = MultipartEnvelope::new("q", &variables);

        assert_eq!(envelope.map().len(), 1);
        assert_eq!(envelope.map().path(0), Some("variables.gallery.1"));
        assert_eq!(
            envelope.operations()["variables"]["gallery"],
            json!(["old.jpg", null])
        );
    }

    #[test]
    fn test_files_follow_index_order() {
        let variables = Variables::new()
            .with("cover", file("cover.png"))
            .with("title", json!("Spring drive"))
            .with("extra", vec![file("x.png"), file("y.png")]);
        let envelope = MultipartEnvelope::new("q", &variables);

        let names: Vec<&str> = envelope.files().iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["cover.png", "x.png", "y.png"]);
    }

    #[test]
    fn test_map_serializes_keys_in_index_order() {
        let files: Vec<FileUpload> = (0..12).map(|i| file(&format!("{i}.jpg"))).collect();
        let variables = Variables::new().with("many", files);
        let envelope = MultipartEnvelope::new("q", &variables);

        let text = serde_json::to_string(envelope.map()).unwrap();
        let pos_2 = text.find("\"2\"").unwrap();
        let pos_10 = text.find("\"10\"").unwrap();
        assert!(pos_2 < pos_10);
    }

    #[test]
    fn test_caller_variables_are_untouched() {
        let variables = Variables::new().with("f", file("a.jpg"));
        let before = variables.clone();
        let _ = MultipartEnvelope::new("q", &variables);
        assert_eq!(variables, before);
    }

    #[test]
    fn test_invalid_mime_type_is_reported() {
        let variables =
            Variables::new().with("f", FileUpload::new("a.jpg", vec![1]).with_mime_type("not a mime"));
        let result = MultipartEnvelope::new("q", &variables).into_form();
        assert!(matches!(result, Err(MultipartError::Part(_))));
    }
}
