//! GraphQL operation variables that may carry file uploads.
//!
//! Each variable slot is an explicit [`VariableValue`]: a plain JSON value,
//! a single [`FileUpload`], or a list mixing both. The client decides the
//! wire format by inspecting these tags instead of sniffing runtime types.
//!
//! # File Detection
//!
//! Detection is shallow. Only top-level [`VariableValue::File`] slots and
//! files directly inside a top-level [`VariableValue::List`] are uploaded.
//! A [`VariableValue::Scalar`] holds plain JSON and can never contain a file,
//! so input objects with nested uploads are not expressible.

use std::fmt;

use serde_json::Value;

/// An in-memory file to upload with an operation.
///
/// # Example
///
/// ```rust
/// use charity_admin::clients::FileUpload;
///
/// let banner = FileUpload::new("banner.png", vec![0x89, b'P', b'N', b'G'])
///     .with_mime_type("image/png");
///
/// assert_eq!(banner.file_name(), "banner.png");
/// assert_eq!(banner.mime_type(), Some("image/png"));
/// assert_eq!(banner.len(), 4);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    file_name: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload from a file name and its contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    /// Sets the MIME type sent with the file part.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Returns the file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME type, if set.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-byte file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// File contents stay out of logs.
impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One element of a [`VariableValue::List`].
#[derive(Clone, Debug, PartialEq)]
pub enum ListItem {
    /// A plain JSON value.
    Scalar(Value),
    /// A file to upload.
    File(FileUpload),
}

/// The value bound to one operation variable.
#[derive(Clone, Debug, PartialEq)]
pub enum VariableValue {
    /// Any JSON value, including objects and arrays without files.
    Scalar(Value),
    /// A single file, sent as `null` in `operations`.
    File(FileUpload),
    /// A list whose file elements are sent as `null` in `operations`.
    List(Vec<ListItem>),
}

impl VariableValue {
    /// Returns `true` if this slot holds at least one file.
    #[must_use]
    pub fn has_files(&self) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::File(_) => true,
            Self::List(items) => items.iter().any(|item| matches!(item, ListItem::File(_))),
        }
    }

    /// Returns the JSON form with every file replaced by `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::File(_) => Value::Null,
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        ListItem::Scalar(value) => value.clone(),
                        ListItem::File(_) => Value::Null,
                    })
                    .collect(),
            ),
        }
    }
}

impl From<Value> for VariableValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<FileUpload> for VariableValue {
    fn from(file: FileUpload) -> Self {
        Self::File(file)
    }
}

impl From<Vec<FileUpload>> for VariableValue {
    fn from(files: Vec<FileUpload>) -> Self {
        Self::List(files.into_iter().map(ListItem::File).collect())
    }
}

impl From<Vec<ListItem>> for VariableValue {
    fn from(items: Vec<ListItem>) -> Self {
        Self::List(items)
    }
}

/// Ordered variables for one GraphQL operation.
///
/// Insertion order is preserved because it decides the file indices of a
/// multipart upload. Setting an existing name replaces its value in place.
///
/// # Example
///
/// ```rust
/// use charity_admin::clients::{FileUpload, Variables};
/// use serde_json::json;
///
/// let variables = Variables::new()
///     .with("categoryId", json!(3))
///     .with("description", json!("Winter coats"))
///     .with("file", FileUpload::new("coats.jpg", vec![1, 2, 3]));
///
/// assert!(variables.has_files());
/// assert_eq!(variables.file_count(), 1);
/// assert_eq!(
///     variables.to_json(),
///     json!({"categoryId": 3, "description": "Winter coats", "file": null})
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variables {
    entries: Vec<(String, VariableValue)>,
}

impl Variables {
    /// Creates an empty set of variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Binds `value` to `name`, replacing a previous binding in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterates over bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if any top-level slot is file-bearing.
    #[must_use]
    pub fn has_files(&self) -> bool {
        self.entries.iter().any(|(_, value)| value.has_files())
    }

    /// Counts the files that a multipart upload would send.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, value)| match value {
                VariableValue::Scalar(_) => 0,
                VariableValue::File(_) => 1,
                VariableValue::List(items) => items
                    .iter()
                    .filter(|item| matches!(item, ListItem::File(_)))
                    .count(),
            })
            .sum()
    }

    /// Returns the JSON object sent as `variables`, files nulled out.
    ///
    /// Keys appear in insertion order when `serde_json` preserves order and
    /// sorted otherwise; GraphQL servers do not care either way.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl From<serde_json::Map<String, Value>> for Variables {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, VariableValue::Scalar(value)))
                .collect(),
        }
    }
}
