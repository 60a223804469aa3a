use bytes::Bytes;

/// A file picked in the receipt input.
///
/// `content_type` is the MIME type declared by the picker; it is `None` when
/// the picker did not provide one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }

    /// File with no declared type
    pub fn untyped(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}
