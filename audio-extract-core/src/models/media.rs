use crate::storage::blob_store::ResourceRef;

/// A file-like byte source handed over by the file-selection surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// MIME type declared by the selection surface, if any.
    pub mime_type: Option<String>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A loaded source bound to a revocable reference the playback surface can consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    pub source_ref: ResourceRef,
    /// Display name: the file name without its last extension.
    pub label: String,
    pub file_name: String,
    /// Declared MIME type, or the sniffed container type when none was declared.
    pub mime_type: String,
    pub byte_len: usize,
}
