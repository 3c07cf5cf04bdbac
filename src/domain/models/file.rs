use bytes::Bytes;

/// Extension used when a filename carries no usable dot-segment.
pub const FALLBACK_EXTENSION: &str = ".bin";

#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Bytes,
    pub filename: String,
    pub mime_type: Option<String>,
}

impl FileData {
    pub fn new(content: Bytes, filename: String, mime_type: Option<String>) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Stored extension, dot included, taken from the final dot-segment of the
    /// client-supplied filename.
    pub fn extension(&self) -> String {
        extension_of(&self.filename)
    }
}

pub fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{}", ext),
        _ => FALLBACK_EXTENSION.to_string(),
    }
}
