use std::fmt;

use uuid::Uuid;

const UPLOADS_ROOT: &str = "uploads";
const MAX_SEGMENT_LEN: usize = 255;

/// The two stored renditions of every uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Original,
    Thumbnail,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Original, Variant::Thumbnail];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Original => "original",
            Variant::Thumbnail => "thumbnail",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `uploads/{variant}/{gallery}/`
pub fn gallery_prefix(variant: Variant, gallery: &str) -> String {
    format!("{}/{}/{}/", UPLOADS_ROOT, variant, gallery)
}

/// `uploads/{variant}/{gallery}/{file_name}.`
///
/// The trailing dot keeps `cat` from matching `cat2.png`.
pub fn file_prefix(variant: Variant, gallery: &str, file_name: &str) -> String {
    format!("{}{}.", gallery_prefix(variant, gallery), file_name)
}

/// `uploads/{variant}/{gallery}/{id}{extension}`
pub fn object_key(variant: Variant, gallery: &str, id: &Uuid, extension: &str) -> String {
    format!("{}{}{}", gallery_prefix(variant, gallery), id, extension)
}

/// Checks that `value` can be used verbatim as one key path segment.
pub fn validate_segment(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("'{}' must not be empty", field));
    }
    if value.chars().count() > MAX_SEGMENT_LEN {
        return Err(format!(
            "'{}' must be at most {} characters",
            field, MAX_SEGMENT_LEN
        ));
    }
    if value == "." || value == ".." {
        return Err(format!("'{}' must not be a relative path", field));
    }
    if value
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control())
    {
        return Err(format!(
            "'{}' must not contain slashes or control characters",
            field
        ));
    }
    Ok(())
}

/// Keys and public URLs of a freshly stored image pair.
#[derive(Debug, Clone)]
pub struct UploadedPair {
    pub id: Uuid,
    pub original_key: String,
    pub thumbnail_key: String,
    pub original_url: String,
    pub thumbnail_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_follows_layout() {
        let id = Uuid::parse_str("6f1c2b1e-7f2a-4a53-9a55-0b1cbd1f1d11").unwrap();
        assert_eq!(
            object_key(Variant::Original, "holiday", &id, ".png"),
            "uploads/original/holiday/6f1c2b1e-7f2a-4a53-9a55-0b1cbd1f1d11.png"
        );
        assert_eq!(
            object_key(Variant::Thumbnail, "holiday", &id, ".png"),
            "uploads/thumbnail/holiday/6f1c2b1e-7f2a-4a53-9a55-0b1cbd1f1d11.png"
        );
    }

    #[test]
    fn prefixes_end_with_delimiters() {
        assert_eq!(
            gallery_prefix(Variant::Thumbnail, "g"),
            "uploads/thumbnail/g/"
        );
        assert_eq!(
            file_prefix(Variant::Original, "g", "cat"),
            "uploads/original/g/cat."
        );
        assert!(!"uploads/original/g/cat2.png".starts_with(&file_prefix(
            Variant::Original,
            "g",
            "cat"
        )));
    }

    #[test]
    fn validate_segment_accepts_plain_names() {
        assert!(validate_segment("gallery", "holiday 2024").is_ok());
        assert!(validate_segment("gallery", "été-photos_01").is_ok());
        assert!(validate_segment("gallery", "a.b").is_ok());
    }

    #[test]
    fn validate_segment_rejects_unsafe_names() {
        for bad in ["", "   ", ".", "..", "a/b", "a\\b", "tab\there", "new\nline"] {
            assert!(validate_segment("gallery", bad).is_err(), "{:?}", bad);
        }
        assert!(validate_segment("gallery", &"x".repeat(256)).is_err());
        assert!(validate_segment("gallery", &"x".repeat(255)).is_ok());
    }
}
