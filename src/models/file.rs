use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// Extensions uploaded with the `image` action
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Upload category, sent as the pre-sign `action` and the file `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    File,
}

impl FileType {
    /// Classify a path by its extension, case-insensitively.
    ///
    /// Anything that is not a known image extension, including a missing
    /// extension, is a plain `file`.
    pub fn classify(path: &Path) -> Self {
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_image {
            FileType::Image
        } else {
            FileType::File
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::File => "file",
        }
    }

    /// Parse the wire form, `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(FileType::Image),
            "file" => Some(FileType::File),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file that went through the whole upload pipeline.
///
/// Pass `id` in [`CompletionRequest::with_refs`](crate::models::CompletionRequest::with_refs)
/// to reference it from a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub object_name: String,
    pub file_type: FileType,
    pub meta: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_images_case_insensitive() {
        assert_eq!(FileType::classify(Path::new("photo.JPG")), FileType::Image);
        assert_eq!(FileType::classify(Path::new("a/b/pic.webp")), FileType::Image);
        assert_eq!(FileType::classify(Path::new("anim.Gif")), FileType::Image);
        assert_eq!(FileType::classify(Path::new("x.jpeg")), FileType::Image);
    }

    #[test]
    fn test_classify_everything_else_is_file() {
        assert_eq!(FileType::classify(Path::new("report.pdf")), FileType::File);
        assert_eq!(FileType::classify(Path::new("notes")), FileType::File);
        assert_eq!(FileType::classify(Path::new("archive.png.zip")), FileType::File);
        assert_eq!(FileType::classify(Path::new(".png")), FileType::File);
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(serde_json::to_value(FileType::Image).unwrap(), "image");
        assert_eq!(FileType::parse("file"), Some(FileType::File));
        assert_eq!(FileType::parse("video"), None);
        assert_eq!(FileType::File.to_string(), "file");
    }
}
