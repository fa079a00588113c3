// Intake - turns dropped items into accepted image files

use super::ValidationError;
use super::types::ImageFile;
use std::path::Path;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// An item handed to the intake surface, with the media type it declares
#[derive(Debug, Clone)]
pub struct DroppedItem {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DroppedItem {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its media type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self::new(name, media_type_for_path(path), bytes))
    }
}

/// Media type implied by a file extension
pub fn media_type_for_path(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

/// Accept an item only if it declares an image media type
pub fn decode_item(item: &DroppedItem) -> Result<ImageFile, ValidationError> {
    if !item.media_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            name: item.name.clone(),
            media_type: item.media_type.clone(),
        });
    }

    Ok(ImageFile::new(&item.name, &item.media_type, &item.bytes))
}
