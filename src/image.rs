use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::path::Path;
use tokio::fs;

use crate::FormError;

/// A file chosen through a file input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    /// Content type declared for the file, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing its content type from the extension
    pub async fn from_path(path: &Path) -> Result<Self, FormError> {
        let bytes = fs::read(path).await?;
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            content_type,
            bytes,
        })
    }

    /// Whether the declared content type is an image type
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

/// Image that passed the type check and has its preview decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub file: ImageFile,
    pub preview: String,
}

/// Encode raw bytes as a `data:` URI usable as an `<img src>`
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// Check the file type and decode the preview.
///
/// Encoding runs on the blocking pool. The caller commits the result once
/// this resolves, so of two decodes for the same slot the later one wins.
pub async fn decode(file: ImageFile) -> Result<DecodedImage, FormError> {
    if !file.is_image() {
        return Err(FormError::NotAnImage(file.name));
    }

    debug!(
        "Decoding preview for {} ({} bytes, {})",
        file.name,
        file.bytes.len(),
        file.content_type
    );

    let (file, preview) = tokio::task::spawn_blocking(move || {
        let preview = data_url(&file.content_type, &file.bytes);
        (file, preview)
    })
    .await
    .map_err(std::io::Error::from)?;

    Ok(DecodedImage { file, preview })
}

/// Main image of a recipe: the chosen file (if any) and what is shown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSlot {
    pub file: Option<ImageFile>,
    pub preview: String,
}

impl ImageSlot {
    pub fn with_preview(preview: impl Into<String>) -> Self {
        Self {
            file: None,
            preview: preview.into(),
        }
    }

    pub fn set(&mut self, image: DecodedImage) {
        self.file = Some(image.file);
        self.preview = image.preview;
    }

    pub fn clear(&mut self) {
        self.file = None;
        self.preview.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_is_image() {
        assert!(ImageFile::new("a.png", "image/png", vec![]).is_image());
        assert!(ImageFile::new("a.jpg", "IMAGE/JPEG", vec![]).is_image());
        assert!(!ImageFile::new("a.pdf", "application/pdf", vec![]).is_image());
        assert!(!ImageFile::new("a", "", vec![]).is_image());
    }

    #[tokio::test]
    async fn test_decode_rejects_non_image() {
        let file = ImageFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let result = decode(file).await;
        assert!(matches!(result, Err(FormError::NotAnImage(name)) if name == "notes.txt"));
    }

    #[tokio::test]
    async fn test_decode_builds_preview() {
        let file = ImageFile::new("cake.gif", "image/gif", b"GIF89a".to_vec());
        let decoded = decode(file.clone()).await.unwrap();
        assert_eq!(decoded.file, file);
        assert_eq!(decoded.preview, "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn test_from_path_guesses_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soup.jpg");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"\xff\xd8\xff").unwrap();

        let image = ImageFile::from_path(&path).await.unwrap();
        assert_eq!(image.name, "soup.jpg");
        assert_eq!(image.content_type, "image/jpeg");
        assert_eq!(image.bytes, b"\xff\xd8\xff");
        assert!(image.is_image());
    }

    #[test]
    fn test_slot_set_and_clear() {
        let mut slot = ImageSlot::with_preview("https://img/old.jpg");
        slot.set(DecodedImage {
            file: ImageFile::new("new.png", "image/png", vec![1]),
            preview: "data:image/png;base64,AQ==".to_string(),
        });
        assert!(slot.file.is_some());
        assert_eq!(slot.preview, "data:image/png;base64,AQ==");

        slot.clear();
        assert!(slot.file.is_none());
        assert!(slot.preview.is_empty());
    }
}
