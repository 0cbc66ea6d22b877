use axum::body::Bytes;
use thiserror::Error;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageKind::Jpeg),
            "image/png" | "image/x-png" => Some(ImageKind::Png),
            _ => None,
        }
    }

    /// Detect the format from the file's leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(JPEG_SIGNATURE) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(PNG_SIGNATURE) {
            Some(ImageKind::Png)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageRejection {
    #[error("The product_image field must contain an uploaded file.")]
    Empty,

    #[error("The product_image file must not be larger than {max_kb} KB.")]
    TooLarge { max_kb: u64 },

    #[error("The product_image file must be a jpg, jpeg or png image (got {0}).")]
    UnsupportedType(String),

    #[error("The product_image file is not a valid image.")]
    NotAnImage,
}

/// A file part as received, before any checks.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// An upload that passed [`UploadedImage::inspect`].
#[derive(Debug, Clone)]
pub struct ValidImage {
    pub kind: ImageKind,
    pub bytes: Bytes,
}

impl UploadedImage {
    /// Type the client claims: the part's Content-Type, or a guess from its
    /// file name when the client sent none or a generic one.
    fn declared_mime(&self) -> Option<String> {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => Some(ct.to_string()),
            _ => self
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first_raw())
                .map(str::to_string),
        }
    }

    pub fn inspect(self, max_bytes: usize) -> Result<ValidImage, ImageRejection> {
        if self.bytes.is_empty() {
            return Err(ImageRejection::Empty);
        }
        if self.bytes.len() > max_bytes {
            return Err(ImageRejection::TooLarge {
                max_kb: (max_bytes / 1024) as u64,
            });
        }
        let declared = self.declared_mime().unwrap_or_else(|| "unknown".to_string());
        if ImageKind::from_mime(&declared).is_none() {
            return Err(ImageRejection::UnsupportedType(declared));
        }
        // stored extension follows the content, not the claim
        let kind = ImageKind::sniff(&self.bytes).ok_or(ImageRejection::NotAnImage)?;
        Ok(ValidImage {
            kind,
            bytes: self.bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Bytes {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(b"\0\0\0\rIHDR");
        Bytes::from(data)
    }

    fn upload(name: &str, content_type: Option<&str>, bytes: Bytes) -> UploadedImage {
        UploadedImage {
            file_name: Some(name.to_string()),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }

    #[test]
    fn accepts_png_with_declared_type() {
        let image = upload("pic.png", Some("image/png"), png_bytes())
            .inspect(2048 * 1024)
            .expect("valid png");
        assert_eq!(image.kind, ImageKind::Png);
    }

    #[test]
    fn guesses_type_from_file_name() {
        let mut data = JPEG_SIGNATURE.to_vec();
        data.extend_from_slice(b"\xE0\0\x10JFIF");
        let image = upload("photo.jpeg", Some("application/octet-stream"), Bytes::from(data))
            .inspect(1024)
            .expect("valid jpeg");
        assert_eq!(image.kind, ImageKind::Jpeg);
    }

    #[test]
    fn rejects_text_files() {
        let err = upload("notes.txt", Some("text/plain"), Bytes::from_static(b"hello"))
            .inspect(1024)
            .unwrap_err();
        assert_eq!(err, ImageRejection::UnsupportedType("text/plain".into()));
    }

    #[test]
    fn rejects_disguised_files() {
        let err = upload("fake.png", Some("image/png"), Bytes::from_static(b"not really"))
            .inspect(1024)
            .unwrap_err();
        assert_eq!(err, ImageRejection::NotAnImage);
    }

    #[test]
    fn rejects_oversized_and_empty() {
        let err = upload("big.png", Some("image/png"), png_bytes())
            .inspect(4)
            .unwrap_err();
        assert!(matches!(err, ImageRejection::TooLarge { .. }));

        let err = upload("empty.png", Some("image/png"), Bytes::new())
            .inspect(1024)
            .unwrap_err();
        assert_eq!(err, ImageRejection::Empty);
    }
}
