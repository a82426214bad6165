//! Source-image payloads.
//!
//! The upload surface hands the core a `data:` URI; this module decodes and
//! bounds it before a request can exist. Limits match the upload UI: PNG or
//! JPEG, at most 10 MiB decoded.

use crate::ValidationError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Decoded payload size limit.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Accepted source-image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Canonical media type.
    pub fn media_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// Parse an upload's media type. `image/jpg` is accepted as a common
    /// alias for JPEG.
    pub fn from_media_type(media_type: &str) -> Option<ImageFormat> {
        match media_type {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

/// A validated source image: format tag plus decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Accept decoded bytes, enforcing the non-empty and size bounds.
    pub fn from_bytes(format: ImageFormat, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        if bytes.is_empty() {
            return Err(ValidationError::InvalidImageData);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::PayloadTooLarge {
                actual: bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self { format, bytes })
    }

    /// Parse a `data:image/...;base64,...` URI, the form the upload surface
    /// produces.
    pub fn from_data_uri(uri: &str) -> Result<Self, ValidationError> {
        let rest = uri.strip_prefix("data:").ok_or(ValidationError::MalformedDataUri)?;
        let (header, data) = rest.split_once(',').ok_or(ValidationError::MalformedDataUri)?;
        let (media_type, encoding) =
            header.split_once(';').ok_or(ValidationError::MalformedDataUri)?;
        if encoding != "base64" {
            return Err(ValidationError::MalformedDataUri);
        }
        let format = ImageFormat::from_media_type(media_type)
            .ok_or_else(|| ValidationError::UnsupportedMediaType(media_type.to_owned()))?;
        let bytes = BASE64.decode(data).map_err(|_| ValidationError::InvalidImageData)?;
        Self::from_bytes(format, bytes)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Re-encode for preview surfaces.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.media_type(), BASE64.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_uri(bytes: &[u8]) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(bytes))
    }

    #[test]
    fn data_uri_round_trips() {
        let payload = ImagePayload::from_data_uri(&png_uri(b"fake png bytes")).unwrap();
        assert_eq!(payload.format(), ImageFormat::Png);
        assert_eq!(payload.bytes(), b"fake png bytes");
        assert_eq!(ImagePayload::from_data_uri(&payload.to_data_uri()).unwrap(), payload);
    }

    #[test]
    fn jpg_alias_is_accepted() {
        let uri = format!("data:image/jpg;base64,{}", BASE64.encode(b"jpeg"));
        let payload = ImagePayload::from_data_uri(&uri).unwrap();
        assert_eq!(payload.format(), ImageFormat::Jpeg);
        assert_eq!(payload.format().media_type(), "image/jpeg");
    }

    #[test]
    fn non_data_uri_is_rejected() {
        let err = ImagePayload::from_data_uri("https://example.com/cat.png");
        assert_eq!(err, Err(ValidationError::MalformedDataUri));
    }

    #[test]
    fn missing_base64_marker_is_rejected() {
        let err = ImagePayload::from_data_uri("data:image/png;utf8,hello");
        assert_eq!(err, Err(ValidationError::MalformedDataUri));
    }

    #[test]
    fn unsupported_media_type_is_rejected() {
        let uri = format!("data:image/gif;base64,{}", BASE64.encode(b"gif"));
        let err = ImagePayload::from_data_uri(&uri);
        assert_eq!(err, Err(ValidationError::UnsupportedMediaType("image/gif".into())));
    }

    #[test]
    fn garbage_base64_is_rejected() {
        let err = ImagePayload::from_data_uri("data:image/png;base64,!!!not-base64!!!");
        assert_eq!(err, Err(ValidationError::InvalidImageData));
    }

    #[test]
    fn empty_payload_is_rejected() {
        let err = ImagePayload::from_data_uri("data:image/png;base64,");
        assert_eq!(err, Err(ValidationError::InvalidImageData));
        assert_eq!(
            ImagePayload::from_bytes(ImageFormat::Png, Vec::new()),
            Err(ValidationError::InvalidImageData)
        );
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = ImagePayload::from_bytes(ImageFormat::Jpeg, bytes);
        assert_eq!(
            err,
            Err(ValidationError::PayloadTooLarge {
                actual: MAX_IMAGE_BYTES + 1,
                limit: MAX_IMAGE_BYTES,
            })
        );
    }

    #[test]
    fn payload_at_the_limit_is_accepted() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES];
        let payload = ImagePayload::from_bytes(ImageFormat::Png, bytes).unwrap();
        assert_eq!(payload.len(), MAX_IMAGE_BYTES);
        assert!(!payload.is_empty());
    }
}
