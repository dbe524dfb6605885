//! Image URL helpers and upload validation.
//!
//! Box photos uploaded through this application live under the local media
//! root and resolve to `/media/...` URLs unchanged. Records imported from the
//! previous deployment may still carry Cloudinary URLs; for those the helpers
//! here rewrite the `/upload/` path segment to request sized variants. URLs
//! that belong to neither source pass through untouched.

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted image content types.
const VALID_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Output format for a transformed image URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// Let the CDN pick.
    #[default]
    Auto,
    Webp,
    Jpg,
    Png,
}

impl ImageFormat {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Webp => "webp",
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Requested transform parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Defaults to 80 when unset; 80 emits no quality segment.
    pub quality: Option<u32>,
    pub format: ImageFormat,
}

/// Rewrite a Cloudinary delivery URL to request a transformed variant.
///
/// Silently returns the input unchanged for URLs not recognized as
/// Cloudinary's, so locally stored `/media/` paths pass through.
#[must_use]
pub fn optimized_image_url(url: &str, options: TransformOptions) -> String {
    if !url.contains("cloudinary.com") {
        return url.to_owned();
    }

    let quality = options.quality.unwrap_or(80);
    let mut out = url.to_owned();

    if options.width.is_some() || options.height.is_some() {
        let w = options
            .width
            .map_or_else(|| "auto".to_owned(), |w| w.to_string());
        let h = options
            .height
            .map_or_else(|| "auto".to_owned(), |h| h.to_string());
        out = out.replace("/upload/", &format!("/upload/w_{w},h_{h},c_fill/"));
    }

    if quality != 80 {
        out = out.replace("/upload/", &format!("/upload/q_{quality}/"));
    }

    if options.format != ImageFormat::Auto {
        out = out.replace("/upload/", &format!("/upload/f_{}/", options.format.as_str()));
    }

    out
}

/// Square thumbnail variant (quality 80).
#[must_use]
pub fn thumbnail_url(url: &str, size: u32) -> String {
    optimized_image_url(
        url,
        TransformOptions {
            width: Some(size),
            height: Some(size),
            quality: Some(80),
            format: ImageFormat::Auto,
        },
    )
}

/// Preview variant, 400x300 by default (quality 85).
#[must_use]
pub fn preview_url(url: &str, width: u32, height: u32) -> String {
    optimized_image_url(
        url,
        TransformOptions {
            width: Some(width),
            height: Some(height),
            quality: Some(85),
            format: ImageFormat::Auto,
        },
    )
}

/// Full-size variant (quality 90).
#[must_use]
pub fn full_size_url(url: &str) -> String {
    optimized_image_url(
        url,
        TransformOptions {
            quality: Some(90),
            ..TransformOptions::default()
        },
    )
}

/// Reasons an upload is rejected before any byte is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("image is too large ({size} bytes, max {max})")]
    TooLarge { size: usize, max: usize },
}

/// Validate an upload's content type and size.
///
/// # Errors
///
/// Returns the rejection reason; nothing has been written when this fails.
pub fn validate_upload(content_type: &str, size: usize) -> Result<(), UploadValidationError> {
    if !VALID_CONTENT_TYPES.contains(&content_type) {
        return Err(UploadValidationError::UnsupportedType(
            content_type.to_owned(),
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadValidationError::TooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// File extension for an accepted content type.
#[must_use]
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOUDINARY: &str =
        "https://res.cloudinary.com/demo/image/upload/v1/gripen-storage/box.jpg";

    #[test]
    fn test_non_cloudinary_url_passes_through() {
        let url = "/media/7/1700000000_abc.jpg";
        assert_eq!(
            optimized_image_url(url, TransformOptions::default()),
            url
        );
        assert_eq!(thumbnail_url(url, 200), url);
    }

    #[test]
    fn test_thumbnail_inserts_fill_transform() {
        let out = thumbnail_url(CLOUDINARY, 200);
        assert!(out.contains("/upload/w_200,h_200,c_fill/"));
        // Quality 80 is the default and emits no q_ segment.
        assert!(!out.contains("q_80"));
    }

    #[test]
    fn test_preview_applies_quality() {
        let out = preview_url(CLOUDINARY, 400, 300);
        assert!(out.contains("w_400,h_300,c_fill"));
        assert!(out.contains("/upload/q_85/"));
    }

    #[test]
    fn test_full_size_only_quality() {
        let out = full_size_url(CLOUDINARY);
        assert!(out.contains("/upload/q_90/"));
        assert!(!out.contains("c_fill"));
    }

    #[test]
    fn test_explicit_format_segment() {
        let out = optimized_image_url(
            CLOUDINARY,
            TransformOptions {
                format: ImageFormat::Webp,
                ..TransformOptions::default()
            },
        );
        assert!(out.contains("/upload/f_webp/"));
    }

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload("image/png", 1024).is_ok());
        assert!(matches!(
            validate_upload("application/pdf", 1024),
            Err(UploadValidationError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_upload("image/jpeg", MAX_UPLOAD_BYTES + 1),
            Err(UploadValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/jpg"), "jpg");
    }
}
