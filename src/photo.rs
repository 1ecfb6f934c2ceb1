//! Resize-before-upload for profile and task photos.
//!
//! Photos are decoded, shrunk so the longest side fits the configured bound,
//! and re-encoded as JPEG. Photos already within the bound keep their size.

use crate::config::PhotoConfig;
use crate::error::{DutyError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tracing::debug;

/// MIME type of prepared uploads.
pub const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// A photo ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPhoto {
    /// Encoded JPEG bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl PreparedPhoto {
    /// MIME type of [`Self::bytes`].
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        UPLOAD_CONTENT_TYPE
    }

    /// Write the JPEG to `dir/<user_id>/<stem>.jpg` and return that path.
    ///
    /// `dir` is normally [`crate::duty_dirs::photos_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`DutyError::Photo`] for a name that would leave `dir`, and
    /// [`DutyError::Io`] when the file cannot be written.
    pub fn store_in(&self, dir: &Path, user_id: &str, stem: &str) -> Result<PathBuf> {
        for part in [user_id, stem] {
            if part.is_empty() || part.contains(['/', '\\']) || part.starts_with('.') {
                return Err(DutyError::Photo(format!("invalid photo name: {part:?}")));
            }
        }
        let user_dir = dir.join(user_id);
        std::fs::create_dir_all(&user_dir)?;
        let path = user_dir.join(format!("{stem}.jpg"));
        std::fs::write(&path, &self.bytes)?;
        debug!("stored photo at {}", path.display());
        Ok(path)
    }
}

/// Dimensions that fit `width` x `height` inside a `max_dimension` square,
/// preserving aspect ratio. Never upscales; never returns a zero side.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max_dimension == 0 || longest <= max_dimension {
        return (width, height);
    }
    let scale = |side: u32| -> u32 {
        let scaled = u64::from(side) * u64::from(max_dimension) / u64::from(longest);
        u32::try_from(scaled).unwrap_or(max_dimension).max(1)
    };
    (scale(width), scale(height))
}

/// Decode `bytes` (PNG or JPEG), downscale and re-encode as JPEG.
///
/// # Errors
///
/// Returns [`DutyError::Photo`] when the input cannot be decoded or the
/// output cannot be encoded.
pub fn prepare_upload(bytes: &[u8], config: &PhotoConfig) -> Result<PreparedPhoto> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| DutyError::Photo(format!("cannot decode photo: {e}")))?;

    let (width, height) = fit_within(image.width(), image.height(), config.max_dimension);
    let image = if (width, height) == (image.width(), image.height()) {
        image
    } else {
        image.resize_exact(width, height, FilterType::Triangle)
    };

    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    let quality = config.jpeg_quality.clamp(1, 100);
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&rgb)
        .map_err(|e| DutyError::Photo(format!("cannot encode photo: {e}")))?;

    debug!(
        "prepared photo {}x{} ({} bytes in, {} bytes out)",
        width,
        height,
        bytes.len(),
        out.len()
    );
    Ok(PreparedPhoto {
        bytes: out,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn fit_within_preserves_aspect() {
        assert_eq!(fit_within(1600, 800, 800), (800, 400));
        assert_eq!(fit_within(600, 1200, 300), (150, 300));
        assert_eq!(fit_within(640, 480, 800), (640, 480));
        assert_eq!(fit_within(5000, 1, 100), (100, 1));
        assert_eq!(fit_within(10, 10, 0), (10, 10));
    }

    #[test]
    fn large_photo_is_downscaled_to_jpeg() {
        let config = PhotoConfig {
            max_dimension: 64,
            jpeg_quality: 70,
        };
        let prepared = prepare_upload(&png(256, 128), &config).unwrap();
        assert_eq!((prepared.width, prepared.height), (64, 32));
        assert_eq!(prepared.content_type(), "image/jpeg");

        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
        assert_eq!(
            image::guess_format(&prepared.bytes).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn small_photo_keeps_size() {
        let prepared = prepare_upload(&png(20, 30), &PhotoConfig::default()).unwrap();
        assert_eq!((prepared.width, prepared.height), (20, 30));
    }

    #[test]
    fn stored_photo_lands_under_user_dir() {
        let dir = tempfile::tempdir().unwrap();
        let prepared = prepare_upload(&png(20, 30), &PhotoConfig::default()).unwrap();
        let path = prepared.store_in(dir.path(), "u1", "2024-03-14").unwrap();
        assert_eq!(path, dir.path().join("u1").join("2024-03-14.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), prepared.bytes);

        for (user, stem) in [("../u1", "x"), ("u1", ".."), ("", "x"), ("u1", "a/b")] {
            let err = prepared.store_in(dir.path(), user, stem).unwrap_err();
            assert!(matches!(err, DutyError::Photo(_)), "{user:?} {stem:?}");
        }
    }

    #[test]
    fn garbage_is_photo_error() {
        let err = prepare_upload(b"definitely not an image", &PhotoConfig::default()).unwrap_err();
        assert!(matches!(err, DutyError::Photo(_)));
    }
}
