//! Encoded snapshots, image sources, and off-thread PNG decoding.
//!
//! - [`EncodedImage`]: shared PNG bytes used for history snapshots and exports
//! - [`ImageSource`]: where a load request gets its bytes from
//! - [`DecodedImage`]: raw pixel rows that can cross threads and later become
//!   a Cairo surface on the event thread

use crate::surface::SurfaceError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// PNG-encoded raster image. Cloning shares the underlying bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage(Arc<[u8]>);

impl EncodedImage {
    /// Wraps PNG bytes without validating them.
    pub fn from_png_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Arc::from(bytes.into()))
    }

    /// Encodes the current contents of a Cairo surface as PNG.
    pub fn encode(surface: &cairo::ImageSurface) -> Result<Self, SurfaceError> {
        surface.flush();
        let mut buf = Vec::new();
        surface
            .write_to_png(&mut buf)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        Ok(Self::from_png_bytes(buf))
    }

    /// Parses a `data:` URL (or a bare base64 payload) into PNG bytes.
    pub fn from_data_url(url: &str) -> Result<Self, SurfaceError> {
        let url = url.trim();
        let payload = match url.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').ok_or_else(|| {
                    SurfaceError::Source("data URL is missing its ',' separator".to_string())
                })?;
                if !header.ends_with(";base64") {
                    return Err(SurfaceError::Source(format!(
                        "unsupported data URL encoding '{header}'"
                    )));
                }
                payload
            }
            None => url,
        };

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| SurfaceError::Source(format!("invalid base64 payload: {e}")))?;
        Ok(Self::from_png_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Portable string form: `data:image/png;base64,...`.
    pub fn to_data_url(&self) -> String {
        format!("{DATA_URL_PREFIX}{}", STANDARD.encode(&self.0))
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedImage")
            .field(&format_args!("{} bytes", self.0.len()))
            .finish()
    }
}

/// Origin of an image passed to [`crate::surface::SketchSurface::load_image`].
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Already-encoded PNG bytes
    Encoded(EncodedImage),
    /// `data:image/png;base64,...` URL or a bare base64 payload
    DataUrl(String),
    /// PNG file on disk
    Path(PathBuf),
}

impl ImageSource {
    /// Resolves the source to PNG bytes. Runs on the decode worker.
    pub fn resolve(self) -> Result<EncodedImage, SurfaceError> {
        match self {
            ImageSource::Encoded(image) => Ok(image),
            ImageSource::DataUrl(url) => EncodedImage::from_data_url(&url),
            ImageSource::Path(path) => fs::read(&path)
                .map(EncodedImage::from_png_bytes)
                .map_err(|e| SurfaceError::Source(format!("{}: {e}", path.display()))),
        }
    }

    /// Short label for log lines.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Encoded(image) => format!("encoded image ({} bytes)", image.len()),
            ImageSource::DataUrl(url) => format!("data URL ({} chars)", url.len()),
            ImageSource::Path(path) => path.display().to_string(),
        }
    }
}

impl From<EncodedImage> for ImageSource {
    fn from(image: EncodedImage) -> Self {
        ImageSource::Encoded(image)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

/// Decoded pixel rows in Cairo's native layout.
///
/// Unlike `cairo::ImageSurface` this is `Send`, so decoding can happen on a
/// worker thread while the surface itself stays on the event thread.
#[derive(Debug)]
pub struct DecodedImage {
    width: i32,
    height: i32,
    stride: i32,
    format: cairo::Format,
    data: Vec<u8>,
}

impl DecodedImage {
    /// Decodes PNG bytes.
    pub fn decode(png: &[u8]) -> Result<Self, SurfaceError> {
        let mut reader = png;
        let mut surface = cairo::ImageSurface::create_from_png(&mut reader)
            .map_err(|e| SurfaceError::Decode(e.to_string()))?;
        surface.flush();

        let width = surface.width();
        let height = surface.height();
        let stride = surface.stride();
        let format = surface.format();
        let data = surface
            .data()
            .map_err(|e| SurfaceError::Decode(format!("pixel buffer unavailable: {e}")))?
            .to_vec();

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Straight (non-premultiplied) RGBA at `(x, y)`, or `None` out of bounds.
    pub fn rgba_at(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y * self.stride + x * 4) as usize;
        let px = u32::from_ne_bytes(self.data.get(offset..offset + 4)?.try_into().ok()?);
        let alpha = match self.format {
            cairo::Format::Rgb24 => 255,
            _ => (px >> 24) as u8,
        };
        let unpremultiply = |channel: u32| -> u8 {
            let channel = channel & 0xff;
            match alpha {
                0 => 0,
                255 => channel as u8,
                a => ((channel * 255 + a as u32 / 2) / a as u32).min(255) as u8,
            }
        };

        Some([
            unpremultiply(px >> 16),
            unpremultiply(px >> 8),
            unpremultiply(px),
            alpha,
        ])
    }

    /// Rebuilds a Cairo surface over the decoded rows.
    pub fn into_surface(self) -> Result<cairo::ImageSurface, SurfaceError> {
        Ok(cairo::ImageSurface::create_for_data(
            self.data,
            self.format,
            self.width,
            self.height,
            self.stride,
        )?)
    }
}
