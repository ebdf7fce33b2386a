//! Export of the rendered preview to a downloadable file.
//!
//! The client rasterizes its preview at `EXPORT_SCALE` times the CSS size and
//! uploads the PNG capture. Here the capture is checked against the declared
//! size, then re-encoded as PNG or embedded full-bleed in a one-page PDF whose
//! page size equals the capture's pixel dimensions.

pub mod handlers;
mod pdf;

use std::io::Cursor;
use std::str::FromStr;

use image::{DynamicImage, ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Pixel slack allowed when comparing a capture to `css size * scale`.
const SIZE_TOLERANCE_PX: u32 = 1;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown export format '{0}'")]
    UnknownFormat(String),

    #[error("capture size must be positive")]
    EmptyCapture,

    #[error("capture is not a readable PNG: {0}")]
    Decode(#[source] image::ImageError),

    #[error(
        "capture is {actual_width}x{actual_height}px, expected {expected_width}x{expected_height}px"
    )]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("failed to encode PNG: {0}")]
    EncodePng(#[source] image::ImageError),

    #[error("failed to build PDF: {0}")]
    EncodePdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Preview size in CSS pixels, as laid out on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CaptureSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `<name>_resume.<ext>`, with whitespace runs collapsed to `_`.
/// Control characters cannot appear in a header and are dropped.
pub fn export_filename(name: &str, format: ExportFormat) -> String {
    let stem = name
        .split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if stem.is_empty() {
        format!("resume.{}", format.extension())
    } else {
        format!("{stem}_resume.{}", format.extension())
    }
}

/// `attachment; filename="..."` with the quoted-string escapes applied.
pub fn content_disposition(filename: &str) -> String {
    let mut quoted = String::with_capacity(filename.len());
    for c in filename.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    format!("attachment; filename=\"{quoted}\"")
}

/// Turns a client capture into the requested artifact.
pub fn export_capture(
    capture_png: &[u8],
    css: CaptureSize,
    scale: u32,
    format: ExportFormat,
    name: &str,
) -> Result<ExportArtifact, ExportError> {
    if css.width == 0 || css.height == 0 {
        return Err(ExportError::EmptyCapture);
    }

    let image = image::load_from_memory_with_format(capture_png, ImageFormat::Png)
        .map_err(ExportError::Decode)?;
    check_size(&image, css, scale)?;

    let bytes = match format {
        ExportFormat::Png => {
            let mut out = Cursor::new(Vec::new());
            image
                .write_to(&mut out, ImageFormat::Png)
                .map_err(ExportError::EncodePng)?;
            out.into_inner()
        }
        ExportFormat::Pdf => pdf::single_page_pdf(&flatten_on_white(&image))?,
    };

    let filename = export_filename(name, format);
    info!(
        %filename,
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "Exported resume"
    );

    Ok(ExportArtifact {
        filename,
        content_type: format.content_type(),
        bytes,
    })
}

fn check_size(image: &DynamicImage, css: CaptureSize, scale: u32) -> Result<(), ExportError> {
    let expected_width = css.width.saturating_mul(scale);
    let expected_height = css.height.saturating_mul(scale);
    let (actual_width, actual_height) = (image.width(), image.height());

    if actual_width.abs_diff(expected_width) > SIZE_TOLERANCE_PX
        || actual_height.abs_diff(expected_height) > SIZE_TOLERANCE_PX
    {
        return Err(ExportError::SizeMismatch {
            expected_width,
            expected_height,
            actual_width,
            actual_height,
        });
    }
    Ok(())
}

/// Composites any transparency onto a white page.
fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| -> u8 {
            let a = u16::from(a);
            ((u16::from(c) * a + 255 * (255 - a)) / 255) as u8
        };
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}
