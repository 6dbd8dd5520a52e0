//! QR encoding of verification URLs.
//!
//! The code is rendered as SVG so it stays sharp at any print size, then
//! inlined into the certificate as a base64 `data:` URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::error::{RenderError, Result};

/// Minimum rendered edge length in pixels.
pub const QR_MIN_DIMENSION: u32 = 200;

/// A rendered QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    svg: String,
}

impl QrImage {
    /// Encode `data` (normally a verification URL) as a QR code.
    ///
    /// Fails with [`RenderError::Encoding`] if the data does not fit in a
    /// QR symbol at error-correction level M.
    pub fn encode(data: &str) -> Result<Self> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
            .map_err(|e| RenderError::Encoding(e.to_string()))?;

        let svg = code
            .render::<svg::Color<'_>>()
            .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .quiet_zone(true)
            .build();

        Ok(Self { svg })
    }

    /// The SVG markup.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// The image as a `data:image/svg+xml;base64,...` URI.
    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.svg.as_bytes()))
    }
}
