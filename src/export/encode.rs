use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::{
        core::PixelBuffer,
        error::{ArplusError, ArplusResult},
        math::mul_div255,
    },
    presets::PresetId,
};

/// Raster formats written by the exporter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    /// Lossless WebP.
    Webp,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Webp => "webp",
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Webp => image::ImageFormat::WebP,
        }
    }

    pub fn supports_alpha(self) -> bool {
        !matches!(self, ExportFormat::Jpeg)
    }
}

/// `<dir>/<preset_id>.<ext>`
pub fn output_path(dir: &Path, preset: PresetId, format: ExportFormat) -> PathBuf {
    dir.join(format!("{}.{}", preset.as_str(), format.extension()))
}

/// Encode a rendered buffer. Formats without alpha are flattened over `matte` (straight RGB).
pub fn write_rendered(
    buffer: &PixelBuffer,
    path: &Path,
    format: ExportFormat,
    matte: [u8; 3],
) -> ArplusResult<()> {
    if buffer.is_empty() {
        return Err(ArplusError::validation("cannot encode an empty buffer"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let written = if format.supports_alpha() {
        image::save_buffer_with_format(
            path,
            &buffer.data,
            buffer.width,
            buffer.height,
            image::ColorType::Rgba8,
            format.image_format(),
        )
    } else {
        image::save_buffer_with_format(
            path,
            &flatten_rgb(&buffer.data, matte),
            buffer.width,
            buffer.height,
            image::ColorType::Rgb8,
            format.image_format(),
        )
    };
    written.with_context(|| format!("write {} '{}'", format.extension(), path.display()))?;

    tracing::info!(path = %path.display(), "wrote export");
    Ok(())
}

/// Straight RGBA over an opaque matte, dropping alpha.
pub fn flatten_rgb(rgba: &[u8], matte: [u8; 3]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = u16::from(px[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = mul_div255(u16::from(px[c]), a);
            let bg = mul_div255(u16::from(matte[c]), inv);
            out.push(fg.saturating_add(bg));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
