use std::path::Path;

use anyhow::Context;

use crate::{
    assets::layer::{Layer, LayerId},
    foundation::{
        core::PixelBuffer,
        error::{ArplusError, ArplusResult},
    },
};

/// File extensions accepted by [`load_layer`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> ArplusResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

/// Decode bytes into an image layer.
pub fn decode_layer(id: impl Into<LayerId>, bytes: &[u8], is_logo: bool) -> ArplusResult<Layer> {
    let layer = Layer::image(id, decode_image(bytes)?)?;
    Ok(if is_logo { layer.as_logo() } else { layer })
}

/// Read and decode an image file into a layer.
pub fn load_layer(id: impl Into<LayerId>, path: &Path, is_logo: bool) -> ArplusResult<Layer> {
    check_extension(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_layer(id, &bytes, is_logo)
}

fn check_extension(path: &Path) -> ArplusResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ArplusError::validation(format!(
            "unsupported image extension for '{}' (expected one of {})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
