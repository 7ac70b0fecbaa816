//! Upscale detection. Advisory only: nothing here blocks an export.

use crate::{
    assets::layer::{Layer, LayerId},
    presets::PresetId,
    project::model::ProjectSnapshot,
    render::resample::scaled_size,
};

/// Ratios at or below this are treated as native density.
const NATIVE_TOLERANCE: f64 = 1e-9;

/// A layer drawn at more output pixels than its source has along the limiting axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpscaleWarning {
    pub layer_id: LayerId,
    pub preset_id: PresetId,
    /// Output pixels per source pixel on the limiting axis (> 1.0).
    pub ratio: f64,
}

impl std::fmt::Display for UpscaleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "layer '{}' is upscaled {:.0}% in preset '{}'",
            self.layer_id,
            self.ratio * 100.0,
            self.preset_id
        )
    }
}

/// Output/source pixel ratio on the limiting axis, measured on the raster size the compositor
/// actually produces.
pub fn upscale_ratio(layer: &Layer, scale: f64) -> f64 {
    let (w, h) = (layer.width(), layer.height());
    let (ow, oh) = scaled_size(w, h, scale);
    (f64::from(ow) / f64::from(w)).max(f64::from(oh) / f64::from(h))
}

/// Warnings for every layer the compositor would draw in `preset`.
pub fn inspect(snapshot: &ProjectSnapshot, preset: PresetId) -> Vec<UpscaleWarning> {
    snapshot
        .placed_layers(preset)
        .into_iter()
        .filter_map(|placed| {
            let ratio = upscale_ratio(placed.layer, placed.state.transform.scale);
            (ratio > 1.0 + NATIVE_TOLERANCE).then(|| UpscaleWarning {
                layer_id: placed.layer.id.clone(),
                preset_id: preset,
                ratio,
            })
        })
        .inspect(|w| tracing::info!(%w, "upscale"))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/export/quality.rs"]
mod tests;
