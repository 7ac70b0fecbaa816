use crate::{
    assets::layer::Layer,
    foundation::core::{Canvas, Transform},
};

/// Share of the matching canvas dimension the longer layer side occupies by default.
pub const DEFAULT_FILL: f64 = 0.8;

/// How a layer is sized when (re)placed on a canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Whole layer visible, touching the canvas on the limiting axis.
    #[default]
    Contain,
    /// Canvas fully covered, excess cropped.
    Cover,
    /// Native size.
    Free,
}

pub fn fit_scale(canvas: Canvas, layer: &Layer, mode: FitMode) -> f64 {
    let (w, h) = layer.size();
    let rx = f64::from(canvas.width) / w;
    let ry = f64::from(canvas.height) / h;
    match mode {
        FitMode::Contain => rx.min(ry),
        FitMode::Cover => rx.max(ry),
        FitMode::Free => 1.0,
    }
}

/// Transform used for a (preset, layer) pair that has never been placed: centered, with the
/// layer's longer side spanning [`DEFAULT_FILL`] of the canvas side along the same axis.
pub fn default_transform(canvas: Canvas, layer: &Layer) -> Transform {
    let (w, h) = layer.size();
    let scale = if w >= h {
        DEFAULT_FILL * f64::from(canvas.width) / w
    } else {
        DEFAULT_FILL * f64::from(canvas.height) / h
    };
    Transform::centered_at(canvas.center(), scale)
}

pub fn fitted_transform(canvas: Canvas, layer: &Layer, mode: FitMode) -> Transform {
    Transform::centered_at(canvas.center(), fit_scale(canvas, layer, mode))
}

#[cfg(test)]
#[path = "../../tests/unit/project/placement.rs"]
mod tests;
