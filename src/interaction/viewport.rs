use crate::foundation::core::{Canvas, Point, Vec2};

/// Mapping between preview (widget) coordinates and preset pixels:
/// `preview = preset * zoom + pan`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreviewViewport {
    pub zoom: f64,
    pub pan: Vec2,
}

impl Default for PreviewViewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl PreviewViewport {
    /// Largest zoom that shows the whole canvas inside a `view_w` x `view_h` widget, centered.
    pub fn fit(canvas: Canvas, view_w: f64, view_h: f64) -> Self {
        let cw = f64::from(canvas.width);
        let ch = f64::from(canvas.height);
        let zoom = (view_w / cw).min(view_h / ch);
        if !zoom.is_finite() || zoom <= 0.0 {
            return Self::default();
        }
        Self {
            zoom,
            pan: Vec2::new((view_w - cw * zoom) * 0.5, (view_h - ch * zoom) * 0.5),
        }
    }

    pub fn to_preset(&self, preview: Point) -> Point {
        ((preview - self.pan).to_vec2() / self.zoom).to_point()
    }

    pub fn to_preview(&self, preset: Point) -> Point {
        (preset.to_vec2() * self.zoom).to_point() + self.pan
    }
}
