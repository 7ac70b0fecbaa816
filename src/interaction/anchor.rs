//! Scale changes that keep one point fixed.
//!
//! The anchor is expressed in preset space. Because the preview mapping is a uniform zoom plus
//! pan, a point fixed in preset space is also fixed in preview space.

use crate::foundation::core::{Point, Transform};

/// Inclusive scale range shared by the slider and wheel zoom.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

impl ScaleBounds {
    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Where `p` (preset space) falls in the layer's local space: source pixels, origin at the
/// layer center.
pub fn layer_local_point(t: Transform, p: Point, rotation: bool) -> Point {
    t.to_affine(rotation).inverse() * p
}

/// Same transform with `new_scale`, translated so `anchor` maps to the same layer-local point
/// as before.
pub fn anchored_rescale(t: Transform, anchor: Point, new_scale: f64, rotation: bool) -> Transform {
    let local = layer_local_point(t, anchor, rotation);
    let rescaled = Transform {
        scale: new_scale,
        ..t
    };
    let landed = rescaled.to_affine(rotation) * local;
    rescaled.with_translation(t.translation() + (anchor - landed))
}

/// One wheel step: multiply by `factor` per notch direction, then clamp.
pub fn wheel_step_scale(old: f64, factor: f64, delta: f64, bounds: ScaleBounds) -> f64 {
    let stepped = if delta > 0.0 {
        old * factor
    } else if delta < 0.0 {
        old / factor
    } else {
        old
    };
    bounds.clamp(stepped)
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/anchor.rs"]
mod tests;
