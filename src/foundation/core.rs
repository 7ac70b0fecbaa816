use crate::foundation::error::{ArplusError, ArplusResult};
use crate::foundation::math::Fnv1a64;

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Output surface dimensions in preset pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

/// Placement of one layer inside one preset's coordinate space.
///
/// `translation_*` is where the layer's center lands, in preset pixels. `scale` is uniform and
/// relative to the layer's source pixels (1.0 = one source pixel per output pixel). `rotation`
/// is in degrees, clockwise in y-down space, and only honored when the rotation capability is
/// enabled.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    pub translation_x: f64,
    pub translation_y: f64,
    pub scale: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation_x: 0.0,
            translation_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform {
    pub fn centered_at(center: Point, scale: f64) -> Self {
        Self {
            translation_x: center.x,
            translation_y: center.y,
            scale,
            rotation: 0.0,
        }
    }

    pub fn translation(self) -> Point {
        Point::new(self.translation_x, self.translation_y)
    }

    pub fn with_translation(self, p: Point) -> Self {
        Self {
            translation_x: p.x,
            translation_y: p.y,
            ..self
        }
    }

    pub fn validate(&self) -> ArplusResult<()> {
        let fields = [
            ("translation_x", self.translation_x),
            ("translation_y", self.translation_y),
            ("scale", self.scale),
            ("rotation", self.rotation),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(ArplusError::invalid_transform(format!(
                    "{name} must be finite (got {v})"
                )));
            }
        }
        if self.scale <= 0.0 {
            return Err(ArplusError::invalid_transform(format!(
                "scale must be > 0 (got {})",
                self.scale
            )));
        }
        Ok(())
    }

    /// Map from layer-local space (origin at the layer center, source pixel units) into preset
    /// space.
    ///
    /// Canonical order: T(translation) * R(rotation) * S(scale).
    pub fn to_affine(self, rotation: bool) -> Affine {
        let t = Affine::translate(Vec2::new(self.translation_x, self.translation_y));
        let s = Affine::scale(self.scale);
        if rotation && self.rotation != 0.0 {
            t * Affine::rotate(self.rotation.to_radians()) * s
        } else {
            t * s
        }
    }
}

/// Straight (non-premultiplied) RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ArplusResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(ArplusError::validation(format!(
                "pixel buffer {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer filled with one straight RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> ArplusResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            data.extend_from_slice(&rgba);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Stable 64-bit content hash (dimensions + bytes).
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(self.width));
        h.write_u64(u64::from(self.height));
        h.write_bytes(&self.data);
        h.finish()
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> ArplusResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ArplusError::validation("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
