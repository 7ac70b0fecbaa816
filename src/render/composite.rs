use crate::foundation::math::mul_div255;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels, with an extra layer opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Premultiplied RGBA8 surface, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32, clear: PremulRgba8) -> Self {
        let px = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: clear.repeat(px),
        }
    }

    /// Composite `src` with its top-left corner at (`x0`, `y0`); parts outside are clipped.
    /// Any `i64` position is accepted.
    pub fn blit_over(&mut self, src: &Surface, x0: i64, y0: i64, opacity: f32) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        let x_start = x0.max(0);
        let y_start = y0.max(0);
        let x_end = x0.saturating_add(i64::from(src.width)).min(dst_w);
        let y_end = y0.saturating_add(i64::from(src.height)).min(dst_h);
        if x_start >= x_end || y_start >= y_end {
            return;
        }

        for y in y_start..y_end {
            let sy = (y - y0) as usize;
            for x in x_start..x_end {
                let sx = (x - x0) as usize;
                let si = (sy * src.width as usize + sx) * 4;
                let di = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
                let s = [
                    src.data[si],
                    src.data[si + 1],
                    src.data[si + 2],
                    src.data[si + 3],
                ];
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s, opacity));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
