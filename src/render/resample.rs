//! Layer rasters in output space.
//!
//! Scaling goes through `image::imageops::resize`, whose kernels widen with the reduction
//! ratio, so downscales average over the covered source area instead of skipping pixels.
//! Everything works on premultiplied pixels so transparent edges do not bleed dark fringes.

use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::{
        core::{Affine, PixelBuffer, Point, Rect, Vec2},
        error::{ArplusError, ArplusResult},
        math::premultiply_rgba8_in_place,
    },
    render::composite::Surface,
};

/// Output size in whole pixels for a source scaled by `scale` (never below 1x1).
pub fn scaled_size(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let dim = |v: u32| ((f64::from(v) * scale).round().max(1.0)).min(f64::from(u32::MAX)) as u32;
    (dim(width), dim(height))
}

/// Filter used for a given direction of scaling.
pub fn filter_for(src: (u32, u32), dst: (u32, u32)) -> FilterType {
    if dst.0 < src.0 || dst.1 < src.1 {
        FilterType::Lanczos3
    } else {
        FilterType::CatmullRom
    }
}

/// Premultiply a straight-alpha source and resample it to `scale`.
pub fn scale_layer(source: &PixelBuffer, scale: f64) -> ArplusResult<Surface> {
    let mut data = source.data.clone();
    premultiply_rgba8_in_place(&mut data);
    let (tw, th) = scaled_size(source.width, source.height, scale);
    if (tw, th) == (source.width, source.height) {
        return Ok(Surface {
            width: tw,
            height: th,
            data,
        });
    }

    let img = RgbaImage::from_raw(source.width, source.height, data)
        .ok_or_else(|| ArplusError::validation("layer source length does not match its size"))?;
    let filter = filter_for((source.width, source.height), (tw, th));
    let mut data = image::imageops::resize(&img, tw, th, filter).into_raw();
    clamp_to_alpha(&mut data);
    Ok(Surface {
        width: tw,
        height: th,
        data,
    })
}

/// Resample only the part of a layer that lands on a `width` x `height` canvas.
///
/// `to_canvas` maps layer-local space (source pixels, origin at the center) into canvas space,
/// as [`Transform::to_affine`](crate::foundation::core::Transform::to_affine) does. The work
/// and the returned surface are bounded by the canvas, whatever the scale. Returns the window
/// and its top-left canvas position, or `None` when nothing is visible.
pub fn sample_window(
    source: &PixelBuffer,
    to_canvas: Affine,
    width: u32,
    height: u32,
) -> Option<(Surface, i64, i64)> {
    let (sw, sh) = (f64::from(source.width), f64::from(source.height));
    let local_rect = Rect::new(-sw * 0.5, -sh * 0.5, sw * 0.5, sh * 0.5);
    let bounds = to_canvas.transform_rect_bbox(local_rect);
    let visible = bounds.intersect(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
    // Also rejects NaN bounds from degenerate transforms.
    if !(visible.width() > 0.0 && visible.height() > 0.0) {
        return None;
    }

    let x0 = (visible.x0.floor().max(0.0) as u32).min(width);
    let y0 = (visible.y0.floor().max(0.0) as u32).min(height);
    let x1 = (visible.x1.ceil() as u32).min(width);
    let y1 = (visible.y1.ceil() as u32).min(height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    let mut data = source.data.clone();
    premultiply_rgba8_in_place(&mut data);
    let src = Surface {
        width: source.width,
        height: source.height,
        data,
    };

    let inv = to_canvas.inverse();
    let (ww, wh) = (x1 - x0, y1 - y0);
    let mut out = Surface::new(ww, wh, [0, 0, 0, 0]);
    for y in 0..wh {
        for x in 0..ww {
            let p = Point::new(f64::from(x0 + x) + 0.5, f64::from(y0 + y) + 0.5);
            // Source pixel space, origin at the top-left corner.
            let sp = inv * p + Vec2::new(sw * 0.5, sh * 0.5);
            if !(0.0..=sw).contains(&sp.x) || !(0.0..=sh).contains(&sp.y) {
                continue;
            }
            // Edge texels extend to the layer border instead of fading into transparency.
            let sx = (sp.x - 0.5).clamp(0.0, sw - 1.0);
            let sy = (sp.y - 0.5).clamp(0.0, sh - 1.0);
            let i = ((y as usize) * (ww as usize) + (x as usize)) * 4;
            out.data[i..i + 4].copy_from_slice(&sample_bilinear(&src, sx, sy));
        }
    }
    Some((out, i64::from(x0), i64::from(y0)))
}

/// Rotate a premultiplied surface by `degrees` (clockwise in y-down space) about its center,
/// growing the surface to the rotated bounding box. Bilinear sampling, transparent outside.
pub fn rotate_surface(src: &Surface, degrees: f64) -> Surface {
    let turn = degrees.rem_euclid(360.0);
    if turn == 0.0 {
        return src.clone();
    }
    let (sin, cos) = turn.to_radians().sin_cos();
    let sw = f64::from(src.width);
    let sh = f64::from(src.height);
    let bw = sw * cos.abs() + sh * sin.abs();
    let bh = sw * sin.abs() + sh * cos.abs();
    // Trim float noise at right angles before rounding up.
    let width = ((bw - 1e-9).ceil().max(1.0)) as u32;
    let height = ((bh - 1e-9).ceil().max(1.0)) as u32;

    let mut out = Surface::new(width, height, [0, 0, 0, 0]);
    let (dcx, dcy) = (f64::from(width) * 0.5, f64::from(height) * 0.5);
    let (scx, scy) = (sw * 0.5, sh * 0.5);

    for y in 0..height {
        for x in 0..width {
            let dx = f64::from(x) + 0.5 - dcx;
            let dy = f64::from(y) + 0.5 - dcy;
            // Inverse rotation back into the source frame.
            let sx = cos * dx + sin * dy + scx;
            let sy = -sin * dx + cos * dy + scy;
            let px = sample_bilinear(src, sx - 0.5, sy - 0.5);
            let i = ((y as usize) * (width as usize) + (x as usize)) * 4;
            out.data[i..i + 4].copy_from_slice(&px);
        }
    }
    out
}

/// Kernels with negative lobes can overshoot; a premultiplied channel never exceeds alpha.
fn clamp_to_alpha(premul: &mut [u8]) {
    for px in premul.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }
}

fn sample_bilinear(src: &Surface, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let fetch = |xi: i64, yi: i64| -> [f64; 4] {
        if xi < 0 || yi < 0 || xi >= i64::from(src.width) || yi >= i64::from(src.height) {
            return [0.0; 4];
        }
        let i = ((yi as usize) * (src.width as usize) + (xi as usize)) * 4;
        [
            f64::from(src.data[i]),
            f64::from(src.data[i + 1]),
            f64::from(src.data[i + 2]),
            f64::from(src.data[i + 3]),
        ]
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
