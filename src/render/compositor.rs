//! Preset rendering.
//!
//! `render_preset` is a pure function of (preset, snapshot, settings): no caches, no clocks,
//! integer compositing. Identical inputs yield byte-identical output.
//!
//! Layers whose scaled raster would exceed [`MAX_RASTER_PER_CANVAS`] canvases are sampled
//! straight into the visible window, so memory and time stay bounded by the preset size for any
//! valid transform.

use crate::{
    foundation::{
        core::{PixelBuffer, Transform},
        error::ArplusResult,
        math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    },
    presets::{self, Preset},
    project::model::{PlacedLayer, ProjectSnapshot},
    render::{
        RenderSettings,
        composite::Surface,
        resample::{rotate_surface, sample_window, scale_layer, scaled_size},
    },
};

/// Largest full raster, in multiples of the canvas area, resampled as a whole.
pub const MAX_RASTER_PER_CANVAS: u64 = 4;

/// Render by string id; unknown ids fail with `UnknownPreset` before any work is done.
pub fn render(
    preset_id: &str,
    snapshot: &ProjectSnapshot,
    settings: &RenderSettings,
) -> ArplusResult<PixelBuffer> {
    let preset = presets::resolve(preset_id)?;
    render_preset(preset, snapshot, settings)
}

#[tracing::instrument(skip_all, fields(preset = %preset.id))]
pub fn render_preset(
    preset: &Preset,
    snapshot: &ProjectSnapshot,
    settings: &RenderSettings,
) -> ArplusResult<PixelBuffer> {
    let mut clear = settings.clear_rgba.unwrap_or([0, 0, 0, 0]);
    premultiply_rgba8_in_place(&mut clear);
    let mut canvas = Surface::new(preset.width, preset.height, clear);

    for placed in snapshot.placed_layers(preset.id) {
        draw_layer(&mut canvas, &placed, settings)?;
    }

    let mut data = canvas.data;
    unpremultiply_rgba8_in_place(&mut data);
    PixelBuffer::new(preset.width, preset.height, data)
}

fn draw_layer(
    canvas: &mut Surface,
    placed: &PlacedLayer<'_>,
    settings: &RenderSettings,
) -> ArplusResult<()> {
    let t = placed.state.transform;
    let source = &placed.layer.source;
    let rotate = settings.rotation && t.rotation.rem_euclid(360.0) != 0.0;
    let opacity = placed.state.opacity as f32;

    let (tw, th) = scaled_size(source.width, source.height, t.scale);
    let canvas_px = u64::from(canvas.width) * u64::from(canvas.height);
    if u64::from(tw) * u64::from(th) > MAX_RASTER_PER_CANVAS.saturating_mul(canvas_px) {
        let window = sample_window(source, t.to_affine(rotate), canvas.width, canvas.height);
        let Some((window, x0, y0)) = window else {
            tracing::debug!(layer = %placed.layer.id, "layer outside canvas");
            return Ok(());
        };
        tracing::debug!(
            layer = %placed.layer.id,
            x0,
            y0,
            width = window.width,
            height = window.height,
            "compositing visible window of oversized layer"
        );
        canvas.blit_over(&window, x0, y0, opacity);
        return Ok(());
    }

    let mut raster = scale_layer(source, t.scale)?;
    if rotate {
        raster = rotate_surface(&raster, t.rotation);
    }
    let (x0, y0) = top_left(t, &raster);
    tracing::debug!(
        layer = %placed.layer.id,
        x0,
        y0,
        width = raster.width,
        height = raster.height,
        "compositing layer"
    );
    canvas.blit_over(&raster, x0, y0, opacity);
    Ok(())
}

/// Integer placement of a raster centered on the transform's translation.
fn top_left(t: Transform, raster: &Surface) -> (i64, i64) {
    let x = t.translation_x - f64::from(raster.width) * 0.5;
    let y = t.translation_y - f64::from(raster.height) * 0.5;
    (x.round() as i64, y.round() as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
