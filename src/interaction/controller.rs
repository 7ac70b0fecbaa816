//! Turns preview-space input into placement changes for the active (preset, layer) pair.
//!
//! Events are processed strictly in arrival order and every mutation is written to the
//! project immediately, so there is no separate commit step. Events that reference a layer
//! the project no longer has are dropped with a warning.

use crate::{
    assets::layer::LayerId,
    foundation::core::{Point, Transform, Vec2},
    interaction::{
        anchor::{ScaleBounds, anchored_rescale, layer_local_point, wheel_step_scale},
        viewport::PreviewViewport,
    },
    presets::{self, PresetId},
    project::model::Project,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub scale_bounds: ScaleBounds,
    /// Scale multiplier per wheel notch.
    pub wheel_zoom_factor: f64,
    pub rotation_enabled: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            scale_bounds: ScaleBounds::default(),
            wheel_zoom_factor: 1.1,
            rotation_enabled: false,
        }
    }
}

/// Input in preview coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    SelectPreset(PresetId),
    SelectLayer(LayerId),
    PointerDown { pos: Point },
    PointerMove { pos: Point },
    PointerUp,
    /// `zoom_modifier` is the modifier key that turns the wheel into layer zoom.
    Wheel {
        pos: Point,
        delta: f64,
        zoom_modifier: bool,
    },
    /// Direct scale control, clamped to the configured bounds.
    Slider { value: f64 },
    Rotate { degrees: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Mutated,
    Selected,
    Ignored,
}

#[derive(Clone, Debug)]
struct DragCapture {
    layer: LayerId,
    /// Pointer minus layer origin, in preview pixels.
    offset: Vec2,
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    config: InteractionConfig,
    viewport: PreviewViewport,
    active_preset: PresetId,
    active_layer: Option<LayerId>,
    drag: Option<DragCapture>,
}

impl InteractionController {
    pub fn new(config: InteractionConfig, active_preset: PresetId) -> Self {
        Self {
            config,
            viewport: PreviewViewport::default(),
            active_preset,
            active_layer: None,
            drag: None,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn active_preset(&self) -> PresetId {
        self.active_preset
    }

    pub fn active_layer(&self) -> Option<&LayerId> {
        self.active_layer.as_ref()
    }

    pub fn viewport(&self) -> PreviewViewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: PreviewViewport) {
        self.viewport = viewport;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn handle(&mut self, project: &mut Project, event: InputEvent) -> Outcome {
        match event {
            InputEvent::SelectPreset(preset) => {
                self.active_preset = preset;
                self.drag = None;
                Outcome::Selected
            }
            InputEvent::SelectLayer(id) => {
                if project.layer(&id).is_none() {
                    tracing::warn!(layer = %id, "select: unknown layer ignored");
                    return Outcome::Ignored;
                }
                self.active_layer = Some(id);
                Outcome::Selected
            }
            InputEvent::PointerDown { pos } => self.pointer_down(project, pos),
            InputEvent::PointerMove { pos } => self.pointer_move(project, pos),
            InputEvent::PointerUp => {
                self.drag = None;
                Outcome::Ignored
            }
            InputEvent::Wheel {
                pos,
                delta,
                zoom_modifier,
            } => {
                if !zoom_modifier || delta == 0.0 || !delta.is_finite() {
                    return Outcome::Ignored;
                }
                self.wheel_zoom(project, pos, delta)
            }
            InputEvent::Slider { value } => self.slider(project, value),
            InputEvent::Rotate { degrees } => self.rotate(project, degrees),
        }
    }

    /// Top-most drawn layer whose bounds contain `pos`.
    pub fn hit_test(&self, project: &Project, pos: Point) -> Option<LayerId> {
        let p = self.viewport.to_preset(pos);
        let rotation = self.config.rotation_enabled;
        project
            .placed_layers(self.active_preset)
            .iter()
            .rev()
            .find(|placed| {
                let (w, h) = placed.layer.size();
                let local = layer_local_point(placed.state.transform, p, rotation);
                local.x.abs() <= w * 0.5 && local.y.abs() <= h * 0.5
            })
            .map(|placed| placed.layer.id.clone())
    }

    fn pointer_down(&mut self, project: &Project, pos: Point) -> Outcome {
        let Some(id) = self.hit_test(project, pos) else {
            self.drag = None;
            return Outcome::Ignored;
        };
        let Ok(t) = project.get_transform(self.active_preset, &id) else {
            return Outcome::Ignored;
        };
        let origin = self.viewport.to_preview(t.translation());
        self.drag = Some(DragCapture {
            layer: id.clone(),
            offset: pos - origin,
        });
        self.active_layer = Some(id);
        Outcome::Selected
    }

    fn pointer_move(&mut self, project: &mut Project, pos: Point) -> Outcome {
        let Some(drag) = self.drag.clone() else {
            return Outcome::Ignored;
        };
        let preset = self.active_preset;
        let Ok(t) = project.get_transform(preset, &drag.layer) else {
            tracing::warn!(layer = %drag.layer, "drag: layer disappeared, cancelling");
            self.drag = None;
            return Outcome::Ignored;
        };
        let origin = self.viewport.to_preset(pos - drag.offset);
        self.commit(project, preset, &drag.layer, t.with_translation(origin))
    }

    fn slider(&mut self, project: &mut Project, value: f64) -> Outcome {
        if !value.is_finite() {
            return Outcome::Ignored;
        }
        let Some((id, t)) = self.active_transform(project) else {
            return Outcome::Ignored;
        };
        // Translation is the layer center, which is already the slider's anchor.
        let next = Transform {
            scale: self.config.scale_bounds.clamp(value),
            ..t
        };
        self.commit(project, self.active_preset, &id, next)
    }

    fn wheel_zoom(&mut self, project: &mut Project, pos: Point, delta: f64) -> Outcome {
        let Some((id, t)) = self.active_transform(project) else {
            return Outcome::Ignored;
        };
        let scale = wheel_step_scale(
            t.scale,
            self.config.wheel_zoom_factor,
            delta,
            self.config.scale_bounds,
        );
        if scale == t.scale {
            return Outcome::Ignored;
        }
        let anchor = self.viewport.to_preset(pos);
        let next = anchored_rescale(t, anchor, scale, self.config.rotation_enabled);
        self.commit(project, self.active_preset, &id, next)
    }

    fn rotate(&mut self, project: &mut Project, degrees: f64) -> Outcome {
        if !self.config.rotation_enabled || !degrees.is_finite() {
            return Outcome::Ignored;
        }
        let Some((id, t)) = self.active_transform(project) else {
            return Outcome::Ignored;
        };
        let next = Transform {
            rotation: degrees.rem_euclid(360.0),
            ..t
        };
        self.commit(project, self.active_preset, &id, next)
    }

    fn active_transform(&self, project: &Project) -> Option<(LayerId, Transform)> {
        let id = self.active_layer.as_ref()?;
        match project.get_transform(self.active_preset, id) {
            Ok(t) => Some((id.clone(), t)),
            Err(e) => {
                tracing::warn!(layer = %id, error = %e, "interaction on unknown layer ignored");
                None
            }
        }
    }

    fn commit(
        &self,
        project: &mut Project,
        preset: PresetId,
        id: &LayerId,
        next: Transform,
    ) -> Outcome {
        match project.set_transform(preset, id, next) {
            Ok(()) => Outcome::Mutated,
            Err(e) => {
                tracing::warn!(
                    preset = %preset,
                    layer = %id,
                    canvas = ?presets::preset(preset).canvas(),
                    error = %e,
                    "interaction produced a rejected transform"
                );
                Outcome::Ignored
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
