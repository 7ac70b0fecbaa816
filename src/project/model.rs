use std::sync::Arc;

use crate::{
    assets::layer::{Layer, LayerId},
    foundation::{
        core::Transform,
        error::{ArplusError, ArplusResult},
    },
    presets::{self, PresetId},
    project::{
        placement::{FitMode, default_transform, fitted_transform},
        state::{LayerState, ProjectState},
    },
};

/// The live, mutable project: imported layers plus their per-preset placement.
#[derive(Clone, Debug, Default)]
pub struct Project {
    layers: Vec<Layer>,
    state: ProjectState,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a previously persisted state. Entries for layers that are not imported are
    /// dropped with a warning.
    pub fn load_state(&mut self, mut state: ProjectState) -> ArplusResult<()> {
        state.validate()?;
        let dropped = state.retain_layers(|id| self.layer(id).is_some());
        for id in dropped {
            tracing::warn!(layer = %id, "dropping persisted placement for unknown layer");
        }
        self.state = state;
        Ok(())
    }

    /// Add a layer without placing it anywhere.
    pub fn add_layer(&mut self, layer: Layer) -> ArplusResult<()> {
        if self.layer(&layer.id).is_some() {
            return Err(ArplusError::validation(format!(
                "layer '{}' already exists",
                layer.id
            )));
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Add a layer and store its default placement under every preset.
    pub fn import_layer(&mut self, layer: Layer) -> ArplusResult<()> {
        let id = layer.id.clone();
        self.add_layer(layer)?;
        self.auto_place(&id)
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    /// Layers in import order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    /// Remove a layer and cascade to every preset. Missing ids are logged and ignored.
    pub fn remove_layer(&mut self, id: &LayerId) {
        let before = self.layers.len();
        self.layers.retain(|l| &l.id != id);
        let removed_state = self.state.remove_layer(id);
        if before == self.layers.len() && !removed_state {
            tracing::warn!(layer = %id, "remove_layer: unknown layer ignored");
        }
    }

    /// Stored transform, or the computed default when the pair was never placed. Reading never
    /// writes.
    pub fn get_transform(&self, preset: PresetId, id: &LayerId) -> ArplusResult<Transform> {
        Ok(self.layer_state(preset, id)?.transform)
    }

    pub fn set_transform(
        &mut self,
        preset: PresetId,
        id: &LayerId,
        transform: Transform,
    ) -> ArplusResult<()> {
        self.require_layer(id)?;
        self.state.set_transform(preset, id, transform)
    }

    /// Effective state for the pair: stored entry (z-order resolved) or the lazy default.
    pub fn layer_state(&self, preset: PresetId, id: &LayerId) -> ArplusResult<LayerState> {
        let index = self.require_index(id)?;
        Ok(resolve_state(&self.layers, &self.state, preset, index))
    }

    /// Whether the pair has an explicit entry (as opposed to the lazy default).
    pub fn is_placed(&self, preset: PresetId, id: &LayerId) -> bool {
        self.state.layer_state(preset, id).is_some()
    }

    pub fn set_visible(
        &mut self,
        preset: PresetId,
        id: &LayerId,
        visible: bool,
    ) -> ArplusResult<()> {
        self.update(preset, id, |s| s.visible = visible)
    }

    pub fn set_opacity(
        &mut self,
        preset: PresetId,
        id: &LayerId,
        opacity: f64,
    ) -> ArplusResult<()> {
        self.update(preset, id, |s| s.opacity = opacity)
    }

    pub fn set_z_order(&mut self, preset: PresetId, id: &LayerId, z: i32) -> ArplusResult<()> {
        self.update(preset, id, |s| s.z_order = Some(z))
    }

    /// Replace the pair's entry with a fresh, centered placement sized by `mode`.
    pub fn reset_layer(
        &mut self,
        preset: PresetId,
        id: &LayerId,
        mode: FitMode,
    ) -> ArplusResult<()> {
        let layer = self.require_layer(id)?;
        let canvas = presets::preset(preset).canvas();
        let state = LayerState::new(fitted_transform(canvas, layer, mode));
        self.state.set_layer_state(preset, id, state)
    }

    /// Store the default placement under every preset where the layer has no entry yet.
    pub fn auto_place(&mut self, id: &LayerId) -> ArplusResult<()> {
        let layer = self.require_layer(id)?.clone();
        for preset in PresetId::ALL {
            if self.state.layer_state(preset, id).is_none() {
                let canvas = presets::preset(preset).canvas();
                self.state
                    .set_transform(preset, id, default_transform(canvas, &layer))?;
            }
        }
        Ok(())
    }

    /// [`Project::auto_place`] for every layer.
    pub fn auto_place_all(&mut self) -> ArplusResult<()> {
        let ids: Vec<LayerId> = self.layers.iter().map(|l| l.id.clone()).collect();
        for id in &ids {
            self.auto_place(id)?;
        }
        Ok(())
    }

    /// What the compositor would draw for `preset`, bottom-most first.
    pub fn placed_layers(&self, preset: PresetId) -> Vec<PlacedLayer<'_>> {
        placed_in(&self.layers, &self.state, preset)
    }

    /// Drop every placement, keeping the layers.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Immutable copy for export. Later edits to `self` never reach the snapshot.
    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            layers: Arc::from(self.layers.clone()),
            state: Arc::new(self.state.clone()),
        }
    }

    fn update(
        &mut self,
        preset: PresetId,
        id: &LayerId,
        f: impl FnOnce(&mut LayerState),
    ) -> ArplusResult<()> {
        let index = self.require_index(id)?;
        let mut state = self
            .state
            .layer_state(preset, id)
            .copied()
            .unwrap_or_else(|| lazy_state(&self.layers[index], preset));
        f(&mut state);
        self.state.set_layer_state(preset, id, state)
    }

    fn require_index(&self, id: &LayerId) -> ArplusResult<usize> {
        self.layers
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| ArplusError::unknown_layer(id.as_str()))
    }

    fn require_layer(&self, id: &LayerId) -> ArplusResult<&Layer> {
        self.layer(id)
            .ok_or_else(|| ArplusError::unknown_layer(id.as_str()))
    }
}

fn lazy_state(layer: &Layer, preset: PresetId) -> LayerState {
    LayerState::new(default_transform(presets::preset(preset).canvas(), layer))
}

fn resolve_state(
    layers: &[Layer],
    state: &ProjectState,
    preset: PresetId,
    index: usize,
) -> LayerState {
    let layer = &layers[index];
    let mut out = state
        .layer_state(preset, &layer.id)
        .copied()
        .unwrap_or_else(|| lazy_state(layer, preset));
    out.z_order = Some(out.z_order.unwrap_or(index as i32));
    out
}

/// A layer that is drawn for a preset, with its resolved state.
#[derive(Clone, Debug)]
pub struct PlacedLayer<'a> {
    pub layer: &'a Layer,
    pub state: LayerState,
}

/// Read-only project copy taken at export time. Cheap to clone and safe to share across
/// threads; layer pixels are shared with the live project, never copied.
#[derive(Clone, Debug)]
pub struct ProjectSnapshot {
    layers: Arc<[Layer]>,
    state: Arc<ProjectState>,
}

impl ProjectSnapshot {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    /// Layers with a stored, visible entry under `preset`, bottom-most first. Logo layers are
    /// left out when the preset excludes the logo. Equal z-orders keep import order.
    pub fn placed_layers(&self, preset: PresetId) -> Vec<PlacedLayer<'_>> {
        placed_in(&self.layers, &self.state, preset)
    }
}

fn placed_in<'a>(
    layers: &'a [Layer],
    state: &ProjectState,
    preset: PresetId,
) -> Vec<PlacedLayer<'a>> {
    let includes_logo = presets::preset(preset).includes_logo;
    let mut out: Vec<PlacedLayer<'a>> = layers
        .iter()
        .enumerate()
        .filter(|(_, layer)| includes_logo || !layer.is_logo)
        .filter(|(_, layer)| state.layer_state(preset, &layer.id).is_some())
        .map(|(index, layer)| PlacedLayer {
            layer,
            state: resolve_state(layers, state, preset, index),
        })
        .filter(|placed| placed.state.visible)
        .collect();
    out.sort_by_key(|p| p.state.z_order.unwrap_or_default());
    out
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
