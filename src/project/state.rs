//! Per-preset layer placement. Pure data plus invariants; no rendering and no IO.
//!
//! Presets are independent namespaces: writing under one preset never touches another
//! preset's entry for the same layer.

use std::collections::BTreeMap;

use crate::{
    assets::layer::LayerId,
    foundation::{
        core::Transform,
        error::{ArplusError, ArplusResult},
    },
    presets::PresetId,
};

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

/// Everything stored for one layer under one preset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerState {
    #[serde(flatten)]
    pub transform: Transform,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Stacking position; `None` falls back to the layer's import index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_order: Option<i32>,
}

impl LayerState {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            visible: true,
            opacity: 1.0,
            z_order: None,
        }
    }

    pub fn validate(&self) -> ArplusResult<()> {
        self.transform.validate()?;
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ArplusError::invalid_transform(format!(
                "opacity must be within 0..=1 (got {})",
                self.opacity
            )));
        }
        Ok(())
    }
}

/// Layer placements for a single preset.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PresetState {
    layers: BTreeMap<LayerId, LayerState>,
}

impl PresetState {
    pub fn get(&self, layer: &LayerId) -> Option<&LayerState> {
        self.layers.get(layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LayerId, &LayerState)> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Placements for every preset, keyed by preset then layer.
///
/// Persisted as `preset_id -> {layer_id -> {translation_x, translation_y, scale, rotation,
/// visible?, opacity?, z_order?}}`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ProjectState {
    presets: BTreeMap<PresetId, PresetState>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(&self, preset: PresetId) -> Option<&PresetState> {
        self.presets.get(&preset)
    }

    pub fn layer_state(&self, preset: PresetId, layer: &LayerId) -> Option<&LayerState> {
        self.presets.get(&preset).and_then(|p| p.get(layer))
    }

    /// Overwrite the whole entry. Invalid states are rejected and nothing is written.
    pub fn set_layer_state(
        &mut self,
        preset: PresetId,
        layer: &LayerId,
        state: LayerState,
    ) -> ArplusResult<()> {
        state.validate()?;
        self.presets
            .entry(preset)
            .or_default()
            .layers
            .insert(layer.clone(), state);
        Ok(())
    }

    /// Overwrite only the transform, keeping visibility, opacity and z-order of an existing
    /// entry.
    pub fn set_transform(
        &mut self,
        preset: PresetId,
        layer: &LayerId,
        transform: Transform,
    ) -> ArplusResult<()> {
        transform.validate()?;
        let entry = self
            .presets
            .entry(preset)
            .or_default()
            .layers
            .entry(layer.clone())
            .or_insert_with(|| LayerState::new(transform));
        entry.transform = transform;
        Ok(())
    }

    /// Drop the layer from every preset. Returns whether anything was removed.
    pub fn remove_layer(&mut self, layer: &LayerId) -> bool {
        let mut removed = false;
        for preset in self.presets.values_mut() {
            removed |= preset.layers.remove(layer).is_some();
        }
        removed
    }

    /// Drop entries whose layer is not in `known`, returning the dropped ids.
    pub fn retain_layers(&mut self, known: impl Fn(&LayerId) -> bool) -> Vec<LayerId> {
        let mut dropped = Vec::new();
        for preset in self.presets.values_mut() {
            preset.layers.retain(|id, _| {
                let keep = known(id);
                if !keep && !dropped.contains(id) {
                    dropped.push(id.clone());
                }
                keep
            });
        }
        dropped
    }

    pub fn validate(&self) -> ArplusResult<()> {
        for (preset, state) in &self.presets {
            for (layer, entry) in state.iter() {
                entry.validate().map_err(|e| match e {
                    ArplusError::InvalidTransform(msg) => {
                        ArplusError::invalid_transform(format!("{preset}/{layer}: {msg}"))
                    }
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.presets.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/state.rs"]
mod tests;
