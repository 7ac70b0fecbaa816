use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::{
        decode::load_layer,
        layer::{Layer, LayerId},
    },
    export::batch::ExportThreading,
    foundation::error::{ArplusError, ArplusResult},
    interaction::controller::InteractionConfig,
    project::{model::Project, state::ProjectState},
    render::RenderSettings,
};

pub fn state_from_json(s: &str) -> ArplusResult<ProjectState> {
    let state: ProjectState =
        serde_json::from_str(s).map_err(|e| ArplusError::serde(e.to_string()))?;
    state.validate()?;
    Ok(state)
}

pub fn state_to_json(state: &ProjectState) -> ArplusResult<String> {
    serde_json::to_string_pretty(state).map_err(|e| ArplusError::serde(e.to_string()))
}

pub fn load_state(path: &Path) -> ArplusResult<ProjectState> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read project state '{}'", path.display()))?;
    state_from_json(&s)
}

pub fn save_state(state: &ProjectState, path: &Path) -> ArplusResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create state dir '{}'", parent.display()))?;
    }
    let json = state_to_json(state)?;
    std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

/// One layer entry of a project manifest.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LayerSource {
    pub id: LayerId,
    /// Image path, relative to the manifest directory.
    pub source: String,
    #[serde(default)]
    pub logo: bool,
    /// Set for text logos rasterized elsewhere; `source` then points at the raster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// On-disk description of a project: layer sources plus optional placement and settings.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProjectManifest {
    pub layers: Vec<LayerSource>,
    #[serde(default)]
    pub state: ProjectState,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub threading: ExportThreading,
}

impl ProjectManifest {
    pub fn read(path: &Path) -> ArplusResult<Self> {
        let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ArplusError::serde(format!("parse project '{}': {e}", path.display())))
    }

    /// Decode every layer (paths relative to `root`), attach the persisted state, then place
    /// whatever the state does not cover.
    pub fn load_project(&self, root: &Path) -> ArplusResult<Project> {
        let mut project = Project::new();
        for src in &self.layers {
            let path = resolve_path(root, &src.source);
            let mut layer = load_layer(src.id.clone(), &path, src.logo)?;
            if let Some(content) = &src.text {
                layer = retag_text(layer, content);
            }
            project.add_layer(layer)?;
        }
        project.load_state(self.state.clone())?;
        project.auto_place_all()?;
        Ok(project)
    }
}

fn retag_text(layer: Layer, content: &str) -> Layer {
    Layer {
        kind: crate::assets::layer::LayerKind::Text {
            content: content.to_string(),
        },
        ..layer
    }
}

fn resolve_path(root: &Path, source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/persist.rs"]
mod tests;
