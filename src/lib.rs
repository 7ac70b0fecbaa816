//! Arplus composes imported image layers onto a fixed catalog of raster presets.
//!
//! Every preset keeps its own placement of every layer. Edits flow through a
//! [`Project`]; exports render from an immutable [`ProjectSnapshot`]:
//!
//! - Import layers and place them per preset
//! - Drive edits with an [`InteractionController`]
//! - Render or export presets with [`export_batch`] / [`export_to_dir`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod export;
pub mod foundation;
pub mod interaction;
pub mod presets;
pub mod project;
pub mod render;

pub use crate::assets::decode::{decode_image, load_layer};
pub use crate::assets::layer::{Layer, LayerId, LayerKind};
pub use crate::export::batch::{
    ExportReport, ExportThreading, PresetExport, RenderedPreset, export_batch, export_to_dir,
    render_by_id, render_preset, spawn_export,
};
pub use crate::export::encode::{ExportFormat, write_rendered};
pub use crate::export::quality::UpscaleWarning;
pub use crate::foundation::core::{Affine, Canvas, PixelBuffer, Point, Rect, Transform, Vec2};
pub use crate::foundation::error::{ArplusError, ArplusResult};
pub use crate::interaction::controller::{
    InputEvent, InteractionConfig, InteractionController, Outcome,
};
pub use crate::interaction::viewport::PreviewViewport;
pub use crate::presets::{Preset, PresetId};
pub use crate::project::model::{PlacedLayer, Project, ProjectSnapshot};
pub use crate::project::persist::ProjectManifest;
pub use crate::project::placement::FitMode;
pub use crate::project::state::{LayerState, PresetState, ProjectState};
pub use crate::render::RenderSettings;
