//! Export runs over an immutable [`ProjectSnapshot`].
//!
//! Each preset renders independently. A failing preset is recorded in its own
//! [`PresetExport`] and never stops the rest of the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    export::{
        encode::{ExportFormat, output_path, write_rendered},
        quality::{UpscaleWarning, inspect},
    },
    foundation::{
        core::PixelBuffer,
        error::{ArplusError, ArplusResult},
    },
    presets::{self, PresetId},
    project::model::ProjectSnapshot,
    render::{RenderSettings, compositor::render_preset as composite_preset},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportThreading {
    pub parallel: bool,
    /// Worker count for parallel runs; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Pixels plus the advisory findings for one preset.
#[derive(Clone, Debug)]
pub struct RenderedPreset {
    pub preset: PresetId,
    pub buffer: PixelBuffer,
    pub warnings: Vec<UpscaleWarning>,
}

/// Outcome of one preset inside a batch.
#[derive(Debug)]
pub struct PresetExport {
    pub preset: PresetId,
    pub result: ArplusResult<RenderedPreset>,
    /// Set when the batch also wrote the buffer to disk successfully.
    pub path: Option<PathBuf>,
}

/// All per-preset outcomes of one export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub exports: Vec<PresetExport>,
}

impl ExportReport {
    /// Every upscale warning of the run, in preset order.
    pub fn warnings(&self) -> Vec<&UpscaleWarning> {
        self.exports
            .iter()
            .filter_map(|e| e.result.as_ref().ok())
            .flat_map(|r| r.warnings.iter())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (PresetId, &ArplusError)> {
        self.exports
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (e.preset, err)))
    }

    pub fn is_success(&self) -> bool {
        self.exports.iter().all(|e| e.result.is_ok())
    }
}

/// Render one preset and run the quality guard on the same snapshot.
pub fn render_preset(
    snapshot: &ProjectSnapshot,
    preset: PresetId,
    settings: &RenderSettings,
) -> ArplusResult<RenderedPreset> {
    let buffer = composite_preset(presets::preset(preset), snapshot, settings)?;
    let warnings = inspect(snapshot, preset);
    Ok(RenderedPreset {
        preset,
        buffer,
        warnings,
    })
}

/// [`render_preset`] by string id.
pub fn render_by_id(
    snapshot: &ProjectSnapshot,
    preset_id: &str,
    settings: &RenderSettings,
) -> ArplusResult<RenderedPreset> {
    let preset = presets::resolve(preset_id)?;
    render_preset(snapshot, preset.id, settings)
}

/// Render every requested preset; results keep the order of `presets`.
pub fn export_batch(
    snapshot: &ProjectSnapshot,
    presets: &[PresetId],
    settings: &RenderSettings,
    threading: &ExportThreading,
) -> ArplusResult<ExportReport> {
    let results = run(presets, threading, |preset| {
        render_preset(snapshot, preset, settings)
    })?;
    Ok(ExportReport {
        exports: presets
            .iter()
            .zip(results)
            .map(|(&preset, result)| PresetExport {
                preset,
                result,
                path: None,
            })
            .collect(),
    })
}

/// Render and encode every requested preset into `dir` as `<preset_id>.<ext>`.
pub fn export_to_dir(
    snapshot: &ProjectSnapshot,
    presets: &[PresetId],
    dir: &Path,
    format: ExportFormat,
    settings: &RenderSettings,
    threading: &ExportThreading,
) -> ArplusResult<ExportReport> {
    let matte = settings
        .clear_rgba
        .map(|c| [c[0], c[1], c[2]])
        .unwrap_or([255, 255, 255]);
    let results = run(presets, threading, |preset| {
        let rendered = render_preset(snapshot, preset, settings)?;
        let path = output_path(dir, preset, format);
        write_rendered(&rendered.buffer, &path, format, matte)?;
        Ok((rendered, path))
    })?;

    Ok(ExportReport {
        exports: presets
            .iter()
            .zip(results)
            .map(|(&preset, result)| match result {
                Ok((rendered, path)) => PresetExport {
                    preset,
                    result: Ok(rendered),
                    path: Some(path),
                },
                Err(e) => PresetExport {
                    preset,
                    result: Err(e),
                    path: None,
                },
            })
            .collect(),
    })
}

/// Run [`export_batch`] on a worker thread. The snapshot is moved in, so later edits to the
/// live project cannot reach the render.
pub fn spawn_export(
    snapshot: ProjectSnapshot,
    presets: Vec<PresetId>,
    settings: RenderSettings,
    threading: ExportThreading,
) -> std::thread::JoinHandle<ArplusResult<ExportReport>> {
    std::thread::spawn(move || export_batch(&snapshot, &presets, &settings, &threading))
}

fn run<T, F>(
    presets: &[PresetId],
    threading: &ExportThreading,
    job: F,
) -> ArplusResult<Vec<ArplusResult<T>>>
where
    T: Send,
    F: Fn(PresetId) -> ArplusResult<T> + Sync,
{
    if !threading.parallel || presets.len() < 2 {
        return Ok(presets.iter().map(|&p| job(p)).collect());
    }
    let pool = build_thread_pool(threading.threads)?;
    Ok(pool.install(|| presets.par_iter().map(|&p| job(p)).collect()))
}

fn build_thread_pool(threads: Option<usize>) -> ArplusResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ArplusError::validation(
            "export threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ArplusError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
