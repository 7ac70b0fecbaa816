use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arplus", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the export presets.
    Presets,
    /// Render presets of a project into a directory.
    Export(ExportArgs),
    /// Report upscale warnings without writing any file.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Project manifest JSON.
    #[arg(long)]
    project: PathBuf,

    /// Output directory; files are named `<preset_id>.<ext>`.
    #[arg(long)]
    out: PathBuf,

    /// Preset id to export (repeatable). Defaults to every preset.
    #[arg(long = "preset")]
    presets: Vec<String>,

    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Render presets on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Project manifest JSON.
    #[arg(long)]
    project: PathBuf,

    /// Preset id to inspect (repeatable). Defaults to every preset.
    #[arg(long = "preset")]
    presets: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    #[value(alias = "jpeg")]
    Jpg,
    Webp,
}

impl From<FormatChoice> for arplus::ExportFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Png => arplus::ExportFormat::Png,
            FormatChoice::Jpg => arplus::ExportFormat::Jpeg,
            FormatChoice::Webp => arplus::ExportFormat::Webp,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Presets => cmd_presets(),
        Command::Export(args) => cmd_export(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_presets() -> anyhow::Result<()> {
    for p in arplus::presets::all() {
        let logo = if p.includes_logo { "logo" } else { "no-logo" };
        println!(
            "{:<20} {:>5}x{:<5} {:<8} {}",
            p.id.as_str(),
            p.width,
            p.height,
            logo,
            p.label
        );
    }
    Ok(())
}

fn read_project(path: &Path) -> anyhow::Result<(arplus::ProjectManifest, arplus::Project)> {
    let manifest = arplus::ProjectManifest::read(path)?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let project = manifest
        .load_project(root)
        .with_context(|| format!("load project '{}'", path.display()))?;
    Ok((manifest, project))
}

fn select_presets(ids: &[String]) -> anyhow::Result<Vec<arplus::PresetId>> {
    if ids.is_empty() {
        return Ok(arplus::PresetId::ALL.to_vec());
    }
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        let preset = arplus::presets::resolve(id)?;
        if !out.contains(&preset.id) {
            out.push(preset.id);
        }
    }
    Ok(out)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (manifest, project) = read_project(&args.project)?;
    let presets = select_presets(&args.presets)?;

    let mut threading = manifest.threading.clone();
    if args.parallel {
        threading.parallel = true;
    }
    if args.threads.is_some() {
        threading.threads = args.threads;
    }

    let report = arplus::export_to_dir(
        &project.snapshot(),
        &presets,
        &args.out,
        args.format.into(),
        &manifest.render,
        &threading,
    )?;

    for w in report.warnings() {
        eprintln!("warning: {w}");
    }
    for export in &report.exports {
        match (&export.result, &export.path) {
            (Ok(_), Some(path)) => eprintln!("wrote {}", path.display()),
            (Err(e), _) => eprintln!("error: {}: {e}", export.preset),
            (Ok(_), None) => {}
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} presets failed to export", report.exports.len());
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let (_, project) = read_project(&args.project)?;
    let presets = select_presets(&args.presets)?;
    let snapshot = project.snapshot();

    let mut total = 0usize;
    for preset in presets {
        for w in arplus::export::quality::inspect(&snapshot, preset) {
            println!("{w}");
            total += 1;
        }
    }
    eprintln!("{total} upscale warning(s)");
    Ok(())
}
