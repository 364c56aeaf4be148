//! trueno-raster - rasterize a line or circle and render it headlessly.
//!
//! Asks for the surface size, algorithm and parameters (or takes them from
//! `--scene`), builds the scene, renders it through the software host and
//! exports the last frame.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use trueno_raster::config::Config;
use trueno_raster::framebuffer::Framebuffer;
use trueno_raster::output::{PngEncoder, TerminalEncoder, TerminalMode};
use trueno_raster::prompt::{parse_prompt_with, PromptSession, SceneSpec};
use trueno_raster::render::{run_frames, SceneMeshes, SoftwareHost};
use trueno_raster::scene::Scene;

#[derive(Parser, Debug)]
#[command(name = "trueno-raster")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Line and circle rasterization with a headless render host", long_about = None)]
struct Cli {
    /// Scene in one line, e.g. "bca cx=0 cy=0 r=5"; skips the interactive prompt
    #[arg(short, long)]
    scene: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the last frame to a PNG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the last frame to the terminal (ascii, unicode or ansi)
    #[arg(short, long, value_parser = preview_mode)]
    preview: Option<TerminalMode>,

    /// Number of frames to render (overrides the config)
    #[arg(short, long)]
    frames: Option<u32>,
}

fn preview_mode(s: &str) -> std::result::Result<TerminalMode, String> {
    s.parse().map_err(|e: trueno_raster::Error| e.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default_path().map(Config::load_or_default).unwrap_or_default()),
    }
}

fn read_spec(cli: &Cli, config: &Config) -> Result<SceneSpec> {
    if let Some(line) = &cli.scene {
        return parse_prompt_with(line, config.window).context("invalid --scene");
    }
    let stdin = io::stdin();
    PromptSession::new(stdin.lock(), io::stdout())
        .with_defaults(config.window)
        .run()
        .context("invalid answer")
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let spec = read_spec(cli, &config)?;

    let request = spec.request.endpoint(config.endpoint());
    let scene = Scene::build(&request).context("failed to build scene")?;
    let axes = config.axes().context("invalid plane extents")?;
    let region = scene.bounds().context("scene has no pixels")?;

    let mut host = SoftwareHost::new(
        spec.width,
        spec.height,
        region,
        config.render.padding,
        config.host_style(),
    )
    .context("failed to initialise render host")?
    .with_model(config.model());

    let mut palette = config.palette();
    if let Some(color) = spec.color {
        palette.points = color;
    }

    let meshes = SceneMeshes::upload(&mut host, &scene, &axes, palette)?;
    let frames = cli.frames.unwrap_or(config.render.frames);
    let rendered = run_frames(&mut host, &meshes, frames, config.render.fps);
    meshes.free(&mut host)?;
    rendered.context("render loop failed")?;

    let fb = host.into_framebuffer();
    report(&scene, &fb);

    if let Some(path) = &cli.output {
        PngEncoder::write_to_file(&fb, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let Some(mode) = cli.preview {
        let preview = TerminalEncoder::new()
            .mode(mode)
            .background(config.style.background)
            .render(&fb);
        let mut stdout = io::stdout().lock();
        stdout.write_all(preview.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

fn report(scene: &Scene, fb: &Framebuffer) {
    let (min, max, mean) = fb.luminance_stats();
    info!(
        "{} ({}): {} pixels, {} segments",
        scene.algorithm().name(),
        scene.algorithm(),
        scene.pixel_count(),
        scene.segment_count()
    );
    info!(
        "frame {}x{} luminance min={min:.1} max={max:.1} mean={mean:.1} ({:?})",
        fb.width(),
        fb.height(),
        Framebuffer::backend()
    );
}
