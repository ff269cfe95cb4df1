use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use quotecanvas::draw::{CairoRenderer, ImageLoader, RecordingRenderer, Renderer};
use quotecanvas::util::SurfaceSize;
use quotecanvas::{Canvas, Config, Scene};

#[derive(Parser, Debug)]
#[command(name = "quotecanvas")]
#[command(version, about = "Compose quote cards from shapes, images and wrapped text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene file to a PNG image
    Render {
        /// Scene description (TOML)
        scene: PathBuf,

        /// Where to write the PNG
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,

        #[command(flatten)]
        surface: SurfaceArgs,
    },
    /// Replay a scene without rasterizing and print elements and draw calls as JSON
    Trace {
        /// Scene description (TOML)
        scene: PathBuf,

        #[command(flatten)]
        surface: SurfaceArgs,
    },
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Surface width in pixels (defaults to the config value)
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Surface height in pixels (defaults to the config value)
    #[arg(long, value_name = "PX")]
    height: Option<u32>,

    /// Config file to use instead of ~/.config/quotecanvas/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,
}

impl SurfaceArgs {
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    fn size(&self, config: &Config) -> (u32, u32) {
        (
            self.width.unwrap_or(config.surface.width).max(1),
            self.height.unwrap_or(config.surface.height).max(1),
        )
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Image decodes run on this runtime's blocking pool
    let runtime =
        tokio::runtime::Runtime::new().context("Failed to create Tokio runtime for image loading")?;

    match cli.command {
        Command::Render {
            scene,
            output,
            surface,
        } => render(&scene, &output, &surface, runtime.handle()),
        Command::Trace { scene, surface } => trace(&scene, &surface, runtime.handle()),
    }
}

fn replay<R: Renderer>(
    scene_path: &Path,
    renderer: R,
    size: (u32, u32),
    config: &Config,
    runtime: &tokio::runtime::Handle,
) -> Result<Canvas<R>> {
    let scene = Scene::load(scene_path)?;
    let mut canvas = Canvas::new(
        renderer,
        SurfaceSize::new(size.0 as f64, size.1 as f64),
        config,
    )
    .with_image_loader(ImageLoader::new(runtime));

    scene.apply(&mut canvas)?;
    Ok(canvas)
}

fn render(
    scene_path: &Path,
    output: &Path,
    args: &SurfaceArgs,
    runtime: &tokio::runtime::Handle,
) -> Result<()> {
    let config = args.load_config()?;
    let (width, height) = args.size(&config);

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)
        .context("Failed to create image surface")?;
    let ctx = cairo::Context::new(&surface).context("Failed to create Cairo context")?;

    let canvas = replay(
        scene_path,
        CairoRenderer::new(ctx),
        (width, height),
        &config,
        runtime,
    )?;
    let element_count = canvas.elements().len();
    drop(canvas);

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write PNG to {}", output.display()))?;

    info!(
        "Rendered {} elements at {}x{} to {}",
        element_count,
        width,
        height,
        output.display()
    );
    Ok(())
}

fn trace(scene_path: &Path, args: &SurfaceArgs, runtime: &tokio::runtime::Handle) -> Result<()> {
    let config = args.load_config()?;
    let size = args.size(&config);

    let canvas = replay(
        scene_path,
        RecordingRenderer::default(),
        size,
        &config,
        runtime,
    )?;
    let report = serde_json::json!({
        "width": size.0,
        "height": size.1,
        "elements": canvas.elements(),
        "commands": canvas.renderer().commands(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
