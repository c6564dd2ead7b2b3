use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sketchboard::config::Config;
use sketchboard::export;
use sketchboard::host::Document;
use sketchboard::script::Script;
use sketchboard::surface::{SketchSurface, SurfaceHooks, SurfaceOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHBOARD_GIT_HASH"), ")"),
    about = "Freehand sketch surface with snapshot undo/redo history"
)]
struct Cli {
    /// Configuration file (defaults to ~/.config/sketchboard/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Mount point id the surface is attached to
    #[arg(long, value_name = "ID", default_value = "sketchboard")]
    mount: String,

    /// JSON script of input events and actions to replay
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Canvas width override
    #[arg(long, value_name = "N")]
    width: Option<u32>,

    /// Canvas height override
    #[arg(long, value_name = "N")]
    height: Option<u32>,

    /// Write the final drawing as PNG
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the whole widget (toolbar, border and canvas) as PNG
    #[arg(long, value_name = "PATH")]
    view: Option<PathBuf>,

    /// Print the final drawing as a data URL
    #[arg(long, action = ArgAction::SetTrue)]
    data_url: bool,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };

    if cli.init_config {
        Config::create_default_file(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let config = Config::load_from(&config_path)?;
    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let mut options = SurfaceOptions::from_config(config);
    if let Some(width) = cli.width {
        options.width = width;
    }
    if let Some(height) = cli.height {
        options.height = height;
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start decode runtime")?;
    let document = Document::new().with_mount(cli.mount.as_str(), 0.0, 0.0);

    let export_config = config.export.clone();
    let hooks = SurfaceHooks::new().on_save(move |image| {
        match export::save_png(image, &export_config) {
            Ok(path) => println!("Saved drawing to {}", path.display()),
            Err(e) => log::error!("Failed to export drawing: {e}"),
        }
    });

    let mut surface = SketchSurface::new(&document, &cli.mount, options, hooks, runtime.handle())
        .with_context(|| format!("Failed to create surface on mount '{}'", cli.mount))?;

    if let Some(script_path) = &cli.script {
        let script = Script::load(script_path)?;
        let report = script
            .run(&mut surface)
            .with_context(|| format!("Script {} failed", script_path.display()))?;
        println!(
            "Replayed {} steps ({} saves), history {}/{}",
            report.steps,
            report.saves,
            surface.history().cursor() + 1,
            surface.history().len()
        );
    }

    let mut produced_output = false;

    if let Some(path) = &cli.output {
        let image = surface.drawing_data()?;
        fs::write(path, image.as_bytes())
            .with_context(|| format!("Failed to write drawing to {}", path.display()))?;
        log::info!("Wrote drawing to {}", path.display());
        produced_output = true;
    }

    if let Some(path) = &cli.view {
        write_view(&surface, path)?;
        produced_output = true;
    }

    if cli.data_url {
        println!("{}", surface.drawing_data()?.to_data_url());
        produced_output = true;
    }

    if !produced_output && cli.script.is_none() {
        println!(
            "sketchboard: {}x{} surface ready on mount '{}'",
            surface.width(),
            surface.height(),
            cli.mount
        );
        println!();
        println!("Usage:");
        println!("  sketchboard --script steps.json --output drawing.png");
        println!("  sketchboard --view widget.png       Render toolbar and canvas");
        println!("  sketchboard --data-url              Print the drawing as a data URL");
        println!("  sketchboard --init-config           Write a default config file");
    }

    Ok(())
}

/// Renders the composited widget into a PNG file.
fn write_view(surface: &SketchSurface, path: &Path) -> Result<()> {
    let bounds = surface.layout().bounds();
    let target = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        bounds.width.ceil() as i32,
        bounds.height.ceil() as i32,
    )
    .context("Failed to allocate view surface")?;

    {
        let ctx = cairo::Context::new(&target).context("Failed to create view context")?;
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().context("Failed to clear view")?;
        ctx.translate(-bounds.x, -bounds.y);
        sketchboard::ui::render_view(&ctx, surface).context("Failed to render view")?;
    }

    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    target
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write view to {}", path.display()))?;
    log::info!("Wrote widget view to {}", path.display());
    Ok(())
}
