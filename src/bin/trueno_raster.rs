//! trueno-raster: render a scene description to PNG, SVG or the terminal.
//!
//! Run: `trueno-raster scene.txt -s 64 --scale 8 -o scene.png`
//!      `echo "v,0,0,1,0,0;v,15,15,0,0,1;l,0,1" | trueno-raster -s 16 -f terminal`

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Once;

use trueno_raster::config::RenderConfig;
use trueno_raster::output::{
    Display, ImageExport, OutputFormat, PngEncoder, SvgEncoder, TerminalDisplay, TerminalEncoder,
};
use trueno_raster::renderer::Renderer;

/// trueno-raster: scene description rasterizer
#[derive(Parser, Debug)]
#[command(name = "trueno-raster")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Rasterize points, lines and triangles from a scene description", long_about = None)]
struct Cli {
    /// Scene file, or `-` for stdin
    #[arg(default_value = "-")]
    scene: String,

    /// Grid side length in cells
    #[arg(short = 's', long = "size")]
    pixels_wide: Option<u32>,

    /// Output pixels per cell side
    #[arg(long)]
    scale: Option<u32>,

    /// Output file (format inferred from .png / .svg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

static INIT: Once = Once::new();

/// Initializes the global logger once. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(match verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            });
        }

        builder.write_style(env_logger::WriteStyle::Auto);
        builder.init();

        log::debug!("logging initialized");
    });
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;
    let text = read_scene(&cli.scene)?;

    let format = cli
        .format
        .or_else(|| cli.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(config.format);

    let display = build_display(&config, format, cli.output.as_deref());
    let mut renderer = Renderer::new(config.pixels_wide, display)?;

    let scene = renderer
        .render(&text)
        .with_context(|| format!("failed to render scene from {}", cli.scene))?;

    log::info!(
        "rendered {} vertices, {} commands, {} cells set",
        scene.vertices().len(),
        scene.commands().len(),
        renderer.buffer().set_count()
    );

    Ok(())
}

/// Defaults, overlaid by the config file, overlaid by flags.
fn resolve_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RenderConfig::default_path()
            .filter(|p| p.exists())
            .map(RenderConfig::load_or_default)
            .unwrap_or_default(),
    };

    if let Some(pixels_wide) = cli.pixels_wide {
        config.pixels_wide = pixels_wide;
    }
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    config.validate().context("invalid render settings")?;
    log::debug!("config: {config:?}");
    Ok(config)
}

fn read_scene(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("failed to read scene from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read scene file {source}"))
}

fn build_display(
    config: &RenderConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Box<dyn Display> {
    let background = config.background_color().to_rgba();

    if format == OutputFormat::Terminal {
        let encoder = TerminalEncoder::new().background(background);
        return Box::new(TerminalDisplay::stdout().encoder(encoder));
    }

    let path = output.map_or_else(
        || match format {
            OutputFormat::Svg => PathBuf::from("image.svg"),
            _ => PathBuf::from(PngEncoder::DEFAULT_FILE_NAME),
        },
        Path::to_path_buf,
    );

    Box::new(
        ImageExport::new(path)
            .format(format)
            .png(PngEncoder::new().scale(config.scale).background(background))
            .svg(SvgEncoder::new().scale(config.scale).background(Some(background))),
    )
}
