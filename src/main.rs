use clap::{Parser, Subcommand};
use pano_gallery::{config, index, ingest, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pano-gallery")]
#[command(about = "Photo gallery builder with 360° panorama detection")]
#[command(long_about = "\
Photo gallery builder with 360° panorama detection

Raw capture sessions are copied into galleries named after the day the
first photo was taken. Every image gets a thumbnail, and every gallery
gets a JSON manifest flagging 2:1 equirectangular panoramas.

Directory structure:

  raw/                         # Input for `ingest`
  ├── sessionA/                # One folder per capture session
  │   └── photo1.jpg           # EXIF DateTimeOriginal 2023:05:10 ...
  └── vacation/                # No EXIF date: folder name is kept
      └── beach.jpg

  images/                      # Output of `ingest`, input of `index`
  ├── index.json               # Root manifest (gallery names)
  ├── 2023-05-10/
  │   ├── photo1.jpg
  │   ├── thumb_photo1.jpg     # Fits 120x80, aspect preserved
  │   └── index.json           # {\"images\": [{\"filename\", \"is_360\"}]}
  └── vacation/

Recognized images: .png .jpg .jpeg .gif .bmp (any case).
A panorama is wider than 1000px with width/height within 0.1 of 2.

Run 'pano-gallery gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Raw session root (overrides config)
    #[arg(long, global = true)]
    raw: Option<PathBuf>,

    /// Gallery root (overrides config)
    #[arg(long, global = true)]
    images: Option<PathBuf>,

    /// Log debug detail (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy raw sessions into dated galleries with thumbnails
    Ingest,
    /// Regenerate thumbnails and write manifests with 360° flags
    Index,
    /// Run the full pipeline: ingest → index
    Build,
    /// List what `index` would process without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    pano_gallery::init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Ingest => run_ingest(&config),
        Command::Index => run_index(&config),
        Command::Build => {
            println!("==> Stage 1: Ingesting {}", config.raw_root.display());
            run_ingest(&config);
            println!("==> Stage 2: Indexing {}", config.images_root.display());
            run_index(&config);
            println!("==> Build complete: {}", config.images_root.display());
        }
        Command::Check => {
            println!("==> Checking {}", config.images_root.display());
            match index::plan(&config) {
                Ok(galleries) => output::print_check_output(&galleries),
                Err(e) => tracing::error!("{e}"),
            }
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Load the config file and apply command-line root overrides.
fn resolve_config(cli: &Cli) -> Result<config::GalleryConfig, config::ConfigError> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(raw) = &cli.raw {
        config.raw_root = raw.clone();
    }
    if let Some(images) = &cli.images {
        config.images_root = images.clone();
    }
    Ok(config)
}

// Stage errors are logged, not returned; the process still exits 0.
fn run_ingest(config: &config::GalleryConfig) {
    match ingest::ingest(config) {
        Ok(report) => output::print_ingest_output(&report),
        Err(e) => tracing::error!("{e}"),
    }
}

fn run_index(config: &config::GalleryConfig) {
    match index::index(config) {
        Ok(report) => output::print_index_output(&report),
        Err(e) => tracing::error!("{e}"),
    }
}
