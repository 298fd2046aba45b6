//! tessera-export - mesh export tool
//!
//! Converts flattened source meshes (JSON) into GPU-ready mesh records
//! (pretty JSON, or the compact .tmesh container when minimizing).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tessera_export::input::{load_skin_source, load_source_mesh};
use tessera_export::{ConfigOverrides, ExportConfig, WeldStrategy, export_mesh, formats, manifest};

#[derive(Parser)]
#[command(name = "tessera-export")]
#[command(about = "Tessera mesh export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build meshes from a manifest file
    Build {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Weld strategy for every mesh (overrides manifest)
        #[arg(long)]
        strategy: Option<WeldStrategy>,

        /// Generate tangents for every mesh with UVs
        #[arg(long)]
        tangents: bool,

        /// Write the compact binary container
        #[arg(long)]
        minimize: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,
    },

    /// Export a single mesh file
    Mesh {
        /// Input source mesh (JSON)
        input: PathBuf,

        /// Output file (defaults to <input>.mesh.json or <input>.mesh.tmesh)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skeleton reference data (JSON)
        #[arg(long)]
        skin: Option<PathBuf>,

        /// Weld strategy (fast or quality)
        #[arg(long, default_value_t = WeldStrategy::Fast)]
        strategy: WeldStrategy,

        /// Generate tangents (mesh needs a UV layer)
        #[arg(long)]
        tangents: bool,

        /// Write the compact binary container
        #[arg(long)]
        minimize: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            strategy,
            tangents,
            minimize,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building meshes from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;

            // Flags only override when given
            let overrides = ConfigOverrides {
                strategy,
                tangents: tangents.then_some(true),
                minimize: minimize.then_some(true),
            };
            let report = manifest::build_all(&config, output.as_deref(), &overrides)?;
            if report.warnings > 0 {
                tracing::warn!("Build finished with {} warnings", report.warnings);
            }
            tracing::info!("Build complete! {} files written", report.written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Mesh {
            input,
            output,
            skin,
            strategy,
            tangents,
            minimize,
        } => {
            let config = ExportConfig {
                strategy,
                export_tangents: tangents,
                minimize,
                ..Default::default()
            };
            // cube.json -> cube.mesh.json, never the input itself
            let output = output.unwrap_or_else(|| {
                input.with_extension(format!("mesh.{}", formats::extension(minimize)))
            });
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let mesh = load_source_mesh(&input)?;
            let skin = skin.as_deref().map(load_skin_source).transpose()?;

            let export = export_mesh(&mesh, skin.as_ref(), &config)
                .with_context(|| format!("Failed to export mesh {:?}", input))?;
            manifest::write_record_file(&output, &export.record, config.minimize)?;
            tracing::info!("Done!");
        }
    }

    Ok(())
}
