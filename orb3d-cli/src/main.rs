/// Orb3D - mesh inspector
///
/// Loads an OBJ file or generates a UV sphere and prints its vertex counts,
/// bounds and normalizing transform.
///
/// Logging honours RUST_LOG; `--verbose` raises the default to debug.

use anyhow::Result;
use clap::{Parser, Subcommand};
use orb3d_cli::{run, MeshSource, DEFAULT_SPHERE_STEPS};
use std::io::stdout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orb3d")]
#[command(about = "Inspect OBJ meshes and procedural spheres")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an OBJ file and report on it
    Inspect {
        /// Input OBJ file
        path: PathBuf,

        /// Generate a sphere of this resolution if the file cannot be loaded
        #[arg(long)]
        fallback_steps: Option<u32>,
    },

    /// Generate a UV sphere and report on it
    Sphere {
        /// Number of latitude rings and longitude samples (at least 2)
        #[arg(short, long, default_value_t = DEFAULT_SPHERE_STEPS)]
        steps: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = match cli.command {
        Commands::Inspect {
            path,
            fallback_steps,
        } => MeshSource::Obj {
            path,
            fallback_steps,
        },
        Commands::Sphere { steps } => MeshSource::Sphere { steps },
    };

    run(&source, &mut stdout())?;
    Ok(())
}
