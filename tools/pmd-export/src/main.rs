//! pmd-export - PMD model export tool
//!
//! Converts scene snapshots (mesh, materials, skeleton, skin poses) to
//! engine-ready PMD model files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pmd_export::scene::SceneSnapshot;
use pmd_export::{build_model, export_model, ExportOptions, Selection};

#[derive(Parser)]
#[command(name = "pmd-export")]
#[command(about = "PMD model export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene snapshot to a PMD model file
    Export {
        /// Scene snapshot JSON file
        scene: PathBuf,

        /// Model to export
        #[arg(short, long)]
        model: String,

        /// Root bone of the skeleton to export
        #[arg(short, long)]
        root_bone: Option<String>,

        /// Skin pose target (repeatable)
        #[arg(short, long = "pose")]
        poses: Vec<String>,

        /// Output .pmd file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model name stored in the header (defaults to the model's scene name)
        #[arg(long)]
        name: Option<String>,

        /// Free-text caption stored in the header
        #[arg(long)]
        comment: Option<String>,
    },

    /// Run the full build without writing output
    Check {
        /// Scene snapshot JSON file
        scene: PathBuf,

        /// Model to export
        #[arg(short, long)]
        model: String,

        /// Root bone of the skeleton to export
        #[arg(short, long)]
        root_bone: Option<String>,

        /// Skin pose target (repeatable)
        #[arg(short, long = "pose")]
        poses: Vec<String>,
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
        Commands::Export {
            scene,
            model,
            root_bone,
            poses,
            output,
            name,
            comment,
        } => {
            let output = output.unwrap_or_else(|| scene.with_extension("pmd"));
            tracing::info!("Exporting '{}' from {:?} -> {:?}", model, scene, output);

            let snapshot = SceneSnapshot::load(&scene)?;
            let mut selection = Selection::new(model).with_poses(poses);
            selection.root_bone = root_bone;
            let options = ExportOptions {
                model_name: name,
                comment: comment.unwrap_or_default(),
            };

            export_model(&snapshot, &selection, &options, &output)?;
            tracing::info!("Done!");
        }

        Commands::Check {
            scene,
            model,
            root_bone,
            poses,
        } => {
            tracing::info!("Checking '{}' in {:?}", model, scene);

            let snapshot = SceneSnapshot::load(&scene)?;
            let mut selection = Selection::new(model).with_poses(poses);
            selection.root_bone = root_bone;

            let (built, diagnostics) =
                build_model(&snapshot, &selection, &ExportOptions::default())?;
            tracing::info!(
                "Model is exportable: {} vertices, {} triangles, {} materials, {} bones, {} skin targets",
                built.vertices.len(),
                built.triangles.len(),
                built.materials.len(),
                built.bones.len(),
                built.skin.targets.len()
            );
            if diagnostics.unresolved_corners > 0 || diagnostics.degenerate_triangles > 0 {
                tracing::warn!(
                    "Degraded geometry: {} unresolved corners, {} degenerate triangles",
                    diagnostics.unresolved_corners,
                    diagnostics.degenerate_triangles
                );
            }
        }
    }

    Ok(())
}
