mod commands;
mod config;
mod diagnostics;
mod error;
mod groups;
mod normalizer;
mod parser;
mod registry;
mod remap;
mod repair;
mod rewrite;
mod sanitizer;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::error::Error;

#[derive(Parser)]
#[command(name = "scenefix", about = "Repair duplicated local fileIDs in Unity scene files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a scene and report repairs without writing
    Check {
        /// Path to the .unity scene file
        scene: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Repair a scene in place, creating a .bak snapshot first
    Fix {
        /// Path to the .unity scene file
        scene: PathBuf,
    },
}

/// Map terminal errors to process exit codes: scene not found (2),
/// unsupported document (3), anything else (1).
fn exit_code_for(e: &Error) -> ExitCode {
    return match e {
        Error::SceneNotFound { .. } => ExitCode::from(2),
        Error::UnsupportedDocument => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    };
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { scene, json } => commands::check(&scene, json),
        Commands::Fix { scene } => commands::fix(&scene),
    };

    return match result {
        Err(e) => {
            diagnostics::print_error(&e);
            exit_code_for(&e)
        },
        Ok(code) => code,
    };
}
