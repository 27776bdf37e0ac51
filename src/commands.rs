//! Core CLI commands for scenefix: check and fix.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::error::Error;
use crate::repair::{self, RepairReport};

/// JSON shape of `check --json`: per-pass counts plus the total.
#[derive(serde::Serialize)]
struct CheckReport<'a> {
    /// Per-pass change counts.
    changes: &'a RepairReport,
    /// Saturating sum of all counts.
    total: u32,
}

/// A scene read into memory, with enough shape to write it back.
struct SceneBuffer {
    /// Whether the original file ended with a newline.
    had_trailing_newline: bool,
    /// The scene's lines, newline terminators stripped.
    lines: Vec<String>,
}

/// The sibling backup path: the scene path with `.bak` appended.
fn backup_path(scene: &Path) -> PathBuf {
    let mut raw = scene.as_os_str().to_os_string();
    raw.push(".bak");
    return PathBuf::from(raw);
}

/// Create `<scene>.bak` unless it already exists. The backup is a
/// byte-for-byte pre-edit snapshot and is never overwritten once created.
///
/// # Errors
///
/// Returns `Error::Io` if the copy fails.
fn backup_scene(scene: &Path) -> Result<(), Error> {
    let backup = backup_path(scene);
    if backup.exists() {
        eprintln!("Backup already exists: {}", backup.display());
        return Ok(());
    }
    std::fs::copy(scene, &backup)?;
    eprintln!("Backup created: {}", backup.display());
    return Ok(());
}

/// Analyze a scene and report what a fix would change, without writing.
///
/// # Errors
///
/// Returns `Error::SceneNotFound` if the scene cannot be read,
/// `Error::UnsupportedDocument` if it has no block headers,
/// or `Error::Json` if `--json` serialization fails.
pub fn check(scene: &Path, json: bool) -> Result<ExitCode, Error> {
    let config = Config::load(Path::new("."))?;
    let mut buffer = read_scene(scene)?;
    let report = repair::repair_lines(&mut buffer.lines, &config.repair_options())?;
    let total = report.total();

    if json {
        let payload = CheckReport { changes: &report, total };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if total == 0 {
        println!("No duplicate ids or malformed tokens detected. Nothing to fix.");
    } else {
        print_report(&report);
        println!("{total} repairs needed (run `scenefix fix` to apply)");
    }

    // Exit code priority: repairs needed (1) > clean (0).
    if total > 0 {
        return Ok(ExitCode::from(1));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Repair a scene in place: analyze, and if anything changed, back up the
/// original and overwrite it with the mutated buffer in a single write.
///
/// # Errors
///
/// Returns `Error::SceneNotFound` if the scene cannot be read,
/// `Error::UnsupportedDocument` if it has no block headers,
/// or `Error::Io` if the backup or the write fails.
pub fn fix(scene: &Path) -> Result<ExitCode, Error> {
    let config = Config::load(Path::new("."))?;
    let mut buffer = read_scene(scene)?;
    let report = repair::repair_lines(&mut buffer.lines, &config.repair_options())?;
    let total = report.total();

    if total == 0 {
        println!("No duplicate ids or malformed tokens detected. Nothing to fix.");
        return Ok(ExitCode::SUCCESS);
    }

    backup_scene(scene)?;
    write_scene(scene, &buffer)?;

    print_report(&report);
    println!("Applied {total} repairs. Try opening the scene in Unity again.");
    return Ok(ExitCode::SUCCESS);
}

/// Print per-pass counts for a human reader, skipping zero counts.
fn print_report(report: &RepairReport) {
    if report.sanitized_tokens > 0 {
        println!("  {} malformed pointer tokens rewritten", report.sanitized_tokens);
    }
    if report.header_repairs > 0 {
        println!("  {} out-of-range header anchors repaired", report.header_repairs);
    }
    if report.duplicate_headers > 0 {
        println!("  {} duplicate header anchors renamed", report.duplicate_headers);
    }
    if report.group_rewrites > 0 {
        println!("  {} duplicated group anchors rebound", report.group_rewrites);
    }
    return;
}

/// Read a scene into a line buffer, remembering its trailing-newline shape.
///
/// # Errors
///
/// Returns `Error::SceneNotFound` if the path doesn't exist,
/// or `Error::Io` for other read failures.
fn read_scene(scene: &Path) -> Result<SceneBuffer, Error> {
    let content = match std::fs::read_to_string(scene) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::SceneNotFound { path: scene.to_path_buf() });
        },
        Err(e) => return Err(Error::Io(e)),
        Ok(c) => c,
    };
    let had_trailing_newline = content.ends_with('\n');
    let lines = content.lines().map(String::from).collect();
    return Ok(SceneBuffer { had_trailing_newline, lines });
}

/// Join the mutated buffer and overwrite the scene in a single write.
///
/// # Errors
///
/// Returns `Error::Io` if the write fails.
fn write_scene(scene: &Path, buffer: &SceneBuffer) -> Result<(), Error> {
    let mut output = buffer.lines.join("\n");
    if buffer.had_trailing_newline {
        output.push('\n');
    }
    std::fs::write(scene, output)?;
    return Ok(());
}
