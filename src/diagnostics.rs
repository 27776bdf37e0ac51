use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each terminal condition produces a block with what happened and how to
/// recover. Designed to be readable by both humans and LLM agents.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::IdSpaceExhausted { ceiling } => render_id_space_exhausted(*ceiling),
        Error::SceneNotFound { path } => render_scene_not_found(path),
        Error::UnsupportedDocument => render_unsupported_document(),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: JSON Serialization

{e}
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid Config

`.scenefix.toml` could not be parsed: {e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_id_space_exhausted(ceiling: i64) -> String {
    format!(
        "\
# Error: Identifier Space Exhausted

Every candidate fileID up to {ceiling} is already in use; no fresh id can
be minted. The scene was not modified.

## Fix

Lower `mint_base` in `.scenefix.toml` to open up more of the id range:

    mint_base = 1000000000
"
    )
}

fn render_scene_not_found(path: &std::path::Path) -> String {
    format!(
        "\
# Error: Scene Not Found

`{}` does not exist or is not readable.
",
        path.display()
    )
}

fn render_unsupported_document() -> String {
    "\
# Error: Unsupported Document

No `--- !u!<class> &<fileID>` block headers were found, so there is
nothing to repair. The file was not modified.

## Fix

scenefix repairs Unity text-serialized scenes. Check that the file is a
`.unity` scene saved with \"Force Text\" asset serialization.
"
    .to_string()
}
