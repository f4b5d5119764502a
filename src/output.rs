//! PNG output and file path generation

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    tracing::info!(path = %path.display(), "wrote image");
    Ok(())
}

/// Reduce a character id to something safe to use as a file name.
pub fn file_stem_for(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "character".to_string()
    } else {
        stem
    }
}

/// Generate the output path for a rendered character.
///
/// | Scenario | Output |
/// |----------|--------|
/// | One character "dex_1" from `roster.json` | `roster_dex_1.png` |
/// | With `-o out.png` (one character) | `out.png` |
/// | With `-o out.png` (several) | `out_{id}.png` |
/// | With `-o dir/` | `dir/{id}.png` |
pub fn generate_output_path(
    roster: &Path,
    character_id: &str,
    output_arg: Option<&Path>,
    is_single: bool,
) -> PathBuf {
    let id = file_stem_for(character_id);
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();

            if is_dir {
                output.join(format!("{}.png", id))
            } else if is_single {
                output.to_path_buf()
            } else {
                let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
                sibling(output, format!("{}_{}.png", stem, id))
            }
        }
        None => {
            let stem = roster.file_stem().and_then(|s| s.to_str()).unwrap_or("roster");
            sibling(roster, format!("{}_{}.png", stem, id))
        }
    }
}

/// `name` placed in the same directory as `path`.
fn sibling(path: &Path, name: String) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
