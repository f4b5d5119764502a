//! Render and tree command implementations

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::compositor::compose;
use crate::config::ToonConfig;
use crate::models::Character;
use crate::output::{generate_output_path, save_png, OutputError};
use crate::raster::{rasterize, RasterOptions};
use crate::store::Store;

use super::{open_store, pick_character, report, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    roster_path: Option<&Path>,
    character: Option<&str>,
    all: bool,
    preview: Option<&str>,
    output: Option<&Path>,
    config: &ToonConfig,
) -> ExitCode {
    let Some((width, height)) = config.render.dimensions() else {
        eprintln!("Error: Invalid size '{}'. Use WxH format (e.g., '400x480')", config.render.size);
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    let options = RasterOptions {
        width,
        height,
        background: config.render.background_paint(),
        padding: config.render.padding,
    };

    let store = open_store(roster_path, config);
    let roster = match store.load_roster() {
        Ok(roster) => roster,
        Err(e) => return report(e),
    };

    let targets: Vec<&Character> = if all {
        roster.characters().iter().collect()
    } else {
        match pick_character(&roster, character) {
            Ok(c) => vec![c],
            Err(e) => return report(e),
        }
    };
    let is_single = targets.len() == 1;
    let roster_file = store.roster_path();
    let scale = config.render.scale;

    tracing::info!(count = targets.len(), width, height, scale, "rendering characters");

    let results: Vec<(String, Result<PathBuf, OutputError>)> = targets
        .par_iter()
        .map(|c| {
            let tree = compose(c, scale, preview);
            let image = rasterize(&tree, &options);
            let path = generate_output_path(&roster_file, &c.id, output, is_single);
            (c.id.clone(), save_png(&image, &path).map(|_| path))
        })
        .collect();

    let mut failed = false;
    for (id, result) in results {
        match result {
            Ok(path) => println!("Saved: {}", path.display()),
            Err(e) => {
                eprintln!("Error: Failed to save '{}': {}", id, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Execute the tree command
pub fn run_tree(
    roster_path: Option<&Path>,
    character: Option<&str>,
    preview: Option<&str>,
    compact: bool,
    config: &ToonConfig,
) -> ExitCode {
    let roster = match open_store(roster_path, config).load_roster() {
        Ok(roster) => roster,
        Err(e) => return report(e),
    };
    let character = match pick_character(&roster, character) {
        Ok(c) => c,
        Err(e) => return report(e),
    };

    let tree = compose(character, config.render.scale, preview);
    let json = if compact { serde_json::to_string(&tree) } else { serde_json::to_string_pretty(&tree) };
    match json {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => report(e),
    }
}
