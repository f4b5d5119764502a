//! Catalog command implementation

use serde_json::json;
use std::process::ExitCode;

use crate::catalog::catalogs;
use crate::party::{LOCATIONS, THEMES};

use super::{report, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// `(id, name)` rows for the party tables, which live outside the trait catalogs.
fn party_rows(kind: &str) -> Option<Vec<(String, String)>> {
    match kind {
        "themes" => Some(THEMES.iter().map(|t| (t.to_string(), t.to_string())).collect()),
        "locations" => Some(LOCATIONS.iter().map(|l| (l.id.to_string(), format!("{} {}", l.icon, l.name))).collect()),
        _ => None,
    }
}

/// Execute the catalog command
pub fn run_catalog(kind: Option<&str>, json: bool) -> ExitCode {
    let catalogs = catalogs();

    let Some(kind) = kind else {
        let mut listing: Vec<(String, usize)> =
            catalogs.listing().into_iter().map(|(label, ids)| (label.to_string(), ids.len())).collect();
        listing.push(("themes".to_string(), THEMES.len()));
        listing.push(("locations".to_string(), LOCATIONS.len()));

        if json {
            let value: serde_json::Map<String, serde_json::Value> =
                listing.into_iter().map(|(label, count)| (label, json!(count))).collect();
            return print_json(&serde_json::Value::Object(value));
        }
        println!("Available catalogs:");
        println!();
        for (label, count) in listing {
            println!("  {:<14} {:>3} entries", label, count);
        }
        println!();
        println!("Usage: toon catalog <name>");
        return ExitCode::from(EXIT_SUCCESS);
    };

    let normalized = kind.trim().to_lowercase().replace('-', "_");
    let Some(rows) = catalogs.describe(&normalized).or_else(|| party_rows(&normalized)) else {
        eprintln!("Error: Unknown catalog '{}'", kind);
        eprintln!();
        eprintln!("Available catalogs:");
        for (label, _) in catalogs.listing() {
            eprintln!("  {}", label);
        }
        eprintln!("  themes");
        eprintln!("  locations");
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    if json {
        let value: Vec<serde_json::Value> = rows.iter().map(|(id, name)| json!({ "id": id, "name": name })).collect();
        return print_json(&serde_json::Value::Array(value));
    }

    let width = rows.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    for (id, name) in rows {
        println!("  {:<width$}  {}", id, name, width = width);
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn print_json(value: &serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => report(e),
    }
}
