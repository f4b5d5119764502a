//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod catalog;
mod party;
mod render;
mod roster;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, ToonConfig};
use crate::models::Character;
use crate::store::{FileStore, Roster, StoreError};

pub use roster::RosterAction;

/// Exit codes of the `toon` binary
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Toonkit - compose and render cartoon characters
#[derive(Parser)]
#[command(name = "toon")]
#[command(about = "Toonkit - compose cartoon characters into layered render trees and PNGs")]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr (TOON_LOG / RUST_LOG are honored otherwise)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this toon.toml instead of searching for one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render characters from a roster to PNG
    Render {
        /// Roster JSON file or store directory (default: roster.dir from toon.toml)
        roster: Option<PathBuf>,

        /// Render this character instead of the active one
        #[arg(short, long, conflicts_with = "all")]
        character: Option<String>,

        /// Render every character in the roster
        #[arg(long)]
        all: bool,

        /// Scale factor passed to the compositor
        #[arg(long)]
        scale: Option<f32>,

        /// Overlay this hair style as a dashed, translucent preview
        #[arg(long)]
        preview: Option<String>,

        /// Output file or directory.
        /// If omitted: {roster}_{id}.png
        /// If file (single character): output.png
        /// If file (several): output_{id}.png
        /// If directory (ends with /): dir/{id}.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Canvas size (e.g., "400x480")
        #[arg(long)]
        size: Option<String>,

        /// Canvas background color (default: transparent)
        #[arg(long)]
        background: Option<String>,
    },

    /// Print a character's render tree as JSON
    Tree {
        /// Roster JSON file or store directory
        roster: Option<PathBuf>,

        #[arg(short, long)]
        character: Option<String>,

        #[arg(long)]
        scale: Option<f32>,

        #[arg(long)]
        preview: Option<String>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// List the trait catalogs, or the entries of one
    Catalog {
        /// Catalog name (e.g., hair_styles, materials, themes, locations)
        kind: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the roster of characters
    Roster {
        /// Roster JSON file or store directory
        #[arg(long, global = true)]
        roster: Option<PathBuf>,

        #[command(subcommand)]
        action: RosterAction,
    },

    /// Apply a generated item descriptor to a character
    ApplyItem {
        /// Roster JSON file or store directory
        roster: PathBuf,

        /// Item descriptor JSON file
        descriptor: PathBuf,

        #[arg(short, long)]
        character: Option<String>,
    },

    /// Host a party: apply generated events and report vibe and earnings
    Party {
        /// Roster JSON file or store directory
        roster: Option<PathBuf>,

        /// Hosting character (default: active)
        #[arg(short, long)]
        character: Option<String>,

        /// Party theme (default: the first built-in theme)
        #[arg(long)]
        theme: Option<String>,

        /// Location id (see `toon catalog locations`)
        #[arg(long, default_value = "living_room")]
        location: String,

        /// Number of guests (5-14)
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(5..=14))]
        guests: u32,

        /// Party event descriptor JSON file; may be repeated
        #[arg(long = "event")]
        events: Vec<PathBuf>,

        /// Seconds the party runs before payout
        #[arg(long, default_value = "600")]
        seconds: f64,

        /// Count the community pool goal as met
        #[arg(long)]
        goal_met: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Set up tracing on stderr. `--verbose` forces debug for this crate.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("toonkit=debug")
    } else {
        EnvFilter::try_from_env("TOON_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("toonkit=warn"))
    };

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Print an error the way every command does and return the error exit code.
pub(crate) fn report(err: impl std::fmt::Display) -> ExitCode {
    eprintln!("Error: {}", err);
    ExitCode::from(EXIT_ERROR)
}

/// The roster store named on the command line, or the configured one.
pub(crate) fn open_store(roster: Option<&Path>, config: &ToonConfig) -> FileStore {
    FileStore::open(roster.unwrap_or(&config.roster.dir))
}

/// The character with `id`, or the active one.
pub(crate) fn pick_character<'a>(roster: &'a Roster, id: Option<&str>) -> Result<&'a Character, StoreError> {
    match id {
        Some(id) => roster.get(id).ok_or_else(|| StoreError::NotFound(id.to_string())),
        None => Ok(roster.active()),
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(e),
    };

    let overrides = match &cli.command {
        Commands::Render { scale, size, background, .. } => CliOverrides {
            scale: *scale,
            size: size.clone(),
            background: background.clone(),
            ..Default::default()
        },
        Commands::Tree { scale, .. } => CliOverrides { scale: *scale, ..Default::default() },
        Commands::Party { goal_met: true, .. } => CliOverrides { goal_met: Some(true), ..Default::default() },
        _ => CliOverrides::default(),
    };
    merge_cli_overrides(&mut config, &overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in errors {
            eprintln!("Error: {}", e);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    match cli.command {
        Commands::Render { roster, character, all, preview, output, .. } => render::run_render(
            roster.as_deref(),
            character.as_deref(),
            all,
            preview.as_deref(),
            output.as_deref(),
            &config,
        ),
        Commands::Tree { roster, character, preview, compact, .. } => {
            render::run_tree(roster.as_deref(), character.as_deref(), preview.as_deref(), compact, &config)
        }
        Commands::Catalog { kind, json } => catalog::run_catalog(kind.as_deref(), json),
        Commands::Roster { roster: path, action } => roster::run_roster(&open_store(path.as_deref(), &config), action),
        Commands::ApplyItem { roster: path, descriptor, character } => {
            roster::run_apply_item(&FileStore::open(&path), &descriptor, character.as_deref())
        }
        Commands::Party { roster, character, theme, location, guests, events, seconds, json, .. } => {
            party::run_party(
                &open_store(roster.as_deref(), &config),
                character.as_deref(),
                theme.as_deref(),
                &location,
                guests,
                &events,
                seconds,
                config.party.goal_met,
                json,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args_parse() {
        let cli = Cli::try_parse_from(["toon", "render", "crew.json", "--all", "--scale", "2", "-o", "out/"])
            .expect("should parse");
        match cli.command {
            Commands::Render { roster, all, scale, output, .. } => {
                assert_eq!(roster, Some(PathBuf::from("crew.json")));
                assert!(all);
                assert_eq!(scale, Some(2.0));
                assert_eq!(output, Some(PathBuf::from("out/")));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_character_conflicts_with_all() {
        assert!(Cli::try_parse_from(["toon", "render", "--all", "--character", "dex_1"]).is_err());
    }

    #[test]
    fn test_guest_range_enforced() {
        assert!(Cli::try_parse_from(["toon", "party", "--guests", "20"]).is_err());
        assert!(Cli::try_parse_from(["toon", "party", "--guests", "14"]).is_ok());
    }

    #[test]
    fn test_pick_character() {
        let mut roster = Roster::seeded();
        roster.add_new().unwrap();
        assert_eq!(pick_character(&roster, None).unwrap().id, roster.active_id());
        assert_eq!(pick_character(&roster, Some("dex_1")).unwrap().id, "dex_1");
        assert!(matches!(pick_character(&roster, Some("nobody")), Err(StoreError::NotFound(_))));
    }
}
