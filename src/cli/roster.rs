//! Roster and apply-item command implementations

use clap::Subcommand;
use std::path::Path;
use std::process::ExitCode;

use crate::catalog::catalogs;
use crate::descriptor::{apply_item, load_descriptor, ItemDescriptor};
use crate::models::{update_field, update_slot_named, validate_name, CharacterField, SlotUpdate};
use crate::store::{community_characters, FileStore, Roster, Settings, Store, StoreError};

use super::{pick_character, report, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Unknown trait ids are accepted but render as the catalog default.
fn warn_unknown_trait(field: &CharacterField) {
    let c = catalogs();
    let (kind, id, fell_back) = match field {
        CharacterField::HairStyle(id) => ("hair style", id, c.hair_styles.resolve(id).1),
        CharacterField::BodyType(id) => ("body type", id, c.body_types.resolve(id).1),
        CharacterField::AgeRange(id) => ("age range", id, c.age_ranges.resolve(id).1),
        _ => return,
    };
    if fell_back {
        tracing::warn!(kind, id = id.as_str(), "unknown id, the default entry will be drawn");
    }
}

#[derive(Subcommand)]
pub enum RosterAction {
    /// Write a roster holding only the seed character
    Init {
        /// Overwrite an existing roster
        #[arg(long)]
        force: bool,
    },
    /// List the characters in the roster
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new "Toon #n" based on the first character
    New,
    /// Copy a character under a new id and name
    Clone {
        /// Id of the character to copy
        source: String,
        /// Id of the copy (default: char_n)
        #[arg(long)]
        id: Option<String>,
        /// Name of the copy (default: Toon #n)
        #[arg(long)]
        name: Option<String>,
    },
    /// List the community characters available for adoption
    Community,
    /// Adopt a community character into the roster
    Adopt {
        /// Community character id (see `toon roster community`)
        id: String,
    },
    /// Remove a character; the last one is always kept
    Remove { id: String },
    /// Change one appearance slot of a character
    SetSlot {
        id: String,
        /// Slot name (e.g., hair, outfit, handItem)
        slot: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        material: Option<String>,
        #[arg(long)]
        texture: Option<String>,
        /// Catalog variant id (e.g., a headwear style)
        #[arg(long)]
        variant: Option<String>,
        /// Pattern tile size, e.g. "12px 12px"
        #[arg(long)]
        texture_size: Option<String>,
    },
    /// Change a scalar field (name, ageRange, bodyType, hairStyle, hairVolume, ...)
    SetField { id: String, field: String, value: String },
    /// Show or change the dark mode setting
    DarkMode {
        /// true or false; omit to print the current value
        value: Option<bool>,
    },
}

fn save(store: &FileStore, roster: &Roster) -> Result<(), StoreError> {
    store.save_roster(roster)?;
    tracing::info!(path = %store.roster_path().display(), characters = roster.len(), "saved roster");
    Ok(())
}

/// Execute a roster action
pub fn run_roster(store: &FileStore, action: RosterAction) -> ExitCode {
    match action {
        RosterAction::Init { force } => {
            let path = store.roster_path();
            if path.exists() && !force {
                eprintln!("Error: {} already exists (use --force to overwrite)", path.display());
                return ExitCode::from(EXIT_ERROR);
            }
            match save(store, &Roster::seeded()) {
                Ok(()) => {
                    println!("Created: {}", path.display());
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(e) => report(e),
            }
        }
        RosterAction::List { json } => {
            let roster = match store.load_roster() {
                Ok(roster) => roster,
                Err(e) => return report(e),
            };
            if json {
                return match serde_json::to_string_pretty(roster.characters()) {
                    Ok(text) => {
                        println!("{}", text);
                        ExitCode::from(EXIT_SUCCESS)
                    }
                    Err(e) => report(e),
                };
            }
            for c in roster.characters() {
                let marker = if c.id == roster.active_id() { "*" } else { " " };
                println!("{} {:<16} {:<24} {} / {}", marker, c.id, c.name, c.age_range, c.body_type);
            }
            println!();
            println!(
                "{} character(s), earning multiplier x{:.2}",
                roster.len(),
                roster.earning_multiplier(false)
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        RosterAction::Community => {
            for c in community_characters() {
                println!("  {:<6} {}", c.id, c.name);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        RosterAction::DarkMode { value } => {
            let result = match value {
                Some(dark_mode) => store.save_settings(&Settings { dark_mode }).map(|_| dark_mode),
                None => store.load_settings().map(|s| s.dark_mode),
            };
            match result {
                Ok(dark_mode) => {
                    println!("dark mode: {}", if dark_mode { "on" } else { "off" });
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(e) => report(e),
            }
        }
        action => mutate(store, action),
    }
}

/// Actions that load, change and save the roster.
fn mutate(store: &FileStore, action: RosterAction) -> ExitCode {
    let mut roster = match store.load_roster() {
        Ok(roster) => roster,
        Err(e) => return report(e),
    };

    let summary = match action {
        RosterAction::New => roster.add_new().map(|c| format!("Added {} ({})", c.name, c.id)),
        RosterAction::Clone { source, id, name } => {
            let id = id.unwrap_or_else(|| roster.fresh_id("char"));
            let name = name.unwrap_or_else(|| format!("Toon #{}", roster.len() + 1));
            if let Err(e) = validate_name(&name) {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            roster.add_clone(&source, &id, &name).map(|c| format!("Cloned {} as {} ({})", source, c.name, c.id))
        }
        RosterAction::Adopt { id } => match community_characters().into_iter().find(|c| c.id == id) {
            Some(character) => roster.adopt(&character).map(|c| format!("Adopted {} ({})", c.name, c.id)),
            None => {
                eprintln!("Error: Unknown community character '{}'", id);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        RosterAction::Remove { id } => roster.remove(&id).map(|c| format!("Removed {} ({})", c.name, c.id)),
        RosterAction::SetSlot { id, slot, color, material, texture, variant, texture_size } => {
            let update = SlotUpdate { id: variant, color, material, texture, texture_size };
            if update.is_empty() {
                eprintln!("Error: Nothing to change; pass --color, --material, --texture, --variant or --texture-size");
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            let character = match pick_character(&roster, Some(&id)) {
                Ok(c) => c,
                Err(e) => return report(e),
            };
            let updated = match update_slot_named(character, &slot, &update) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            };
            roster.update(&id, |_| updated).map(|c| format!("Updated {} of {} ({})", slot, c.name, c.id))
        }
        RosterAction::SetField { id, field, value } => {
            let parsed = CharacterField::parse(&field, &value).and_then(|f| {
                if let CharacterField::Name(name) = &f {
                    validate_name(name)?;
                }
                Ok(f)
            });
            let field_update = match parsed {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            };
            warn_unknown_trait(&field_update);
            roster
                .update(&id, |c| update_field(c, field_update))
                .map(|c| format!("Updated {} of {} ({})", field, c.name, c.id))
        }
        other => return run_roster(store, other),
    };

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => return report(e),
    };
    match save(store, &roster) {
        Ok(()) => {
            println!("{}", summary);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => report(e),
    }
}

/// Execute the apply-item command
pub fn run_apply_item(store: &FileStore, descriptor: &Path, character: Option<&str>) -> ExitCode {
    let item: ItemDescriptor = match load_descriptor(descriptor) {
        Ok(item) => item,
        Err(e) => return report(e),
    };
    let mut roster = match store.load_roster() {
        Ok(roster) => roster,
        Err(e) => return report(e),
    };
    let id = match pick_character(&roster, character) {
        Ok(c) => c.id.clone(),
        Err(e) => return report(e),
    };

    let target = item.target_slot().map_or_else(|| "outfit color".to_string(), |key| key.to_string());
    let result = roster.update(&id, |c| apply_item(c, &item)).map(|c| c.name.clone());
    let name = match result {
        Ok(name) => name,
        Err(e) => return report(e),
    };
    match save(store, &roster) {
        Ok(()) => {
            println!("Applied '{}' to {} ({})", item.name, name, target);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => report(e),
    }
}
