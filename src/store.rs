//! Roster and settings persistence
//!
//! A [`Roster`] is the user's list of characters plus the active selection.
//! It is loaded once, mutated in memory and written back after every change
//! through a [`Store`]. [`FileStore`] keeps one JSON document per key in a
//! directory; [`MemoryStore`] backs tests.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{create_default_slot, AppearanceSlot, Character, CharacterError};

/// Storage key of the character list.
pub const CHARACTERS_KEY: &str = "party-world-characters";
/// Storage key of the dark mode flag.
pub const DARK_MODE_KEY: &str = "party-world-dark-mode";

/// Error type for roster operations and persistence
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Stored JSON is malformed or a character is missing a slot
    #[error("Failed to parse {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Character not found: {0}")]
    NotFound(String),
    #[error("Character id already in use: {0}")]
    DuplicateId(String),
    #[error("Cannot remove the last character")]
    LastCharacter,
    #[error("Roster is empty")]
    Empty,
    #[error(transparent)]
    Character(#[from] CharacterError),
}

/// User preferences that live next to the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub dark_mode: bool,
}

/// The user's characters and which one is active.
///
/// Never empty: every constructor and mutation keeps at least one character.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    characters: Vec<Character>,
    active_id: String,
}

impl Default for Roster {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Roster {
    /// A roster holding only the seed character.
    pub fn seeded() -> Self {
        let seed = Character::seed();
        Self { active_id: seed.id.clone(), characters: vec![seed] }
    }

    /// Build a roster from loaded characters; the first one becomes active.
    pub fn from_characters(characters: Vec<Character>) -> Result<Self, StoreError> {
        let first = characters.first().ok_or(StoreError::Empty)?;
        Ok(Self { active_id: first.id.clone(), characters })
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// A loaded roster is never empty.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// The active character, or the first one if the active id went stale.
    pub fn active(&self) -> &Character {
        self.get(&self.active_id).unwrap_or(&self.characters[0])
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.contains(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.active_id = id.to_string();
        Ok(())
    }

    /// First `{prefix}_{n}` id (n >= 1) not used by any character.
    pub fn fresh_id(&self, prefix: &str) -> String {
        (1..)
            .map(|n| format!("{}_{}", prefix, n))
            .find(|id| !self.contains(id))
            .unwrap_or_else(|| prefix.to_string())
    }

    fn push(&mut self, character: Character) -> Result<&Character, StoreError> {
        if self.contains(&character.id) {
            return Err(StoreError::DuplicateId(character.id));
        }
        tracing::debug!(id = %character.id, name = %character.name, "added character to roster");
        self.characters.push(character);
        Ok(&self.characters[self.characters.len() - 1])
    }

    /// Copy `source_id` under a new identity and append it.
    pub fn add_clone(&mut self, source_id: &str, new_id: &str, name: &str) -> Result<&Character, StoreError> {
        let source = self.get(source_id).ok_or_else(|| StoreError::NotFound(source_id.to_string()))?;
        let copy = source.clone_as(new_id, name)?;
        self.push(copy)
    }

    /// Append a "Toon #n" copy of the first character and make it active.
    pub fn add_new(&mut self) -> Result<&Character, StoreError> {
        let id = self.fresh_id("char");
        let name = format!("Toon #{}", self.len() + 1);
        let copy = self.characters[0].clone_as(id.clone(), name)?;
        self.active_id = id;
        self.push(copy)
    }

    /// Append a copy of a community character under a fresh `adopted_n` id.
    pub fn adopt(&mut self, character: &Character) -> Result<&Character, StoreError> {
        let id = self.fresh_id("adopted");
        let copy = character.clone_as(id, character.name.clone())?;
        self.push(copy)
    }

    /// Remove a character. The last character can never be removed; removing
    /// the active one activates the first remaining character.
    pub fn remove(&mut self, id: &str) -> Result<Character, StoreError> {
        let index = self.characters.iter().position(|c| c.id == id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if self.characters.len() == 1 {
            return Err(StoreError::LastCharacter);
        }
        let removed = self.characters.remove(index);
        if self.active_id == removed.id {
            self.active_id = self.characters[0].id.clone();
        }
        Ok(removed)
    }

    /// Replace a character with `f(character)`.
    ///
    /// The character keeps its position; `f` must not change its id.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&Character) -> Character) -> Result<&Character, StoreError> {
        let index = self.characters.iter().position(|c| c.id == id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let mut updated = f(&self.characters[index]);
        updated.id = id.to_string();
        self.characters[index] = updated;
        Ok(&self.characters[index])
    }

    /// Payout multiplier: +10% per character, +15% when the community goal is met.
    pub fn earning_multiplier(&self, goal_met: bool) -> f64 {
        crate::party::earning_multiplier(self.len(), goal_met)
    }
}

/// Characters shared by other players that can be adopted into a roster.
pub fn community_characters() -> Vec<Character> {
    let slot = |color: &str| create_default_slot(color);
    let styled = |id: &str, color: &str, material: &str, texture: &str| AppearanceSlot {
        id: id.to_string(),
        material: material.to_string(),
        texture: texture.to_string(),
        ..create_default_slot(color)
    };

    let vinny = Character {
        id: "c1".to_string(),
        name: "Vintage Vinny".to_string(),
        age_range: "adult".to_string(),
        body_type: "tall".to_string(),
        head_shape: None,
        head: slot("#FFD39B"),
        torso: slot("#FFD39B"),
        arms: slot("#FFD39B"),
        legs: slot("#FFD39B"),
        eyes: slot("#000"),
        nose: slot("#000"),
        mouth: slot("#000"),
        outfit: slot("#FF4500"),
        headwear: slot("#000"),
        footwear: slot("#333"),
        jewelry: slot("transparent"),
        accessory: slot("transparent"),
        hand_item: slot("transparent"),
        hair: slot("#8B4513"),
        hair_style: "short".to_string(),
        hair_volume: 1.0,
        hair_shape: None,
        hair_warp: 0.0,
    };

    let cyber_z = Character {
        id: "c2".to_string(),
        name: "Cyber Z".to_string(),
        age_range: "teenager".to_string(),
        body_type: "slim".to_string(),
        head: slot("#FDF5E6"),
        torso: slot("#FDF5E6"),
        arms: slot("#FDF5E6"),
        legs: slot("#FDF5E6"),
        eyes: styled("e1", "#FFF", "glossy", "none"),
        outfit: styled("o1", "#00FFFF", "holographic", "grid"),
        headwear: slot("transparent"),
        footwear: slot("#000"),
        jewelry: slot("#FFF"),
        accessory: styled("a1", "#ff00ff", "glossy", "stripes"),
        hair: slot("#FF00FF"),
        hair_style: "long".to_string(),
        ..vinny.clone()
    };

    vec![vinny, cyber_z]
}

/// Persistence for the roster and settings.
pub trait Store {
    /// Load the roster; a missing document yields the seeded roster.
    fn load_roster(&self) -> Result<Roster, StoreError>;
    fn save_roster(&self, roster: &Roster) -> Result<(), StoreError>;
    /// Load settings; a missing document yields the defaults.
    fn load_settings(&self) -> Result<Settings, StoreError>;
    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError>;
}

fn parse_roster(key: &str, text: &str) -> Result<Roster, StoreError> {
    let characters: Vec<Character> =
        serde_json::from_str(text).map_err(|source| StoreError::Parse { key: key.to_string(), source })?;
    Roster::from_characters(characters)
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode { key: key.to_string(), source })
}

/// Parse a stored dark mode flag. Only `true` enables it.
fn parse_dark_mode(text: &str) -> bool {
    text.trim() == "true"
}

/// JSON documents in a directory, one file per storage key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    roster_key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), roster_key: CHARACTERS_KEY.to_string() }
    }

    /// Open either a store directory or a single roster `.json` file.
    ///
    /// A file path keeps the roster in that file; settings go next to it.
    pub fn open(path: &Path) -> Self {
        let is_file = path.extension().is_some_and(|ext| ext == "json") && !path.is_dir();
        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if is_file => {
                let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
                Self { dir: dir.to_path_buf(), roster_key: stem.to_string() }
            }
            _ => Self::new(path),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the roster document.
    pub fn roster_path(&self) -> PathBuf {
        self.path_for(&self.roster_key)
    }

    /// Path of the JSON document for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, text: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        fs::write(&path, text).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "saved {}", key);
        Ok(())
    }
}

impl Store for FileStore {
    fn load_roster(&self) -> Result<Roster, StoreError> {
        match self.read(&self.roster_key)? {
            Some(text) => parse_roster(&self.roster_key, &text),
            None => {
                tracing::info!(dir = %self.dir.display(), "no saved roster, starting from the seed character");
                Ok(Roster::seeded())
            }
        }
    }

    fn save_roster(&self, roster: &Roster) -> Result<(), StoreError> {
        self.write(&self.roster_key, &encode(&self.roster_key, roster.characters())?)
    }

    fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(Settings { dark_mode: self.read(DARK_MODE_KEY)?.as_deref().is_some_and(parse_dark_mode) })
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.write(DARK_MODE_KEY, if settings.dark_mode { "true" } else { "false" })
    }
}

/// In-memory store keeping the serialized documents.
#[derive(Debug, Default)]
pub struct MemoryStore {
    roster: RefCell<Option<String>>,
    dark_mode: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored roster document, if any.
    pub fn roster_json(&self) -> Option<String> {
        self.roster.borrow().clone()
    }

    /// Replace the stored roster document.
    pub fn set_roster_json(&self, json: impl Into<String>) {
        *self.roster.borrow_mut() = Some(json.into());
    }
}

impl Store for MemoryStore {
    fn load_roster(&self) -> Result<Roster, StoreError> {
        match self.roster.borrow().as_deref() {
            Some(text) => parse_roster(CHARACTERS_KEY, text),
            None => Ok(Roster::seeded()),
        }
    }

    fn save_roster(&self, roster: &Roster) -> Result<(), StoreError> {
        *self.roster.borrow_mut() = Some(encode(CHARACTERS_KEY, roster.characters())?);
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(Settings { dark_mode: self.dark_mode.borrow().as_deref().is_some_and(parse_dark_mode) })
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        *self.dark_mode.borrow_mut() = Some(settings.dark_mode.to_string());
        Ok(())
    }
}
