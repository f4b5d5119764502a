//! The customizable character aggregate

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::slot::{create_default_slot, AppearanceSlot, SlotKey, SlotUpdate};

/// Longest name accepted when a character is created.
pub const MAX_NAME_LEN: usize = 30;

/// Documented range for `hair_volume`.
pub const HAIR_VOLUME_RANGE: (f32, f32) = (0.5, 2.5);

/// Documented range for `hair_warp`, in degrees.
pub const HAIR_WARP_RANGE: (f32, f32) = (-45.0, 45.0);

/// Errors raised while constructing or editing a character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    /// A slot name that no character carries
    #[error("unknown slot key '{0}'")]
    InvalidSlotKey(String),
    /// A scalar field name that no character carries
    #[error("unknown character field '{0}'")]
    InvalidField(String),
    /// Name longer than 30 characters
    #[error("name is {len} characters long, at most {MAX_NAME_LEN} allowed")]
    NameTooLong { len: usize },
    /// Name containing control characters
    #[error("name contains a non-printable character {0:?}")]
    NonPrintableName(char),
    /// A field value that could not be parsed
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },
}

/// A customizable character.
///
/// Every slot is a plain field, so a `Character` value always carries all of
/// them; JSON missing a slot is rejected during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub age_range: String,
    pub body_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_shape: Option<String>,
    pub head: AppearanceSlot,
    pub torso: AppearanceSlot,
    pub arms: AppearanceSlot,
    pub legs: AppearanceSlot,
    pub eyes: AppearanceSlot,
    pub nose: AppearanceSlot,
    pub mouth: AppearanceSlot,
    pub outfit: AppearanceSlot,
    pub headwear: AppearanceSlot,
    pub footwear: AppearanceSlot,
    pub jewelry: AppearanceSlot,
    pub accessory: AppearanceSlot,
    pub hand_item: AppearanceSlot,
    pub hair: AppearanceSlot,
    pub hair_style: String,
    #[serde(default = "default_hair_volume")]
    pub hair_volume: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_shape: Option<String>,
    #[serde(default)]
    pub hair_warp: f32,
}

fn default_hair_volume() -> f32 {
    1.0
}

/// A scalar (non-slot) field update.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterField {
    Name(String),
    AgeRange(String),
    BodyType(String),
    HeadShape(Option<String>),
    HairShape(Option<String>),
    HairWarp(f32),
    HairStyle(String),
    HairVolume(f32),
}

impl CharacterField {
    /// Parse a `field=value` pair as typed on the command line.
    ///
    /// An empty value clears the optional fields (`headShape`, `hairShape`).
    pub fn parse(field: &str, value: &str) -> Result<Self, CharacterError> {
        let invalid = || CharacterError::InvalidValue { field: field.to_string(), value: value.to_string() };
        let optional = || if value.is_empty() { None } else { Some(value.to_string()) };
        let normalized: String =
            field.chars().filter(|c| *c != '_' && *c != '-').flat_map(char::to_lowercase).collect();
        match normalized.as_str() {
            "name" => Ok(CharacterField::Name(value.to_string())),
            "agerange" => Ok(CharacterField::AgeRange(value.to_string())),
            "bodytype" => Ok(CharacterField::BodyType(value.to_string())),
            "headshape" => Ok(CharacterField::HeadShape(optional())),
            "hairshape" => Ok(CharacterField::HairShape(optional())),
            "hairstyle" => Ok(CharacterField::HairStyle(value.to_string())),
            "hairwarp" => value.parse().map(CharacterField::HairWarp).map_err(|_| invalid()),
            "hairvolume" => value.parse().map(CharacterField::HairVolume).map_err(|_| invalid()),
            _ => Err(CharacterError::InvalidField(field.to_string())),
        }
    }
}

/// Check a name against the creation-time rules: at most 30 characters,
/// none of them control characters.
pub fn validate_name(name: &str) -> Result<(), CharacterError> {
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CharacterError::NameTooLong { len });
    }
    if let Some(c) = name.chars().find(|c| c.is_control()) {
        return Err(CharacterError::NonPrintableName(c));
    }
    Ok(())
}

impl Character {
    /// The character every new roster starts with.
    pub fn seed() -> Self {
        Character {
            id: "dex_1".to_string(),
            name: "Host Dexter".to_string(),
            age_range: "child".to_string(),
            body_type: "standard".to_string(),
            head_shape: None,
            head: create_default_slot("#FFF5E6"),
            torso: create_default_slot("#FFF5E6"),
            arms: create_default_slot("#FFF5E6"),
            legs: create_default_slot("#FFF5E6"),
            eyes: create_default_slot("#000000"),
            nose: create_default_slot("#000000"),
            mouth: create_default_slot("#000000"),
            outfit: create_default_slot("#FFFFFF"),
            headwear: create_default_slot("#000000"),
            footwear: create_default_slot("#000000"),
            jewelry: create_default_slot("transparent"),
            accessory: create_default_slot("transparent"),
            hand_item: create_default_slot("#808080"),
            hair: create_default_slot("#FF4500"),
            hair_style: "spiky".to_string(),
            hair_volume: 1.2,
            hair_shape: None,
            hair_warp: 0.0,
        }
    }

    /// Copy this character under a new identity, validating the new name.
    pub fn clone_as(&self, id: impl Into<String>, name: impl Into<String>) -> Result<Self, CharacterError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Character { id: id.into(), name, ..self.clone() })
    }

    pub fn slot(&self, key: SlotKey) -> &AppearanceSlot {
        match key {
            SlotKey::Head => &self.head,
            SlotKey::Torso => &self.torso,
            SlotKey::Arms => &self.arms,
            SlotKey::Legs => &self.legs,
            SlotKey::Eyes => &self.eyes,
            SlotKey::Nose => &self.nose,
            SlotKey::Mouth => &self.mouth,
            SlotKey::Outfit => &self.outfit,
            SlotKey::Headwear => &self.headwear,
            SlotKey::Footwear => &self.footwear,
            SlotKey::Jewelry => &self.jewelry,
            SlotKey::Accessory => &self.accessory,
            SlotKey::HandItem => &self.hand_item,
            SlotKey::Hair => &self.hair,
        }
    }

    pub fn slot_mut(&mut self, key: SlotKey) -> &mut AppearanceSlot {
        match key {
            SlotKey::Head => &mut self.head,
            SlotKey::Torso => &mut self.torso,
            SlotKey::Arms => &mut self.arms,
            SlotKey::Legs => &mut self.legs,
            SlotKey::Eyes => &mut self.eyes,
            SlotKey::Nose => &mut self.nose,
            SlotKey::Mouth => &mut self.mouth,
            SlotKey::Outfit => &mut self.outfit,
            SlotKey::Headwear => &mut self.headwear,
            SlotKey::Footwear => &mut self.footwear,
            SlotKey::Jewelry => &mut self.jewelry,
            SlotKey::Accessory => &mut self.accessory,
            SlotKey::HandItem => &mut self.hand_item,
            SlotKey::Hair => &mut self.hair,
        }
    }

    /// Hair volume clamped to [`HAIR_VOLUME_RANGE`]; NaN reads as 1.0.
    pub fn clamped_hair_volume(&self) -> f32 {
        clamp_or(self.hair_volume, HAIR_VOLUME_RANGE, 1.0)
    }

    /// Hair warp clamped to [`HAIR_WARP_RANGE`]; NaN reads as 0.
    pub fn clamped_hair_warp(&self) -> f32 {
        clamp_or(self.hair_warp, HAIR_WARP_RANGE, 0.0)
    }
}

fn clamp_or(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Return a copy of `character` with one slot merged with `update`.
///
/// ```
/// use toonkit::models::{update_slot, Character, SlotKey, SlotUpdate};
///
/// let dex = Character::seed();
/// let updated = update_slot(&dex, SlotKey::Outfit, &SlotUpdate::color("#112233"));
/// assert_eq!(updated.outfit.color, "#112233");
/// assert_eq!(updated.hair, dex.hair);
/// ```
pub fn update_slot(character: &Character, key: SlotKey, update: &SlotUpdate) -> Character {
    let mut next = character.clone();
    *next.slot_mut(key) = update.apply_to(character.slot(key));
    next
}

/// [`update_slot`] for a slot named at runtime; unknown names are an error.
pub fn update_slot_named(
    character: &Character,
    slot_key: &str,
    update: &SlotUpdate,
) -> Result<Character, CharacterError> {
    let key: SlotKey = slot_key.parse()?;
    Ok(update_slot(character, key, update))
}

/// Return a copy of `character` with one scalar field replaced.
///
/// Names are not re-validated here; the length rule applies at creation only.
pub fn update_field(character: &Character, field: CharacterField) -> Character {
    let mut next = character.clone();
    match field {
        CharacterField::Name(name) => next.name = name,
        CharacterField::AgeRange(age) => next.age_range = age,
        CharacterField::BodyType(body) => next.body_type = body,
        CharacterField::HeadShape(shape) => next.head_shape = shape,
        CharacterField::HairShape(shape) => next.hair_shape = shape,
        CharacterField::HairWarp(warp) => next.hair_warp = warp,
        CharacterField::HairStyle(style) => next.hair_style = style,
        CharacterField::HairVolume(volume) => next.hair_volume = volume,
    }
    next
}
