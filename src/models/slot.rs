//! Appearance slots and the keys that name them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::character::CharacterError;

/// Variant id given to freshly created slots.
pub const DEFAULT_SLOT_ID: &str = "default";
/// Material id given to freshly created slots.
pub const DEFAULT_MATERIAL: &str = "matte";
/// Texture id given to freshly created slots.
pub const DEFAULT_TEXTURE: &str = "none";

/// One customizable visual region of a character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceSlot {
    /// Selected variant within the slot's catalog (e.g. which headwear)
    pub id: String,
    /// Hex color or a `transparent`/`none` sentinel
    pub color: String,
    /// Material catalog id
    pub material: String,
    /// Texture catalog id
    pub texture: String,
    /// Pattern size override such as `"6px 6px"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_size: Option<String>,
}

/// Build a slot with the default variant, material and texture.
///
/// ```
/// use toonkit::models::create_default_slot;
///
/// let slot = create_default_slot("#FF4500");
/// assert_eq!(slot.id, "default");
/// assert_eq!(slot.material, "matte");
/// assert_eq!(slot.texture, "none");
/// ```
pub fn create_default_slot(color: impl Into<String>) -> AppearanceSlot {
    AppearanceSlot {
        id: DEFAULT_SLOT_ID.to_string(),
        color: color.into(),
        material: DEFAULT_MATERIAL.to_string(),
        texture: DEFAULT_TEXTURE.to_string(),
        texture_size: None,
    }
}

/// A partial update merged into an existing slot; `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_size: Option<String>,
}

impl SlotUpdate {
    pub fn color(color: impl Into<String>) -> Self {
        Self { color: Some(color.into()), ..Default::default() }
    }

    pub fn material(material: impl Into<String>) -> Self {
        Self { material: Some(material.into()), ..Default::default() }
    }

    pub fn texture(texture: impl Into<String>) -> Self {
        Self { texture: Some(texture.into()), ..Default::default() }
    }

    pub fn variant(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.color.is_none()
            && self.material.is_none()
            && self.texture.is_none()
            && self.texture_size.is_none()
    }

    /// Merge this update into `slot`, returning the merged slot.
    pub fn apply_to(&self, slot: &AppearanceSlot) -> AppearanceSlot {
        AppearanceSlot {
            id: self.id.clone().unwrap_or_else(|| slot.id.clone()),
            color: self.color.clone().unwrap_or_else(|| slot.color.clone()),
            material: self.material.clone().unwrap_or_else(|| slot.material.clone()),
            texture: self.texture.clone().unwrap_or_else(|| slot.texture.clone()),
            texture_size: self.texture_size.clone().or_else(|| slot.texture_size.clone()),
        }
    }
}

/// Names every slot a character carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKey {
    Head,
    Torso,
    Arms,
    Legs,
    Eyes,
    Nose,
    Mouth,
    Outfit,
    Headwear,
    Footwear,
    Jewelry,
    Accessory,
    HandItem,
    Hair,
}

impl SlotKey {
    /// All slots, in persisted field order.
    pub const ALL: [SlotKey; 14] = [
        SlotKey::Head,
        SlotKey::Torso,
        SlotKey::Arms,
        SlotKey::Legs,
        SlotKey::Eyes,
        SlotKey::Nose,
        SlotKey::Mouth,
        SlotKey::Outfit,
        SlotKey::Headwear,
        SlotKey::Footwear,
        SlotKey::Jewelry,
        SlotKey::Accessory,
        SlotKey::HandItem,
        SlotKey::Hair,
    ];

    /// The persisted (camelCase) field name.
    pub fn as_str(self) -> &'static str {
        match self {
            SlotKey::Head => "head",
            SlotKey::Torso => "torso",
            SlotKey::Arms => "arms",
            SlotKey::Legs => "legs",
            SlotKey::Eyes => "eyes",
            SlotKey::Nose => "nose",
            SlotKey::Mouth => "mouth",
            SlotKey::Outfit => "outfit",
            SlotKey::Headwear => "headwear",
            SlotKey::Footwear => "footwear",
            SlotKey::Jewelry => "jewelry",
            SlotKey::Accessory => "accessory",
            SlotKey::HandItem => "handItem",
            SlotKey::Hair => "hair",
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKey {
    type Err = CharacterError;

    /// Accepts `handItem`, `hand_item`, `hand-item` and `handitem` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            s.trim().chars().filter(|c| *c != '_' && *c != '-').flat_map(char::to_lowercase).collect();
        SlotKey::ALL
            .into_iter()
            .find(|key| key.as_str().to_lowercase() == normalized)
            .ok_or_else(|| CharacterError::InvalidSlotKey(s.to_string()))
    }
}
