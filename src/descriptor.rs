//! Descriptors returned by the item and party-event generator
//!
//! The generator itself is an external collaborator; only its JSON output
//! shapes and their effect on characters live here.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{AppearanceSlot, Character, SlotKey, DEFAULT_MATERIAL, DEFAULT_TEXTURE};
use crate::store::StoreError;

/// Variant id given to generated items that do not carry one.
pub const GENERATED_ITEM_ID: &str = "ai_gen";

/// A generated cosmetic item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub name: String,
    /// Slot the item is meant for, e.g. `"hair"` or `"Outfit"`
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ItemDescriptor {
    /// The slot named by `type`, if any.
    pub fn target_slot(&self) -> Option<SlotKey> {
        self.kind.trim().to_lowercase().parse().ok()
    }

    /// The slot this item becomes when its type names a slot.
    pub fn to_slot(&self) -> AppearanceSlot {
        let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
        AppearanceSlot {
            id: non_empty(&self.id).unwrap_or_else(|| GENERATED_ITEM_ID.to_string()),
            color: self.color.clone(),
            material: non_empty(&self.material).unwrap_or_else(|| DEFAULT_MATERIAL.to_string()),
            texture: non_empty(&self.texture).unwrap_or_else(|| DEFAULT_TEXTURE.to_string()),
            texture_size: None,
        }
    }
}

/// A generated party event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyEventDescriptor {
    pub event: String,
    pub vibe_impact: f64,
    #[serde(default)]
    pub button_text: String,
}

/// Apply a generated item to a character.
///
/// When the lowercased item type names a slot, that slot is replaced wholesale.
/// Otherwise only the outfit color changes.
///
/// ```
/// use toonkit::descriptor::{apply_item, ItemDescriptor};
/// use toonkit::models::Character;
///
/// let item: ItemDescriptor = serde_json::from_str(
///     r##"{"name": "Lava Locks", "type": "Hair", "color": "#FF2200", "texture": "shine", "description": "hot"}"##,
/// ).unwrap();
/// let dex = apply_item(&Character::seed(), &item);
/// assert_eq!(dex.hair.id, "ai_gen");
/// assert_eq!(dex.hair.texture, "shine");
/// assert_eq!(dex.hair.material, "matte");
/// ```
pub fn apply_item(character: &Character, item: &ItemDescriptor) -> Character {
    let mut updated = character.clone();
    match item.target_slot() {
        Some(key) => {
            tracing::debug!(slot = %key, item = %item.name, "applying generated item to slot");
            *updated.slot_mut(key) = item.to_slot();
        }
        None => {
            tracing::debug!(kind = %item.kind, item = %item.name, "item type names no slot, recoloring outfit");
            updated.outfit.color = item.color.clone();
        }
    }
    updated
}

/// Read a descriptor JSON file.
pub fn load_descriptor<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| StoreError::Parse { key: path.display().to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: &str) -> ItemDescriptor {
        ItemDescriptor {
            name: "Test".into(),
            kind: kind.into(),
            color: "#123456".into(),
            material: None,
            texture: Some("dots".into()),
            description: String::new(),
            id: None,
        }
    }

    #[test]
    fn test_item_targets_named_slot() {
        let dex = Character::seed();
        let updated = apply_item(&dex, &item("HEADWEAR"));
        assert_eq!(updated.headwear.id, GENERATED_ITEM_ID);
        assert_eq!(updated.headwear.color, "#123456");
        assert_eq!(updated.headwear.texture, "dots");
        assert_eq!(updated.outfit, dex.outfit);
    }

    #[test]
    fn test_item_keeps_given_id_and_material() {
        let mut it = item("handItem");
        it.id = Some("mallet".into());
        it.material = Some("metallic".into());
        let updated = apply_item(&Character::seed(), &it);
        assert_eq!(updated.hand_item.id, "mallet");
        assert_eq!(updated.hand_item.material, "metallic");
    }

    #[test]
    fn test_unknown_type_recolors_outfit_only() {
        let dex = Character::seed();
        let updated = apply_item(&dex, &item("Cape of Destiny"));
        assert_eq!(updated.outfit.color, "#123456");
        assert_eq!(updated.outfit.material, dex.outfit.material);
        assert_eq!(updated.outfit.id, dex.outfit.id);
    }

    #[test]
    fn test_event_descriptor_json() {
        let event: PartyEventDescriptor =
            serde_json::from_str(r#"{"event": "The DJ fell asleep", "vibeImpact": -15, "buttonText": "Wake up!"}"#).unwrap();
        assert_eq!(event.vibe_impact, -15.0);
        assert_eq!(event.button_text, "Wake up!");
    }

    #[test]
    fn test_item_descriptor_requires_type_and_color() {
        assert!(serde_json::from_str::<ItemDescriptor>(r##"{"name": "x", "color": "#fff"}"##).is_err());
    }
}
