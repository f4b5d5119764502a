//! Appearance data model: slots, characters and their update operations

mod character;
mod slot;

// Re-export all public types
pub use character::{
    update_field, update_slot, update_slot_named, validate_name, Character, CharacterError,
    CharacterField, HAIR_VOLUME_RANGE, HAIR_WARP_RANGE, MAX_NAME_LEN,
};
pub use slot::{
    create_default_slot, AppearanceSlot, SlotKey, SlotUpdate, DEFAULT_MATERIAL, DEFAULT_SLOT_ID,
    DEFAULT_TEXTURE,
};
