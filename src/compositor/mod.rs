//! Compositor: character data -> layered render tree
//!
//! [`compose`] is a pure function. It reads a [`Character`] and the shared
//! catalogs and produces a [`RenderTree`] whose layer order is fixed:
//!
//! ```text
//! accessory_back
//! body        legs, arms, torso (+ outfit)
//! jewelry
//! head        hair_behind, head_base, face, hair_front, headwear [, hair_preview]
//! accessory_front
//! ```
//!
//! Every layer is emitted even when the slot feeding it selects "none", so
//! consumers can rely on the sequence.

mod layout;
mod surface;
mod transform;
mod tree;

pub use surface::{parse_texture_size, resolve_surface, Surface};
pub use transform::{Affine, Transform};
pub use tree::{Group, Layer, Node, Outline, Pattern, Primitive, RenderTree, Shape, Style};

use crate::catalog::{catalogs, Catalogs, Placement};
use crate::models::Character;
use layout::Layout;

/// Replace a non-positive or non-finite scale with 1.0.
pub fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        tracing::debug!(scale, "invalid render scale, using 1.0");
        1.0
    }
}

/// Compose a character with the process-wide catalogs.
///
/// `preview` names a hair style to overlay as a translucent ghost; it is
/// ignored when it resolves to the character's own style.
///
/// ```
/// use toonkit::compositor::{compose, Layer};
/// use toonkit::models::Character;
///
/// let tree = compose(&Character::seed(), 1.0, None);
/// assert_eq!(tree.count_layer(Layer::Head), 1);
/// assert_eq!(tree.count_layer(Layer::HairPreview), 0);
/// ```
pub fn compose(character: &Character, scale: f32, preview: Option<&str>) -> RenderTree {
    compose_with(catalogs(), character, scale, preview)
}

/// Compose a character against an explicit catalog set.
pub fn compose_with(
    catalogs: &Catalogs,
    character: &Character,
    scale: f32,
    preview: Option<&str>,
) -> RenderTree {
    let age = catalogs.age_ranges.lookup(&character.age_range);
    let scale = sanitize_scale(scale) * age.multiplier;

    let own_style = catalogs.hair_styles.lookup(&character.hair_style);
    let preview = preview
        .map(|id| catalogs.hair_styles.lookup(id))
        .filter(|style| style.id != own_style.id);

    let layout = Layout::new(catalogs, character);
    let mut root = Group::new("character").with_transform(Transform::scaled(scale));
    root.push_group(layout.accessory(Placement::Back));
    root.push_group(layout.body());
    root.push_group(layout.jewelry());
    root.push_group(layout.head(preview));
    root.push_group(layout.accessory(Placement::Front));

    RenderTree { scale, root }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{update_slot, SlotKey, SlotUpdate};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn plain() -> Character {
        let mut c = Character::seed();
        for key in [SlotKey::Headwear, SlotKey::Accessory, SlotKey::Jewelry, SlotKey::HandItem] {
            c.slot_mut(key).id = "none".to_string();
        }
        c
    }

    #[test]
    fn test_exactly_one_head_and_body() {
        let tree = compose(&Character::seed(), 1.0, None);
        assert_eq!(tree.count_layer(Layer::Head), 1);
        assert_eq!(tree.count_layer(Layer::Body), 1);
        assert!(tree.head().is_some());
        assert!(tree.body().is_some());
    }

    #[test]
    fn test_fixed_layer_order_with_none_slots() {
        let tree = compose(&plain(), 1.0, None);
        assert_eq!(tree.layer_order(), Layer::Z_ORDER.to_vec());

        let mut dressed = plain();
        dressed.headwear.id = "wizard".into();
        dressed.accessory.id = "bow_tie".into();
        dressed.jewelry.id = "pearls".into();
        dressed.hand_item.id = "mallet".into();
        assert_eq!(compose(&dressed, 1.0, None).layer_order(), Layer::Z_ORDER.to_vec());
    }

    #[test]
    fn test_compose_is_idempotent() {
        let c = Character::seed();
        assert_eq!(compose(&c, 1.5, Some("bowl_cut")), compose(&c, 1.5, Some("bowl_cut")));
    }

    #[test]
    fn test_unknown_hair_material_falls_back_to_matte() {
        let mut c = Character::seed();
        c.hair.material = "unobtanium".into();
        let tree = compose(&c, 1.0, None);
        let hair = tree.find_layer(Layer::HairFront).unwrap();
        let style = &hair.primitives().next().unwrap().style;
        assert_eq!(style.highlight, 0.0);
        assert!(style.rim.is_none());
        assert!(style.patterns.is_empty());
    }

    #[test]
    fn test_child_scale_composition() {
        let mut c = Character::seed();
        c.age_range = "child".into();
        let tree = compose(&c, 1.0, None);
        assert!(approx(tree.scale, 0.8));
        let [sx, sy] = tree.effective_scale(Layer::Head).unwrap();
        assert!(approx(sx, 1.12) && approx(sy, 1.12));
        let [bx, _] = tree.effective_scale(Layer::Body).unwrap();
        assert!(approx(bx, 0.8));
    }

    #[test]
    fn test_invalid_scale_treated_as_one() {
        let c = Character::seed();
        for bad in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            assert_eq!(compose(&c, bad, None), compose(&c, 1.0, None));
        }
    }

    #[test]
    fn test_preview_does_not_touch_character() {
        let c = Character::seed();
        assert_eq!(c.hair_style, "spiky");
        let before = c.clone();
        let tree = compose(&c, 1.0, Some("bowl_cut"));
        assert_eq!(c, before);
        let preview = tree.find_layer(Layer::HairPreview).unwrap();
        assert_eq!(preview.label, "preview:bowl_cut");
        assert!(preview.primitives().all(|p| p.style.dashed && p.style.opacity < 1.0));
        // The preview sits last in the head group.
        assert_eq!(tree.layer_order().iter().rev().nth(1), Some(&Layer::HairPreview));

        // The opaque spiky hair still renders unchanged beneath the ghost.
        let plain = compose(&c, 1.0, None);
        for layer in [Layer::HairBehind, Layer::HairFront] {
            assert_eq!(tree.find_layer(layer), plain.find_layer(layer));
        }
        let front = tree.find_layer(Layer::HairFront).unwrap();
        assert!(front.primitive_count() > 0);
        assert!(front.primitives().all(|p| !p.style.dashed && p.style.opacity == 1.0));
    }

    #[test]
    fn test_preview_of_current_style_is_ignored() {
        let c = Character::seed();
        assert!(compose(&c, 1.0, Some("spiky")).find_layer(Layer::HairPreview).is_none());
        // Unknown ids resolve to the default style, which differs from spiky.
        let tree = compose(&c, 1.0, Some("mohawk"));
        assert_eq!(tree.find_layer(Layer::HairPreview).unwrap().label, "preview:atomic_quiff");
    }

    #[test]
    fn test_eyes_hidden_by_covering_headwear() {
        let mut c = plain();
        let face = |c: &Character| compose(c, 1.0, None).find_layer(Layer::Face).unwrap().clone();
        assert!(face(&c).find_label("eye_left").is_some());
        c.headwear.id = "genius_glasses".into();
        assert!(face(&c).find_label("eye_left").is_none());
        assert!(face(&c).find_label("mouth").is_some());
    }

    #[test]
    fn test_hair_volume_and_warp_are_clamped() {
        let mut c = plain();
        c.hair_volume = 10.0;
        c.hair_warp = -90.0;
        let tree = compose(&c, 1.0, None);
        let hair = tree.find_layer(Layer::HairFront).unwrap();
        assert!(approx(hair.transform.scale[0], 2.5));
        assert!(approx(hair.transform.skew_x, -45.0));
    }

    #[test]
    fn test_hair_shape_scales_hair_groups() {
        let mut c = plain();
        c.hair_volume = 1.0;
        c.hair_shape = Some("wide".into());
        let tree = compose(&c, 1.0, None);
        let behind = tree.find_layer(Layer::HairBehind).unwrap();
        assert_eq!(behind.transform.scale, [1.25, 0.9]);
    }

    #[test]
    fn test_update_slot_changes_only_that_slot_in_tree() {
        let c = plain();
        let updated = update_slot(&c, SlotKey::Torso, &SlotUpdate::color("#00FF00"));
        let (a, b) = (compose(&c, 1.0, None), compose(&updated, 1.0, None));
        assert_ne!(a.find_layer(Layer::Torso), b.find_layer(Layer::Torso));
        assert_eq!(a.find_layer(Layer::Head), b.find_layer(Layer::Head));
        assert_eq!(a.find_layer(Layer::Legs), b.find_layer(Layer::Legs));
    }

    #[test]
    fn test_transparent_footwear_draws_dark_shoes() {
        let mut c = plain();
        c.footwear.color = "transparent".into();
        let tree = compose(&c, 1.0, None);
        let leg = tree.find_layer(Layer::Legs).unwrap().find_label("leg_left").unwrap();
        let shoe = leg.primitives().find(|p| p.label == "footwear").unwrap();
        assert_eq!(shoe.style.fill, crate::color::Paint::rgb(17, 17, 17));
    }

    #[test]
    fn test_back_and_front_accessories() {
        let mut c = plain();
        c.accessory.id = "cape".into();
        let tree = compose(&c, 1.0, None);
        assert_eq!(tree.find_layer(Layer::AccessoryBack).unwrap().primitive_count(), 1);
        assert_eq!(tree.find_layer(Layer::AccessoryFront).unwrap().primitive_count(), 0);

        c.accessory.id = "bow_tie".into();
        let tree = compose(&c, 1.0, None);
        assert_eq!(tree.find_layer(Layer::AccessoryBack).unwrap().primitive_count(), 0);
        assert_eq!(tree.find_layer(Layer::AccessoryFront).unwrap().primitive_count(), 2);
    }

    #[test]
    fn test_hand_item_hangs_from_its_arm() {
        let holder = |id: &str| {
            let mut c = plain();
            c.hand_item.id = id.into();
            let tree = compose(&c, 1.0, None);
            let arms = tree.find_layer(Layer::Arms).unwrap().clone();
            let holds = |label: &str| arms.find_label(label).unwrap().find_label("hand_item").is_some();
            (holds("arm_left"), holds("arm_right"))
        };
        assert_eq!(holder("mallet"), (true, false));
        assert_eq!(holder("microphone"), (true, false));
        assert_eq!(holder("phone"), (false, true));
        assert_eq!(holder("anvil"), (false, true));
        assert_eq!(holder("none"), (false, false));
    }
}
