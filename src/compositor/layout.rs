//! Geometry of the character's body parts
//!
//! Body coordinates put the top-center of the torso at the origin, y down.
//! The head group is centered on the head, above the torso.

use super::surface::{resolve_surface, Surface};
use super::transform::Transform;
use super::tree::{outline, Group, Layer, Shape, Style};
use crate::catalog::{
    BodyType, Catalogs, HairDepth, Hand, HairPiece, HairStyle, PieceFill, PieceShape, Placement,
    TorsoSilhouette, VariantPiece,
};
use crate::color::Paint;
use crate::models::{Character, SlotKey};

const BODY_OUTLINE: f32 = 6.0;
const HAIR_OUTLINE: f32 = 5.0;
const LEG_LEN: f32 = 56.0;
const SHOE_H: f32 = 20.0;
const ARM_SWING: f32 = 30.0;
/// Where the neck meets the torso, relative to the torso top
const NECK_Y: f32 = 12.0;
const EYE_SPACING: f32 = 20.0;
const EYE_Y: f32 = -4.0;
const NOSE_Y: f32 = 4.0;
const MOUTH_Y: f32 = 24.0;

const PREVIEW_OPACITY: f32 = 0.6;
const PREVIEW_FILL_ALPHA: f32 = 0.35;
const PREVIEW_OUTLINE: f32 = 3.0;
/// Shoes drawn when the footwear slot is transparent
const BARE_FOOT: Paint = Paint::rgb(17, 17, 17);

pub(super) fn piece_shape(shape: &PieceShape) -> Shape {
    match *shape {
        PieceShape::Rect { x, y, w, h, radius } => Shape::Rect { x, y, w, h, radius },
        PieceShape::Ellipse { cx, cy, rx, ry } => Shape::Ellipse { cx, cy, rx, ry },
        PieceShape::Polygon(points) => Shape::Polygon { points: points.to_vec() },
    }
}

/// Builds the layer groups of one character.
pub(super) struct Layout<'a> {
    catalogs: &'a Catalogs,
    character: &'a Character,
    body: &'a BodyType,
}

impl<'a> Layout<'a> {
    pub(super) fn new(catalogs: &'a Catalogs, character: &'a Character) -> Self {
        let body = catalogs.body_types.lookup(&character.body_type);
        Self { catalogs, character, body }
    }

    fn surface(&self, key: SlotKey) -> Surface {
        resolve_surface(self.catalogs, self.character.slot(key))
    }

    /// Append the pieces of a catalog variant, painted with `surface`.
    fn push_pieces(&self, group: &mut Group, pieces: &[VariantPiece], surface: &Surface) {
        for piece in pieces {
            let style = match piece.fill {
                PieceFill::Slot => surface.style(piece.outline),
                PieceFill::SlotOr(fallback) if surface.is_transparent() => {
                    surface.repainted(fallback).style(piece.outline)
                }
                PieceFill::SlotOr(_) => surface.style(piece.outline),
                PieceFill::Fixed(paint) => Style::solid(paint, piece.outline),
            };
            let shape = piece_shape(&piece.shape);
            if piece.rotate == 0.0 {
                group.push_primitive(piece.label, shape, style);
            } else {
                // Rotate about the piece's own center.
                let [cx, cy] = piece.shape.center();
                let mut pivot = Group::new(piece.label)
                    .with_transform(Transform::translate(cx, cy).with_rotation(piece.rotate));
                pivot.push_primitive(piece.label, shape.offset(-cx, -cy), style);
                group.push_group(pivot);
            }
        }
    }

    pub(super) fn accessory(&self, placement: Placement) -> Group {
        let (layer, label) = match placement {
            Placement::Back => (Layer::AccessoryBack, "accessory_back"),
            Placement::Front => (Layer::AccessoryFront, "accessory_front"),
        };
        let mut group = Group::layer(layer, label);
        let accessory = self.catalogs.accessories.lookup(&self.character.accessory.id);
        if accessory.placement == placement {
            self.push_pieces(&mut group, accessory.pieces, &self.surface(SlotKey::Accessory));
        }
        group
    }

    pub(super) fn body(&self) -> Group {
        let mut group = Group::layer(Layer::Body, "body");
        group.push_group(self.legs());
        group.push_group(self.arms());
        group.push_group(self.torso());
        group
    }

    fn legs(&self) -> Group {
        let b = self.body;
        let legs = self.surface(SlotKey::Legs);
        let mut feet = self.surface(SlotKey::Footwear);
        if feet.is_transparent() {
            feet = feet.repainted(BARE_FOOT);
        }

        let mut group = Group::layer(Layer::Legs, "legs");
        for (side, label) in [(-1.0, "leg_left"), (1.0, "leg_right")] {
            let mut leg =
                Group::new(label).with_transform(Transform::translate(side * b.hips_w / 4.0, b.torso_h - 8.0));
            leg.push_primitive(
                "leg",
                Shape::Rect { x: -b.leg_w / 2.0, y: 0.0, w: b.leg_w, h: LEG_LEN, radius: 0.0 },
                legs.style(BODY_OUTLINE),
            );
            leg.push_primitive(
                "footwear",
                Shape::Rect { x: -b.leg_w / 2.0 - 4.0, y: LEG_LEN - SHOE_H, w: b.leg_w + 8.0, h: SHOE_H, radius: 6.0 },
                feet.style(BODY_OUTLINE),
            );
            group.push_group(leg);
        }
        group
    }

    fn arms(&self) -> Group {
        let b = self.body;
        let arms = self.surface(SlotKey::Arms);
        let arm_len = 48.0 + b.torso_h * 0.25;
        let hand_item = self.catalogs.hand_items.lookup(&self.character.hand_item.id);

        let mut group = Group::layer(Layer::Arms, "arms");
        for (side, hand, label) in [(-1.0, Hand::Left, "arm_left"), (1.0, Hand::Right, "arm_right")] {
            let shoulder_x = side * (b.chest_w / 2.0 - b.limb_w / 2.0);
            let mut arm = Group::new(label)
                .with_transform(Transform::translate(shoulder_x, 10.0).with_rotation(-side * ARM_SWING));
            arm.push_primitive(
                "arm",
                Shape::Rect { x: -b.limb_w / 2.0, y: 0.0, w: b.limb_w, h: arm_len, radius: b.limb_w / 2.0 },
                arms.style(BODY_OUTLINE),
            );
            if hand_item.hand == hand && !hand_item.pieces.is_empty() {
                let mut held = Group::new("hand_item").with_transform(Transform::translate(0.0, arm_len));
                self.push_pieces(&mut held, hand_item.pieces, &self.surface(SlotKey::HandItem));
                arm.push_group(held);
            }
            group.push_group(arm);
        }
        group
    }

    fn torso_shape(&self) -> Shape {
        let b = self.body;
        let (c, w, hp, h) = (b.chest_w / 2.0, b.waist_w / 2.0, b.hips_w / 2.0, b.torso_h);
        match b.silhouette {
            TorsoSilhouette::Rect => Shape::Rect { x: -c, y: 0.0, w: b.chest_w, h, radius: 12.0 },
            TorsoSilhouette::Slender | TorsoSilhouette::Bravo => Shape::Polygon {
                points: vec![[-c, 0.0], [c, 0.0], [w, h * 0.6], [hp, h], [-hp, h], [-w, h * 0.6]],
            },
            TorsoSilhouette::Bloo => Shape::Ellipse { cx: 0.0, cy: h / 2.0, rx: c, ry: h / 2.0 },
        }
    }

    fn torso(&self) -> Group {
        let shape = self.torso_shape();
        let mut group = Group::layer(Layer::Torso, "torso");
        group.push_primitive("torso", shape.clone(), self.surface(SlotKey::Torso).style(BODY_OUTLINE));
        group.push_primitive("outfit", shape, self.surface(SlotKey::Outfit).style(BODY_OUTLINE));
        group
    }

    pub(super) fn jewelry(&self) -> Group {
        let mut group =
            Group::layer(Layer::Jewelry, "jewelry").with_transform(Transform::translate(0.0, NECK_Y - 8.0));
        let jewelry = self.catalogs.jewelry.lookup(&self.character.jewelry.id);
        self.push_pieces(&mut group, jewelry.pieces, &self.surface(SlotKey::Jewelry));
        group
    }

    fn hair_transform(&self) -> Transform {
        let c = self.character;
        let shape = self.catalogs.hair_shapes.lookup(c.hair_shape.as_deref().unwrap_or_default());
        let volume = c.clamped_hair_volume();
        Transform::IDENTITY
            .with_scale(volume * shape.scale_x, volume * shape.scale_y)
            .with_skew_x(c.clamped_hair_warp())
    }

    fn hair_layer(&self, layer: Layer, label: &str, pieces: &[HairPiece], surface: &Surface) -> Group {
        let mut group = Group::layer(layer, label).with_transform(self.hair_transform());
        for piece in pieces {
            group.push_primitive("hair", piece_shape(&piece.shape), surface.style(HAIR_OUTLINE));
        }
        group
    }

    /// The head group. `preview` is an already resolved override style.
    pub(super) fn head(&self, preview: Option<&HairStyle>) -> Group {
        let c = self.character;
        let age = self.catalogs.age_ranges.lookup(&c.age_range);
        let head_shape = self.catalogs.head_shapes.lookup(c.head_shape.as_deref().unwrap_or_default());
        let style = self.catalogs.hair_styles.lookup(&c.hair_style);
        let hair = self.surface(SlotKey::Hair);

        let center_y = NECK_Y - (head_shape.height / 2.0) * age.head_scale;
        let mut group = Group::layer(Layer::Head, "head")
            .with_transform(Transform::translate(0.0, center_y).with_scale(age.head_scale, age.head_scale));

        let (behind, front): (Vec<HairPiece>, Vec<HairPiece>) =
            style.pieces.iter().copied().partition(|p| p.depth == HairDepth::Behind);
        group.push_group(self.hair_layer(Layer::HairBehind, "hair_behind", &behind, &hair));

        let mut base = Group::layer(Layer::HeadBase, "head_base");
        base.push_primitive(
            "head",
            Shape::Rect {
                x: -head_shape.width / 2.0,
                y: -head_shape.height / 2.0,
                w: head_shape.width,
                h: head_shape.height,
                radius: head_shape.radius,
            },
            self.surface(SlotKey::Head).style(BODY_OUTLINE),
        );
        group.push_group(base);

        let headwear = self.catalogs.headwear.lookup(&c.headwear.id);
        group.push_group(self.face(headwear.covers_eyes));
        group.push_group(self.hair_layer(Layer::HairFront, "hair_front", &front, &hair));

        let mut worn = Group::layer(Layer::Headwear, "headwear");
        self.push_pieces(&mut worn, headwear.pieces, &self.surface(SlotKey::Headwear));
        group.push_group(worn);

        if let Some(preview) = preview {
            group.push_group(self.preview(preview, &hair));
        }
        group
    }

    fn face(&self, eyes_covered: bool) -> Group {
        let c = self.character;
        let mut group = Group::layer(Layer::Face, "face");

        if !eyes_covered {
            let eye = self.catalogs.eye_styles.lookup(&c.eyes.id);
            let iris = self.surface(SlotKey::Eyes);
            for (side, label) in [(-1.0, "eye_left"), (1.0, "eye_right")] {
                let mut g = Group::new(label)
                    .with_transform(Transform::translate(side * EYE_SPACING, EYE_Y).with_scale(1.0, eye.scale_y));
                let (rx, ry) = (eye.width / 2.0, eye.height / 2.0);
                let white = if eye.lens {
                    Shape::Rect { x: -rx, y: -ry, w: eye.width, h: eye.height, radius: 4.0 }
                } else {
                    Shape::Ellipse { cx: 0.0, cy: 0.0, rx, ry }
                };
                g.push_primitive("eye_white", white, Style::solid(Paint::WHITE, eye.outline));
                g.push_primitive(
                    "pupil",
                    Shape::Ellipse { cx: 0.0, cy: 2.0, rx: rx * 0.4, ry: ry * 0.4 },
                    iris.style(0.0),
                );
                if eye.sparkle {
                    g.push_primitive(
                        "sparkle",
                        Shape::Ellipse { cx: -rx * 0.2, cy: -ry * 0.1, rx: 2.5, ry: 2.5 },
                        Style::solid(Paint::WHITE, 0.0),
                    );
                }
                group.push_group(g);
            }
        }

        let nose = self.catalogs.nose_styles.lookup(&c.nose.id);
        let mut n = Group::new("nose").with_transform(Transform::translate(0.0, NOSE_Y).with_rotation(nose.rotate));
        n.push_primitive("nose", piece_shape(&nose.shape), self.surface(SlotKey::Nose).style(0.0));
        group.push_group(n);

        let mouth = self.catalogs.mouth_styles.lookup(&c.mouth.id);
        let ink = self.surface(SlotKey::Mouth);
        let style = if mouth.filled {
            ink.style(mouth.outline)
        } else {
            // Outline-only mouths are stroked with the slot color.
            let mut s = Style::solid(Paint::TRANSPARENT, mouth.outline);
            if let Some(o) = s.outline.as_mut() {
                if !ink.is_transparent() {
                    o.paint = ink.paint;
                }
            }
            s
        };
        let mut m = Group::new("mouth").with_transform(Transform::translate(0.0, MOUTH_Y));
        m.push_primitive("mouth", piece_shape(&mouth.shape), style);
        group.push_group(m);

        group
    }

    fn preview(&self, style: &HairStyle, hair: &Surface) -> Group {
        let mut group = Group::layer(Layer::HairPreview, format!("preview:{}", style.id))
            .with_transform(self.hair_transform());
        let base = if hair.is_transparent() { Paint::WHITE } else { hair.paint };
        for piece in style.pieces {
            group.push_primitive(
                "ghost",
                piece_shape(&piece.shape),
                Style {
                    fill: base.with_opacity(PREVIEW_FILL_ALPHA),
                    outline: outline(PREVIEW_OUTLINE),
                    patterns: Vec::new(),
                    highlight: 0.0,
                    rim: None,
                    opacity: PREVIEW_OPACITY,
                    dashed: true,
                },
            );
        }
        group
    }
}
