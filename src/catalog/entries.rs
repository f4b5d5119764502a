//! Catalog entry types
//!
//! Dimensions are in character units (one unit is one pixel at scale 1.0).
//! Head-relative geometry is centered on the head; hand items hang from the
//! end of the arm; body-relative geometry uses the top-center of the torso as
//! origin, with y growing downwards.

use serde::Serialize;

use super::CatalogEntry;
use crate::color::Paint;

/// Overlay pattern drawn on top of a surface's base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Halftone dots, one per cell
    Dots,
    /// Diagonal stripes, one per cell
    Stripes,
    /// Grid lines along the cell edges
    Grid,
    /// A diagonal glint covering the lower-left half of each cell
    Shine,
}

/// Pattern parameters carried by textures and some materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSpec {
    pub kind: PatternKind,
    /// Cell size `[width, height]`
    pub size: [f32; 2],
    pub ink: Paint,
}

/// Static geometry of a catalog piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PieceShape {
    Rect { x: f32, y: f32, w: f32, h: f32, radius: f32 },
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    Polygon(&'static [[f32; 2]]),
}

impl PieceShape {
    /// Center of the shape's bounding box.
    pub fn center(&self) -> [f32; 2] {
        match *self {
            PieceShape::Rect { x, y, w, h, .. } => [x + w / 2.0, y + h / 2.0],
            PieceShape::Ellipse { cx, cy, .. } => [cx, cy],
            PieceShape::Polygon(points) => {
                let (mut min, mut max) = ([f32::MAX; 2], [f32::MIN; 2]);
                for p in points {
                    for axis in 0..2 {
                        min[axis] = min[axis].min(p[axis]);
                        max[axis] = max[axis].max(p[axis]);
                    }
                }
                if points.is_empty() {
                    [0.0, 0.0]
                } else {
                    [(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0]
                }
            }
        }
    }
}

/// Where a piece takes its fill from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PieceFill {
    /// The owning slot's resolved surface
    Slot,
    /// The slot's surface, or this paint when the slot color is transparent
    SlotOr(Paint),
    /// Always this paint (lenses, metal parts, ...)
    Fixed(Paint),
}

/// One drawable part of a headwear, accessory, jewelry or hand item variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantPiece {
    pub label: &'static str,
    pub shape: PieceShape,
    pub fill: PieceFill,
    pub outline: f32,
    /// Rotation in degrees about the shape's center
    pub rotate: f32,
}

/// Whether a hair piece sits behind the head or in front of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HairDepth {
    Behind,
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HairPiece {
    pub depth: HairDepth,
    pub shape: PieceShape,
}

/// Outline of the torso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorsoSilhouette {
    /// Straight box
    Rect,
    /// Narrow waist, rounded
    Slender,
    /// Broad chest tapering to the hips
    Bravo,
    /// Blob (ellipse)
    Bloo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyType {
    pub id: &'static str,
    pub name: &'static str,
    pub chest_w: f32,
    pub waist_w: f32,
    pub hips_w: f32,
    pub torso_h: f32,
    pub limb_w: f32,
    pub leg_w: f32,
    pub silhouette: TorsoSilhouette,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgeRange {
    pub id: &'static str,
    pub name: &'static str,
    /// Uniform scale applied to the whole character
    pub multiplier: f32,
    /// Extra scale applied to the head group
    pub head_scale: f32,
    pub posture: &'static str,
}

/// Inner highlight border drawn by reflective materials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rim {
    pub paint: Paint,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: &'static str,
    pub name: &'static str,
    /// Opacity of the specular highlight, 0 for none
    pub highlight: f32,
    pub rim: Option<Rim>,
    pub pattern: Option<PatternSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub id: &'static str,
    pub name: &'static str,
    pub pattern: Option<PatternSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HairStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub pieces: &'static [HairPiece],
}

#[derive(Debug, Clone, PartialEq)]
pub struct HairShape {
    pub id: &'static str,
    pub name: &'static str,
    pub scale_x: f32,
    pub scale_y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadShape {
    pub id: &'static str,
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EyeStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    /// Square lens instead of a round eye
    pub lens: bool,
    pub outline: f32,
    pub scale_y: f32,
    /// Adds a white glint on the pupil
    pub sparkle: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoseStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub shape: PieceShape,
    pub rotate: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MouthStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub shape: PieceShape,
    /// Filled with the slot color; otherwise only outlined
    pub filled: bool,
    pub outline: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Headwear {
    pub id: &'static str,
    pub name: &'static str,
    /// Hides the eyes (glasses, shades)
    pub covers_eyes: bool,
    pub pieces: &'static [VariantPiece],
}

/// Whether an accessory renders behind or in front of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Back,
    Front,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accessory {
    pub id: &'static str,
    pub name: &'static str,
    pub placement: Placement,
    pub pieces: &'static [VariantPiece],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Jewelry {
    pub id: &'static str,
    pub name: &'static str,
    pub pieces: &'static [VariantPiece],
}

/// The arm that holds a hand item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandItem {
    pub id: &'static str,
    pub name: &'static str,
    pub hand: Hand,
    pub pieces: &'static [VariantPiece],
}

macro_rules! impl_catalog_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CatalogEntry for $ty {
                fn id(&self) -> &str {
                    self.id
                }
                fn name(&self) -> &str {
                    self.name
                }
            }
        )*
    };
}

impl_catalog_entry!(
    BodyType, AgeRange, Material, Texture, HairStyle, HairShape, HeadShape, EyeStyle, NoseStyle,
    MouthStyle, Headwear, Accessory, Jewelry, HandItem,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_centers() {
        let rect = PieceShape::Rect { x: -10.0, y: 0.0, w: 20.0, h: 40.0, radius: 0.0 };
        assert_eq!(rect.center(), [0.0, 20.0]);

        let ellipse = PieceShape::Ellipse { cx: 3.0, cy: 4.0, rx: 1.0, ry: 1.0 };
        assert_eq!(ellipse.center(), [3.0, 4.0]);

        const TRI: &[[f32; 2]] = &[[0.0, 0.0], [10.0, 0.0], [5.0, 8.0]];
        assert_eq!(PieceShape::Polygon(TRI).center(), [5.0, 4.0]);
        assert_eq!(PieceShape::Polygon(&[]).center(), [0.0, 0.0]);
    }
}
