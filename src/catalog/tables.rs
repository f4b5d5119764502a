//! The canonical catalog data

use super::entries::*;
use super::Catalog;
use super::Catalogs;
use crate::color::Paint;

const INK: Paint = Paint([0, 0, 0, 255]);
const INK_SOFT: Paint = Paint([0, 0, 0, 150]);
const GLINT: Paint = Paint([255, 255, 255, 51]);

pub(super) fn standard() -> Catalogs {
    Catalogs {
        body_types: Catalog::new("body_types", body_types()),
        age_ranges: Catalog::with_default("age_ranges", age_ranges(), "teenager"),
        materials: Catalog::new("materials", materials()),
        textures: Catalog::new("textures", textures()),
        hair_styles: Catalog::new("hair_styles", hair_styles()),
        hair_shapes: Catalog::new("hair_shapes", hair_shapes()),
        head_shapes: Catalog::new("head_shapes", head_shapes()),
        eye_styles: Catalog::with_default("eye_styles", eye_styles(), "round"),
        nose_styles: Catalog::with_default("nose_styles", nose_styles(), "button"),
        mouth_styles: Catalog::new("mouth_styles", mouth_styles()),
        headwear: Catalog::new("headwear", headwear()),
        accessories: Catalog::new("accessories", accessories()),
        jewelry: Catalog::new("jewelry", jewelry()),
        hand_items: Catalog::new("hand_items", hand_items()),
    }
}

fn body_types() -> Vec<BodyType> {
    use TorsoSilhouette::*;
    vec![
        BodyType {
            id: "standard",
            name: "The Host",
            chest_w: 112.0,
            waist_w: 100.0,
            hips_w: 104.0,
            torso_h: 128.0,
            limb_w: 20.0,
            leg_w: 32.0,
            silhouette: Rect,
        },
        BodyType {
            id: "boxy",
            name: "The Genius",
            chest_w: 144.0,
            waist_w: 144.0,
            hips_w: 144.0,
            torso_h: 128.0,
            limb_w: 12.0,
            leg_w: 28.0,
            silhouette: Rect,
        },
        BodyType {
            id: "lanky",
            name: "The Pest",
            chest_w: 80.0,
            waist_w: 64.0,
            hips_w: 80.0,
            torso_h: 224.0,
            limb_w: 8.0,
            leg_w: 20.0,
            silhouette: Slender,
        },
        BodyType {
            id: "triangle",
            name: "The Muscle",
            chest_w: 224.0,
            waist_w: 64.0,
            hips_w: 64.0,
            torso_h: 192.0,
            limb_w: 24.0,
            leg_w: 28.0,
            silhouette: Bravo,
        },
        BodyType {
            id: "round",
            name: "The Friend",
            chest_w: 176.0,
            waist_w: 176.0,
            hips_w: 176.0,
            torso_h: 176.0,
            limb_w: 16.0,
            leg_w: 36.0,
            silhouette: Bloo,
        },
        BodyType {
            id: "tall",
            name: "The Stretch",
            chest_w: 104.0,
            waist_w: 88.0,
            hips_w: 96.0,
            torso_h: 176.0,
            limb_w: 14.0,
            leg_w: 26.0,
            silhouette: Slender,
        },
        BodyType {
            id: "slim",
            name: "The Sprinter",
            chest_w: 96.0,
            waist_w: 72.0,
            hips_w: 88.0,
            torso_h: 144.0,
            limb_w: 12.0,
            leg_w: 24.0,
            silhouette: Slender,
        },
    ]
}

fn age_ranges() -> Vec<AgeRange> {
    vec![
        AgeRange { id: "child", name: "Boy Genius", multiplier: 0.8, head_scale: 1.4, posture: "focused" },
        AgeRange { id: "teenager", name: "Hyper Teen", multiplier: 0.95, head_scale: 1.2, posture: "slouched" },
        AgeRange { id: "adult", name: "Research Lead", multiplier: 1.1, head_scale: 1.0, posture: "upright" },
    ]
}

fn materials() -> Vec<Material> {
    vec![
        Material { id: "matte", name: "Solid Paint", highlight: 0.0, rim: None, pattern: None },
        Material { id: "glossy", name: "Cel Gloss", highlight: 0.45, rim: None, pattern: None },
        Material {
            id: "metallic",
            name: "Chrome Chrome",
            highlight: 0.3,
            rim: Some(Rim { paint: Paint::WHITE, width: 4.0 }),
            pattern: None,
        },
        Material {
            id: "holographic",
            name: "Hologram Foil",
            highlight: 0.25,
            rim: None,
            pattern: Some(PatternSpec {
                kind: PatternKind::Stripes,
                size: [12.0, 12.0],
                ink: Paint([0, 255, 255, 90]),
            }),
        },
        Material {
            id: "fuzzy",
            name: "Plush Fuzz",
            highlight: 0.0,
            rim: None,
            pattern: Some(PatternSpec { kind: PatternKind::Dots, size: [3.0, 3.0], ink: Paint([255, 255, 255, 90]) }),
        },
        Material {
            id: "liquid",
            name: "Goo Glaze",
            highlight: 0.55,
            rim: None,
            pattern: Some(PatternSpec { kind: PatternKind::Shine, size: [14.0, 14.0], ink: Paint([255, 255, 255, 64]) }),
        },
        Material {
            id: "hatch",
            name: "Ink Shade",
            highlight: 0.0,
            rim: None,
            pattern: Some(PatternSpec { kind: PatternKind::Dots, size: [6.0, 6.0], ink: INK }),
        },
        Material {
            id: "blueprint",
            name: "Draft Grid",
            highlight: 0.0,
            rim: None,
            pattern: Some(PatternSpec { kind: PatternKind::Grid, size: [10.0, 10.0], ink: INK }),
        },
    ]
}

fn textures() -> Vec<Texture> {
    vec![
        Texture { id: "none", name: "Flat Color", pattern: None },
        Texture {
            id: "dots",
            name: "Halftone",
            pattern: Some(PatternSpec { kind: PatternKind::Dots, size: [4.0, 4.0], ink: INK }),
        },
        Texture {
            id: "stripes",
            name: "Candy Stripes",
            pattern: Some(PatternSpec { kind: PatternKind::Stripes, size: [8.0, 8.0], ink: INK_SOFT }),
        },
        Texture {
            id: "grid",
            name: "Lab Grid",
            pattern: Some(PatternSpec { kind: PatternKind::Grid, size: [10.0, 10.0], ink: INK_SOFT }),
        },
        Texture {
            id: "shine",
            name: "Glossy",
            pattern: Some(PatternSpec { kind: PatternKind::Shine, size: [10.0, 10.0], ink: GLINT }),
        },
    ]
}

const fn rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> PieceShape {
    PieceShape::Rect { x, y, w, h, radius }
}

const fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> PieceShape {
    PieceShape::Ellipse { cx, cy, rx, ry }
}

const fn front(shape: PieceShape) -> HairPiece {
    HairPiece { depth: HairDepth::Front, shape }
}

const fn behind(shape: PieceShape) -> HairPiece {
    HairPiece { depth: HairDepth::Behind, shape }
}

const ATOMIC_QUIFF: &[HairPiece] = &[
    front(rect(-50.0, -56.0, 100.0, 22.0, 10.0)),
    front(PieceShape::Polygon(&[[-44.0, -46.0], [-30.0, -92.0], [8.0, -104.0], [42.0, -84.0], [48.0, -46.0]])),
];

const TALL_PIGTAILS: &[HairPiece] = &[
    behind(ellipse(-62.0, -64.0, 18.0, 44.0)),
    behind(ellipse(62.0, -64.0, 18.0, 44.0)),
    front(rect(-50.0, -56.0, 100.0, 24.0, 12.0)),
];

const BOWL_CUT: &[HairPiece] = &[front(rect(-54.0, -62.0, 108.0, 46.0, 40.0))];

const BEEHIVE: &[HairPiece] = &[behind(ellipse(0.0, -84.0, 46.0, 58.0)), front(rect(-50.0, -58.0, 100.0, 22.0, 12.0))];

const SLICK_BACK: &[HairPiece] = &[behind(rect(-52.0, -52.0, 104.0, 34.0, 12.0)), front(rect(-50.0, -58.0, 100.0, 24.0, 14.0))];

const POMPADOUR: &[HairPiece] = &[front(rect(-53.0, -96.0, 106.0, 56.0, 40.0))];

const SPIKY: &[HairPiece] = &[
    front(rect(-48.0, -54.0, 96.0, 16.0, 6.0)),
    front(PieceShape::Polygon(&[[-48.0, -40.0], [-36.0, -84.0], [-24.0, -40.0]])),
    front(PieceShape::Polygon(&[[-24.0, -40.0], [-12.0, -88.0], [0.0, -40.0]])),
    front(PieceShape::Polygon(&[[0.0, -40.0], [12.0, -88.0], [24.0, -40.0]])),
    front(PieceShape::Polygon(&[[24.0, -40.0], [36.0, -84.0], [48.0, -40.0]])),
];

const SHORT: &[HairPiece] = &[front(rect(-50.0, -56.0, 100.0, 32.0, 12.0))];

const LONG: &[HairPiece] = &[behind(rect(-64.0, -64.0, 128.0, 96.0, 24.0)), front(rect(-50.0, -56.0, 100.0, 20.0, 12.0))];

const PIGTAILS: &[HairPiece] = &[
    front(ellipse(-64.0, -36.0, 20.0, 20.0)),
    front(ellipse(64.0, -36.0, 20.0, 20.0)),
    front(rect(-50.0, -56.0, 100.0, 20.0, 12.0)),
];

fn hair_styles() -> Vec<HairStyle> {
    vec![
        HairStyle { id: "atomic_quiff", name: "The Boy Genius", icon: "⚡", pieces: ATOMIC_QUIFF },
        HairStyle { id: "tall_pigtails", name: "Hyper Dancer", icon: "🎀", pieces: TALL_PIGTAILS },
        HairStyle { id: "bowl_cut", name: "The Rival", icon: "🥣", pieces: BOWL_CUT },
        HairStyle { id: "beehive", name: "Lab Matriarch", icon: "🐝", pieces: BEEHIVE },
        HairStyle { id: "slick_back", name: "The Patriarch", icon: "🕶️", pieces: SLICK_BACK },
        HairStyle { id: "pompadour", name: "The Bravo", icon: "💪", pieces: POMPADOUR },
        HairStyle { id: "spiky", name: "The Action Hero", icon: "🔥", pieces: SPIKY },
        HairStyle { id: "short", name: "Crew Cut", icon: "✂️", pieces: SHORT },
        HairStyle { id: "long", name: "Flowing Locks", icon: "🌊", pieces: LONG },
        HairStyle { id: "pigtails", name: "Twin Puffs", icon: "🎈", pieces: PIGTAILS },
    ]
}

fn hair_shapes() -> Vec<HairShape> {
    vec![
        HairShape { id: "standard", name: "Standard", scale_x: 1.0, scale_y: 1.0 },
        HairShape { id: "wide", name: "Wide Silhouette", scale_x: 1.25, scale_y: 0.9 },
        HairShape { id: "slim", name: "Sleek & Narrow", scale_x: 0.8, scale_y: 1.1 },
        HairShape { id: "compressed", name: "Flat Compressed", scale_x: 1.1, scale_y: 0.6 },
    ]
}

fn head_shapes() -> Vec<HeadShape> {
    vec![
        HeadShape { id: "round", name: "Hyper Round", width: 96.0, height: 96.0, radius: 48.0 },
        HeadShape { id: "pill", name: "Long Pill", width: 88.0, height: 112.0, radius: 44.0 },
        HeadShape { id: "wedge", name: "Modern Wedge", width: 104.0, height: 96.0, radius: 24.0 },
        HeadShape { id: "geometric", name: "Boxy Prime", width: 96.0, height: 96.0, radius: 16.0 },
    ]
}

fn eye_styles() -> Vec<EyeStyle> {
    vec![
        EyeStyle {
            id: "glasses",
            name: "Huge Spectacles",
            width: 30.0,
            height: 30.0,
            lens: true,
            outline: 6.0,
            scale_y: 1.0,
            sparkle: false,
        },
        EyeStyle {
            id: "round",
            name: "Wide Eyed",
            width: 28.0,
            height: 32.0,
            lens: false,
            outline: 4.0,
            scale_y: 1.0,
            sparkle: false,
        },
        EyeStyle {
            id: "angry",
            name: "Determined",
            width: 28.0,
            height: 32.0,
            lens: false,
            outline: 4.0,
            scale_y: 0.75,
            sparkle: false,
        },
        EyeStyle {
            id: "sparkle",
            name: "Dreamy",
            width: 28.0,
            height: 32.0,
            lens: false,
            outline: 4.0,
            scale_y: 1.0,
            sparkle: true,
        },
    ]
}

fn nose_styles() -> Vec<NoseStyle> {
    vec![
        NoseStyle {
            id: "pointy",
            name: "The Beak",
            shape: PieceShape::Polygon(&[[-10.0, 0.0], [10.0, 0.0], [0.0, 25.0]]),
            rotate: 0.0,
        },
        NoseStyle { id: "button", name: "Small Dot", shape: ellipse(0.0, 8.0, 6.0, 6.0), rotate: 0.0 },
        NoseStyle { id: "sharp", name: "Modern Grade", shape: rect(-4.0, 0.0, 8.0, 24.0, 0.0), rotate: 45.0 },
    ]
}

fn mouth_styles() -> Vec<MouthStyle> {
    vec![
        MouthStyle { id: "line", name: "Focused Flat", shape: rect(-16.0, 0.0, 32.0, 4.0, 2.0), filled: true, outline: 0.0 },
        MouthStyle {
            id: "grin",
            name: "Genius Smile",
            shape: PieceShape::Polygon(&[
                [-20.0, 0.0],
                [-14.0, 12.0],
                [0.0, 18.0],
                [14.0, 12.0],
                [20.0, 0.0],
            ]),
            filled: false,
            outline: 4.0,
        },
        MouthStyle { id: "pout", name: "Snooty Pout", shape: ellipse(0.0, 4.0, 4.0, 4.0), filled: false, outline: 3.0 },
        MouthStyle { id: "shout", name: "SHUT UP!", shape: ellipse(0.0, 8.0, 16.0, 16.0), filled: true, outline: 4.0 },
    ]
}

const fn piece(label: &'static str, shape: PieceShape, fill: PieceFill, outline: f32) -> VariantPiece {
    VariantPiece { label, shape, fill, outline, rotate: 0.0 }
}

const fn rotated(p: VariantPiece, rotate: f32) -> VariantPiece {
    VariantPiece { rotate, ..p }
}

fn headwear() -> Vec<Headwear> {
    const GENIUS_GLASSES: &[VariantPiece] = &[
        piece("lens_left", rect(-55.0, -24.0, 53.0, 48.0, 8.0), PieceFill::Fixed(Paint([207, 250, 254, 255])), 5.0),
        piece("lens_right", rect(2.0, -24.0, 53.0, 48.0, 8.0), PieceFill::Fixed(Paint([207, 250, 254, 255])), 5.0),
    ];
    const PINK_RIBBON: &[VariantPiece] = &[
        piece("bow", ellipse(0.0, -56.0, 32.0, 16.0), PieceFill::SlotOr(Paint([244, 114, 182, 255])), 5.0),
        piece("knot", ellipse(0.0, -56.0, 8.0, 8.0), PieceFill::Fixed(Paint([219, 39, 119, 255])), 0.0),
    ];
    const BRAVO_SHADES: &[VariantPiece] =
        &[piece("shades", rect(-55.0, -16.0, 110.0, 24.0, 12.0), PieceFill::SlotOr(INK), 2.0)];
    const WIZARD: &[VariantPiece] = &[piece(
        "hat",
        PieceShape::Polygon(&[[0.0, -112.0], [-40.0, -40.0], [40.0, -40.0]]),
        PieceFill::SlotOr(Paint([79, 70, 229, 255])),
        5.0,
    )];
    vec![
        Headwear { id: "none", name: "Bare Head", covers_eyes: false, pieces: &[] },
        Headwear { id: "genius_glasses", name: "Genius Goggles", covers_eyes: true, pieces: GENIUS_GLASSES },
        Headwear { id: "pink_ribbon", name: "Ballerina Bow", covers_eyes: false, pieces: PINK_RIBBON },
        Headwear { id: "bravo_shades", name: "Hunk Shades", covers_eyes: true, pieces: BRAVO_SHADES },
        Headwear { id: "wizard", name: "Wizard Cone", covers_eyes: false, pieces: WIZARD },
    ]
}

fn accessories() -> Vec<Accessory> {
    const WINGS: &[VariantPiece] = &[
        rotated(piece("wing_left", ellipse(-52.0, 48.0, 40.0, 64.0), PieceFill::SlotOr(Paint([255, 255, 255, 230])), 6.0), -12.0),
        rotated(piece("wing_right", ellipse(52.0, 48.0, 40.0, 64.0), PieceFill::SlotOr(Paint([255, 255, 255, 230])), 6.0), 12.0),
    ];
    const CAPE: &[VariantPiece] =
        &[piece("cape", rect(-48.0, 16.0, 96.0, 160.0, 12.0), PieceFill::SlotOr(Paint([220, 38, 38, 255])), 6.0)];
    const BOW_TIE: &[VariantPiece] = &[
        piece(
            "bow_left",
            PieceShape::Polygon(&[[0.0, 12.0], [-20.0, 2.0], [-20.0, 22.0]]),
            PieceFill::SlotOr(Paint([216, 0, 0, 255])),
            4.0,
        ),
        piece(
            "bow_right",
            PieceShape::Polygon(&[[0.0, 12.0], [20.0, 2.0], [20.0, 22.0]]),
            PieceFill::SlotOr(Paint([216, 0, 0, 255])),
            4.0,
        ),
    ];
    vec![
        Accessory { id: "none", name: "Nothing", placement: Placement::Back, pieces: &[] },
        Accessory { id: "wings", name: "Angel Wings", placement: Placement::Back, pieces: WINGS },
        Accessory { id: "cape", name: "Hero Cape", placement: Placement::Back, pieces: CAPE },
        Accessory { id: "bow_tie", name: "Dapper Bow Tie", placement: Placement::Front, pieces: BOW_TIE },
    ]
}

fn jewelry() -> Vec<Jewelry> {
    const GOLD_CHAIN: &[VariantPiece] = &[piece(
        "chain",
        PieceShape::Polygon(&[[-32.0, 0.0], [-20.0, 22.0], [0.0, 30.0], [20.0, 22.0], [32.0, 0.0]]),
        PieceFill::SlotOr(Paint([234, 179, 8, 255])),
        3.0,
    )];
    const PEARLS: &[VariantPiece] = &[
        piece("pearl_1", ellipse(-18.0, 14.0, 5.0, 5.0), PieceFill::SlotOr(Paint::WHITE), 2.0),
        piece("pearl_2", ellipse(-6.0, 20.0, 5.0, 5.0), PieceFill::SlotOr(Paint::WHITE), 2.0),
        piece("pearl_3", ellipse(6.0, 20.0, 5.0, 5.0), PieceFill::SlotOr(Paint::WHITE), 2.0),
        piece("pearl_4", ellipse(18.0, 14.0, 5.0, 5.0), PieceFill::SlotOr(Paint::WHITE), 2.0),
    ];
    vec![
        Jewelry { id: "none", name: "Nothing", pieces: &[] },
        Jewelry { id: "gold_chain", name: "Bling Chain", pieces: GOLD_CHAIN },
        Jewelry { id: "pearls", name: "Matriarch Pearls", pieces: PEARLS },
    ]
}

fn hand_items() -> Vec<HandItem> {
    const MALLET: &[VariantPiece] = &[
        piece("handle", rect(-4.0, 0.0, 8.0, 72.0, 0.0), PieceFill::Fixed(Paint([124, 45, 18, 255])), 5.0),
        piece("head", rect(-30.0, 64.0, 60.0, 40.0, 8.0), PieceFill::SlotOr(Paint([156, 163, 175, 255])), 5.0),
    ];
    const MICROPHONE: &[VariantPiece] = &[
        piece("grip", rect(-6.0, 0.0, 12.0, 40.0, 0.0), PieceFill::Fixed(INK), 5.0),
        piece("mesh", ellipse(0.0, 44.0, 14.0, 14.0), PieceFill::SlotOr(Paint([209, 213, 219, 255])), 4.0),
    ];
    const PHONE: &[VariantPiece] =
        &[piece("phone", rect(-20.0, 4.0, 40.0, 56.0, 6.0), PieceFill::SlotOr(Paint([236, 72, 153, 255])), 5.0)];
    const ANVIL: &[VariantPiece] =
        &[piece("anvil", rect(-40.0, 8.0, 80.0, 64.0, 12.0), PieceFill::SlotOr(Paint([55, 65, 81, 255])), 5.0)];
    vec![
        HandItem { id: "none", name: "Empty Hands", hand: Hand::Right, pieces: &[] },
        HandItem { id: "mallet", name: "Cartoon Mallet", hand: Hand::Left, pieces: MALLET },
        HandItem { id: "microphone", name: "Party Mic", hand: Hand::Left, pieces: MICROPHONE },
        HandItem { id: "phone", name: "Gossip Phone", hand: Hand::Right, pieces: PHONE },
        HandItem { id: "anvil", name: "Falling Anvil", hand: Hand::Right, pieces: ANVIL },
    ]
}
