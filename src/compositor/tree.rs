//! Render tree produced by the compositor
//!
//! The tree is a plain in-process data structure: nested groups carrying
//! transforms, with styled primitives at the leaves. Children are stored back
//! to front, so a depth-first walk visits primitives in paint order.

use serde::Serialize;

use super::transform::{Affine, Transform};
use crate::catalog::{PatternKind, Rim};
use crate::color::Paint;

/// The z-ordered layers every render tree contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    AccessoryBack,
    Body,
    Legs,
    Arms,
    Torso,
    Jewelry,
    Head,
    HairBehind,
    HeadBase,
    Face,
    HairFront,
    Headwear,
    /// Only present while previewing another hair style
    HairPreview,
    AccessoryFront,
}

impl Layer {
    /// Back-to-front order of the layers that are always emitted.
    pub const Z_ORDER: [Layer; 13] = [
        Layer::AccessoryBack,
        Layer::Body,
        Layer::Legs,
        Layer::Arms,
        Layer::Torso,
        Layer::Jewelry,
        Layer::Head,
        Layer::HairBehind,
        Layer::HeadBase,
        Layer::Face,
        Layer::HairFront,
        Layer::Headwear,
        Layer::AccessoryFront,
    ];
}

/// Geometry of a primitive in its group's coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect { x: f32, y: f32, w: f32, h: f32, radius: f32 },
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    Polygon { points: Vec<[f32; 2]> },
}

impl Shape {
    /// The same shape moved by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Shape {
        match self {
            Shape::Rect { x, y, w, h, radius } => Shape::Rect { x: x + dx, y: y + dy, w: *w, h: *h, radius: *radius },
            Shape::Ellipse { cx, cy, rx, ry } => Shape::Ellipse { cx: cx + dx, cy: cy + dy, rx: *rx, ry: *ry },
            Shape::Polygon { points } => {
                Shape::Polygon { points: points.iter().map(|[x, y]| [x + dx, y + dy]).collect() }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    pub paint: Paint,
    pub width: f32,
}

/// A resolved overlay pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub size: [f32; 2],
    pub ink: Paint,
}

/// Paint attributes of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub fill: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    /// Overlays, bottom to top
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<Pattern>,
    /// Opacity of the specular highlight, 0 for none
    pub highlight: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rim: Option<Rim>,
    pub opacity: f32,
    /// Outline drawn dashed (preview silhouettes)
    pub dashed: bool,
}

impl Style {
    /// Flat fill with an optional black outline.
    pub fn solid(fill: Paint, outline_width: f32) -> Self {
        Style {
            fill,
            outline: outline(outline_width),
            patterns: Vec::new(),
            highlight: 0.0,
            rim: None,
            opacity: 1.0,
            dashed: false,
        }
    }

    /// True when nothing would be drawn for this style.
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0 || (self.fill.is_transparent() && self.outline.is_none())
    }
}

/// A black outline of the given width, `None` for non-positive widths.
pub fn outline(width: f32) -> Option<Outline> {
    (width > 0.0).then_some(Outline { paint: Paint::BLACK, width })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    pub label: String,
    pub shape: Shape,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    pub transform: Transform,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(label: impl Into<String>) -> Self {
        Group { label: label.into(), layer: None, transform: Transform::IDENTITY, children: Vec::new() }
    }

    pub fn layer(layer: Layer, label: impl Into<String>) -> Self {
        Group { layer: Some(layer), ..Group::new(label) }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn push_group(&mut self, group: Group) {
        self.children.push(Node::Group(group));
    }

    pub fn push_primitive(&mut self, label: impl Into<String>, shape: Shape, style: Style) {
        self.children.push(Node::Primitive(Primitive { label: label.into(), shape, style }));
    }

    /// Direct child groups.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.children.iter().filter_map(|child| match child {
            Node::Group(group) => Some(group),
            Node::Primitive(_) => None,
        })
    }

    /// Direct child primitives.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.children.iter().filter_map(|child| match child {
            Node::Primitive(primitive) => Some(primitive),
            Node::Group(_) => None,
        })
    }

    /// Number of primitives in this group and all descendants.
    pub fn primitive_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Primitive(_) => 1,
                Node::Group(group) => group.primitive_count(),
            })
            .sum()
    }

    /// First descendant group (depth-first, including self) with `label`.
    pub fn find_label(&self, label: &str) -> Option<&Group> {
        if self.label == label {
            return Some(self);
        }
        self.groups().find_map(|group| group.find_label(label))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Group(Group),
    Primitive(Primitive),
}

/// The compositor's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    /// Overall scale: requested scale times the age multiplier
    pub scale: f32,
    pub root: Group,
}

impl RenderTree {
    /// Layers in depth-first (back to front) order.
    pub fn layer_order(&self) -> Vec<Layer> {
        fn walk(group: &Group, out: &mut Vec<Layer>) {
            if let Some(layer) = group.layer {
                out.push(layer);
            }
            for child in group.groups() {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    pub fn find_layer(&self, layer: Layer) -> Option<&Group> {
        fn walk(group: &Group, layer: Layer) -> Option<&Group> {
            if group.layer == Some(layer) {
                return Some(group);
            }
            group.groups().find_map(|child| walk(child, layer))
        }
        walk(&self.root, layer)
    }

    pub fn count_layer(&self, layer: Layer) -> usize {
        self.layer_order().into_iter().filter(|l| *l == layer).count()
    }

    pub fn head(&self) -> Option<&Group> {
        self.find_layer(Layer::Head)
    }

    pub fn body(&self) -> Option<&Group> {
        self.find_layer(Layer::Body)
    }

    /// Accumulated `[x, y]` scale from the root down to `layer`'s group.
    pub fn effective_scale(&self, layer: Layer) -> Option<[f32; 2]> {
        self.world_transform(layer).map(|m| m.scale_factors())
    }

    /// Accumulated transform from the root down to `layer`'s group.
    pub fn world_transform(&self, layer: Layer) -> Option<Affine> {
        fn walk(group: &Group, layer: Layer, parent: Affine) -> Option<Affine> {
            let world = parent.then(&group.transform.to_affine());
            if group.layer == Some(layer) {
                return Some(world);
            }
            group.groups().find_map(|child| walk(child, layer, world))
        }
        walk(&self.root, layer, Affine::IDENTITY)
    }

    pub fn primitive_count(&self) -> usize {
        self.root.primitive_count()
    }
}
