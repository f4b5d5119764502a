//! Draw a render tree into an RGBA image
//!
//! Groups are walked depth-first with an accumulated affine matrix. Each
//! primitive is turned into a device-space polygon and painted in this
//! order: fill, patterns, highlight, rim, outline. Layer opacity scales every
//! step. The drawing is centered on the canvas using the bounds of all
//! primitives.

use image::{Rgba, RgbaImage};
use std::collections::HashSet;

use crate::catalog::PatternKind;
use crate::color::Paint;
use crate::compositor::{Affine, Group, Node, Pattern, Primitive, RenderTree, Shape};
use crate::shapes::{
    fill_polygon, stroke_polygon, tessellate_ellipse, tessellate_rounded_rect, Clip, ELLIPSE_SEGMENTS,
};

/// Dash pattern for preview outlines, in device pixels.
const PREVIEW_DASH: (f32, f32) = (6.0, 4.0);

/// Canvas settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub width: u32,
    pub height: u32,
    pub background: Paint,
    /// Padding kept around the drawing when centering, in pixels
    pub padding: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { width: 400, height: 480, background: Paint::TRANSPARENT, padding: 8.0 }
    }
}

/// Outline of a shape in its own coordinate space.
pub fn shape_points(shape: &Shape) -> Vec<[f32; 2]> {
    match shape {
        Shape::Rect { x, y, w, h, radius } => tessellate_rounded_rect(*x, *y, *w, *h, *radius),
        Shape::Ellipse { cx, cy, rx, ry } => tessellate_ellipse(*cx, *cy, *rx, *ry, ELLIPSE_SEGMENTS),
        Shape::Polygon { points } => points.clone(),
    }
}

/// Visit every primitive with its world transform, back to front.
pub fn walk_primitives<'a>(tree: &'a RenderTree, mut visit: impl FnMut(&'a Primitive, &Affine)) {
    fn walk<'a>(group: &'a Group, parent: &Affine, visit: &mut impl FnMut(&'a Primitive, &Affine)) {
        let world = parent.then(&group.transform.to_affine());
        for child in &group.children {
            match child {
                Node::Primitive(p) => visit(p, &world),
                Node::Group(g) => walk(g, &world, visit),
            }
        }
    }
    walk(&tree.root, &Affine::IDENTITY, &mut visit);
}

/// Bounding box `[min_x, min_y, max_x, max_y]` of every primitive in tree
/// coordinates, outlines included. `None` for an empty tree.
pub fn bounds(tree: &RenderTree) -> Option<[f32; 4]> {
    let mut b: Option<[f32; 4]> = None;
    walk_primitives(tree, |p, m| {
        let pad = p.style.outline.map_or(0.0, |o| o.width / 2.0 * m.mean_scale());
        for point in shape_points(&p.shape) {
            let [x, y] = m.apply(point);
            let r = b.get_or_insert([x, y, x, y]);
            r[0] = r[0].min(x - pad);
            r[1] = r[1].min(y - pad);
            r[2] = r[2].max(x + pad);
            r[3] = r[3].max(y + pad);
        }
    });
    b
}

/// Translation that centers the drawing on the canvas.
fn centering(tree: &RenderTree, options: &RasterOptions) -> Affine {
    match bounds(tree) {
        Some([x0, y0, x1, y1]) => {
            let cx = options.width as f32 / 2.0 - (x0 + x1) / 2.0;
            // Keep the top of the drawing in view when it is taller than the canvas
            let fits = y1 - y0 + 2.0 * options.padding <= options.height as f32;
            let cy = if fits { options.height as f32 / 2.0 - (y0 + y1) / 2.0 } else { options.padding - y0 };
            Affine::translation(cx.round(), cy.round())
        }
        None => Affine::translation(options.width as f32 / 2.0, options.height as f32 / 2.0),
    }
}

/// Rasterize `tree` onto a fresh canvas.
///
/// ```
/// use toonkit::compositor::compose;
/// use toonkit::models::Character;
/// use toonkit::raster::{rasterize, RasterOptions};
///
/// let image = rasterize(&compose(&Character::seed(), 1.0, None), &RasterOptions::default());
/// assert_eq!(image.dimensions(), (400, 480));
/// assert!(image.pixels().any(|p| p[3] > 0));
/// ```
pub fn rasterize(tree: &RenderTree, options: &RasterOptions) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(options.width, options.height, Rgba(options.background.0));
    let clip = Clip::new(options.width, options.height);
    let origin = centering(tree, options);

    let mut drawn = 0usize;
    walk_primitives(tree, |primitive, world| {
        let device = origin.then(world);
        if draw_primitive(&mut canvas, primitive, &device, clip) {
            drawn += 1;
        }
    });
    tracing::debug!(primitives = drawn, width = options.width, height = options.height, "rasterized render tree");
    canvas
}

/// Paint one primitive; returns false if it was skipped.
fn draw_primitive(canvas: &mut RgbaImage, primitive: &Primitive, device: &Affine, clip: Clip) -> bool {
    let style = &primitive.style;
    if style.is_invisible() {
        return false;
    }
    let local = shape_points(&primitive.shape);
    let polygon: Vec<[f32; 2]> = local.iter().map(|p| device.apply(*p)).collect();
    let coverage = fill_polygon(&polygon, clip);

    if !style.fill.is_transparent() && !coverage.is_empty() {
        paint_pixels(canvas, &coverage, style.fill, style.opacity);

        // Patterns and highlights are evaluated in shape space so they scale
        // with the character.
        if let Some(inverse) = device.invert() {
            for pattern in &style.patterns {
                paint_where(canvas, &coverage, &inverse, pattern.ink, style.opacity, |p| in_pattern(pattern, p));
            }
            if style.highlight > 0.0 {
                let glint = highlight_ellipse(&local);
                paint_where(canvas, &coverage, &inverse, Paint::WHITE.with_opacity(style.highlight), style.opacity, |p| {
                    inside_ellipse(glint, p)
                });
            }
        }

        if let Some(rim) = style.rim {
            let band = stroke_polygon(&polygon, rim.width * 2.0 * device.mean_scale(), None, clip);
            let inner: HashSet<(i32, i32)> = band.intersection(&coverage).copied().collect();
            paint_pixels(canvas, &inner, rim.paint, style.opacity);
        }
    }

    if let Some(outline) = style.outline {
        let dash = style.dashed.then_some(PREVIEW_DASH);
        let width = (outline.width * device.mean_scale()).max(1.0);
        let ring = stroke_polygon(&polygon, width, dash, clip);
        paint_pixels(canvas, &ring, outline.paint, style.opacity);
    }
    true
}

/// `(cx, cy, rx, ry)` of the specular glint in the upper-left of a shape.
fn highlight_ellipse(points: &[[f32; 2]]) -> (f32, f32, f32, f32) {
    let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
    for [x, y] in points {
        x0 = x0.min(*x);
        y0 = y0.min(*y);
        x1 = x1.max(*x);
        y1 = y1.max(*y);
    }
    let (w, h) = (x1 - x0, y1 - y0);
    (x0 + w * 0.3, y0 + h * 0.25, w * 0.18, h * 0.12)
}

fn inside_ellipse((cx, cy, rx, ry): (f32, f32, f32, f32), [x, y]: [f32; 2]) -> bool {
    rx > 0.0 && ry > 0.0 && ((x - cx) / rx).powi(2) + ((y - cy) / ry).powi(2) <= 1.0
}

/// Whether the shape-space point `p` is inked by `pattern`.
fn in_pattern(pattern: &Pattern, [x, y]: [f32; 2]) -> bool {
    let [w, h] = pattern.size;
    if w <= 0.0 || h <= 0.0 {
        return false;
    }
    let (u, v) = (x.rem_euclid(w), y.rem_euclid(h));
    match pattern.kind {
        PatternKind::Dots => {
            let r = w.min(h) * 0.3;
            (u - w / 2.0).powi(2) + (v - h / 2.0).powi(2) <= r * r
        }
        PatternKind::Stripes => (x + y).rem_euclid(w) < w / 2.0,
        PatternKind::Grid => u < 1.0 || v < 1.0,
        PatternKind::Shine => u / w < v / h,
    }
}

fn paint_where(
    canvas: &mut RgbaImage,
    coverage: &HashSet<(i32, i32)>,
    inverse: &Affine,
    paint: Paint,
    opacity: f32,
    test: impl Fn([f32; 2]) -> bool,
) {
    let selected: HashSet<(i32, i32)> = coverage
        .iter()
        .copied()
        .filter(|&(x, y)| test(inverse.apply([x as f32 + 0.5, y as f32 + 0.5])))
        .collect();
    paint_pixels(canvas, &selected, paint, opacity);
}

fn paint_pixels(canvas: &mut RgbaImage, pixels: &HashSet<(i32, i32)>, paint: Paint, opacity: f32) {
    let src_alpha = paint.alpha() as f32 / 255.0 * opacity.clamp(0.0, 1.0);
    if src_alpha <= 0.0 {
        return;
    }
    let (width, height) = canvas.dimensions();
    for &(x, y) in pixels {
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            continue;
        }
        let dst = canvas.get_pixel(x as u32, y as u32);
        let blended = blend_over(paint, dst, src_alpha);
        canvas.put_pixel(x as u32, y as u32, blended);
    }
}

/// Porter-Duff "source over" with straight alpha.
pub fn blend_over(src: Paint, dst: &Rgba<u8>, src_alpha: f32) -> Rgba<u8> {
    let dst_alpha = dst[3] as f32 / 255.0;
    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let composite = |s: u8, d: u8| -> u8 {
        let (s, d) = (s as f32 / 255.0, d as f32 / 255.0);
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    let [r, g, b, _] = src.0;
    Rgba([composite(r, dst[0]), composite(g, dst[1]), composite(b, dst[2]), (out_alpha * 255.0).round() as u8])
}

/// Shorthand for rendering with default options at a canvas size.
pub fn rasterize_sized(tree: &RenderTree, width: u32, height: u32, background: Paint) -> RgbaImage {
    rasterize(tree, &RasterOptions { width, height, background, ..RasterOptions::default() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{compose, Layer, Style, Transform};
    use crate::models::Character;

    fn single(shape: Shape, style: Style) -> RenderTree {
        let mut root = Group::new("root");
        root.push_primitive("p", shape, style);
        RenderTree { scale: 1.0, root }
    }

    fn count_color(image: &RgbaImage, color: [u8; 4]) -> usize {
        image.pixels().filter(|p| p.0 == color).count()
    }

    #[test]
    fn test_blend_over() {
        let out = blend_over(Paint::rgb(255, 0, 0), &Rgba([0, 0, 0, 0]), 1.0);
        assert_eq!(out, Rgba([255, 0, 0, 255]));

        let half = blend_over(Paint::rgb(255, 255, 255), &Rgba([0, 0, 0, 255]), 0.5);
        assert_eq!(half, Rgba([128, 128, 128, 255]));

        assert_eq!(blend_over(Paint::BLACK, &Rgba([0, 0, 0, 0]), 0.0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_rect_is_centered_and_filled() {
        let tree = single(
            Shape::Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0, radius: 0.0 },
            Style::solid(Paint::rgb(255, 0, 0), 0.0),
        );
        let image = rasterize_sized(&tree, 20, 20, Paint::TRANSPARENT);
        assert_eq!(count_color(&image, [255, 0, 0, 255]), 100);
        assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_outline_drawn_over_fill() {
        let tree = single(
            Shape::Rect { x: 0.0, y: 0.0, w: 20.0, h: 20.0, radius: 0.0 },
            Style::solid(Paint::WHITE, 2.0),
        );
        let image = rasterize_sized(&tree, 40, 40, Paint::TRANSPARENT);
        assert!(count_color(&image, [0, 0, 0, 255]) > 0);
        assert_eq!(image.get_pixel(20, 20).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_pattern_inks_part_of_fill() {
        let mut style = Style::solid(Paint::WHITE, 0.0);
        style.patterns.push(Pattern { kind: PatternKind::Grid, size: [4.0, 4.0], ink: Paint::BLACK });
        let tree = single(Shape::Rect { x: 0.0, y: 0.0, w: 16.0, h: 16.0, radius: 0.0 }, style);
        let options = RasterOptions { width: 16, height: 16, background: Paint::TRANSPARENT, padding: 0.0 };
        let image = rasterize(&tree, &options);
        let black = count_color(&image, [0, 0, 0, 255]);
        let white = count_color(&image, [255, 255, 255, 255]);
        assert!(black > 0 && white > 0);
        assert_eq!(black + white, 256);
    }

    #[test]
    fn test_transparent_fill_without_outline_is_skipped() {
        let tree = single(
            Shape::Ellipse { cx: 0.0, cy: 0.0, rx: 5.0, ry: 5.0 },
            Style::solid(Paint::TRANSPARENT, 0.0),
        );
        let image = rasterize_sized(&tree, 16, 16, Paint::WHITE);
        assert_eq!(count_color(&image, [255, 255, 255, 255]), 256);
    }

    #[test]
    fn test_group_transform_applies() {
        let mut inner = Group::new("g").with_transform(Transform::scaled(2.0));
        inner.push_primitive(
            "p",
            Shape::Rect { x: 0.0, y: 0.0, w: 5.0, h: 5.0, radius: 0.0 },
            Style::solid(Paint::rgb(0, 0, 255), 0.0),
        );
        let mut root = Group::new("root");
        root.push_group(inner);
        let image = rasterize_sized(&RenderTree { scale: 1.0, root }, 20, 20, Paint::TRANSPARENT);
        assert_eq!(count_color(&image, [0, 0, 255, 255]), 100);
    }

    #[test]
    fn test_character_draws_and_preview_adds_pixels() {
        let dex = Character::seed();
        let options = RasterOptions::default();
        let plain = rasterize(&compose(&dex, 1.0, None), &options);
        assert!(plain.pixels().any(|p| p[3] > 0));

        let tree = compose(&dex, 1.0, Some("beehive"));
        assert!(tree.find_layer(Layer::HairPreview).is_some());
        let ghost = rasterize(&tree, &options);
        assert_ne!(plain, ghost);
    }

    #[test]
    fn test_bounds_follow_scale() {
        let dex = Character::seed();
        let [x0, _, x1, _] = bounds(&compose(&dex, 1.0, None)).unwrap();
        let [a0, _, a1, _] = bounds(&compose(&dex, 2.0, None)).unwrap();
        assert!(((a1 - a0) / (x1 - x0) - 2.0).abs() < 0.05);
    }
}
