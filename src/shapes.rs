//! Device-space shape rasterization.
//!
//! Shapes are reduced to polygons (ellipses and rounded rectangles are
//! tessellated) and converted into sets of integer pixel coordinates.
//! Pixel `(x, y)` is covered when its center `(x + 0.5, y + 0.5)` lies
//! inside the shape.

use std::collections::HashSet;

/// Segments used for a full ellipse.
pub const ELLIPSE_SEGMENTS: usize = 48;
/// Segments used for each rounded corner.
pub const CORNER_SEGMENTS: usize = 8;

/// Clip rectangle `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub width: i32,
    pub height: i32,
}

impl Clip {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width.min(i32::MAX as u32) as i32, height: height.min(i32::MAX as u32) as i32 }
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

/// Points of an ellipse outline, clockwise on screen.
///
/// # Examples
///
/// ```
/// use toonkit::shapes::tessellate_ellipse;
///
/// let points = tessellate_ellipse(0.0, 0.0, 10.0, 5.0, 4);
/// assert_eq!(points.len(), 4);
/// assert!((points[0][0] - 10.0).abs() < 1e-4);
/// ```
pub fn tessellate_ellipse(cx: f32, cy: f32, rx: f32, ry: f32, segments: usize) -> Vec<[f32; 2]> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * std::f32::consts::TAU;
            [cx + rx * t.cos(), cy + ry * t.sin()]
        })
        .collect()
}

/// Points of a rectangle with corner radius `radius` (clamped to half the
/// shorter side). A zero radius yields the four corners.
pub fn tessellate_rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Vec<[f32; 2]> {
    let r = radius.max(0.0).min(w.abs() / 2.0).min(h.abs() / 2.0);
    if r <= f32::EPSILON {
        return vec![[x, y], [x + w, y], [x + w, y + h], [x, y + h]];
    }

    // Corner centers with the start angle of each quarter arc, clockwise from
    // the top-right corner.
    let corners = [
        ([x + w - r, y + r], -90.0f32),
        ([x + w - r, y + h - r], 0.0),
        ([x + r, y + h - r], 90.0),
        ([x + r, y + r], 180.0),
    ];
    let mut points = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS + 1));
    for ([ccx, ccy], start) in corners {
        for i in 0..=CORNER_SEGMENTS {
            let angle = (start + 90.0 * i as f32 / CORNER_SEGMENTS as f32).to_radians();
            points.push([ccx + r * angle.cos(), ccy + r * angle.sin()]);
        }
    }
    points
}

/// Rasterize a line using Bresenham's line algorithm.
///
/// Returns all pixels that form a line between two points.
///
/// # Examples
///
/// ```
/// use toonkit::shapes::rasterize_line;
///
/// let pixels = rasterize_line((0, 0), (3, 3));
/// assert_eq!(pixels.len(), 4);
/// assert!(pixels.contains(&(0, 0)));
/// assert!(pixels.contains(&(3, 3)));
/// ```
pub fn rasterize_line(p0: (i32, i32), p1: (i32, i32)) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        pixels.insert((x0, y0));

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }

    pixels
}

/// Rasterize a filled polygon using a scanline fill.
///
/// Uses the even-odd rule and samples pixel centers. Pixels outside `clip`
/// are dropped.
///
/// # Examples
///
/// ```
/// use toonkit::shapes::{fill_polygon, Clip};
///
/// let square = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]];
/// let pixels = fill_polygon(&square, Clip::new(10, 10));
/// assert_eq!(pixels.len(), 16);
/// ```
pub fn fill_polygon(vertices: &[[f32; 2]], clip: Clip) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if vertices.len() < 3 || vertices.iter().any(|[x, y]| !x.is_finite() || !y.is_finite()) {
        return pixels;
    }

    let min_y = vertices.iter().map(|p| p[1]).fold(f32::MAX, f32::min);
    let max_y = vertices.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
    let row_start = (min_y.floor() as i32).max(0);
    let row_end = (max_y.ceil() as i32).min(clip.height);

    let mut intersections = Vec::new();
    for y in row_start..row_end {
        let sample_y = y as f32 + 0.5;
        intersections.clear();

        for i in 0..vertices.len() {
            let [x1, y1] = vertices[i];
            let [x2, y2] = vertices[(i + 1) % vertices.len()];

            // Half-open on y so shared vertices are counted once
            if (y1 <= sample_y && sample_y < y2) || (y2 <= sample_y && sample_y < y1) {
                intersections.push(x1 + (sample_y - y1) * (x2 - x1) / (y2 - y1));
            }
        }

        intersections.sort_unstable_by(|a, b| a.total_cmp(b));

        for pair in intersections.chunks_exact(2) {
            // Pixel centers in [start, end)
            let x_start = ((pair[0] - 0.5).ceil() as i32).max(0);
            let x_end = ((pair[1] - 0.5).ceil() as i32).min(clip.width);
            for x in x_start..x_end {
                pixels.insert((x, y));
            }
        }
    }

    pixels
}

/// Rasterize a thick line segment as a quad with round caps.
fn stroke_segment(a: [f32; 2], b: [f32; 2], half: f32, clip: Clip, out: &mut HashSet<(i32, i32)>) {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len = (dx * dx + dy * dy).sqrt();
    if len > f32::EPSILON {
        let (nx, ny) = (-dy / len * half, dx / len * half);
        let quad = [[a[0] + nx, a[1] + ny], [b[0] + nx, b[1] + ny], [b[0] - nx, b[1] - ny], [a[0] - nx, a[1] - ny]];
        out.extend(fill_polygon(&quad, clip));
    }
    // Round joins
    for p in [a, b] {
        out.extend(fill_polygon(&tessellate_ellipse(p[0], p[1], half, half, 12), clip));
    }
}

/// Rasterize the outline of a closed polygon with the given stroke width.
///
/// `dash` is `(on, off)` lengths in device pixels; `None` draws a solid line.
/// Strokes under 1.5px fall back to Bresenham lines.
pub fn stroke_polygon(
    vertices: &[[f32; 2]],
    width: f32,
    dash: Option<(f32, f32)>,
    clip: Clip,
) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();
    if vertices.len() < 2 || width <= 0.0 || !width.is_finite() {
        return pixels;
    }

    let segments: Vec<([f32; 2], [f32; 2])> = match dash {
        Some((on, off)) if on > 0.0 && off >= 0.0 => dash_segments(vertices, on, off),
        _ => (0..vertices.len()).map(|i| (vertices[i], vertices[(i + 1) % vertices.len()])).collect(),
    };

    let half = width / 2.0;
    for (a, b) in segments {
        if width < 1.5 {
            let to_px = |p: [f32; 2]| (p[0].floor() as i32, p[1].floor() as i32);
            pixels.extend(rasterize_line(to_px(a), to_px(b)).into_iter().filter(|p| clip.contains(*p)));
        } else {
            stroke_segment(a, b, half, clip, &mut pixels);
        }
    }
    pixels
}

/// Split the closed outline into the "on" pieces of a dash pattern.
fn dash_segments(vertices: &[[f32; 2]], on: f32, off: f32) -> Vec<([f32; 2], [f32; 2])> {
    let period = on + off;
    let mut out = Vec::new();
    // Distance into the current on/off period
    let mut phase = 0.0f32;

    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let len = ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt();
        if len <= f32::EPSILON {
            continue;
        }
        let at = |t: f32| [a[0] + (b[0] - a[0]) * t / len, a[1] + (b[1] - a[1]) * t / len];

        let mut t = 0.0;
        while t < len {
            let drawing = phase < on;
            let boundary = if drawing { on } else { period };
            let step = (boundary - phase).min(len - t);
            if drawing {
                out.push((at(t), at(t + step)));
            }
            t += step;
            phase += step;
            // Snap to the boundary so rounding can't stall the loop
            if phase >= boundary - 1e-4 {
                phase = if drawing { on } else { 0.0 };
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIP: Clip = Clip { width: 64, height: 64 };

    #[test]
    fn test_rasterize_line_horizontal() {
        let pixels = rasterize_line((0, 0), (3, 0));
        assert_eq!(pixels.len(), 4);
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(3, 0)));
    }

    #[test]
    fn test_rasterize_line_negative_coords() {
        let pixels = rasterize_line((-2, -2), (2, 2));
        assert!(pixels.contains(&(-2, -2)));
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(2, 2)));
    }

    #[test]
    fn test_fill_polygon_square() {
        let square = [[0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [0.0, 3.0]];
        let pixels = fill_polygon(&square, CLIP);

        assert_eq!(pixels.len(), 9);
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(2, 2)));
        assert!(!pixels.contains(&(3, 3)));
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let triangle = [[0.0, 0.0], [8.0, 0.0], [4.0, 6.0]];
        let pixels = fill_polygon(&triangle, CLIP);
        assert!(pixels.contains(&(4, 1)));
        assert!(!pixels.contains(&(0, 5)));
    }

    #[test]
    fn test_fill_polygon_clipped() {
        let square = [[-4.0, -4.0], [4.0, -4.0], [4.0, 4.0], [-4.0, 4.0]];
        let pixels = fill_polygon(&square, CLIP);
        assert_eq!(pixels.len(), 16);
        assert!(pixels.iter().all(|p| CLIP.contains(*p)));
    }

    #[test]
    fn test_fill_polygon_degenerate() {
        assert!(fill_polygon(&[[0.0, 0.0], [1.0, 1.0]], CLIP).is_empty());
        assert!(fill_polygon(&[[0.0, 0.0], [f32::NAN, 1.0], [2.0, 2.0]], CLIP).is_empty());
    }

    #[test]
    fn test_ellipse_covers_center_not_corners() {
        let pixels = fill_polygon(&tessellate_ellipse(20.0, 20.0, 10.0, 6.0, ELLIPSE_SEGMENTS), CLIP);
        assert!(pixels.contains(&(20, 20)));
        assert!(!pixels.contains(&(11, 15)));
    }

    #[test]
    fn test_rounded_rect_clamps_radius() {
        let points = tessellate_rounded_rect(0.0, 0.0, 10.0, 4.0, 100.0);
        assert!(points.iter().all(|[x, y]| (-1e-3..=10.001).contains(x) && (-1e-3..=4.001).contains(y)));
        assert_eq!(tessellate_rounded_rect(0.0, 0.0, 10.0, 4.0, 0.0).len(), 4);
    }

    #[test]
    fn test_stroke_leaves_interior_empty() {
        let square = [[8.0, 8.0], [40.0, 8.0], [40.0, 40.0], [8.0, 40.0]];
        let pixels = stroke_polygon(&square, 4.0, None, CLIP);
        assert!(pixels.contains(&(8, 20)));
        assert!(!pixels.contains(&(24, 24)));
    }

    #[test]
    fn test_dashed_stroke_has_gaps() {
        let square = [[8.0, 8.0], [40.0, 8.0], [40.0, 40.0], [8.0, 40.0]];
        let solid = stroke_polygon(&square, 2.0, None, CLIP);
        let dashed = stroke_polygon(&square, 2.0, Some((4.0, 4.0)), CLIP);
        assert!(!dashed.is_empty());
        assert!(dashed.len() < solid.len());
    }

    #[test]
    fn test_thin_stroke_uses_lines() {
        let tri = [[1.0, 1.0], [10.0, 1.0], [5.0, 9.0]];
        let pixels = stroke_polygon(&tri, 1.0, None, CLIP);
        assert!(pixels.contains(&(1, 1)));
        assert!(pixels.contains(&(10, 1)));
    }
}
