//! Surface resolution: slot color + material + texture -> paint attributes

use regex::Regex;
use std::sync::LazyLock;

use super::tree::{outline, Pattern, Style};
use crate::catalog::{Catalogs, PatternSpec, Rim};
use crate::color::{resolve_slot_color, Paint};
use crate::models::AppearanceSlot;

/// Matches `"6px 6px"`, `"8px"`, `"4 2"` and `"3.5px"`.
static TEXTURE_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)(?:px)?(?:\s+(\d+(?:\.\d+)?)(?:px)?)?\s*$").expect("valid regex")
});

/// Parse a CSS-like pattern size into `[width, height]`.
///
/// A single value is used for both axes. Zero sizes are rejected.
///
/// ```
/// use toonkit::compositor::parse_texture_size;
///
/// assert_eq!(parse_texture_size("6px 4px"), Some([6.0, 4.0]));
/// assert_eq!(parse_texture_size("8px"), Some([8.0, 8.0]));
/// assert_eq!(parse_texture_size("cover"), None);
/// ```
pub fn parse_texture_size(s: &str) -> Option<[f32; 2]> {
    let caps = TEXTURE_SIZE.captures(s)?;
    let w: f32 = caps.get(1)?.as_str().parse().ok()?;
    let h: f32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => w,
    };
    (w > 0.0 && h > 0.0).then_some([w, h])
}

/// The resolved look of one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub paint: Paint,
    pub material: &'static str,
    pub texture: &'static str,
    pub highlight: f32,
    pub rim: Option<Rim>,
    /// Material pattern first, then texture pattern
    pub patterns: Vec<Pattern>,
}

impl Surface {
    /// True when the slot's base color is transparent.
    pub fn is_transparent(&self) -> bool {
        self.paint.is_transparent()
    }

    /// Style for a primitive painted with this surface.
    pub fn style(&self, outline_width: f32) -> Style {
        Style {
            fill: self.paint,
            outline: outline(outline_width),
            patterns: self.patterns.clone(),
            highlight: self.highlight,
            rim: self.rim,
            opacity: 1.0,
            dashed: false,
        }
    }

    /// Same finish with a different base paint.
    pub fn repainted(&self, paint: Paint) -> Surface {
        Surface { paint, ..self.clone() }
    }
}

fn pattern(template: &PatternSpec, size: Option<[f32; 2]>) -> Pattern {
    Pattern { kind: template.kind, size: size.unwrap_or(template.size), ink: template.ink }
}

/// Resolve a slot through the material and texture catalogs.
///
/// Unknown material or texture ids fall back to the catalog defaults.
pub fn resolve_surface(catalogs: &Catalogs, slot: &AppearanceSlot) -> Surface {
    let material = catalogs.materials.lookup(&slot.material);
    let texture = catalogs.textures.lookup(&slot.texture);

    let size_override = slot.texture_size.as_deref().and_then(|raw| {
        let parsed = parse_texture_size(raw);
        if parsed.is_none() {
            tracing::debug!(texture_size = raw, "unparseable texture size, using catalog size");
        }
        parsed
    });

    let mut patterns = Vec::new();
    if let Some(template) = &material.pattern {
        patterns.push(pattern(template, None));
    }
    if let Some(template) = &texture.pattern {
        patterns.push(pattern(template, size_override));
    }

    Surface {
        paint: resolve_slot_color(&slot.color),
        material: material.id,
        texture: texture.id,
        highlight: material.highlight,
        rim: material.rim,
        patterns,
    }
}
