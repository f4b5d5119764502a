//! Configuration schema types for `toon.toml`
//!
//! Defines the structure and validation rules for toonkit configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::{is_transparent_sentinel, parse_color, Paint};

/// Rendering defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Scale factor handed to the compositor
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Canvas size as `WIDTHxHEIGHT`
    #[serde(default = "default_size")]
    pub size: String,
    /// Canvas background color
    #[serde(default = "default_background")]
    pub background: String,
    /// Margin kept around the drawing, in pixels
    #[serde(default = "default_padding")]
    pub padding: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            size: default_size(),
            background: default_background(),
            padding: default_padding(),
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

fn default_size() -> String {
    "400x480".to_string()
}

fn default_background() -> String {
    "transparent".to_string()
}

fn default_padding() -> f32 {
    8.0
}

impl RenderConfig {
    /// Parsed canvas size, if `size` is well formed.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        parse_size(&self.size)
    }

    /// Background paint; transparent sentinels and bad colors yield transparent.
    pub fn background_paint(&self) -> Paint {
        if is_transparent_sentinel(&self.background) {
            return Paint::TRANSPARENT;
        }
        parse_color(self.background.trim()).unwrap_or(Paint::TRANSPARENT)
    }
}

/// Largest canvas width or height accepted.
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Parse `WIDTHxHEIGHT` with both dimensions in `1..=MAX_CANVAS_SIDE`.
///
/// ```
/// use toonkit::config::parse_size;
///
/// assert_eq!(parse_size("400x480"), Some((400, 480)));
/// assert_eq!(parse_size("0x10"), None);
/// assert_eq!(parse_size("60000x60000"), None);
/// ```
pub fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    let side = 1..=MAX_CANVAS_SIDE;
    (side.contains(&w) && side.contains(&h)).then_some((w, h))
}

/// Where the roster and settings documents live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_roster_dir")]
    pub dir: PathBuf,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { dir: default_roster_dir() }
    }
}

fn default_roster_dir() -> PathBuf {
    PathBuf::from(".toonkit")
}

/// Party payout settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyConfig {
    /// Whether the community pool goal counts as met
    #[serde(default)]
    pub goal_met: bool,
}

/// Complete `toon.toml` configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToonConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub party: PartyConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "toon.toml: '{}' {}", self.field, self.message)
    }
}

impl ToonConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !(self.render.scale.is_finite() && self.render.scale > 0.0) {
            errors.push(ConfigValidationError {
                field: "render.scale".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        if self.render.dimensions().is_none() {
            errors.push(ConfigValidationError {
                field: "render.size".to_string(),
                message: format!("must look like WIDTHxHEIGHT with dimensions from 1 to {}", MAX_CANVAS_SIDE),
            });
        }

        if !is_transparent_sentinel(&self.render.background) {
            if let Err(e) = parse_color(self.render.background.trim()) {
                errors.push(ConfigValidationError {
                    field: "render.background".to_string(),
                    message: format!("is not a color: {}", e),
                });
            }
        }

        if !(self.render.padding.is_finite() && self.render.padding >= 0.0) {
            errors.push(ConfigValidationError {
                field: "render.padding".to_string(),
                message: "must be zero or more".to_string(),
            });
        }

        if self.roster.dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "roster.dir".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: ToonConfig = toml::from_str("").unwrap();
        assert_eq!(config.render.scale, 1.0);
        assert_eq!(config.render.dimensions(), Some((400, 480)));
        assert_eq!(config.render.background_paint(), Paint::TRANSPARENT);
        assert_eq!(config.roster.dir, PathBuf::from(".toonkit"));
        assert!(!config.party.goal_met);
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r##"
[render]
scale = 1.5
size = "256x320"
background = "#202020"
padding = 0

[roster]
dir = "saves"

[party]
goal_met = true
"##;
        let config: ToonConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.render.scale, 1.5);
        assert_eq!(config.render.dimensions(), Some((256, 320)));
        assert_eq!(config.render.background_paint(), Paint([32, 32, 32, 255]));
        assert_eq!(config.render.padding, 0.0);
        assert_eq!(config.roster.dir, PathBuf::from("saves"));
        assert!(config.party.goal_met);
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_bad_render_values() {
        let toml = r#"
[render]
scale = -2.0
size = "wide"
background = "not-a-color"
"#;
        let config: ToonConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "render.scale"));
        assert!(errors.iter().any(|e| e.field == "render.size"));
        assert!(errors.iter().any(|e| e.field == "render.background"));
    }

    #[test]
    fn test_validation_empty_roster_dir() {
        let config: ToonConfig = toml::from_str("[roster]\ndir = \"\"").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "toon.toml: 'roster.dir' must be a non-empty path");
    }

    #[test]
    fn test_parse_size_variants() {
        assert_eq!(parse_size("64X32"), Some((64, 32)));
        assert_eq!(parse_size(" 10 x 20 "), Some((10, 20)));
        assert_eq!(parse_size("10"), None);
        assert_eq!(parse_size("-1x5"), None);
        assert_eq!(parse_size("8192x8192"), Some((8192, 8192)));
        assert_eq!(parse_size("8193x10"), None);
        assert_eq!(parse_size("10x60000"), None);
    }

    #[test]
    fn test_validation_rejects_huge_canvas() {
        let config: ToonConfig = toml::from_str("[render]\nsize = \"60000x60000\"").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "render.size");
        assert!(errors[0].message.contains("8192"));
    }
}
