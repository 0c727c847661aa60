//! Light/dark theme and the colors derived from it.

use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::render::Material;

/// Light/dark display mode. Only affects colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// An sRGB color, components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Build from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Convert to linear light, as expected by an sRGB render target.
    pub fn to_linear(self) -> [f32; 3] {
        fn channel(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Every color parameter of the scene for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub particles: Material,
    pub edges: Material,
}

impl Palette {
    pub fn for_theme(theme: Theme, config: &SceneConfig) -> Self {
        // (background, particles, edges)
        let (background, particles, edges) = match theme {
            Theme::Light => (0xf8fafc, 0x3b82f6, 0x1e3a8a),
            Theme::Dark => (0x0f172a, 0x60a5fa, 0x1e40af),
        };
        Self {
            background: Color::from_hex(background),
            particles: Material {
                color: Color::from_hex(particles),
                opacity: config.particle_opacity,
                size: config.point_size,
            },
            edges: Material {
                color: Color::from_hex(edges),
                opacity: config.edge_opacity,
                size: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_palettes_differ_by_theme_but_share_opacity() {
        let config = SceneConfig::default();
        let light = Palette::for_theme(Theme::Light, &config);
        let dark = Palette::for_theme(Theme::Dark, &config);

        assert_ne!(light.background, dark.background);
        assert_ne!(light.particles.color, dark.particles.color);
        assert_ne!(light.edges.color, dark.edges.color);
        assert_eq!(light.particles.opacity, 0.6);
        assert_eq!(dark.edges.opacity, 0.2);
        assert_eq!(light.particles.size, 0.5);
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(Color::from_hex(0x000000).to_linear(), [0.0, 0.0, 0.0]);
        let white = Color::from_hex(0xffffff).to_linear();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
    }
}
