//! Palette data model for shade role resolution.

use point_cloud_convert::Rgb;
use serde::{Deserialize, Serialize};

/// Shading class a particle resolves its colour from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeRole {
    Shadow,
    Midtone,
    Detail,
}

/// Three role colours plus the scene-wide glow accent.
///
/// The glow colour is carried for the rendering surface and is never
/// applied per particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub shadow: Rgb,
    pub midtone: Rgb,
    pub detail: Rgb,
    pub glow: Rgb,
}

impl Palette {
    /// Resolve a role to its palette colour.
    pub fn resolve(&self, role: ShadeRole) -> Rgb {
        match role {
            ShadeRole::Shadow => self.shadow,
            ShadeRole::Midtone => self.midtone,
            ShadeRole::Detail => self.detail,
        }
    }

    /// Role colours available to the procedural random assignment.
    pub fn roles(&self) -> [Rgb; 3] {
        [self.shadow, self.midtone, self.detail]
    }
}

impl Default for Palette {
    /// Deep void shadow, vibrant pink midtone, white detail, magenta glow.
    fn default() -> Self {
        Self {
            shadow: Rgb::new(0x05, 0x00, 0x14),
            midtone: Rgb::new(0xff, 0x00, 0x55),
            detail: Rgb::new(0xff, 0xff, 0xff),
            glow: Rgb::new(0xff, 0x00, 0xff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_resolve_to_their_colours() {
        let palette = Palette::default();
        assert_eq!(palette.resolve(ShadeRole::Shadow), palette.shadow);
        assert_eq!(palette.resolve(ShadeRole::Midtone), palette.midtone);
        assert_eq!(palette.resolve(ShadeRole::Detail), palette.detail);
    }

    #[test]
    fn serialises_as_hex_strings() {
        let json = serde_json::to_string(&Palette::default()).unwrap();
        assert!(json.contains("\"#ff0055\""));
        assert!(json.contains("\"#ff00ff\""));
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Palette::default());
    }
}
