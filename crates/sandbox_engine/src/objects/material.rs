//! Per-instance surface attributes

/// Surface properties handed to the renderer with each visible instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB)
    pub diffuse: [f32; 3],

    /// Alpha/transparency (0.0 = transparent, 1.0 = opaque)
    pub alpha: f32,
}

impl Material {
    /// Diffuse color used to highlight instances touching the ground
    pub const HIGHLIGHT: [f32; 3] = [1.0, 1.0, 1.0];

    /// Opaque material with the given diffuse color
    pub const fn diffuse(r: f32, g: f32, b: f32) -> Self {
        Self {
            diffuse: [r, g, b],
            alpha: 1.0,
        }
    }

    /// Whether the diffuse color is the highlight color
    pub fn is_highlighted(&self) -> bool {
        self.diffuse == Self::HIGHLIGHT
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(1.0, 1.0, 1.0)
    }
}
