//! Diffuse material colours
//!
//! The scene uses plain diffuse colours with separate front and back values.
//! [`MaterialState`] works like fixed-function material state: setting one
//! side leaves the other untouched, and whatever was set last carries over to
//! later draws, including into the next frame.

/// RGB diffuse reflectance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diffuse(pub [f32; 3]);

impl Diffuse {
    /// Default diffuse reflectance of a fresh GL context
    pub const DEFAULT: Diffuse = Diffuse([0.8, 0.8, 0.8]);

    pub const VIOLET: Diffuse = Diffuse([1.0, 0.1, 0.58]);
    pub const CYAN: Diffuse = Diffuse([0.0, 1.0, 1.0]);
    pub const SPRING_GREEN: Diffuse = Diffuse([0.0, 1.0, 0.5]);
    pub const LIGHT_GREEN: Diffuse = Diffuse([0.56, 0.93, 0.56]);
    pub const BROWN: Diffuse = Diffuse([0.545, 0.27, 0.1]);
    pub const PURPLE: Diffuse = Diffuse([0.5, 0.0, 0.5]);
    pub const SLATE_BLUE: Diffuse = Diffuse([0.4, 0.35, 0.8]);
    pub const GRAY: Diffuse = Diffuse([0.5, 0.5, 0.5]);
    pub const SALMON: Diffuse = Diffuse([0.98, 0.5, 0.45]);
    pub const OLIVE_GREEN: Diffuse = Diffuse([0.33, 0.42, 0.18]);
    pub const OLIVE: Diffuse = Diffuse([0.5, 0.5, 0.0]);
    pub const FOREST_GREEN: Diffuse = Diffuse([0.13, 0.54, 0.13]);
    pub const DARK_GREEN: Diffuse = Diffuse([0.0, 0.39, 0.0]);
    pub const YELLOW: Diffuse = Diffuse([1.0, 1.0, 0.18]);
    pub const ORANGE: Diffuse = Diffuse([1.0, 0.45, 0.18]);
    pub const INDIGO: Diffuse = Diffuse([0.294, 0.45, 0.51]);
    pub const SUN: Diffuse = Diffuse([1.0, 1.0, 0.5]);

    /// RGBA with opaque alpha, as laid out in uniform buffers
    pub fn to_rgba(self) -> [f32; 4] {
        let [r, g, b] = self.0;
        [r, g, b, 1.0]
    }
}

/// Current front and back diffuse colours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialState {
    pub front: Diffuse,
    pub back: Diffuse,
}

impl Default for MaterialState {
    fn default() -> Self {
        Self {
            front: Diffuse::DEFAULT,
            back: Diffuse::DEFAULT,
        }
    }
}

impl MaterialState {
    pub fn set_front(&mut self, diffuse: Diffuse) {
        self.front = diffuse;
    }

    pub fn set_back(&mut self, diffuse: Diffuse) {
        self.back = diffuse;
    }
}
