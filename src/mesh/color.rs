//! Per-triangle RGB color.

/// An RGB color with components nominally in `[0.0, 1.0]`.
///
/// Components are never clamped. `PartialEq` is IEEE equality; material
/// grouping uses [`Rgb::same_bits`] instead, which also tells `0.0` and
/// `-0.0` apart and matches a NaN with itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Rgb {
    /// Black, used for faces whose material cannot be resolved.
    pub const ZERO: Rgb = Rgb::new(0.0, 0.0, 0.0);

    /// Create a color from its components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// The raw IEEE-754 bit patterns of the three components.
    #[inline]
    pub fn to_bits(self) -> [u32; 3] {
        [self.r.to_bits(), self.g.to_bits(), self.b.to_bits()]
    }

    /// Bit-exact comparison.
    #[inline]
    pub fn same_bits(self, other: Rgb) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(c: [f32; 3]) -> Self {
        Rgb::new(c[0], c[1], c[2])
    }
}
