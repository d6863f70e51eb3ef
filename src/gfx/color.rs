//! Rgba: true-color pixels with alpha.

/// True-color RGBA representation.
///
/// 8 bits per channel. Alpha is straight (not premultiplied); blending
/// happens at blit time.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Create a new opaque color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color with explicit alpha.
    #[inline]
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::with_alpha(0, 0, 0, 0);
    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500), fully opaque.
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Check if the color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Linear interpolation toward `other` by `t` in `[0, 1]`.
    ///
    /// All four channels interpolate, alpha included.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| -> u8 {
            (f32::from(b) - f32::from(a)).mul_add(t, f32::from(a)).round() as u8
        };
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: ch(self.a, other.a),
        }
    }

    /// Source-over composite of `self` onto `dst`.
    #[must_use]
    pub(crate) fn over(self, dst: Self) -> Self {
        if self.a == 255 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }
        let sa = u32::from(self.a);
        let inv = 255 - sa;
        let ch = |s: u8, d: u8| -> u8 {
            let v = (u32::from(s) * sa + u32::from(d) * inv) / 255;
            v.min(255) as u8
        };
        let a = sa + u32::from(dst.a) * inv / 255;
        Self {
            r: ch(self.r, dst.r),
            g: ch(self.g, dst.g),
            b: ch(self.b, dst.b),
            a: a.min(255) as u8,
        }
    }
}

/// How a fill combines with the destination surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BlendMode {
    /// Overwrite destination pixels, alpha included.
    #[default]
    Replace,
    /// Source-over alpha compositing.
    Alpha,
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<(u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::with_alpha(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Rgba::from_u32(0xFF8000);
        assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 0, 255));
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = Rgba::new(0, 0, 0);
        let b = Rgba::new(255, 255, 255);
        let mid = a.lerp(b, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (128, 128, 128));
    }

    #[test]
    fn test_lerp_clamps_ratio() {
        let a = Rgba::new(10, 10, 10);
        let b = Rgba::new(20, 20, 20);
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn test_over_opaque_wins() {
        let src = Rgba::new(200, 0, 0);
        let dst = Rgba::new(0, 200, 0);
        assert_eq!(src.over(dst), src);
    }

    #[test]
    fn test_over_transparent_passes() {
        let src = Rgba::TRANSPARENT;
        let dst = Rgba::new(0, 200, 0);
        assert_eq!(src.over(dst), dst);
    }
}
