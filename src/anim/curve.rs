//! Easing curves: normalized ratio in, eased ratio out.

/// A pure easing function over a normalized ratio.
///
/// Inputs are nominally in `[0, 1]` but out-of-range values are not
/// rejected; curves simply extrapolate.
pub trait Curve {
    /// Evaluate the curve at `x`.
    fn value(&self, x: f32) -> f32;
}

/// Identity easing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

impl Curve for Linear {
    #[inline]
    fn value(&self, x: f32) -> f32 {
        x
    }
}

/// Accelerating easing, `x^2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Faster;

impl Curve for Faster {
    #[inline]
    fn value(&self, x: f32) -> f32 {
        x * x
    }
}

/// Decelerating easing, `2x - x^2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Slower;

impl Curve for Slower {
    #[inline]
    fn value(&self, x: f32) -> f32 {
        2.0f32.mul_add(x, -(x * x))
    }
}

/// Ease-in-out, `(1 - cos(pi * x)) / 2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Smooth;

impl Curve for Smooth {
    #[inline]
    fn value(&self, x: f32) -> f32 {
        (1.0 - (std::f32::consts::PI * x).cos()) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoint() {
        assert!((Linear.value(0.5) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_faster_midpoint() {
        assert!((Faster.value(0.5) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_slower_midpoint() {
        assert!((Slower.value(0.5) - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_smooth_endpoints() {
        assert!(Smooth.value(0.0).abs() < 1e-6);
        assert!((Smooth.value(1.0) - 1.0).abs() < 1e-6);
        assert!((Smooth.value(0.5) - 0.5).abs() < 1e-6);
    }
}
