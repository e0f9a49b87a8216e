use super::FuzzyEq;
use num_traits::ToPrimitive;
use static_aabb2d_index::IndexableNum;

/// Trait representing a real number (e.g. 1.1, -3.5, etc.) that can be fuzzy compared, indexed
/// spatially and shared across worker threads.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyEq
    + std::default::Default
    + std::fmt::Debug
    + IndexableNum
    + Send
    + Sync
    + 'static
{
    /// Converts a constant known to be representable (unit factors, earth radius).
    #[inline]
    fn constant(value: f64) -> Self {
        Self::from(value).unwrap()
    }

    #[inline]
    fn pi() -> Self {
        Self::constant(std::f64::consts::PI)
    }

    #[inline]
    fn tau() -> Self {
        Self::constant(std::f64::consts::TAU)
    }

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn max_value() -> Self {
        num_traits::real::Real::max_value()
    }

    /// True if the value is neither infinite nor NaN.
    #[inline]
    fn is_finite(self) -> bool {
        self.as_f64().is_finite()
    }

    /// Lossy conversion to `f64` used for error reporting and triangulation input.
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl Real for f32 {
    #[inline]
    fn constant(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn pi() -> Self {
        std::f32::consts::PI
    }

    #[inline]
    fn tau() -> Self {
        std::f32::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    #[inline]
    fn constant(value: f64) -> Self {
        value
    }

    #[inline]
    fn pi() -> Self {
        std::f64::consts::PI
    }

    #[inline]
    fn tau() -> Self {
        std::f64::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}
