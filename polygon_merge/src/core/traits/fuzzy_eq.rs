/// Approximate equality for floating point values.
///
/// Hull areas, distances and coordinates are compared with it in tests, and the extents prefilter
/// pads its query box by [FuzzyEq::fuzzy_epsilon] relative to coordinate magnitude.
///
/// # Examples
///
/// ```
/// # use polygon_merge::core::traits::*;
/// let area = 0.1 + 0.2;
///
/// assert_ne!(area, 0.3);
/// assert!(area.fuzzy_eq(0.3));
/// assert!(!area.fuzzy_eq_eps(0.31, 1e-3));
/// ```
pub trait FuzzyEq: Sized + Copy {
    /// Tolerance used by [FuzzyEq::fuzzy_eq].
    fn fuzzy_epsilon() -> Self;

    /// True if `self` and `other` differ by less than `fuzzy_epsilon`.
    fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    #[inline]
    fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, Self::fuzzy_epsilon())
    }
}

macro_rules! impl_fuzzy_eq {
    ($ty:ty, $eps:expr) => {
        impl FuzzyEq for $ty {
            #[inline]
            fn fuzzy_epsilon() -> Self {
                $eps
            }

            #[inline]
            fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool {
                (*self - other).abs() < fuzzy_epsilon
            }
        }
    };
}

impl_fuzzy_eq!(f32, 1.0e-5);
impl_fuzzy_eq!(f64, 1.0e-8);
