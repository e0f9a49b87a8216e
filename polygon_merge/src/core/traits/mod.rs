//! Core/common numeric traits for use in polygon_merge.
mod fuzzy_eq;
mod real;

pub use fuzzy_eq::FuzzyEq;
pub use real::Real;
