use polygon_merge::{AABB, Ring, core::traits::FuzzyEq};

/// Holds a set of properties of a ring for comparison in tests.
#[derive(Debug, Copy, Clone)]
pub struct RingProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub extents: AABB<f64>,
}

impl RingProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-6;

    pub fn new(area: f64, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            vertex_count: 0,
            area,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_ring(ring: &Ring<f64>) -> Self {
        Self {
            vertex_count: ring.open_points().len(),
            area: ring.area(),
            extents: ring.extents().expect("ring has points"),
        }
    }

    /// Compares area and extents, vertex count is ignored since collinear hull vertexes may or
    /// may not be present.
    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.area.fuzzy_eq_eps(other.area, eps)
            && self.extents.min_x.fuzzy_eq_eps(other.extents.min_x, eps)
            && self.extents.min_y.fuzzy_eq_eps(other.extents.min_y, eps)
            && self.extents.max_x.fuzzy_eq_eps(other.extents.max_x, eps)
            && self.extents.max_y.fuzzy_eq_eps(other.extents.max_y, eps)
    }
}

/// Asserts every ring matches the expected properties, in order.
pub fn assert_ring_properties(rings: &[&Ring<f64>], expected: &[RingProperties]) {
    assert_eq!(rings.len(), expected.len(), "ring count mismatch");
    for (i, (ring, expected)) in rings.iter().zip(expected).enumerate() {
        let actual = RingProperties::from_ring(ring);
        assert!(
            actual.fuzzy_eq_eps(expected, RingProperties::PROP_CMP_EPS),
            "ring {i} properties mismatch\n  actual: {actual:?}\nexpected: {expected:?}"
        );
    }
}
