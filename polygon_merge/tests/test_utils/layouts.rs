use polygon_merge::{Polygon, polygon};

/// Axis aligned square with its lower left corner at (`x`, `y`).
pub fn square_at(x: f64, y: f64, size: f64) -> Polygon<f64> {
    polygon![[(x, y), (x + size, y), (x + size, y + size), (x, y + size)]]
}

/// Small deterministic generator (64 bit LCG) so layouts are reproducible across runs and
/// platforms.
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }
}

/// `count` unit squares placed uniformly at random in `[0, extent]` on both axes.
pub fn scattered_unit_squares(count: usize, extent: f64, seed: u64) -> Vec<Polygon<f64>> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| square_at(rng.range(0.0, extent), rng.range(0.0, extent), 1.0))
        .collect()
}

/// `count` squares of random size in `[0.2, 3]` placed uniformly at random in `[0, extent]`.
pub fn scattered_mixed_squares(count: usize, extent: f64, seed: u64) -> Vec<Polygon<f64>> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.range(0.0, extent);
            let y = rng.range(0.0, extent);
            square_at(x, y, rng.range(0.2, 3.0))
        })
        .collect()
}

/// Grid of unit squares with `gap` between neighbors, row major order.
pub fn square_grid(cols: usize, rows: usize, gap: f64) -> Vec<Polygon<f64>> {
    let step = 1.0 + gap;
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| square_at(c as f64 * step, r as f64 * step, 1.0)))
        .collect()
}

/// Connected components of the graph with an edge wherever `linked(i, j)`, labelled by the
/// smallest member index.
pub fn component_labels(count: usize, linked: impl Fn(usize, usize) -> bool) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..count).collect();
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for i in 0..count {
        for j in (i + 1)..count {
            if linked(i, j) {
                let (a, b) = (find(&mut parent, i), find(&mut parent, j));
                if a != b {
                    parent[a.max(b)] = a.min(b);
                }
            }
        }
    }

    (0..count).map(|i| find(&mut parent, i)).collect()
}
