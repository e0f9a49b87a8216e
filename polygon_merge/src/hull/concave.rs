use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use log::debug;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::{
    core::{
        math::{Vector2, ccw_sweep},
        traits::Real,
    },
    error::HullError,
    geometry::Ring,
    measure::Metric,
};

type Edge = (usize, usize);

/// Concave hull of `points` as a single closed ring.
///
/// The points are Delaunay triangulated, every triangle with an edge longer than `max_edge`
/// (measured with `metric`) is removed, and the boundary of the remaining triangles is traced.
/// When the remaining triangles fall apart into pieces, or pieces touch only at a vertex, they
/// are joined with the removed triangles of shortest longest edge that connect them.
/// Duplicate points are ignored and point order does not matter. The returned ring is counter
/// clockwise and never has holes: gaps left inside the hull by removed triangles are dropped.
///
/// # Errors
///
/// Fails without substituting any other shape if there are fewer than 3 distinct points, all
/// points are collinear, no triangle survives the edge limit, or a coordinate cannot be
/// triangulated.
///
/// # Examples
///
/// ```
/// # use polygon_merge::{concave_hull, Metric, Units};
/// # use polygon_merge::core::{math::Vector2, traits::*};
/// let points = [
///     Vector2::new(0.0, 0.0),
///     Vector2::new(2.0, 0.0),
///     Vector2::new(2.0, 2.0),
///     Vector2::new(0.0, 2.0),
///     Vector2::new(1.0, 1.0),
/// ];
/// let hull = concave_hull(&points, 5.0, &Metric::planar(Units::Kilometers)).unwrap();
/// assert!(hull.is_closed());
/// assert!(hull.area().fuzzy_eq(4.0));
/// ```
pub fn concave_hull<T>(
    points: &[Vector2<T>],
    max_edge: T,
    metric: &Metric,
) -> Result<Ring<T>, HullError>
where
    T: Real,
{
    let mut unique = points.to_vec();
    unique.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    unique.dedup();

    if unique.len() < 3 {
        return Err(HullError::TooFewPoints {
            count: unique.len(),
        });
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    let mut positions = BTreeMap::new();
    for p in unique.iter() {
        let handle = triangulation
            .insert(Point2::new(p.x.as_f64(), p.y.as_f64()))
            .map_err(|e| HullError::Triangulation(format!("{e:?} at ({:?}, {:?})", p.x, p.y)))?;
        positions.insert(handle.index(), *p);
    }

    if triangulation.num_inner_faces() == 0 {
        return Err(HullError::Collinear {
            count: unique.len(),
        });
    }

    let mut faces = Vec::new();
    let mut longest = Vec::new();
    for face in triangulation.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| v.fix().index());
        let (Some(&pa), Some(&pb), Some(&pc)) =
            (positions.get(&a), positions.get(&b), positions.get(&c))
        else {
            continue;
        };

        let edge = [(pa, pb), (pb, pc), (pc, pa)]
            .into_iter()
            .map(|(p0, p1)| metric.distance(p0, p1))
            .fold(T::zero(), |m, d| if d > m { d } else { m });
        faces.push([a, b, c]);
        longest.push(edge);
    }

    let mut kept: Vec<bool> = longest.iter().map(|&e| e <= max_edge).collect();
    let within = kept.iter().filter(|&&k| k).count();
    if within == 0 {
        return Err(HullError::EdgeStarvation {
            max_edge: max_edge.as_f64(),
        });
    }

    let bridges = connect_pieces(&faces, &longest, &mut kept);
    let kept: Vec<[usize; 3]> = faces
        .iter()
        .zip(kept)
        .filter_map(|(&f, k)| k.then_some(f))
        .collect();

    let loops = trace_boundary_loops(&kept, &positions);
    let (outer, holes): (Vec<_>, Vec<_>) = loops.into_iter().partition(|r| r.area() > T::zero());

    debug!(
        "concave hull: {} points, {} of {} triangles within max edge, {} bridging, {} outer loops, \
         {} gaps dropped",
        unique.len(),
        within,
        faces.len(),
        bridges,
        outer.len(),
        holes.len()
    );

    outer
        .into_iter()
        .max_by(|r1, r2| {
            r1.area()
                .partial_cmp(&r2.area())
                .unwrap_or(Ordering::Equal)
        })
        .ok_or(HullError::EdgeStarvation {
            max_edge: max_edge.as_f64(),
        })
}

/// Marks removed triangles as kept until the kept triangles form one piece joined through shared
/// edges. Each step takes the removed triangle with the shortest longest edge among those sharing
/// an edge with a kept triangle. Returns the number of triangles added.
///
/// Joining through shared edges also removes pinch vertexes between pieces, so the kept set has
/// a single outer boundary loop.
fn connect_pieces<T>(faces: &[[usize; 3]], longest: &[T], kept: &mut [bool]) -> usize
where
    T: Real,
{
    let mut neighbors = vec![Vec::new(); faces.len()];
    let mut by_edge = BTreeMap::<Edge, usize>::new();
    for (f, &[a, b, c]) in faces.iter().enumerate() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            if let Some(g) = by_edge.insert((u.min(v), u.max(v)), f) {
                neighbors[f].push(g);
                neighbors[g].push(f);
            }
        }
    }

    let mut pieces = DisjointSets::new(faces.len());
    let mut count = 0;
    for f in 0..faces.len() {
        if !kept[f] {
            continue;
        }
        count += 1;
        for &g in neighbors[f].iter() {
            if g < f && kept[g] && pieces.union(f, g) {
                count -= 1;
            }
        }
    }

    let mut removed: Vec<usize> = (0..faces.len()).filter(|&f| !kept[f]).collect();
    removed.sort_by(|&f, &g| {
        longest[f]
            .partial_cmp(&longest[g])
            .unwrap_or(Ordering::Equal)
            .then(f.cmp(&g))
    });

    let mut added = 0;
    while count > 1 {
        let Some(at) = removed
            .iter()
            .position(|&f| neighbors[f].iter().any(|&g| kept[g]))
        else {
            break;
        };

        let f = removed.remove(at);
        kept[f] = true;
        added += 1;
        count += 1;
        for &g in neighbors[f].iter() {
            if kept[g] && pieces.union(f, g) {
                count -= 1;
            }
        }
    }

    added
}

/// Union find over triangle indexes.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Joins the sets of `a` and `b`, false if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent[ra.max(rb)] = ra.min(rb);
        true
    }
}

/// Traces every boundary loop of a set of counter clockwise triangles. Loops enclosing area are
/// counter clockwise, loops around gaps are clockwise. Where loops touch at a single vertex they
/// are traced as separate loops.
fn trace_boundary_loops<T>(
    triangles: &[[usize; 3]],
    positions: &BTreeMap<usize, Vector2<T>>,
) -> Vec<Ring<T>>
where
    T: Real,
{
    let directed: BTreeSet<Edge> = triangles
        .iter()
        .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
        .collect();

    // an edge is on the boundary if the neighboring triangle across it was not kept
    let boundary: Vec<Edge> = directed
        .iter()
        .copied()
        .filter(|&(u, v)| !directed.contains(&(v, u)))
        .collect();

    let mut outgoing = BTreeMap::<usize, Vec<usize>>::new();
    for &(u, v) in boundary.iter() {
        outgoing.entry(u).or_default().push(v);
    }

    let pos = |i: usize| positions[&i];
    let next_edge = |(u, v): Edge| -> Option<Edge> {
        let origin = pos(v);
        let back = pos(u);
        // first boundary edge found turning clockwise from the way back, which keeps the trace
        // inside the triangle fan the incoming edge belongs to
        outgoing
            .get(&v)?
            .iter()
            .copied()
            .max_by(|&w1, &w2| {
                ccw_sweep(origin, back, pos(w1))
                    .partial_cmp(&ccw_sweep(origin, back, pos(w2)))
                    .unwrap_or(Ordering::Equal)
            })
            .map(|w| (v, w))
    };

    let mut visited = BTreeSet::new();
    let mut loops = Vec::new();
    for &start in boundary.iter() {
        if visited.contains(&start) {
            continue;
        }

        let mut points = vec![pos(start.0)];
        let mut edge = start;
        loop {
            visited.insert(edge);
            points.push(pos(edge.1));
            match next_edge(edge) {
                Some(next) if next != start && !visited.contains(&next) => edge = next,
                _ => break,
            }
        }

        if points.len() >= 4 && points.first() == points.last() {
            loops.push(Ring::new(points));
        }
    }

    loops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::traits::FuzzyEq, measure::Units};

    fn metric() -> Metric {
        Metric::planar(Units::Kilometers)
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Vector2<f64>> {
        coords.iter().map(|&c| Vector2::from(c)).collect()
    }

    #[test]
    fn too_few_points() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(
            concave_hull(&points, 10.0, &metric()),
            Err(HullError::TooFewPoints { count: 2 })
        );
    }

    #[test]
    fn collinear_points() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(
            concave_hull(&points, 10.0, &metric()),
            Err(HullError::Collinear { count: 4 })
        );
    }

    #[test]
    fn edge_starvation() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_eq!(
            concave_hull(&points, 5.0, &metric()),
            Err(HullError::EdgeStarvation { max_edge: 5.0 })
        );
    }

    #[test]
    fn separate_pieces_are_bridged() {
        let points = pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (10.0, 0.0),
            (11.0, 0.0),
            (11.0, 1.0),
            (10.0, 1.0),
        ]);
        let hull = concave_hull(&points, 2.0, &metric()).unwrap();
        assert!(hull.is_closed());
        // both gap triangles are needed to reach the second square
        assert_fuzzy_eq!(hull.area(), 11.0);
    }

    #[test]
    fn pinched_pieces_are_joined() {
        // rectangle fanned around (1, 1): bottom and top triangles are within the max edge and
        // meet only at (1, 1), both side triangles have a longest edge of 3
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (2.0, 3.0), (0.0, 3.0)]);
        let hull = concave_hull(&points, 2.5, &metric()).unwrap();
        assert!(hull.is_closed());
        assert_eq!(hull.len(), 6);
        // 6 minus one side triangle
        assert_fuzzy_eq!(hull.area(), 4.5);
    }

    #[test]
    fn connect_pieces_prefers_shortest_bridge() {
        // strip of 4 triangles, only the two ends kept
        let faces = [[0, 1, 2], [1, 3, 2], [2, 3, 4], [3, 5, 4]];
        let longest = [1.0, 3.0, 2.0, 1.0];
        let mut kept = [true, false, false, true];
        assert_eq!(connect_pieces(&faces, &longest, &mut kept), 2);
        assert_eq!(kept, [true, true, true, true]);

        // already one piece
        let mut kept = [true, true, false, false];
        assert_eq!(connect_pieces(&faces, &longest, &mut kept), 0);
        assert_eq!(kept, [true, true, false, false]);
    }

    #[test]
    fn concave_notch_is_kept() {
        // U shape: 6 x 1 base of full unit squares with a 1 wide column rising at each end
        let mut coords = Vec::new();
        for i in 0..=6 {
            coords.push((i as f64, 0.0));
            coords.push((i as f64, 1.0));
        }
        for j in 2..=6 {
            coords.push((0.0, j as f64));
            coords.push((1.0, j as f64));
            coords.push((5.0, j as f64));
            coords.push((6.0, j as f64));
        }
        let points = pts(&coords);
        let hull = concave_hull(&points, 1.5, &metric()).unwrap();
        // base 6, columns 5 each, plus the half square in each inner corner of the notch
        assert_fuzzy_eq!(hull.area(), 17.0);

        let convex = concave_hull(&points, 100.0, &metric()).unwrap();
        assert_fuzzy_eq!(convex.area(), 36.0);
    }

    #[test]
    fn interior_gap_is_dropped() {
        // 6 x 6 lattice with the center 2 x 2 points removed
        let mut coords = Vec::new();
        for i in 0..=5 {
            for j in 0..=5 {
                if (2..=3).contains(&i) && (2..=3).contains(&j) {
                    continue;
                }
                coords.push((i as f64, j as f64));
            }
        }
        let points = pts(&coords);
        let hull = concave_hull(&points, 1.5, &metric()).unwrap();
        // outer boundary only, the gap around the removed points is not reported as a hole
        assert_fuzzy_eq!(hull.area(), 25.0);
        assert!(hull.is_closed());
    }

    #[test]
    fn touching_triangles_split_at_pinch() {
        // two triangles sharing only the vertex (1, 1)
        let triangles = [[0, 1, 2], [2, 3, 4]];
        let positions: BTreeMap<usize, Vector2<f64>> = [
            (0, Vector2::new(0.0, 0.0)),
            (1, Vector2::new(2.0, 0.0)),
            (2, Vector2::new(1.0, 1.0)),
            (3, Vector2::new(2.0, 2.0)),
            (4, Vector2::new(0.0, 2.0)),
        ]
        .into_iter()
        .collect();
        let loops = trace_boundary_loops(&triangles, &positions);
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|r| r.area().fuzzy_eq(1.0)));
    }
}
