//! Single-linkage grouping of polygons under a distance threshold.
use log::{debug, trace};
use rayon::prelude::*;
use static_aabb2d_index::{AABB, StaticAABB2DIndex, StaticAABB2DIndexBuilder};

use crate::{
    core::traits::Real,
    distance::polygon_distance,
    geometry::Polygon,
    measure::{CoordinateFrame, Metric},
};

/// Remaining set size at which a frontier scan evaluates distances on the rayon pool.
const PARALLEL_SCAN_MIN: usize = 64;

/// Group of polygon indexes joined by single-linkage proximity.
///
/// Members are stored in admission order, the first member is the seed that opened the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    members: Vec<usize>,
}

impl Cluster {
    /// Index of the polygon that opened the cluster.
    #[inline]
    pub fn seed(&self) -> usize {
        self.members[0]
    }

    /// Member polygon indexes in admission order.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over the member polygons of `polygons` (the set the cluster was formed from).
    pub fn polygons<'a, T>(
        &'a self,
        polygons: &'a [Polygon<T>],
    ) -> impl Iterator<Item = &'a Polygon<T>> + 'a {
        self.members.iter().map(move |&i| &polygons[i])
    }
}

/// Result of [group_polygons].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    clusters: Vec<Cluster>,
    assignment: Vec<usize>,
}

impl Clustering {
    /// Clusters in emission order (ordered by seed index).
    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster index of every input polygon, indexed by polygon.
    #[inline]
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    #[inline]
    pub fn cluster_of(&self, polygon: usize) -> Option<usize> {
        self.assignment.get(polygon).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Partitions `polygons` into clusters: two polygons share a cluster iff a chain of polygons
/// connects them where each step measures at most `max_distance` (see [polygon_distance], measured
/// from the polygon being expanded to the candidate).
///
/// The first polygon not yet clustered seeds the next cluster. A cluster grows depth first: each
/// admitted polygon scans all polygons not yet clustered, admits the ones within `max_distance`,
/// and the admitted polygons are expanded in the order they were admitted before the scan returns
/// to the previous level. Expansion uses an explicit stack so cluster size does not bound call
/// depth. Output is fully determined by input order and `max_distance`.
///
/// # Examples
///
/// ```
/// # use polygon_merge::{group_polygons, polygon, Metric, Units};
/// let polygons = [
///     polygon![[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]],
///     polygon![[(20.0, 0.0), (21.0, 0.0), (21.0, 1.0), (20.0, 1.0)]],
///     polygon![[(3.0, 0.0), (4.0, 0.0), (4.0, 1.0), (3.0, 1.0)]],
/// ];
/// let clustering = group_polygons(&polygons, 4.0, &Metric::planar(Units::Kilometers));
/// assert_eq!(clustering.len(), 2);
/// assert_eq!(clustering.clusters()[0].members(), &[0, 2]);
/// assert_eq!(clustering.clusters()[1].members(), &[1]);
/// assert_eq!(clustering.assignment(), &[0, 1, 0]);
/// ```
pub fn group_polygons<T>(polygons: &[Polygon<T>], max_distance: T, metric: &Metric) -> Clustering
where
    T: Real,
{
    let mut filter = ExtentsFilter::new(polygons, max_distance, metric);
    let mut remaining: Vec<usize> = (0..polygons.len()).collect();
    let mut assignment = vec![usize::MAX; polygons.len()];
    let mut clusters = Vec::new();

    while !remaining.is_empty() {
        let seed = remaining.remove(0);
        let cluster_idx = clusters.len();
        assignment[seed] = cluster_idx;
        let mut members = vec![seed];

        // each frame holds the polygons admitted by one scan, not yet expanded
        let mut frontier = vec![vec![seed].into_iter()];
        while let Some(frame) = frontier.last_mut() {
            let Some(source) = frame.next() else {
                frontier.pop();
                continue;
            };

            if remaining.is_empty() {
                break;
            }

            let (close, far) = partition_remaining(
                polygons,
                source,
                remaining,
                max_distance,
                metric,
                filter.as_mut(),
            );
            remaining = far;
            trace!(
                "cluster {cluster_idx}: polygon {source} admitted {}, {} remaining",
                close.len(),
                remaining.len()
            );

            if close.is_empty() {
                continue;
            }

            for &i in close.iter() {
                assignment[i] = cluster_idx;
            }
            members.extend_from_slice(&close);
            frontier.push(close.into_iter());
        }

        debug!(
            "cluster {cluster_idx} formed from seed {seed} with {} polygons",
            members.len()
        );
        clusters.push(Cluster { members });
    }

    Clustering {
        clusters,
        assignment,
    }
}

/// Splits `remaining` into polygons within `max_distance` of `source` and the rest, both in
/// their original relative order.
fn partition_remaining<T>(
    polygons: &[Polygon<T>],
    source: usize,
    remaining: Vec<usize>,
    max_distance: T,
    metric: &Metric,
    filter: Option<&mut ExtentsFilter<T>>,
) -> (Vec<usize>, Vec<usize>)
where
    T: Real,
{
    let source_polygon = &polygons[source];
    let candidates = filter.map(|f| {
        f.mark(source);
        f
    });
    let flags = candidates.as_ref().map(|f| f.flags.as_slice());
    let is_close = |i: usize| {
        flags.is_none_or(|f| f[i])
            && polygon_distance(source_polygon, &polygons[i], metric) <= max_distance
    };

    let close_flags: Vec<bool> = if remaining.len() >= PARALLEL_SCAN_MIN {
        remaining.par_iter().map(|&i| is_close(i)).collect()
    } else {
        remaining.iter().map(|&i| is_close(i)).collect()
    };

    if let Some(f) = candidates {
        f.clear();
    }

    let mut close = Vec::new();
    let mut far = Vec::with_capacity(remaining.len());
    for (i, c) in remaining.into_iter().zip(close_flags) {
        if c {
            close.push(i);
        } else {
            far.push(i);
        }
    }

    (close, far)
}

/// Planar extents index used to skip distance evaluation for polygons whose bounding boxes are
/// farther apart than the threshold.
struct ExtentsFilter<T>
where
    T: Real,
{
    index: StaticAABB2DIndex<T>,
    extents: Vec<AABB<T>>,
    expand: T,
    flags: Vec<bool>,
    hits: Vec<usize>,
    query_stack: Vec<usize>,
}

impl<T> ExtentsFilter<T>
where
    T: Real,
{
    fn new(polygons: &[Polygon<T>], max_distance: T, metric: &Metric) -> Option<Self> {
        if metric.frame != CoordinateFrame::Planar || polygons.len() < 2 {
            return None;
        }

        let extents = polygons
            .iter()
            .map(|p| p.outer_ring().and_then(|r| r.extents()))
            .collect::<Option<Vec<_>>>()?;

        let mut builder = StaticAABB2DIndexBuilder::new(extents.len());
        for e in extents.iter() {
            builder.add(e.min_x, e.min_y, e.max_x, e.max_y);
        }

        let index = match builder.build() {
            Ok(index) => index,
            Err(e) => {
                debug!("extents index unavailable, scanning all polygons: {e}");
                return None;
            }
        };

        Some(Self {
            index,
            flags: vec![false; extents.len()],
            extents,
            expand: max_distance,
            hits: Vec::new(),
            query_stack: Vec::new(),
        })
    }

    /// Flags every polygon whose extents come within the threshold of `source` extents.
    ///
    /// The query box is padded relative to the coordinate magnitude: box edges and measured
    /// distances round independently, and a pair measured at exactly the threshold must still be
    /// flagged. Extra hits are harmless since every hit is measured.
    fn mark(&mut self, source: usize) {
        let e = &self.extents[source];
        let magnitude = [e.min_x, e.min_y, e.max_x, e.max_y]
            .into_iter()
            .fold(self.expand, |m, v| if v.abs() > m { v.abs() } else { m });
        let d = self.expand + magnitude * T::fuzzy_epsilon();
        self.hits = self.index.query_with_stack(
            e.min_x - d,
            e.min_y - d,
            e.max_x + d,
            e.max_y + d,
            &mut self.query_stack,
        );

        for &i in self.hits.iter() {
            self.flags[i] = true;
        }
    }

    fn clear(&mut self) {
        for &i in self.hits.iter() {
            self.flags[i] = false;
        }
        self.hits.clear();
    }
}
