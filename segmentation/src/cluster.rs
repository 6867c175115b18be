use bitvec::vec::BitVec;
use nalgebra::{RealField, Scalar};
use roomseg_common::{
    point_cloud::PointCloud,
    points::Point3Infoed,
    search::{SearchType, Searcher},
};
use roomseg_kdtree::KdTree;

/// The label of a point that belongs to no cluster.
pub const NOISE: i32 = -1;

/// One label per point, in point order: a cluster id counted from 0, or
/// `NOISE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterLabels {
    labels: Vec<i32>,
}

impl ClusterLabels {
    #[inline]
    pub fn from_vec(labels: Vec<i32>) -> Self {
        ClusterLabels { labels }
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.labels
    }

    #[inline]
    pub fn into_vec(self) -> Vec<i32> {
        self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest id plus one, so 0 when every point is noise.
    pub fn num_clusters(&self) -> usize {
        self.labels.iter().copied().max().map_or(0, |max| (max + 1).max(0) as usize)
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&label| label < 0).count()
    }

    /// Point indices of every cluster, indexed by cluster id.
    pub fn cluster_indices(&self) -> Vec<Vec<usize>> {
        let mut clusters = vec![Vec::new(); self.num_clusters()];
        for (index, &label) in self.labels.iter().enumerate() {
            if label >= 0 {
                clusters[label as usize].push(index);
            }
        }
        clusters
    }
}

impl FromIterator<i32> for ClusterLabels {
    fn from_iter<It: IntoIterator<Item = i32>>(iter: It) -> Self {
        ClusterLabels::from_vec(iter.into_iter().collect())
    }
}

/// Groups the points of a cloud by density.
pub trait ClusterPrimitive<T: Scalar> {
    fn cluster<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        eps: T,
        min_points: usize,
    ) -> ClusterLabels;
}

impl<T: Scalar, C: ClusterPrimitive<T> + ?Sized> ClusterPrimitive<T> for &mut C {
    fn cluster<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        eps: T,
        min_points: usize,
    ) -> ClusterLabels {
        (**self).cluster(cloud, eps, min_points)
    }
}

/// Density-based spatial clustering.
///
/// A point whose `eps` neighborhood, the point itself included, holds at
/// least `min_points` points is a core point. Core points within `eps` of
/// each other share a cluster, and so do the points within `eps` of a core
/// point. Everything else is noise. Clusters are numbered in the order their
/// first core point appears in the cloud. Non-finite points are noise.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Dbscan;

impl<T: RealField> ClusterPrimitive<T> for Dbscan {
    fn cluster<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        eps: T,
        min_points: usize,
    ) -> ClusterLabels {
        let (labels, _) = dbscan(cloud, eps, min_points);
        labels
    }
}

/// Returns the labels and the largest length the expansion queue reached.
///
/// A point enters the queue at most once, when it is first reached, so the
/// queue never holds more than `cloud.len()` entries.
fn dbscan<T: RealField, I>(
    cloud: &PointCloud<Point3Infoed<T, I>>,
    eps: T,
    min_points: usize,
) -> (ClusterLabels, usize) {
    let searcher = KdTree::new(cloud);
    let radius = SearchType::Radius(eps);
    let mut labels = vec![NOISE; cloud.len()];
    let mut visited: BitVec = BitVec::repeat(false, cloud.len());

    let mut neighbors = Vec::new();
    let mut queue = Vec::new();
    let mut peak = 0;
    let mut next_label = 0;

    for index in 0..cloud.len() {
        if visited[index] {
            continue;
        }
        visited.set(index, true);
        if !cloud[index].is_finite() {
            continue;
        }

        searcher.search(&cloud[index].coords, radius.clone(), &mut neighbors);
        if neighbors.len() < min_points {
            continue;
        }

        let label = next_label;
        next_label += 1;
        labels[index] = label;
        queue.clear();

        let mut reach = |neighbors: &[usize], queue: &mut Vec<usize>| {
            for &other in neighbors {
                if labels[other] == NOISE {
                    labels[other] = label;
                }
                if !visited[other] {
                    visited.set(other, true);
                    queue.push(other);
                }
            }
        };

        reach(&neighbors, &mut queue);
        peak = peak.max(queue.len());
        while let Some(other) = queue.pop() {
            if !cloud[other].is_finite() {
                continue;
            }
            searcher.search(&cloud[other].coords, radius.clone(), &mut neighbors);
            if neighbors.len() >= min_points {
                reach(&neighbors, &mut queue);
                peak = peak.max(queue.len());
            }
        }
    }

    log::debug!("dbscan found {} clusters in {} points", next_label, cloud.len());
    (ClusterLabels::from_vec(labels), peak)
}
