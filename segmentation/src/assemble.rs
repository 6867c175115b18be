use nalgebra::{RealField, Scalar};
use num::ToPrimitive;
use roomseg_common::{point_cloud::PointCloud, points::Point3Infoed};

use crate::{
    aggregate::StructuralClouds,
    cluster::{ClusterLabels, ClusterPrimitive},
    config::ClusterConfig,
};

/// The residual cloud with one cluster label per point.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualClusters<T: Scalar, I> {
    pub cloud: PointCloud<Point3Infoed<T, I>>,
    pub labels: ClusterLabels,
}

/// The final decomposition of a scene. Absent members had no points.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSegmentation<T: Scalar, I> {
    pub floor: Option<PointCloud<Point3Infoed<T, I>>>,
    pub walls: Option<PointCloud<Point3Infoed<T, I>>>,
    pub residual: Option<ResidualClusters<T, I>>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SceneLayer<'a, T: Scalar, I> {
    Floor(&'a PointCloud<Point3Infoed<T, I>>),
    Walls(&'a PointCloud<Point3Infoed<T, I>>),
    Residual(&'a ResidualClusters<T, I>),
}

impl<'a, T: Scalar, I> SceneLayer<'a, T, I> {
    #[inline]
    pub fn cloud(&self) -> &'a PointCloud<Point3Infoed<T, I>> {
        match *self {
            SceneLayer::Floor(cloud) | SceneLayer::Walls(cloud) => cloud,
            SceneLayer::Residual(residual) => &residual.cloud,
        }
    }
}

impl<T: Scalar, I> SceneSegmentation<T, I> {
    /// The present members in presentation order: floor, walls, residual.
    pub fn layers(&self) -> impl Iterator<Item = SceneLayer<'_, T, I>> + '_ {
        { self.floor.iter().map(SceneLayer::Floor) }
            .chain(self.walls.iter().map(SceneLayer::Walls))
            .chain(self.residual.iter().map(SceneLayer::Residual))
    }

    /// Points kept across all members.
    pub fn point_count(&self) -> usize {
        self.layers().map(|layer| layer.cloud().len()).sum()
    }
}

/// Clusters the residual cloud, unless it is empty, and packs the result.
pub fn assemble<T, I, C>(
    structure: StructuralClouds<T, I>,
    residual: PointCloud<Point3Infoed<T, I>>,
    config: &ClusterConfig<T>,
    clusterer: &mut C,
) -> SceneSegmentation<T, I>
where
    T: RealField + ToPrimitive,
    C: ClusterPrimitive<T>,
{
    let residual = if residual.is_empty() {
        log::info!("no residual points left to cluster");
        None
    } else {
        let labels = clusterer.cluster(&residual, config.eps.clone(), config.min_points);
        log::info!(
            "found {} object clusters in {} residual points ({} noise)",
            labels.num_clusters(),
            residual.len(),
            labels.noise_count()
        );
        Some(ResidualClusters {
            cloud: residual,
            labels,
        })
    };

    SceneSegmentation {
        floor: structure.floor,
        walls: structure.walls,
        residual,
    }
}
