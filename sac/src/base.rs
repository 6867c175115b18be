mod ransac;

use nalgebra::{Scalar, Vector4};
use roomseg_common::{point_cloud::PointCloud, points::Point3Infoed};
use sample_consensus::{Consensus, Estimator};

pub use self::ransac::Ransac;

/// Feeds the coordinates of a point cloud to a consensus algorithm.
pub struct PcSac<'a, T: Scalar, I, C> {
    point_cloud: &'a PointCloud<Point3Infoed<T, I>>,
    inner: C,
}

impl<'a, T: Scalar, I, C> PcSac<'a, T, I, C> {
    pub fn new(point_cloud: &'a PointCloud<Point3Infoed<T, I>>, inner: C) -> Self {
        PcSac { point_cloud, inner }
    }

    pub fn compute<E: Estimator<Vector4<T>>>(
        &mut self,
        estimator: &E,
    ) -> Option<(E::Model, C::Inliers)>
    where
        C: Consensus<E, Vector4<T>>,
    {
        self.inner.model_inliers(
            estimator,
            self.point_cloud.iter().map(|point| point.coords.clone()),
        )
    }
}
