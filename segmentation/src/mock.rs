use std::collections::VecDeque;

use nalgebra::{RealField, Scalar};
use roomseg_common::{point_cloud::PointCloud, points::Point3Infoed};
use roomseg_sac::Plane;

use crate::{
    cluster::{ClusterLabels, ClusterPrimitive},
    fitter::PlaneFitter,
};

/// Answers each fit with the next scripted `(normal_z, inlier_count)`,
/// taking the first `inlier_count` points of the working cloud.
pub(crate) struct ScriptedFitter {
    script: VecDeque<(f64, usize)>,
    pub(crate) calls: Vec<usize>,
}

impl ScriptedFitter {
    pub(crate) fn new(script: impl IntoIterator<Item = (f64, usize)>) -> Self {
        ScriptedFitter {
            script: script.into_iter().collect(),
            calls: Vec::new(),
        }
    }
}

impl<T: RealField> PlaneFitter<T> for ScriptedFitter {
    fn fit<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        _distance_threshold: T,
    ) -> Option<(Plane<T>, Vec<usize>)> {
        self.calls.push(cloud.len());
        let (z, count) = self.script.pop_front()?;
        let x = (1. - z * z).sqrt();
        let plane = Plane::new(
            nalgebra::convert(x),
            T::zero(),
            nalgebra::convert(z),
            T::zero(),
        );
        Some((plane, (0..count.min(cloud.len())).collect()))
    }
}

pub(crate) fn line_cloud(num: usize) -> PointCloud<Point3Infoed<f64, usize>> {
    (0..num)
        .map(|i| Point3Infoed::new(i as f64, 0., 0., i))
        .collect()
}

/// Puts every point into cluster `index % clusters` and counts its calls.
pub(crate) struct ModuloClusterer {
    pub(crate) clusters: i32,
    pub(crate) calls: usize,
}

impl<T: Scalar> ClusterPrimitive<T> for ModuloClusterer {
    fn cluster<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        _eps: T,
        _min_points: usize,
    ) -> ClusterLabels {
        self.calls += 1;
        (0..cloud.len() as i32).map(|i| i % self.clusters).collect()
    }
}
