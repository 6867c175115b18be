use nalgebra::{RealField, Scalar};
use num::ToPrimitive;
use rand::RngCore;
use roomseg_common::{point_cloud::PointCloud, points::Point3Infoed};
use roomseg_sac::{PcSac, Plane, PlaneEstimator, Ransac};

pub const DEFAULT_RANSAC_ITERATIONS: usize = 1000;

/// Finds the dominant plane of a point cloud.
///
/// Implementations return the plane together with the ascending, unique
/// indices of the points closer than `distance_threshold` to it. `None` or an
/// empty index set means no plane reached a minimal consensus.
pub trait PlaneFitter<T: Scalar> {
    fn fit<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        distance_threshold: T,
    ) -> Option<(Plane<T>, Vec<usize>)>;
}

impl<T: Scalar, F: PlaneFitter<T> + ?Sized> PlaneFitter<T> for &mut F {
    fn fit<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        distance_threshold: T,
    ) -> Option<(Plane<T>, Vec<usize>)> {
        (**self).fit(cloud, distance_threshold)
    }
}

/// Random sample consensus over three-point plane candidates, with a fixed
/// iteration budget. Seed `rng` for reproducible results.
#[derive(Debug, Clone)]
pub struct SacPlaneFitter<R> {
    rng: R,
    max_iterations: usize,
}

impl<R: RngCore> SacPlaneFitter<R> {
    pub fn new(rng: R) -> Self {
        SacPlaneFitter::with_iterations(rng, DEFAULT_RANSAC_ITERATIONS)
    }

    pub fn with_iterations(rng: R, max_iterations: usize) -> Self {
        SacPlaneFitter {
            rng,
            max_iterations,
        }
    }

    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl<T: RealField + ToPrimitive, R: RngCore> PlaneFitter<T> for SacPlaneFitter<R> {
    fn fit<I>(
        &mut self,
        cloud: &PointCloud<Point3Infoed<T, I>>,
        distance_threshold: T,
    ) -> Option<(Plane<T>, Vec<usize>)> {
        let threshold = distance_threshold.to_f64()?;
        let consensus = Ransac::new(threshold, self.max_iterations, &mut self.rng);
        PcSac::new(cloud, consensus).compute(&PlaneEstimator)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn test_floor_with_clutter() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut storage = (0..600)
            .map(|_| {
                Point3Infoed::xyz(
                    rng.gen_range(0.0f64..3.0),
                    rng.gen_range(0.0..3.0),
                    rng.gen_range(-0.004..0.004),
                )
            })
            .collect::<Vec<_>>();
        storage.extend((0..150).map(|_| {
            Point3Infoed::xyz(
                rng.gen_range(0.0..3.0),
                rng.gen_range(0.0..3.0),
                rng.gen_range(0.3..2.0),
            )
        }));
        let cloud = PointCloud::from_vec(storage);

        let mut fitter = SacPlaneFitter::new(StdRng::seed_from_u64(9));
        let (plane, inliers) = fitter.fit(&cloud, 0.01).unwrap();

        assert!(plane.normal().z.abs() > 0.99);
        assert!(inliers.windows(2).all(|w| w[0] < w[1]));
        assert!(inliers.len() >= 600);
        assert!(inliers.iter().all(|&i| i < 600));
    }

    #[test]
    fn test_too_few_points() {
        let cloud = PointCloud::from_vec(vec![
            Point3Infoed::xyz(0.0f64, 0., 0.),
            Point3Infoed::xyz(1., 0., 0.),
        ]);
        let mut fitter = SacPlaneFitter::with_iterations(StdRng::seed_from_u64(0), 10);
        assert!(fitter.fit(&cloud, 0.01).is_none());
    }
}
