use rand::{seq::index, RngCore};
use sample_consensus::{Consensus, Estimator, Model};

/// Plain random sample consensus with a fixed iteration budget.
///
/// Every iteration draws `E::MIN_SAMPLES` distinct data points, estimates the
/// candidate models and scores each one by the number of points whose
/// residual is strictly below `threshold`. The candidate with the most inliers wins;
/// ties keep the earlier one.
pub struct Ransac<R> {
    threshold: f64,
    max_iterations: usize,
    rng: R,
}

impl<R: RngCore> Ransac<R> {
    pub fn new(threshold: f64, max_iterations: usize, rng: R) -> Self {
        Ransac {
            threshold,
            max_iterations,
            rng,
        }
    }

    fn inliers<M: Model<Data>, Data>(&self, model: &M, data: &[Data]) -> Vec<usize> {
        { data.iter().enumerate() }
            .filter(|(_, data)| model.residual(data).abs() < self.threshold)
            .map(|(index, _)| index)
            .collect()
    }

    fn count_inliers<M: Model<Data>, Data>(&self, model: &M, data: &[Data]) -> usize {
        { data.iter() }
            .filter(|data| model.residual(data).abs() < self.threshold)
            .count()
    }

    fn best_model<E, Data>(&mut self, estimator: &E, data: &[Data]) -> Option<E::Model>
    where
        E: Estimator<Data>,
        Data: Clone,
    {
        if data.len() < E::MIN_SAMPLES || E::MIN_SAMPLES == 0 {
            return None;
        }

        let mut best: Option<(E::Model, usize)> = None;
        let mut sample = Vec::with_capacity(E::MIN_SAMPLES);
        for _ in 0..self.max_iterations {
            sample.clear();
            let picked = index::sample(&mut self.rng, data.len(), E::MIN_SAMPLES);
            sample.extend(picked.into_iter().map(|index| data[index].clone()));

            for model in estimator.estimate(sample.iter().cloned()) {
                let count = self.count_inliers(&model, data);
                if best.as_ref().map_or(true, |&(_, best)| count > best) {
                    best = Some((model, count));
                }
            }
        }

        log::trace!(
            "ransac: best candidate has {:?} inliers out of {} points",
            best.as_ref().map(|(_, count)| *count),
            data.len()
        );
        best.map(|(model, _)| model)
    }
}

impl<R: RngCore, E: Estimator<Data>, Data: Clone> Consensus<E, Data> for Ransac<R> {
    type Inliers = Vec<usize>;

    fn model<I>(&mut self, estimator: &E, data: I) -> Option<E::Model>
    where
        I: Iterator<Item = Data> + Clone,
    {
        let data = data.collect::<Vec<_>>();
        self.best_model(estimator, &data)
    }

    fn model_inliers<I>(&mut self, estimator: &E, data: I) -> Option<(E::Model, Self::Inliers)>
    where
        I: Iterator<Item = Data> + Clone,
    {
        let data = data.collect::<Vec<_>>();
        let model = self.best_model(estimator, &data)?;
        let inliers = self.inliers(&model, &data);
        Some((model, inliers))
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector4;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::PlaneEstimator;

    #[test]
    fn test_threshold_is_exclusive() {
        let points = [
            Vector4::new(0.0f64, 0., 0., 1.),
            Vector4::new(10., 0., 0., 1.),
            Vector4::new(0., 10., 0., 1.),
            Vector4::new(10., 10., 0., 1.),
            Vector4::new(5., 5., 0.5, 1.),
        ];

        let mut sac = Ransac::new(0.5, 200, StdRng::seed_from_u64(5));
        let (_, inliers) = sac
            .model_inliers(&PlaneEstimator, points.into_iter())
            .unwrap();
        assert_eq!(inliers, vec![0, 1, 2, 3]);

        let mut sac = Ransac::new(0.6, 200, StdRng::seed_from_u64(5));
        let (_, inliers) = sac
            .model_inliers(&PlaneEstimator, points.into_iter())
            .unwrap();
        assert_eq!(inliers, vec![0, 1, 2, 3, 4]);
    }
}
