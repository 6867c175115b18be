use nalgebra::{RealField, Scalar};
use num::ToPrimitive;
use rand::{rngs::StdRng, SeedableRng};
use roomseg_common::{filter::ApproxFilter, point_cloud::PointCloud, points::Point3Infoed};
use roomseg_filters::VoxelGrid;

use crate::{
    aggregate::merge,
    assemble::{assemble, SceneSegmentation},
    cluster::{ClusterPrimitive, Dbscan},
    config::{ClusterConfig, PipelineConfig},
    engine::{SegmentationEngine, SegmentationReport},
    error::Result,
    fitter::{PlaneFitter, SacPlaneFitter},
};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput<T: Scalar, I> {
    pub scene: SceneSegmentation<T, I>,
    pub report: SegmentationReport,
}

/// Splits a scan into floor, walls and clustered objects: optional voxel
/// downsampling, plane extraction, merging by class and clustering of what
/// is left.
pub struct ScenePipeline<T: Scalar, F, C> {
    voxel_grid: Option<VoxelGrid<T>>,
    engine: SegmentationEngine<F, T>,
    cluster: ClusterConfig<T>,
    clusterer: C,
}

impl<T: RealField + ToPrimitive> ScenePipeline<T, SacPlaneFitter<StdRng>, Dbscan> {
    /// The sample consensus fitter and DBSCAN, with a fixed seed.
    pub fn seeded(config: PipelineConfig<T>, seed: u64) -> Result<Self> {
        let fitter = SacPlaneFitter::new(StdRng::seed_from_u64(seed));
        ScenePipeline::new(config, fitter, Dbscan)
    }

    /// The sample consensus fitter and DBSCAN, seeded from system entropy.
    pub fn from_entropy(config: PipelineConfig<T>) -> Result<Self> {
        let fitter = SacPlaneFitter::new(StdRng::from_entropy());
        ScenePipeline::new(config, fitter, Dbscan)
    }
}

impl<T: RealField + ToPrimitive, F, C> ScenePipeline<T, F, C> {
    pub fn new(config: PipelineConfig<T>, fitter: F, clusterer: C) -> Result<Self> {
        config.validate()?;
        Ok(ScenePipeline {
            voxel_grid: config.voxel_size.map(VoxelGrid::new),
            engine: SegmentationEngine::new(fitter, config.segmentation)?,
            cluster: config.cluster,
            clusterer,
        })
    }
}

impl<T, F, C> ScenePipeline<T, F, C>
where
    T: RealField + ToPrimitive,
    F: PlaneFitter<T>,
    C: ClusterPrimitive<T>,
{
    pub fn run<I: Clone>(&mut self, cloud: &PointCloud<Point3Infoed<T, I>>) -> PipelineOutput<T, I> {
        let output = match &mut self.voxel_grid {
            Some(voxel_grid) => {
                let downsampled = voxel_grid.filter(cloud);
                log::info!(
                    "downsampled {} points to {}",
                    cloud.len(),
                    downsampled.len()
                );
                self.engine.run(&downsampled)
            }
            None => self.engine.run(cloud),
        };

        let structure = merge(output.segments);
        let scene = assemble(structure, output.residual, &self.cluster, &mut self.clusterer);
        PipelineOutput {
            scene,
            report: output.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::{
        config::SegmentationConfig,
        engine::Termination,
        mock::{line_cloud, ModuloClusterer, ScriptedFitter},
    };

    fn config(min_points: usize, max_planes: usize) -> PipelineConfig<f64> {
        PipelineConfig::new(
            SegmentationConfig::new(0.015, min_points, max_planes),
            ClusterConfig::new(0.04, 15),
        )
    }

    #[test]
    fn test_scripted_partition() {
        let cloud = line_cloud(5000);
        let fitter = ScriptedFitter::new([(0.95, 2000), (0.05, 1200), (0.95, 900)]);
        let clusterer = ModuloClusterer {
            clusters: 3,
            calls: 0,
        };
        let mut pipeline = ScenePipeline::new(config(1000, 4), fitter, clusterer).unwrap();
        let PipelineOutput { scene, report } = pipeline.run(&cloud);

        assert_eq!(scene.floor.as_ref().map(|c| c.len()), Some(2000));
        assert_eq!(scene.walls.as_ref().map(|c| c.len()), Some(1200));
        let residual = scene.residual.as_ref().unwrap();
        assert_eq!(residual.cloud.len(), 1800);
        assert_eq!(residual.labels.len(), 1800);
        assert_eq!(scene.point_count() + report.discarded_points, cloud.len());
    }

    #[test]
    fn test_everything_consumed_skips_clustering() {
        let cloud = line_cloud(3000);
        let fitter = ScriptedFitter::new([(1., 1500), (0., 1500)]);
        let clusterer = ModuloClusterer {
            clusters: 3,
            calls: 0,
        };
        let mut pipeline = ScenePipeline::new(config(1000, 4), fitter, clusterer).unwrap();
        let PipelineOutput { scene, report } = pipeline.run(&cloud);

        assert_eq!(report.termination, Termination::InsufficientResidue);
        assert!(scene.residual.is_none());
        assert_eq!(pipeline.clusterer.calls, 0);
        assert_eq!(scene.layers().count(), 2);
    }

    #[test]
    fn test_invalid_config() {
        let config = config(1000, 4).with_voxel_size(-1.);
        assert!(ScenePipeline::seeded(config, 0).is_err());
    }

    /// A 4 x 3 m room sampled on a 5 cm grid: a floor, two walls and two
    /// boxes standing on the floor.
    fn synthetic_room(rng: &mut StdRng) -> (PointCloud<Point3Infoed<f64, ()>>, usize, usize) {
        let mut storage = Vec::new();
        for i in 0..80 {
            for j in 0..60 {
                storage.push(Point3Infoed::xyz(i as f64 * 0.05, j as f64 * 0.05, 0.));
            }
        }
        let floor = storage.len();

        for k in 1..50 {
            let z = k as f64 * 0.05;
            storage.extend((0..80).map(|i| Point3Infoed::xyz(i as f64 * 0.05, 3., z)));
            storage.extend((0..60).map(|j| Point3Infoed::xyz(0., j as f64 * 0.05, z)));
        }
        let walls = storage.len() - floor;

        for center in [[1.0, 1.0], [2.8, 1.6]] {
            for _ in 0..300 {
                storage.push(Point3Infoed::xyz(
                    center[0] + rng.gen_range(-0.15..0.15),
                    center[1] + rng.gen_range(-0.15..0.15),
                    rng.gen_range(0.1..0.4),
                ));
            }
        }

        (PointCloud::from_vec(storage), floor, walls)
    }

    #[test]
    fn test_synthetic_room() {
        let mut rng = StdRng::seed_from_u64(2024);
        let (cloud, floor, walls) = synthetic_room(&mut rng);

        let config = PipelineConfig::new(
            SegmentationConfig::new(0.01, 1000, 4),
            ClusterConfig::new(0.1, 10),
        );
        let mut pipeline = ScenePipeline::seeded(config, 7).unwrap();
        let PipelineOutput { scene, report } = pipeline.run(&cloud);

        assert_eq!(report.floor_segments, 1);
        assert_eq!(report.wall_segments, 2);
        assert_eq!(report.discarded_segments, 0);
        assert_eq!(report.fit_attempts, 3);
        assert_eq!(report.termination, Termination::InsufficientResidue);

        assert_eq!(scene.floor.as_ref().map(|c| c.len()), Some(floor));
        assert_eq!(scene.walls.as_ref().map(|c| c.len()), Some(walls));

        let residual = scene.residual.as_ref().unwrap();
        assert_eq!(residual.cloud.len(), 600);
        assert_eq!(residual.labels.num_clusters(), 2);
    }

    #[test]
    fn test_downsampling_before_segmentation() {
        let mut rng = StdRng::seed_from_u64(1);
        let (cloud, _, _) = synthetic_room(&mut rng);

        let config = PipelineConfig::new(
            SegmentationConfig::new(0.01, 1000, 4),
            ClusterConfig::new(0.1, 10),
        )
        .with_voxel_size(0.1);
        let mut pipeline = ScenePipeline::seeded(config, 3).unwrap();
        let PipelineOutput { scene, report } = pipeline.run(&cloud);

        assert!(scene.point_count() + report.discarded_points < cloud.len());
        assert!(report.fit_attempts >= 1);
    }
}
