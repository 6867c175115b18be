use nalgebra::{RealField, Scalar};
use num::ToPrimitive;

use crate::{
    classifier::PlaneClassifier,
    error::{ConfigError, Result},
};

pub const DEFAULT_HORIZONTAL_NORMAL_THRESHOLD: f64 = 0.9;
pub const DEFAULT_VERTICAL_NORMAL_THRESHOLD: f64 = 0.2;

fn value<T: ToPrimitive>(x: &T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Parameters of the plane extraction loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentationConfig<T: Scalar> {
    /// Maximum point-to-plane distance of an inlier.
    pub distance_threshold: T,
    /// Minimum inlier count of an accepted plane, and the working set size
    /// that must be exceeded to attempt another fit.
    pub min_points_for_plane: usize,
    /// Upper bound on the planes consumed by the loop, classified or not.
    pub max_plane_count: usize,
    /// `|normal.z|` above this is a floor.
    pub horizontal_normal_threshold: T,
    /// `|normal.z|` below this is a wall.
    pub vertical_normal_threshold: T,
}

impl<T: RealField + ToPrimitive> SegmentationConfig<T> {
    pub fn new(distance_threshold: T, min_points_for_plane: usize, max_plane_count: usize) -> Self {
        SegmentationConfig {
            distance_threshold,
            min_points_for_plane,
            max_plane_count,
            horizontal_normal_threshold: nalgebra::convert(DEFAULT_HORIZONTAL_NORMAL_THRESHOLD),
            vertical_normal_threshold: nalgebra::convert(DEFAULT_VERTICAL_NORMAL_THRESHOLD),
        }
    }

    pub fn with_normal_thresholds(mut self, horizontal: T, vertical: T) -> Self {
        self.horizontal_normal_threshold = horizontal;
        self.vertical_normal_threshold = vertical;
        self
    }

    #[inline]
    pub fn classifier(&self) -> PlaneClassifier<T> {
        PlaneClassifier::new(
            self.horizontal_normal_threshold.clone(),
            self.vertical_normal_threshold.clone(),
        )
    }

    pub fn validate(&self) -> Result<()> {
        let (zero, one) = (T::zero(), T::one());
        let horizontal = &self.horizontal_normal_threshold;
        let vertical = &self.vertical_normal_threshold;

        if !(self.distance_threshold > zero) {
            return Err(ConfigError::DistanceThreshold(value(&self.distance_threshold)));
        }
        if self.min_points_for_plane == 0 {
            return Err(ConfigError::MinPointsForPlane);
        }
        if !(*horizontal > zero && *horizontal <= one) {
            return Err(ConfigError::HorizontalThreshold(value(horizontal)));
        }
        if !(*vertical >= zero && *vertical < one) {
            return Err(ConfigError::VerticalThreshold(value(vertical)));
        }
        if vertical > horizontal {
            return Err(ConfigError::ThresholdOrder {
                horizontal: value(horizontal),
                vertical: value(vertical),
            });
        }
        Ok(())
    }
}

/// Parameters of the density clustering run on the residual cloud.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClusterConfig<T: Scalar> {
    pub eps: T,
    pub min_points: usize,
}

impl<T: RealField + ToPrimitive> ClusterConfig<T> {
    pub fn new(eps: T, min_points: usize) -> Self {
        ClusterConfig { eps, min_points }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.eps > T::zero()) {
            return Err(ConfigError::ClusterEps(value(&self.eps)));
        }
        if self.min_points == 0 {
            return Err(ConfigError::ClusterMinPoints);
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PipelineConfig<T: Scalar> {
    /// Leaf size of the voxel grid applied before segmentation, if any.
    pub voxel_size: Option<T>,
    pub segmentation: SegmentationConfig<T>,
    pub cluster: ClusterConfig<T>,
}

impl<T: RealField + ToPrimitive> PipelineConfig<T> {
    pub fn new(segmentation: SegmentationConfig<T>, cluster: ClusterConfig<T>) -> Self {
        PipelineConfig {
            voxel_size: None,
            segmentation,
            cluster,
        }
    }

    pub fn with_voxel_size(mut self, voxel_size: T) -> Self {
        self.voxel_size = Some(voxel_size);
        self
    }

    /// Values tuned for indoor RGB-D scans in meters.
    pub fn indoor_scan() -> Self {
        PipelineConfig::new(
            SegmentationConfig::new(nalgebra::convert(0.015), 1000, 4),
            ClusterConfig::new(nalgebra::convert(0.04), 15),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(voxel_size) = &self.voxel_size {
            if !(*voxel_size > T::zero()) {
                return Err(ConfigError::VoxelSize(value(voxel_size)));
            }
        }
        self.segmentation.validate()?;
        self.cluster.validate()
    }
}
