use nalgebra::{RealField, Scalar};
use num::ToPrimitive;
use roomseg_common::{filter::ApproxFilter, point_cloud::PointCloud, points::Point3Infoed};
use roomseg_filters::ExtractIndices;
use roomseg_sac::Plane;

use crate::{
    classifier::PlaneClass,
    config::SegmentationConfig,
    error::Result,
    fitter::PlaneFitter,
};

/// A detected plane and the points lying on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<T: Scalar, I> {
    pub plane: Plane<T>,
    /// Indices into the working cloud at the time of detection.
    pub inliers: Vec<usize>,
    pub points: PointCloud<Point3Infoed<T, I>>,
}

/// Floor and wall segments in detection order. Unclassified segments are
/// never stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCollection<T: Scalar, I> {
    pub floors: Vec<Segment<T, I>>,
    pub walls: Vec<Segment<T, I>>,
}

impl<T: Scalar, I> ClassifiedCollection<T, I> {
    pub fn new() -> Self {
        ClassifiedCollection {
            floors: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// Records `segment` under `class`. Returns `false`, dropping the
    /// segment, for `PlaneClass::Unclassified`.
    pub fn push(&mut self, class: PlaneClass, segment: Segment<T, I>) -> bool {
        match class {
            PlaneClass::Floor => self.floors.push(segment),
            PlaneClass::Wall => self.walls.push(segment),
            PlaneClass::Unclassified => return false,
        }
        true
    }

    pub fn len(&self) -> usize {
        self.floors.len() + self.walls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty() && self.walls.is_empty()
    }
}

impl<T: Scalar, I> Default for ClassifiedCollection<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the extraction loop stopped. None of these is an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The working set had no more than `min_points_for_plane` points left.
    InsufficientResidue,
    /// The best plane found had fewer than `min_points_for_plane` inliers.
    WeakPlaneFit,
    /// A plane was found after `max_plane_count` planes were already
    /// consumed. It was discarded without touching the working set.
    QuotaExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationReport {
    pub fit_attempts: usize,
    pub floor_segments: usize,
    pub wall_segments: usize,
    /// Unclassified planes removed from the working set without being
    /// recorded.
    pub discarded_segments: usize,
    pub discarded_points: usize,
    pub termination: Termination,
}

impl SegmentationReport {
    /// Planes consumed by the loop, recorded or discarded.
    #[inline]
    pub fn consumed_planes(&self) -> usize {
        self.floor_segments + self.wall_segments + self.discarded_segments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationOutput<T: Scalar, I> {
    pub segments: ClassifiedCollection<T, I>,
    pub residual: PointCloud<Point3Infoed<T, I>>,
    pub report: SegmentationReport,
}

/// Greedily extracts planes from a point cloud.
///
/// Each round fits the dominant plane of the working set, classifies it and
/// removes its inliers from the working set, whether or not the plane was
/// classified. The loop runs while the working set holds more than
/// `min_points_for_plane` points, stops at the first fit with fewer inliers
/// than that, and never consumes more than `max_plane_count` planes.
pub struct SegmentationEngine<F, T: Scalar> {
    fitter: F,
    config: SegmentationConfig<T>,
}

impl<F, T: RealField + ToPrimitive> SegmentationEngine<F, T> {
    pub fn new(fitter: F, config: SegmentationConfig<T>) -> Result<Self> {
        config.validate()?;
        Ok(SegmentationEngine { fitter, config })
    }

    #[inline]
    pub fn config(&self) -> &SegmentationConfig<T> {
        &self.config
    }

    #[inline]
    pub fn into_fitter(self) -> F {
        self.fitter
    }
}

impl<F: PlaneFitter<T>, T: RealField + ToPrimitive> SegmentationEngine<F, T> {
    pub fn run<I: Clone>(&mut self, cloud: &PointCloud<Point3Infoed<T, I>>) -> SegmentationOutput<T, I> {
        let min_points = self.config.min_points_for_plane;
        let classifier = self.config.classifier();

        let mut working = cloud.clone();
        let mut segments = ClassifiedCollection::new();
        let mut fit_attempts = 0;
        let mut planes_found = 0;
        let (mut discarded_segments, mut discarded_points) = (0, 0);

        let termination = loop {
            if working.len() <= min_points {
                break Termination::InsufficientResidue;
            }

            fit_attempts += 1;
            let fit = self.fitter.fit(&working, self.config.distance_threshold.clone());
            let (plane, mut inliers) = match fit {
                Some(fit) => fit,
                None => break Termination::WeakPlaneFit,
            };
            inliers.sort_unstable();
            inliers.dedup();
            inliers.retain(|&index| index < working.len());
            if inliers.len() < min_points {
                log::debug!(
                    "best plane has only {} inliers, needs {}",
                    inliers.len(),
                    min_points
                );
                break Termination::WeakPlaneFit;
            }

            planes_found += 1;
            if planes_found > self.config.max_plane_count {
                break Termination::QuotaExceeded;
            }

            let class = classifier.classify_plane(&plane);
            let (points, rest) = {
                let mut extract = ExtractIndices::new(&inliers, false);
                let points = extract.filter(&working);
                extract.negative = true;
                (points, extract.filter(&working))
            };
            working = rest;

            let count = inliers.len();
            let segment = Segment {
                plane,
                inliers,
                points,
            };
            if segments.push(class, segment) {
                log::info!("detected {:?} plane with {} points", class, count);
            } else {
                log::info!("discarded unclassified plane with {} points", count);
                discarded_segments += 1;
                discarded_points += count;
            }
        };

        log::debug!(
            "plane extraction stopped ({:?}) after {} fits, {} points left",
            termination,
            fit_attempts,
            working.len()
        );

        let report = SegmentationReport {
            fit_attempts,
            floor_segments: segments.floors.len(),
            wall_segments: segments.walls.len(),
            discarded_segments,
            discarded_points,
            termination,
        };
        SegmentationOutput {
            segments,
            residual: working,
            report,
        }
    }
}
