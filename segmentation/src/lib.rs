//! Splits an indoor scan into floor, walls and clustered foreground objects.
//!
//! The structural part is found by greedy plane extraction
//! ([`SegmentationEngine`]): the dominant plane of the remaining points is
//! fitted, classified by its normal and removed, until the planes become too
//! small or the plane quota runs out. Whatever is left is grouped with
//! DBSCAN. [`ScenePipeline`] runs the whole chain.

mod aggregate;
mod assemble;
mod classifier;
mod cluster;
mod config;
mod engine;
mod error;
mod fitter;
mod pipeline;

#[cfg(test)]
mod mock;

pub use self::{
    aggregate::{merge, StructuralClouds},
    assemble::{assemble, ResidualClusters, SceneLayer, SceneSegmentation},
    classifier::{PlaneClass, PlaneClassifier},
    cluster::{ClusterLabels, ClusterPrimitive, Dbscan, NOISE},
    config::{
        ClusterConfig, PipelineConfig, SegmentationConfig, DEFAULT_HORIZONTAL_NORMAL_THRESHOLD,
        DEFAULT_VERTICAL_NORMAL_THRESHOLD,
    },
    engine::{
        ClassifiedCollection, Segment, SegmentationEngine, SegmentationOutput,
        SegmentationReport, Termination,
    },
    error::{ConfigError, Result},
    fitter::{PlaneFitter, SacPlaneFitter, DEFAULT_RANSAC_ITERATIONS},
    pipeline::{PipelineOutput, ScenePipeline},
};
