use thiserror::Error;

/// A parameter rejected before any plane fitting or clustering starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("distance threshold must be positive, got {0}")]
    DistanceThreshold(f64),

    #[error("minimum point count for a plane must be positive")]
    MinPointsForPlane,

    #[error("horizontal normal threshold must lie in (0, 1], got {0}")]
    HorizontalThreshold(f64),

    #[error("vertical normal threshold must lie in [0, 1), got {0}")]
    VerticalThreshold(f64),

    #[error("vertical normal threshold {vertical} exceeds horizontal threshold {horizontal}")]
    ThresholdOrder { horizontal: f64, vertical: f64 },

    #[error("cluster radius must be positive, got {0}")]
    ClusterEps(f64),

    #[error("minimum point count for a cluster must be positive")]
    ClusterMinPoints,

    #[error("voxel size must be positive, got {0}")]
    VoxelSize(f64),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
