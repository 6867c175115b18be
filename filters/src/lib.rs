mod extract;
mod voxel_grid;

pub use self::{extract::ExtractIndices, voxel_grid::VoxelGrid};
