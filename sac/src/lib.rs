mod base;
mod plane;

pub use self::{
    base::{PcSac, Ransac},
    plane::{Plane, PlaneEstimator},
};
