pub mod filter;
pub mod point_cloud;
pub mod points;
pub mod search;
