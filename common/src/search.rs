use nalgebra::{Scalar, Vector4};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchType<T> {
    Knn(usize),
    Radius(T),
}

/// Neighbor search over the points a searcher was built from. Results are
/// indices into that point cloud.
pub trait Searcher<T: Scalar> {
    fn search(&self, pivot: &Vector4<T>, ty: SearchType<T>, result: &mut Vec<usize>);
}
