mod node;
mod result;

use nalgebra::{RealField, Scalar, Vector4};
use node::Node;
use roomseg_common::{
    point_cloud::PointCloud,
    points::Point3Infoed,
    search::{SearchType, Searcher},
};

pub use self::result::*;

/// A k-d tree over the finite points of a point cloud. Returned indices refer
/// to the cloud the tree was built from.
pub struct KdTree<'a, T: Scalar> {
    nodes: Vec<Node<T>>,
    coords: Vec<&'a Vector4<T>>,
    root: Option<usize>,
}

impl<'a, T: Scalar> Default for KdTree<'a, T> {
    fn default() -> Self {
        KdTree {
            nodes: Vec::new(),
            coords: Vec::new(),
            root: None,
        }
    }
}

impl<'a, T: RealField> KdTree<'a, T> {
    pub fn new<I>(point_cloud: &'a PointCloud<Point3Infoed<T, I>>) -> Self {
        let coords = point_cloud.iter().map(|p| &p.coords).collect::<Vec<_>>();
        let mut indices = if point_cloud.is_bounded() {
            (0..point_cloud.len()).collect::<Vec<_>>()
        } else {
            { point_cloud.iter().enumerate() }
                .filter_map(|(index, point)| point.is_finite().then_some(index))
                .collect()
        };

        if indices.is_empty() {
            return KdTree {
                coords,
                ..Default::default()
            };
        }

        let mut nodes = Vec::with_capacity(indices.len() * 2);
        let root = node::build(&mut nodes, &coords, &mut indices);
        KdTree {
            nodes,
            coords,
            root: Some(root),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn search_typed(
        &self,
        pivot: &Vector4<T>,
        result: &mut impl ResultSet<Key = T, Value = usize>,
    ) {
        if let Some(root) = self.root {
            node::search(&self.nodes, &self.coords, root, pivot, result)
        }
    }
}

impl<'a, T: RealField> Searcher<T> for KdTree<'a, T> {
    fn search(&self, pivot: &Vector4<T>, ty: SearchType<T>, result: &mut Vec<usize>) {
        result.clear();
        match ty {
            SearchType::Knn(num) => {
                let mut rs = KnnResultSet::new(num);
                self.search_typed(pivot, &mut rs);
                result.extend(rs.into_sorted_vec().into_iter().map(|(_, v)| v));
            }
            SearchType::Radius(radius) => {
                let mut rs = RadiusResultSet::new(radius);
                self.search_typed(pivot, &mut rs);
                result.extend(rs.into_sorted_vec().into_iter().map(|(_, v)| v));
            }
        }
    }
}
