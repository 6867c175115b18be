use nalgebra::{RealField, Vector4};
use num::ToPrimitive;
use roomseg_common::{filter::ApproxFilter, point_cloud::PointCloud, points::Point3Infoed};

/// Replaces the points falling into each cubic voxel by their centroid. The
/// extra payload of a centroid is taken from the first point of its voxel.
/// Non-finite points are dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VoxelGrid<T> {
    leaf_size: T,
}

impl<T: RealField> VoxelGrid<T> {
    pub fn new(leaf_size: T) -> Self {
        VoxelGrid { leaf_size }
    }
}

impl<T: RealField + ToPrimitive, I: Clone> ApproxFilter<PointCloud<Point3Infoed<T, I>>>
    for VoxelGrid<T>
{
    fn filter(&mut self, point_cloud: &PointCloud<Point3Infoed<T, I>>) -> PointCloud<Point3Infoed<T, I>> {
        let [min, _] = match point_cloud.finite_bound() {
            Some(bound) => bound,
            None => return PointCloud::new(),
        };

        let voxel_of = |coords: &Vector4<T>| -> [u64; 3] {
            let cell = (coords.xyz() - min.xyz()).unscale(self.leaf_size.clone());
            [0, 1, 2].map(|dim| cell[dim].clone().floor().to_u64().unwrap_or(u64::MAX))
        };

        let mut index_point = { point_cloud.iter() }
            .filter(|point| point_cloud.is_bounded() || point.is_finite())
            .map(|point| (voxel_of(&point.coords), point))
            .collect::<Vec<_>>();
        index_point.sort_by(|(i1, _), (i2, _)| i1.cmp(i2));

        let mut storage = Vec::new();
        for group in index_point.chunk_by(|(i1, _), (i2, _)| i1 == i2) {
            let num = nalgebra::convert::<f64, T>(group.len() as f64);
            let sum = { group.iter() }.fold(Vector4::zeros(), |acc, (_, point)| acc + &point.coords);
            storage.push(Point3Infoed {
                coords: sum.unscale(num),
                extra: group[0].1.extra.clone(),
            });
        }

        PointCloud::from_vec(storage)
    }
}
