use std::ops::{Deref, Index};

use nalgebra::{RealField, Vector4};

use crate::points::Point3Infoed;

/// An unorganized point cloud. Points are addressed by their position in the
/// storage; selecting a subset creates a new cloud whose indices start at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointCloud<P> {
    storage: Vec<P>,
    bounded: bool,
}

impl<P> PointCloud<P> {
    #[inline]
    pub fn new() -> Self {
        PointCloud {
            storage: Vec::new(),
            bounded: true,
        }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    #[inline]
    pub fn into_vec(self) -> Vec<P> {
        self.storage
    }
}

impl<P: Clone> PointCloud<P> {
    /// Copies the points at `indices`, in that order, into a new cloud.
    pub fn create_sub(&self, indices: &[usize]) -> Self {
        PointCloud {
            storage: { indices.iter() }
                .map(|&index| self.storage[index].clone())
                .collect(),
            bounded: self.bounded,
        }
    }

    /// Appends all points of `other` after the points of `self`.
    pub fn append(&mut self, other: &Self) {
        self.storage.extend_from_slice(&other.storage);
        self.bounded &= other.bounded;
    }
}

impl<T: RealField, I> PointCloud<Point3Infoed<T, I>> {
    pub fn from_vec(storage: Vec<Point3Infoed<T, I>>) -> Self {
        let bounded = storage.iter().all(|p| p.is_finite());
        PointCloud { storage, bounded }
    }

    /// Replaces the point at `index`, keeping the boundedness up to date.
    pub fn set(&mut self, index: usize, point: Point3Infoed<T, I>) {
        self.storage[index] = point;
        self.bounded = self.storage.iter().all(|p| p.is_finite());
    }

    pub fn finite_bound(&self) -> Option<[Vector4<T>; 2]> {
        let fold = |acc: Option<[Vector4<T>; 2]>, v: &Point3Infoed<T, I>| match acc {
            None => Some([v.coords.clone(), v.coords.clone()]),
            Some([min, max]) => Some([min.inf(&v.coords), max.sup(&v.coords)]),
        };
        if self.bounded {
            self.storage.iter().fold(None, fold)
        } else {
            { self.storage.iter() }
                .filter(|v| v.is_finite())
                .fold(None, fold)
        }
    }
}

impl<T: RealField, I> FromIterator<Point3Infoed<T, I>> for PointCloud<Point3Infoed<T, I>> {
    fn from_iter<It: IntoIterator<Item = Point3Infoed<T, I>>>(iter: It) -> Self {
        PointCloud::from_vec(iter.into_iter().collect())
    }
}

impl<T: RealField, I> Extend<Point3Infoed<T, I>> for PointCloud<Point3Infoed<T, I>> {
    fn extend<It: IntoIterator<Item = Point3Infoed<T, I>>>(&mut self, iter: It) {
        for point in iter {
            self.bounded &= point.is_finite();
            self.storage.push(point);
        }
    }
}

impl<P> Deref for PointCloud<P> {
    type Target = [P];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

impl<P> Index<usize> for PointCloud<P> {
    type Output = P;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.storage[index]
    }
}

impl<P> Default for PointCloud<P> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<P> IntoIterator for PointCloud<P> {
    type Item = P;

    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a PointCloud<P> {
    type Item = &'a P;

    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.iter()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector4;

    use super::*;

    fn cloud() -> PointCloud<Point3Infoed<f64, ()>> {
        [[0., 0., 0.], [1., 2., 3.], [-1., 5., 0.5]]
            .into_iter()
            .map(|[x, y, z]| Point3Infoed::xyz(x, y, z))
            .collect()
    }

    #[test]
    fn test_create_sub_reindexes() {
        let cloud = cloud();
        let sub = cloud.create_sub(&[2, 0]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub[0], cloud[2]);
        assert_eq!(sub[1], cloud[0]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut a = cloud();
        let b = cloud().create_sub(&[1]);
        a.append(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(a[3], b[0]);
        assert!(a.is_bounded());

        a.extend([Point3Infoed::xyz(f64::NAN, 0., 0.)]);
        assert!(!a.is_bounded());
    }

    #[test]
    fn test_set_tracks_boundedness() {
        let mut cloud = cloud();
        cloud.set(1, Point3Infoed::xyz(f64::NAN, 0., 0.));
        assert!(!cloud.is_bounded());
        let [min, max] = cloud.finite_bound().unwrap();
        assert_eq!(min, Vector4::new(-1., 0., 0., 1.));
        assert_eq!(max, Vector4::new(0., 5., 0.5, 1.));

        cloud.set(1, Point3Infoed::xyz(2., 2., 2.));
        assert!(cloud.is_bounded());
        assert_eq!(cloud[1].coords, Vector4::new(2., 2., 2., 1.));
    }

    #[test]
    fn test_finite_bound() {
        let mut cloud = cloud();
        cloud.extend([Point3Infoed::xyz(f64::INFINITY, 0., 0.)]);
        let [min, max] = cloud.finite_bound().unwrap();
        assert_eq!(min, Vector4::new(-1., 0., 0., 1.));
        assert_eq!(max, Vector4::new(1., 5., 3., 1.));

        assert!(PointCloud::<Point3Infoed<f64, ()>>::new()
            .finite_bound()
            .is_none());
    }
}
