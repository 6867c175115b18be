use bitvec::vec::BitVec;
use nalgebra::RealField;
use roomseg_common::{
    filter::{ApproxFilter, Filter},
    point_cloud::PointCloud,
    points::Point3Infoed,
};

/// Keeps the points at `indices`, or every other point when `negative` is
/// set. The output always follows the input order and is indexed from 0.
///
/// Indices out of range are ignored; duplicates count once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractIndices<'a> {
    pub indices: &'a [usize],
    pub negative: bool,
}

impl<'a> ExtractIndices<'a> {
    pub fn new(indices: &'a [usize], negative: bool) -> Self {
        ExtractIndices { indices, negative }
    }

    fn mask(&self, len: usize) -> BitVec {
        let mut mask = BitVec::repeat(false, len);
        for &index in self.indices.iter().filter(|&&index| index < len) {
            mask.set(index, true);
        }
        mask
    }
}

impl<'a, T> Filter<[T]> for ExtractIndices<'a> {
    fn filter_indices(&mut self, input: &[T]) -> Vec<usize> {
        self.filter_all_indices(input).0
    }

    fn filter_all_indices(&mut self, input: &[T]) -> (Vec<usize>, Vec<usize>) {
        let mask = self.mask(input.len());
        let (mut kept, mut removed) = (Vec::new(), Vec::new());
        for (index, selected) in mask.iter().by_vals().enumerate() {
            if selected ^ self.negative {
                kept.push(index)
            } else {
                removed.push(index)
            }
        }
        (kept, removed)
    }
}

impl<'a, T: RealField, I: Clone> ApproxFilter<PointCloud<Point3Infoed<T, I>>>
    for ExtractIndices<'a>
{
    fn filter(&mut self, input: &PointCloud<Point3Infoed<T, I>>) -> PointCloud<Point3Infoed<T, I>> {
        let kept = self.filter_indices(&**input);
        input.create_sub(&kept)
    }
}
