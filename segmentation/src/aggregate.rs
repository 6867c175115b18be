use nalgebra::{RealField, Scalar};
use roomseg_common::{point_cloud::PointCloud, points::Point3Infoed};

use crate::engine::{ClassifiedCollection, Segment};

/// The merged floor and wall clouds. A class without segments is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralClouds<T: Scalar, I> {
    pub floor: Option<PointCloud<Point3Infoed<T, I>>>,
    pub walls: Option<PointCloud<Point3Infoed<T, I>>>,
}

fn concat<T: RealField, I: Clone>(
    segments: Vec<Segment<T, I>>,
) -> Option<PointCloud<Point3Infoed<T, I>>> {
    let mut segments = segments.into_iter();
    let mut cloud = segments.next()?.points;
    for segment in segments {
        cloud.append(&segment.points);
    }
    Some(cloud)
}

/// Concatenates the segments of each class in detection order.
pub fn merge<T: RealField, I: Clone>(
    segments: ClassifiedCollection<T, I>,
) -> StructuralClouds<T, I> {
    StructuralClouds {
        floor: concat(segments.floors),
        walls: concat(segments.walls),
    }
}

#[cfg(test)]
mod tests {
    use roomseg_sac::Plane;

    use super::*;
    use crate::{classifier::PlaneClass, mock::line_cloud};

    fn segment(cloud: &PointCloud<Point3Infoed<f64, usize>>, range: std::ops::Range<usize>) -> Segment<f64, usize> {
        let inliers = range.collect::<Vec<_>>();
        Segment {
            plane: Plane::new(0., 0., 1., 0.),
            points: cloud.create_sub(&inliers),
            inliers,
        }
    }

    #[test]
    fn test_merge_in_detection_order() {
        let cloud = line_cloud(10);
        let mut segments = ClassifiedCollection::new();
        segments.push(PlaneClass::Floor, segment(&cloud, 5..8));
        segments.push(PlaneClass::Wall, segment(&cloud, 0..2));
        segments.push(PlaneClass::Floor, segment(&cloud, 2..4));

        let merged = merge(segments);
        let floor = merged.floor.unwrap();
        let walls = merged.walls.unwrap();
        assert_eq!(
            floor.iter().map(|p| p.extra).collect::<Vec<_>>(),
            vec![5, 6, 7, 2, 3]
        );
        assert_eq!(walls.len(), 2);
    }

    #[test]
    fn test_empty_class_is_absent() {
        let cloud = line_cloud(4);
        let mut segments = ClassifiedCollection::new();
        assert!(!segments.push(PlaneClass::Unclassified, segment(&cloud, 0..4)));
        segments.push(PlaneClass::Wall, segment(&cloud, 0..4));

        let merged = merge(segments);
        assert!(merged.floor.is_none());
        assert_eq!(merged.walls.unwrap().len(), 4);

        let merged = merge(ClassifiedCollection::<f64, usize>::new());
        assert_eq!(
            merged,
            StructuralClouds {
                floor: None,
                walls: None
            }
        );
    }
}
