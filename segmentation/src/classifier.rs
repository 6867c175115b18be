use nalgebra::{RealField, Scalar, Vector3};
use roomseg_sac::Plane;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaneClass {
    /// A horizontal surface.
    Floor,
    /// A vertical surface.
    Wall,
    /// Neither clearly horizontal nor clearly vertical.
    Unclassified,
}

/// Classifies a plane by the z component of its normal, the z axis being the
/// up axis of the scene. Both thresholds are exclusive, so the closed band
/// `[vertical, horizontal]` is left unclassified.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneClassifier<T: Scalar> {
    horizontal: T,
    vertical: T,
}

impl<T: RealField> PlaneClassifier<T> {
    pub fn new(horizontal: T, vertical: T) -> Self {
        PlaneClassifier {
            horizontal,
            vertical,
        }
    }

    pub fn classify(&self, normal: &Vector3<T>) -> PlaneClass {
        let up = normal.z.clone().abs();
        if up > self.horizontal {
            PlaneClass::Floor
        } else if up < self.vertical {
            PlaneClass::Wall
        } else {
            PlaneClass::Unclassified
        }
    }

    #[inline]
    pub fn classify_plane(&self, plane: &Plane<T>) -> PlaneClass {
        self.classify(&plane.normal())
    }
}
