use nalgebra::{RealField, Scalar, Vector3, Vector4};
use num::ToPrimitive;
use sample_consensus::{Estimator, Model};

/// The plane `a * x + b * y + c * z + d = 0`, stored as `[a, b, c, d]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Plane<T: Scalar> {
    pub coefficients: Vector4<T>,
}

impl<T: RealField> Plane<T> {
    #[inline]
    pub fn new(a: T, b: T, c: T, d: T) -> Self {
        Plane {
            coefficients: Vector4::new(a, b, c, d),
        }
    }

    /// The plane through `coords` perpendicular to `normal`.
    pub fn from_point_normal(coords: &Vector4<T>, normal: &Vector3<T>) -> Self {
        let d = -normal.dot(&coords.xyz());
        Plane::new(normal.x.clone(), normal.y.clone(), normal.z.clone(), d)
    }

    /// The `(a, b, c)` part, not necessarily of unit length.
    #[inline]
    pub fn normal(&self) -> Vector3<T> {
        self.coefficients.xyz()
    }

    /// Scales the coefficients so that the normal has unit length. Returns
    /// `None` for a degenerate plane with a zero normal.
    pub fn normalized(&self) -> Option<Self> {
        let norm = self.normal().norm();
        (norm > T::default_epsilon()).then(|| Plane {
            coefficients: self.coefficients.unscale(norm),
        })
    }

    pub fn distance_directed(&self, point: &Vector4<T>) -> T {
        let dot = self.normal().dot(&point.xyz()) + self.coefficients.w.clone();
        dot / self.normal().norm()
    }

    pub fn distance(&self, point: &Vector4<T>) -> T {
        self.distance_directed(point).abs()
    }
}

impl<T: RealField + ToPrimitive> Model<Vector4<T>> for Plane<T> {
    fn residual(&self, data: &Vector4<T>) -> f64 {
        self.distance(data).to_f64().unwrap_or(f64::INFINITY)
    }
}

/// Estimates a plane from three non-collinear points. The resulting normal
/// has unit length.
pub struct PlaneEstimator;

impl<T: RealField + ToPrimitive> Estimator<Vector4<T>> for PlaneEstimator {
    type Model = Plane<T>;

    type ModelIter = Option<Plane<T>>;

    const MIN_SAMPLES: usize = 3;

    fn estimate<I>(&self, mut data: I) -> Self::ModelIter
    where
        I: Iterator<Item = Vector4<T>> + Clone,
    {
        match (data.next(), data.next(), data.next()) {
            (Some(a), Some(b), Some(c)) => {
                let xa = (&b - &a).xyz();
                let xb = (&c - &a).xyz();
                let normal = xa.cross(&xb);

                Plane::from_point_normal(&a, &normal).normalized()
            }
            _ => None,
        }
    }
}
