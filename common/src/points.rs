use nalgebra::{RealField, Scalar, Vector4};

/// A point with homogeneous coordinates (`w == 1`) and an extra payload, for
/// example a color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Point3Infoed<T: Scalar, I> {
    pub coords: Vector4<T>,
    pub extra: I,
}

impl<T: RealField, I: Default> Default for Point3Infoed<T, I> {
    /// The origin, with `w == 1`.
    fn default() -> Self {
        Point3Infoed::new(T::zero(), T::zero(), T::zero(), Default::default())
    }
}

impl<T: RealField, I> Point3Infoed<T, I> {
    #[inline]
    pub fn new(x: T, y: T, z: T, extra: I) -> Self {
        Point3Infoed {
            coords: Vector4::new(x, y, z, T::one()),
            extra,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.coords.x.is_finite() && self.coords.y.is_finite() && self.coords.z.is_finite()
    }
}

impl<T: RealField> Point3Infoed<T, ()> {
    #[inline]
    pub fn xyz(x: T, y: T, z: T) -> Self {
        Point3Infoed::new(x, y, z, ())
    }
}

impl<T: Scalar, I> AsRef<Vector4<T>> for Point3Infoed<T, I> {
    #[inline]
    fn as_ref(&self) -> &Vector4<T> {
        &self.coords
    }
}

/// Lower bits <---[b; g; r; a]: [u8; 4]---- Higher bits
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PointInfoRgba {
    pub rgba: u32,
}

impl PointInfoRgba {
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        PointInfoRgba {
            rgba: b as u32 | ((g as u32) << 8) | ((r as u32) << 16) | (0xffu32 << 24),
        }
    }

    #[inline]
    pub fn rgba_array(&self) -> [u8; 4] {
        let [b, g, r, a] = self.rgba.to_le_bytes();
        [r, g, b, a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_layout() {
        let info = PointInfoRgba::from_rgb(1, 2, 3);
        assert_eq!(info.rgba, 0xff01_0203);
        assert_eq!(info.rgba_array(), [1, 2, 3, 0xff]);
    }

    #[test]
    fn test_default_is_homogeneous_origin() {
        let point = Point3Infoed::<f32, PointInfoRgba>::default();
        assert_eq!(point.coords, Vector4::new(0., 0., 0., 1.));
        assert_eq!(point.extra, PointInfoRgba::default());
    }

    #[test]
    fn test_finite() {
        assert!(Point3Infoed::xyz(1.0f64, 2.0, 3.0).is_finite());
        assert!(!Point3Infoed::xyz(f64::NAN, 2.0, 3.0).is_finite());
        assert!(!Point3Infoed::xyz(1.0f32, f32::INFINITY, 3.0).is_finite());
    }
}
