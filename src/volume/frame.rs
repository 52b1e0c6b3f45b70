//! Physical frame of a voxel grid: spacing, origin and direction cosines.

use crate::error::SegmentationError;
use nalgebra::{Matrix3, Vector3};

/// Placement of a voxel grid in world space.
///
/// `spacing` is the distance between adjacent voxel centers in millimetres,
/// `origin` the world coordinate of voxel (0, 0, 0), and `direction` an
/// orthonormal matrix mapping voxel axes to world axes. The orthonormality
/// is a construction-time contract: `world_to_voxel` inverts `direction` by
/// transposition.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFrame {
    spacing: Vector3<f64>,
    origin: Vector3<f64>,
    direction: Matrix3<f64>,
}

impl ImageFrame {
    /// Build a frame, rejecting non-positive spacing.
    pub fn new(
        spacing: Vector3<f64>,
        origin: Vector3<f64>,
        direction: Matrix3<f64>,
    ) -> Result<Self, SegmentationError> {
        if spacing.iter().any(|&s| s <= 0.0 || !s.is_finite()) {
            return Err(SegmentationError::geometry(format!(
                "spacing must be positive, got [{}, {}, {}]",
                spacing.x, spacing.y, spacing.z
            )));
        }
        Ok(Self {
            spacing,
            origin,
            direction,
        })
    }

    /// Axis-aligned frame with the given spacing and a zero origin.
    pub fn axis_aligned(spacing: Vector3<f64>) -> Result<Self, SegmentationError> {
        Self::new(spacing, Vector3::zeros(), Matrix3::identity())
    }

    /// Unit-spacing, axis-aligned frame at the world origin.
    pub fn identity() -> Self {
        Self {
            spacing: Vector3::new(1.0, 1.0, 1.0),
            origin: Vector3::zeros(),
            direction: Matrix3::identity(),
        }
    }

    pub fn spacing(&self) -> &Vector3<f64> {
        &self.spacing
    }

    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    pub fn direction(&self) -> &Matrix3<f64> {
        &self.direction
    }

    /// Same orientation and origin, different spacing.
    pub fn with_spacing(&self, spacing: Vector3<f64>) -> Result<Self, SegmentationError> {
        Self::new(spacing, self.origin, self.direction)
    }

    /// Same orientation and spacing, different origin.
    pub fn with_origin(&self, origin: Vector3<f64>) -> Self {
        Self {
            spacing: self.spacing,
            origin,
            direction: self.direction,
        }
    }

    /// World coordinate of a (possibly fractional) voxel index.
    pub fn voxel_to_world(&self, index: &Vector3<f64>) -> Vector3<f64> {
        self.origin + self.direction * index.component_mul(&self.spacing)
    }

    /// Continuous voxel index of a world coordinate.
    pub fn world_to_voxel(&self, world: &Vector3<f64>) -> Vector3<f64> {
        (self.direction.transpose() * (world - self.origin)).component_div(&self.spacing)
    }

    /// Flat 15-float form: spacing, origin, then the direction rows.
    pub fn to_flat(&self) -> [f64; 15] {
        let mut flat = [0.0; 15];
        flat[..3].copy_from_slice(self.spacing.as_slice());
        flat[3..6].copy_from_slice(self.origin.as_slice());
        for row in 0..3 {
            for col in 0..3 {
                flat[6 + row * 3 + col] = self.direction[(row, col)];
            }
        }
        flat
    }

    /// Inverse of [`ImageFrame::to_flat`].
    pub fn from_flat(flat: &[f64; 15]) -> Result<Self, SegmentationError> {
        let spacing = Vector3::new(flat[0], flat[1], flat[2]);
        let origin = Vector3::new(flat[3], flat[4], flat[5]);
        let direction = Matrix3::from_row_slice(&flat[6..15]);
        Self::new(spacing, origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxel_world_round_trip() {
        let frame = ImageFrame::new(
            Vector3::new(0.5, 0.5, 2.0),
            Vector3::new(-10.0, 4.0, 7.5),
            Matrix3::identity(),
        )
        .unwrap();
        let index = Vector3::new(3.0, 11.0, 2.0);
        let world = frame.voxel_to_world(&index);
        assert_eq!(world, Vector3::new(-8.5, 9.5, 11.5));
        let back = frame.world_to_voxel(&world);
        assert!((back - index).norm() < 1e-12);
    }

    #[test]
    fn round_trip_with_rotation() {
        // 90 degree rotation about z
        let direction = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let frame = ImageFrame::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(5.0, -5.0, 0.0),
            direction,
        )
        .unwrap();
        let index = Vector3::new(4.0, 1.0, 2.0);
        let back = frame.world_to_voxel(&frame.voxel_to_world(&index));
        assert!((back - index).norm() < 1e-12);
    }

    #[test]
    fn flat_form_round_trips() {
        let frame = ImageFrame::new(
            Vector3::new(0.4, 0.4, 0.4),
            Vector3::new(1.0, 2.0, 3.0),
            Matrix3::identity(),
        )
        .unwrap();
        let restored = ImageFrame::from_flat(&frame.to_flat()).unwrap();
        assert_eq!(frame, restored);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let err = ImageFrame::axis_aligned(Vector3::new(1.0, 0.0, 1.0));
        assert!(matches!(
            err,
            Err(SegmentationError::InvalidGeometry { .. })
        ));
    }
}
