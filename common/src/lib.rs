use thiserror::Error;

/// Scalar type used for all analog sample values.
pub type Real = f64;
/// Timestamps from the auxiliary recording, in milliseconds.
pub type Time = f64;
/// Image row coordinate.
pub type Pixel = u32;

/// Accepted names for the frame-trigger channel, in resolution order.
pub const FRAME_TRIGGER_ALIASES: &[&str] = &["ImageFrameTrigger", "frame starts"];

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("acquisition shape field '{0}' must be positive")]
    NotPositive(&'static str),
}

/// Dimensions of the imaging volume: how many volume cycles were acquired,
/// how many z-planes each cycle visits, and how many rows each frame has.
///
/// All fields are validated positive on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionShape {
    frames: usize,
    z_planes: usize,
    y_px: Pixel,
}

/// The (cycle, z-plane) coordinate of one frame within the acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePosition {
    pub cycle: usize,
    pub z_plane: usize,
}

impl AcquisitionShape {
    pub fn new(frames: usize, z_planes: usize, y_px: Pixel) -> Result<Self, ShapeError> {
        if frames == 0 {
            return Err(ShapeError::NotPositive("frames"));
        }
        if z_planes == 0 {
            return Err(ShapeError::NotPositive("z_planes"));
        }
        if y_px == 0 {
            return Err(ShapeError::NotPositive("y_px"));
        }
        Ok(Self {
            frames,
            z_planes,
            y_px,
        })
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn z_planes(&self) -> usize {
        self.z_planes
    }

    pub fn y_px(&self) -> Pixel {
        self.y_px
    }

    /// Total number of frame-trigger events expected in the recording.
    pub fn num_frames(&self) -> usize {
        self.frames * self.z_planes
    }

    /// Converts a linear frame index to its (cycle, z-plane) coordinate.
    /// Frames are acquired cycle-major: all planes of cycle 0, then cycle 1.
    pub fn unravel(&self, index: usize) -> FramePosition {
        FramePosition {
            cycle: index / self.z_planes,
            z_plane: index % self.z_planes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_fields() {
        assert!(AcquisitionShape::new(0, 3, 512).is_err());
        assert!(AcquisitionShape::new(10, 0, 512).is_err());
        assert!(AcquisitionShape::new(10, 3, 0).is_err());
    }

    #[test]
    fn num_frames() {
        let shape = AcquisitionShape::new(10, 3, 512).unwrap();
        assert_eq!(shape.num_frames(), 30);
    }

    #[test]
    fn unravel_is_cycle_major() {
        let shape = AcquisitionShape::new(10, 3, 512).unwrap();
        assert_eq!(
            shape.unravel(0),
            FramePosition {
                cycle: 0,
                z_plane: 0
            }
        );
        assert_eq!(
            shape.unravel(2),
            FramePosition {
                cycle: 0,
                z_plane: 2
            }
        );
        assert_eq!(
            shape.unravel(3),
            FramePosition {
                cycle: 1,
                z_plane: 0
            }
        );
        assert_eq!(
            shape.unravel(7),
            FramePosition {
                cycle: 2,
                z_plane: 1
            }
        );
    }

    #[test]
    fn unravel_single_plane() {
        let shape = AcquisitionShape::new(4, 1, 128).unwrap();
        assert_eq!(
            shape.unravel(3),
            FramePosition {
                cycle: 3,
                z_plane: 0
            }
        );
    }
}
