use super::Animatable;

/// 2D transformation applied by the host at paint time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in x and y
    pub translate: (f32, f32),
    /// Uniform scale (1.0 = no scale)
    pub scale: f32,
    /// Rotation in degrees (clockwise)
    pub rotate_degrees: f32,
    /// Transform origin as fraction of size (0.5, 0.5 = center)
    pub origin: (f32, f32),
}

impl Transform {
    /// Identity transform (no transformation)
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        scale: 1.0,
        rotate_degrees: 0.0,
        origin: (0.5, 0.5),
    };

    /// Origin on the leading edge, vertically centred
    pub const LEADING: (f32, f32) = (0.0, 0.5);

    /// Create a translation transform
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate: (x, y),
            ..Self::IDENTITY
        }
    }

    /// Create a uniform scale transform
    pub fn scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn with_translation(mut self, x: f32, y: f32) -> Self {
        self.translate = (x, y);
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotate_degrees = degrees;
        self
    }

    /// Set the transform origin (default is center: 0.5, 0.5)
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }
}

impl Animatable for Transform {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            translate: (
                from.translate.0 + (to.translate.0 - from.translate.0) * t,
                from.translate.1 + (to.translate.1 - from.translate.1) * t,
            ),
            scale: from.scale + (to.scale - from.scale) * t,
            rotate_degrees: from.rotate_degrees + (to.rotate_degrees - from.rotate_degrees) * t,
            origin: from.origin, // Origin doesn't animate
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
