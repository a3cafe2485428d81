//! Conversion between 3D world coordinates and 2D screen coordinates by
//! axonometric projection.

use core::f64::consts::{FRAC_PI_4, FRAC_PI_6};

use crate::coord::{FreeCoordinate, ScreenPoint, ViewportRect, ViewportSize, WorldPoint};

// -------------------------------------------------------------------------------------------------

/// Converts between 3D world coordinates and 2D screen coordinates using an
/// axonometric (parallel, fixed-angle) projection.
///
/// A [`Projector`] has two independently controllable properties:
///
/// * A projection [`angle`](Self::angle) in radians, which determines the shear of the
///   ground plane. The trigonometric coefficients derived from it are cached, and
///   recomputed only when the angle actually changes.
/// * An [`anchor`](Self::anchor), a normalized point in [0, 1]² specifying where the world
///   origin lands on the viewport; it is scaled by the viewport dimensions passed to each
///   projection call.
///
/// It does not know *what* is being projected; it is a plain data structure that does
/// some calculations. Viewport dimensions are supplied per call since they are owned by
/// the rendering side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    angle: FreeCoordinate,
    /// Always equal to `(angle.cos(), angle.sin())`.
    transform: (FreeCoordinate, FreeCoordinate),
    anchor: euclid::default::Point2D<FreeCoordinate>,
}

impl Projector {
    /// The 2:1 dimetric angle, `atan(1/2)`, used by most “isometric” pixel art.
    /// This is the default angle.
    pub const CLASSIC: FreeCoordinate = 0.463_647_609_000_806_1;

    /// The true isometric angle, π/6, giving equal foreshortening on all three axes.
    pub const ISOMETRIC: FreeCoordinate = FRAC_PI_6;

    /// The military projection angle, π/4, which leaves the ground plane undistorted.
    pub const MILITARY: FreeCoordinate = FRAC_PI_4;

    /// Constructs a [`Projector`] with the given projection angle in radians
    /// and the default anchor of (0.5, 0), the top center of the viewport.
    pub fn new(angle: FreeCoordinate) -> Self {
        Self {
            angle,
            transform: (angle.cos(), angle.sin()),
            anchor: euclid::default::Point2D::new(0.5, 0.0),
        }
    }

    /// Returns the current projection angle in radians.
    #[inline]
    pub fn angle(&self) -> FreeCoordinate {
        self.angle
    }

    /// Sets the projection angle in radians and recomputes the cached transform
    /// coefficients.
    ///
    /// Setting the angle to its current value is a no-op.
    pub fn set_angle(&mut self, angle: FreeCoordinate) {
        if angle == self.angle {
            return;
        }
        self.angle = angle;
        self.transform = (angle.cos(), angle.sin());
    }

    /// Returns the anchor: the normalized point in [0, 1]² at which the world origin
    /// is placed on the viewport.
    #[inline]
    pub fn anchor(&self) -> euclid::default::Point2D<FreeCoordinate> {
        self.anchor
    }

    /// Sets the anchor point. See [`Self::anchor()`].
    #[inline]
    pub fn set_anchor(&mut self, anchor: euclid::default::Point2D<FreeCoordinate>) {
        self.anchor = anchor;
    }

    /// Projects a world point onto the viewport, including the height (z) contribution.
    ///
    /// Use this for final screen placement of an object.
    pub fn project(&self, point: WorldPoint, viewport: ViewportSize) -> ScreenPoint {
        let (t0, t1) = self.transform;
        ScreenPoint::new(
            (point.x - point.y) * t0 + viewport.width * self.anchor.x,
            (point.x + point.y) * t1 - point.z + viewport.height * self.anchor.y,
        )
    }

    /// Projects a world point onto the viewport, ignoring its height (z).
    ///
    /// Use this when depth is handled separately, such as layering by draw order
    /// rather than by vertical offset.
    pub fn project_xy(&self, point: WorldPoint, viewport: ViewportSize) -> ScreenPoint {
        let (t0, t1) = self.transform;
        ScreenPoint::new(
            (point.x - point.y) * t0 + viewport.width * self.anchor.x,
            (point.x + point.y) * t1 + viewport.height * self.anchor.y,
        )
    }

    /// Converts a screen point back to the world point which projects onto it at
    /// height `z`.
    ///
    /// The forward projection collapses one degree of freedom, so the z coordinate of
    /// the result must be chosen by the caller; pass `0.0` for the ground plane.
    ///
    /// Precondition: the projection angle must not be a multiple of π/2, or one of the
    /// cached transform coefficients is zero and the division here produces non-finite
    /// coordinates. This is not guarded internally.
    pub fn unproject(
        &self,
        point: ScreenPoint,
        viewport: ViewportRect,
        z: FreeCoordinate,
    ) -> WorldPoint {
        let (t0, t1) = self.transform;
        let x = point.x - viewport.origin.x - viewport.size.width * self.anchor.x;
        let y = point.y - viewport.origin.y - viewport.size.height * self.anchor.y + z;
        WorldPoint::new(
            x / (2. * t0) + y / (2. * t1),
            -(x / (2. * t0)) + y / (2. * t1),
            z,
        )
    }
}

impl Default for Projector {
    /// Equivalent to `Projector::new(Projector::CLASSIC)`.
    fn default() -> Self {
        Self::new(Self::CLASSIC)
    }
}

// -------------------------------------------------------------------------------------------------
