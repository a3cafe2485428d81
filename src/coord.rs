//! Numeric types used for coordinates and related quantities.

use euclid::{Point2D, Point3D, Rect, Size2D, Vector2D, Vector3D};

/// Scalar type for all continuous coordinates, world and screen alike.
pub type FreeCoordinate = f64;

/// Unit-of-measure type for 3D world space; the space volumes are positioned in.
///
/// In this coordinate system, x and y span the ground plane and z points up.
/// Under projection, increasing x or y moves toward the viewer, so the point
/// with the greatest coordinates on all three axes is the nearest one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum World {}

/// Unit-of-measure type for projected 2D screen space.
///
/// Screen y increases downward, as is conventional for pixel coordinate systems.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum Screen {}

/// Positions in world space.
pub type WorldPoint = Point3D<FreeCoordinate, World>;

/// Vectors in world space.
pub type WorldVector = Vector3D<FreeCoordinate, World>;

/// Positions in projected screen space.
pub type ScreenPoint = Point2D<FreeCoordinate, Screen>;

/// Vectors in projected screen space.
pub type ScreenVector = Vector2D<FreeCoordinate, Screen>;

/// Dimensions of the output viewport, in screen units.
pub type ViewportSize = Size2D<FreeCoordinate, Screen>;

/// Placement and dimensions of the output viewport, in screen units.
///
/// [`Projector::unproject()`](crate::Projector::unproject) needs the origin as well as the
/// size, so it takes this instead of a [`ViewportSize`].
pub type ViewportRect = Rect<FreeCoordinate, Screen>;
