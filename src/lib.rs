//! Axonometric (isometric/dimetric/military) projection of 3D coordinates onto a 2D
//! viewport, and occlusion-based draw ordering of 3D-positioned volumes rendered in 2D.
//!
//! This library contains two independent pieces:
//!
//! * [`Projector`] converts between 3D world coordinates and 2D screen coordinates
//!   using a configurable projection angle and anchor.
//! * [`DrawOrder`] computes a back-to-front drawing order over a set of [`Volume`]s,
//!   using a pairwise “is behind” relation and a depth-first topological numbering —
//!   necessary because no single depth metric orders volumes correctly once they
//!   overlap on more than one axis.
//!
//! It knows nothing about rendering; callers feed it positions, bounding boxes, and
//! viewport dimensions, and consume the screen points and indices it produces.
//! All operations are synchronous and single-threaded; re-invoke
//! [`DrawOrder::compute()`] whenever the volume set or its positions change.

mod coord;
pub use coord::*;

mod projection;
pub use projection::Projector;

mod depth;
pub use depth::{DepthSortError, DepthSortInfo, DrawOrder, IsoBounds, SortOptions, Volume};

// reexport for convenience of callers constructing points
pub use euclid;
