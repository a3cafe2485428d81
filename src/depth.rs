//! Types and algorithms for computing back-to-front draw order of volumes.
//!
//! A per-axis or sum-of-coordinates depth metric fails whenever volumes overlap on more
//! than one axis, so draw order is instead derived from a pairwise “is behind” relation
//! followed by a depth-first topological numbering.

use core::fmt;

use smallvec::SmallVec;

use crate::coord::{FreeCoordinate, WorldPoint};

// -------------------------------------------------------------------------------------------------

/// A 3D-positioned rectangular volume which can participate in draw ordering.
///
/// Implement this for whatever entity type the rendering side draws. The sorter reads
/// the position and bounds once per pass and stores nothing on the volume itself; the
/// computed order is returned as a [`DrawOrder`].
pub trait Volume {
    /// The volume's 3D position.
    fn position(&self) -> WorldPoint;

    /// Explicit physics-body bounds, if the volume has them.
    ///
    /// When present, these take precedence over [`Self::iso_bounds()`].
    fn body(&self) -> Option<IsoBounds> {
        None
    }

    /// Bounds derived from the volume's visual extent.
    fn iso_bounds(&self) -> Option<IsoBounds> {
        None
    }
}

/// The three viewer-nearest faces of a volume's axis-aligned bounding box.
///
/// Under the projection convention of [`World`](crate::coord::World), the maximal face
/// on each axis is the one nearest the viewer, so these are the box's upper bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct IsoBounds {
    /// The maximal x face.
    pub front_x: FreeCoordinate,
    /// The maximal y face.
    pub front_y: FreeCoordinate,
    /// The maximal z face.
    pub top: FreeCoordinate,
}

impl IsoBounds {
    /// Constructs an [`IsoBounds`] from the three coordinates of the viewer-nearest faces.
    #[inline]
    pub fn new(front_x: FreeCoordinate, front_y: FreeCoordinate, top: FreeCoordinate) -> Self {
        Self {
            front_x,
            front_y,
            top,
        }
    }
}

impl From<euclid::Box3D<FreeCoordinate, crate::coord::World>> for IsoBounds {
    /// Keeps the maximal corner of the box and discards the rest.
    #[inline]
    fn from(b: euclid::Box3D<FreeCoordinate, crate::coord::World>) -> Self {
        Self::new(b.max.x, b.max.y, b.max.z)
    }
}

// -------------------------------------------------------------------------------------------------

/// Tuning parameters for [`DrawOrder::compute()`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct SortOptions {
    /// Margin by which a volume's bounds are shrunk before other volumes are tested
    /// against them.
    ///
    /// A larger padding damps ordering flicker between near-coplanar volumes, at the
    /// cost of a small zone in which genuine occlusions go undetected.
    pub padding: FreeCoordinate,
}

impl SortOptions {
    /// Constructs options with the given padding.
    pub fn new(padding: FreeCoordinate) -> Self {
        Self { padding }
    }
}

impl Default for SortOptions {
    /// The default padding is 1.5, a tuned constant.
    fn default() -> Self {
        Self { padding: 1.5 }
    }
}

/// Error from [`DrawOrder::compute()`].
///
/// Silently skipping a malformed volume would corrupt the order of everything tested
/// against it, so the whole pass fails instead.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[non_exhaustive]
pub enum DepthSortError {
    /// volume {index} has neither body nor iso bounds
    MissingBounds {
        /// Position of the offending volume in the input sequence.
        index: usize,
    },
}

impl core::error::Error for DepthSortError {}

/// Statistics from one [`DrawOrder::compute()`] pass.
///
/// Format this with [`fmt::Debug`] to see its information.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct DepthSortInfo {
    /// How many volumes were ordered.
    pub volumes: usize,
    /// How many behind-relations the pairwise scan found.
    pub relations: usize,
}

// -------------------------------------------------------------------------------------------------

/// A draw order for a set of volumes: a permutation assigning each volume a
/// strictly increasing index such that volumes which must be drawn earlier
/// (because they are occluded) receive smaller indices.
///
/// Create this with [`DrawOrder::compute()`], then either read the index of each
/// volume with [`index_of()`](Self::index_of) or reorder a matching slice with
/// [`apply()`](Self::apply).
#[derive(Clone, Eq, PartialEq)]
pub struct DrawOrder {
    /// `indices[i]` is the draw-order index assigned to input volume `i`.
    indices: Vec<usize>,
    info: DepthSortInfo,
}

impl DrawOrder {
    /// Computes the draw order of `volumes`.
    ///
    /// This is a one-shot batch computation over a snapshot of the volumes' positions
    /// and bounds; invoke it again whenever positions, bounds, or membership change.
    /// The cost is O(n²) in the number of volumes, from the pairwise relation scan.
    ///
    /// Two phases:
    ///
    /// 1. For each pair, volume `b` is recorded as behind volume `a` when `b`'s
    ///    position lies strictly inside `a`'s [bounds](Volume::iso_bounds) shrunk by
    ///    [`padding`](SortOptions::padding) on every axis.
    /// 2. A depth-first post-order traversal numbers each volume only after everything
    ///    behind it has been numbered.
    ///
    /// Mutual apparent occlusion (possible when padding mis-shrinks bounds) does not
    /// cause an error; the traversal breaks such cycles at an arbitrary point and the
    /// order within the cycle is approximate.
    ///
    /// # Errors
    ///
    /// Returns [`DepthSortError::MissingBounds`] if any volume returns [`None`] from
    /// both [`Volume::body()`] and [`Volume::iso_bounds()`].
    pub fn compute<V: Volume>(volumes: &[V], options: SortOptions) -> Result<Self, DepthSortError> {
        let n = volumes.len();
        if n == 0 {
            return Ok(Self {
                indices: Vec::new(),
                info: DepthSortInfo::default(),
            });
        }
        let SortOptions { padding } = options;

        // Phase 1: pairwise behind-relation. behind[a] lists the volumes which must be
        // drawn before a.
        let mut behind: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); n];
        let mut relations = 0;
        for (ai, a) in volumes.iter().enumerate() {
            let bounds = a
                .body()
                .or_else(|| a.iso_bounds())
                .ok_or(DepthSortError::MissingBounds { index: ai })?;
            for (bi, b) in volumes.iter().enumerate() {
                if bi == ai {
                    continue;
                }
                let position = b.position();
                if position.x + padding < bounds.front_x - padding
                    && position.y + padding < bounds.front_y - padding
                    && position.z + padding < bounds.top - padding
                {
                    behind[ai].push(bi);
                    relations += 1;
                }
            }
        }

        // Phase 2: depth-first post-order numbering. The visited flag is the once-only
        // guard; revisiting a volume already on the recursion stack (a cycle) is a
        // no-op rather than infinite recursion.
        let mut scratch = Scratch {
            behind,
            visited: vec![false; n],
            indices: vec![0; n],
            counter: 0,
        };
        for i in 0..n {
            scratch.visit(i);
        }
        debug_assert_eq!(scratch.counter, n);

        let info = DepthSortInfo {
            volumes: n,
            relations,
        };
        log::trace!("depth sort pass: {info:?}");
        Ok(Self {
            indices: scratch.indices,
            info,
        })
    }

    /// Returns the draw-order index assigned to the volume at `input_index` in the
    /// sequence passed to [`compute()`](Self::compute).
    ///
    /// Panics if `input_index` is out of range.
    #[inline]
    pub fn index_of(&self, input_index: usize) -> usize {
        self.indices[input_index]
    }

    /// The assigned indices as a slice parallel to the input sequence:
    /// `as_slice()[i]` is the draw-order index of input volume `i`.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Number of volumes this order covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether this order covers no volumes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Statistics from the pass which produced this order.
    #[inline]
    pub fn info(&self) -> DepthSortInfo {
        self.info
    }

    /// Returns the input indices of the volumes in drawing order, rearmost first.
    pub fn back_to_front(&self) -> impl Iterator<Item = usize> + use<> {
        let mut order: Vec<usize> = vec![0; self.indices.len()];
        for (input_index, &depth) in self.indices.iter().enumerate() {
            order[depth] = input_index;
        }
        order.into_iter()
    }

    /// Reorders `items` in place so that it runs back-to-front, as a convenience for
    /// callers keeping their volumes in a plain ordered collection.
    ///
    /// `items` need not be the volumes themselves, merely parallel to the input
    /// sequence that was sorted.
    ///
    /// Panics if `items` is not the same length as the sorted input.
    pub fn apply<T>(&self, items: &mut [T]) {
        assert_eq!(
            items.len(),
            self.indices.len(),
            "DrawOrder::apply() slice length must match the sorted input"
        );
        // Cycle-chasing permutation application: repeatedly move the element at i
        // toward its destination until i holds the element destined for it.
        let mut destination = self.indices.clone();
        for i in 0..destination.len() {
            while destination[i] != i {
                let j = destination[i];
                items.swap(i, j);
                destination.swap(i, j);
            }
        }
    }
}

impl fmt::Debug for DrawOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawOrder")
            .field("indices", &self.indices)
            .field("info", &self.info)
            .finish()
    }
}

/// Per-pass working state for the topological traversal. Allocated fresh each pass so
/// nothing can leak between passes when group membership changes.
struct Scratch {
    behind: Vec<SmallVec<[usize; 4]>>,
    visited: Vec<bool>,
    indices: Vec<usize>,
    counter: usize,
}

impl Scratch {
    /// Recursion depth is bounded by the longest occlusion chain, at most the number
    /// of volumes.
    fn visit(&mut self, i: usize) {
        if self.visited[i] {
            return;
        }
        self.visited[i] = true;
        let behind = core::mem::take(&mut self.behind[i]);
        for &j in &behind {
            self.visit(j);
        }
        self.indices[i] = self.counter;
        self.counter += 1;
    }
}

// -------------------------------------------------------------------------------------------------
