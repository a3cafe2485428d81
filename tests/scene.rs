//! End-to-end exercise of the public API: projecting a small scene and ordering it.

use axonometry::euclid::{Box3D, point3, rect};
use axonometry::{
    DrawOrder, FreeCoordinate, IsoBounds, Projector, SortOptions, Volume, World, WorldPoint,
};
use itertools::Itertools as _;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

#[derive(Clone, Debug)]
struct Prop {
    bounds: Box3D<FreeCoordinate, World>,
}

impl Prop {
    fn cube(x: FreeCoordinate, y: FreeCoordinate, z: FreeCoordinate, size: FreeCoordinate) -> Self {
        Self {
            bounds: Box3D::new(point3(x, y, z), point3(x + size, y + size, z + size)),
        }
    }
}

impl Volume for Prop {
    fn position(&self) -> WorldPoint {
        self.bounds.min
    }

    fn iso_bounds(&self) -> Option<IsoBounds> {
        Some(IsoBounds::from(self.bounds))
    }
}

#[test]
fn scene_projects_and_orders() {
    let projector = Projector::default();
    let viewport = rect(0., 0., 800., 600.);

    // A row of crates receding along the world diagonal.
    let props: Vec<Prop> = (0..5)
        .map(|i| Prop::cube(f64::from(i) * 10., f64::from(i) * 10., 0., 6.))
        .collect();

    let order = DrawOrder::compute(&props, SortOptions::default()).unwrap();
    // Each crate is behind the next, so draw order follows the diagonal.
    for i in 1..props.len() {
        assert!(order.index_of(i - 1) < order.index_of(i));
    }

    // The projected anchor points of the diagonal all share a screen x (x and y world
    // offsets cancel) and descend the screen as they approach the viewer.
    let screen: Vec<_> = props
        .iter()
        .map(|p| projector.project(p.position(), viewport.size))
        .collect();
    for pair in screen.windows(2) {
        assert_eq!(pair[0].x, pair[1].x);
        assert!(pair[0].y < pair[1].y);
    }

    // And those screen points unproject back to where the crates stand.
    for (prop, projected) in props.iter().zip(&screen) {
        let recovered = projector.unproject(*projected, viewport, prop.position().z);
        assert!((recovered - prop.position()).length() < 1e-9);
    }
}

#[test]
fn randomized_scenes_always_yield_permutations() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0001);
    for n in [1usize, 2, 7, 40] {
        let props: Vec<Prop> = (0..n)
            .map(|_| {
                Prop::cube(
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(1.0..20.0),
                )
            })
            .collect();
        let order = DrawOrder::compute(&props, SortOptions::default()).unwrap();
        assert_eq!(order.len(), n);
        // Indices must be a complete permutation of 0..n even when the relation graph
        // contains cycles that the traversal had to break.
        let sorted: Vec<usize> = order.as_slice().iter().copied().sorted().collect();
        assert_eq!(sorted, (0..n).collect::<Vec<usize>>());
    }
}

#[test]
fn reordering_matches_assigned_indices() {
    let mut props = vec![
        Prop::cube(20., 20., 0., 6.),
        Prop::cube(0., 0., 0., 6.),
        Prop::cube(10., 10., 0., 6.),
    ];
    let order = DrawOrder::compute(&props, SortOptions::default()).unwrap();
    order.apply(&mut props);
    let xs: Vec<FreeCoordinate> = props.iter().map(|p| p.position().x).collect();
    assert_eq!(xs, vec![0., 10., 20.]);
}
