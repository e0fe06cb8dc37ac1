//! `latt` — a toolkit for constructing, combining and analysing
//! two-dimensional integer-lattice patterns.
//!
//! A [`Pattern`] is a finite, order-preserving set of [`Cell`]s. The crate
//! builds outward from there: primitive shapes ([`primitives`]), set
//! algebra and affine transforms (on `Pattern` itself), spatial
//! decomposition ([`decomposition`]), cellular automata ([`automata`]),
//! sampling strategies ([`sampling`]), Voronoi tessellation ([`voronoi`])
//! and raycasting ([`raycast`]).
//!
//! Every randomised entry point takes its RNG by `&mut impl Rng`, so
//! callers control reproducibility; [`rng::thread_rng_handle`] is a
//! convenience for callers who don't care.

pub mod automata;
pub mod cell;
pub mod decomposition;
pub mod error;
pub mod multi_pattern;
pub mod neighbourhood;
pub mod pattern;
pub mod primitives;
pub mod raycast;
pub mod rng;
pub mod sampling;
pub mod voronoi;

pub use automata::{async_iterate, iterate, iterate_to_convergence, Rule, RuleSet};
pub use cell::{Cell, Measure, MAX_COORDINATE};
pub use decomposition::{
    bsp, connected_components, convex_hull, convex_hull_points, enclosed_voids, flood_fill,
    interior_holes, max_rectangle, neighbourhood_categories,
};
pub use error::{Error, Result};
pub use multi_pattern::MultiPattern;
pub use neighbourhood::Neighbourhood;
pub use pattern::Pattern;
pub use primitives::{circle, line, quad_bezier, rectangle, square};
pub use raycast::{cast, cast_360};
pub use rng::thread_rng_handle;
pub use sampling::{sample, sample_mitchell, sample_poisson};
pub use voronoi::{voronoi, voronoi_relax};
