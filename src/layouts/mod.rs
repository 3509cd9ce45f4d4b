pub mod force_directed;

mod grid;
mod placement;
mod tiered;

use egui::{Pos2, Rect};

pub use grid::{grid_layout, grid_positions};
pub use placement::{Placed, PlacementSearch, Spiral, Strategy};
pub use tiered::tiered_layout;

/// Clamps `p` into `bounds`. An inverted `bounds` pins the point to its `min` corner.
pub(crate) fn clamp_into(bounds: Rect, p: Pos2) -> Pos2 {
    Pos2::new(
        bounds.min.x.max(bounds.max.x.min(p.x)),
        bounds.min.y.max(bounds.max.y.min(p.y)),
    )
}
