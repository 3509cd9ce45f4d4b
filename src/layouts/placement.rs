use egui::{Pos2, Rect, Vec2};
use rand::Rng;

use crate::settings::{Settings, SettingsPlacement};

/// Parameters of the spiral probe sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral {
    /// Radius of the first ring; ring `n` (0-based) has radius `base_radius * (n + 1)`
    pub base_radius: f32,
    /// Angle added per probe, in radians
    pub angle_step: f32,
    /// Probes per ring
    pub ring_size: usize,
    pub max_attempts: usize,
}

impl Spiral {
    /// Probe `attempt` relative to `center`.
    pub fn candidate(&self, center: Pos2, attempt: usize) -> Pos2 {
        let radius = self.base_radius * (attempt / self.ring_size + 1) as f32;
        let angle = attempt as f32 * self.angle_step;
        center + radius * Vec2::angled(angle)
    }
}

/// How a position was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Collision-free spiral probe with this index
    Spiral { attempt: usize },
    /// Every probe failed; uniformly random inside bounds, collisions possible
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    pub location: Pos2,
    pub strategy: Strategy,
}

/// Finds a spot for a new entity near a preferred center.
///
/// Probes a deterministic spiral around the center and takes the first candidate that is inside
/// the canvas (minus a margin) and at least `min_separation` away from every occupied position.
/// When the spiral is exhausted the search falls back to a random position drawn from the caller's
/// RNG. It never fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSearch {
    spiral: Spiral,
    min_separation: f32,
    /// Canvas shrunk by the margin; may be inverted when the margin is too large
    bounds: Rect,
}

impl PlacementSearch {
    pub fn new(canvas: Rect, margin: Vec2, min_separation: f32, spiral: Spiral) -> Self {
        Self {
            spiral,
            min_separation,
            bounds: canvas.shrink2(margin),
        }
    }

    /// Node insertion: radius-sized rings and margin, `separation_factor * radius` apart.
    pub fn for_nodes(settings: &Settings) -> Self {
        let r = settings.node.radius;
        Self::node_like(settings, settings.placement.node_angle_step, r)
    }

    /// Same as [`Self::for_nodes`] with the tighter drag angle step.
    pub fn for_drag(settings: &Settings) -> Self {
        let r = settings.node.radius;
        Self::node_like(settings, settings.placement.drag_angle_step, r)
    }

    /// Frame insertion: half the frame box as margin, fixed minimum separation.
    pub fn for_frames(settings: &Settings) -> Self {
        let p: &SettingsPlacement = &settings.placement;
        let margin = Vec2::new(
            settings.frame.width / 2.,
            settings.frame.placement_height / 2.,
        );
        Self::new(
            settings.frames_canvas.rect(),
            margin,
            p.frame_min_separation,
            Spiral {
                base_radius: p.frame_base_radius,
                angle_step: p.frame_angle_step,
                ring_size: 10,
                max_attempts: p.max_attempts,
            },
        )
    }

    fn node_like(settings: &Settings, angle_step: f32, radius: f32) -> Self {
        let p = &settings.placement;
        Self::new(
            settings.network_canvas.rect(),
            Vec2::splat(radius),
            radius * p.node_separation_factor,
            Spiral {
                base_radius: radius,
                angle_step,
                ring_size: 10,
                max_attempts: p.max_attempts,
            },
        )
    }

    pub fn spiral(&self) -> &Spiral {
        &self.spiral
    }

    pub fn min_separation(&self) -> f32 {
        self.min_separation
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn find<R: Rng>(&self, center: Pos2, occupied: &[Pos2], rng: &mut R) -> Placed {
        if let Some(placed) = self.find_on_spiral(center, occupied) {
            return placed;
        }
        Placed {
            location: self.random_inside(rng),
            strategy: Strategy::Fallback,
        }
    }

    /// The deterministic part of [`Self::find`].
    pub fn find_on_spiral(&self, center: Pos2, occupied: &[Pos2]) -> Option<Placed> {
        (0..self.spiral.max_attempts).find_map(|attempt| {
            let candidate = self.spiral.candidate(center, attempt);
            if !self.bounds.contains(candidate) {
                return None;
            }
            let collides = occupied
                .iter()
                .any(|p| p.distance(candidate) < self.min_separation);
            (!collides).then_some(Placed {
                location: candidate,
                strategy: Strategy::Spiral { attempt },
            })
        })
    }

    fn random_inside<R: Rng>(&self, rng: &mut R) -> Pos2 {
        let b = self.bounds;
        let x = if b.min.x <= b.max.x {
            rng.random_range(b.min.x..=b.max.x)
        } else {
            b.center().x
        };
        let y = if b.min.y <= b.max.y {
            rng.random_range(b.min.y..=b.max.y)
        } else {
            b.center().y
        };
        Pos2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn nodes() -> PlacementSearch {
        PlacementSearch::for_nodes(&Settings::default())
    }

    #[test]
    fn empty_canvas_takes_first_probe() {
        let mut rng = StdRng::seed_from_u64(1);
        let placed = nodes().find(Pos2::new(600., 350.), &[], &mut rng);
        assert_eq!(placed.strategy, Strategy::Spiral { attempt: 0 });
        assert_eq!(placed.location, Pos2::new(660., 350.));
    }

    #[test]
    fn rings_grow_every_ten_probes() {
        let s = nodes().spiral;
        let c = Pos2::new(500., 500.);
        assert!((s.candidate(c, 9).distance(c) - 60.).abs() < 1e-3);
        assert!((s.candidate(c, 10).distance(c) - 120.).abs() < 1e-3);
        assert!((s.candidate(c, 25).distance(c) - 180.).abs() < 1e-3);
    }

    #[test]
    fn keeps_separation_from_spread_nodes() {
        let search = nodes();
        let r = 60.;
        // pairwise 4r apart, hint exactly between two of them
        let occupied = [
            Pos2::new(300., 350.),
            Pos2::new(540., 350.),
            Pos2::new(780., 350.),
            Pos2::new(540., 110.),
        ];
        let placed = search
            .find_on_spiral(Pos2::new(420., 350.), &occupied)
            .unwrap();
        for p in occupied {
            assert!(placed.location.distance(p) >= 2.2 * r);
        }
        assert!(search.bounds().contains(placed.location));
    }

    #[test]
    fn spiral_results_always_separated_and_inside() {
        let search = nodes();
        let mut rng = StdRng::seed_from_u64(7);
        let mut occupied = Vec::new();
        for i in 0..12 {
            let hint = Pos2::new(200. + (i * 70) as f32, 300.);
            let placed = search.find(hint, &occupied, &mut rng);
            assert!(search.bounds().contains(placed.location));
            if let Strategy::Spiral { .. } = placed.strategy {
                for p in &occupied {
                    assert!(placed.location.distance(*p) >= search.min_separation());
                }
            }
            occupied.push(placed.location);
        }
    }

    #[test]
    fn crowded_canvas_falls_back_reproducibly() {
        let search = nodes();
        let mut occupied = Vec::new();
        for x in (0..=1200).step_by(40) {
            for y in (0..=700).step_by(40) {
                occupied.push(Pos2::new(x as f32, y as f32));
            }
        }
        let hint = Pos2::new(600., 350.);
        let a = search.find(hint, &occupied, &mut StdRng::seed_from_u64(42));
        let b = search.find(hint, &occupied, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.strategy, Strategy::Fallback);
        assert_eq!(a, b);
        assert!(search.bounds().contains(a.location));
    }

    #[test]
    fn inverted_bounds_fall_back_to_center() {
        let search = PlacementSearch::new(
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.)),
            Vec2::splat(60.),
            10.,
            nodes().spiral,
        );
        let placed = search.find(Pos2::new(50., 50.), &[], &mut StdRng::seed_from_u64(0));
        assert_eq!(placed.strategy, Strategy::Fallback);
        assert_eq!(placed.location, Pos2::new(50., 50.));
    }

    #[test]
    fn frames_use_wide_separation() {
        let search = PlacementSearch::for_frames(&Settings::default());
        let first = search
            .find_on_spiral(Pos2::new(200., 200.), &[])
            .unwrap();
        assert_eq!(first.location, Pos2::new(350., 200.));
        let second = search
            .find_on_spiral(Pos2::new(200., 200.), &[first.location])
            .unwrap();
        assert!(second.location.distance(first.location) >= 250.);
    }
}
