use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::settings::SettingsNavigation;

/// Scale + translate mapping between canvas (model) coordinates and screen coordinates.
///
/// Model locations are never rewritten by zooming or panning: `screen = canvas * zoom + pan`.
/// The zoom factor is kept inside `[min_zoom, max_zoom]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Current zoom factor
    zoom: f32,
    /// Current pan offset, in screen units
    pan: Vec2,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(&SettingsNavigation::default())
    }
}

impl ViewTransform {
    pub fn new(nav: &SettingsNavigation) -> Self {
        Self {
            zoom: 1.,
            pan: Vec2::ZERO,
            min_zoom: nav.min_zoom.min(nav.max_zoom),
            max_zoom: nav.max_zoom.max(nav.min_zoom),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.zoom
    }

    pub fn canvas_to_screen_rect(&self, rect: Rect) -> Rect {
        Rect::from_min_max(
            self.canvas_to_screen_pos(rect.min),
            self.canvas_to_screen_pos(rect.max),
        )
    }

    pub fn screen_to_canvas_pos(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    /// Converts a pointer drag delta into canvas units.
    pub fn screen_to_canvas_delta(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Scales the view by `factor` around the screen point `pivot`, which stays fixed on screen.
    ///
    /// Returns the factor actually applied: it is smaller than requested when the zoom range
    /// limits it, and `1.0` for non-positive or non-finite factors.
    pub fn zoom_about(&mut self, pivot: Pos2, factor: f32) -> f32 {
        if !factor.is_finite() || factor <= 0. {
            return 1.;
        }
        let new_zoom = (self.zoom * factor).max(self.min_zoom).min(self.max_zoom);
        let applied = new_zoom / self.zoom;
        let p = pivot.to_vec2();
        self.pan = p + (self.pan - p) * applied;
        self.zoom = new_zoom;
        applied
    }

    /// Shifts the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        self.zoom = 1.;
        self.pan = Vec2::ZERO;
    }
}
