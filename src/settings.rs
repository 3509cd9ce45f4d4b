use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::layouts::force_directed::ForceDirectedState;

/// Logical extent of a drawing surface. Layout passes keep everything inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsCanvas {
    pub width: f32,
    pub height: f32,
}

impl Default for SettingsCanvas {
    fn default() -> Self {
        Self {
            width: 1200.,
            height: 700.,
        }
    }
}

impl SettingsCanvas {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(self.width, self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsNode {
    /// Visual radius; also the margin kept from canvas edges
    pub radius: f32,
}

impl Default for SettingsNode {
    fn default() -> Self {
        Self { radius: 60. }
    }
}

/// Frame box geometry. Box height grows with the number of slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsFrame {
    pub width: f32,
    pub base_height: f32,
    pub slot_row_height: f32,
    pub header_height: f32,

    /// Box height assumed by placement, before any slot exists
    pub placement_height: f32,

    /// Where new frames are placed when the caller gives no hint
    pub default_hint: Pos2,
}

impl Default for SettingsFrame {
    fn default() -> Self {
        Self {
            width: 200.,
            base_height: 80.,
            slot_row_height: 20.,
            header_height: 30.,
            placement_height: 150.,
            default_hint: Pos2::new(200., 200.),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsPlacement {
    /// Spiral probes tried before the random fallback
    pub max_attempts: usize,

    /// Angle increment per probe for new nodes, in radians
    pub node_angle_step: f32,

    /// Angle increment used when resolving a dropped, dragged node
    pub drag_angle_step: f32,

    /// Angle increment per probe for new frames
    pub frame_angle_step: f32,

    /// Minimum node distance as a multiple of the node radius
    pub node_separation_factor: f32,

    pub frame_base_radius: f32,

    pub frame_min_separation: f32,
}

impl Default for SettingsPlacement {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            node_angle_step: 0.5,
            drag_angle_step: 0.6,
            frame_angle_step: 0.5,
            node_separation_factor: 2.2,
            frame_base_radius: 150.,
            frame_min_separation: 250.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsNavigation {
    /// Multiplicative factor of one wheel tick
    pub zoom_step: f32,

    pub min_zoom: f32,

    pub max_zoom: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            min_zoom: 0.1,
            max_zoom: 10.,
        }
    }
}

/// Every tunable of the editor in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub network_canvas: SettingsCanvas,
    pub frames_canvas: SettingsCanvas,
    pub node: SettingsNode,
    pub frame: SettingsFrame,
    pub placement: SettingsPlacement,
    pub navigation: SettingsNavigation,
    pub force: ForceDirectedState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rect_starts_at_origin() {
        let r = SettingsCanvas::default().rect();
        assert_eq!(r.min, Pos2::ZERO);
        assert_eq!(r.max, Pos2::new(1200., 700.));
    }
}
