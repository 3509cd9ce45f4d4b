//! Colors and box sizes the renderer derives from the model. Nothing here is stored on elements.

use egui::{Color32, Pos2, Rect, Vec2};

use crate::{settings::SettingsFrame, Frame, FrameKind, NodeKind, RelationKind};

pub fn node_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Class => Color32::from_rgb(173, 216, 230),
        NodeKind::Object => Color32::from_rgb(144, 238, 144),
        NodeKind::Property => Color32::from_rgb(255, 255, 224),
    }
}

pub fn relation_color(kind: RelationKind) -> Color32 {
    match kind {
        RelationKind::IsA => Color32::BLUE,
        RelationKind::Has => Color32::from_rgb(0, 128, 0),
        RelationKind::CanDo => Color32::RED,
        RelationKind::HasColor => Color32::BLACK,
    }
}

pub fn frame_color(kind: FrameKind) -> Color32 {
    match kind {
        FrameKind::ClassFrame => Color32::from_rgb(0xff, 0xcc, 0x99),
        FrameKind::ObjectFrame => Color32::from_rgb(0xcc, 0xff, 0xcc),
    }
}

/// Box size of a frame: fixed width, height growing by one row per slot.
pub fn frame_size(slot_count: usize, s: &SettingsFrame) -> Vec2 {
    Vec2::new(
        s.width,
        s.base_height + slot_count as f32 * s.slot_row_height,
    )
}

/// Box of a frame centered on its location, in canvas coordinates.
pub fn frame_rect(frame: &Frame, s: &SettingsFrame) -> Rect {
    Rect::from_center_size(frame.location(), frame_size(frame.slot_count(), s))
}

/// Left anchors of the slot text rows of a frame box, top to bottom.
pub fn slot_row_anchors(frame: &Frame, s: &SettingsFrame) -> Vec<Pos2> {
    let rect = frame_rect(frame, s);
    let first = rect.min.y + s.header_height + s.slot_row_height * 0.75;
    (0..frame.slot_count())
        .map(|i| Pos2::new(rect.min.x + 10., first + i as f32 * s.slot_row_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_grows_with_slots() {
        let s = SettingsFrame::default();
        assert_eq!(frame_size(0, &s), Vec2::new(200., 80.));
        assert_eq!(frame_size(5, &s), Vec2::new(200., 180.));
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        let nodes: Vec<_> = NodeKind::ALL.into_iter().map(node_color).collect();
        assert!(nodes[0] != nodes[1] && nodes[1] != nodes[2] && nodes[0] != nodes[2]);
        assert_ne!(
            frame_color(FrameKind::ClassFrame),
            frame_color(FrameKind::ObjectFrame)
        );
        assert_eq!(relation_color(RelationKind::IsA), Color32::BLUE);
    }
}
