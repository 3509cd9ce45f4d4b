use egui::{Pos2, Rect};

use crate::{GraphModel, NodeKind};

/// Puts every node on a horizontal row picked by its kind: classes at the top, objects in the
/// middle and properties at the bottom. `row_inset` is the distance of the outer rows from the
/// canvas edges. Nodes of a row are spread with equal gaps in insertion order.
pub fn tiered_layout(g: &mut GraphModel, canvas: Rect, row_inset: f32) {
    for kind in NodeKind::ALL {
        let y = match kind {
            NodeKind::Class => canvas.min.y + row_inset,
            NodeKind::Object => canvas.center().y,
            NodeKind::Property => canvas.max.y - row_inset,
        };
        let names: Vec<String> = g
            .nodes()
            .filter(|n| n.kind() == kind)
            .map(|n| n.name().to_string())
            .collect();
        let spacing = canvas.width() / (names.len() + 1) as f32;
        for (i, name) in names.iter().enumerate() {
            let x = canvas.min.x + spacing * (i + 1) as f32;
            // names come from the model itself
            let _ = g.set_location(name, Pos2::new(x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    #[test]
    fn rows_by_kind() {
        let mut g = GraphModel::new();
        g.add_node("bird", NodeKind::Class, Pos2::ZERO).unwrap();
        g.add_node("canary", NodeKind::Object, Pos2::ZERO).unwrap();
        g.add_node("penguin", NodeKind::Object, Pos2::ZERO).unwrap();
        g.add_node("sing", NodeKind::Property, Pos2::ZERO).unwrap();

        let canvas = Rect::from_min_size(Pos2::ZERO, Vec2::new(1200., 700.));
        tiered_layout(&mut g, canvas, 80.);

        assert_eq!(g.node("bird").unwrap().location(), Pos2::new(600., 80.));
        assert_eq!(g.node("canary").unwrap().location(), Pos2::new(400., 350.));
        assert_eq!(g.node("penguin").unwrap().location(), Pos2::new(800., 350.));
        assert_eq!(g.node("sing").unwrap().location(), Pos2::new(600., 620.));
    }
}
