use egui::{Pos2, Rect};

use crate::FrameModel;

/// Cell centers of a near-square grid holding `count` items, row by row.
///
/// With `cols = ceil(sqrt(count))` and `rows = ceil(count / cols)` the canvas is split into
/// `cols + 1` and `rows + 1` equal gaps, so no cell sits on an edge.
pub fn grid_positions(count: usize, canvas: Rect) -> Vec<Pos2> {
    if count == 0 {
        return Vec::new();
    }
    let cols = (count as f32).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let col_spacing = canvas.width() / (cols + 1) as f32;
    let row_spacing = canvas.height() / (rows + 1) as f32;

    (0..count)
        .map(|i| {
            let (col, row) = (i % cols, i / cols);
            Pos2::new(
                canvas.min.x + col_spacing * (col + 1) as f32,
                canvas.min.y + row_spacing * (row + 1) as f32,
            )
        })
        .collect()
}

/// Places frames on [`grid_positions`] in insertion order.
pub fn grid_layout(frames: &mut FrameModel, canvas: Rect) {
    let positions = grid_positions(frames.len(), canvas);
    for (frame, loc) in frames.frames_mut().zip(positions) {
        frame.set_location(loc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameKind;
    use egui::Vec2;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(1200., 700.))
    }

    #[test]
    fn four_frames_make_two_by_two() {
        let p = grid_positions(4, canvas());
        assert_eq!(
            p,
            vec![
                Pos2::new(400., 700. / 3.),
                Pos2::new(800., 700. / 3.),
                Pos2::new(400., 1400. / 3.),
                Pos2::new(800., 1400. / 3.),
            ]
        );
    }

    #[test]
    fn five_frames_use_three_columns_two_rows() {
        let p = grid_positions(5, canvas());
        assert_eq!(p.len(), 5);
        assert_eq!(p[0], Pos2::new(300., 700. / 3.));
        assert_eq!(p[3], Pos2::new(300., 1400. / 3.));
        assert_eq!(p[4], Pos2::new(600., 1400. / 3.));
    }

    #[test]
    fn single_frame_is_centered() {
        assert_eq!(grid_positions(1, canvas()), vec![Pos2::new(600., 350.)]);
        assert!(grid_positions(0, canvas()).is_empty());
    }

    #[test]
    fn layout_follows_insertion_order() {
        let mut m = FrameModel::new();
        for name in ["c", "a", "b"] {
            m.create_frame(name, FrameKind::ObjectFrame, Pos2::ZERO)
                .unwrap();
        }
        grid_layout(&mut m, canvas());
        let xs: Vec<_> = m.frames().map(|f| f.location().x).collect();
        assert_eq!(xs, vec![400., 800., 400.]);
        assert_eq!(m.frame("b").unwrap().location().y, 1400. / 3.);
    }
}
