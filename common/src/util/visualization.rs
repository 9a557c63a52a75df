use crate::db::core::{Grid, NodeKind, WireLayer};
use crate::db::writer::collect_segments;
use crate::geom::coord::GridCoord;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

/// Renders the routed grid to a PNG, `scale` pixels per grid step.
/// Row 0 is drawn at the bottom.
pub fn draw_routed_grid(grid: &Grid, filename: &Path, scale: u32) -> image::ImageResult<()> {
    let scale = scale.max(2);
    let side = grid.size().max(1) * scale;
    let mut img = RgbImage::from_pixel(side, side, Rgb([20, 20, 20]));

    let map = |c: GridCoord| {
        let half = scale as f32 / 2.0;
        (
            c.x as f32 * scale as f32 + half,
            side as f32 - (c.y as f32 * scale as f32 + half),
        )
    };

    let grid_color = Rgb([40, 40, 45]);
    if scale >= 6 {
        for k in 0..grid.size() {
            let (x, _) = map(GridCoord::new(k, 0));
            let (_, y) = map(GridCoord::new(0, k));
            draw_line_segment_mut(&mut img, (x, 0.0), (x, side as f32), grid_color);
            draw_line_segment_mut(&mut img, (0.0, y), (side as f32, y), grid_color);
        }
    }

    // Horizontal: Red, Vertical: Green
    let horizontal_color = Rgb([255, 20, 80]);
    let vertical_color = Rgb([0, 255, 100]);
    for seg in collect_segments(grid) {
        let color = match seg.layer {
            WireLayer::Horizontal => horizontal_color,
            WireLayer::Vertical => vertical_color,
        };
        draw_line_segment_mut(&mut img, map(seg.p1), map(seg.p2), color);
    }

    let pin_color = Rgb([255, 255, 255]);
    let pseudo_color = Rgb([255, 215, 0]);
    let marker = (scale / 2).max(2);
    for node in grid.nodes() {
        let (px, py) = map(node.pos);
        let rect = ImageRect::at(px as i32 - marker as i32 / 2, py as i32 - marker as i32 / 2)
            .of_size(marker, marker);
        let color = match node.kind {
            NodeKind::Pseudo => pseudo_color,
            _ => pin_color,
        };
        draw_filled_rect_mut(&mut img, rect, color);
    }

    img.save(filename)
}
