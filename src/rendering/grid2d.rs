use bevy_egui::egui::{Color32, CornerRadius, Painter, Rect, Stroke, StrokeKind, pos2, vec2};
use std::collections::HashSet;

use super::fit::GridFit;

/// Panel background, shared by every 2D view.
pub const BACKGROUND: Color32 = Color32::from_rgb(15, 18, 23);

const BLOCK: Color32 = Color32::from_rgba_premultiplied(242, 116, 23, 242);
const HIGHLIGHT: Color32 = Color32::from_rgba_premultiplied(64, 39, 15, 64);
const BORDER: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 89);
const GRIDLINE: Color32 = Color32::from_rgba_premultiplied(15, 15, 15, 15);
const AXIS: Color32 = Color32::from_rgba_premultiplied(71, 34, 7, 71);
const MARK_TINT: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 115);
const MARK_STROKE: Color32 = Color32::from_rgb(232, 242, 255);

/// Per-view block styling. The circle planner paints a top highlight strip
/// for a pseudo-3D look; the dome layer view strokes a thin dark border
/// instead, matching smaller cells.
#[derive(Debug, Clone, Copy)]
pub struct GridStyle {
    /// Minimum cell size before the highlight strip is drawn.
    highlight_min: Option<i32>,
    /// Minimum cell size before the inset border is drawn.
    border_min: Option<i32>,
}

impl GridStyle {
    pub fn circle() -> Self {
        Self {
            highlight_min: Some(6),
            border_min: None,
        }
    }

    pub fn layer() -> Self {
        Self {
            highlight_min: None,
            border_min: Some(3),
        }
    }
}

pub fn paint_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, CornerRadius::ZERO, BACKGROUND);
}

/// Paint every true cell as a block square.
pub fn paint_blocks(painter: &Painter, fit: &GridFit, grid: &[Vec<bool>], style: &GridStyle) {
    let cell = fit.cell;
    for (z, row) in grid.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            if !filled {
                continue;
            }
            let rect = fit.cell_rect(x as u32, z as u32);
            painter.rect_filled(rect, CornerRadius::ZERO, BLOCK);

            if let Some(min) = style.highlight_min
                && cell >= min
            {
                let strip = (cell as f32 * 0.35).floor().max(1.0);
                painter.rect_filled(
                    Rect::from_min_size(rect.min, vec2(rect.width(), strip)),
                    CornerRadius::ZERO,
                    HIGHLIGHT,
                );
            }
            if let Some(min) = style.border_min
                && cell >= min
            {
                painter.rect_stroke(
                    rect.shrink(0.5),
                    CornerRadius::ZERO,
                    Stroke::new(1.0, BORDER),
                    StrokeKind::Inside,
                );
            }
        }
    }
}

/// Faint gridlines, half-pixel aligned so 1 px strokes stay crisp. Skipped
/// below 5 px cells where they would just smear.
pub fn paint_gridlines(painter: &Painter, fit: &GridFit) {
    if fit.cell < 5 {
        return;
    }
    let map = fit.map_rect();
    let stroke = Stroke::new(1.0, GRIDLINE);
    for i in 0..=fit.size {
        let x = fit.origin.x + (i as i32 * fit.cell) as f32 + 0.5;
        painter.line_segment([pos2(x, map.top()), pos2(x, map.bottom())], stroke);
        let y = fit.origin.y + (i as i32 * fit.cell) as f32 + 0.5;
        painter.line_segment([pos2(map.left(), y), pos2(map.right(), y)], stroke);
    }
}

/// Center-crossing axis lines through the middle cell.
pub fn paint_axes(painter: &Painter, fit: &GridFit) {
    let map = fit.map_rect();
    let mid = (fit.size / 2) as f32;
    let width = (fit.cell as f32 / 10.0).floor().max(1.0);
    let stroke = Stroke::new(width, AXIS);

    let ax = fit.origin.x + (mid + 0.5) * fit.cell as f32;
    painter.line_segment([pos2(ax, map.top()), pos2(ax, map.bottom())], stroke);
    let ay = fit.origin.y + (mid + 0.5) * fit.cell as f32;
    painter.line_segment([pos2(map.left(), ay), pos2(map.right(), ay)], stroke);
}

/// Overlay for user-marked "done" cells: dark tint plus a checkmark once
/// the cell is big enough to read one.
pub fn paint_marks(painter: &Painter, fit: &GridFit, marked: &HashSet<(i32, i32)>) {
    let mid = (fit.size / 2) as i32;
    for &(x, z) in marked {
        let (col, row) = (x + mid, z + mid);
        if col < 0 || row < 0 || col >= fit.size as i32 || row >= fit.size as i32 {
            continue;
        }
        let rect = fit.cell_rect(col as u32, row as u32);
        painter.rect_filled(rect, CornerRadius::ZERO, MARK_TINT);

        if fit.cell >= 7 {
            let stroke = Stroke::new((fit.cell as f32 / 8.0).max(1.0), MARK_STROKE);
            let at = |fx: f32, fy: f32| rect.min + vec2(rect.width() * fx, rect.height() * fy);
            painter.line_segment([at(0.22, 0.55), at(0.42, 0.74)], stroke);
            painter.line_segment([at(0.42, 0.74), at(0.78, 0.28)], stroke);
        }
    }
}
