use bevy::math::Vec3;
use bevy::prelude::Resource;
use bevy_egui::egui::{self, Color32, CornerRadius, Painter, Pos2, Rect, Stroke, StrokeKind, vec2};

use super::grid2d;
use crate::geometry::dome_data;

/// Fixed grid side of the pulsing blueprint preview.
pub const BLUEPRINT_GRID: u32 = 32;
/// Half-width of the lit band around the pulsing ring radius.
pub const RING_TOLERANCE: f32 = 0.55;
/// Radius/thickness of the static dome spun by the isometric preview.
pub const PREVIEW_RADIUS: i32 = 11;
const PREVIEW_THICKNESS: i32 = 1;

const BLOCK: Color32 = Color32::from_rgba_premultiplied(242, 116, 23, 242);
const BLOCK_EDGE: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 89);
const BLOCK_TOP: Color32 = Color32::from_rgba_premultiplied(46, 28, 11, 46);
const FAINT_GRID: Color32 = Color32::from_rgba_premultiplied(20, 20, 20, 20);
const SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 46);
const GLOW: Color32 = Color32::from_rgba_premultiplied(36, 22, 9, 36);

/// Static point set for the isometric dome loop, computed once from the
/// geometry engine in outline mode.
#[derive(Resource)]
pub struct PreviewAssets {
    points: Vec<Vec3>,
}

impl Default for PreviewAssets {
    fn default() -> Self {
        let dome = dome_data(PREVIEW_RADIUS, false, PREVIEW_THICKNESS);
        let points = dome
            .voxels
            .iter()
            .map(|&[x, y, z]| Vec3::new(x as f32, y as f32, z as f32))
            .collect();
        Self { points }
    }
}

/// Time-varying blueprint ring radius, in cells.
pub fn pulse_radius(t: f64) -> f32 {
    let pulse = 0.9 + 0.1 * (t / 0.9).sin() as f32;
    BLUEPRINT_GRID as f32 * 0.33 * pulse
}

/// Whether a blueprint cell lies within the tolerance band of the ring.
pub fn ring_lit(x: u32, z: u32, radius: f32) -> bool {
    let mid = (BLUEPRINT_GRID - 1) as f32 / 2.0;
    let dx = x as f32 - mid;
    let dz = z as f32 - mid;
    ((dx * dx + dz * dz).sqrt() - radius).abs() <= RING_TOLERANCE
}

/// Rotate a point about the vertical axis.
pub fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (sa, ca) = angle.sin_cos();
    Vec3::new(p.x * ca + p.z * sa, p.y, -p.x * sa + p.z * ca)
}

/// Fixed isometric projection to screen offsets.
pub fn iso_project(p: Vec3, scale: f32) -> egui::Vec2 {
    vec2(
        (p.x - p.z) * scale * 0.95,
        (p.x + p.z) * scale * 0.48 - p.y * scale * 1.02,
    )
}

/// Depth key for back-to-front painting: larger paints later (closer).
pub fn depth_key(p: Vec3) -> f32 {
    p.x + p.z + p.y * 0.35
}

/// Directional shading factor in [0.5, 1.0], simulating a light that spins
/// with the dome rotation.
pub fn shade(p: Vec3, angle: f32, radius: f32) -> f32 {
    0.75 + 0.25 * (angle.cos() * p.x / (radius + 0.01) + angle.sin() * p.z / (radius + 0.01))
}

/// One frame of the pulsing blueprint ring. Refits the grid every frame so
/// panel resizes are picked up without extra plumbing.
pub fn blueprint_frame(painter: &Painter, rect: Rect, t: f64) {
    grid2d::paint_background(painter, rect);

    let grid = BLUEPRINT_GRID;
    let pad = 14.0;
    let s = ((rect.width() - pad * 2.0) / grid as f32)
        .min((rect.height() - pad * 2.0) / grid as f32)
        .floor()
        .max(2.0);
    let map = s * grid as f32;
    let origin = rect.min
        + vec2(
            ((rect.width() - map) / 2.0).floor(),
            ((rect.height() - map) / 2.0).floor(),
        );

    if s >= 6.0 {
        let stroke = Stroke::new(1.0, FAINT_GRID);
        for i in 0..=grid {
            let x = origin.x + i as f32 * s + 0.5;
            painter.line_segment([Pos2::new(x, origin.y), Pos2::new(x, origin.y + map)], stroke);
            let y = origin.y + i as f32 * s + 0.5;
            painter.line_segment([Pos2::new(origin.x, y), Pos2::new(origin.x + map, y)], stroke);
        }
    }

    let radius = pulse_radius(t);
    for z in 0..grid {
        for x in 0..grid {
            if ring_lit(x, z, radius) {
                let pos = origin + vec2(x as f32 * s, z as f32 * s);
                draw_block(painter, pos, s - 1.0, 1.0);
            }
        }
    }
}

/// One frame of the rotating isometric dome. No depth buffer here: points
/// are sorted back-to-front and painted in order. The sort is stable, so
/// equal depths keep their generation order.
pub fn dome_frame(painter: &Painter, rect: Rect, t: f64, assets: &PreviewAssets) {
    grid2d::paint_background(painter, rect);

    let (w, h) = (rect.width(), rect.height());
    painter.add(egui::Shape::ellipse_filled(
        rect.min + vec2(w * 0.55, h * 0.78),
        vec2(w * 0.18, h * 0.06),
        SHADOW,
    ));

    let scale = (w.min(h) / 42.0).max(4.0);
    let center = rect.min + vec2(w * 0.5, h * 0.72);
    let angle = ((t / 2.2) % std::f64::consts::TAU) as f32;
    let radius = PREVIEW_RADIUS as f32;

    struct DrawPoint {
        depth: f32,
        pos: egui::Vec2,
        shade: f32,
    }

    let mut draw_list: Vec<DrawPoint> = assets
        .points
        .iter()
        .map(|&p| {
            let q = rotate_y(p, angle);
            DrawPoint {
                depth: depth_key(q),
                pos: iso_project(q, scale),
                shade: shade(q, angle, radius),
            }
        })
        .collect();
    draw_list.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    let s = (scale * 0.9).floor().max(2.0);
    for point in &draw_list {
        let pos = Pos2::new(
            (center.x + point.pos.x).floor(),
            (center.y + point.pos.y).floor(),
        );
        draw_block(painter, pos, s, 0.78 + 0.22 * point.shade);
    }

    painter.add(egui::Shape::ellipse_filled(
        Pos2::new(center.x, center.y - radius * scale * 1.05),
        vec2(s * 2.3, s * 1.2),
        GLOW,
    ));
}

/// Block sprite used by both previews: fill, and above 4 px an inset edge
/// plus a top highlight strip.
fn draw_block(painter: &Painter, pos: Pos2, s: f32, alpha: f32) {
    let rect = Rect::from_min_size(pos, egui::Vec2::splat(s));
    painter.rect_filled(rect, CornerRadius::ZERO, BLOCK.gamma_multiply(alpha));

    if s >= 4.0 {
        painter.rect_stroke(
            rect.shrink(0.5),
            CornerRadius::ZERO,
            Stroke::new(1.0, BLOCK_EDGE.gamma_multiply(alpha)),
            StrokeKind::Inside,
        );
        let strip = (s * 0.32).floor().max(1.0);
        painter.rect_filled(
            Rect::from_min_size(pos, vec2(s, strip)),
            CornerRadius::ZERO,
            BLOCK_TOP.gamma_multiply(alpha),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pulse_radius_stays_in_band() {
        let base = BLUEPRINT_GRID as f32 * 0.33;
        for i in 0..200 {
            let r = pulse_radius(i as f64 * 0.1);
            assert!(r >= base * 0.9 - 1e-4 && r <= base * 1.1 + 1e-4);
        }
    }

    #[test]
    fn ring_band_is_symmetric_about_center() {
        let radius = 8.0;
        for z in 0..BLUEPRINT_GRID {
            for x in 0..BLUEPRINT_GRID {
                let mirrored = (BLUEPRINT_GRID - 1 - x, BLUEPRINT_GRID - 1 - z);
                assert_eq!(ring_lit(x, z, radius), ring_lit(mirrored.0, mirrored.1, radius));
            }
        }
    }

    #[test]
    fn rotation_preserves_height_and_length() {
        let p = Vec3::new(3.0, 2.0, -4.0);
        let q = rotate_y(p, 1.3);
        assert_relative_eq!(q.y, p.y);
        assert_relative_eq!(q.length(), p.length(), epsilon = 1e-5);

        let identity = rotate_y(p, 0.0);
        assert_relative_eq!(identity.x, p.x);
        assert_relative_eq!(identity.z, p.z);

        let half_turn = rotate_y(p, std::f32::consts::PI);
        assert_relative_eq!(half_turn.x, -p.x, epsilon = 1e-5);
        assert_relative_eq!(half_turn.z, -p.z, epsilon = 1e-5);
    }

    #[test]
    fn projection_uses_fixed_constants() {
        let s = 10.0;
        let x_axis = iso_project(Vec3::X, s);
        assert_relative_eq!(x_axis.x, 9.5);
        assert_relative_eq!(x_axis.y, 4.8);

        let up = iso_project(Vec3::Y, s);
        assert_relative_eq!(up.x, 0.0);
        assert_relative_eq!(up.y, -10.2);

        let z_axis = iso_project(Vec3::Z, s);
        assert_relative_eq!(z_axis.x, -9.5);
        assert_relative_eq!(z_axis.y, 4.8);
    }

    #[test]
    fn depth_orders_back_to_front() {
        let far = depth_key(Vec3::new(-5.0, 0.0, -5.0));
        let near = depth_key(Vec3::new(5.0, 0.0, 5.0));
        assert!(far < near);
        // Height is a weaker contributor than horizontal position.
        assert!(depth_key(Vec3::new(0.0, 1.0, 0.0)) < depth_key(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn shade_stays_in_range() {
        let r = PREVIEW_RADIUS as f32;
        for &angle in &[0.0, 0.7, 2.1, 4.9] {
            for &p in &[
                Vec3::new(r, 0.0, 0.0),
                Vec3::new(-r, 3.0, 0.0),
                Vec3::new(0.0, 5.0, -r),
                Vec3::new(4.0, 1.0, 4.0),
            ] {
                let value = shade(p, angle, r);
                assert!((0.4..=1.1).contains(&value), "shade {value} out of range");
            }
        }
    }

    #[test]
    fn stable_sort_preserves_generation_order_on_ties() {
        let mut items = vec![(1.0f32, 'a'), (0.5, 'b'), (1.0, 'c'), (0.5, 'd')];
        items.sort_by(|x, y| x.0.total_cmp(&y.0));
        let order: String = items.iter().map(|&(_, tag)| tag).collect();
        assert_eq!(order, "bdac");
    }

    #[test]
    fn preview_assets_match_outline_dome() {
        let assets = PreviewAssets::default();
        let dome = dome_data(PREVIEW_RADIUS, false, PREVIEW_THICKNESS);
        assert_eq!(assets.points.len(), dome.voxels.len());
        assert!(!assets.points.is_empty());
    }
}
