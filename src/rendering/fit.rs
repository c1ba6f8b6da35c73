use bevy_egui::egui::{Pos2, Rect, Vec2, vec2};

/// How a square N×N grid fits inside a panel rect: integer cell size in
/// pixels plus the top-left corner of the centered map.
///
/// The computation is pure and idempotent; callers re-run it on every
/// resize or toggle change without touching the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFit {
    pub cell: i32,
    pub origin: Pos2,
    pub size: u32,
}

impl GridFit {
    /// Fit `size` cells into `rect`, leaving `pad` pixels of breathing room
    /// and optionally capping the cell size (the circle view caps at 24 px).
    pub fn compute(rect: Rect, size: u32, pad: f32, max_cell: Option<i32>) -> Self {
        let size = size.max(1);
        let avail_w = (rect.width() - pad * 2.0).max(20.0);
        let avail_h = (rect.height() - pad * 2.0).max(20.0);

        let raw = (avail_w / size as f32).min(avail_h / size as f32).floor() as i32;
        let cell = raw.clamp(1, max_cell.unwrap_or(i32::MAX));

        let map = (cell * size as i32) as f32;
        let origin = rect.min
            + vec2(
                ((rect.width() - map) / 2.0).floor(),
                ((rect.height() - map) / 2.0).floor(),
            );

        Self { cell, origin, size }
    }

    /// Pixel rect covering the whole map.
    pub fn map_rect(&self) -> Rect {
        let side = (self.cell * self.size as i32) as f32;
        Rect::from_min_size(self.origin, Vec2::splat(side))
    }

    /// Pixel rect of one cell by grid indices.
    pub fn cell_rect(&self, x: u32, z: u32) -> Rect {
        let cell = self.cell as f32;
        Rect::from_min_size(
            self.origin + vec2(x as f32 * cell, z as f32 * cell),
            Vec2::splat(cell),
        )
    }

    /// Invert the fit transform: pointer position to grid indices.
    /// Positions outside [0, N) on either axis are rejected.
    pub fn cell_at(&self, pos: Pos2) -> Option<(u32, u32)> {
        let local = pos - self.origin;
        let x = (local.x / self.cell as f32).floor() as i64;
        let z = (local.y / self.cell as f32).floor() as i64;
        if x < 0 || z < 0 || x >= self.size as i64 || z >= self.size as i64 {
            return None;
        }
        Some((x as u32, z as u32))
    }

    /// Convert grid indices to centered coordinates (origin at the map
    /// middle), the coordinate space of the marked set and hover readout.
    pub fn centered(&self, x: u32, z: u32) -> (i32, i32) {
        let mid = (self.size / 2) as i32;
        (x as i32 - mid, z as i32 - mid)
    }
}
