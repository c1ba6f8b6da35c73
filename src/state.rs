use bevy::prelude::*;
use std::collections::HashSet;

use crate::geometry::{CircleData, DomeData, ShapeParams};

/// Integer bounds for the tunable parameters. The circle bounds mirror the
/// backend's own clamps; the dome radius is capped lower to keep the 3D
/// instance count reasonable.
pub const CIRCLE_RADIUS_MIN: i32 = 1;
pub const CIRCLE_RADIUS_MAX: i32 = 200;
pub const DOME_RADIUS_MIN: i32 = 1;
pub const DOME_RADIUS_MAX: i32 = 100;
pub const THICKNESS_MIN: i32 = 1;
pub const THICKNESS_MAX: i32 = 20;

/// Which backend endpoint a generation request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Dome,
}

/// Hover readout for the 2D grid views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverCell {
    pub x: i32,
    pub z: i32,
    pub filled: bool,
}

/// Central application state. All mutation goes through the methods below
/// so re-rendering and tests stay deterministic; nothing else owns shape
/// data or the marked set.
#[derive(Resource)]
pub struct PlannerState {
    pub circle_params: ShapeParams,
    pub dome_params: ShapeParams,
    pub show_grid: bool,
    pub show_axes: bool,

    pub circle: Option<CircleData>,
    pub dome: Option<DomeData>,
    /// Bumped whenever new dome data is applied; lets the 3D viewer detect
    /// that its instance set is stale.
    pub dome_generation: u64,

    /// User-toggled "done" cells, keyed by centered (x, z). Ephemeral:
    /// cleared whenever new shape data lands.
    pub marked: HashSet<(i32, i32)>,
    pub layer: usize,
    pub hover: Option<HoverCell>,

    pub busy: bool,
    pub status: Option<String>,
    pub pending: Option<ShapeKind>,
    generation: u64,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self {
            circle_params: ShapeParams {
                radius: 10,
                filled: false,
                thickness: 1,
            },
            dome_params: ShapeParams {
                radius: 10,
                filled: false,
                thickness: 1,
            },
            show_grid: true,
            show_axes: false,
            circle: None,
            dome: None,
            dome_generation: 0,
            marked: HashSet::new(),
            layer: 0,
            hover: None,
            busy: false,
            status: None,
            pending: None,
            generation: 0,
        }
    }
}

impl PlannerState {
    /// Queue a generation request; the fetch pipeline picks it up next
    /// frame. Rapid commits simply supersede each other.
    pub fn queue_generate(&mut self, kind: ShapeKind) {
        self.pending = Some(kind);
    }

    /// Start a new request: bumps the generation counter used to discard
    /// stale responses and marks the UI busy.
    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.busy = true;
        self.status = None;
        self.generation
    }

    /// Apply circle data if `generation` is still the latest request.
    /// Returns false for stale responses, which are dropped wholesale.
    pub fn apply_circle(&mut self, generation: u64, data: CircleData) -> bool {
        if generation != self.generation {
            return false;
        }
        self.circle = Some(data);
        self.marked.clear();
        self.hover = None;
        self.busy = false;
        true
    }

    /// Apply dome data if `generation` is still the latest request.
    pub fn apply_dome(&mut self, generation: u64, data: DomeData) -> bool {
        if generation != self.generation {
            return false;
        }
        self.dome = Some(data);
        self.dome_generation = generation;
        self.marked.clear();
        self.hover = None;
        self.layer = 0;
        self.busy = false;
        true
    }

    /// Record a failed request. Last-good data stays rendered; the busy
    /// flag is only released if no newer request is in flight.
    pub fn fail_request(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            return;
        }
        self.busy = false;
        self.status = Some(message);
    }

    /// Toggle the marked overlay on a filled circle cell (centered
    /// coordinates). Empty or out-of-range cells are no-ops.
    pub fn toggle_mark(&mut self, x: i32, z: i32) -> bool {
        let Some(circle) = self.circle.as_ref() else {
            return false;
        };
        let r = circle.radius;
        let (col, row) = (x + r, z + r);
        if col < 0 || row < 0 || col >= circle.size as i32 || row >= circle.size as i32 {
            return false;
        }
        if !circle.grid[row as usize][col as usize] {
            return false;
        }
        if !self.marked.remove(&(x, z)) {
            self.marked.insert((x, z));
        }
        true
    }

    pub fn layer_count(&self) -> usize {
        self.dome.as_ref().map_or(0, |dome| dome.layers.len())
    }

    /// Clamp-and-set the current dome layer.
    pub fn set_layer(&mut self, layer: usize) {
        let count = self.layer_count();
        self.layer = if count == 0 {
            0
        } else {
            layer.min(count - 1)
        };
    }

    /// Step the current layer by a signed delta, clamping at both ends.
    pub fn step_layer(&mut self, delta: i32) {
        let next = self.layer as i64 + delta as i64;
        self.set_layer(next.max(0) as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{circle_grid, dome_data};

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = PlannerState::default();
        let first = state.begin_request();
        let second = state.begin_request();

        assert!(!state.apply_circle(first, circle_grid(3, true, 1)));
        assert!(state.circle.is_none());
        assert!(state.busy);

        assert!(state.apply_circle(second, circle_grid(4, true, 1)));
        assert!(!state.busy);
        assert_eq!(state.circle.as_ref().unwrap().radius, 4);
    }

    #[test]
    fn failure_restores_busy_and_keeps_last_good_data() {
        let mut state = PlannerState::default();
        let generation = state.begin_request();
        assert!(state.apply_circle(generation, circle_grid(5, true, 1)));

        let failing = state.begin_request();
        assert!(state.busy);
        state.fail_request(failing, "backend unreachable".into());

        assert!(!state.busy);
        assert_eq!(state.status.as_deref(), Some("backend unreachable"));
        assert_eq!(state.circle.as_ref().unwrap().radius, 5);
    }

    #[test]
    fn stale_failure_does_not_release_newer_request() {
        let mut state = PlannerState::default();
        let old = state.begin_request();
        let _newer = state.begin_request();
        state.fail_request(old, "old error".into());
        assert!(state.busy);
        assert!(state.status.is_none());
    }

    #[test]
    fn mark_toggle_is_pairwise_idempotent() {
        let mut state = PlannerState::default();
        let generation = state.begin_request();
        state.apply_circle(generation, circle_grid(5, false, 1));

        // (5, 0) lies on the outline ring; (0, 0) is empty in outline mode.
        assert!(state.toggle_mark(5, 0));
        assert!(state.marked.contains(&(5, 0)));
        assert!(state.toggle_mark(5, 0));
        assert!(state.marked.is_empty());

        assert!(!state.toggle_mark(0, 0));
        assert!(!state.toggle_mark(99, 99));
        assert!(state.marked.is_empty());
    }

    #[test]
    fn applying_new_data_clears_marks() {
        let mut state = PlannerState::default();
        let generation = state.begin_request();
        state.apply_circle(generation, circle_grid(5, true, 1));
        state.toggle_mark(0, 0);
        assert_eq!(state.marked.len(), 1);

        let generation = state.begin_request();
        state.apply_circle(generation, circle_grid(6, true, 1));
        assert!(state.marked.is_empty());
    }

    #[test]
    fn layer_navigation_clamps() {
        let mut state = PlannerState::default();
        let generation = state.begin_request();
        state.apply_dome(generation, dome_data(4, false, 1));
        assert_eq!(state.layer_count(), 5);
        assert_eq!(state.layer, 0);

        state.step_layer(-1);
        assert_eq!(state.layer, 0);
        state.set_layer(99);
        assert_eq!(state.layer, 4);
        state.step_layer(1);
        assert_eq!(state.layer, 4);
        state.step_layer(-2);
        assert_eq!(state.layer, 2);
    }

    #[test]
    fn dome_apply_resets_layer_and_bumps_generation() {
        let mut state = PlannerState::default();
        let first = state.begin_request();
        state.apply_dome(first, dome_data(4, false, 1));
        state.set_layer(3);

        let second = state.begin_request();
        state.apply_dome(second, dome_data(6, false, 1));
        assert_eq!(state.layer, 0);
        assert_eq!(state.dome_generation, second);
    }
}
