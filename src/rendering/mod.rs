//! Rendering for the planner: grid fitting, 2D painters, the animated home
//! previews, and the instanced 3D dome viewer.

pub mod fit;
pub mod grid2d;
pub mod preview;
pub mod viewer3d;
