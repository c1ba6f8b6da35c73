use serde::{Deserialize, Deserializer};

/// Parameters for one shape generation request.
///
/// `thickness` is only meaningful in outline mode; the generator ignores it
/// when `filled` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeParams {
    pub radius: i32,
    pub filled: bool,
    pub thickness: i32,
}

/// A voxelized circle: square boolean grid of side `size` = 2·radius + 1.
#[derive(Debug, Clone, Deserialize)]
pub struct CircleData {
    pub radius: i32,
    pub size: u32,
    pub block_count: u32,
    #[serde(deserialize_with = "grid_from_bits")]
    pub grid: Vec<Vec<bool>>,
}

/// One horizontal cross-section of a dome at height `y`.
#[derive(Debug, Clone, Deserialize)]
pub struct Layer {
    pub y: i32,
    pub size: u32,
    pub block_count: u32,
    #[serde(deserialize_with = "grid_from_bits")]
    pub grid: Vec<Vec<bool>>,
}

/// A voxelized hemisphere: ordered layers (index = height) plus the flat
/// voxel list used by the 3D viewer.
#[derive(Debug, Clone, Deserialize)]
pub struct DomeData {
    pub radius: i32,
    pub total_blocks: u32,
    pub layers: Vec<Layer>,
    pub voxels: Vec<[i32; 3]>,
}

/// The backend encodes grids as rows of 0|1.
fn grid_from_bits<'de, D>(deserializer: D) -> Result<Vec<Vec<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(|bit| bit != 0).collect())
        .collect())
}

/// Shell membership test shared by the 2D and 3D generators.
///
/// A point at Euclidean distance `d` from the origin belongs to the shape
/// when `d <= radius + 0.5`, and in outline mode also `d >= (radius -
/// thickness) + 0.5`. The half-cell offset centers the boundary between
/// lattice rings. `thickness >= radius` collapses the shell to the filled
/// case: the inner bound would otherwise strand the center cell.
pub fn in_shell(d: f64, radius: i32, filled: bool, thickness: i32) -> bool {
    let outer = radius as f64 + 0.5;
    if d > outer {
        return false;
    }
    if filled || thickness >= radius {
        return true;
    }
    d >= (radius - thickness) as f64 + 0.5
}

/// Generate the 2D circle grid for the given parameters.
pub fn circle_grid(radius: i32, filled: bool, thickness: i32) -> CircleData {
    let r = radius.max(0);
    let size = (2 * r + 1) as usize;
    let mut grid = vec![vec![false; size]; size];
    let mut block_count = 0u32;

    for z in -r..=r {
        for x in -r..=r {
            let d = ((x * x + z * z) as f64).sqrt();
            if in_shell(d, r, filled, thickness) {
                grid[(z + r) as usize][(x + r) as usize] = true;
                block_count += 1;
            }
        }
    }

    CircleData {
        radius: r,
        size: size as u32,
        block_count,
        grid,
    }
}

/// Generate the upper-hemisphere dome: one layer per height y in [0, r],
/// all layers sharing the 2D footprint size, plus the flat voxel list.
pub fn dome_data(radius: i32, filled: bool, thickness: i32) -> DomeData {
    let r = radius.max(0);
    let size = (2 * r + 1) as usize;
    let mut layers = Vec::with_capacity((r + 1) as usize);
    let mut voxels = Vec::new();
    let mut total_blocks = 0u32;

    for y in 0..=r {
        let mut grid = vec![vec![false; size]; size];
        let mut block_count = 0u32;

        for z in -r..=r {
            for x in -r..=r {
                let d = ((x * x + y * y + z * z) as f64).sqrt();
                if in_shell(d, r, filled, thickness) {
                    grid[(z + r) as usize][(x + r) as usize] = true;
                    block_count += 1;
                    voxels.push([x, y, z]);
                }
            }
        }

        total_blocks += block_count;
        layers.push(Layer {
            y,
            size: size as u32,
            block_count,
            grid,
        });
    }

    DomeData {
        radius: r,
        total_blocks,
        layers,
        voxels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_true(grid: &[Vec<bool>]) -> u32 {
        grid.iter()
            .map(|row| row.iter().filter(|&&cell| cell).count() as u32)
            .sum()
    }

    #[test]
    fn filled_circle_matches_distance_predicate() {
        let r = 3;
        let data = circle_grid(r, true, 1);
        assert_eq!(data.size, 7);

        let mut expected = 0;
        for z in -r..=r {
            for x in -r..=r {
                let inside = ((x * x + z * z) as f64).sqrt() <= r as f64 + 0.5;
                assert_eq!(data.grid[(z + r) as usize][(x + r) as usize], inside);
                if inside {
                    expected += 1;
                }
            }
        }
        // Discrete disk of radius 3 (enumerable by hand).
        assert_eq!(expected, 37);
        assert_eq!(data.block_count, expected);
        assert_eq!(count_true(&data.grid), data.block_count);
    }

    #[test]
    fn outline_ring_stays_in_band() {
        let r = 5;
        let data = circle_grid(r, false, 1);
        assert_eq!(data.size, 11);
        assert!(data.block_count > 0);

        for z in -r..=r {
            for x in -r..=r {
                let d = ((x * x + z * z) as f64).sqrt();
                let expected = (4.5..=5.5).contains(&d);
                assert_eq!(
                    data.grid[(z + r) as usize][(x + r) as usize],
                    expected,
                    "cell ({x},{z}) at distance {d}"
                );
            }
        }
    }

    #[test]
    fn outline_is_strict_subset_of_filled() {
        let filled = circle_grid(8, true, 1);
        let outline = circle_grid(8, false, 2);

        assert!(outline.block_count > 0);
        assert!(outline.block_count < filled.block_count);
        for (fr, or) in filled.grid.iter().zip(&outline.grid) {
            for (&f, &o) in fr.iter().zip(or) {
                assert!(!o || f, "outline cell outside the filled set");
            }
        }
    }

    #[test]
    fn thickness_is_monotonic_and_collapses_at_radius() {
        let r = 9;
        let mut previous = 0;
        for thickness in 1..=r {
            let count = circle_grid(r, false, thickness).block_count;
            assert!(count >= previous);
            previous = count;
        }
        assert_eq!(
            circle_grid(r, false, r).block_count,
            circle_grid(r, true, 1).block_count
        );
        assert_eq!(
            circle_grid(r, false, r + 5).block_count,
            circle_grid(r, true, 1).block_count
        );
    }

    #[test]
    fn zero_radius_is_a_single_point() {
        let data = circle_grid(0, false, 1);
        assert_eq!(data.size, 1);
        assert_eq!(data.block_count, 1);
        assert!(data.grid[0][0]);
    }

    #[test]
    fn dome_totals_are_consistent() {
        let data = dome_data(6, false, 2);
        assert_eq!(data.layers.len(), 7);

        let layer_sum: u32 = data.layers.iter().map(|layer| layer.block_count).sum();
        assert_eq!(data.total_blocks, layer_sum);
        assert_eq!(data.total_blocks as usize, data.voxels.len());

        for layer in &data.layers {
            assert_eq!(layer.size, 13);
            assert_eq!(count_true(&layer.grid), layer.block_count);
        }
    }

    #[test]
    fn dome_voxel_heights_match_layer_index() {
        let data = dome_data(5, true, 1);
        let mut per_layer = vec![0u32; data.layers.len()];
        for voxel in &data.voxels {
            let y = voxel[1];
            assert!(y >= 0 && (y as usize) < data.layers.len());
            per_layer[y as usize] += 1;
        }
        for (index, (layer, &count)) in data.layers.iter().zip(&per_layer).enumerate() {
            assert_eq!(layer.y as usize, index);
            assert_eq!(layer.block_count, count);
        }
    }

    #[test]
    fn dome_matches_circle_at_ground_layer() {
        let dome = dome_data(7, true, 1);
        let circle = circle_grid(7, true, 1);
        assert_eq!(dome.layers[0].grid, circle.grid);
        assert_eq!(dome.layers[0].block_count, circle.block_count);
    }
}
