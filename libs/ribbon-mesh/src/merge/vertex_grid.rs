//! # Vertex Grid
//!
//! Spatial hash over a point cloud for fixed-radius proximity queries.
//! The cell size equals the query radius, so any point closer than the
//! radius lies in one of the 27 cells around the query point.

use glam::DVec3;
use std::collections::HashMap;

/// 3D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
    z: i64,
}

impl CellCoord {
    /// Creates a cell coordinate from 3D position.
    fn from_position(pos: DVec3, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            y: (pos.y / cell_size).floor() as i64,
            z: (pos.z / cell_size).floor() as i64,
        }
    }

    fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// Hash grid answering "is any indexed point strictly closer than `radius`?".
#[derive(Debug)]
pub struct VertexGrid<'a> {
    /// Hash grid: cell -> point indices
    grid: HashMap<CellCoord, Vec<usize>>,
    points: &'a [DVec3],
    radius: f64,
}

impl<'a> VertexGrid<'a> {
    /// Indexes `points` with cells of edge `radius`.
    pub fn new(points: &'a [DVec3], radius: f64) -> Self {
        let mut grid: HashMap<CellCoord, Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            grid.entry(CellCoord::from_position(*p, radius))
                .or_default()
                .push(i);
        }

        Self {
            grid,
            points,
            radius,
        }
    }

    /// Returns true if some indexed point lies strictly within `radius` of `query`.
    pub fn any_within(&self, query: DVec3) -> bool {
        let center = CellCoord::from_position(query, self.radius);
        let radius_sq = self.radius * self.radius;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(indices) = self.grid.get(&center.offset(dx, dy, dz)) else {
                        continue;
                    };
                    if indices
                        .iter()
                        .any(|&i| self.points[i].distance_squared(query) < radius_sq)
                    {
                        return true;
                    }
                }
            }
        }

        false
    }
}
