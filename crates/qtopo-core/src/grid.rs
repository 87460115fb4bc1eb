//! Rectangular grid of physical qubit sites.
//!
//! Cells are addressed by a row-major *grid index* `k = row * columns + col`.
//! The ordered list of all cell coordinates is the standard coordinate list
//! that placements index into.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::graph::Graph;

/// A grid cell position: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl GridCoordinate {
    /// Create a coordinate from a column and a row.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance `|dx| + |dy|`.
    #[inline]
    pub fn manhattan(&self, other: &GridCoordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub columns: u32,
}

impl GridShape {
    /// Create a grid shape. Both dimensions must be non-zero.
    pub fn new(rows: u32, columns: u32) -> CoreResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(CoreError::InvalidGridDimension {
                rows: Some(rows),
                columns: Some(columns),
            });
        }
        Ok(Self { rows, columns })
    }

    /// Resolve grid dimensions for `num_qubits` qubits.
    ///
    /// - neither given: `columns = ceil(sqrt(n))`, `rows = ceil(n / columns)`
    /// - one given: the other is `ceil(n / given)`
    /// - both given: used as is
    ///
    /// The resulting grid must hold at least `num_qubits` cells.
    pub fn resolve(num_qubits: usize, rows: Option<u32>, columns: Option<u32>) -> CoreResult<Self> {
        if rows == Some(0) || columns == Some(0) {
            return Err(CoreError::InvalidGridDimension { rows, columns });
        }
        let n = u32::try_from(num_qubits).map_err(|_| CoreError::InvalidQubitCount {
            found: num_qubits,
        })?;

        let (rows, columns) = match (rows, columns) {
            (Some(r), Some(c)) => (r, c),
            (Some(r), None) => (r, n.div_ceil(r)),
            (None, Some(c)) => (n.div_ceil(c), c),
            (None, None) => {
                let c = ceil_sqrt(n);
                (n.div_ceil(c.max(1)), c)
            }
        };

        let shape = Self::new(rows.max(1), columns.max(1))?;
        if shape.num_cells() < num_qubits {
            return Err(CoreError::GridTooSmall {
                rows: shape.rows,
                columns: shape.columns,
                required: num_qubits,
            });
        }
        Ok(shape)
    }

    /// Total number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Coordinate of the cell with grid index `k`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coordinate(&self, k: usize) -> GridCoordinate {
        let columns = self.columns as usize;
        GridCoordinate::new((k % columns) as u32, (k / columns) as u32)
    }

    /// Grid index of a coordinate.
    #[inline]
    pub fn index_of(&self, coord: GridCoordinate) -> usize {
        coord.y as usize * self.columns as usize + coord.x as usize
    }

    /// All cell coordinates in row-major order.
    ///
    /// Position `k` of the returned list is the coordinate of grid index `k`.
    pub fn standard_coordinates(&self) -> Vec<GridCoordinate> {
        (0..self.num_cells()).map(|k| self.coordinate(k)).collect()
    }

    /// The complete 4-neighbour grid graph over all cells.
    pub fn grid_graph(&self) -> Graph {
        let (rows, columns) = (self.rows as usize, self.columns as usize);
        let mut graph = Graph::new(self.num_cells());
        for row in 0..rows {
            for col in 0..columns {
                let k = row * columns + col;
                if col + 1 < columns {
                    graph.add_edge(k, k + 1);
                }
                if row + 1 < rows {
                    graph.add_edge(k, k + columns);
                }
            }
        }
        graph
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: u32) -> u32 {
    let mut c = f64::from(n).sqrt() as u32;
    while c * c < n {
        c += 1;
    }
    while c > 0 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_coordinates_row_major() {
        let shape = GridShape::new(2, 3).unwrap();
        let coords = shape.standard_coordinates();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords[0], GridCoordinate::new(0, 0));
        assert_eq!(coords[2], GridCoordinate::new(2, 0));
        assert_eq!(coords[3], GridCoordinate::new(0, 1));
        assert_eq!(coords[5], GridCoordinate::new(2, 1));
        for (k, c) in coords.iter().enumerate() {
            assert_eq!(shape.index_of(*c), k);
        }
    }

    #[test]
    fn test_resolve_inferred() {
        assert_eq!(GridShape::resolve(4, None, None).unwrap(), GridShape { rows: 2, columns: 2 });
        assert_eq!(GridShape::resolve(5, None, None).unwrap(), GridShape { rows: 2, columns: 3 });
        assert_eq!(GridShape::resolve(10, None, None).unwrap(), GridShape { rows: 3, columns: 4 });
        assert_eq!(GridShape::resolve(2, None, None).unwrap(), GridShape { rows: 1, columns: 2 });
    }

    #[test]
    fn test_resolve_one_given() {
        assert_eq!(GridShape::resolve(7, Some(2), None).unwrap(), GridShape { rows: 2, columns: 4 });
        assert_eq!(GridShape::resolve(7, None, Some(3)).unwrap(), GridShape { rows: 3, columns: 3 });
    }

    #[test]
    fn test_resolve_errors() {
        assert!(matches!(
            GridShape::resolve(5, Some(2), Some(2)),
            Err(CoreError::GridTooSmall { required: 5, .. })
        ));
        assert!(matches!(
            GridShape::resolve(5, Some(0), None),
            Err(CoreError::InvalidGridDimension { .. })
        ));
    }

    #[test]
    fn test_grid_graph() {
        let shape = GridShape::new(2, 3).unwrap();
        let g = shape.grid_graph();
        // 2 rows * 2 horizontal + 3 vertical
        assert_eq!(g.num_edges(), 7);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(0, 3));
        assert!(!g.has_edge(2, 3));
        assert!(g.is_connected());
    }

    #[test]
    fn test_manhattan() {
        let a = GridCoordinate::new(0, 2);
        let b = GridCoordinate::new(3, 0);
        assert_eq!(a.manhattan(&b), 5);
        assert_eq!(b.manhattan(&a), 5);
        assert_eq!(a.manhattan(&a), 0);
    }

    #[test]
    fn test_ceil_sqrt() {
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(4), 2);
        assert_eq!(ceil_sqrt(5), 3);
        assert_eq!(ceil_sqrt(16), 4);
        assert_eq!(ceil_sqrt(17), 5);
    }
}
