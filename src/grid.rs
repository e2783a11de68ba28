//! Rectangular grid of cells with 4-directional adjacency.
//!
//! A grid is a graph implied by its shape: each open cell is joined to the
//! open cells directly above, below, left and right of it. Walls are kept
//! as a flag per cell and can be toggled between runs.

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// A cell position. Identity, equality and ordering are (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major wall flags.
    walls: Vec<bool>,
}

impl Grid {
    /// An open grid with no walls.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            walls: vec![false; rows * cols],
        }
    }

    /// A grid with the given cells walled off.
    pub fn with_walls(rows: usize, cols: usize, walls: &[Cell]) -> Result<Self> {
        let mut grid = Grid::new(rows, cols);
        for &cell in walls {
            grid.set_wall(cell, true)?;
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, walls included.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// The cell at (row, col), if it lies inside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        let cell = Cell { row, col };
        self.check(cell)?;
        Ok(cell)
    }

    pub fn set_wall(&mut self, cell: Cell, wall: bool) -> Result<()> {
        let idx = self.check(cell)?;
        self.walls[idx] = wall;
        Ok(())
    }

    /// Out-of-bounds cells are not walls.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.contains(cell) && self.walls[self.index(cell)]
    }

    /// Cells walled off, in row-major order.
    pub fn walls(&self) -> Vec<Cell> {
        (0..self.len())
            .filter(|&i| self.walls[i])
            .map(|i| self.cell_at(i))
            .collect()
    }

    /// Open neighbors of `cell` in up, down, left, right order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let up = cell.row.checked_sub(1).map(|r| Cell::new(r, cell.col));
        let down = Some(Cell::new(cell.row + 1, cell.col));
        let left = cell.col.checked_sub(1).map(|c| Cell::new(cell.row, c));
        let right = Some(Cell::new(cell.row, cell.col + 1));
        [up, down, left, right]
            .into_iter()
            .flatten()
            .filter(move |&n| self.contains(n) && !self.is_wall(n))
    }

    pub(crate) fn check(&self, cell: Cell) -> Result<usize> {
        if self.contains(cell) {
            Ok(self.index(cell))
        } else {
            Err(GraphError::CellOutOfBounds {
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Row-major index of an in-bounds cell.
    pub(crate) fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        Cell::new(idx / self.cols, idx % self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_order_and_bounds() {
        let grid = Grid::new(3, 3);
        let center: Vec<_> = grid.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );
        let corner: Vec<_> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn test_walls_are_excluded() {
        let grid = Grid::with_walls(2, 2, &[Cell::new(0, 1)]).unwrap();
        assert!(grid.is_wall(Cell::new(0, 1)));
        let ns: Vec<_> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(ns, vec![Cell::new(1, 0)]);
        assert_eq!(grid.walls(), vec![Cell::new(0, 1)]);
    }

    #[test]
    fn test_set_wall_toggles() {
        let mut grid = Grid::new(1, 2);
        grid.set_wall(Cell::new(0, 1), true).unwrap();
        assert_eq!(grid.neighbors(Cell::new(0, 0)).count(), 0);
        grid.set_wall(Cell::new(0, 1), false).unwrap();
        assert_eq!(grid.neighbors(Cell::new(0, 0)).count(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(2, 3);
        assert!(!grid.contains(Cell::new(2, 0)));
        assert!(!grid.is_wall(Cell::new(5, 5)));
        assert_eq!(
            grid.set_wall(Cell::new(0, 3), true),
            Err(GraphError::CellOutOfBounds {
                row: 0,
                col: 3,
                rows: 2,
                cols: 3
            })
        );
        assert!(grid.cell(1, 2).is_ok());
        assert!(grid.cell(2, 2).is_err());
    }

    #[test]
    fn test_cell_ordering_and_distance() {
        assert!(Cell::new(0, 5) < Cell::new(1, 0));
        assert_eq!(Cell::new(0, 0).manhattan(&Cell::new(2, 3)), 5);
        let idx_grid = Grid::new(3, 4);
        let c = Cell::new(2, 1);
        assert_eq!(idx_grid.cell_at(idx_grid.index(c)), c);
    }
}
