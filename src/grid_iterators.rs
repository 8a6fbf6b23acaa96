use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{BoardSize, ColumnIndex, RowIndex};

/// Row major walk over every coordinate of a square board.
#[derive(Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    size: BoardSize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(size: BoardSize) -> CellIter {
        CellIter {
            current_cell_number: 0,
            size,
            cells_count: size.0 * size.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.size);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Walks a board one whole row at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_index: usize,
    size: BoardSize,
}

impl BatchIter {
    pub fn rows(size: BoardSize) -> BatchIter {
        BatchIter {
            current_index: 0,
            size,
        }
    }
}

impl ExactSizeIterator for BatchIter {}
impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        let BoardSize(length) = self.size;
        if self.current_index >= length {
            return None;
        }

        let row = RowIndex(self.current_index);
        let coords = (0..length)
            .map(|column| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(column), row))
            .collect();
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.size.0 - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
