use petgraph::graph::{Graph, NodeIndex};
use petgraph::Undirected;
use std::fmt;

use crate::cells::{self, Cartesian2DCoordinate, CellKind, CompassPrimary, CoordinateSmallVec};
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{BoardSize, ObstacleCount, OpenCellCount};

/// Undirected graph of the traversable cells, with an edge between every pair of orthogonally
/// adjacent traversable cells.
pub type PassageGraph = Graph<Cartesian2DCoordinate, (), Undirected, u32>;

/// Square board of cell markers.
///
/// A `Grid` is built once by the generator together with its solution and never changes after
/// that. Player state lives elsewhere and only borrows the grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: BoardSize,
    cells: Vec<CellKind>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: size: {:?}, open cells: {:?}",
               self.size, self.open_cells_count())
    }
}

impl Grid {
    /// Lay a walk out on a board: first cell Start, last cell Goal, everything in between Open
    /// and every cell the walk never touched an Obstacle.
    ///
    /// Walk coordinates must be on the board.
    pub(crate) fn from_path(size: BoardSize, path: &[Cartesian2DCoordinate]) -> Grid {
        let BoardSize(n) = size;
        let mut cells = vec![CellKind::Obstacle; n * n];

        for coord in path {
            if let Some(index) = coord.to_row_major_index(size) {
                cells[index] = CellKind::Open;
            }
        }
        if let Some(index) = path.last().and_then(|c| c.to_row_major_index(size)) {
            cells[index] = CellKind::Goal;
        }
        if let Some(index) = path.first().and_then(|c| c.to_row_major_index(size)) {
            cells[index] = CellKind::Start;
        }

        Grid { size, cells }
    }

    /// Build a grid from text rows using the `CellKind::glyph` characters.
    #[cfg(test)]
    pub(crate) fn from_text_rows(rows: &[&str]) -> Grid {
        let n = rows.len();
        let cells: Vec<CellKind> = rows.iter()
            .flat_map(|row| row.chars())
            .map(|ch| match ch {
                'S' => CellKind::Start,
                'G' => CellKind::Goal,
                '#' => CellKind::Obstacle,
                _ => CellKind::Open,
            })
            .collect();
        assert_eq!(cells.len(), n * n, "text rows do not make a square grid");
        Grid { size: BoardSize(n), cells }
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Side length of the board.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.size.0
    }

    /// Total number of cells on the board.
    #[inline]
    pub fn cells_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn kind_at(&self, coord: Cartesian2DCoordinate) -> Option<CellKind> {
        self.grid_coordinate_to_index(coord).map(|index| self.cells[index])
    }

    #[inline]
    pub fn is_traversable(&self, coord: Cartesian2DCoordinate) -> bool {
        self.kind_at(coord).map_or(false, CellKind::is_traversable)
    }

    /// Start, Open and Goal cells: everything a complete walk has to cover.
    pub fn open_cells_count(&self) -> OpenCellCount {
        OpenCellCount(self.cells.iter().filter(|kind| kind.is_traversable()).count())
    }

    pub fn obstacles_count(&self) -> ObstacleCount {
        ObstacleCount(self.count_of(CellKind::Obstacle))
    }

    pub fn count_of(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// First cell marked Start, in row major order.
    pub fn start(&self) -> Option<Cartesian2DCoordinate> {
        self.first_of(CellKind::Start)
    }

    /// First cell marked Goal, in row major order.
    pub fn goal(&self) -> Option<Cartesian2DCoordinate> {
        self.first_of(CellKind::Goal)
    }

    fn first_of(&self, kind: CellKind) -> Option<Cartesian2DCoordinate> {
        self.cells
            .iter()
            .position(|&k| k == kind)
            .map(|index| Cartesian2DCoordinate::from_row_major_index(index, self.size))
    }

    /// Cells that are to the North, South, East or West of a particular cell, whatever they
    /// contain.
    #[inline]
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        cells::orthogonal_neighbours(coord, self.size)
    }

    /// Neighbouring cells that are not obstacles.
    pub fn traversable_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|&c| self.is_traversable(c))
            .collect()
    }

    #[inline]
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        cells::offset_coordinate(coord, direction, self.size)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.cells_count().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        coord.to_row_major_index(self.size)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.size)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.size)
    }

    /// Cell markers row by row, top row first.
    pub fn kind_rows(&self) -> Vec<Vec<CellKind>> {
        self.cells
            .chunks(self.dimension())
            .map(|row| row.to_vec())
            .collect()
    }

    /// Build the graph of moves a player could make, ignoring visit order.
    pub fn passage_graph(&self) -> PassageGraph {
        let traversable_count = self.open_cells_count().0;
        let mut graph = PassageGraph::with_capacity(traversable_count, 2 * traversable_count);
        let mut node_indices: Vec<Option<NodeIndex<u32>>> = vec![None; self.cells_count()];

        for coord in self.iter().filter(|&c| self.is_traversable(c)) {
            if let Some(index) = self.grid_coordinate_to_index(coord) {
                node_indices[index] = Some(graph.add_node(coord));
            }
        }

        // Only look East and South so each adjacent pair is added once
        for coord in self.iter() {
            let here = self.grid_coordinate_to_index(coord).and_then(|i| node_indices[i]);
            if let Some(a) = here {
                for dir in &[CompassPrimary::East, CompassPrimary::South] {
                    let there = self.neighbour_at_direction(coord, *dir)
                        .and_then(|c| self.grid_coordinate_to_index(c))
                        .and_then(|i| node_indices[i]);
                    if let Some(b) = there {
                        let _ = graph.add_edge(a, b, ());
                    }
                }
            }
        }

        graph
    }
}
