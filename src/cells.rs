use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::units::{BoardSize, ColumnIndex, RowIndex};

/// Board position. `x` is the column, `y` the row, with (0, 0) the top left corner.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::South,
                                                 CompassPrimary::West,
                                                 CompassPrimary::East];

/// What occupies a board cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Open,
    Obstacle,
    Start,
    Goal,
}

impl CellKind {
    /// Can the player stand on this cell.
    #[inline]
    pub fn is_traversable(self) -> bool {
        self != CellKind::Obstacle
    }

    pub fn glyph(self) -> char {
        match self {
            CellKind::Open => '.',
            CellKind::Obstacle => '#',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// The fixed start position of every board.
    #[inline]
    pub fn origin() -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, size: BoardSize) -> Cartesian2DCoordinate {
        let BoardSize(width) = size;
        Cartesian2DCoordinate::new((index % width) as u32, (index / width) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// Row major index of the coordinate, or None if it lies outside a `size` * `size` board.
    #[inline]
    pub fn to_row_major_index(self, size: BoardSize) -> Option<usize> {
        if is_within_board(self, size) {
            let BoardSize(width) = size;
            Some(self.y as usize * width + self.x as usize)
        } else {
            None
        }
    }

    /// Manhattan distance to `other`.
    pub fn steps_to(self, other: Cartesian2DCoordinate) -> u32 {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx + dy
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[inline]
pub fn is_within_board(coord: Cartesian2DCoordinate, size: BoardSize) -> bool {
    let BoardSize(width) = size;
    (coord.x as usize) < width && (coord.y as usize) < width
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if that steps off a `size` * `size` board.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary,
                         size: BoardSize)
                         -> Option<Cartesian2DCoordinate> {

    let (x, y) = (coord.x, coord.y);
    let moved = match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
        CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    };

    moved.filter(|&c| is_within_board(c, size))
}

/// The up to 4 in-bounds cells orthogonally adjacent to `coord`.
pub fn orthogonal_neighbours(coord: Cartesian2DCoordinate, size: BoardSize) -> CoordinateSmallVec {
    ALL_DIRECTIONS.iter()
        .filter_map(|&dir| offset_coordinate(coord, dir, size))
        .collect()
}

/// Are the two cells one grid step apart along exactly one axis.
#[inline]
pub fn is_orthogonal_step(a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
    a.steps_to(b) == 1
}
