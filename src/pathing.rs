use itertools::Itertools;
use petgraph::algo::connected_components;
use serde_derive::Serialize;
use std::fmt;
use std::slice;

use crate::cells::{self, Cartesian2DCoordinate, CellKind};
use crate::grid::Grid;
use crate::utils;

/// Cells revealed by a single hint.
pub const HINT_STEPS: usize = 5;

/// The walk that carved a board, from Start to Goal. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionPath {
    cells: Vec<Cartesian2DCoordinate>,
}

impl SolutionPath {
    pub(crate) fn new(cells: Vec<Cartesian2DCoordinate>) -> SolutionPath {
        debug_assert!(!cells.is_empty());
        SolutionPath { cells }
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.cells[0]
    }

    #[inline]
    pub fn goal(&self) -> Cartesian2DCoordinate {
        self.cells[self.cells.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<Cartesian2DCoordinate> {
        self.cells.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Cartesian2DCoordinate] {
        &self.cells
    }

    /// Step number (0 based) of a cell on the path.
    pub fn position_of(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.cells.iter().position(|&c| c == coord)
    }

    /// What to show a player who has walked `player_path` so far.
    ///
    /// A player still following the solution is shown the next `HINT_STEPS` cells of it.
    pub fn hint(&self, player_path: &[Cartesian2DCoordinate]) -> Hint {
        let correct_prefix = player_path.iter()
            .zip(self.cells.iter())
            .take_while(|(played, solution)| played == solution)
            .count();

        if correct_prefix < player_path.len() {
            return Hint::OffTrack { correct_prefix };
        }

        let next_steps: Vec<Cartesian2DCoordinate> = self.cells
            .iter()
            .skip(correct_prefix)
            .take(HINT_STEPS)
            .cloned()
            .collect();

        if next_steps.is_empty() {
            Hint::NoneLeft
        } else {
            Hint::NextSteps(next_steps)
        }
    }
}

impl<'a> IntoIterator for &'a SolutionPath {
    type Item = &'a Cartesian2DCoordinate;
    type IntoIter = slice::Iter<'a, Cartesian2DCoordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// Upcoming solution cells, nearest first.
    NextSteps(Vec<Cartesian2DCoordinate>),
    /// The player's walk left the solution after this many matching cells.
    OffTrack { correct_prefix: usize },
    /// The player has already walked the whole solution.
    NoneLeft,
}

/// Every cell is adjacent to the next one, and no cell appears twice.
pub fn is_simple_path(path: &[Cartesian2DCoordinate]) -> bool {
    first_non_adjacent_step(path).is_none() && first_repeated_cell(path).is_none()
}

fn first_non_adjacent_step(path: &[Cartesian2DCoordinate])
                           -> Option<(Cartesian2DCoordinate, Cartesian2DCoordinate)> {
    path.iter()
        .cloned()
        .tuple_windows()
        .find(|&(a, b)| !cells::is_orthogonal_step(a, b))
}

fn first_repeated_cell(path: &[Cartesian2DCoordinate]) -> Option<Cartesian2DCoordinate> {
    let mut seen = utils::fnv_hashset(path.len());
    path.iter().cloned().find(|&coord| !seen.insert(coord))
}

/// Ways a board and its solution can break the one-stroke rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardDefect {
    StartCount(usize),
    GoalCount(usize),
    StartNotAtOrigin(Cartesian2DCoordinate),
    PathStartMismatch { start: Cartesian2DCoordinate, path_start: Cartesian2DCoordinate },
    GoalMismatch { goal: Cartesian2DCoordinate, path_end: Cartesian2DCoordinate },
    PathLengthMismatch { path: usize, open_cells: usize },
    OffBoard(Cartesian2DCoordinate),
    ThroughObstacle(Cartesian2DCoordinate),
    RepeatedCell(Cartesian2DCoordinate),
    NonAdjacentStep(Cartesian2DCoordinate, Cartesian2DCoordinate),
    Disconnected { components: usize },
}

impl fmt::Display for BoardDefect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BoardDefect::StartCount(n) => write!(f, "expected 1 start cell, found {}", n),
            BoardDefect::GoalCount(n) => write!(f, "expected 1 goal cell, found {}", n),
            BoardDefect::StartNotAtOrigin(c) => write!(f, "start cell at {} instead of (0, 0)", c),
            BoardDefect::PathStartMismatch { start, path_start } => {
                write!(f, "solution begins at {} but the start is {}", path_start, start)
            }
            BoardDefect::GoalMismatch { goal, path_end } => {
                write!(f, "solution ends at {} but the goal is {}", path_end, goal)
            }
            BoardDefect::PathLengthMismatch { path, open_cells } => {
                write!(f, "solution covers {} cells, board has {} open cells", path, open_cells)
            }
            BoardDefect::OffBoard(c) => write!(f, "solution leaves the board at {}", c),
            BoardDefect::ThroughObstacle(c) => write!(f, "solution crosses the obstacle at {}", c),
            BoardDefect::RepeatedCell(c) => write!(f, "solution visits {} twice", c),
            BoardDefect::NonAdjacentStep(a, b) => write!(f, "solution jumps from {} to {}", a, b),
            BoardDefect::Disconnected { components } => {
                write!(f, "open cells split into {} separate areas", components)
            }
        }
    }
}

/// Check a board and its solution against every one-stroke rule.
///
/// Exactly one Start, at the origin, and one Goal; the solution runs from the Start to the Goal
/// in orthogonal single steps, never repeats a cell or crosses an obstacle, and covers every open
/// cell; the open cells form one connected area.
pub fn validate_board(grid: &Grid, solution: &SolutionPath) -> Result<(), BoardDefect> {
    let starts = grid.count_of(CellKind::Start);
    if starts != 1 {
        return Err(BoardDefect::StartCount(starts));
    }
    let goals = grid.count_of(CellKind::Goal);
    if goals != 1 {
        return Err(BoardDefect::GoalCount(goals));
    }

    let start = grid.start().unwrap_or_else(Cartesian2DCoordinate::origin);
    let goal = grid.goal().unwrap_or_else(Cartesian2DCoordinate::origin);
    if start != Cartesian2DCoordinate::origin() {
        return Err(BoardDefect::StartNotAtOrigin(start));
    }
    if solution.start() != start {
        return Err(BoardDefect::PathStartMismatch { start, path_start: solution.start() });
    }
    if solution.goal() != goal {
        return Err(BoardDefect::GoalMismatch { goal, path_end: solution.goal() });
    }

    for &coord in solution {
        match grid.kind_at(coord) {
            None => return Err(BoardDefect::OffBoard(coord)),
            Some(CellKind::Obstacle) => return Err(BoardDefect::ThroughObstacle(coord)),
            Some(_) => {}
        }
    }
    if let Some(coord) = first_repeated_cell(solution.as_slice()) {
        return Err(BoardDefect::RepeatedCell(coord));
    }
    if let Some((a, b)) = first_non_adjacent_step(solution.as_slice()) {
        return Err(BoardDefect::NonAdjacentStep(a, b));
    }

    let open_cells = grid.open_cells_count().0;
    if solution.len() != open_cells {
        return Err(BoardDefect::PathLengthMismatch { path: solution.len(), open_cells });
    }

    let components = connected_components(&grid.passage_graph());
    if components != 1 {
        return Err(BoardDefect::Disconnected { components });
    }

    Ok(())
}
