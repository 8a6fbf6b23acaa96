use log::debug;

use crate::cells::{Cartesian2DCoordinate, CellKind, CompassPrimary};
use crate::grid::Grid;
use crate::pathing::{Hint, SolutionPath};
use crate::utils::{self, FnvHashSet};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum BlockReason {
    OutOfBounds,
    Obstacle,
    /// Only the previous cell may be re-entered, and that undoes the last step.
    AlreadyVisited,
    Finished,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveOutcome {
    Advanced,
    Undone,
    /// On the goal with every open cell walked.
    Completed,
    /// On the goal, but some open cells were skipped. The player can step back to carry on.
    GoalReachedIncomplete,
    Blocked(BlockReason),
}

/// A player's walk across a board.
///
/// The board is only ever read; all the mutable state of a play through lives here.
#[derive(Debug, Clone)]
pub struct PlayerProgress<'a> {
    grid: &'a Grid,
    path: Vec<Cartesian2DCoordinate>,
    visited: FnvHashSet<Cartesian2DCoordinate>,
    complete: bool,
}

impl<'a> PlayerProgress<'a> {
    pub fn new(grid: &'a Grid) -> PlayerProgress<'a> {
        let mut progress = PlayerProgress {
            grid,
            path: Vec::with_capacity(grid.open_cells_count().0),
            visited: utils::fnv_hashset(grid.open_cells_count().0),
            complete: false,
        };
        progress.restart();
        progress
    }

    /// Back to the start cell, forgetting the walk so far.
    pub fn restart(&mut self) {
        let start = self.grid.start().unwrap_or_else(Cartesian2DCoordinate::origin);
        self.path.clear();
        self.visited.clear();
        self.path.push(start);
        self.visited.insert(start);
        self.complete = false;
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Where the player stands.
    #[inline]
    pub fn position(&self) -> Cartesian2DCoordinate {
        self.path[self.path.len() - 1]
    }

    /// Cells walked so far, start first.
    #[inline]
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        &self.path
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn has_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.visited.contains(&coord)
    }

    /// Open cells not yet walked.
    pub fn remaining_cells(&self) -> usize {
        self.grid.open_cells_count().0 - self.path.len()
    }

    pub fn try_move(&mut self, direction: CompassPrimary) -> MoveOutcome {
        if self.complete {
            return MoveOutcome::Blocked(BlockReason::Finished);
        }

        let target = match self.grid.neighbour_at_direction(self.position(), direction) {
            Some(coord) => coord,
            None => return MoveOutcome::Blocked(BlockReason::OutOfBounds),
        };

        let kind = match self.grid.kind_at(target) {
            Some(CellKind::Obstacle) | None => return MoveOutcome::Blocked(BlockReason::Obstacle),
            Some(kind) => kind,
        };

        if self.path.len() > 1 && self.path[self.path.len() - 2] == target {
            if let Some(left) = self.path.pop() {
                self.visited.remove(&left);
            }
            return MoveOutcome::Undone;
        }

        if self.visited.contains(&target) {
            return MoveOutcome::Blocked(BlockReason::AlreadyVisited);
        }

        self.path.push(target);
        self.visited.insert(target);

        if kind != CellKind::Goal {
            MoveOutcome::Advanced
        } else if self.remaining_cells() == 0 {
            debug!("Board completed in {} steps", self.path.len());
            self.complete = true;
            MoveOutcome::Completed
        } else {
            MoveOutcome::GoalReachedIncomplete
        }
    }

    /// Next solution cells from here, or how far along the walk went wrong.
    pub fn hint(&self, solution: &SolutionPath) -> Hint {
        solution.hint(&self.path)
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CompassPrimary::{East, North, South, West};
    use crate::generators;
    use crate::difficulty::Difficulty;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    // S . .
    // # # .
    // G . .
    fn board() -> Grid {
        Grid::from_text_rows(&["S..", "##.", "G.."])
    }

    #[test]
    fn starts_on_start() {
        let g = board();
        let progress = PlayerProgress::new(&g);
        assert_eq!(progress.position(), gc(0, 0));
        assert_eq!(progress.path(), &[gc(0, 0)]);
        assert_eq!(progress.remaining_cells(), 6);
        assert!(!progress.is_complete());
    }

    #[test]
    fn blocked_moves_do_not_change_anything() {
        let g = board();
        let mut progress = PlayerProgress::new(&g);

        assert_eq!(progress.try_move(North), MoveOutcome::Blocked(BlockReason::OutOfBounds));
        assert_eq!(progress.try_move(West), MoveOutcome::Blocked(BlockReason::OutOfBounds));
        assert_eq!(progress.try_move(South), MoveOutcome::Blocked(BlockReason::Obstacle));
        assert_eq!(progress.path(), &[gc(0, 0)]);
    }

    #[test]
    fn stepping_back_undoes() {
        let g = board();
        let mut progress = PlayerProgress::new(&g);

        assert_eq!(progress.try_move(East), MoveOutcome::Advanced);
        assert_eq!(progress.try_move(East), MoveOutcome::Advanced);
        assert_eq!(progress.position(), gc(2, 0));
        assert_eq!(progress.try_move(West), MoveOutcome::Undone);
        assert_eq!(progress.position(), gc(1, 0));
        assert!(!progress.has_visited(gc(2, 0)));
        assert_eq!(progress.try_move(West), MoveOutcome::Undone);
        assert_eq!(progress.path(), &[gc(0, 0)]);
    }

    #[test]
    fn visited_cells_cannot_be_reentered() {
        let g = Grid::from_text_rows(&["S..", "...", "..G"]);
        let mut progress = PlayerProgress::new(&g);

        assert_eq!(progress.try_move(East), MoveOutcome::Advanced);
        assert_eq!(progress.try_move(South), MoveOutcome::Advanced);
        assert_eq!(progress.try_move(West), MoveOutcome::Advanced);
        assert_eq!(progress.try_move(North), MoveOutcome::Blocked(BlockReason::AlreadyVisited));
        assert_eq!(progress.position(), gc(0, 1));
    }

    #[test]
    fn goal_needs_every_cell() {
        let g = Grid::from_text_rows(&["S.", "G."]);
        let mut progress = PlayerProgress::new(&g);

        assert_eq!(progress.try_move(South), MoveOutcome::GoalReachedIncomplete);
        assert!(!progress.is_complete());
        assert_eq!(progress.try_move(North), MoveOutcome::Undone);

        assert_eq!(progress.try_move(East), MoveOutcome::Advanced);
        assert_eq!(progress.try_move(South), MoveOutcome::Advanced);
        assert_eq!(progress.try_move(West), MoveOutcome::Completed);
        assert!(progress.is_complete());
        assert_eq!(progress.remaining_cells(), 0);
        assert_eq!(progress.try_move(East), MoveOutcome::Blocked(BlockReason::Finished));
    }

    #[test]
    fn restart_forgets_the_walk() {
        let g = board();
        let mut progress = PlayerProgress::new(&g);
        progress.try_move(East);
        progress.try_move(East);
        progress.restart();
        assert_eq!(progress.path(), &[gc(0, 0)]);
        assert!(!progress.has_visited(gc(1, 0)));
        assert_eq!(progress.try_move(East), MoveOutcome::Advanced);
    }

    #[test]
    fn following_the_solution_completes_a_generated_board() {
        let maze = generators::generate_for_difficulty(Difficulty::Easy);
        let solution = maze.solution();
        let mut progress = PlayerProgress::new(maze.grid());

        let directions = [North, South, East, West];
        let mut last_outcome = None;
        for &next in solution.iter().skip(1) {
            let here = progress.position();
            let dir = directions.iter()
                .cloned()
                .find(|&d| maze.grid().neighbour_at_direction(here, d) == Some(next))
                .expect("solution steps are orthogonal");
            match progress.hint(solution) {
                Hint::NextSteps(steps) => assert_eq!(steps[0], next),
                other => panic!("expected next steps, got {:?}", other),
            }
            last_outcome = Some(progress.try_move(dir));
        }

        assert_eq!(last_outcome, Some(MoveOutcome::Completed));
        assert_eq!(progress.path(), solution.as_slice());
        assert_eq!(progress.hint(solution), Hint::NoneLeft);
    }
}
