//! **path_mazes** generates one-stroke path puzzles.
//!
//! A board is a square of cells where every non-obstacle cell lies on a single walk that starts
//! in the top left corner and finishes on the goal. Players have to cover every open cell exactly
//! once. Boards come with the walk that carved them, which doubles as the hint source and the
//! reference solution.

pub mod cells;
pub mod difficulty;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod play;
pub mod units;
mod utils;
