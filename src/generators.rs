//! One-stroke board generation.
//!
//! A board is carved by a self-avoiding random walk from the top left corner. At every step the
//! walk prefers the neighbour with the fewest unvisited neighbours of its own (Warnsdorff's rule
//! on a 4-connected grid), which keeps it from sealing off pockets of cells it can never come
//! back to. Cells the walk never reaches become obstacles, the last cell it reaches is the goal.
//!
//! Attempts that get stuck before reaching the target length are thrown away and retried. When the
//! attempt budget runs out a serpentine board with no obstacles is returned instead, so callers
//! always get a playable board.

use bit_set::BitSet;
use error_chain::bail;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Serialize;
use smallvec::SmallVec;

use crate::cells::{self, Cartesian2DCoordinate};
use crate::difficulty::Difficulty;
use crate::errors::*;
use crate::grid::Grid;
use crate::pathing::SolutionPath;
use crate::units::{BoardSize, ObstacleCount, OpenCellCount};

pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 1024;

/// Randomised attempts before giving up and using the serpentine board.
pub const DEFAULT_MAX_ATTEMPTS: usize = 50_000;

/// Chance of stepping to the second lowest degree neighbour instead of the lowest.
pub const SECOND_BEST_PROBABILITY: f64 = 0.2;

/// A board size and obstacle count that can be generated.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize)]
pub struct BoardSpec {
    size: BoardSize,
    obstacles: ObstacleCount,
}

impl BoardSpec {
    /// Fails if the board is smaller than 2x2 (or absurdly large), or if the obstacles would not
    /// leave at least a start and a separate goal cell. A single open cell would have to be both
    /// the start and the goal, so `n * n - 1` obstacles is rejected as `TooManyObstacles` rather
    /// than generated.
    pub fn new(size: BoardSize, obstacles: ObstacleCount) -> Result<BoardSpec> {
        let BoardSize(n) = size;
        if n < MIN_BOARD_SIZE || n > MAX_BOARD_SIZE {
            bail!(ErrorKind::InvalidBoardSize(n));
        }

        let ObstacleCount(obstacles_count) = obstacles;
        if obstacles_count > n * n - 2 {
            bail!(ErrorKind::TooManyObstacles(obstacles_count, n));
        }

        Ok(BoardSpec { size, obstacles })
    }

    pub fn for_difficulty(difficulty: Difficulty) -> BoardSpec {
        BoardSpec {
            size: difficulty.board_size(),
            obstacles: difficulty.obstacles(),
        }
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[inline]
    pub fn obstacles(&self) -> ObstacleCount {
        self.obstacles
    }

    /// Cells on the generated walk, start and goal included.
    #[inline]
    pub fn target_open_count(&self) -> OpenCellCount {
        OpenCellCount(self.size.0 * self.size.0 - self.obstacles.0)
    }
}

/// Tuning for the randomised walk.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct GeneratorConfig {
    max_attempts: usize,
    second_best_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            second_best_probability: SECOND_BEST_PROBABILITY,
        }
    }
}

impl GeneratorConfig {
    /// Zero attempts goes straight to the serpentine board.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Clamped into [0, 1]; NaN counts as 0.
    pub fn with_second_best_probability(mut self, probability: f64) -> Self {
        self.second_best_probability = if probability.is_nan() {
            0.0
        } else {
            probability.max(0.0).min(1.0)
        };
        self
    }

    #[inline]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    #[inline]
    pub fn second_best_probability(&self) -> f64 {
        self.second_best_probability
    }
}

/// How a board came to be.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize)]
pub enum GenerationOutcome {
    /// The random walk reached the target length on this attempt (1 based).
    Generated { attempts: usize },
    /// Every attempt got stuck; the board is the obstacle free serpentine.
    Fallback,
}

/// A generated board together with the walk that carved it.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    solution: SolutionPath,
    outcome: GenerationOutcome,
}

impl Maze {
    fn from_walk(size: BoardSize, walk: Vec<Cartesian2DCoordinate>, outcome: GenerationOutcome) -> Maze {
        Maze {
            grid: Grid::from_path(size, &walk),
            solution: SolutionPath::new(walk),
            outcome,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn solution(&self) -> &SolutionPath {
        &self.solution
    }

    #[inline]
    pub fn outcome(&self) -> GenerationOutcome {
        self.outcome
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == GenerationOutcome::Fallback
    }

    pub fn into_parts(self) -> (Grid, SolutionPath) {
        (self.grid, self.solution)
    }
}

/// Generate a board with the default tuning and a freshly seeded random source.
pub fn generate(spec: &BoardSpec) -> Maze {
    let mut rng = XorShiftRng::seed_from_u64(rand::random());
    generate_with_rng(spec, &GeneratorConfig::default(), &mut rng)
}

/// Same seed, same spec, same board.
pub fn generate_seeded(spec: &BoardSpec, config: &GeneratorConfig, seed: u64) -> Maze {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    generate_with_rng(spec, config, &mut rng)
}

pub fn generate_for_difficulty(difficulty: Difficulty) -> Maze {
    generate(&difficulty.board_spec())
}

pub fn generate_with_rng<R: Rng>(spec: &BoardSpec, config: &GeneratorConfig, rng: &mut R) -> Maze {
    let size = spec.size();
    let OpenCellCount(target) = spec.target_open_count();

    for attempt in 1..=config.max_attempts() {
        if let Some(walk) = degree_biased_walk(size, target, config.second_best_probability(), rng) {
            debug!("Generated {}x{} board with {} open cells on attempt {}",
                   size.0, size.0, target, attempt);
            return Maze::from_walk(size, walk, GenerationOutcome::Generated { attempts: attempt });
        }
    }

    warn!("No {}x{} walk of {} cells found in {} attempts, using the serpentine board",
          size.0, size.0, target, config.max_attempts());
    Maze::from_walk(size, serpentine_walk(size), GenerationOutcome::Fallback)
}

/// Number of in-bounds, unvisited cells orthogonally adjacent to `coord`.
pub fn count_unvisited_neighbours(size: BoardSize, visited: &BitSet, coord: Cartesian2DCoordinate) -> usize {
    cells::orthogonal_neighbours(coord, size)
        .iter()
        .filter(|c| !is_visited(size, visited, **c))
        .count()
}

#[inline]
fn is_visited(size: BoardSize, visited: &BitSet, coord: Cartesian2DCoordinate) -> bool {
    coord.to_row_major_index(size).map_or(true, |index| visited.contains(index))
}

/// One walk attempt from the origin. None if it runs out of moves before `target` cells.
fn degree_biased_walk<R: Rng>(size: BoardSize,
                              target: usize,
                              second_best_probability: f64,
                              rng: &mut R)
                              -> Option<Vec<Cartesian2DCoordinate>> {
    let BoardSize(n) = size;
    let mut visited = BitSet::with_capacity(n * n);
    let mut current = Cartesian2DCoordinate::origin();
    let mut walk = Vec::with_capacity(target);

    visited.insert(0);
    walk.push(current);

    while walk.len() < target {
        let next = choose_next(size, &visited, current, second_best_probability, rng)?;
        if let Some(index) = next.to_row_major_index(size) {
            visited.insert(index);
        }
        walk.push(next);
        current = next;
    }

    Some(walk)
}

/// The unvisited neighbour of `current` with the fewest unvisited neighbours of its own, or with
/// probability `second_best_probability` the runner up. Ties are broken randomly. None when
/// every neighbour has been visited.
fn choose_next<R: Rng>(size: BoardSize,
                       visited: &BitSet,
                       current: Cartesian2DCoordinate,
                       second_best_probability: f64,
                       rng: &mut R)
                       -> Option<Cartesian2DCoordinate> {
    let mut candidates: SmallVec<[(usize, Cartesian2DCoordinate); 4]> =
        cells::orthogonal_neighbours(current, size)
            .into_iter()
            .filter(|&c| !is_visited(size, visited, c))
            .map(|c| (count_unvisited_neighbours(size, visited, c), c))
            .collect();

    if candidates.is_empty() {
        return None;
    }

    // Shuffle first so the stable sort breaks degree ties randomly
    candidates.shuffle(rng);
    candidates.sort_by_key(|&(degree, _)| degree);

    let pick = if candidates.len() > 1 && rng.gen_bool(second_best_probability) {
        1
    } else {
        0
    };
    Some(candidates[pick].1)
}

/// Boustrophedon over the whole board: east along even rows, west along odd rows.
///
/// Ends at (n-1, n-1) for odd `n`, and at (0, n-1) for even `n`.
pub fn serpentine_walk(size: BoardSize) -> Vec<Cartesian2DCoordinate> {
    let BoardSize(n) = size;
    let mut walk = Vec::with_capacity(n * n);
    for y in 0..n {
        if y % 2 == 0 {
            walk.extend((0..n).map(|x| Cartesian2DCoordinate::new(x as u32, y as u32)));
        } else {
            walk.extend((0..n).rev().map(|x| Cartesian2DCoordinate::new(x as u32, y as u32)));
        }
    }
    walk
}
