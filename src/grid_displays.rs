use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellKind};
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

/// Shows what each cell holds: S, G, open floor or an obstacle block.
#[derive(Debug)]
pub struct KindDisplay<'a> {
    grid: &'a Grid,
}
impl<'a> KindDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        KindDisplay { grid }
    }
}
impl<'a> GridDisplay for KindDisplay<'a> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        match self.grid.kind_at(coord) {
            Some(CellKind::Obstacle) => String::from("███"),
            Some(kind) => format!(" {} ", kind.glyph()),
            None => String::from("   "),
        }
    }
}

/// Numbers each cell of a path with its step, starting from 1.
#[derive(Debug)]
pub struct PathDisplay<'a> {
    grid: &'a Grid,
    steps: FnvHashMap<Cartesian2DCoordinate, usize>,
}
impl<'a> PathDisplay<'a> {
    pub fn new(grid: &'a Grid, path: &[Cartesian2DCoordinate]) -> Self {
        let mut steps = utils::fnv_hashmap(path.len());
        for (step, coord) in path.iter().enumerate() {
            steps.entry(*coord).or_insert(step + 1);
        }
        PathDisplay { grid, steps }
    }
}
impl<'a> GridDisplay for PathDisplay<'a> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(step) = self.steps.get(&coord) {
            // centre align, padding 3
            format!("{:^3}", step)
        } else if self.grid.kind_at(coord) == Some(CellKind::Obstacle) {
            String::from("███")
        } else {
            String::from("   ")
        }
    }
}

/// Draw the board inside a box, one text line per row.
pub fn render_grid(grid: &Grid, display: &dyn GridDisplay) -> String {
    const WALL_LR_3: &str = "───";
    const WALL_UD: &str = "│";
    const WALL_RD: &str = "┌";
    const WALL_LD: &str = "┐";
    const WALL_RU: &str = "└";
    const WALL_LU: &str = "┘";

    let mut output = String::from(WALL_RD);
    output.push_str(&WALL_LR_3.repeat(grid.dimension()));
    output.push_str(WALL_LD);
    output.push('\n');

    for row in grid.iter_row() {
        output.push_str(WALL_UD);
        for coord in row {
            output.push_str(&display.render_cell_body(coord));
        }
        output.push_str(WALL_UD);
        output.push('\n');
    }

    output.push_str(WALL_RU);
    output.push_str(&WALL_LR_3.repeat(grid.dimension()));
    output.push_str(WALL_LU);
    output.push('\n');
    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_grid(self, &KindDisplay::new(self)))
    }
}
