// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::error_chain;

use crate::generators::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

error_chain! {

    errors {
        InvalidBoardSize(n: usize) {
            description("invalid board size")
            display("board size {} is outside {}..={}", n, MIN_BOARD_SIZE, MAX_BOARD_SIZE)
        }

        TooManyObstacles(obstacles: usize, n: usize) {
            description("too many obstacles for the board")
            display("{} obstacles leave no room for a start and a goal on a {}x{} board",
                    obstacles, n, n)
        }

        UnknownDifficulty(name: String) {
            description("unknown difficulty")
            display("unknown difficulty '{}', expected easy, normal or hard", name)
        }
    }
}
