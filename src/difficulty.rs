use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::*;
use crate::generators::BoardSpec;
use crate::units::{BoardSize, ObstacleCount};

/// The fixed board tiers a player picks from.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

pub const ALL_DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

impl Difficulty {
    pub fn board_size(self) -> BoardSize {
        match self {
            Difficulty::Easy => BoardSize(5),
            Difficulty::Normal => BoardSize(7),
            Difficulty::Hard => BoardSize(9),
        }
    }

    pub fn obstacles(self) -> ObstacleCount {
        match self {
            Difficulty::Easy => ObstacleCount(2),
            Difficulty::Normal => ObstacleCount(5),
            Difficulty::Hard => ObstacleCount(10),
        }
    }

    pub fn board_spec(self) -> BoardSpec {
        BoardSpec::for_difficulty(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Difficulty> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ErrorKind::UnknownDifficulty(s.to_string()).into()),
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::OpenCellCount;

    #[test]
    fn tier_table() {
        let table: Vec<(usize, usize)> = ALL_DIFFICULTIES.iter()
            .map(|d| (d.board_size().0, d.obstacles().0))
            .collect();
        assert_eq!(table, vec![(5, 2), (7, 5), (9, 10)]);
    }

    #[test]
    fn tier_specs_are_valid() {
        assert_eq!(Difficulty::Easy.board_spec().target_open_count(), OpenCellCount(23));
        assert_eq!(Difficulty::Normal.board_spec().target_open_count(), OpenCellCount(44));
        assert_eq!(Difficulty::Hard.board_spec().target_open_count(), OpenCellCount(71));
    }

    #[test]
    fn parse_names() {
        assert_eq!("easy".parse::<Difficulty>().ok(), Some(Difficulty::Easy));
        assert_eq!(" Normal ".parse::<Difficulty>().ok(), Some(Difficulty::Normal));
        assert_eq!("HARD".parse::<Difficulty>().ok(), Some(Difficulty::Hard));
        for d in &ALL_DIFFICULTIES {
            assert_eq!(d.to_string().parse::<Difficulty>().ok(), Some(*d));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        match "expert".parse::<Difficulty>() {
            Err(Error(ErrorKind::UnknownDifficulty(name), _)) => assert_eq!(name, "expert"),
            other => panic!("expected an unknown difficulty error, got {:?}", other),
        }
    }
}
