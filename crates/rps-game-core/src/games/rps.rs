//! Rock-Paper-Scissors plays and judging.

use crate::crypto::RevealValue;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rock-Paper-Scissors play
///
/// Discriminants match the residue of a revealed value modulo 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Play {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Play {
    pub const ALL: [Play; 3] = [Play::Rock, Play::Paper, Play::Scissors];

    /// The maker's play encoded by a revealed value (`value mod 3`)
    pub fn from_reveal(value: &RevealValue) -> Play {
        match value.residue_mod3() {
            0 => Play::Rock,
            1 => Play::Paper,
            _ => Play::Scissors,
        }
    }

    /// Check if this play beats the other
    pub fn beats(&self, other: &Play) -> bool {
        matches!(
            (self, other),
            (Play::Rock, Play::Scissors) | (Play::Scissors, Play::Paper) | (Play::Paper, Play::Rock)
        )
    }
}

impl TryFrom<u8> for Play {
    type Error = GameError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Play::Rock),
            1 => Ok(Play::Paper),
            2 => Ok(Play::Scissors),
            other => Err(GameError::InvalidPlay(other)),
        }
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Play::Rock => write!(f, "Rock"),
            Play::Paper => write!(f, "Paper"),
            Play::Scissors => write!(f, "Scissors"),
        }
    }
}

/// Result of a settled game from the maker's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    MakerWins,
    TakerWins,
    Tie,
}

/// Decide a game from both plays
pub fn judge(maker: Play, taker: Play) -> Outcome {
    if maker == taker {
        Outcome::Tie
    } else if maker.beats(&taker) {
        Outcome::MakerWins
    } else {
        Outcome::TakerWins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_beats_scissors() {
        assert_eq!(judge(Play::Rock, Play::Scissors), Outcome::MakerWins);
        assert_eq!(judge(Play::Scissors, Play::Rock), Outcome::TakerWins);
    }

    #[test]
    fn test_scissors_beats_paper() {
        assert_eq!(judge(Play::Scissors, Play::Paper), Outcome::MakerWins);
        assert_eq!(judge(Play::Paper, Play::Scissors), Outcome::TakerWins);
    }

    #[test]
    fn test_paper_beats_rock() {
        assert_eq!(judge(Play::Paper, Play::Rock), Outcome::MakerWins);
        assert_eq!(judge(Play::Rock, Play::Paper), Outcome::TakerWins);
    }

    #[test]
    fn test_ties() {
        for play in Play::ALL {
            assert_eq!(judge(play, play), Outcome::Tie);
        }
    }

    #[test]
    fn test_all_outcomes() {
        // All 9 combinations
        let mut maker_wins = 0;
        let mut taker_wins = 0;
        let mut ties = 0;

        for maker in Play::ALL {
            for taker in Play::ALL {
                match judge(maker, taker) {
                    Outcome::MakerWins => maker_wins += 1,
                    Outcome::TakerWins => taker_wins += 1,
                    Outcome::Tie => ties += 1,
                }
            }
        }

        assert_eq!(maker_wins, 3);
        assert_eq!(taker_wins, 3);
        assert_eq!(ties, 3);
    }

    #[test]
    fn test_from_reveal_uses_mod3() {
        assert_eq!(Play::from_reveal(&RevealValue::from(6)), Play::Rock);
        assert_eq!(Play::from_reveal(&RevealValue::from(7)), Play::Paper);
        assert_eq!(Play::from_reveal(&RevealValue::from(11)), Play::Scissors);
    }

    #[test]
    fn test_try_from_u8() {
        assert_eq!(Play::try_from(0).unwrap(), Play::Rock);
        assert_eq!(Play::try_from(2).unwrap(), Play::Scissors);
        assert!(matches!(Play::try_from(3), Err(GameError::InvalidPlay(3))));
    }

    #[test]
    fn test_discriminants() {
        for play in Play::ALL {
            assert_eq!(Play::try_from(play as u8).unwrap(), play);
        }
    }
}
