// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triangular Peg Solitaire Core - Board Topology and Game Rules
//!
//! This crate provides the rules engine for the triangular peg puzzle:
//! - Triangular board graph with directional adjacency
//! - Per-hole peg occupancy and jump detection
//! - The turn state machine from first peg removal to win/lose
//! - Display intents for whatever presentation shell drives the game

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod adapter;
pub mod board;
pub mod controller;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use adapter::Presenter;
pub use board::{BoardGraph, Direction, Hole};
pub use controller::{GameController, Tick};
pub use rules::{check_all_valid_moves, check_valid_moves, JumpTable, MoveValidator};

/// Smallest board that admits a move at all
pub const MIN_ROWS: usize = 2;

/// Largest board the core will build
pub const MAX_ROWS: usize = 1024;

/// Flat hole identifier, row-major from the apex starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoleId(pub usize);

impl HoleId {
    /// Index into the board arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for HoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row and column of a hole; row `r` holds columns `0..=r`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index, 0 at the apex
    pub row: usize,
    /// Column index within the row
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if the position lies on a board with the given number of rows
    pub fn is_valid(&self, num_rows: usize) -> bool {
        self.row < num_rows && self.col <= self.row
    }

    /// Flat id of this position (row-major triangle numbering)
    pub fn to_id(&self) -> HoleId {
        HoleId(self.row * (self.row + 1) / 2 + self.col)
    }
}

/// Phases of a single game, in the order the controller walks them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to pick any peg to take off the full board
    RemoveFirstPeg,
    /// Scanning every hole for legal jumps
    CheckAllValidMoves,
    /// Waiting for the player to pick a peg that can jump
    WaitForPegSelection,
    /// Marking the landing holes of the selected peg
    HighlightValidDestinations,
    /// Waiting for the player to pick a landing hole
    WaitForDestinationSelection,
    /// Executing the jump
    MovePiece,
    /// No jumps left
    GameOver,
}

impl Phase {
    /// Phases that suspend until a gesture arrives
    pub fn awaits_input(&self) -> bool {
        matches!(
            self,
            Phase::RemoveFirstPeg | Phase::WaitForPegSelection | Phase::WaitForDestinationSelection
        )
    }
}

/// Colour class of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusColor {
    Neutral,
    Win,
    Lose,
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Exactly one peg left
    Win,
    /// More than one peg left with no jumps
    Lose,
}

impl From<Outcome> for StatusColor {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => StatusColor::Win,
            Outcome::Lose => StatusColor::Lose,
        }
    }
}

/// Instructions the core issues to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum DisplayIntent {
    /// Turn the highlight ring of a hole on or off
    Highlight {
        hole: HoleId,
        on: bool,
    },
    /// Show or hide the pointing icon over the selected peg
    PointingIndicator {
        hole: HoleId,
        on: bool,
    },
    /// Repaint a hole as filled or empty
    Peg {
        hole: HoleId,
        present: bool,
    },
    /// Replace the instruction line
    StatusText {
        text: String,
    },
    /// Recolour the instruction line
    StatusColor {
        color: StatusColor,
    },
}

/// Errors that can occur while setting up or addressing the board
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requested board is too small to play on
    #[error("Board needs at least {min} rows, got {rows}")]
    TooFewRows {
        /// Rows requested
        rows: usize,
        /// Minimum playable rows
        min: usize,
    },

    /// The requested board is larger than the core builds
    #[error("Board can have at most {max} rows, got {rows}")]
    TooManyRows {
        /// Rows requested
        rows: usize,
        /// Maximum rows
        max: usize,
    },

    /// Board setup is only allowed before the first peg is removed
    #[error("Pegs can only be placed before the game starts (phase {phase:?})")]
    GameInProgress {
        /// Phase the controller was in
        phase: Phase,
    },

    /// The hole id is outside the board
    #[error("Hole {0} is not on the board")]
    UnknownHole(HoleId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ids_follow_triangle_numbers() {
        assert_eq!(Position::new(0, 0).to_id(), HoleId(0));
        assert_eq!(Position::new(1, 1).to_id(), HoleId(2));
        assert_eq!(Position::new(2, 0).to_id(), HoleId(3));
        assert_eq!(Position::new(4, 4).to_id(), HoleId(14));
    }

    #[test]
    fn position_validity() {
        assert!(Position::new(2, 2).is_valid(3));
        assert!(!Position::new(2, 3).is_valid(3));
        assert!(!Position::new(3, 0).is_valid(3));
    }

    #[test]
    fn awaiting_phases() {
        assert!(Phase::RemoveFirstPeg.awaits_input());
        assert!(Phase::WaitForDestinationSelection.awaits_input());
        assert!(!Phase::MovePiece.awaits_input());
        assert!(!Phase::GameOver.awaits_input());
    }

    #[test]
    fn intents_serialize_with_tag() {
        let json = serde_json::to_string(&DisplayIntent::Highlight { hole: HoleId(4), on: true }).unwrap();
        assert_eq!(json, r#"{"intent":"highlight","hole":4,"on":true}"#);
    }
}
