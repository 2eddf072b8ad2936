// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn state machine
//!
//! The controller owns the board and walks it through the phases of a game. Each call to
//! [`GameController::tick`] does exactly one phase's work and hands back the display intents
//! that work produced. Gestures are queued by [`GameController::on_gesture`] and consumed by
//! the next tick of the phase that is waiting for them.

use crate::{
    board::BoardGraph, rules, DisplayIntent, GameError, HoleId, Outcome, Phase, StatusColor,
    MIN_ROWS,
};
use serde::{Deserialize, Serialize};

pub const STATUS_REMOVE_FIRST: &str = "Click first peg to remove";
pub const STATUS_SELECT_PEG: &str = "Click peg to move";
pub const STATUS_SELECT_DESTINATION: &str = "Click spot to move peg";
pub const STATUS_WIN: &str = "Game Over!\nYou Win!";
pub const STATUS_LOSE: &str = "Game Over!\nYou Lose!";

/// Result of one tick: the phase the controller is now in and what to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub phase: Phase,
    pub intents: Vec<DisplayIntent>,
}

/// Drives a single game from the first peg removal to game over
#[derive(Debug, Clone)]
pub struct GameController {
    board: BoardGraph,
    phase: Phase,
    /// Peg chosen to jump; set from `WaitForPegSelection` until the move completes
    selected: Option<HoleId>,
    /// Landing hole; only ever set while the move is being executed
    destination: Option<HoleId>,
    /// Gesture waiting for the next tick of an input phase
    pending: Option<HoleId>,
    remaining_pegs: usize,
    outcome: Option<Outcome>,
    outbox: Vec<DisplayIntent>,
}

impl GameController {
    /// Start a game on a fresh board of `num_rows` rows
    pub fn new(num_rows: usize) -> Result<Self, GameError> {
        Self::check_rows(num_rows)?;
        Ok(Self::fresh(BoardGraph::new(num_rows)?))
    }

    /// Throw away the current game and start over on a rebuilt board
    ///
    /// On error the current game is left untouched.
    pub fn new_game(&mut self, num_rows: usize) -> Result<&BoardGraph, GameError> {
        Self::check_rows(num_rows)?;
        let board = BoardGraph::new(num_rows)?;
        *self = Self::fresh(board);
        Ok(&self.board)
    }

    fn check_rows(num_rows: usize) -> Result<(), GameError> {
        if num_rows < MIN_ROWS {
            return Err(GameError::TooFewRows {
                rows: num_rows,
                min: MIN_ROWS,
            });
        }
        Ok(())
    }

    fn fresh(board: BoardGraph) -> Self {
        let mut outbox: Vec<DisplayIntent> = board
            .ids()
            .map(|hole| DisplayIntent::Peg { hole, present: true })
            .collect();
        outbox.push(DisplayIntent::StatusText {
            text: STATUS_REMOVE_FIRST.to_string(),
        });
        outbox.push(DisplayIntent::StatusColor {
            color: StatusColor::Neutral,
        });

        tracing::info!(rows = board.num_rows(), holes = board.len(), "New game");

        Self {
            remaining_pegs: board.total_pegs(),
            board,
            phase: Phase::RemoveFirstPeg,
            selected: None,
            destination: None,
            pending: None,
            outcome: None,
            outbox,
        }
    }

    /// The board being played
    pub fn board(&self) -> &BoardGraph {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<HoleId> {
        self.selected
    }

    pub fn destination(&self) -> Option<HoleId> {
        self.destination
    }

    /// Pegs still on the board
    pub fn remaining_pegs(&self) -> usize {
        self.remaining_pegs
    }

    /// Pegs the board started with
    pub fn total_peg_count(&self) -> usize {
        self.board.total_pegs()
    }

    /// Set once the game over phase has run
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_valid_selection(&self, hole: HoleId) -> bool {
        self.board.is_valid_selection(hole)
    }

    pub fn is_valid_destination(&self, hole: HoleId) -> bool {
        self.board.is_valid_destination(hole)
    }

    /// Place or remove a peg directly, bypassing the turn flow
    ///
    /// Used to set up positions before the first peg is removed; any later phase
    /// trusts jump tables this would leave stale, so it is refused with
    /// [`GameError::GameInProgress`]. Jump legality is computed by the first
    /// `CheckAllValidMoves` phase.
    pub fn set_peg(&mut self, hole: HoleId, present: bool) -> Result<(), GameError> {
        if self.phase != Phase::RemoveFirstPeg {
            return Err(GameError::GameInProgress { phase: self.phase });
        }
        self.board.set_peg(hole, present)?;
        self.remaining_pegs = self.board.peg_count();
        self.outbox.push(DisplayIntent::Peg { hole, present });
        Ok(())
    }

    /// Record a hole tap; returns whether the current phase accepts it
    ///
    /// Taps that don't fit the phase are dropped without any state change.
    pub fn on_gesture(&mut self, hole: HoleId) -> bool {
        let accepted = self.board.hole(hole).is_some()
            && match self.phase {
                Phase::RemoveFirstPeg => true,
                Phase::WaitForPegSelection => self.board.is_valid_selection(hole),
                Phase::WaitForDestinationSelection => self.board.is_valid_destination(hole),
                _ => false,
            };

        if accepted {
            tracing::debug!(%hole, phase = ?self.phase, "Gesture accepted");
            self.pending = Some(hole);
        } else {
            tracing::debug!(%hole, phase = ?self.phase, "Gesture ignored");
        }

        accepted
    }

    /// Do one phase's worth of work
    pub fn tick(&mut self) -> Tick {
        match self.phase {
            Phase::RemoveFirstPeg => self.remove_first_peg(),
            Phase::CheckAllValidMoves => self.check_all_valid_moves(),
            Phase::WaitForPegSelection => self.wait_for_peg_selection(),
            Phase::HighlightValidDestinations => self.highlight_valid_destinations(),
            Phase::WaitForDestinationSelection => self.wait_for_destination_selection(),
            Phase::MovePiece => self.move_piece(),
            Phase::GameOver => self.game_over(),
        }

        Tick {
            phase: self.phase,
            intents: std::mem::take(&mut self.outbox),
        }
    }

    /// True when nothing more can happen without a new gesture
    pub fn is_idle(&self) -> bool {
        if self.phase == Phase::GameOver {
            return self.outcome.is_some();
        }
        self.phase.awaits_input() && self.pending.is_none()
    }

    /// Tick until the controller is waiting for input or has announced the result
    pub fn settle(&mut self) -> Vec<DisplayIntent> {
        let mut intents = Vec::new();
        loop {
            intents.extend(self.tick().intents);
            if self.is_idle() {
                return intents;
            }
        }
    }

    /// Entry point for the presentation layer: a hole was tapped
    pub fn notify_hole_selected(&mut self, hole: HoleId) -> Vec<DisplayIntent> {
        self.on_gesture(hole);
        self.settle()
    }

    fn advance(&mut self, next: Phase) {
        tracing::debug!(from = ?self.phase, to = ?next, "Phase transition");
        self.phase = next;

        let status = match next {
            Phase::WaitForPegSelection => STATUS_SELECT_PEG,
            Phase::WaitForDestinationSelection => STATUS_SELECT_DESTINATION,
            _ => return,
        };
        self.outbox.push(DisplayIntent::StatusText {
            text: status.to_string(),
        });
    }

    fn remove_first_peg(&mut self) {
        let Some(hole) = self.pending.take() else {
            return;
        };

        let had_peg = self.board.has_peg(hole);
        if let Err(err) = self.board.set_peg(hole, false) {
            tracing::warn!(%err, "Cannot remove first peg");
            return;
        }
        if had_peg {
            self.remaining_pegs -= 1;
        }
        self.outbox.push(DisplayIntent::Peg { hole, present: false });
        tracing::info!(%hole, "First peg removed");

        self.advance(Phase::CheckAllValidMoves);
    }

    fn check_all_valid_moves(&mut self) {
        let movable = rules::check_all_valid_moves(&mut self.board);

        for hole in self.board.ids() {
            self.outbox.push(DisplayIntent::Highlight {
                hole,
                on: self.board.is_valid_selection(hole),
            });
        }

        if movable.is_empty() {
            self.advance(Phase::GameOver);
        } else {
            self.advance(Phase::WaitForPegSelection);
        }
    }

    fn wait_for_peg_selection(&mut self) {
        let Some(hole) = self.pending.take() else {
            return;
        };

        if !self.board.is_valid_selection(hole) {
            tracing::debug!(%hole, "Selection no longer valid");
            return;
        }
        self.selected = Some(hole);
        self.advance(Phase::HighlightValidDestinations);
    }

    fn highlight_valid_destinations(&mut self) {
        let Some(selected) = self.selected else {
            self.abandon_move("no peg selected");
            return;
        };

        for hole in self.board.ids() {
            self.outbox.push(DisplayIntent::Highlight { hole, on: false });
        }
        self.outbox.push(DisplayIntent::PointingIndicator {
            hole: selected,
            on: true,
        });

        for landing in self.landings(selected) {
            self.board.set_valid_destination(landing, true);
            self.outbox.push(DisplayIntent::Highlight {
                hole: landing,
                on: true,
            });
        }

        self.advance(Phase::WaitForDestinationSelection);
    }

    fn wait_for_destination_selection(&mut self) {
        let Some(hole) = self.pending.take() else {
            return;
        };

        if !self.board.is_valid_destination(hole) {
            tracing::debug!(%hole, "Destination no longer valid");
            return;
        }
        self.destination = Some(hole);
        self.advance(Phase::MovePiece);
    }

    fn move_piece(&mut self) {
        let (Some(from), Some(to)) = (self.selected, self.destination) else {
            self.abandon_move("move without selection and destination");
            return;
        };
        let Some(jumped) = self.board.jumped_hole(from, to) else {
            self.abandon_move("destination missing from jump table");
            return;
        };

        self.clear_move_marks(from);

        for (hole, present) in [(from, false), (to, true), (jumped, false)] {
            // All three ids come from the board's own adjacency
            if self.board.set_peg(hole, present).is_ok() {
                self.outbox.push(DisplayIntent::Peg { hole, present });
            }
        }
        self.remaining_pegs -= 1;
        debug_assert_eq!(self.remaining_pegs, self.board.peg_count());

        tracing::info!(%from, over = %jumped, %to, remaining = self.remaining_pegs, "Peg jumped");

        self.selected = None;
        self.destination = None;
        self.advance(Phase::CheckAllValidMoves);
    }

    fn game_over(&mut self) {
        if self.outcome.is_some() {
            return;
        }

        let outcome = if self.remaining_pegs == 1 {
            Outcome::Win
        } else {
            Outcome::Lose
        };
        let text = match outcome {
            Outcome::Win => STATUS_WIN,
            Outcome::Lose => STATUS_LOSE,
        };

        self.outcome = Some(outcome);
        self.outbox.push(DisplayIntent::StatusText {
            text: text.to_string(),
        });
        self.outbox.push(DisplayIntent::StatusColor {
            color: outcome.into(),
        });

        tracing::info!(?outcome, remaining = self.remaining_pegs, "Game over");
    }

    fn landings(&self, from: HoleId) -> Vec<HoleId> {
        self.board
            .jump_table(from)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Drop destination highlights and the pointing icon left by the highlight phase
    fn clear_move_marks(&mut self, from: HoleId) {
        for landing in self.landings(from) {
            self.board.set_valid_destination(landing, false);
            self.outbox.push(DisplayIntent::Highlight {
                hole: landing,
                on: false,
            });
        }
        self.outbox.push(DisplayIntent::PointingIndicator {
            hole: from,
            on: false,
        });
    }

    /// The validator and the controller disagree; fails loudly in debug builds,
    /// otherwise drops the move and rescans the board
    fn abandon_move(&mut self, reason: &str) {
        tracing::error!(reason, phase = ?self.phase, "Abandoning move");
        debug_assert!(false, "inconsistent move state: {reason}");

        if let Some(from) = self.selected {
            self.clear_move_marks(from);
        }
        self.selected = None;
        self.destination = None;
        self.advance(Phase::CheckAllValidMoves);
    }
}
