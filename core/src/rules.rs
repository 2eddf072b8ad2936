// SPDX-License-Identifier: MIT OR Apache-2.0

//! Jump legality
//!
//! A jump needs three holes in a line: the source (with a peg), its neighbor in some
//! direction (with a peg) and that neighbor's neighbor in the same direction (empty).
//! Legality is found by following the same direction twice through the board graph,
//! so no coordinate math happens here.

use crate::{board::BoardGraph, HoleId};
use std::collections::BTreeMap;

/// Landing hole -> hole that gets jumped (and removed) on the way there
pub type JumpTable = BTreeMap<HoleId, HoleId>;

/// Reads jump legality off a board without touching it
pub struct MoveValidator<'a> {
    board: &'a BoardGraph,
}

impl<'a> MoveValidator<'a> {
    /// Create a new validator over a board
    pub fn new(board: &'a BoardGraph) -> Self {
        Self { board }
    }

    /// Every jump the peg in `id` could make right now
    ///
    /// Empty when the hole has no peg or is off the board.
    pub fn jumps_from(&self, id: HoleId) -> JumpTable {
        let mut table = JumpTable::new();

        let hole = match self.board.hole(id) {
            Some(hole) if hole.has_peg() => hole,
            _ => return table,
        };

        for (dir, near) in hole.neighbors() {
            if !self.board.has_peg(near) {
                continue;
            }

            // Second hop continues from `near` in the same direction
            if let Some(far) = self.board.neighbor(near, dir) {
                if !self.board.has_peg(far) {
                    table.insert(far, near);
                }
            }
        }

        table
    }

    /// True if the peg in `id` has at least one jump
    pub fn can_jump(&self, id: HoleId) -> bool {
        !self.jumps_from(id).is_empty()
    }

    /// True if any peg on the board can jump
    pub fn any_jump(&self) -> bool {
        self.board.ids().any(|id| self.can_jump(id))
    }
}

/// Recompute the jump table of one hole and report whether it can move
///
/// Overwrites the hole's table and its valid-selection flag. Does nothing for ids off the board.
pub fn check_valid_moves(board: &mut BoardGraph, id: HoleId) -> bool {
    let jumps = MoveValidator::new(board).jumps_from(id);
    let valid = !jumps.is_empty();

    if let Some(hole) = board.hole_mut(id) {
        hole.set_jumps(jumps);
    }

    valid
}

/// Run `check_valid_moves` over every hole, returning the holes that can move
pub fn check_all_valid_moves(board: &mut BoardGraph) -> Vec<HoleId> {
    let ids: Vec<HoleId> = board.ids().collect();
    let movable: Vec<HoleId> = ids
        .into_iter()
        .filter(|&id| check_valid_moves(board, id))
        .collect();

    tracing::debug!(movable = movable.len(), pegs = board.peg_count(), "Checked all valid moves");
    movable
}
