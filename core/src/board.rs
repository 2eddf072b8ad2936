// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation: the triangular hole arena and per-hole peg state

use crate::{rules::JumpTable, GameError, HoleId, Position, MAX_ROWS};
use serde::{Deserialize, Serialize};

/// Direction from one hole to an adjacent hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    /// All six directions, in slot order
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    /// Slot of this direction in a hole's neighbor array
    pub fn index(self) -> usize {
        match self {
            Direction::E => 0,
            Direction::W => 1,
            Direction::NE => 2,
            Direction::NW => 3,
            Direction::SE => 4,
            Direction::SW => 5,
        }
    }

    /// The direction pointing back the way we came
    pub fn reverse(self) -> Self {
        match self {
            Direction::E => Direction::W,
            Direction::W => Direction::E,
            Direction::NE => Direction::SW,
            Direction::NW => Direction::SE,
            Direction::SE => Direction::NW,
            Direction::SW => Direction::NE,
        }
    }

    /// Step from `pos` one hole in this direction, if that stays on a board of `num_rows`
    ///
    /// North is the row above (one hole shorter), so NE keeps the column and NW drops it by one.
    /// South is the row below, so SW keeps the column and SE raises it by one.
    pub fn step(self, pos: Position, num_rows: usize) -> Option<Position> {
        let (row, col) = (pos.row, pos.col);
        let next = match self {
            Direction::E => Position::new(row, col + 1),
            Direction::W => Position::new(row, col.checked_sub(1)?),
            Direction::NE => Position::new(row.checked_sub(1)?, col),
            Direction::NW => Position::new(row.checked_sub(1)?, col.checked_sub(1)?),
            Direction::SE => Position::new(row + 1, col + 1),
            Direction::SW => Position::new(row + 1, col),
        };

        next.is_valid(num_rows).then_some(next)
    }
}

/// One cell of the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hole {
    id: HoleId,
    position: Position,
    /// Neighbor ids by direction slot; `None` means the edge of the board
    neighbors: [Option<HoleId>; 6],
    has_peg: bool,
    valid_selection: bool,
    valid_destination: bool,
    /// Landing hole -> jumped hole, rebuilt by every legality pass
    #[serde(skip)]
    jumps: JumpTable,
}

impl Hole {
    fn new(id: HoleId, position: Position) -> Self {
        Self {
            id,
            position,
            neighbors: [None; 6],
            // Every hole starts out filled
            has_peg: true,
            valid_selection: false,
            valid_destination: false,
            jumps: JumpTable::new(),
        }
    }

    /// Flat id of this hole
    pub fn id(&self) -> HoleId {
        self.id
    }

    /// Row and column of this hole
    pub fn position(&self) -> Position {
        self.position
    }

    /// The adjacent hole in `dir`, if any
    pub fn neighbor(&self, dir: Direction) -> Option<HoleId> {
        self.neighbors[dir.index()]
    }

    /// Every populated direction with its neighbor
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, HoleId)> + '_ {
        Direction::ALL
            .iter()
            .filter_map(move |&dir| self.neighbor(dir).map(|id| (dir, id)))
    }

    pub fn has_peg(&self) -> bool {
        self.has_peg
    }

    /// True when this hole holds a peg with at least one legal jump
    pub fn is_valid_selection(&self) -> bool {
        self.valid_selection
    }

    /// True when this hole is a landing spot of the currently selected peg
    pub fn is_valid_destination(&self) -> bool {
        self.valid_destination
    }

    /// Jumps available from this hole as of the last legality pass
    pub fn jump_table(&self) -> &JumpTable {
        &self.jumps
    }

    pub(crate) fn set_jumps(&mut self, jumps: JumpTable) {
        self.valid_selection = !jumps.is_empty();
        self.jumps = jumps;
    }
}

/// The full triangle of holes, owned in a single arena indexed by `HoleId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardGraph {
    num_rows: usize,
    holes: Vec<Hole>,
}

impl BoardGraph {
    /// Build a board with `num_rows` rows, every hole filled
    ///
    /// Holes are numbered row by row from the apex:
    /// ```text
    ///         0
    ///       1   2
    ///     3   4   5
    ///   6   7   8   9
    /// ```
    ///
    /// Fails with [`GameError::TooManyRows`] above [`MAX_ROWS`].
    pub fn new(num_rows: usize) -> Result<Self, GameError> {
        if num_rows > MAX_ROWS {
            return Err(GameError::TooManyRows {
                rows: num_rows,
                max: MAX_ROWS,
            });
        }

        let total = num_rows * (num_rows + 1) / 2;
        let mut holes = Vec::with_capacity(total);

        for row in 0..num_rows {
            for col in 0..=row {
                let id = HoleId(holes.len());
                holes.push(Hole::new(id, Position::new(row, col)));
            }
        }

        let mut board = Self { num_rows, holes };
        board.link_neighbors();
        Ok(board)
    }

    /// Populate each hole's neighbor slots; purely geometric, done once
    fn link_neighbors(&mut self) {
        let num_rows = self.num_rows;

        for hole in &mut self.holes {
            for dir in Direction::ALL {
                hole.neighbors[dir.index()] = dir.step(hole.position, num_rows).map(|pos| pos.to_id());
            }
        }
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of holes on the board
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    /// Pegs on a freshly built board
    pub fn total_pegs(&self) -> usize {
        self.num_rows * (self.num_rows + 1) / 2
    }

    /// Pegs currently on the board
    pub fn peg_count(&self) -> usize {
        self.holes.iter().filter(|h| h.has_peg).count()
    }

    /// All holes in id order
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// All hole ids in order
    pub fn ids(&self) -> impl Iterator<Item = HoleId> {
        (0..self.holes.len()).map(HoleId)
    }

    /// Get the hole with the given id
    pub fn hole(&self, id: HoleId) -> Option<&Hole> {
        self.holes.get(id.index())
    }

    pub(crate) fn hole_mut(&mut self, id: HoleId) -> Option<&mut Hole> {
        self.holes.get_mut(id.index())
    }

    /// Id of the hole at `(row, col)`
    pub fn id_at(&self, row: usize, col: usize) -> Option<HoleId> {
        let pos = Position::new(row, col);
        pos.is_valid(self.num_rows).then(|| pos.to_id())
    }

    /// Row and column of a hole
    pub fn position(&self, id: HoleId) -> Option<Position> {
        self.hole(id).map(Hole::position)
    }

    /// Neighbor of `id` in `dir`
    pub fn neighbor(&self, id: HoleId, dir: Direction) -> Option<HoleId> {
        self.hole(id).and_then(|h| h.neighbor(dir))
    }

    /// Whether `id` holds a peg; holes off the board never do
    pub fn has_peg(&self, id: HoleId) -> bool {
        self.hole(id).is_some_and(Hole::has_peg)
    }

    /// Put a peg into or take it out of a hole
    ///
    /// Only the occupancy bit changes; jump tables stay stale until the next legality pass.
    pub fn set_peg(&mut self, id: HoleId, present: bool) -> Result<(), GameError> {
        let hole = self.hole_mut(id).ok_or(GameError::UnknownHole(id))?;
        hole.has_peg = present;
        Ok(())
    }

    pub fn is_valid_selection(&self, id: HoleId) -> bool {
        self.hole(id).is_some_and(Hole::is_valid_selection)
    }

    pub fn is_valid_destination(&self, id: HoleId) -> bool {
        self.hole(id).is_some_and(Hole::is_valid_destination)
    }

    pub(crate) fn set_valid_destination(&mut self, id: HoleId, valid: bool) {
        if let Some(hole) = self.hole_mut(id) {
            hole.valid_destination = valid;
        }
    }

    /// Jump table of a hole as of the last legality pass
    pub fn jump_table(&self, id: HoleId) -> Option<&JumpTable> {
        self.hole(id).map(Hole::jump_table)
    }

    /// The hole that would be removed when `from` jumps into `landing`
    pub fn jumped_hole(&self, from: HoleId, landing: HoleId) -> Option<HoleId> {
        self.jump_table(from)?.get(&landing).copied()
    }
}
