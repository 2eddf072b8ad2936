// SPDX-License-Identifier: MIT OR Apache-2.0

use tripeg_core::{board::BoardGraph, Direction, HoleId, Position};

#[test]
fn hole_count_is_triangular() {
    for rows in 1..=12 {
        let board = BoardGraph::new(rows).unwrap();
        assert_eq!(board.len(), rows * (rows + 1) / 2, "rows = {}", rows);
    }
}

#[test]
fn row_r_has_r_plus_one_holes() {
    let board = BoardGraph::new(7).unwrap();
    for row in 0..7 {
        let in_row = board.holes().iter().filter(|h| h.position().row == row).count();
        assert_eq!(in_row, row + 1);
    }
}

#[test]
fn ids_are_row_major() {
    let board = BoardGraph::new(5).unwrap();
    let mut expected = 0;
    for row in 0..5 {
        for col in 0..=row {
            let hole = board.hole(HoleId(expected)).unwrap();
            assert_eq!(hole.id(), HoleId(expected));
            assert_eq!(hole.position(), Position::new(row, col));
            expected += 1;
        }
    }
}

#[test]
fn adjacency_is_symmetric() {
    for rows in 1..=10 {
        let board = BoardGraph::new(rows).unwrap();
        for hole in board.holes() {
            for (dir, neighbor) in hole.neighbors() {
                assert_eq!(
                    board.neighbor(neighbor, dir.reverse()),
                    Some(hole.id()),
                    "rows = {}, {} -{:?}-> {}",
                    rows,
                    hole.id(),
                    dir,
                    neighbor
                );
            }
        }
    }
}

#[test]
fn neighbors_follow_row_rules() {
    let board = BoardGraph::new(6).unwrap();
    for hole in board.holes() {
        let Position { row, col } = hole.position();

        let expect = |r: Option<usize>, c: Option<usize>| match (r, c) {
            (Some(r), Some(c)) => board.id_at(r, c),
            _ => None,
        };

        assert_eq!(hole.neighbor(Direction::NE), expect(row.checked_sub(1), Some(col)));
        assert_eq!(hole.neighbor(Direction::NW), expect(row.checked_sub(1), col.checked_sub(1)));
        assert_eq!(hole.neighbor(Direction::SW), expect(Some(row + 1), Some(col)));
        assert_eq!(hole.neighbor(Direction::SE), expect(Some(row + 1), Some(col + 1)));
        assert_eq!(hole.neighbor(Direction::E), expect(Some(row), Some(col + 1)));
        assert_eq!(hole.neighbor(Direction::W), expect(Some(row), col.checked_sub(1)));
    }
}

#[test]
fn corners_have_two_neighbors() {
    let board = BoardGraph::new(5).unwrap();
    for corner in [0, 10, 14] {
        assert_eq!(board.hole(HoleId(corner)).unwrap().neighbors().count(), 2);
    }
}

#[test]
fn single_hole_board_is_isolated() {
    let board = BoardGraph::new(1).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board.hole(HoleId(0)).unwrap().neighbors().count(), 0);
}

#[test]
fn board_starts_full() {
    let board = BoardGraph::new(5).unwrap();
    assert!(board.holes().iter().all(|h| h.has_peg()));
    assert!(board.holes().iter().all(|h| !h.is_valid_selection() && !h.is_valid_destination()));
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut board = BoardGraph::new(4).unwrap();
    board.set_peg(HoleId(4), false).unwrap();

    let json = serde_json::to_string(&board).unwrap();
    let restored: BoardGraph = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), 10);
    assert!(!restored.has_peg(HoleId(4)));
    assert_eq!(restored.neighbor(HoleId(4), Direction::SE), Some(HoleId(8)));
}
