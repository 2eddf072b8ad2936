// SPDX-License-Identifier: MIT OR Apache-2.0

use tempfile::tempdir;
use tripeg_cli::config::{load_config_from, save_config_to, CliConfig};
use tripeg_cli::render::TerminalView;
use tripeg_core::adapter::present;
use tripeg_core::{GameController, HoleId, Outcome, StatusColor};

/// Hole 0 removed, then (from, to) for every jump down to a single peg on hole 12
const FIFTEEN_HOLE_SOLUTION: [(usize, usize); 13] = [
    (3, 0),
    (5, 3),
    (0, 5),
    (6, 1),
    (9, 2),
    (11, 4),
    (12, 5),
    (1, 8),
    (2, 9),
    (14, 5),
    (5, 12),
    (13, 11),
    (10, 12),
];

#[test]
fn configured_game_is_won_on_screen() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    save_config_to(
        &config_path,
        &CliConfig {
            rows: 5,
            first_peg: Some(0),
            show_ids: false,
        },
    )
    .unwrap();

    let settings = load_config_from(&config_path).unwrap();
    settings.validate().unwrap();

    let mut game = GameController::new(settings.rows).unwrap();
    let mut view = TerminalView::new(settings.show_ids);
    present(&game.settle(), &mut view);

    let first = settings.first_peg.unwrap();
    present(&game.notify_hole_selected(HoleId(first)), &mut view);

    for (from, to) in FIFTEEN_HOLE_SOLUTION {
        present(&game.notify_hole_selected(HoleId(from)), &mut view);
        present(&game.notify_hole_selected(HoleId(to)), &mut view);
    }

    assert_eq!(game.outcome(), Some(Outcome::Win));
    assert_eq!(view.color(), StatusColor::Win);

    let output = view.render(game.board());
    assert_eq!(output.matches('●').count(), 1);
    assert_eq!(output.matches('·').count(), 14);
    // The survivor sits in the middle of the bottom row
    let bottom = output.lines().nth(4).unwrap();
    assert_eq!(bottom.trim(), "·   ·   ●   ·   ·");
    assert!(output.ends_with("[WIN] Game Over!\nYou Win!\n"));
}

#[test]
fn taps_in_the_wrong_phase_do_not_change_the_screen() {
    let mut game = GameController::new(4).unwrap();
    let mut view = TerminalView::new(true);
    present(&game.settle(), &mut view);
    present(&game.notify_hole_selected(HoleId(1)), &mut view);

    let before = view.render(game.board());

    // 4 has no jump yet, 1 is empty, 10 is off the board
    for hole in [4, 1, 10] {
        let intents = game.notify_hole_selected(HoleId(hole));
        assert!(intents.is_empty());
        present(&intents, &mut view);
    }

    assert_eq!(view.render(game.board()), before);
}
