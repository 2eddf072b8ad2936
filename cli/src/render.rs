// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use std::collections::BTreeSet;
use tripeg_core::{BoardGraph, HoleId, Presenter, StatusColor};

/// What the terminal currently shows, kept up to date from display intents
#[derive(Debug, Clone)]
pub struct TerminalView {
    pegs: BTreeSet<HoleId>,
    lit: BTreeSet<HoleId>,
    pointing: Option<HoleId>,
    status: String,
    color: StatusColor,
    show_ids: bool,
}

impl TerminalView {
    pub fn new(show_ids: bool) -> Self {
        Self {
            pegs: BTreeSet::new(),
            lit: BTreeSet::new(),
            pointing: None,
            status: String::new(),
            color: StatusColor::Neutral,
            show_ids,
        }
    }

    /// Forget everything shown so far (the board is being rebuilt)
    pub fn clear(&mut self) {
        *self = Self::new(self.show_ids);
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn color(&self) -> StatusColor {
        self.color
    }

    /// Draw the triangle, one text line per row, followed by the status line
    pub fn render(&self, board: &BoardGraph) -> String {
        let rows = board.num_rows();
        let cell_width = if self.show_ids { 6 } else { 4 };
        let mut output = String::new();

        for row in 0..rows {
            // Each row sits half a cell further left than the one above it
            output.push_str(&" ".repeat((rows - 1 - row) * cell_width / 2));

            for col in 0..=row {
                let Some(hole) = board.id_at(row, col) else {
                    continue;
                };
                output.push_str(&self.render_cell(hole));
            }

            let trimmed = output.trim_end().len();
            output.truncate(trimmed);
            output.push('\n');
        }

        output.push('\n');
        output.push_str(status_prefix(self.color));
        output.push_str(&self.status);
        output.push('\n');

        output
    }

    fn render_cell(&self, hole: HoleId) -> String {
        let symbol = if self.pegs.contains(&hole) { '●' } else { '·' };
        let (open, close) = if self.pointing == Some(hole) {
            ('>', '<')
        } else if self.lit.contains(&hole) {
            ('(', ')')
        } else {
            (' ', ' ')
        };

        if self.show_ids {
            format!("{}{}{}{:<2} ", open, symbol, close, hole.index())
        } else {
            format!("{}{}{} ", open, symbol, close)
        }
    }
}

impl Presenter for TerminalView {
    fn set_highlight(&mut self, hole: HoleId, on: bool) {
        if on {
            self.lit.insert(hole);
        } else {
            self.lit.remove(&hole);
        }
    }

    fn set_pointing_indicator(&mut self, hole: HoleId, on: bool) {
        if on {
            self.pointing = Some(hole);
        } else if self.pointing == Some(hole) {
            self.pointing = None;
        }
    }

    fn set_peg(&mut self, hole: HoleId, present: bool) {
        if present {
            self.pegs.insert(hole);
        } else {
            self.pegs.remove(&hole);
        }
    }

    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_status_color(&mut self, color: StatusColor) {
        self.color = color;
    }
}

fn status_prefix(color: StatusColor) -> &'static str {
    match color {
        StatusColor::Neutral => "",
        StatusColor::Win => "[WIN] ",
        StatusColor::Lose => "[LOSE] ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripeg_core::adapter::present;
    use tripeg_core::GameController;

    fn view_after(game: &mut GameController, show_ids: bool, taps: &[usize]) -> TerminalView {
        let mut view = TerminalView::new(show_ids);
        present(&game.settle(), &mut view);
        for &hole in taps {
            present(&game.notify_hole_selected(HoleId(hole)), &mut view);
        }
        view
    }

    #[test]
    fn test_render_full_board() {
        let mut game = GameController::new(3).unwrap();
        let view = view_after(&mut game, false, &[]);
        let output = view.render(game.board());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5); // 3 rows, blank line, status
        assert_eq!(lines[0], "     ●");
        assert_eq!(lines[1], "   ●   ●");
        assert_eq!(lines[2], " ●   ●   ●");
        assert_eq!(lines[4], "Click first peg to remove");
    }

    #[test]
    fn test_render_ids_and_highlights() {
        let mut game = GameController::new(3).unwrap();
        let view = view_after(&mut game, true, &[0]);
        let output = view.render(game.board());

        assert!(output.contains(" · 0\n"));
        assert!(output.contains("(●)3"));
        assert!(output.contains("(●)5"));
        assert!(output.contains(" ● 4"));
        assert!(output.ends_with("Click peg to move\n"));
    }

    #[test]
    fn test_render_pointing() {
        let mut game = GameController::new(3).unwrap();
        let view = view_after(&mut game, true, &[0, 5]);
        let output = view.render(game.board());

        assert!(output.contains(">●<5"));
        assert!(output.contains("(·)0"));
        assert!(!output.contains("(●)3"));
    }

    #[test]
    fn test_render_game_over() {
        let mut game = GameController::new(2).unwrap();
        let view = view_after(&mut game, false, &[0]);

        assert_eq!(view.color(), StatusColor::Lose);
        assert!(view.render(game.board()).contains("[LOSE] Game Over!\nYou Lose!"));
    }

    #[test]
    fn test_clear_keeps_id_setting() {
        let mut game = GameController::new(2).unwrap();
        let mut view = view_after(&mut game, true, &[0]);
        view.clear();

        assert_eq!(view.status(), "");
        assert_eq!(view.color(), StatusColor::Neutral);
        assert!(view.render(game.board()).contains(" · 0"));
    }
}
