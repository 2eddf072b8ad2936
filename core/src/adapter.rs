// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation adapter interface

use crate::{DisplayIntent, HoleId, StatusColor};

/// Anything that can show the game: a GUI, a terminal, a test recorder
pub trait Presenter {
    /// Turn the highlight ring of a hole on or off
    fn set_highlight(&mut self, hole: HoleId, on: bool);

    /// Show or hide the pointing icon over a hole
    fn set_pointing_indicator(&mut self, hole: HoleId, on: bool);

    /// Repaint a hole as filled or empty
    fn set_peg(&mut self, _hole: HoleId, _present: bool) {}

    /// Replace the instruction line
    fn set_status_text(&mut self, text: &str);

    /// Recolour the instruction line
    fn set_status_color(&mut self, color: StatusColor);
}

impl DisplayIntent {
    /// Forward this intent to a presenter
    pub fn apply<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            DisplayIntent::Highlight { hole, on } => presenter.set_highlight(*hole, *on),
            DisplayIntent::PointingIndicator { hole, on } => presenter.set_pointing_indicator(*hole, *on),
            DisplayIntent::Peg { hole, present } => presenter.set_peg(*hole, *present),
            DisplayIntent::StatusText { text } => presenter.set_status_text(text),
            DisplayIntent::StatusColor { color } => presenter.set_status_color(*color),
        }
    }
}

/// Forward a batch of intents in order
pub fn present<P: Presenter + ?Sized>(intents: &[DisplayIntent], presenter: &mut P) {
    for intent in intents {
        intent.apply(presenter);
    }
}
