//! Terminal rendering of a replay session.
//!
//! The text panel keeps its own "typed" state and only changes it through the
//! [`DisplayUpdate`] diffs the session hands out, the same way a retained-mode renderer
//! would. Everything else is drawn straight from the session each frame.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};
use rewind::{DisplayUpdate, ReplaySession};

use crate::config::Config;
use crate::utils::offset_in;

mod chart;
mod mistakes;
mod text;

/// Something a mouse click can seek to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Char(usize),
    Segment(usize),
    Mistake(usize),
}

/// Screen areas of the last frame, for mapping clicks
#[derive(Debug, Default, Clone, Copy)]
struct Areas {
    text: Rect,
    /// First text row shown
    text_scroll: u16,
    chart: Rect,
    mistakes: Rect,
}

#[derive(Debug)]
pub struct ReplayView {
    typed: Vec<bool>,
    caret: Option<usize>,
    selected_mistake: Option<usize>,
    areas: Areas,
}

impl ReplayView {
    pub fn new(text_len: usize) -> Self {
        Self {
            typed: vec![false; text_len],
            caret: None,
            selected_mistake: None,
            areas: Areas::default(),
        }
    }

    /// Restyle the characters a refresh touched
    pub fn apply(&mut self, update: &DisplayUpdate) {
        if let Some(range) = update.typed.clone() {
            self.set_typed(range, true);
        }
        if let Some(range) = update.untyped.clone() {
            self.set_typed(range, false);
        }
        if let Some((_, caret)) = update.caret_moved {
            self.caret = Some(caret);
        }
    }

    fn set_typed(&mut self, range: std::ops::Range<usize>, typed: bool) {
        let end = range.end.min(self.typed.len());
        let start = range.start.min(end);
        self.typed[start..end].fill(typed);
    }

    pub const fn selected_mistake(&self) -> Option<usize> {
        self.selected_mistake
    }

    pub fn select_mistake(&mut self, index: Option<usize>) {
        self.selected_mistake = index;
    }

    /// Map a clicked terminal cell to what it shows
    pub fn hit(&self, column: u16, row: u16, session: &ReplaySession) -> Option<ClickTarget> {
        if let Some((x, y)) = offset_in(self.areas.text, column, row) {
            let row = (y + self.areas.text_scroll) as usize;
            let index = row * self.areas.text.width as usize + x as usize;
            return (index < self.typed.len()).then_some(ClickTarget::Char(index));
        }

        if let Some((x, _)) = offset_in(self.areas.chart, column, row) {
            let segments = session.segmentation().map_or(0, |s| s.len());
            return chart::segment_at(self.areas.chart.width, segments, x)
                .map(ClickTarget::Segment);
        }

        if let Some((_, y)) = offset_in(self.areas.mistakes, column, row) {
            let index = y as usize;
            return (index < session.mistakes().len()).then_some(ClickTarget::Mistake(index));
        }

        None
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        session: &ReplaySession,
        config: &Config,
    ) {
        let [text_area, raw_area, bottom] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(12),
        ])
        .areas(area);

        let [chart_area, mistakes_area] =
            Layout::horizontal([Constraint::Percentage(75), Constraint::Percentage(25)])
                .areas(bottom);

        let theme = &config.settings.theme;

        (self.areas.text, self.areas.text_scroll) = text::render(
            frame,
            text_area,
            session.text(),
            &self.typed,
            self.caret,
            theme,
        );
        text::render_raw(frame, raw_area, session.raw_view(), theme);
        self.areas.chart = chart::render(frame, chart_area, session, theme);
        self.areas.mistakes = mistakes::render(
            frame,
            mistakes_area,
            session.mistakes(),
            self.selected_mistake,
            theme,
        );
    }
}
