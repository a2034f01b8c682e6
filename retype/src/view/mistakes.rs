use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::ToSpan,
    widgets::{List, ListItem, ListState},
};
use rewind::Mistake;

use crate::config::theme::Theme;
use crate::utils::ROUNDED_BLOCK;

/// List the words that were mistyped, in the order they were first missed.
///
/// Returns the area the entries occupy.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    mistakes: &[Mistake],
    selected: Option<usize>,
    theme: &Theme,
) -> Rect {
    let block = ROUNDED_BLOCK.title("Mistakes".to_span().bold());
    let inner = block.inner(area);

    let items: Vec<ListItem> = mistakes
        .iter()
        .map(|mistake| ListItem::new(mistake.word.as_str()).style(Style::new().fg(theme.text.typo)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(theme.text.highlight).bold());

    // Keep the list unscrolled so rows map straight to mistakes
    let mut state = ListState::default()
        .with_selected(selected.filter(|index| *index < inner.height as usize));
    frame.render_stateful_widget(list, area, &mut state);

    inner
}
