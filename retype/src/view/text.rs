use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{Paragraph, Wrap},
};
use rewind::ReferenceText;

use crate::config::theme::Theme;
use crate::utils::ROUNDED_BLOCK;

/// Draw the reference text, cut into rows of the area's width.
///
/// Returns the area the characters occupy and the first row shown.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    text: &ReferenceText,
    typed: &[bool],
    caret: Option<usize>,
    theme: &Theme,
) -> (Rect, u16) {
    let block = ROUNDED_BLOCK.title("Replay".to_span().bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.max(1) as usize;
    let caret_row = caret.unwrap_or(0) / width;
    let scroll = caret_row.saturating_sub(inner.height.saturating_sub(1) as usize) as u16;

    let lines: Vec<Line> = text
        .chunks(width)
        .enumerate()
        .skip(scroll as usize)
        .map(|(row, characters)| {
            characters
                .iter()
                .enumerate()
                .map(|(column, character)| {
                    let index = row * width + column;
                    let style = if caret == Some(index) {
                        Style::new()
                            .fg(theme.term_bg)
                            .bg(theme.text.caret)
                            .add_modifier(Modifier::BOLD)
                    } else if typed.get(index).copied().unwrap_or(false) {
                        Style::new().fg(theme.text.typed)
                    } else {
                        Style::new().fg(theme.text.untyped)
                    };
                    Span::styled(character.to_string(), style)
                })
                .collect::<Line>()
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    (inner, scroll)
}

/// Draw the end of the typed buffer with everything after the first mistake highlighted
pub fn render_raw(
    frame: &mut Frame,
    area: Rect,
    (correct, typo): (&[char], &[char]),
    theme: &Theme,
) {
    let width = area.width.saturating_sub(2) as usize;
    let hidden = (correct.len() + typo.len()).saturating_sub(width);

    let typo: String = typo.iter().skip(hidden.saturating_sub(correct.len())).collect();
    let correct: String = correct.iter().skip(hidden).collect();

    let line = Line::from(vec![
        Span::styled(correct, Style::new().fg(theme.term_fg)),
        Span::styled(
            typo,
            Style::new()
                .fg(theme.text.typo)
                .underlined()
                .underline_color(theme.text.typo),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .wrap(Wrap { trim: false })
        .block(ROUNDED_BLOCK.title("Typed".to_span().bold()));

    frame.render_widget(paragraph, area);
}
