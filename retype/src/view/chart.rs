use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, ToSpan},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};
use rewind::ReplaySession;

use crate::config::theme::Theme;
use crate::utils::{ROUNDED_BLOCK, center};

const GROUP_GAP: u16 = 1;
const GUTTER_WIDTH: u16 = 4;

/// Bars are drawn as a percentage of the chart ceiling
const BAR_SCALE: f64 = 100.0;

fn bar_width(width: u16, segments: usize) -> u16 {
    let per_group = width / segments.max(1) as u16;
    (per_group.saturating_sub(GROUP_GAP) / 2).max(1)
}

/// Segment drawn at column `x` of the bar area
pub fn segment_at(width: u16, segments: usize, x: u16) -> Option<usize> {
    if segments == 0 {
        return None;
    }

    let stride = 2 * bar_width(width, segments) + GROUP_GAP;
    let index = (x / stride) as usize;
    (index < segments).then_some(index)
}

/// Draw one group of bars (WPM and raw WPM) per segment.
///
/// Returns the area the bars occupy.
pub fn render(frame: &mut Frame, area: Rect, session: &ReplaySession, theme: &Theme) -> Rect {
    let block = ROUNDED_BLOCK.title("Segments".to_span().bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(segmentation) = session.segmentation().filter(|s| !s.is_empty()) else {
        let message = Paragraph::new("No segment data").centered();
        frame.render_widget(
            message,
            center(inner, Constraint::Percentage(100), Constraint::Length(1)),
        );
        return Rect::default();
    };

    let [gutter, bars_area] =
        Layout::horizontal([Constraint::Length(GUTTER_WIDTH), Constraint::Fill(1)]).areas(inner);

    render_ticks(frame, gutter, segmentation.yticks(), segmentation.ymax(), theme);

    let clean_index = session.position().clean_index;
    let current = segmentation
        .iter()
        .take_while(|(offset, _)| *offset <= clean_index)
        .count()
        .checked_sub(1);

    let scaled = |height: f64| (height.min(1.0) * BAR_SCALE).round() as u64;

    let mut chart = BarChart::default()
        .bar_width(bar_width(bars_area.width, segmentation.len()))
        .bar_gap(0)
        .group_gap(GROUP_GAP)
        .max(BAR_SCALE as u64);

    for (index, (segment, heights)) in segmentation
        .segments()
        .iter()
        .zip(segmentation.bar_heights())
        .enumerate()
    {
        let wpm_color = if current == Some(index) {
            theme.chart.current
        } else {
            theme.chart.wpm
        };

        let bars = [
            Bar::default()
                .value(scaled(heights.wpm))
                .text_value(format!("{:.0}", segment.wpm))
                .style(Style::new().fg(wpm_color)),
            Bar::default()
                .value(scaled(heights.raw))
                .text_value(format!("{:.0}", segment.raw_wpm))
                .style(Style::new().fg(theme.chart.raw_wpm)),
        ];
        chart = chart.data(BarGroup::default().bars(&bars));
    }

    frame.render_widget(chart, bars_area);

    bars_area
}

/// Label the WPM axis, placing every tick below the ceiling on its row
fn render_ticks(frame: &mut Frame, area: Rect, ticks: &[f64], ymax: f64, theme: &Theme) {
    if area.height == 0 || ymax <= 0.0 {
        return;
    }

    let top = f64::from(area.height - 1);
    let mut lines = vec![Line::default(); area.height as usize];

    for tick in ticks.iter().filter(|tick| (0.0..=ymax).contains(*tick)) {
        let row = (top - (tick / ymax * top).round()) as usize;
        lines[row] = Line::from(format!("{tick:>3.0}")).style(Style::new().fg(theme.chart.axis));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_at() {
        // 3 segments over 30 columns: bars of 4, groups 9 apart
        assert_eq!(bar_width(30, 3), 4);
        assert_eq!(segment_at(30, 3, 0), Some(0));
        assert_eq!(segment_at(30, 3, 8), Some(0));
        assert_eq!(segment_at(30, 3, 9), Some(1));
        assert_eq!(segment_at(30, 3, 26), Some(2));
        assert_eq!(segment_at(30, 3, 29), None);
        assert_eq!(segment_at(30, 0, 0), None);
    }

    #[test]
    fn test_narrow_chart() {
        assert_eq!(bar_width(5, 10), 1);
        assert_eq!(segment_at(5, 10, 4), Some(1));
    }
}
