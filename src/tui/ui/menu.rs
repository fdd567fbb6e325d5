use crate::layout::FanLayout;
use crate::tui::app::{AppState, PX_PER_COL};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::fan::tilt_glyph;
use super::layout::{centered_rect, inner};

const PREVIEW_CARDS: usize = 9;
const PREVIEW_COLS: u16 = 41;
const PREVIEW_ROWS: u16 = 5;
/// Arc height that fills the preview; matches the menu's upper bound.
const PREVIEW_FULL_ARC: f32 = 400.0;

/// Small text rendering of a fan, one tilt glyph per card, lifted by its arc
/// height. Rows are top to bottom.
pub(super) fn fan_preview(layout: &FanLayout) -> Vec<String> {
    let cols = PREVIEW_COLS as usize;
    let rows = PREVIEW_ROWS as usize;
    let mut grid = vec![vec![' '; cols]; rows];
    let width = PREVIEW_COLS as f32 * PX_PER_COL;
    for i in 0..PREVIEW_CARDS {
        let pose = layout.pose(i as f32, PREVIEW_CARDS, width);
        let col = ((pose.x / PX_PER_COL).round() as usize).min(cols - 1);
        let lift = (pose.vertical_lift / PREVIEW_FULL_ARC).clamp(0.0, 1.0);
        let row = rows - 1 - (lift * (rows - 1) as f32).round() as usize;
        grid[row][col] = tilt_glyph(pose.rotation_degrees).chars().next().unwrap_or('|');
    }
    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let block = Block::default().title("tarot-fan settings").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(PREVIEW_ROWS + 3), Constraint::Min(3)])
        .split(inner(area));

    // Live preview of the values being edited, before they are applied
    let layout = FanLayout {
        max_arc_height: app.cfg_max_arc_height,
        max_rotation: app.cfg_max_rotation,
        fan_width_fraction: f32::from(app.cfg_fan_width_pct.clamp(10, 100)) / 100.0,
    };
    let mut preview: Vec<Line> = fan_preview(&layout)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Magenta))))
        .collect();
    preview.push(Line::from(Span::styled(
        format!(
            "arc {:.0} • edge tilt ±{:.0}° • {}",
            app.cfg_max_arc_height,
            app.cfg_max_rotation,
            app.cfg_platform.label()
        ),
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(
        Paragraph::new(preview)
            .block(Block::default().borders(Borders::BOTTOM))
            .alignment(Alignment::Center),
        rows[0],
    );

    let mut lines = vec![Line::from(Span::styled(
        "Fan Settings:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, item) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(item, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Apply and reshuffle  [Esc] Cancel  [↑/↓] Move  [+/-] Adjust  [Q] Quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).alignment(Alignment::Center),
        rows[1],
    );
}
