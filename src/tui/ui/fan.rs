use crate::cards::Card;
use crate::interaction::SelectionPhase;
use crate::reading::CardPose;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{card_rect, centered_rect, draw_order, inner};

/// Vertical split of the fan scene: header, fan, detail, status.
pub(super) fn scene_chunks(size: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(8),    // fan
            Constraint::Length(4), // detail
            Constraint::Length(4), // status bar
        ])
        .split(size);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

pub(super) fn draw_fan(f: &mut Frame, app: &AppState) {
    let [header_area, fan_block_area, detail_area, status_area] = scene_chunks(f.area());
    let reading = &app.reading;
    let window = reading.window();

    let mut header = format!(
        "{} cards • {} • window {}",
        reading.deck().len(),
        reading.viewport().platform.label(),
        window.layout_count(),
    );
    if window.scrollable() {
        header.push_str(&format!(
            " • offset {:.1}/{:.0}",
            window.offset(),
            window.max_offset()
        ));
    }
    if reading.is_shuffling() {
        header.push_str(" • shuffling…");
    }
    let header = Paragraph::new(Line::from(header))
        .block(Block::default().title("tarot-fan").borders(Borders::ALL));
    f.render_widget(header, header_area);

    f.render_widget(Block::default().title("Deck").borders(Borders::ALL), fan_block_area);
    let area = app.fan_area();
    let poses = reading.visible_poses();
    let focused = app.focused_pose().map(|p| p.card_id);
    for i in draw_order(&poses) {
        let pose = &poses[i];
        if let Some(rect) = card_rect(area, pose) {
            let name = reading.deck().find(pose.card_id).map(|c| c.name()).unwrap_or("?");
            render_card(f, rect, pose, name, focused == Some(pose.card_id));
        }
    }

    draw_detail(f, app, detail_area);

    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let status_inner = inner(status_area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(status_inner);
    let mut left_info = vec![Line::from(if reading.gestures_enabled() {
        "Drag or , / . to scroll • Enter or click to select, again to flip"
    } else {
        "Enter or click to select, again to flip"
    })];
    if let Some(msg) = app.status() {
        left_info.push(Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Red))));
    }
    let right_keys = vec![Line::from("Space shuffle • ? help • M menu • Q quit")];
    f.render_widget(Paragraph::new(left_info).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );

    if app.help_open() {
        draw_help(f);
    }
}

pub(super) fn tilt_glyph(rotation: f32) -> &'static str {
    if rotation < -10.0 {
        "\\"
    } else if rotation > 10.0 {
        "/"
    } else {
        "|"
    }
}

fn render_card(f: &mut Frame, rect: Rect, pose: &CardPose, name: &str, focused: bool) {
    let border = match pose.selection_phase {
        SelectionPhase::Selected => Some(Color::Yellow),
        SelectionPhase::Flipped => Some(Color::Magenta),
        _ if focused => Some(Color::Cyan),
        _ => None,
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(tilt_glyph(pose.rotation_degrees))
        .title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);
    let face_up = pose.flip_progress >= 0.5;
    let lines: Vec<Line> = if face_up {
        let width = rect.width.saturating_sub(2) as usize;
        name.split_whitespace()
            .filter(|w| !matches!(*w, "The" | "of"))
            .map(|w| Line::from(w.chars().take(width).collect::<String>()))
            .collect()
    } else {
        vec![Line::from(Span::styled("░░░", Style::default().fg(Color::DarkGray)))]
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(rect));
}

/// Detail line for the card last reported by the selection hook. A flipped
/// card reveals its front content.
pub(super) fn detail_text(card: &Card, phase: SelectionPhase) -> String {
    match phase {
        SelectionPhase::Flipped => {
            format!("{} {} revealed: {}", card.name(), card.id(), card.front().as_str())
        }
        _ => format!("Card {} chosen, tap it again to turn it over.", card.id()),
    }
}

fn draw_detail(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default().title("Reading").borders(Borders::ALL);
    let lines = match app.last_selected() {
        Some(card) => {
            let text = detail_text(card, app.reading.phase_of(card.id()));
            vec![Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))]
        }
        None => vec![Line::from(Span::styled(
            "Pick a card.",
            Style::default().add_modifier(Modifier::DIM),
        ))],
    };
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let lines = vec![
        Line::from(Span::styled("Deck:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- Space / S: shuffle"),
        Line::from("- Left / Right or [ / ]: move focus"),
        Line::from("- Enter: select focused card, again to flip"),
        Line::from("- , / .: scroll one card (narrow viewports)"),
        Line::from("- Mouse: click to select, drag to scroll"),
        Line::from(""),
        Line::from(Span::styled("Menu:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply (reshuffles)"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from("- Q: quit"),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, ContentRef};

    #[test]
    fn flipped_detail_reveals_front() {
        let card = Card::new(CardId::new(19), "The Sun", ContentRef::new("sun.png"));
        assert_eq!(
            detail_text(&card, SelectionPhase::Flipped),
            "The Sun #19 revealed: sun.png"
        );
        assert!(!detail_text(&card, SelectionPhase::Selected).contains("sun.png"));
    }

    #[test]
    fn tilt_follows_rotation_sign() {
        assert_eq!(tilt_glyph(-30.0), "\\");
        assert_eq!(tilt_glyph(0.0), "|");
        assert_eq!(tilt_glyph(30.0), "/");
    }
}
