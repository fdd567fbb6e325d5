use crate::reading::CardPose;
use crate::tui::app::{PX_PER_COL, PX_PER_ROW};
use ratatui::layout::{Constraint, Position};
use ratatui::prelude::{Layout, Rect};

pub(crate) const CARD_COLS: u16 = 7;
pub(crate) const CARD_ROWS: u16 = 5;

pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(ratatui::prelude::Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(ratatui::prelude::Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

fn clip(area: Rect, left: i32, top: i32, width: u16, height: u16) -> Option<Rect> {
    let x0 = left.max(area.x as i32);
    let y0 = top.max(area.y as i32);
    let x1 = (left + width as i32).min(area.right() as i32);
    let y1 = (top + height as i32).min(area.bottom() as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

/// Terminal cells covered by a card, clipped to the fan area. Cards rest on
/// the bottom edge and rise by their lift.
pub(crate) fn card_rect(area: Rect, pose: &CardPose) -> Option<Rect> {
    let center = area.x as f32 + pose.x / PX_PER_COL;
    let left = (center - CARD_COLS as f32 / 2.0).round() as i32;
    let lift_rows = (pose.vertical_lift / PX_PER_ROW).round() as i32;
    let top = area.bottom() as i32 - CARD_ROWS as i32 - lift_rows;
    clip(area, left, top, CARD_COLS, CARD_ROWS)
}

/// Indices into `poses` in paint order: left to right, active card on top.
pub(crate) fn draw_order(poses: &[CardPose]) -> Vec<usize> {
    use crate::interaction::SelectionPhase;
    let is_active = |p: &CardPose| p.selection_phase != SelectionPhase::Unselected;
    let mut order: Vec<usize> = (0..poses.len()).filter(|&i| !is_active(&poses[i])).collect();
    order.extend((0..poses.len()).filter(|&i| is_active(&poses[i])));
    order
}

/// Topmost card under a terminal cell.
pub(crate) fn hit_test(area: Rect, poses: &[CardPose], col: u16, row: u16) -> Option<usize> {
    let at = Position { x: col, y: row };
    draw_order(poses)
        .into_iter()
        .rev()
        .find(|&i| card_rect(area, &poses[i]).is_some_and(|r| r.contains(at)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::interaction::SelectionPhase;

    fn pose(id: u32, x: f32, lift: f32, phase: SelectionPhase) -> CardPose {
        CardPose {
            card_id: CardId::new(id),
            x,
            rotation_degrees: 0.0,
            vertical_lift: lift,
            selection_phase: phase,
            flip_progress: 0.0,
        }
    }

    #[test]
    fn card_rect_sits_on_bottom_edge() {
        let area = Rect::new(0, 0, 80, 20);
        let r = card_rect(area, &pose(0, 320.0, 0.0, SelectionPhase::Unselected)).unwrap();
        assert_eq!(r.bottom(), 20);
        assert_eq!(r.width, CARD_COLS);
        let lifted = card_rect(area, &pose(0, 320.0, 32.0, SelectionPhase::Unselected)).unwrap();
        assert_eq!(lifted.bottom(), 18);
    }

    #[test]
    fn offscreen_card_has_no_rect() {
        let area = Rect::new(0, 0, 80, 20);
        assert!(card_rect(area, &pose(0, -200.0, 0.0, SelectionPhase::Unselected)).is_none());
    }

    #[test]
    fn hit_test_prefers_active_card() {
        let area = Rect::new(0, 0, 80, 20);
        let poses = [
            pose(1, 320.0, 0.0, SelectionPhase::Selected),
            pose(2, 336.0, 0.0, SelectionPhase::Unselected),
        ];
        // column 40 is covered by both cards
        assert_eq!(hit_test(area, &poses, 40, 18), Some(0));
        assert_eq!(draw_order(&poses), vec![1, 0]);
    }
}
