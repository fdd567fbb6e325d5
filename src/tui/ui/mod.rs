mod fan;
mod layout;
mod menu;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::{Frame, Rect};

pub(crate) use layout::hit_test;

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Menu => menu::draw_menu(f, app),
        Scene::Fan => fan::draw_fan(f, app),
    }
}

/// Cells the fan is painted into for a terminal of `size`.
pub fn fan_area(size: Rect) -> Rect {
    let [_, fan_block, _, _] = fan::scene_chunks(size);
    layout::inner(fan_block)
}
