use crate::cards::{Card, CardId};
use crate::config::FanConfig;
use crate::gesture::GestureState;
use crate::reading::{CardPose, Reading};
use crate::tarot;
use crate::tui::ui;
use crate::viewport::{Platform, Viewport};
use ratatui::prelude::Rect;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Horizontal layout pixels per terminal column.
pub const PX_PER_COL: f32 = 8.0;
/// Vertical layout pixels per terminal row.
pub const PX_PER_ROW: f32 = 16.0;
/// Columns a pointer must travel before a press becomes a drag.
pub const DRAG_THRESHOLD_COLS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Fan,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    Shuffle,
    FocusNext,
    FocusPrev,
    TapFocused,
    ScrollPrev,
    ScrollNext,
    PointerDown { col: u16, row: u16 },
    PointerDrag { col: u16, row: u16 },
    PointerUp { col: u16, row: u16 },
    PointerCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PointerPress {
    start_col: u16,
    last_col: u16,
    dragging: bool,
}

impl PointerPress {
    fn translation(&self) -> f32 {
        (self.last_col as i32 - self.start_col as i32) as f32 * PX_PER_COL
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    // Core engine instance
    pub reading: Reading,
    // Keyboard focus, an index into the visible poses
    pub focus: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_max_arc_height: f32,
    pub cfg_max_rotation: f32,
    pub cfg_fan_width_pct: u16,
    pub cfg_platform: Platform,
    pub cfg_reshuffle_delay_ms: u64,
    pub cfg_snap_duration_ms: u64,
    pub(crate) config: FanConfig,
    pub(crate) platform: Platform,
    cards: Vec<Card>,
    fan_area: Rect,
    help_open: bool,
    pointer: Option<PointerPress>,
    last_selected: Rc<Cell<Option<CardId>>>,
    status: Option<String>,
    status_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(tarot::full_deck(), FanConfig::default(), Platform::Touch)
    }
}

impl AppState {
    const STATUS_TTL: Duration = Duration::from_secs(3);
    const DEFAULT_AREA: Rect = Rect { x: 0, y: 0, width: 80, height: 20 };

    pub fn new(cards: Vec<Card>, config: FanConfig, platform: Platform) -> Self {
        let config = config.sanitized();
        let fan_area = Self::DEFAULT_AREA;
        let viewport = Viewport::new(fan_area.width as f32 * PX_PER_COL, platform);
        let last_selected = Rc::new(Cell::new(None));
        let mut reading = Reading::new(cards.clone(), viewport, config.clone());
        Self::attach_hook(&mut reading, &last_selected);
        reading.shuffle(Instant::now());
        let mut app = Self {
            scene: Scene::Fan,
            started: Instant::now(),
            reading,
            focus: 0,
            menu_index: 0,
            cfg_max_arc_height: 0.0,
            cfg_max_rotation: 0.0,
            cfg_fan_width_pct: 0,
            cfg_platform: platform,
            cfg_reshuffle_delay_ms: 0,
            cfg_snap_duration_ms: 0,
            config,
            platform,
            cards,
            fan_area,
            help_open: false,
            pointer: None,
            last_selected,
            status: None,
            status_at: None,
        };
        app.load_menu_fields();
        app
    }

    fn attach_hook(reading: &mut Reading, sink: &Rc<Cell<Option<CardId>>>) {
        let sink = Rc::clone(sink);
        reading.set_on_card_selected(move |id| sink.set(Some(id)));
    }

    /// Swap in a fresh reading built from the applied config.
    pub(crate) fn rebuild_reading(&mut self, now: Instant) {
        let viewport = Viewport::new(self.fan_area.width as f32 * PX_PER_COL, self.platform);
        let mut reading = Reading::new(self.cards.clone(), viewport, self.config.clone());
        Self::attach_hook(&mut reading, &self.last_selected);
        reading.shuffle(now);
        self.reading = reading;
        self.last_selected.set(None);
        self.pointer = None;
        self.focus = 0;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub fn fan_area(&self) -> Rect {
        self.fan_area
    }

    /// Card most recently reported through the selection hook.
    pub fn last_selected(&self) -> Option<&Card> {
        self.last_selected.get().and_then(|id| self.reading.deck().find(id))
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, msg: String, now: Instant) {
        self.status = Some(msg);
        self.status_at = Some(now);
    }

    fn clear_status(&mut self) {
        self.status = None;
        self.status_at = None;
    }

    /// Record where the fan is drawn. A width change re-measures the viewport.
    pub fn set_fan_area(&mut self, area: Rect) {
        let width_changed = area.width != self.fan_area.width;
        self.fan_area = area;
        if width_changed {
            self.pointer = None;
            let viewport = Viewport::new(area.width as f32 * PX_PER_COL, self.platform);
            self.reading.set_viewport(viewport);
        }
    }

    pub fn focused_pose(&self) -> Option<CardPose> {
        let poses = self.reading.visible_poses();
        if poses.is_empty() {
            return None;
        }
        poses.get(self.focus.min(poses.len() - 1)).copied()
    }

    fn tap(&mut self, id: CardId, now: Instant) -> bool {
        match self.reading.select_card(id, now) {
            Ok(()) => {
                self.clear_status();
                true
            }
            Err(err) => {
                log::debug!("tap ignored: {err}");
                self.set_status(err.to_string(), now);
                false
            }
        }
    }

    fn scroll_by_cards(&mut self, cards: f32, now: Instant) -> bool {
        // a pointer drag owns the gesture until release
        let pointer_dragging = self.pointer.is_some_and(|p| p.dragging);
        if pointer_dragging || self.reading.gesture_state() != GestureState::Idle {
            return false;
        }
        if !self.reading.gestures_enabled() {
            return false;
        }
        let translation = -cards * self.reading.card_pixel_width();
        self.reading.gesture_begin(now);
        self.reading.gesture_end(translation, now).is_some()
    }

    fn pointer_down(&mut self, col: u16) -> bool {
        self.pointer = Some(PointerPress { start_col: col, last_col: col, dragging: false });
        true
    }

    fn pointer_drag(&mut self, col: u16, now: Instant) -> bool {
        let Some(mut press) = self.pointer else {
            return false;
        };
        press.last_col = col;
        let moved = (col as i32 - press.start_col as i32).abs();
        if !press.dragging && moved >= DRAG_THRESHOLD_COLS && self.reading.gestures_enabled() {
            press.dragging = true;
            self.reading.gesture_begin(now);
        }
        if press.dragging {
            self.reading.gesture_update(press.translation(), now);
        }
        self.pointer = Some(press);
        press.dragging
    }

    fn pointer_up(&mut self, col: u16, row: u16, now: Instant) -> bool {
        let Some(mut press) = self.pointer.take() else {
            return false;
        };
        press.last_col = col;
        if press.dragging {
            return self.reading.gesture_end(press.translation(), now).is_some();
        }
        let poses = self.reading.visible_poses();
        let hit = ui::hit_test(self.fan_area, &poses, col, row);
        match hit {
            Some(slot) => {
                self.focus = slot;
                let id = poses[slot].card_id;
                self.tap(id, now)
            }
            None => false,
        }
    }

    fn pointer_cancel(&mut self, now: Instant) -> bool {
        match self.pointer.take() {
            Some(press) if press.dragging => self.reading.gesture_cancel(now).is_some(),
            _ => false,
        }
    }

    pub fn handle_input(&mut self, action: InputAction, now: Instant) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Fan {
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu(now);
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            _ if self.scene != Scene::Fan => false,
            InputAction::Shuffle => {
                self.reading.shuffle(now);
                self.last_selected.set(None);
                self.pointer = None;
                self.focus = 0;
                self.clear_status();
                true
            }
            InputAction::FocusNext => {
                self.focus_step(1);
                false
            }
            InputAction::FocusPrev => {
                self.focus_step(-1);
                false
            }
            InputAction::TapFocused => match self.focused_pose() {
                Some(pose) => self.tap(pose.card_id, now),
                None => false,
            },
            InputAction::ScrollPrev => self.scroll_by_cards(-1.0, now),
            InputAction::ScrollNext => self.scroll_by_cards(1.0, now),
            InputAction::PointerDown { col, .. } => self.pointer_down(col),
            InputAction::PointerDrag { col, .. } => self.pointer_drag(col, now),
            InputAction::PointerUp { col, row } => self.pointer_up(col, row, now),
            InputAction::PointerCancel => self.pointer_cancel(now),
        }
    }

    pub fn focus_step(&mut self, delta: isize) {
        let n = self.reading.visible_poses().len();
        if n == 0 {
            return;
        }
        let cur = self.focus.min(n - 1) as isize;
        self.focus = (cur + delta).rem_euclid(n as isize) as usize;
    }

    /// Per-frame housekeeping: advance animations, expire the status line.
    pub fn on_tick(&mut self, now: Instant) {
        self.reading.tick(now);
        if let Some(at) = self.status_at {
            if now.saturating_duration_since(at) >= Self::STATUS_TTL {
                self.clear_status();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_app() -> AppState {
        let cfg = FanConfig { reshuffle_delay_ms: 0, seed: Some(1), ..FanConfig::default() };
        AppState::new(tarot::full_deck(), cfg, Platform::Touch)
    }

    #[test]
    fn tap_focused_selects_then_flips() {
        let mut app = quick_app();
        let now = Instant::now();
        let id = app.focused_pose().unwrap().card_id;
        assert!(app.handle_input(InputAction::TapFocused, now));
        assert_eq!(app.last_selected().map(|c| c.id()), Some(id));
        assert!(app.handle_input(InputAction::TapFocused, now));
        assert_eq!(app.reading.phase_of(id), crate::interaction::SelectionPhase::Flipped);
    }

    #[test]
    fn rejected_tap_sets_status() {
        let mut app = quick_app();
        let now = Instant::now();
        app.handle_input(InputAction::TapFocused, now);
        app.handle_input(InputAction::FocusNext, now);
        assert!(!app.handle_input(InputAction::TapFocused, now));
        assert!(app.status().is_some());
        app.on_tick(now + Duration::from_secs(4));
        assert!(app.status().is_none());
    }
}
