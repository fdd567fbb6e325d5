use crate::viewport::Platform;
use std::time::Instant;

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    ArcHeight,
    MaxRotation,
    FanWidth,
    Platform,
    ReshuffleDelay,
    SnapDuration,
}

const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::ArcHeight,
    MenuItem::MaxRotation,
    MenuItem::FanWidth,
    MenuItem::Platform,
    MenuItem::ReshuffleDelay,
    MenuItem::SnapDuration,
];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::ArcHeight => format!("Arc Height: {:.0}", app.cfg_max_arc_height),
            MenuItem::MaxRotation => format!("Edge Rotation: {:.0}°", app.cfg_max_rotation),
            MenuItem::FanWidth => format!("Fan Width: {}%", app.cfg_fan_width_pct),
            MenuItem::Platform => format!("Platform: {}", app.cfg_platform.label()),
            MenuItem::ReshuffleDelay => {
                format!("Reshuffle Delay (ms): {}", app.cfg_reshuffle_delay_ms)
            }
            MenuItem::SnapDuration => format!("Snap Duration (ms): {}", app.cfg_snap_duration_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::ArcHeight => {
                app.cfg_max_arc_height = (app.cfg_max_arc_height + 10.0).min(400.0);
            }
            MenuItem::MaxRotation => {
                app.cfg_max_rotation = (app.cfg_max_rotation + 5.0).min(90.0);
            }
            MenuItem::FanWidth => {
                if app.cfg_fan_width_pct < 100 {
                    app.cfg_fan_width_pct += 5;
                }
            }
            MenuItem::Platform => app.cfg_platform = toggle(app.cfg_platform),
            MenuItem::ReshuffleDelay => {
                app.cfg_reshuffle_delay_ms = app.cfg_reshuffle_delay_ms.saturating_add(100);
            }
            MenuItem::SnapDuration => {
                app.cfg_snap_duration_ms = app.cfg_snap_duration_ms.saturating_add(50);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::ArcHeight => {
                app.cfg_max_arc_height = (app.cfg_max_arc_height - 10.0).max(0.0);
            }
            MenuItem::MaxRotation => {
                app.cfg_max_rotation = (app.cfg_max_rotation - 5.0).max(0.0);
            }
            MenuItem::FanWidth => {
                if app.cfg_fan_width_pct > 10 {
                    app.cfg_fan_width_pct -= 5;
                }
            }
            MenuItem::Platform => app.cfg_platform = toggle(app.cfg_platform),
            MenuItem::ReshuffleDelay => {
                app.cfg_reshuffle_delay_ms = app.cfg_reshuffle_delay_ms.saturating_sub(100);
            }
            MenuItem::SnapDuration => {
                app.cfg_snap_duration_ms = app.cfg_snap_duration_ms.saturating_sub(50);
            }
        }
    }
}

fn toggle(p: Platform) -> Platform {
    match p {
        Platform::Touch => Platform::Desktop,
        Platform::Desktop => Platform::Touch,
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Fan,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.menu_index = 0;
        self.load_menu_fields();
        self.scene = super::Scene::Menu;
    }

    pub(crate) fn load_menu_fields(&mut self) {
        self.cfg_max_arc_height = self.config.max_arc_height;
        self.cfg_max_rotation = self.config.max_rotation;
        self.cfg_fan_width_pct = (self.config.fan_width_fraction * 100.0).round() as u16;
        self.cfg_platform = self.platform;
        self.cfg_reshuffle_delay_ms = self.config.reshuffle_delay_ms;
        self.cfg_snap_duration_ms = self.config.snap_duration_ms;
    }

    /// Commit the edited values and deal a fresh reading with them.
    pub fn apply_menu(&mut self, now: Instant) {
        let mut config = self.config.clone();
        config.max_arc_height = self.cfg_max_arc_height;
        config.max_rotation = self.cfg_max_rotation;
        config.fan_width_fraction = f32::from(self.cfg_fan_width_pct.clamp(10, 100)) / 100.0;
        config.reshuffle_delay_ms = self.cfg_reshuffle_delay_ms;
        config.snap_duration_ms = self.cfg_snap_duration_ms;
        self.config = config.sanitized();
        self.platform = self.cfg_platform;
        log::info!("applying fan settings: {:?} on {}", self.config, self.platform.label());
        self.rebuild_reading(now);
        self.scene = super::Scene::Fan;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Fan;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
