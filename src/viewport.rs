//! Viewport measurement and the sliding window over a deck too wide to show
//! at once.

use crate::anim::{Generation, Tween};
use crate::config::FanConfig;
use crate::layout::FanLayout;
use std::ops::Range;
use std::time::{Duration, Instant};

/// What the host platform can do. Desktop viewports show the whole deck;
/// touch viewports window it and scroll by dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Platform {
    #[default]
    Touch,
    Desktop,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Touch => "touch",
            Platform::Desktop => "desktop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub platform: Platform,
}

impl Viewport {
    pub fn new(width: f32, platform: Platform) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        Self { width, platform }
    }

    pub fn windowed(&self) -> bool {
        matches!(self.platform, Platform::Touch)
    }

    /// Rendered card width, used as the drag unit.
    pub fn card_pixel_width(&self, cfg: &FanConfig) -> f32 {
        match self.platform {
            Platform::Touch => self.width * cfg.touch_card_width_fraction,
            Platform::Desktop => {
                (self.width * cfg.desktop_card_width_fraction).min(cfg.max_desktop_card_width)
            }
        }
    }

    /// How many cards the window holds for a deck of `deck_len`.
    pub fn visible_count(&self, cfg: &FanConfig, deck_len: usize) -> usize {
        if !self.windowed() {
            return deck_len;
        }
        let step = self.card_pixel_width(cfg) * cfg.card_step_fraction;
        let fan_width = FanLayout::from(cfg).fan_width(self.width);
        // nudge so an exact fit is not lost to rounding
        let fit = if step > 0.0 { (fan_width / step + 1e-3).floor() as usize + 1 } else { 0 };
        fit.clamp(cfg.min_visible, cfg.max_visible.max(cfg.min_visible))
    }
}

/// Fractional window into a deck. `offset` is always inside
/// `[0, max_offset()]`; every write goes through the clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportWindow {
    deck_len: usize,
    visible_count: usize,
    offset: f32,
    snap: Option<Tween>,
}

impl ViewportWindow {
    pub fn new(deck_len: usize, visible_count: usize) -> Self {
        Self { deck_len, visible_count, offset: 0.0, snap: None }
    }

    pub fn deck_len(&self) -> usize {
        self.deck_len
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Whether the deck overflows the window and needs scrolling.
    pub fn scrollable(&self) -> bool {
        self.deck_len > self.visible_count
    }

    /// Number of fan slots the layout spreads across.
    pub fn layout_count(&self) -> usize {
        self.visible_count.min(self.deck_len)
    }

    pub fn max_offset(&self) -> f32 {
        self.deck_len.saturating_sub(self.visible_count) as f32
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        if !offset.is_finite() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset())
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn start_index(&self) -> usize {
        self.offset.floor() as usize
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = self.clamp(offset);
    }

    /// Deck indices that receive a pose: the window plus one trailing card so
    /// the right edge slides in smoothly.
    pub fn visible_range(&self) -> Range<usize> {
        if !self.scrollable() {
            return 0..self.deck_len;
        }
        let start = self.start_index();
        let end = (start + self.visible_count + 1).min(self.deck_len);
        start..end
    }

    /// Layout index of deck card `absolute_index`, fractional mid-drag.
    pub fn relative_index(&self, absolute_index: usize) -> f32 {
        absolute_index as f32 - self.offset
    }

    /// Place the deck's midpoint at the window's midpoint, on a whole card.
    pub fn recenter(&mut self) {
        self.cancel_snap();
        let centered = self.deck_len as f32 / 2.0 - self.visible_count as f32 / 2.0;
        self.set_offset(self.clamp(centered).floor());
    }

    /// Change deck size or window size, keeping the offset legal.
    pub fn resize(&mut self, deck_len: usize, visible_count: usize) {
        self.deck_len = deck_len;
        self.visible_count = visible_count;
        self.cancel_snap();
        let offset = self.offset;
        self.set_offset(offset);
    }

    pub fn snap_to(&mut self, target: f32, now: Instant, duration: Duration, generation: Generation) {
        let target = self.clamp(target);
        self.snap = Some(Tween::new(self.offset, target, now, duration, generation));
        self.apply_snap();
    }

    pub fn snapping(&self) -> bool {
        self.snap.is_some()
    }

    pub fn cancel_snap(&mut self) {
        self.snap = None;
    }

    /// Advance the snap animation. A snap started under an older generation
    /// is dropped without writing the offset.
    pub fn advance(&mut self, now: Instant, generation: Generation) {
        match self.snap.as_mut() {
            Some(s) if s.generation() != generation => {
                log::debug!("dropping snap from stale generation {}", s.generation().value());
                self.snap = None;
            }
            Some(s) => {
                s.advance(now);
                self.apply_snap();
            }
            None => {}
        }
    }

    fn apply_snap(&mut self) {
        if let Some(s) = self.snap {
            self.set_offset(s.value());
            if s.is_settled() {
                self.snap = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_clamped_on_write() {
        let mut w = ViewportWindow::new(78, 13);
        w.set_offset(-4.0);
        assert_eq!(w.offset(), 0.0);
        w.set_offset(100.0);
        assert_eq!(w.offset(), 65.0);
        w.set_offset(f32::NAN);
        assert_eq!(w.offset(), 0.0);
    }

    #[test]
    fn visible_range_includes_trailing_card() {
        let mut w = ViewportWindow::new(78, 13);
        w.set_offset(30.4);
        assert_eq!(w.start_index(), 30);
        assert_eq!(w.visible_range(), 30..44);
        w.set_offset(65.0);
        assert_eq!(w.visible_range(), 65..78);
    }

    #[test]
    fn small_deck_shows_everything() {
        let mut w = ViewportWindow::new(5, 13);
        assert!(!w.scrollable());
        assert_eq!(w.layout_count(), 5);
        w.set_offset(3.0);
        assert_eq!(w.offset(), 0.0);
        assert_eq!(w.visible_range(), 0..5);
    }

    #[test]
    fn recenter_puts_middle_in_middle() {
        let mut w = ViewportWindow::new(78, 13);
        w.recenter();
        assert_eq!(w.offset(), 32.0);
        let mut small = ViewportWindow::new(5, 13);
        small.recenter();
        assert_eq!(small.offset(), 0.0);
    }

    #[test]
    fn touch_visible_count_is_clamped() {
        let cfg = FanConfig::default();
        let vp = Viewport::new(400.0, Platform::Touch);
        // fan 360, card 80, step 40 -> 10 cards
        assert_eq!(vp.visible_count(&cfg, 78), 10);
        let zero = Viewport::new(0.0, Platform::Touch);
        assert_eq!(zero.visible_count(&cfg, 78), cfg.min_visible);
    }

    #[test]
    fn desktop_shows_whole_deck() {
        let cfg = FanConfig::default();
        let vp = Viewport::new(1920.0, Platform::Desktop);
        assert_eq!(vp.visible_count(&cfg, 78), 78);
        assert_eq!(vp.card_pixel_width(&cfg), 120.0);
    }

    #[test]
    fn snap_lands_on_target() {
        let t0 = Instant::now();
        let g = Generation::default();
        let mut w = ViewportWindow::new(78, 13);
        w.set_offset(31.6);
        w.snap_to(32.0, t0, Duration::from_millis(200), g);
        assert!(w.snapping());
        w.advance(t0 + Duration::from_millis(250), g);
        assert_eq!(w.offset(), 32.0);
        assert!(!w.snapping());
    }

    #[test]
    fn stale_snap_is_dropped() {
        let t0 = Instant::now();
        let g = Generation::default();
        let mut w = ViewportWindow::new(78, 13);
        w.set_offset(10.4);
        w.snap_to(10.0, t0, Duration::from_millis(200), g);
        w.advance(t0 + Duration::from_millis(250), g.next());
        assert!(!w.snapping());
        assert_eq!(w.offset(), 10.4);
    }
}
