use crate::anim::Generation;
use crate::cards::{Card, CardId};
use crate::config::FanConfig;
use crate::deck::Deck;
use crate::gesture::{GestureController, GestureEvent, GestureState};
use crate::interaction::{CardVisual, InteractionError, Selection, SelectionPhase, Transition};
use crate::layout::FanLayout;
use crate::viewport::{Viewport, ViewportWindow};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// One card as the presentation layer should draw it this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub card_id: CardId,
    pub x: f32,
    pub rotation_degrees: f32,
    /// Arc lift plus the selection raise.
    pub vertical_lift: f32,
    pub selection_phase: SelectionPhase,
    /// 0 shows the back, 1 the front.
    pub flip_progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingShuffle {
    generation: Generation,
    due: Instant,
}

type SelectedHook = Box<dyn FnMut(CardId)>;

/// A reading session: owns the deck, the window over it, gesture and
/// selection state, and every running animation. All mutation goes through
/// its methods.
pub struct Reading {
    config: FanConfig,
    layout: FanLayout,
    viewport: Viewport,
    deck: Deck,
    window: ViewportWindow,
    gesture: GestureController,
    selection: Selection,
    visuals: HashMap<CardId, CardVisual>,
    generation: Generation,
    pending: Option<PendingShuffle>,
    rng: ChaCha8Rng,
    on_card_selected: Option<SelectedHook>,
}

impl fmt::Debug for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reading")
            .field("viewport", &self.viewport)
            .field("deck_len", &self.deck.len())
            .field("window", &self.window)
            .field("gesture", &self.gesture)
            .field("selection", &self.selection)
            .field("generation", &self.generation)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Reading {
    /// Starts with the cards in source order; call `shuffle` to deal.
    pub fn new(cards: Vec<Card>, viewport: Viewport, config: FanConfig) -> Self {
        let config = config.sanitized();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let deck = Deck::from_cards(cards);
        let window = ViewportWindow::new(deck.len(), viewport.visible_count(&config, deck.len()));
        let generation = Generation::default();
        let now = Instant::now();
        let visuals = deck.ids().map(|id| (id, CardVisual::neutral(now, generation))).collect();
        Self {
            layout: FanLayout::from(&config),
            config,
            viewport,
            deck,
            window,
            gesture: GestureController::new(),
            selection: Selection::None,
            visuals,
            generation,
            pending: None,
            rng,
            on_card_selected: None,
        }
    }

    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn window(&self) -> &ViewportWindow {
        &self.window
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_shuffling(&self) -> bool {
        self.pending.is_some()
    }

    pub fn phase_of(&self, id: CardId) -> SelectionPhase {
        self.selection.phase_of(id)
    }

    pub fn visual(&self, id: CardId) -> Option<&CardVisual> {
        self.visuals.get(&id)
    }

    pub fn card_pixel_width(&self) -> f32 {
        self.viewport.card_pixel_width(&self.config)
    }

    /// Whether drags do anything right now.
    pub fn gestures_enabled(&self) -> bool {
        self.viewport.windowed() && self.window.scrollable() && !self.is_shuffling()
    }

    pub fn set_on_card_selected(&mut self, hook: impl FnMut(CardId) + 'static) {
        self.on_card_selected = Some(Box::new(hook));
    }

    /// New viewport measurement. Re-derives the window size and re-clamps the
    /// offset; an in-progress drag is abandoned.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.gesture.abandon();
        let visible = viewport.visible_count(&self.config, self.deck.len());
        self.window.resize(self.deck.len(), visible);
    }

    /// Reset every card to neutral, then (after the configured delay) deal a
    /// fresh permutation. A newer shuffle supersedes an older pending one.
    pub fn shuffle(&mut self, now: Instant) {
        self.generation = self.generation.next();
        let generation = self.generation;
        let reset = self.config.reset_duration();
        self.selection = Selection::None;
        for visual in self.visuals.values_mut() {
            visual.reset(now, reset, generation);
        }
        self.gesture.abandon();
        self.window.cancel_snap();

        let delay = self.config.reshuffle_delay();
        log::info!("shuffle requested (generation {}), dealing in {delay:?}", generation.value());
        self.pending = Some(PendingShuffle { generation, due: now + delay });
        if delay.is_zero() {
            self.commit_pending(now);
        }
    }

    /// Advance animations to `now` and deal a due shuffle.
    pub fn tick(&mut self, now: Instant) {
        let generation = self.generation;
        for visual in self.visuals.values_mut() {
            visual.advance(now, generation);
        }
        self.window.advance(now, generation);
        self.commit_pending(now);
    }

    fn commit_pending(&mut self, now: Instant) {
        let Some(pending) = self.pending else {
            return;
        };
        if pending.generation != self.generation {
            log::debug!("discarding stale shuffle from generation {}", pending.generation.value());
            self.pending = None;
            return;
        }
        if now < pending.due {
            return;
        }
        self.pending = None;
        self.deck = self.deck.shuffled_with(&mut self.rng);
        self.visuals =
            self.deck.ids().map(|id| (id, CardVisual::neutral(now, self.generation))).collect();
        self.selection = Selection::None;
        self.window.recenter();
        log::info!(
            "dealt {} cards (generation {}), window offset {}",
            self.deck.len(),
            self.generation.value(),
            self.window.offset()
        );
    }

    /// Tap on a card: select it, or flip it if it is already the selected one.
    pub fn select_card(&mut self, id: CardId, now: Instant) -> Result<(), InteractionError> {
        if self.is_shuffling() {
            return Err(InteractionError::Shuffling);
        }
        if !self.deck.contains(id) {
            return Err(InteractionError::UnknownCard(id));
        }
        let (next, transition) = self.selection.tap(id)?;
        self.selection = next;
        let generation = self.generation;
        match transition {
            Transition::Selected(id) => {
                if let Some(v) = self.visuals.get_mut(&id) {
                    v.raise(now, self.config.select_duration(), generation);
                }
                log::debug!("card {id} selected");
                if let Some(hook) = self.on_card_selected.as_mut() {
                    hook(id);
                }
            }
            Transition::Flipped(id) => {
                if let Some(v) = self.visuals.get_mut(&id) {
                    v.turn_over(now, self.config.flip_duration(), generation);
                }
                log::debug!("card {id} flipped");
            }
        }
        Ok(())
    }

    fn gesture(&mut self, event: GestureEvent, now: Instant) -> Option<f32> {
        if !self.viewport.windowed() || self.is_shuffling() {
            return None;
        }
        let card_px = self.card_pixel_width();
        let snap = self.config.snap_duration();
        self.gesture.handle(event, &mut self.window, card_px, now, snap, self.generation)
    }

    pub fn gesture_begin(&mut self, now: Instant) {
        self.gesture(GestureEvent::Begin, now);
    }

    pub fn gesture_update(&mut self, translation: f32, now: Instant) {
        self.gesture(GestureEvent::Update(translation), now);
    }

    /// Returns the whole-card offset the window is snapping to.
    pub fn gesture_end(&mut self, translation: f32, now: Instant) -> Option<f32> {
        self.gesture(GestureEvent::End(translation), now)
    }

    pub fn gesture_cancel(&mut self, now: Instant) -> Option<f32> {
        self.gesture(GestureEvent::Cancel, now)
    }

    /// Poses for the cards currently in the window, left to right. Pure read.
    pub fn visible_poses(&self) -> Vec<CardPose> {
        let count = self.window.layout_count();
        let width = self.viewport.width;
        self.window
            .visible_range()
            .filter_map(|i| self.deck.get(i).map(|card| (i, card.id())))
            .map(|(i, id)| {
                let pose = self.layout.pose(self.window.relative_index(i), count, width);
                let (lift, flip) = self
                    .visuals
                    .get(&id)
                    .map(|v| (v.lift_progress(), v.flip_progress()))
                    .unwrap_or((0.0, 0.0));
                CardPose {
                    card_id: id,
                    x: pose.x,
                    rotation_degrees: pose.rotation_degrees,
                    vertical_lift: pose.vertical_lift + self.config.selected_raise * lift,
                    selection_phase: self.selection.phase_of(id),
                    flip_progress: flip,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarot;
    use crate::viewport::Platform;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn instant_config() -> FanConfig {
        FanConfig { reshuffle_delay_ms: 0, seed: Some(11), ..FanConfig::default() }
    }

    #[test]
    fn shuffle_waits_for_reset_before_dealing() {
        let cfg = FanConfig { seed: Some(3), ..FanConfig::default() };
        let mut r = Reading::new(tarot::full_deck(), Viewport::new(400.0, Platform::Touch), cfg);
        let before = r.deck().clone();
        let t0 = Instant::now();
        r.shuffle(t0);
        assert!(r.is_shuffling());
        r.tick(t0 + Duration::from_millis(500));
        assert_eq!(r.deck(), &before);
        r.tick(t0 + Duration::from_millis(1000));
        assert!(!r.is_shuffling());
        assert_ne!(r.deck(), &before);
    }

    #[test]
    fn second_shuffle_supersedes_first() {
        let cfg = FanConfig { seed: Some(5), ..FanConfig::default() };
        let mut r = Reading::new(tarot::full_deck(), Viewport::new(400.0, Platform::Touch), cfg);
        let t0 = Instant::now();
        r.shuffle(t0);
        let t1 = t0 + Duration::from_millis(600);
        r.shuffle(t1);
        assert_eq!(r.generation().value(), 2);
        let before = r.deck().clone();
        r.tick(t0 + Duration::from_millis(1100));
        assert_eq!(r.deck(), &before, "first shuffle must not land");
        r.tick(t1 + Duration::from_millis(1000));
        assert_ne!(r.deck(), &before);
    }

    #[test]
    fn selection_hook_fires_once_per_select() {
        let mut r = Reading::new(
            tarot::full_deck(),
            Viewport::new(400.0, Platform::Touch),
            instant_config(),
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        r.set_on_card_selected(move |id| sink.borrow_mut().push(id));
        let now = Instant::now();
        r.shuffle(now);
        r.select_card(CardId::new(3), now).unwrap();
        r.select_card(CardId::new(3), now).unwrap();
        assert_eq!(seen.borrow().as_slice(), &[CardId::new(3)]);
    }

    #[test]
    fn unknown_card_is_rejected() {
        let mut r = Reading::new(
            tarot::major_arcana(),
            Viewport::new(400.0, Platform::Touch),
            instant_config(),
        );
        let err = r.select_card(CardId::new(50), Instant::now()).unwrap_err();
        assert_eq!(err, InteractionError::UnknownCard(CardId::new(50)));
    }

    #[test]
    fn selected_card_rises_above_arc() {
        let mut r = Reading::new(
            tarot::full_deck(),
            Viewport::new(400.0, Platform::Touch),
            instant_config(),
        );
        let t0 = Instant::now();
        r.shuffle(t0);
        let id = r.visible_poses()[0].card_id;
        let base = r.visible_poses()[0].vertical_lift;
        r.select_card(id, t0).unwrap();
        r.tick(t0 + Duration::from_millis(300));
        let pose = r.visible_poses().into_iter().find(|p| p.card_id == id).unwrap();
        assert!((pose.vertical_lift - base - 50.0).abs() < 1e-3);
        assert_eq!(pose.selection_phase, SelectionPhase::Selected);
    }

    #[test]
    fn empty_deck_renders_nothing() {
        let mut r =
            Reading::new(Vec::new(), Viewport::new(0.0, Platform::Touch), instant_config());
        let now = Instant::now();
        r.shuffle(now);
        r.gesture_begin(now);
        r.gesture_update(-100.0, now);
        assert_eq!(r.gesture_end(-100.0, now), None);
        assert!(r.visible_poses().is_empty());
    }

    #[test]
    fn resize_reclamps_offset() {
        let mut r = Reading::new(
            tarot::full_deck(),
            Viewport::new(400.0, Platform::Touch),
            instant_config(),
        );
        r.shuffle(Instant::now());
        assert_eq!(r.window().visible_count(), 10);
        r.set_viewport(Viewport::new(1920.0, Platform::Desktop));
        assert_eq!(r.window().visible_count(), 78);
        assert_eq!(r.window().offset(), 0.0);
        assert_eq!(r.visible_poses().len(), 78);
    }
}
