// Engine API boundary. Presentation layers (the TUI here, anything else
// later) drive the fan through this trait without touching the controller's
// internals. It is implemented for `Reading`.

use crate::cards::CardId;
use crate::interaction::InteractionError;
use crate::reading::{CardPose, Reading};
use std::time::Instant;

pub trait FanEngine {
    // Deck lifecycle
    fn shuffle(&mut self, now: Instant);
    fn tick(&mut self, now: Instant);

    // Card interaction
    fn select_card(&mut self, id: CardId, now: Instant) -> Result<(), InteractionError>;
    fn set_on_card_selected(&mut self, hook: Box<dyn FnMut(CardId)>);

    // Gestures (translation in pixels since begin)
    fn handle_gesture_begin(&mut self, now: Instant);
    fn handle_gesture_update(&mut self, translation: f32, now: Instant);
    fn handle_gesture_end(&mut self, translation: f32, now: Instant);
    fn handle_gesture_cancel(&mut self, now: Instant);

    // Queries
    fn visible_poses(&self) -> Vec<CardPose>;
    fn is_shuffling(&self) -> bool;
    fn deck_len(&self) -> usize;
}

impl FanEngine for Reading {
    fn shuffle(&mut self, now: Instant) {
        Reading::shuffle(self, now);
    }
    fn tick(&mut self, now: Instant) {
        Reading::tick(self, now);
    }

    fn select_card(&mut self, id: CardId, now: Instant) -> Result<(), InteractionError> {
        Reading::select_card(self, id, now)
    }
    fn set_on_card_selected(&mut self, hook: Box<dyn FnMut(CardId)>) {
        Reading::set_on_card_selected(self, hook);
    }

    fn handle_gesture_begin(&mut self, now: Instant) {
        self.gesture_begin(now);
    }
    fn handle_gesture_update(&mut self, translation: f32, now: Instant) {
        self.gesture_update(translation, now);
    }
    fn handle_gesture_end(&mut self, translation: f32, now: Instant) {
        let _ = self.gesture_end(translation, now);
    }
    fn handle_gesture_cancel(&mut self, now: Instant) {
        let _ = self.gesture_cancel(now);
    }

    fn visible_poses(&self) -> Vec<CardPose> {
        Reading::visible_poses(self)
    }
    fn is_shuffling(&self) -> bool {
        Reading::is_shuffling(self)
    }
    fn deck_len(&self) -> usize {
        self.deck().len()
    }
}
