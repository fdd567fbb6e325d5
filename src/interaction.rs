//! Card selection and flipping.
//!
//! Exclusivity lives in the `Selection` type itself: there is exactly one
//! slot for an active card, so two cards can never be selected or flipped at
//! the same time.

use crate::anim::{Generation, Tween};
use crate::cards::CardId;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum SelectionPhase {
    #[default]
    Unselected,
    Selected,
    Flipped,
}

impl SelectionPhase {
    pub fn label(self) -> &'static str {
        match self {
            SelectionPhase::Unselected => "unselected",
            SelectionPhase::Selected => "selected",
            SelectionPhase::Flipped => "flipped",
        }
    }
}

/// Rejected tap. UI input is racy, so every variant is a no-op for the
/// caller, never a failure.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InteractionError {
    #[error("card {0} is not in the current deck")]
    UnknownCard(CardId),
    #[error("card {id} cannot be selected while card {active} is active")]
    Exclusive { id: CardId, active: CardId },
    #[error("card {0} is already flipped")]
    AlreadyFlipped(CardId),
    #[error("the deck is being shuffled")]
    Shuffling,
}

/// What a successful tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Transition {
    Selected(CardId),
    Flipped(CardId),
}

/// Deck-wide selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(CardId),
    Flipped(CardId),
}

impl Selection {
    pub fn active(self) -> Option<CardId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) | Selection::Flipped(id) => Some(id),
        }
    }

    pub fn phase_of(self, id: CardId) -> SelectionPhase {
        match self {
            Selection::Selected(a) if a == id => SelectionPhase::Selected,
            Selection::Flipped(a) if a == id => SelectionPhase::Flipped,
            _ => SelectionPhase::Unselected,
        }
    }

    /// Apply a tap on `id`.
    ///
    /// ```
    /// use tarot_fan::cards::CardId;
    /// use tarot_fan::interaction::{Selection, Transition};
    ///
    /// let (s, t) = Selection::None.tap(CardId::new(3)).unwrap();
    /// assert_eq!(t, Transition::Selected(CardId::new(3)));
    /// assert!(s.tap(CardId::new(7)).is_err());
    /// let (s, t) = s.tap(CardId::new(3)).unwrap();
    /// assert_eq!(t, Transition::Flipped(CardId::new(3)));
    /// assert_eq!(s, Selection::Flipped(CardId::new(3)));
    /// ```
    pub fn tap(self, id: CardId) -> Result<(Selection, Transition), InteractionError> {
        match self {
            Selection::None => Ok((Selection::Selected(id), Transition::Selected(id))),
            Selection::Selected(active) if active == id => {
                Ok((Selection::Flipped(id), Transition::Flipped(id)))
            }
            Selection::Flipped(active) if active == id => Err(InteractionError::AlreadyFlipped(id)),
            Selection::Selected(active) | Selection::Flipped(active) => {
                Err(InteractionError::Exclusive { id, active })
            }
        }
    }
}

/// Animated values for one card: `lift` raises a selected card, `flip`
/// turns it face up. Both run 0 (neutral) to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisual {
    lift: Tween,
    flip: Tween,
}

impl CardVisual {
    pub fn neutral(now: Instant, generation: Generation) -> Self {
        Self {
            lift: Tween::at_rest(0.0, now, generation),
            flip: Tween::at_rest(0.0, now, generation),
        }
    }

    pub fn lift_progress(&self) -> f32 {
        self.lift.value()
    }

    pub fn flip_progress(&self) -> f32 {
        self.flip.value()
    }

    pub fn is_settled(&self) -> bool {
        self.lift.is_settled() && self.flip.is_settled()
    }

    pub fn raise(&mut self, now: Instant, duration: Duration, generation: Generation) {
        self.lift.retarget(1.0, now, duration, generation);
    }

    pub fn turn_over(&mut self, now: Instant, duration: Duration, generation: Generation) {
        self.flip.retarget(1.0, now, duration, generation);
    }

    /// Head back to neutral from wherever the card is, overriding anything in
    /// flight.
    pub fn reset(&mut self, now: Instant, duration: Duration, generation: Generation) {
        self.lift.retarget(0.0, now, duration, generation);
        self.flip.retarget(0.0, now, duration, generation);
    }

    pub fn advance(&mut self, now: Instant, generation: Generation) {
        for tween in [&mut self.lift, &mut self.flip] {
            if tween.generation() != generation {
                *tween = Tween::at_rest(0.0, now, generation);
            } else {
                tween.advance(now);
            }
        }
    }
}
