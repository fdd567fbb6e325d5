//! Drag gestures over the viewport window.
//!
//! `Idle -> Dragging -> Snapping -> Idle`. While dragging, the window offset
//! follows the pointer one-to-one; on release (or cancellation) the last
//! candidate offset is rounded to a whole card and animated there.

use crate::anim::Generation;
use crate::viewport::ViewportWindow;
use std::time::{Duration, Instant};

/// Live drag, alive from gesture begin to gesture end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin_offset: f32,
    pub current_translation: f32,
    /// Last clamped offset applied to the window.
    pub candidate_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum GestureEvent {
    Begin,
    /// Total horizontal translation since `Begin`, in pixels.
    Update(f32),
    End(f32),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[non_exhaustive]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
    Snapping {
        target: f32,
    },
}

/// Offset the window would take for a drag of `translation` pixels started at
/// `origin`. Dragging right (positive) reveals earlier cards.
pub fn candidate_offset(
    origin: f32,
    translation: f32,
    card_pixel_width: f32,
    window: &ViewportWindow,
) -> f32 {
    if card_pixel_width <= 0.0 || !translation.is_finite() {
        return window.clamp(origin);
    }
    window.clamp(origin - translation / card_pixel_width)
}

impl GestureState {
    /// Pure transition. `Snapping` is transient: the controller starts the
    /// snap animation and drops back to `Idle` right away, so it behaves like
    /// `Idle` here.
    pub fn next(
        self,
        event: GestureEvent,
        window: &ViewportWindow,
        card_pixel_width: f32,
    ) -> GestureState {
        match (self, event) {
            (GestureState::Idle | GestureState::Snapping { .. }, GestureEvent::Begin) => {
                let origin = window.offset();
                GestureState::Dragging(DragSession {
                    origin_offset: origin,
                    current_translation: 0.0,
                    candidate_offset: origin,
                })
            }
            (GestureState::Idle | GestureState::Snapping { .. }, _) => GestureState::Idle,
            (GestureState::Dragging(session), GestureEvent::Begin) => {
                GestureState::Dragging(session)
            }
            (GestureState::Dragging(session), GestureEvent::Update(translation)) => {
                GestureState::Dragging(DragSession {
                    current_translation: translation,
                    candidate_offset: candidate_offset(
                        session.origin_offset,
                        translation,
                        card_pixel_width,
                        window,
                    ),
                    ..session
                })
            }
            (GestureState::Dragging(session), GestureEvent::End(translation)) => {
                let candidate = candidate_offset(
                    session.origin_offset,
                    translation,
                    card_pixel_width,
                    window,
                );
                GestureState::Snapping { target: window.clamp(candidate.round()) }
            }
            (GestureState::Dragging(session), GestureEvent::Cancel) => {
                GestureState::Snapping { target: window.clamp(session.candidate_offset.round()) }
            }
        }
    }
}

/// Drives `GestureState` against a window. Gestures are ignored when the
/// deck fits in the window.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Abandon any drag without snapping. Used when a shuffle takes over.
    pub fn abandon(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Feed one event. Returns the snap target when the gesture finished.
    pub fn handle(
        &mut self,
        event: GestureEvent,
        window: &mut ViewportWindow,
        card_pixel_width: f32,
        now: Instant,
        snap_duration: Duration,
        generation: Generation,
    ) -> Option<f32> {
        if !window.scrollable() || card_pixel_width <= 0.0 {
            self.state = GestureState::Idle;
            return None;
        }
        if matches!(event, GestureEvent::Begin) && !self.is_dragging() {
            // grabbing mid-snap freezes the deck where it is
            window.cancel_snap();
        }
        match self.state.next(event, window, card_pixel_width) {
            GestureState::Dragging(session) => {
                window.set_offset(session.candidate_offset);
                self.state = GestureState::Dragging(session);
                None
            }
            GestureState::Snapping { target } => {
                log::debug!("gesture settled, snapping offset {:.2} -> {target}", window.offset());
                window.snap_to(target, now, snap_duration, generation);
                self.state = GestureState::Idle;
                Some(target)
            }
            GestureState::Idle => {
                self.state = GestureState::Idle;
                None
            }
        }
    }
}
