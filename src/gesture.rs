//! Tap-versus-hold recognition for clip cards.
//!
//! Each card owns one recognizer. A press starts a frame-driven progress
//! ramp; reaching the hold threshold expands the card's parameter panel and
//! suppresses the tap, while an earlier release fires exactly one play
//! action. All transitions take caller-supplied instants so tests can drive
//! the clock deterministically instead of relying on real frame timing.

use std::time::{Duration, Instant};

/// How long a press must be sustained to count as a hold.
pub const HOLD_DURATION: Duration = Duration::from_millis(300);

/// Recognizer phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No press in flight, panel closed.
    #[default]
    Idle,
    /// Pointer down, ramp running.
    Holding,
    /// Hold completed; the parameter panel is open.
    Expanded,
}

/// What a pointer release means for the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseAction {
    /// The press was a tap: start playback.
    Play,
    /// The release carries no action (hold completed, or nothing pressed).
    Ignored,
}

/// Per-card press/hold state machine.
#[derive(Clone, Debug, Default)]
pub struct HoldGesture {
    phase: GesturePhase,
    pressed_at: Option<Instant>,
    progress: f32,
}

impl HoldGesture {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Ramp progress in [0, 1]; meaningful while holding.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_holding(&self) -> bool {
        self.phase == GesturePhase::Holding
    }

    pub fn is_expanded(&self) -> bool {
        self.phase == GesturePhase::Expanded
    }

    /// Pointer pressed on the card: `Idle → Holding`.
    ///
    /// Ignored while expanded; the open panel is dismissed by clicking
    /// outside it, not by pressing the card again.
    pub fn press(&mut self, now: Instant) {
        if self.phase != GesturePhase::Idle {
            return;
        }
        self.phase = GesturePhase::Holding;
        self.pressed_at = Some(now);
        self.progress = 0.0;
    }

    /// Advance the ramp one frame. Returns true on the frame the hold
    /// completes (`Holding → Expanded`); completing the hold consumes the
    /// press, so the following release fires no play action.
    pub fn sample(&mut self, now: Instant) -> bool {
        if self.phase != GesturePhase::Holding {
            return false;
        }
        let Some(pressed_at) = self.pressed_at else {
            return false;
        };
        self.progress = hold_progress(pressed_at, now);
        if self.progress >= 1.0 {
            self.phase = GesturePhase::Expanded;
            self.pressed_at = None;
            self.progress = 0.0;
            return true;
        }
        false
    }

    /// Pointer released. A release before the threshold is a tap; at or past
    /// the threshold the hold wins even if no sample ran this frame.
    pub fn release(&mut self, now: Instant) -> ReleaseAction {
        if self.phase != GesturePhase::Holding {
            return ReleaseAction::Ignored;
        }
        let held_long_enough = self
            .pressed_at
            .map(|pressed_at| now.duration_since(pressed_at) >= HOLD_DURATION)
            .unwrap_or(false);
        self.pressed_at = None;
        self.progress = 0.0;
        if held_long_enough {
            self.phase = GesturePhase::Expanded;
            ReleaseAction::Ignored
        } else {
            self.phase = GesturePhase::Idle;
            ReleaseAction::Play
        }
    }

    /// Pointer left the card region mid-press: identical to an early
    /// release except that no play action fires.
    pub fn cancel(&mut self) {
        if self.phase != GesturePhase::Holding {
            return;
        }
        self.phase = GesturePhase::Idle;
        self.pressed_at = None;
        self.progress = 0.0;
    }

    /// Click outside the open panel: `Expanded → Idle`.
    pub fn collapse(&mut self) {
        if self.phase == GesturePhase::Expanded {
            self.phase = GesturePhase::Idle;
        }
    }
}

fn hold_progress(pressed_at: Instant, now: Instant) -> f32 {
    let elapsed = now.duration_since(pressed_at).as_secs_f32();
    (elapsed / HOLD_DURATION.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(origin: Instant, ms: u64) -> Instant {
        origin + Duration::from_millis(ms)
    }

    #[test]
    fn short_press_fires_exactly_one_play() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        assert!(!gesture.sample(at(t0, 100)));
        assert!(gesture.is_holding());
        assert_eq!(gesture.release(at(t0, 150)), ReleaseAction::Play);
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        // Nothing pressed anymore; a stray release does nothing.
        assert_eq!(gesture.release(at(t0, 160)), ReleaseAction::Ignored);
    }

    #[test]
    fn progress_ramps_with_elapsed_time() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        gesture.sample(at(t0, 150));
        assert!((gesture.progress() - 0.5).abs() < 0.01);
        gesture.sample(at(t0, 299));
        assert!(gesture.is_holding());
    }

    #[test]
    fn completed_hold_expands_and_suppresses_play() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        assert!(gesture.sample(at(t0, 300)));
        assert!(gesture.is_expanded());
        assert_eq!(gesture.release(at(t0, 320)), ReleaseAction::Ignored);
        assert!(gesture.is_expanded());
    }

    #[test]
    fn release_at_threshold_favors_the_hold() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        // No sample ran this frame; the release itself crosses the line.
        assert_eq!(gesture.release(at(t0, 300)), ReleaseAction::Ignored);
        assert!(gesture.is_expanded());
    }

    #[test]
    fn long_press_without_intermediate_samples_expands_on_release() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        assert_eq!(gesture.release(at(t0, 5_000)), ReleaseAction::Ignored);
        assert!(gesture.is_expanded());
    }

    #[test]
    fn pointer_leave_cancels_to_idle_never_expanded() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        gesture.sample(at(t0, 250));
        gesture.cancel();
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        // The aborted press must not expand on later samples.
        assert!(!gesture.sample(at(t0, 400)));
        assert_eq!(gesture.phase(), GesturePhase::Idle);
    }

    #[test]
    fn outside_click_collapses_expanded_panel() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        gesture.sample(at(t0, 350));
        assert!(gesture.is_expanded());
        gesture.collapse();
        assert_eq!(gesture.phase(), GesturePhase::Idle);
    }

    #[test]
    fn press_is_ignored_while_expanded() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.press(t0);
        gesture.sample(at(t0, 301));
        gesture.press(at(t0, 400));
        assert!(gesture.is_expanded());
        assert_eq!(gesture.release(at(t0, 420)), ReleaseAction::Ignored);
    }

    #[test]
    fn every_short_duration_plays_and_never_expands() {
        let t0 = Instant::now();
        for ms in [1u64, 50, 150, 299] {
            let mut gesture = HoldGesture::default();
            gesture.press(t0);
            gesture.sample(at(t0, ms));
            assert!(!gesture.is_expanded(), "{ms}ms press must not expand");
            assert_eq!(gesture.release(at(t0, ms)), ReleaseAction::Play);
        }
    }
}
