//! Dual-button event decoding: debounce, click, long press and the
//! two-button chord.
//!
//! `Buttons::poll` is called once per frame tick with the raw (already
//! inverted, `true` = pressed) pin levels and the millisecond clock. It is
//! a pure state machine; no pin access or sleeping happens here, which is
//! what makes the whole input path host-testable.
//!
//! Chord handling never blocks. Instead of stalling until both buttons
//! release, the tracker parks itself in an awaiting-release state and
//! keeps returning [`ButtonEvent::None`] until both levels go high, then
//! emits a single [`ButtonEvent::BothPress`]. Per-button state is wiped
//! when a chord is confirmed so the release edges cannot fire phantom
//! clicks afterwards.
//!
//! When both buttons would produce an event in the same poll, the left
//! one wins: the left tracker is evaluated first and an emitted event
//! skips the right tracker for that tick. Edges are re-examined every
//! poll, so nothing is lost across ticks, only coalesced within one.

use crate::config::{DEBOUNCE_MS, LONG_PRESS_MS};

/// One decoded input event per poll.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    None,
    LeftClick,
    LeftLongPress,
    RightClick,
    RightLongPress,
    BothPress,
}

/// What a single tracked button reported this poll.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Press {
    Click,
    Long,
}

/// Debounce/long-press tracker for one physical button.
#[derive(Default)]
struct Tracker {
    down_since: Option<u64>,
    long_press_fired: bool,
}

impl Tracker {
    fn track(&mut self, pressed: bool, now: u64) -> Option<Press> {
        if pressed {
            match self.down_since {
                None => {
                    self.down_since = Some(now);
                    self.long_press_fired = false;
                    None
                }
                Some(since) => {
                    if !self.long_press_fired && now - since > LONG_PRESS_MS {
                        self.long_press_fired = true;
                        Some(Press::Long)
                    } else {
                        None
                    }
                }
            }
        } else if let Some(since) = self.down_since.take() {
            // Release edge: a click only if the long press never fired and
            // the hold outlived the debounce window.
            if !self.long_press_fired && now - since > DEBOUNCE_MS {
                Some(Press::Click)
            } else {
                None
            }
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.down_since = None;
        self.long_press_fired = false;
    }
}

/// Chord detection phases.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Chord {
    Idle,
    /// Both levels just went low; confirm after the debounce interval.
    Pending { since: u64 },
    /// Chord confirmed; swallow everything until both buttons release.
    AwaitingRelease,
}

/// The two-button input decoder.
pub struct Buttons {
    left: Tracker,
    right: Tracker,
    chord: Chord,
}

impl Buttons {
    pub fn new() -> Self {
        Self {
            left: Tracker::default(),
            right: Tracker::default(),
            chord: Chord::Idle,
        }
    }

    /// Decodes at most one event from the current raw levels.
    pub fn poll(&mut self, left_pressed: bool, right_pressed: bool, now: u64) -> ButtonEvent {
        match self.chord {
            Chord::AwaitingRelease => {
                if !left_pressed && !right_pressed {
                    self.chord = Chord::Idle;
                    return ButtonEvent::BothPress;
                }
                return ButtonEvent::None;
            }
            Chord::Pending { since } => {
                if now - since < DEBOUNCE_MS {
                    return ButtonEvent::None;
                }
                self.chord = if left_pressed && right_pressed {
                    // Confirmed. Forget any in-flight single-button hold so
                    // the chord cannot be split into click events later.
                    self.left.reset();
                    self.right.reset();
                    Chord::AwaitingRelease
                } else {
                    Chord::Idle
                };
                return ButtonEvent::None;
            }
            Chord::Idle => {
                if left_pressed && right_pressed {
                    self.chord = Chord::Pending { since: now };
                    return ButtonEvent::None;
                }
            }
        }

        if let Some(press) = self.left.track(left_pressed, now) {
            return match press {
                Press::Click => ButtonEvent::LeftClick,
                Press::Long => ButtonEvent::LeftLongPress,
            };
        }
        if let Some(press) = self.right.track(right_pressed, now) {
            return match press {
                Press::Click => ButtonEvent::RightClick,
                Press::Long => ButtonEvent::RightLongPress,
            };
        }
        ButtonEvent::None
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs `poll` over a level trace at 1 ms steps, collecting events.
    fn run(buttons: &mut Buttons, trace: &[(bool, bool)], start: u64) -> (u64, heapless::Vec<ButtonEvent, 16>) {
        let mut events = heapless::Vec::new();
        let mut now = start;
        for &(l, r) in trace {
            let ev = buttons.poll(l, r, now);
            if ev != ButtonEvent::None {
                events.push(ev).unwrap();
            }
            now += 1;
        }
        (now, events)
    }

    fn hold(pressed: bool, ms: usize) -> impl Iterator<Item = (bool, bool)> {
        core::iter::repeat((pressed, false)).take(ms)
    }

    #[test]
    fn short_press_is_one_click() {
        let mut b = Buttons::new();
        let trace: heapless::Vec<(bool, bool), 256> =
            hold(true, 100).chain(hold(false, 50)).collect();
        let (_, events) = run(&mut b, &trace, 0);
        assert_eq!(events.as_slice(), &[ButtonEvent::LeftClick]);
    }

    #[test]
    fn press_under_debounce_is_swallowed() {
        let mut b = Buttons::new();
        let trace: heapless::Vec<(bool, bool), 64> =
            hold(true, 10).chain(hold(false, 30)).collect();
        let (_, events) = run(&mut b, &trace, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn long_hold_fires_exactly_one_long_press_and_no_click() {
        let mut b = Buttons::new();
        let mut events = heapless::Vec::<ButtonEvent, 16>::new();
        for now in 0..3000u64 {
            let ev = b.poll(true, false, now);
            if ev != ButtonEvent::None {
                events.push(ev).unwrap();
            }
        }
        // Release after 3 seconds: no trailing click.
        let ev = b.poll(false, false, 3000);
        assert_eq!(ev, ButtonEvent::None);
        assert_eq!(events.as_slice(), &[ButtonEvent::LeftLongPress]);
    }

    #[test]
    fn right_button_click() {
        let mut b = Buttons::new();
        for now in 0..50u64 {
            assert_eq!(b.poll(false, true, now), ButtonEvent::None);
        }
        assert_eq!(b.poll(false, false, 50), ButtonEvent::RightClick);
    }

    #[test]
    fn chord_fires_once_after_both_release() {
        let mut b = Buttons::new();
        let mut events = heapless::Vec::<ButtonEvent, 16>::new();
        // Both held 100 ms, then released.
        for now in 0..100u64 {
            let ev = b.poll(true, true, now);
            if ev != ButtonEvent::None {
                events.push(ev).unwrap();
            }
        }
        assert!(events.is_empty(), "nothing may fire while the chord is held");
        assert_eq!(b.poll(false, false, 100), ButtonEvent::BothPress);
        // And the releases leave no phantom clicks behind.
        assert_eq!(b.poll(false, false, 101), ButtonEvent::None);
    }

    #[test]
    fn chord_bounce_shorter_than_debounce_is_rejected() {
        let mut b = Buttons::new();
        // Both pressed for 5 ms, then only left stays down.
        for now in 0..5u64 {
            assert_eq!(b.poll(true, true, now), ButtonEvent::None);
        }
        for now in 5..100u64 {
            assert_eq!(b.poll(true, false, now), ButtonEvent::None);
        }
        // The surviving left hold still clicks on release.
        assert_eq!(b.poll(false, false, 100), ButtonEvent::LeftClick);
    }

    #[test]
    fn chord_suppresses_single_button_events_while_held() {
        let mut b = Buttons::new();
        // Left goes down alone first.
        for now in 0..50u64 {
            b.poll(true, false, now);
        }
        // Then right joins; chord confirms; nothing fires until release.
        for now in 50..400u64 {
            assert_eq!(b.poll(true, true, now), ButtonEvent::None);
        }
        assert_eq!(b.poll(false, false, 400), ButtonEvent::BothPress);
        assert_eq!(b.poll(false, false, 401), ButtonEvent::None);
    }

    #[test]
    fn left_event_masks_right_in_same_tick() {
        let mut b = Buttons::new();
        // Press both in a staggered way that avoids the chord: left held
        // past long-press while right is idle, then right pressed and
        // released alone later.
        for now in 0..801u64 {
            b.poll(true, false, now);
        }
        // Long press fires at 801.
        assert_eq!(b.poll(true, false, 801), ButtonEvent::LeftLongPress);
        assert_eq!(b.poll(false, false, 802), ButtonEvent::None);
    }

    #[test]
    fn stuck_button_degrades_to_single_long_press() {
        let mut b = Buttons::new();
        let mut long_presses = 0;
        for now in 0..100_000u64 {
            if b.poll(true, false, now) == ButtonEvent::LeftLongPress {
                long_presses += 1;
            }
        }
        assert_eq!(long_presses, 1);
    }
}
