use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The logical timers of a run. Declaration order doubles as the firing
/// order for timers due at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    FuelDecay,
    Gravity,
    AscendRelease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Armed { due: Duration },
    Idle,
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TimerKind,
    period: Duration,
    repeat: bool,
    state: TimerState,
}

/// Simulated monotonic clock plus the timers hanging off it.
#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    now: Duration,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            timers: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fires every `period` from now on. Periods must be non-zero; a zero
    /// period leaves the timer idle (and trips a debug assertion).
    pub fn every(&mut self, kind: TimerKind, period: Duration) {
        self.arm(kind, period, true);
    }

    /// Fires once after `delay`. Arming an armed timer restarts it.
    pub fn once(&mut self, kind: TimerKind, delay: Duration) {
        self.arm(kind, delay, false);
    }

    fn arm(&mut self, kind: TimerKind, period: Duration, repeat: bool) {
        debug_assert!(!period.is_zero(), "{kind:?} armed with a zero period");
        if period.is_zero() {
            return;
        }
        let Some(due) = self.now.checked_add(period) else {
            self.cancel(kind);
            return;
        };
        let state = TimerState::Armed { due };
        match self.timers.iter_mut().find(|t| t.kind == kind) {
            Some(t) => {
                t.period = period;
                t.repeat = repeat;
                t.state = state;
            }
            None => self.timers.push(Timer {
                kind,
                period,
                repeat,
                state,
            }),
        }
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        if let Some(t) = self.timers.iter_mut().find(|t| t.kind == kind) {
            t.state = TimerState::Idle;
        }
    }

    pub fn state(&self, kind: TimerKind) -> TimerState {
        self.timers
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.state)
            .unwrap_or(TimerState::Idle)
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        matches!(self.state(kind), TimerState::Armed { .. })
    }

    /// Pops the earliest timer due no later than `until`, moving the clock to
    /// its deadline. Periodic timers are re-armed one period later, one-shots go idle.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let (due, timer) = self
            .timers
            .iter_mut()
            .filter_map(|t| {
                let TimerState::Armed { due } = t.state else {
                    return None;
                };
                (due <= until).then_some((due, t))
            })
            .min_by_key(|(due, t)| (*due, t.kind))?;

        // a deadline past the end of the clock never comes
        timer.state = match due.checked_add(timer.period) {
            Some(next) if timer.repeat => TimerState::Armed { due: next },
            _ => TimerState::Idle,
        };
        self.now = self.now.max(due);
        Some(timer.kind)
    }

    /// Moves the clock to `until` once everything due has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(s: &mut Scheduler, until: Duration) -> Vec<(u128, TimerKind)> {
        let mut fired = Vec::new();
        while let Some(kind) = s.pop_due(until) {
            fired.push((s.now().as_millis(), kind));
        }
        s.settle(until);
        fired
    }

    #[test]
    fn periodic_timers_interleave_chronologically() {
        let mut s = Scheduler::new();
        s.every(TimerKind::FuelDecay, ms(500));
        s.every(TimerKind::Gravity, ms(200));
        let fired = drain(&mut s, ms(1000));
        assert_eq!(
            fired,
            vec![
                (200, TimerKind::Gravity),
                (400, TimerKind::Gravity),
                (500, TimerKind::FuelDecay),
                (600, TimerKind::Gravity),
                (800, TimerKind::Gravity),
                (1000, TimerKind::FuelDecay),
                (1000, TimerKind::Gravity),
            ]
        );
        assert_eq!(s.now(), ms(1000));
    }

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut s = Scheduler::new();
        s.every(TimerKind::Gravity, ms(200));
        assert!(drain(&mut s, ms(199)).is_empty());
        assert_eq!(drain(&mut s, ms(200)), vec![(200, TimerKind::Gravity)]);
    }

    #[test]
    fn one_shot_goes_idle_and_rearm_restarts() {
        let mut s = Scheduler::new();
        s.once(TimerKind::AscendRelease, ms(500));
        drain(&mut s, ms(400));
        s.once(TimerKind::AscendRelease, ms(500));
        assert!(drain(&mut s, ms(800)).is_empty());
        assert_eq!(drain(&mut s, ms(900)), vec![(900, TimerKind::AscendRelease)]);
        assert!(!s.is_armed(TimerKind::AscendRelease));
        assert!(drain(&mut s, ms(5000)).is_empty());
    }

    #[test]
    fn cancelled_timer_stays_silent() {
        let mut s = Scheduler::new();
        s.every(TimerKind::FuelDecay, ms(500));
        s.cancel(TimerKind::FuelDecay);
        assert_eq!(s.state(TimerKind::FuelDecay), TimerState::Idle);
        assert!(drain(&mut s, ms(10_000)).is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_declaration_order() {
        let mut s = Scheduler::new();
        s.once(TimerKind::AscendRelease, ms(200));
        s.every(TimerKind::Gravity, ms(200));
        s.every(TimerKind::FuelDecay, ms(200));
        let kinds: Vec<_> = drain(&mut s, ms(200)).into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            kinds,
            vec![TimerKind::FuelDecay, TimerKind::Gravity, TimerKind::AscendRelease]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "zero period")]
    fn zero_period_trips_debug_assertion() {
        let mut s = Scheduler::new();
        s.every(TimerKind::Gravity, Duration::ZERO);
    }

    #[test]
    fn periodic_timer_goes_idle_at_end_of_clock() {
        let mut s = Scheduler::new();
        s.every(TimerKind::FuelDecay, Duration::MAX / 2 + ms(1));
        assert!(s.is_armed(TimerKind::FuelDecay));
        assert_eq!(s.pop_due(Duration::MAX), Some(TimerKind::FuelDecay));
        assert!(!s.is_armed(TimerKind::FuelDecay));
        assert_eq!(s.pop_due(Duration::MAX), None);
        s.settle(Duration::MAX);
        assert_eq!(s.now(), Duration::MAX);
    }
}
