//! Timers driving the game: a periodic tick and a one-shot golden expiry
//!
//! Time is a `Duration` since the controller's clock started. Nothing fires
//! by itself; the owner asks for due events with [`Scheduler::pop_due`].

use std::time::Duration;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
    GoldenExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Periodic {
    next: Duration,
    interval: Duration,
}

#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    tick: Option<Periodic>,
    golden_expiry: Option<Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the tick timer and recreate it; the first tick fires at
    /// `now + interval`.
    pub fn schedule_ticks(&mut self, now: Duration, interval: Duration) {
        trace!("Tick timer every {:?} from {:?}", interval, now);
        self.tick = Some(Periodic {
            next: now + interval,
            interval,
        });
    }

    /// Arm the golden expiry, replacing any pending one
    pub fn arm_golden_expiry(&mut self, deadline: Duration) {
        self.golden_expiry = Some(deadline);
    }

    pub fn cancel_all(&mut self) {
        self.tick = None;
        self.golden_expiry = None;
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick.map(|t| t.interval)
    }

    pub fn next_tick(&self) -> Option<Duration> {
        self.tick.map(|t| t.next)
    }

    pub fn golden_expiry(&self) -> Option<Duration> {
        self.golden_expiry
    }

    /// Earliest deadline among the armed timers
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.next_tick(), self.golden_expiry) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Take the earliest event due at or before `now`, with the time it was
    /// due. The expiry wins a tie with a tick. A popped tick re-arms itself
    /// one interval later.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerEvent)> {
        let tick_due = self.next_tick().filter(|at| *at <= now);
        let expiry_due = self.golden_expiry.filter(|at| *at <= now);

        match (tick_due, expiry_due) {
            (tick, Some(expiry)) if tick.is_none_or(|t| expiry <= t) => {
                self.golden_expiry = None;
                Some((expiry, TimerEvent::GoldenExpired))
            }
            (Some(at), _) => {
                if let Some(tick) = self.tick.as_mut() {
                    tick.next = at + tick.interval;
                }
                Some((at, TimerEvent::Tick))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_periodic_ticks() {
        let mut s = Scheduler::new();
        s.schedule_ticks(ms(0), ms(150));
        assert_eq!(s.pop_due(ms(149)), None);
        assert_eq!(s.pop_due(ms(320)), Some((ms(150), TimerEvent::Tick)));
        assert_eq!(s.pop_due(ms(320)), Some((ms(300), TimerEvent::Tick)));
        assert_eq!(s.pop_due(ms(320)), None);
        assert_eq!(s.next_tick(), Some(ms(450)));
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let mut s = Scheduler::new();
        s.schedule_ticks(ms(0), ms(150));
        s.schedule_ticks(ms(100), ms(200));
        assert_eq!(s.pop_due(ms(299)), None);
        assert_eq!(s.pop_due(ms(300)), Some((ms(300), TimerEvent::Tick)));
        assert_eq!(s.tick_interval(), Some(ms(200)));
    }

    #[test]
    fn test_expiry_fires_once_and_wins_ties() {
        let mut s = Scheduler::new();
        s.schedule_ticks(ms(0), ms(200));
        s.arm_golden_expiry(ms(400));
        assert_eq!(s.pop_due(ms(400)), Some((ms(200), TimerEvent::Tick)));
        assert_eq!(s.pop_due(ms(400)), Some((ms(400), TimerEvent::GoldenExpired)));
        assert_eq!(s.pop_due(ms(400)), Some((ms(400), TimerEvent::Tick)));
        assert_eq!(s.golden_expiry(), None);
        assert_eq!(s.pop_due(ms(400)), None);
    }

    #[test]
    fn test_rearm_replaces_expiry() {
        let mut s = Scheduler::new();
        s.arm_golden_expiry(ms(1_000));
        s.arm_golden_expiry(ms(5_000));
        assert_eq!(s.pop_due(ms(4_999)), None);
        assert_eq!(s.pop_due(ms(5_000)), Some((ms(5_000), TimerEvent::GoldenExpired)));
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        s.schedule_ticks(ms(0), ms(100));
        s.arm_golden_expiry(ms(50));
        s.cancel_all();
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.pop_due(ms(10_000)), None);
    }
}
